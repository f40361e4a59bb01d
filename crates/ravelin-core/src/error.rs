#![forbid(unsafe_code)]

/// Errors produced while verifying and decrypting a SAML response.
///
/// Variants raised on secret-dependent paths (`KeyRecoveryFailed`,
/// `InvalidPadding`, `NoTrustedIdp`, `DigestMismatch`) carry no payload so
/// that neither attacker input nor key material ends up in a message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── Key unwrapping ───────────────────────────────────────────────
    #[error("relying party credential has no certificate")]
    MissingCertificate,

    #[error("encrypted key was not issued for the relying party certificate")]
    CertificateMismatch,

    #[error("relying party credential has no private key")]
    MissingPrivateKey,

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("unsupported digest: {0}")]
    UnsupportedDigest(String),

    #[error("symmetric key recovery failed")]
    KeyRecoveryFailed,

    // ── Content decryption ───────────────────────────────────────────
    #[error("ciphertext is truncated")]
    TruncatedCiphertext,

    #[error("invalid padding")]
    InvalidPadding,

    #[error("invalid symmetric key length: {0} bytes")]
    InvalidKeyLength(usize),

    // ── Canonicalization and signatures ──────────────────────────────
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("signature element not found")]
    SignatureNotFound,

    #[error("no trusted identity provider signed the response")]
    NoTrustedIdp,

    #[error("reference digest mismatch")]
    DigestMismatch,

    // ── Conditions ───────────────────────────────────────────────────
    #[error("assertion not valid yet")]
    TooSoon,

    #[error("assertion no longer valid")]
    TooLate,

    #[error("audience mismatch")]
    AudienceMismatch,

    // ── Decoding and key material ────────────────────────────────────
    #[error("missing required element: {0}")]
    MissingElement(String),

    #[error("base64 decode error: {0}")]
    Base64(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("key error: {0}")]
    Key(String),

    #[error("certificate error: {0}")]
    Certificate(String),

    #[error("cryptographic error: {0}")]
    Crypto(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The verification stage this error belongs to.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::MissingCertificate
            | Self::CertificateMismatch
            | Self::MissingPrivateKey
            | Self::UnsupportedDigest(_)
            | Self::KeyRecoveryFailed => "key-unwrap",
            Self::TruncatedCiphertext | Self::InvalidPadding | Self::InvalidKeyLength(_) => {
                "decrypt"
            }
            Self::SignatureNotFound | Self::NoTrustedIdp | Self::DigestMismatch => "signature",
            Self::TooSoon | Self::TooLate | Self::AudienceMismatch => "conditions",
            Self::MalformedDocument(_)
            | Self::MissingElement(_)
            | Self::Base64(_)
            | Self::InvalidTimestamp(_) => "decode",
            Self::UnsupportedAlgorithm(_) | Self::Crypto(_) => "crypto",
            Self::Key(_) | Self::Certificate(_) | Self::Io(_) => "input",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
