#![forbid(unsafe_code)]

//! RSA PKCS#1 v1.5 signatures.
//!
//! The algorithm is chosen when a verification context is built, never
//! from the `SignatureMethod` a message declares.

use crate::digest::HashAlgorithm;
use ravelin_core::{algorithm, Error};
use signature::SignatureEncoding;

/// Supported signature algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    #[default]
    RsaSha256,
    RsaSha384,
}

impl SignatureAlgorithm {
    pub fn from_uri(uri: &str) -> Result<Self, Error> {
        match uri {
            algorithm::RSA_SHA256 => Ok(Self::RsaSha256),
            algorithm::RSA_SHA384 => Ok(Self::RsaSha384),
            _ => Err(Error::UnsupportedAlgorithm(format!("signature algorithm: {uri}"))),
        }
    }

    pub fn uri(self) -> &'static str {
        match self {
            Self::RsaSha256 => algorithm::RSA_SHA256,
            Self::RsaSha384 => algorithm::RSA_SHA384,
        }
    }

    /// The hash the signature is computed over.
    pub fn hash(self) -> HashAlgorithm {
        match self {
            Self::RsaSha256 => HashAlgorithm::Sha256,
            Self::RsaSha384 => HashAlgorithm::Sha384,
        }
    }

    pub fn sign(self, private_key: &rsa::RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>, Error> {
        use signature::Signer;
        macro_rules! do_sign {
            ($hasher:ty) => {{
                let sk = rsa::pkcs1v15::SigningKey::<$hasher>::new(private_key.clone());
                let sig = sk
                    .try_sign(data)
                    .map_err(|e| Error::Crypto(format!("RSA sign: {e}")))?;
                Ok(sig.to_vec())
            }};
        }
        match self {
            Self::RsaSha256 => do_sign!(sha2::Sha256),
            Self::RsaSha384 => do_sign!(sha2::Sha384),
        }
    }

    /// Check `sig_bytes` over `data`. A malformed signature is simply not
    /// valid; `Ok(false)` is returned rather than an error.
    pub fn verify(
        self,
        public_key: &rsa::RsaPublicKey,
        data: &[u8],
        sig_bytes: &[u8],
    ) -> Result<bool, Error> {
        use signature::Verifier;
        let Ok(sig) = rsa::pkcs1v15::Signature::try_from(sig_bytes) else {
            return Ok(false);
        };
        macro_rules! do_verify {
            ($hasher:ty) => {{
                let vk = rsa::pkcs1v15::VerifyingKey::<$hasher>::new(public_key.clone());
                Ok(vk.verify(data, &sig).is_ok())
            }};
        }
        match self {
            Self::RsaSha256 => do_verify!(sha2::Sha256),
            Self::RsaSha384 => do_verify!(sha2::Sha384),
        }
    }
}
