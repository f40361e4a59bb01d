#![forbid(unsafe_code)]

//! RSA-OAEP key transport.
//!
//! Only OAEP is offered; RSA PKCS#1 v1.5 key transport is not accepted.
//! The OAEP label is always empty.

use crate::digest::HashAlgorithm;
use ravelin_core::{algorithm, Error};

/// Trait for key transport algorithms.
pub trait KeyTransportAlgorithm: Send + Sync {
    fn uri(&self) -> &'static str;
    fn encrypt(&self, public_key: &rsa::RsaPublicKey, key_data: &[u8]) -> Result<Vec<u8>, Error>;
    /// Recover the transported key.
    ///
    /// Every failure maps to [`Error::KeyRecoveryFailed`] so callers cannot
    /// tell which OAEP check rejected the input.
    fn decrypt(
        &self,
        private_key: &rsa::RsaPrivateKey,
        encrypted: &[u8],
    ) -> Result<Vec<u8>, Error>;
}

/// Resolved RSA-OAEP hash parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OaepParams {
    /// Hash applied to the (empty) label.
    pub digest: HashAlgorithm,
    /// Hash used by MGF1.
    pub mgf: HashAlgorithm,
}

impl OaepParams {
    /// Select the OAEP digest from an `EncryptedKey`'s `DigestMethod`.
    ///
    /// SHA-1 and SHA-256 are accepted; an absent `DigestMethod` means SHA-1.
    pub fn digest_from_uri(uri: Option<&str>) -> Result<HashAlgorithm, Error> {
        match uri {
            None | Some(algorithm::SHA1) => Ok(HashAlgorithm::Sha1),
            Some(algorithm::SHA256) | Some(algorithm::SHA256_DSIG) => Ok(HashAlgorithm::Sha256),
            Some(other) => Err(Error::UnsupportedDigest(other.to_owned())),
        }
    }
}

/// Create a key transport algorithm from its URI.
///
/// `rsa-oaep-mgf1p` fixes MGF1 to SHA-1. The XML Encryption 1.1
/// `rsa-oaep` identifier takes MGF1's hash from the optional `MGF`
/// element and defaults to SHA-1 as well.
pub fn from_uri(
    uri: &str,
    digest: HashAlgorithm,
    mgf_uri: Option<&str>,
) -> Result<Box<dyn KeyTransportAlgorithm>, Error> {
    match uri {
        algorithm::RSA_OAEP => Ok(Box::new(RsaOaepTransport {
            uri: algorithm::RSA_OAEP,
            params: OaepParams {
                digest,
                mgf: HashAlgorithm::Sha1,
            },
        })),
        algorithm::RSA_OAEP_ENC11 => {
            let mgf = match mgf_uri {
                None | Some(algorithm::MGF1_SHA1) => HashAlgorithm::Sha1,
                Some(algorithm::MGF1_SHA256) => HashAlgorithm::Sha256,
                Some(other) => {
                    return Err(Error::UnsupportedAlgorithm(format!("MGF: {other}")))
                }
            };
            Ok(Box::new(RsaOaepTransport {
                uri: algorithm::RSA_OAEP_ENC11,
                params: OaepParams { digest, mgf },
            }))
        }
        _ => Err(Error::UnsupportedAlgorithm(format!("key transport: {uri}"))),
    }
}

struct RsaOaepTransport {
    uri: &'static str,
    params: OaepParams,
}

/// Build the OAEP padding for a (digest, mgf) pair and evaluate `$body`
/// with it bound to `$padding`.
macro_rules! with_oaep {
    ($params:expr, $padding:ident => $body:expr) => {{
        macro_rules! with_mgf {
            ($d:ty) => {
                match $params.mgf {
                    HashAlgorithm::Sha1 => {
                        let $padding = rsa::Oaep::new_with_mgf_hash::<$d, sha1::Sha1>();
                        $body
                    }
                    HashAlgorithm::Sha256 => {
                        let $padding = rsa::Oaep::new_with_mgf_hash::<$d, sha2::Sha256>();
                        $body
                    }
                    HashAlgorithm::Sha384 => {
                        let $padding = rsa::Oaep::new_with_mgf_hash::<$d, sha2::Sha384>();
                        $body
                    }
                }
            };
        }
        match $params.digest {
            HashAlgorithm::Sha1 => with_mgf!(sha1::Sha1),
            HashAlgorithm::Sha256 => with_mgf!(sha2::Sha256),
            HashAlgorithm::Sha384 => with_mgf!(sha2::Sha384),
        }
    }};
}

impl KeyTransportAlgorithm for RsaOaepTransport {
    fn uri(&self) -> &'static str {
        self.uri
    }

    fn encrypt(&self, public_key: &rsa::RsaPublicKey, key_data: &[u8]) -> Result<Vec<u8>, Error> {
        let mut rng = rand::thread_rng();
        with_oaep!(self.params, padding => public_key
            .encrypt(&mut rng, padding, key_data)
            .map_err(|e| Error::Crypto(format!("RSA-OAEP encrypt: {e}"))))
    }

    fn decrypt(
        &self,
        private_key: &rsa::RsaPrivateKey,
        encrypted: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let mut rng = rand::thread_rng();
        with_oaep!(self.params, padding => private_key
            .decrypt_blinded(&mut rng, padding, encrypted)
            .map_err(|_| Error::KeyRecoveryFailed))
    }
}
