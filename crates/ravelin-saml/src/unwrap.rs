#![forbid(unsafe_code)]

//! Recovery of the content-encryption key from `<xenc:EncryptedKey>`.
//!
//! Checks run in a fixed order and the private key is touched last:
//! 1. the relying party credential has a certificate
//! 2. the message names exactly that certificate (byte comparison of DER)
//! 3. the OAEP digest and transport algorithm are on the allow-list
//! 4. the credential has a private key
//! 5. RSA-OAEP decryption, with every failure reported identically

use crate::response::EncryptedKey;
use ravelin_core::{Error, Result};
use ravelin_crypto::keytransport::{self, OaepParams};
use ravelin_keys::Credential;

/// Recover the symmetric key wrapped in `encrypted_key` for `rp`.
///
/// The returned bytes are not checked for a usable key length.
pub fn unwrap_key(encrypted_key: &EncryptedKey, rp: &Credential) -> Result<Vec<u8>> {
    let rp_certificate = rp.certificate_der().ok_or(Error::MissingCertificate)?;

    match encrypted_key.certificate.as_deref() {
        Some(presented) if presented == rp_certificate => {}
        _ => return Err(Error::CertificateMismatch),
    }

    let digest = OaepParams::digest_from_uri(encrypted_key.digest_method.as_deref())?;
    let transport = keytransport::from_uri(
        &encrypted_key.algorithm,
        digest,
        encrypted_key.mgf.as_deref(),
    )?;

    let private_key = rp.private_key().ok_or(Error::MissingPrivateKey)?;
    transport.decrypt(private_key, &encrypted_key.cipher_value)
}
