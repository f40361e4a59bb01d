#![forbid(unsafe_code)]

//! Decryption of the `EncryptedData` that carries the assertion.

use ravelin_core::{Error, Result};
use ravelin_crypto::{AesCbc, PaddingMode};

/// Decrypt `IV || ciphertext` with the recovered content key.
///
/// `data_algorithm` is the `EncryptionMethod` declared on the
/// `EncryptedData`; when present it must be the AES-CBC variant matching
/// the key length.
pub fn decrypt_content(
    ciphertext: &[u8],
    key: &[u8],
    data_algorithm: Option<&str>,
    padding: PaddingMode,
) -> Result<Vec<u8>> {
    let cipher = AesCbc::for_key(key)?;
    if let Some(uri) = data_algorithm {
        if AesCbc::from_uri(uri)? != cipher {
            return Err(Error::UnsupportedAlgorithm(format!(
                "{uri} with a {} byte key",
                key.len()
            )));
        }
    }
    cipher.decrypt(key, ciphertext, padding)
}
