#![forbid(unsafe_code)]

//! Certificate and RSA key loading from PEM and DER.

use crate::credential::Credential;
use ravelin_core::Error;
use std::path::Path;

/// Load an RSA private key from PEM data (PKCS#8 or PKCS#1).
pub fn load_rsa_private_pem(pem_data: &[u8]) -> Result<rsa::RsaPrivateKey, Error> {
    use pkcs8::DecodePrivateKey;
    let pem_str = std::str::from_utf8(pem_data)
        .map_err(|e| Error::Key(format!("invalid PEM encoding: {e}")))?;
    let pem_str = pem_str.trim();

    // Try PKCS#8 first
    if let Ok(pk) = rsa::RsaPrivateKey::from_pkcs8_pem(pem_str) {
        return Ok(pk);
    }

    use pkcs1::DecodeRsaPrivateKey;
    rsa::RsaPrivateKey::from_pkcs1_pem(pem_str)
        .map_err(|e| Error::Key(format!("failed to parse RSA private key PEM: {e}")))
}

/// Load an RSA private key from DER data (PKCS#8 or PKCS#1).
pub fn load_rsa_private_der(der_data: &[u8]) -> Result<rsa::RsaPrivateKey, Error> {
    use pkcs8::DecodePrivateKey;
    if let Ok(pk) = rsa::RsaPrivateKey::from_pkcs8_der(der_data) {
        return Ok(pk);
    }

    use pkcs1::DecodeRsaPrivateKey;
    rsa::RsaPrivateKey::from_pkcs1_der(der_data)
        .map_err(|e| Error::Key(format!("failed to parse RSA private key DER: {e}")))
}

/// Load a credential from a PEM-encoded X.509 certificate.
pub fn load_x509_cert_pem(pem_data: &[u8]) -> Result<Credential, Error> {
    let pem_str = std::str::from_utf8(pem_data)
        .map_err(|e| Error::Certificate(format!("invalid PEM encoding: {e}")))?;

    // Trim trailing whitespace; some PEM files have extra newlines
    let trimmed = pem_str.trim();

    let (label, der_bytes) = pem_rfc7468::decode_vec(trimmed.as_bytes())
        .map_err(|e| Error::Certificate(format!("failed to decode certificate PEM: {e}")))?;

    if label != "CERTIFICATE" {
        return Err(Error::Certificate(format!(
            "expected CERTIFICATE PEM label, got: {label}"
        )));
    }

    load_x509_cert_der(&der_bytes)
}

/// Load a credential from a DER-encoded X.509 certificate.
///
/// Only RSA subject keys are accepted.
pub fn load_x509_cert_der(data: &[u8]) -> Result<Credential, Error> {
    use der::{Decode, Encode};
    use x509_cert::Certificate;

    let cert = Certificate::from_der(data)
        .map_err(|e| Error::Certificate(format!("failed to parse X.509 certificate: {e}")))?;

    let spki = &cert.tbs_certificate.subject_public_key_info;
    let spki_der = spki
        .to_der()
        .map_err(|e| Error::Certificate(format!("failed to encode SPKI: {e}")))?;

    use spki::DecodePublicKey;
    let public = rsa::RsaPublicKey::from_public_key_der(&spki_der).map_err(|_| {
        Error::Certificate("unsupported public key algorithm in X.509 certificate".into())
    })?;
    Ok(Credential::new(data.to_vec(), public))
}

/// Load a certificate file, PEM or DER.
pub fn load_certificate_file(path: &Path) -> Result<Credential, Error> {
    let data = std::fs::read(path)?;
    let credential = if data.starts_with(b"-----BEGIN") {
        load_x509_cert_pem(&data)?
    } else {
        load_x509_cert_der(&data)?
    };
    Ok(credential.with_name(path.display().to_string()))
}

/// Load an RSA private key file, PEM or DER.
pub fn load_private_key_file(path: &Path) -> Result<rsa::RsaPrivateKey, Error> {
    let data = std::fs::read(path)?;
    if data.starts_with(b"-----BEGIN") {
        load_rsa_private_pem(&data)
    } else {
        load_rsa_private_der(&data)
    }
}

/// Load a relying party credential from a certificate file and its key file.
pub fn load_credential_files(cert_path: &Path, key_path: &Path) -> Result<Credential, Error> {
    let private = load_private_key_file(key_path)?;
    load_certificate_file(cert_path)?.with_private_key(private)
}

impl Credential {
    /// Build a credential from a PEM certificate and an optional PEM key.
    pub fn from_pem(cert_pem: &[u8], key_pem: Option<&[u8]>) -> Result<Self, Error> {
        let credential = load_x509_cert_pem(cert_pem)?;
        match key_pem {
            Some(key_pem) => credential.with_private_key(load_rsa_private_pem(key_pem)?),
            None => Ok(credential),
        }
    }
}
