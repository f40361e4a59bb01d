#![forbid(unsafe_code)]

//! Certificate and key material for SAML relying parties.
//!
//! Loads X.509 certificates and RSA private keys from PEM or DER into
//! [`Credential`] values.

pub mod credential;
pub mod loader;

pub use credential::Credential;
pub use loader::{load_certificate_file, load_credential_files};
