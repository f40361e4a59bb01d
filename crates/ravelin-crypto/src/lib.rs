#![forbid(unsafe_code)]

//! Cryptographic primitives for SAML response processing.
//!
//! Digests, RSA-OAEP key transport, AES-CBC content encryption and
//! RSA PKCS#1 v1.5 signatures. Algorithm selection goes through closed
//! allow-lists keyed by XML Security URIs.

pub mod cipher;
pub mod digest;
pub mod keytransport;
pub mod sign;

pub use cipher::{AesCbc, PaddingMode};
pub use digest::{DigestAlgorithm, HashAlgorithm};
pub use keytransport::KeyTransportAlgorithm;
pub use sign::SignatureAlgorithm;
