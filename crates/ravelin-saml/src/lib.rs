#![forbid(unsafe_code)]

//! SAML 2.0 response verification for a relying party.
//!
//! A [`ResponsePipeline`] takes a response carrying an encrypted assertion
//! and, in order, recovers the content key ([`unwrap_key`]), decrypts the
//! assertion ([`decrypt_content`]), verifies the response signature
//! against the trusted identity providers ([`verify_signature`]) and
//! evaluates the assertion's conditions ([`evaluate`]). Each stage is also
//! usable on its own.

pub mod assertion;
pub mod conditions;
pub mod context;
pub mod decrypt;
pub mod pipeline;
pub mod response;
pub mod unwrap;
pub mod verify;

#[cfg(test)]
mod testutil;

pub use assertion::Assertion;
pub use conditions::{evaluate, evaluate_at, AudienceRestriction, Condition, Conditions};
pub use context::Context;
pub use decrypt::decrypt_content;
pub use pipeline::ResponsePipeline;
pub use response::{EncryptedKey, Response};
pub use unwrap::unwrap_key;
pub use verify::{verify_canonical, verify_signature, SignatureProfile};
