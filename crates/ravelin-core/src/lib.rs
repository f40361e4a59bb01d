#![forbid(unsafe_code)]

//! Shared error type and identifiers for the ravelin SAML crates.

pub mod algorithm;
pub mod error;
pub mod ns;

pub use error::{Error, Result};
