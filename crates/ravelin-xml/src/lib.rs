#![forbid(unsafe_code)]

//! XML helpers for the ravelin SAML crates.
//!
//! Thin layer over `roxmltree`: parsing with a fixed option set, namespace
//! aware element lookup, base64 element text, and recovery of qualified
//! names exactly as they were written in the source document.

pub mod document;
pub mod qname;

pub use document::{
    decode_base64, decode_base64_text, find_child_element, find_child_elements,
    is_element, require_child, text_content,
};

use ravelin_core::Error;

/// Return roxmltree parsing options for SAML protocol messages.
///
/// DTDs are refused. SAML messages never carry one and entity
/// declarations only widen the attack surface of the parser.
pub fn parsing_options() -> roxmltree::ParsingOptions {
    roxmltree::ParsingOptions {
        allow_dtd: false,
        ..roxmltree::ParsingOptions::default()
    }
}

/// Parse `text` with [`parsing_options`].
pub fn parse(text: &str) -> Result<roxmltree::Document<'_>, Error> {
    roxmltree::Document::parse_with_options(text, parsing_options())
        .map_err(|e| Error::MalformedDocument(e.to_string()))
}
