#![forbid(unsafe_code)]

//! Enveloped-signature excision.
//!
//! The signature that signs a document is a direct child of the document
//! element. Only that element is removed before canonicalization;
//! `Signature` elements deeper in the tree belong to embedded content
//! (for example a signed assertion) and stay part of the signed bytes.

use ravelin_core::{ns, Error};
use roxmltree::{Document, Node};

/// Locate the enveloped signature of `doc`.
///
/// Fails with [`Error::SignatureNotFound`] when the document element has no
/// `ds:Signature` child, and with [`Error::MalformedDocument`] when it has
/// more than one.
pub fn enveloped_signature<'a, 'input>(
    doc: &'a Document<'input>,
) -> Result<Node<'a, 'input>, Error> {
    let mut signatures = doc
        .root_element()
        .children()
        .filter(|n| ravelin_xml::is_element(*n, ns::DSIG, ns::node::SIGNATURE));
    let signature = signatures.next().ok_or(Error::SignatureNotFound)?;
    if signatures.next().is_some() {
        return Err(Error::MalformedDocument(
            "more than one enveloped signature".into(),
        ));
    }
    Ok(signature)
}
