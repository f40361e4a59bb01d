#![forbid(unsafe_code)]

//! XML Canonicalization (C14N) for SAML signature verification.
//!
//! Implements Exclusive Canonical XML 1.0, with and without comments,
//! over whole documents, documents with the enveloped signature excised,
//! and element subtrees such as `SignedInfo`.

pub mod enveloped;
pub mod escape;
pub mod exclusive;
pub mod render;

pub use enveloped::enveloped_signature;

use ravelin_core::{algorithm, Error};
use roxmltree::{Document, Node, NodeId};

/// The canonicalization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum C14nMode {
    /// Exclusive Canonical XML 1.0
    #[default]
    Exclusive,
    /// Exclusive Canonical XML 1.0 with comments
    ExclusiveWithComments,
}

impl C14nMode {
    /// Get the algorithm URI for this mode.
    pub fn uri(&self) -> &'static str {
        match self {
            Self::Exclusive => algorithm::EXC_C14N,
            Self::ExclusiveWithComments => algorithm::EXC_C14N_WITH_COMMENTS,
        }
    }

    /// Parse a C14N mode from an algorithm URI.
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            algorithm::EXC_C14N => Some(Self::Exclusive),
            algorithm::EXC_C14N_WITH_COMMENTS => Some(Self::ExclusiveWithComments),
            _ => None,
        }
    }

    pub fn with_comments(&self) -> bool {
        matches!(self, Self::ExclusiveWithComments)
    }
}

/// Canonicalize an entire XML document.
pub fn canonicalize(
    xml: &str,
    mode: C14nMode,
    inclusive_prefixes: &[String],
) -> Result<Vec<u8>, Error> {
    let doc = ravelin_xml::parse(xml)?;
    canonicalize_doc(&doc, mode, None, inclusive_prefixes)
}

/// Canonicalize a pre-parsed document, omitting the `excluded` subtree.
pub fn canonicalize_doc(
    doc: &Document<'_>,
    mode: C14nMode,
    excluded: Option<NodeId>,
    inclusive_prefixes: &[String],
) -> Result<Vec<u8>, Error> {
    exclusive::canonicalize(doc.root(), mode.with_comments(), excluded, inclusive_prefixes)
}

/// Canonicalize the subtree rooted at `node`.
pub fn canonicalize_subtree(
    node: Node<'_, '_>,
    mode: C14nMode,
    inclusive_prefixes: &[String],
) -> Result<Vec<u8>, Error> {
    exclusive::canonicalize(node, mode.with_comments(), None, inclusive_prefixes)
}

/// Canonical form of a signed document with its enveloped signature removed.
///
/// `raw` must be the document exactly as received. The top-level
/// `ds:Signature` is excised structurally and the rest is rendered with
/// exclusive C14N (comments omitted).
pub fn canonicalize_enveloped(raw: &str) -> Result<Vec<u8>, Error> {
    let doc = ravelin_xml::parse(raw)?;
    let signature = enveloped_signature(&doc)?;
    canonicalize_doc(&doc, C14nMode::Exclusive, Some(signature.id()), &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNED: &str = r#"<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion" ID="r1">
  <saml:Issuer>https://idp.example.com</saml:Issuer>
  <ds:Signature xmlns:ds="http://www.w3.org/2000/09/xmldsig#"><ds:SignatureValue>AAAA</ds:SignatureValue></ds:Signature>
  <saml:Assertion ID="a1"><ds:Signature xmlns:ds="http://www.w3.org/2000/09/xmldsig#"><ds:SignatureValue>BBBB</ds:SignatureValue></ds:Signature></saml:Assertion>
</samlp:Response>"#;

    #[test]
    fn test_mode_uri_roundtrip() {
        for mode in [C14nMode::Exclusive, C14nMode::ExclusiveWithComments] {
            assert_eq!(C14nMode::from_uri(mode.uri()), Some(mode));
        }
        assert_eq!(
            C14nMode::from_uri("http://www.w3.org/TR/2001/REC-xml-c14n-20010315"),
            None
        );
    }

    #[test]
    fn test_enveloped_excises_only_top_level_signature() {
        let out = String::from_utf8(canonicalize_enveloped(SIGNED).unwrap()).unwrap();
        assert!(!out.contains("AAAA"));
        assert!(out.contains("BBBB"));
        assert_eq!(
            out,
            "<samlp:Response xmlns:samlp=\"urn:oasis:names:tc:SAML:2.0:protocol\" ID=\"r1\">\n  \
<saml:Issuer xmlns:saml=\"urn:oasis:names:tc:SAML:2.0:assertion\">https://idp.example.com</saml:Issuer>\n  \n  \
<saml:Assertion xmlns:saml=\"urn:oasis:names:tc:SAML:2.0:assertion\" ID=\"a1\">\
<ds:Signature xmlns:ds=\"http://www.w3.org/2000/09/xmldsig#\"><ds:SignatureValue>BBBB</ds:SignatureValue></ds:Signature>\
</saml:Assertion>\n</samlp:Response>"
        );
    }

    #[test]
    fn test_enveloped_signature_value_does_not_affect_output() {
        let other = SIGNED.replace("AAAA", "CCCCDDDD");
        assert_eq!(
            canonicalize_enveloped(SIGNED).unwrap(),
            canonicalize_enveloped(&other).unwrap()
        );
    }

    #[test]
    fn test_enveloped_without_signature() {
        let err = canonicalize_enveloped("<r><a/></r>").unwrap_err();
        assert!(matches!(err, Error::SignatureNotFound));
    }

    #[test]
    fn test_enveloped_malformed() {
        let err = canonicalize_enveloped("<r><a></r>").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn test_formatting_differences_normalize() {
        let a = r#"<r  b='2'   a="1"><x/></r>"#;
        let b = "<r a=\"1\" b=\"2\"><x></x></r>";
        assert_eq!(
            canonicalize(a, C14nMode::Exclusive, &[]).unwrap(),
            canonicalize(b, C14nMode::Exclusive, &[]).unwrap()
        );
    }
}
