#![forbid(unsafe_code)]

//! Qualified names as written in the source document.
//!
//! roxmltree resolves namespaces but does not keep the prefix an element
//! or attribute was written with. Canonical XML must reproduce those
//! prefixes byte for byte, so they are sliced out of the document source
//! through the node and attribute ranges.

use roxmltree::{Attribute, Node};

/// The prefix of a qualified name, or `""` when unprefixed.
pub fn prefix_of(qname: &str) -> &str {
    qname.split_once(':').map_or("", |(prefix, _)| prefix)
}

/// The qualified name of an element, e.g. `saml:Assertion`.
///
/// A start tag's name runs from just after `<` to the first whitespace,
/// `/` or `>`.
pub fn element_qname<'a>(node: Node<'a, '_>) -> &'a str {
    let input = node.document().input_text();
    input
        .get(node.range().start + 1..)
        .and_then(|tag| {
            tag.split(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
                .next()
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| node.tag_name().name())
}

/// The qualified name of an attribute, e.g. `xml:lang`.
pub fn attribute_qname<'a>(node: Node<'a, '_>, attr: &Attribute<'a, '_>) -> &'a str {
    node.document()
        .input_text()
        .get(attr.range_qname())
        .unwrap_or_else(|| attr.name())
}

/// Qualified names for `node.attributes()`, index-aligned with that iterator.
pub fn attribute_qnames<'a>(node: Node<'a, '_>) -> Vec<&'a str> {
    node.attributes()
        .map(|attr| attribute_qname(node, &attr))
        .collect()
}
