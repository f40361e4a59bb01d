#![forbid(unsafe_code)]

//! Namespace-aware element lookup and text extraction.

use base64::Engine;
use ravelin_core::Error;
use roxmltree::Node;

/// Whether `node` is an element named `{ns}local_name`.
pub fn is_element(node: Node<'_, '_>, ns: &str, local_name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == local_name
        && node.tag_name().namespace().unwrap_or("") == ns
}

/// Find the first child element with the given namespace and local name.
pub fn find_child_element<'a, 'input>(
    parent: Node<'a, 'input>,
    ns: &str,
    local_name: &str,
) -> Option<Node<'a, 'input>> {
    parent.children().find(|n| is_element(*n, ns, local_name))
}

/// Find all child elements with the given namespace and local name.
pub fn find_child_elements<'a, 'input>(
    parent: Node<'a, 'input>,
    ns: &str,
    local_name: &str,
) -> Vec<Node<'a, 'input>> {
    parent
        .children()
        .filter(|n| is_element(*n, ns, local_name))
        .collect()
}

/// Like [`find_child_element`], but a missing child is an error.
pub fn require_child<'a, 'input>(
    parent: Node<'a, 'input>,
    ns: &str,
    local_name: &str,
) -> Result<Node<'a, 'input>, Error> {
    find_child_element(parent, ns, local_name)
        .ok_or_else(|| Error::MissingElement(local_name.to_owned()))
}

/// Concatenated text of all descendant text nodes.
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Decode base64 text, ignoring embedded whitespace and line breaks.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, Error> {
    let clean: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(clean.as_bytes())
        .map_err(|e| Error::Base64(e.to_string()))
}

/// Decode the base64 text content of an element.
pub fn decode_base64_text(node: Node<'_, '_>) -> Result<Vec<u8>, Error> {
    decode_base64(&text_content(node)).map_err(|e| match e {
        Error::Base64(msg) => Error::Base64(format!("{}: {msg}", node.tag_name().name())),
        other => other,
    })
}
