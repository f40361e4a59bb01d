#![forbid(unsafe_code)]

//! Exclusive Canonical XML 1.0 (exc-C14N).
//!
//! Algorithm URI: `http://www.w3.org/2001/10/xml-exc-c14n#`
//! With comments: `http://www.w3.org/2001/10/xml-exc-c14n#WithComments`
//!
//! Only "visibly utilized" namespace declarations are output. A namespace
//! is visibly utilized by an element if:
//! 1. Its prefix is used by the element's tag name, OR
//! 2. Its prefix is used by one of the element's attributes, OR
//! 3. The prefix appears in the InclusiveNamespaces PrefixList.
//!
//! A declaration is emitted only when it differs from the binding already
//! rendered by the nearest output ancestor.

use crate::escape;
use crate::render::{Attr, NsDecl};
use ravelin_core::Error;
use ravelin_xml::qname;
use roxmltree::{Node, NodeId, NodeType};
use std::collections::{BTreeMap, BTreeSet};

/// Canonicalize the tree rooted at `start`.
///
/// `start` is either the document root (whole-document form) or an element
/// (document subset form, as used for `SignedInfo`). The subtree rooted at
/// `excluded`, when given, is omitted from the output entirely.
pub fn canonicalize(
    start: Node<'_, '_>,
    with_comments: bool,
    excluded: Option<NodeId>,
    inclusive_prefixes: &[String],
) -> Result<Vec<u8>, Error> {
    let prefixes = inclusive_prefixes
        .iter()
        .map(|p| if p == "#default" { String::new() } else { p.clone() })
        .collect();
    let ctx = ExcC14nContext {
        with_comments,
        excluded,
        inclusive_prefixes: prefixes,
    };
    let mut output = Vec::new();
    ctx.process_node(start, &mut output, &BTreeMap::new());
    Ok(output)
}

struct ExcC14nContext {
    with_comments: bool,
    excluded: Option<NodeId>,
    inclusive_prefixes: BTreeSet<String>,
}

impl ExcC14nContext {
    fn process_node(
        &self,
        node: Node<'_, '_>,
        output: &mut Vec<u8>,
        rendered_ns: &BTreeMap<String, String>,
    ) {
        if Some(node.id()) == self.excluded {
            return;
        }
        match node.node_type() {
            NodeType::Root => {
                for child in node.children() {
                    self.process_node(child, output, rendered_ns);
                }
            }
            NodeType::Element => self.process_element(node, output, rendered_ns),
            NodeType::Text => {
                if let Some(text) = node.text() {
                    escape::escape_text_into(output, text);
                }
            }
            NodeType::Comment => {
                if self.with_comments {
                    let text = node.text().unwrap_or("");
                    with_root_separators(node, output, |out| {
                        out.extend_from_slice(b"<!--");
                        out.extend_from_slice(text.as_bytes());
                        out.extend_from_slice(b"-->");
                    });
                }
            }
            NodeType::PI => {
                if let Some(pi) = node.pi() {
                    with_root_separators(node, output, |out| {
                        out.extend_from_slice(b"<?");
                        out.extend_from_slice(pi.target.as_bytes());
                        if let Some(value) = pi.value.filter(|v| !v.is_empty()) {
                            out.push(b' ');
                            escape::escape_pi_into(out, value);
                        }
                        out.extend_from_slice(b"?>");
                    });
                }
            }
        }
    }

    fn process_element(
        &self,
        node: Node<'_, '_>,
        output: &mut Vec<u8>,
        rendered_ns: &BTreeMap<String, String>,
    ) {
        let elem_name = qname::element_qname(node);
        let attr_names = qname::attribute_qnames(node);

        let mut utilized: BTreeSet<String> = BTreeSet::new();
        utilized.insert(qname::prefix_of(elem_name).to_owned());
        for name in &attr_names {
            let prefix = qname::prefix_of(name);
            if !prefix.is_empty() {
                utilized.insert(prefix.to_owned());
            }
        }
        utilized.extend(self.inclusive_prefixes.iter().cloned());

        let inscope = inscope_namespaces(node);

        let mut ns_decls: Vec<NsDecl> = Vec::new();
        for prefix in &utilized {
            if prefix == "xml" {
                continue;
            }
            match inscope.get(prefix) {
                Some(uri) => {
                    if rendered_ns.get(prefix) != Some(uri) {
                        ns_decls.push(NsDecl {
                            prefix: prefix.clone(),
                            uri: uri.clone(),
                        });
                    }
                }
                None if prefix.is_empty() => {
                    // The default namespace was undeclared below an
                    // ancestor that rendered one.
                    if rendered_ns.get("").is_some_and(|uri| !uri.is_empty()) {
                        ns_decls.push(NsDecl {
                            prefix: String::new(),
                            uri: String::new(),
                        });
                    }
                }
                None => {}
            }
        }
        ns_decls.sort();

        let mut attrs: Vec<Attr<'_>> = node
            .attributes()
            .zip(attr_names)
            .map(|(attr, qualified_name)| Attr {
                ns_uri: attr.namespace().unwrap_or(""),
                local_name: attr.name(),
                qualified_name,
                value: attr.value(),
            })
            .collect();
        attrs.sort();

        output.push(b'<');
        output.extend_from_slice(elem_name.as_bytes());
        for ns_decl in &ns_decls {
            ns_decl.write(output);
        }
        for attr in &attrs {
            attr.write(output);
        }
        output.push(b'>');

        let mut child_rendered_ns = rendered_ns.clone();
        for ns_decl in ns_decls {
            child_rendered_ns.insert(ns_decl.prefix, ns_decl.uri);
        }

        for child in node.children() {
            self.process_node(child, output, &child_rendered_ns);
        }

        output.extend_from_slice(b"</");
        output.extend_from_slice(elem_name.as_bytes());
        output.push(b'>');
    }
}

/// Comments and PIs outside the document element are separated from it by
/// a line feed on the side facing the element.
fn with_root_separators(node: Node<'_, '_>, output: &mut Vec<u8>, write: impl FnOnce(&mut Vec<u8>)) {
    let at_root = node
        .parent()
        .is_some_and(|p| p.node_type() == NodeType::Root);
    if at_root && node.prev_siblings().any(|s| s.is_element()) {
        output.push(b'\n');
    }
    write(output);
    if at_root && node.next_siblings().any(|s| s.is_element()) {
        output.push(b'\n');
    }
}

/// All namespace bindings in scope for an element, keyed by prefix.
fn inscope_namespaces(node: Node<'_, '_>) -> BTreeMap<String, String> {
    node.namespaces()
        .filter(|ns| !ns.uri().is_empty())
        .map(|ns| (ns.name().unwrap_or("").to_owned(), ns.uri().to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c14n(xml: &str, with_comments: bool, prefixes: &[&str]) -> String {
        let doc = ravelin_xml::parse(xml).unwrap();
        let prefixes: Vec<String> = prefixes.iter().map(|s| s.to_string()).collect();
        let out = canonicalize(doc.root(), with_comments, None, &prefixes).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_unused_namespaces_dropped() {
        let xml = r#"<a:root xmlns:a="urn:a" xmlns:b="urn:b"><a:child/></a:root>"#;
        assert_eq!(
            c14n(xml, false, &[]),
            r#"<a:root xmlns:a="urn:a"><a:child></a:child></a:root>"#
        );
    }

    #[test]
    fn test_namespace_pushed_down_to_user() {
        let xml = r#"<root xmlns:b="urn:b"><b:child/><b:child/></root>"#;
        assert_eq!(
            c14n(xml, false, &[]),
            r#"<root><b:child xmlns:b="urn:b"></b:child><b:child xmlns:b="urn:b"></b:child></root>"#
        );
    }

    #[test]
    fn test_attribute_prefix_is_utilized() {
        let xml = r#"<root xmlns:x="urn:x" z="1" x:a="2" b="3"/>"#;
        assert_eq!(
            c14n(xml, false, &[]),
            r#"<root xmlns:x="urn:x" b="3" z="1" x:a="2"></root>"#
        );
    }

    #[test]
    fn test_default_namespace_undeclared() {
        let xml = r#"<root xmlns="urn:d"><child xmlns=""/></root>"#;
        assert_eq!(
            c14n(xml, false, &[]),
            r#"<root xmlns="urn:d"><child xmlns=""></child></root>"#
        );
    }

    #[test]
    fn test_inclusive_prefix_list() {
        let xml = r#"<root xmlns:k="urn:k"><child/></root>"#;
        assert_eq!(
            c14n(xml, false, &["k"]),
            r#"<root xmlns:k="urn:k"><child></child></root>"#
        );
    }

    #[test]
    fn test_comments_and_pis_around_document_element() {
        let xml = "<?pi data?><!--before--><root>t<!--in--></root><!--after-->";
        assert_eq!(c14n(xml, false, &[]), "<?pi data?>\n<root>t</root>");
        assert_eq!(
            c14n(xml, true, &[]),
            "<?pi data?>\n<!--before-->\n<root>t<!--in--></root>\n<!--after-->"
        );
    }

    #[test]
    fn test_text_escaping_and_whitespace_kept() {
        let xml = "<root a=\"x&amp;&quot;y\">\n  1 &lt; 2 &amp;&amp; 3 &gt; 2\n</root>";
        assert_eq!(
            c14n(xml, false, &[]),
            "<root a=\"x&amp;&quot;y\">\n  1 &lt; 2 &amp;&amp; 3 &gt; 2\n</root>"
        );
    }

    #[test]
    fn test_subtree_renders_ancestor_namespaces() {
        let xml = r#"<r:root xmlns:r="urn:r" xmlns:ds="urn:ds"><ds:info><ds:m/></ds:info></r:root>"#;
        let doc = ravelin_xml::parse(xml).unwrap();
        let info = doc.root_element().first_element_child().unwrap();
        let out = canonicalize(info, false, None, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"<ds:info xmlns:ds="urn:ds"><ds:m></ds:m></ds:info>"#
        );
    }

    #[test]
    fn test_excluded_subtree_omitted() {
        let xml = r#"<root><keep/><drop><inner/></drop><keep/></root>"#;
        let doc = ravelin_xml::parse(xml).unwrap();
        let drop = doc
            .descendants()
            .find(|n| n.has_tag_name("drop"))
            .unwrap();
        let out = canonicalize(doc.root(), false, Some(drop.id()), &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<root><keep></keep><keep></keep></root>"
        );
    }
}
