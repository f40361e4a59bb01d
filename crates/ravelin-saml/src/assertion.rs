#![forbid(unsafe_code)]

//! Decrypted `<saml:Assertion>`.

use crate::conditions::{AudienceRestriction, Conditions};
use chrono::{DateTime, Utc};
use ravelin_core::{ns, Error, Result};
use ravelin_xml::{find_child_element, find_child_elements, is_element, text_content};
use roxmltree::Node;
use std::collections::HashMap;

/// Identity claims made by an identity provider.
#[derive(Debug)]
pub struct Assertion {
    pub id: String,
    pub issue_instant: Option<DateTime<Utc>>,
    pub version: Option<String>,
    pub issuer: Option<String>,
    /// `Subject/NameID`, base64-decoded. Empty when the assertion has no
    /// subject.
    pub name_id: Vec<u8>,
    /// `Subject/NameID` as written, trimmed.
    pub name_id_text: String,
    pub conditions: Conditions,
    /// Attribute name to value. Attributes are keyed by `FriendlyName`,
    /// falling back to `Name`; later values replace earlier ones.
    pub attributes: HashMap<String, String>,
}

impl Assertion {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::MalformedDocument(format!("assertion is not UTF-8: {e}")))?;
        Self::from_xml(text)
    }

    pub fn from_xml(xml: &str) -> Result<Self> {
        let doc = ravelin_xml::parse(xml)?;
        let root = doc.root_element();
        if !is_element(root, ns::SAML, ns::node::ASSERTION) {
            return Err(Error::MalformedDocument(format!(
                "expected saml:Assertion, found {}",
                root.tag_name().name()
            )));
        }

        let id = root
            .attribute(ns::attr::ID)
            .ok_or_else(|| Error::MissingElement("Assertion/@ID".into()))?
            .to_owned();
        let issue_instant = root
            .attribute(ns::attr::ISSUE_INSTANT)
            .map(parse_instant)
            .transpose()?;

        let name_id_text = find_child_element(root, ns::SAML, ns::node::SUBJECT)
            .and_then(|s| find_child_element(s, ns::SAML, ns::node::NAME_ID))
            .map(|n| text_content(n).trim().to_owned())
            .unwrap_or_default();
        let name_id = ravelin_xml::decode_base64(&name_id_text).map_err(|e| match e {
            Error::Base64(msg) => Error::Base64(format!("NameID: {msg}")),
            other => other,
        })?;

        let conditions = match find_child_element(root, ns::SAML, ns::node::CONDITIONS) {
            Some(node) => read_conditions(node)?,
            None => Conditions::default(),
        };

        Ok(Self {
            id,
            issue_instant,
            version: root.attribute(ns::attr::VERSION).map(str::to_owned),
            issuer: find_child_element(root, ns::SAML, ns::node::ISSUER)
                .map(|n| text_content(n).trim().to_owned()),
            name_id,
            name_id_text,
            conditions,
            attributes: read_attributes(root),
        })
    }
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::InvalidTimestamp(format!("{value}: {e}")))
}

fn read_conditions(node: Node<'_, '_>) -> Result<Conditions> {
    let mut conditions = Conditions {
        not_before: node
            .attribute(ns::attr::NOT_BEFORE)
            .map(parse_instant)
            .transpose()?,
        not_on_or_after: node
            .attribute(ns::attr::NOT_ON_OR_AFTER)
            .map(parse_instant)
            .transpose()?,
        list: Vec::new(),
    };

    // Condition kinds other than AudienceRestriction are not evaluated.
    for restriction in find_child_elements(node, ns::SAML, ns::node::AUDIENCE_RESTRICTION) {
        let audiences = find_child_elements(restriction, ns::SAML, ns::node::AUDIENCE)
            .into_iter()
            .map(text_content)
            .collect();
        conditions
            .list
            .push(Box::new(AudienceRestriction { audiences }));
    }
    Ok(conditions)
}

fn read_attributes(root: Node<'_, '_>) -> HashMap<String, String> {
    let mut attributes = HashMap::new();
    for statement in find_child_elements(root, ns::SAML, ns::node::ATTRIBUTE_STATEMENT) {
        for attribute in find_child_elements(statement, ns::SAML, ns::node::ATTRIBUTE) {
            let Some(key) = attribute
                .attribute(ns::attr::FRIENDLY_NAME)
                .or_else(|| attribute.attribute(ns::attr::NAME))
            else {
                continue;
            };
            for value in find_child_elements(attribute, ns::SAML, ns::node::ATTRIBUTE_VALUE) {
                let text = text_content(value);
                let text = text.trim();
                if !text.is_empty() {
                    attributes.insert(key.to_owned(), text.to_owned());
                }
            }
        }
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;

    const ASSERTION: &str = r#"<saml:Assertion xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion" ID="_a1" IssueInstant="2024-01-01T00:00:00Z" Version="2.0">
  <saml:Issuer>https://idp.example.com</saml:Issuer>
  <saml:Subject>
    <saml:NameID> dXNlckBleGFtcGxlLmNvbQ== </saml:NameID>
  </saml:Subject>
  <saml:Conditions NotBefore="2024-01-01T00:00:00Z" NotOnOrAfter="2024-01-01T01:00:00.500+00:00">
    <saml:AudienceRestriction>
      <saml:Audience> oauth.astuart.co </saml:Audience>
    </saml:AudienceRestriction>
    <saml:OneTimeUse/>
  </saml:Conditions>
  <saml:AttributeStatement>
    <saml:Attribute Name="urn:oid:0.9.2342.19200300.100.1.3" FriendlyName="mail">
      <saml:AttributeValue>user@example.com</saml:AttributeValue>
    </saml:Attribute>
    <saml:Attribute Name="role">
      <saml:AttributeValue> viewer </saml:AttributeValue>
      <saml:AttributeValue> admin </saml:AttributeValue>
    </saml:Attribute>
  </saml:AttributeStatement>
</saml:Assertion>"#;

    #[test]
    fn test_decode_assertion() {
        let a = Assertion::from_xml(ASSERTION).unwrap();
        assert_eq!(a.id, "_a1");
        assert_eq!(a.version.as_deref(), Some("2.0"));
        assert_eq!(a.issuer.as_deref(), Some("https://idp.example.com"));
        assert_eq!(a.name_id, b"user@example.com");
        assert_eq!(a.name_id_text, "dXNlckBleGFtcGxlLmNvbQ==");
        assert_eq!(
            a.issue_instant.unwrap().to_rfc3339(),
            "2024-01-01T00:00:00+00:00"
        );
        assert_eq!(a.attributes.len(), 2);
        assert_eq!(a.attributes["mail"], "user@example.com");
        assert_eq!(a.attributes["role"], "admin");
    }

    #[test]
    fn test_conditions_decoded() {
        let a = Assertion::from_xml(ASSERTION).unwrap();
        let c = &a.conditions;
        assert_eq!(c.list.len(), 1);
        assert_eq!(
            c.not_on_or_after.unwrap().timestamp_millis()
                - c.not_before.unwrap().timestamp_millis(),
            3_600_500
        );
        let ctx = Context::new("oauth.astuart.co", Vec::new());
        assert!(c.list[0].validate(&ctx).is_ok());
    }

    #[test]
    fn test_invalid_timestamp() {
        let bad = ASSERTION.replace("NotBefore=\"2024-01-01T00:00:00Z\"", "NotBefore=\"yesterday\"");
        assert!(matches!(
            Assertion::from_xml(&bad),
            Err(Error::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_missing_id_and_wrong_root() {
        let no_id = ASSERTION.replace(" ID=\"_a1\"", "");
        assert!(matches!(
            Assertion::from_xml(&no_id),
            Err(Error::MissingElement(_))
        ));
        assert!(matches!(
            Assertion::from_xml("<Assertion ID=\"x\"/>"),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_non_base64_name_id() {
        let plain = ASSERTION.replace(" dXNlckBleGFtcGxlLmNvbQ== ", "user@example.com");
        assert!(matches!(Assertion::from_xml(&plain), Err(Error::Base64(_))));
    }
}
