#![forbid(unsafe_code)]

//! `<samlp:Response>` carrying an encrypted assertion.

use ravelin_core::{ns, Error, Result};
use ravelin_xml::{decode_base64_text, find_child_element, require_child, text_content};
use roxmltree::Node;

/// `<xenc:EncryptedKey>`: the content key, encrypted to the relying party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedKey {
    /// `EncryptionMethod/@Algorithm`.
    pub algorithm: String,
    /// `EncryptionMethod/DigestMethod/@Algorithm`, the OAEP digest.
    pub digest_method: Option<String>,
    /// `EncryptionMethod/xenc11:MGF/@Algorithm`.
    pub mgf: Option<String>,
    /// DER of `KeyInfo/X509Data/X509Certificate`: the certificate the
    /// sender encrypted to.
    pub certificate: Option<Vec<u8>>,
    pub cipher_value: Vec<u8>,
}

/// A decoded SAML response.
#[derive(Debug, Clone)]
pub struct Response {
    pub id: Option<String>,
    pub destination: Option<String>,
    pub issuer: Option<String>,
    pub encrypted_key: EncryptedKey,
    /// `EncryptedData/EncryptionMethod/@Algorithm`, when present.
    pub data_algorithm: Option<String>,
    /// `IV || ciphertext` of the assertion.
    pub cipher_value: Vec<u8>,
    /// `SignatureValue` of the enveloped signature.
    pub signature_value: Vec<u8>,
    /// First `Reference/DigestValue` of the enveloped signature.
    pub digest_value: Option<Vec<u8>>,
    /// The response exactly as received. Signatures are checked over this
    /// text, never over a re-serialization.
    pub raw: String,
}

impl Response {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::MalformedDocument(format!("response is not UTF-8: {e}")))?;
        Self::from_xml(text)
    }

    pub fn from_xml(xml: &str) -> Result<Self> {
        let doc = ravelin_xml::parse(xml)?;
        let root = doc.root_element();
        if !ravelin_xml::is_element(root, ns::SAMLP, ns::node::RESPONSE) {
            return Err(Error::MalformedDocument(format!(
                "expected samlp:Response, found {}",
                root.tag_name().name()
            )));
        }

        let issuer = find_child_element(root, ns::SAML, ns::node::ISSUER)
            .map(|n| text_content(n).trim().to_owned());

        let encrypted_assertion = require_child(root, ns::SAML, ns::node::ENCRYPTED_ASSERTION)?;
        let encrypted_data = require_child(encrypted_assertion, ns::ENC, ns::node::ENCRYPTED_DATA)?;
        let data_algorithm = algorithm_of(encrypted_data, ns::ENC, ns::node::ENCRYPTION_METHOD);
        let cipher_value = read_cipher_value(encrypted_data)?;

        let key_node = find_child_element(encrypted_data, ns::DSIG, ns::node::KEY_INFO)
            .and_then(|ki| find_child_element(ki, ns::ENC, ns::node::ENCRYPTED_KEY))
            .or_else(|| find_child_element(encrypted_assertion, ns::ENC, ns::node::ENCRYPTED_KEY))
            .ok_or_else(|| Error::MissingElement(ns::node::ENCRYPTED_KEY.into()))?;
        let encrypted_key = read_encrypted_key(key_node)?;

        let signature = ravelin_c14n::enveloped_signature(&doc)?;
        let signature_value =
            decode_base64_text(require_child(signature, ns::DSIG, ns::node::SIGNATURE_VALUE)?)?;
        let digest_value = find_child_element(signature, ns::DSIG, ns::node::SIGNED_INFO)
            .and_then(|si| find_child_element(si, ns::DSIG, ns::node::REFERENCE))
            .and_then(|r| find_child_element(r, ns::DSIG, ns::node::DIGEST_VALUE))
            .map(decode_base64_text)
            .transpose()?;

        Ok(Self {
            id: root.attribute(ns::attr::ID).map(str::to_owned),
            destination: root.attribute(ns::attr::DESTINATION).map(str::to_owned),
            issuer,
            encrypted_key,
            data_algorithm,
            cipher_value,
            signature_value,
            digest_value,
            raw: xml.to_owned(),
        })
    }
}

fn read_encrypted_key(node: Node<'_, '_>) -> Result<EncryptedKey> {
    let method = require_child(node, ns::ENC, ns::node::ENCRYPTION_METHOD)?;
    let algorithm = method
        .attribute(ns::attr::ALGORITHM)
        .ok_or_else(|| Error::MissingElement("EncryptionMethod/@Algorithm".into()))?
        .to_owned();

    let certificate = find_child_element(node, ns::DSIG, ns::node::KEY_INFO)
        .and_then(|ki| find_child_element(ki, ns::DSIG, ns::node::X509_DATA))
        .and_then(|xd| find_child_element(xd, ns::DSIG, ns::node::X509_CERTIFICATE))
        .map(decode_base64_text)
        .transpose()?;

    Ok(EncryptedKey {
        algorithm,
        digest_method: algorithm_of(method, ns::DSIG, ns::node::DIGEST_METHOD),
        mgf: algorithm_of(method, ns::ENC11, ns::node::RSA_MGF),
        certificate,
        cipher_value: read_cipher_value(node)?,
    })
}

fn read_cipher_value(node: Node<'_, '_>) -> Result<Vec<u8>> {
    let cipher_data = require_child(node, ns::ENC, ns::node::CIPHER_DATA)?;
    decode_base64_text(require_child(cipher_data, ns::ENC, ns::node::CIPHER_VALUE)?)
}

fn algorithm_of(parent: Node<'_, '_>, namespace: &str, local_name: &str) -> Option<String> {
    find_child_element(parent, namespace, local_name)
        .and_then(|n| n.attribute(ns::attr::ALGORITHM))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r##"<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion" ID="_r1" Destination="https://oauth.astuart.co/acs">
  <saml:Issuer> https://idp.example.com </saml:Issuer>
  <ds:Signature xmlns:ds="http://www.w3.org/2000/09/xmldsig#">
    <ds:SignedInfo><ds:Reference URI="#_r1"><ds:DigestValue>AQID</ds:DigestValue></ds:Reference></ds:SignedInfo>
    <ds:SignatureValue>
      BAUG
    </ds:SignatureValue>
  </ds:Signature>
  <saml:EncryptedAssertion>
    <xenc:EncryptedData xmlns:xenc="http://www.w3.org/2001/04/xmlenc#">
      <xenc:EncryptionMethod Algorithm="http://www.w3.org/2001/04/xmlenc#aes128-cbc"/>
      <ds:KeyInfo xmlns:ds="http://www.w3.org/2000/09/xmldsig#">
        <xenc:EncryptedKey>
          <xenc:EncryptionMethod Algorithm="http://www.w3.org/2001/04/xmlenc#rsa-oaep-mgf1p">
            <ds:DigestMethod Algorithm="http://www.w3.org/2000/09/xmldsig#sha1"/>
          </xenc:EncryptionMethod>
          <ds:KeyInfo><ds:X509Data><ds:X509Certificate>MIIB</ds:X509Certificate></ds:X509Data></ds:KeyInfo>
          <xenc:CipherData><xenc:CipherValue>CgsM</xenc:CipherValue></xenc:CipherData>
        </xenc:EncryptedKey>
      </ds:KeyInfo>
      <xenc:CipherData><xenc:CipherValue>DQ4P</xenc:CipherValue></xenc:CipherData>
    </xenc:EncryptedData>
  </saml:EncryptedAssertion>
</samlp:Response>"##;

    #[test]
    fn test_decode_response() {
        let r = Response::from_xml(RESPONSE).unwrap();
        assert_eq!(r.id.as_deref(), Some("_r1"));
        assert_eq!(r.destination.as_deref(), Some("https://oauth.astuart.co/acs"));
        assert_eq!(r.issuer.as_deref(), Some("https://idp.example.com"));
        assert_eq!(r.signature_value, vec![4, 5, 6]);
        assert_eq!(r.digest_value, Some(vec![1, 2, 3]));
        assert_eq!(r.cipher_value, vec![13, 14, 15]);
        assert_eq!(
            r.data_algorithm.as_deref(),
            Some("http://www.w3.org/2001/04/xmlenc#aes128-cbc")
        );
        assert_eq!(r.encrypted_key.cipher_value, vec![10, 11, 12]);
        assert_eq!(r.encrypted_key.certificate, Some(vec![0x30, 0x82, 0x01]));
        assert_eq!(
            r.encrypted_key.digest_method.as_deref(),
            Some("http://www.w3.org/2000/09/xmldsig#sha1")
        );
        assert_eq!(r.encrypted_key.mgf, None);
        assert_eq!(r.raw, RESPONSE);
    }

    #[test]
    fn test_encrypted_key_beside_encrypted_data() {
        let sibling = RESPONSE
            .replace("<xenc:EncryptedKey>", "<xenc:EncryptedKeyX>")
            .replace("</xenc:EncryptedKey>", "</xenc:EncryptedKeyX>")
            .replace(
                "</xenc:EncryptedData>",
                "</xenc:EncryptedData>\n    <xenc:EncryptedKey xmlns:xenc=\"http://www.w3.org/2001/04/xmlenc#\"><xenc:EncryptionMethod Algorithm=\"urn:x\"/><xenc:CipherData><xenc:CipherValue>AA==</xenc:CipherValue></xenc:CipherData></xenc:EncryptedKey>",
            );
        let r = Response::from_xml(&sibling).unwrap();
        assert_eq!(r.encrypted_key.algorithm, "urn:x");
        assert_eq!(r.encrypted_key.certificate, None);
    }

    #[test]
    fn test_missing_signature() {
        let start = RESPONSE.find("<ds:Signature").unwrap();
        let end = RESPONSE.find("</ds:Signature>").unwrap() + "</ds:Signature>".len();
        let unsigned = format!("{}{}", &RESPONSE[..start], &RESPONSE[end..]);
        assert!(matches!(
            Response::from_xml(&unsigned),
            Err(Error::SignatureNotFound)
        ));
    }

    #[test]
    fn test_wrong_root_and_bad_base64() {
        assert!(matches!(
            Response::from_xml("<Response/>"),
            Err(Error::MalformedDocument(_))
        ));
        let bad = RESPONSE.replace("DQ4P", "D*4P");
        assert!(matches!(Response::from_xml(&bad), Err(Error::Base64(_))));
        assert!(matches!(
            Response::from_bytes(&[0xff, 0xfe]),
            Err(Error::MalformedDocument(_))
        ));
    }
}
