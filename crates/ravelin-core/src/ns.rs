#![forbid(unsafe_code)]

//! XML namespace constants and element/attribute names.

/// SAML 2.0 protocol namespace
pub const SAMLP: &str = "urn:oasis:names:tc:SAML:2.0:protocol";

/// SAML 2.0 assertion namespace
pub const SAML: &str = "urn:oasis:names:tc:SAML:2.0:assertion";

/// XML Digital Signature namespace
pub const DSIG: &str = "http://www.w3.org/2000/09/xmldsig#";

/// XML Encryption namespace
pub const ENC: &str = "http://www.w3.org/2001/04/xmlenc#";

/// XML Encryption 1.1 namespace
pub const ENC11: &str = "http://www.w3.org/2009/xmlenc11#";

/// Exclusive C14N namespace
pub const EXC_C14N: &str = "http://www.w3.org/2001/10/xml-exc-c14n#";

/// XML namespace
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

// ── Element names ────────────────────────────────────────────────────

pub mod node {
    // SAML protocol and assertion elements
    pub const RESPONSE: &str = "Response";
    pub const ISSUER: &str = "Issuer";
    pub const ENCRYPTED_ASSERTION: &str = "EncryptedAssertion";
    pub const ASSERTION: &str = "Assertion";
    pub const SUBJECT: &str = "Subject";
    pub const NAME_ID: &str = "NameID";
    pub const CONDITIONS: &str = "Conditions";
    pub const AUDIENCE_RESTRICTION: &str = "AudienceRestriction";
    pub const AUDIENCE: &str = "Audience";
    pub const ATTRIBUTE_STATEMENT: &str = "AttributeStatement";
    pub const ATTRIBUTE: &str = "Attribute";
    pub const ATTRIBUTE_VALUE: &str = "AttributeValue";

    // DSig elements
    pub const SIGNATURE: &str = "Signature";
    pub const SIGNED_INFO: &str = "SignedInfo";
    pub const CANONICALIZATION_METHOD: &str = "CanonicalizationMethod";
    pub const SIGNATURE_METHOD: &str = "SignatureMethod";
    pub const SIGNATURE_VALUE: &str = "SignatureValue";
    pub const DIGEST_METHOD: &str = "DigestMethod";
    pub const DIGEST_VALUE: &str = "DigestValue";
    pub const REFERENCE: &str = "Reference";
    pub const TRANSFORMS: &str = "Transforms";
    pub const TRANSFORM: &str = "Transform";
    pub const KEY_INFO: &str = "KeyInfo";
    pub const X509_DATA: &str = "X509Data";
    pub const X509_CERTIFICATE: &str = "X509Certificate";

    // XML Encryption elements
    pub const ENCRYPTED_DATA: &str = "EncryptedData";
    pub const ENCRYPTED_KEY: &str = "EncryptedKey";
    pub const ENCRYPTION_METHOD: &str = "EncryptionMethod";
    pub const CIPHER_DATA: &str = "CipherData";
    pub const CIPHER_VALUE: &str = "CipherValue";
    pub const RSA_MGF: &str = "MGF";

    // Exclusive C14N
    pub const INCLUSIVE_NAMESPACES: &str = "InclusiveNamespaces";
}

// ── Attribute names ──────────────────────────────────────────────────

pub mod attr {
    pub const ID: &str = "ID";
    pub const ALGORITHM: &str = "Algorithm";
    pub const URI: &str = "URI";
    pub const DESTINATION: &str = "Destination";
    pub const ISSUE_INSTANT: &str = "IssueInstant";
    pub const VERSION: &str = "Version";
    pub const NOT_BEFORE: &str = "NotBefore";
    pub const NOT_ON_OR_AFTER: &str = "NotOnOrAfter";
    pub const NAME: &str = "Name";
    pub const FRIENDLY_NAME: &str = "FriendlyName";
    pub const PREFIX_LIST: &str = "PrefixList";
}
