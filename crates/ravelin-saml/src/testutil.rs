#![forbid(unsafe_code)]

//! Test fixtures: checked-in credentials and a builder for encrypted,
//! signed responses.

use crate::verify::SignatureProfile;
use base64::Engine;
use ravelin_core::{algorithm, ns};
use ravelin_crypto::{keytransport, AesCbc, SignatureAlgorithm};
use ravelin_keys::{loader, Credential};
use rand::RngCore;

pub const SP_CERT: &[u8] = include_bytes!("../../../testdata/sp.crt");
pub const SP_KEY: &[u8] = include_bytes!("../../../testdata/sp.key");
pub const IDP_CERT: &[u8] = include_bytes!("../../../testdata/idp.crt");
pub const IDP_KEY: &[u8] = include_bytes!("../../../testdata/idp.key");
pub const ROGUE_CERT: &[u8] = include_bytes!("../../../testdata/rogue.crt");
pub const ROGUE_KEY: &[u8] = include_bytes!("../../../testdata/rogue.key");

pub const AUDIENCE: &str = "oauth.astuart.co";
/// Inside the fixture assertion's validity window.
pub const VALID_AT: &str = "2024-01-01T00:30:00Z";
pub const NOT_BEFORE: &str = "2024-01-01T00:00:00Z";
pub const NOT_ON_OR_AFTER: &str = "2024-01-01T01:00:00Z";

const SIGNATURE_PLACEHOLDER: &str = "@SIGNATURE@";
const DIGEST_PLACEHOLDER: &str = "@DIGEST@";

fn b64(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

pub fn load_cert(pem: &[u8]) -> Credential {
    loader::load_x509_cert_pem(pem).unwrap()
}

/// Relying party credential with its private key.
pub fn sp() -> Credential {
    Credential::from_pem(SP_CERT, Some(SP_KEY)).unwrap().with_name("sp")
}

pub fn idp() -> Credential {
    load_cert(IDP_CERT).with_name("idp")
}

pub fn rogue() -> Credential {
    load_cert(ROGUE_CERT).with_name("rogue")
}

pub fn idp_key() -> rsa::RsaPrivateKey {
    loader::load_rsa_private_pem(IDP_KEY).unwrap()
}

pub fn rogue_key() -> rsa::RsaPrivateKey {
    loader::load_rsa_private_pem(ROGUE_KEY).unwrap()
}

pub fn at(rfc3339: &str) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&chrono::Utc)
}

/// A plaintext assertion restricted to `audience`.
pub fn assertion_xml(audience: &str) -> String {
    format!(
        r#"<saml:Assertion xmlns:saml="{saml}" ID="_assert1" IssueInstant="{nb}" Version="2.0">
  <saml:Issuer>https://idp.example.com</saml:Issuer>
  <saml:Subject>
    <saml:NameID Format="urn:oasis:names:tc:SAML:2.0:nameid-format:persistent">dXNlckBleGFtcGxlLmNvbQ==</saml:NameID>
  </saml:Subject>
  <saml:Conditions NotBefore="{nb}" NotOnOrAfter="{noa}">
    <saml:AudienceRestriction>
      <saml:Audience>{audience}</saml:Audience>
    </saml:AudienceRestriction>
  </saml:Conditions>
  <saml:AttributeStatement>
    <saml:Attribute Name="urn:oid:0.9.2342.19200300.100.1.3" FriendlyName="mail">
      <saml:AttributeValue>user@example.com</saml:AttributeValue>
    </saml:Attribute>
    <saml:Attribute Name="groups">
      <saml:AttributeValue> staff </saml:AttributeValue>
    </saml:Attribute>
  </saml:AttributeStatement>
</saml:Assertion>"#,
        saml = ns::SAML,
        nb = NOT_BEFORE,
        noa = NOT_ON_OR_AFTER,
    )
}

/// Builds a response the way an identity provider would: the assertion is
/// encrypted under a fresh AES key, the key is wrapped to the relying party
/// certificate, and the response is signed with the identity provider key.
pub struct ResponseBuilder {
    assertion: String,
    key_size: usize,
    embedded_cert: Option<Vec<u8>>,
    key_transport: &'static str,
    oaep_digest: Option<&'static str>,
    signature_algorithm: SignatureAlgorithm,
    profile: SignatureProfile,
    signer: rsa::RsaPrivateKey,
}

impl ResponseBuilder {
    pub fn new(assertion: String) -> Self {
        Self {
            assertion,
            key_size: 32,
            embedded_cert: sp().certificate_der().map(<[u8]>::to_vec),
            key_transport: algorithm::RSA_OAEP,
            oaep_digest: Some(algorithm::SHA1),
            signature_algorithm: SignatureAlgorithm::RsaSha256,
            profile: SignatureProfile::Envelope,
            signer: idp_key(),
        }
    }

    pub fn key_size(mut self, key_size: usize) -> Self {
        self.key_size = key_size;
        self
    }

    /// Certificate named in the `EncryptedKey`; the key is still wrapped to
    /// the relying party.
    pub fn embedded_cert(mut self, der: Option<Vec<u8>>) -> Self {
        self.embedded_cert = der;
        self
    }

    pub fn oaep_digest(mut self, uri: Option<&'static str>) -> Self {
        self.oaep_digest = uri;
        self
    }

    pub fn signature_algorithm(mut self, alg: SignatureAlgorithm) -> Self {
        self.signature_algorithm = alg;
        self
    }

    pub fn profile(mut self, profile: SignatureProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn signer(mut self, key: rsa::RsaPrivateKey) -> Self {
        self.signer = key;
        self
    }

    pub fn build(&self) -> String {
        let mut content_key = vec![0u8; self.key_size];
        rand::thread_rng().fill_bytes(&mut content_key);
        let cipher = AesCbc::for_key(&content_key).unwrap();
        let ciphertext = cipher
            .encrypt(&content_key, self.assertion.as_bytes())
            .unwrap();

        let digest = keytransport::OaepParams::digest_from_uri(self.oaep_digest).unwrap();
        let wrapped = keytransport::from_uri(self.key_transport, digest, None)
            .unwrap()
            .encrypt(sp().public_key().unwrap(), &content_key)
            .unwrap();

        let digest_method = self
            .oaep_digest
            .map(|uri| format!("\n            <ds:DigestMethod Algorithm=\"{uri}\"/>\n          "))
            .unwrap_or_default();
        let key_info = self
            .embedded_cert
            .as_ref()
            .map(|der| {
                format!(
                    "\n          <ds:KeyInfo><ds:X509Data><ds:X509Certificate>{}</ds:X509Certificate></ds:X509Data></ds:KeyInfo>",
                    b64(der)
                )
            })
            .unwrap_or_default();

        let template = format!(
            r##"<samlp:Response xmlns:samlp="{samlp}" xmlns:saml="{saml}" ID="_resp1" Version="2.0" IssueInstant="{nb}" Destination="https://oauth.astuart.co/saml/acs">
  <saml:Issuer>https://idp.example.com</saml:Issuer>
  <ds:Signature xmlns:ds="{dsig}">
    <ds:SignedInfo>
      <ds:CanonicalizationMethod Algorithm="{c14n}"/>
      <ds:SignatureMethod Algorithm="{sig_alg}"/>
      <ds:Reference URI="#_resp1">
        <ds:Transforms>
          <ds:Transform Algorithm="{enveloped}"/>
          <ds:Transform Algorithm="{c14n}"/>
        </ds:Transforms>
        <ds:DigestMethod Algorithm="{digest_alg}"/>
        <ds:DigestValue>{digest_ph}</ds:DigestValue>
      </ds:Reference>
    </ds:SignedInfo>
    <ds:SignatureValue>{sig_ph}</ds:SignatureValue>
  </ds:Signature>
  <saml:EncryptedAssertion>
    <xenc:EncryptedData xmlns:xenc="{enc}" Type="http://www.w3.org/2001/04/xmlenc#Element">
      <xenc:EncryptionMethod Algorithm="{data_alg}"/>
      <ds:KeyInfo xmlns:ds="{dsig}">
        <xenc:EncryptedKey>
          <xenc:EncryptionMethod Algorithm="{transport}">{digest_method}</xenc:EncryptionMethod>{key_info}
          <xenc:CipherData><xenc:CipherValue>{wrapped}</xenc:CipherValue></xenc:CipherData>
        </xenc:EncryptedKey>
      </ds:KeyInfo>
      <xenc:CipherData><xenc:CipherValue>{ciphertext}</xenc:CipherValue></xenc:CipherData>
    </xenc:EncryptedData>
  </saml:EncryptedAssertion>
</samlp:Response>"##,
            samlp = ns::SAMLP,
            saml = ns::SAML,
            dsig = ns::DSIG,
            enc = ns::ENC,
            nb = NOT_BEFORE,
            c14n = algorithm::EXC_C14N,
            enveloped = algorithm::ENVELOPED_SIGNATURE,
            sig_alg = self.signature_algorithm.uri(),
            digest_alg = self.signature_algorithm.hash().uri(),
            digest_ph = DIGEST_PLACEHOLDER,
            sig_ph = SIGNATURE_PLACEHOLDER,
            data_alg = cipher.uri(),
            transport = self.key_transport,
            wrapped = b64(&wrapped),
            ciphertext = b64(&ciphertext),
        );

        // The signature element is excised before canonicalization, so the
        // placeholders do not affect the signed bytes.
        let signed_bytes = ravelin_c14n::canonicalize_enveloped(&template).unwrap();
        let digest = self.signature_algorithm.hash().digest(&signed_bytes);
        let with_digest = template.replace(DIGEST_PLACEHOLDER, &b64(&digest));

        let to_sign = match self.profile {
            SignatureProfile::Envelope => signed_bytes,
            SignatureProfile::SignedInfo => {
                let doc = ravelin_xml::parse(&with_digest).unwrap();
                let signed_info = doc
                    .descendants()
                    .find(|n| ravelin_xml::is_element(*n, ns::DSIG, ns::node::SIGNED_INFO))
                    .unwrap();
                ravelin_c14n::canonicalize_subtree(
                    signed_info,
                    ravelin_c14n::C14nMode::Exclusive,
                    &[],
                )
                .unwrap()
            }
        };
        let signature = self.signature_algorithm.sign(&self.signer, &to_sign).unwrap();
        with_digest.replace(SIGNATURE_PLACEHOLDER, &b64(&signature))
    }
}
