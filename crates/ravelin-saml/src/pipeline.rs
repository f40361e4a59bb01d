#![forbid(unsafe_code)]

//! End-to-end processing of an encrypted, signed SAML response.

use crate::assertion::Assertion;
use crate::conditions;
use crate::context::Context;
use crate::decrypt::decrypt_content;
use crate::response::Response;
use crate::unwrap::unwrap_key;
use crate::verify::verify_signature;
use chrono::{DateTime, Utc};
use ravelin_core::Result;
use ravelin_keys::Credential;

/// Turns a received response into a verified assertion.
///
/// Stages run in a fixed order: key unwrap, content decryption, assertion
/// decoding, signature verification over the received envelope, then the
/// assertion's conditions. The first failing stage aborts processing and
/// its error is returned; no assertion is handed out on failure.
#[derive(Debug, Clone)]
pub struct ResponsePipeline {
    rp: Credential,
    context: Context,
}

impl ResponsePipeline {
    /// `rp` is the relying party credential holding the private key the
    /// content key was wrapped to.
    pub fn new(rp: Credential, context: Context) -> Self {
        Self { rp, context }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Decode `xml` as a response and process it at the current time.
    pub fn process_xml(&self, xml: &str) -> Result<Assertion> {
        let response = Response::from_xml(xml).map_err(rejected)?;
        self.process(&response)
    }

    pub fn process(&self, response: &Response) -> Result<Assertion> {
        self.process_at(response, Utc::now())
    }

    /// Process `response`, evaluating its conditions as of `now`.
    pub fn process_at(&self, response: &Response, now: DateTime<Utc>) -> Result<Assertion> {
        self.run(response, now).map_err(rejected)
    }

    fn run(&self, response: &Response, now: DateTime<Utc>) -> Result<Assertion> {
        tracing::debug!(response_id = ?response.id, issuer = ?response.issuer, "Processing response");

        let key = unwrap_key(&response.encrypted_key, &self.rp)?;
        tracing::debug!("Content key recovered");

        let plaintext = decrypt_content(
            &response.cipher_value,
            &key,
            response.data_algorithm.as_deref(),
            self.context.padding,
        )?;
        let assertion = Assertion::from_bytes(&plaintext)?;
        tracing::debug!(assertion_id = %assertion.id, "Assertion decrypted");

        let signer = verify_signature(response, &self.context)?;
        tracing::debug!(signer = ?signer.name(), "Response signature verified");

        conditions::evaluate_at(&assertion.conditions, &self.context, now)?;
        tracing::debug!(assertion_id = %assertion.id, "Assertion conditions satisfied");

        Ok(assertion)
    }
}

fn rejected(e: ravelin_core::Error) -> ravelin_core::Error {
    tracing::warn!(stage = e.stage(), error = %e, "Response rejected");
    e
}
