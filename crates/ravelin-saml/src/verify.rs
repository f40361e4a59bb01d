#![forbid(unsafe_code)]

//! Signature verification against a pool of trusted identity providers.
//!
//! The signature algorithm comes from the [`Context`], never from the
//! message. Two profiles decide which bytes the `SignatureValue` covers:
//!
//! - [`SignatureProfile::Envelope`]: the exclusive canonical form of the
//!   raw response with its top-level `ds:Signature` excised.
//! - [`SignatureProfile::SignedInfo`]: XML-DSig proper. The single
//!   `Reference` digests the excised response and the `SignatureValue`
//!   covers the canonical `SignedInfo`.

use crate::context::Context;
use crate::response::Response;
use ravelin_c14n::C14nMode;
use ravelin_core::{algorithm, ns, Error, Result};
use ravelin_crypto::{HashAlgorithm, SignatureAlgorithm};
use ravelin_keys::Credential;
use ravelin_xml::{find_child_element, find_child_elements, require_child};
use roxmltree::Node;
use subtle::ConstantTimeEq;

/// What a response's `SignatureValue` is computed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureProfile {
    #[default]
    Envelope,
    SignedInfo,
}

impl std::str::FromStr for SignatureProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "envelope" => Ok(Self::Envelope),
            "signed-info" => Ok(Self::SignedInfo),
            _ => Err(Error::UnsupportedAlgorithm(format!("signature profile: {s}"))),
        }
    }
}

/// Verify `signature` over `canonical` with each trusted credential in turn.
///
/// Returns the first credential whose key validates the signature, or
/// [`Error::NoTrustedIdp`] when none does.
pub fn verify_canonical<'c>(
    canonical: &[u8],
    signature: &[u8],
    signature_algorithm: SignatureAlgorithm,
    trusted: &'c [Credential],
) -> Result<&'c Credential> {
    for (index, credential) in trusted.iter().enumerate() {
        let Some(public_key) = credential.public_key() else {
            tracing::debug!(index, "Trusted credential has no public key, skipping");
            continue;
        };
        match signature_algorithm.verify(public_key, canonical, signature) {
            Ok(true) => {
                tracing::debug!(index, name = ?credential.name(), "Signature verified");
                return Ok(credential);
            }
            Ok(false) => tracing::debug!(index, "Signature did not verify against trusted credential"),
            Err(e) => tracing::debug!(index, error = %e, "Signature check failed"),
        }
    }
    Err(Error::NoTrustedIdp)
}

/// Verify the enveloped signature of `response` under `ctx`.
pub fn verify_signature<'c>(response: &Response, ctx: &'c Context) -> Result<&'c Credential> {
    match ctx.profile {
        SignatureProfile::Envelope => {
            let canonical = ravelin_c14n::canonicalize_enveloped(&response.raw)?;
            verify_canonical(
                &canonical,
                &response.signature_value,
                ctx.signature_algorithm,
                &ctx.trusted,
            )
        }
        SignatureProfile::SignedInfo => verify_signed_info(response, ctx),
    }
}

fn verify_signed_info<'c>(response: &Response, ctx: &'c Context) -> Result<&'c Credential> {
    let doc = ravelin_xml::parse(&response.raw)?;
    let signature = ravelin_c14n::enveloped_signature(&doc)?;
    let signed_info = require_child(signature, ns::DSIG, ns::node::SIGNED_INFO)?;

    let c14n_method = require_child(signed_info, ns::DSIG, ns::node::CANONICALIZATION_METHOD)?;
    let c14n_uri = c14n_method.attribute(ns::attr::ALGORITHM).unwrap_or("");
    let c14n_mode = C14nMode::from_uri(c14n_uri)
        .ok_or_else(|| Error::UnsupportedAlgorithm(format!("C14N: {c14n_uri}")))?;

    let method_uri = require_child(signed_info, ns::DSIG, ns::node::SIGNATURE_METHOD)?
        .attribute(ns::attr::ALGORITHM)
        .unwrap_or("");
    if method_uri != ctx.signature_algorithm.uri() {
        return Err(Error::UnsupportedAlgorithm(format!(
            "signature method: {method_uri}"
        )));
    }

    let references = find_child_elements(signed_info, ns::DSIG, ns::node::REFERENCE);
    let [reference] = references.as_slice() else {
        return Err(Error::MalformedDocument(format!(
            "expected one Reference, found {}",
            references.len()
        )));
    };
    check_reference_target(*reference, doc.root_element())?;
    let (digest_mode, digest_prefixes) = read_transforms(*reference)?;

    let digest_uri = require_child(*reference, ns::DSIG, ns::node::DIGEST_METHOD)?
        .attribute(ns::attr::ALGORITHM)
        .unwrap_or("");
    let hash = HashAlgorithm::from_uri(digest_uri)?;
    if hash != ctx.signature_algorithm.hash() {
        return Err(Error::UnsupportedDigest(digest_uri.to_owned()));
    }
    let expected = response
        .digest_value
        .as_deref()
        .ok_or_else(|| Error::MissingElement("Reference/DigestValue".into()))?;

    let signed_bytes =
        ravelin_c14n::canonicalize_doc(&doc, digest_mode, Some(signature.id()), &digest_prefixes)?;
    let actual = hash.digest(&signed_bytes);
    if !bool::from(actual.as_slice().ct_eq(expected)) {
        return Err(Error::DigestMismatch);
    }

    let canonical_signed_info = ravelin_c14n::canonicalize_subtree(
        signed_info,
        c14n_mode,
        &inclusive_prefixes(c14n_method),
    )?;
    verify_canonical(
        &canonical_signed_info,
        &response.signature_value,
        ctx.signature_algorithm,
        &ctx.trusted,
    )
}

/// The reference must cover the whole document: `URI=""` or the document
/// element's own `ID`.
fn check_reference_target(reference: Node<'_, '_>, root: Node<'_, '_>) -> Result<()> {
    let uri = reference.attribute(ns::attr::URI).unwrap_or("");
    if uri.is_empty() {
        return Ok(());
    }
    match (uri.strip_prefix('#'), root.attribute(ns::attr::ID)) {
        (Some(target), Some(id)) if target == id => Ok(()),
        _ => Err(Error::MalformedDocument(format!(
            "Reference {uri} does not point at the document element"
        ))),
    }
}

/// Accept only the enveloped-signature and exclusive C14N transforms.
///
/// A reference with no C14N transform would be digested with inclusive
/// C14N 1.0, which is not supported, so the exclusive transform is
/// required.
fn read_transforms(reference: Node<'_, '_>) -> Result<(C14nMode, Vec<String>)> {
    let mut c14n = None;
    if let Some(transforms) = find_child_element(reference, ns::DSIG, ns::node::TRANSFORMS) {
        for transform in find_child_elements(transforms, ns::DSIG, ns::node::TRANSFORM) {
            let uri = transform.attribute(ns::attr::ALGORITHM).unwrap_or("");
            if uri == algorithm::ENVELOPED_SIGNATURE {
                continue;
            }
            let mode = C14nMode::from_uri(uri)
                .ok_or_else(|| Error::UnsupportedAlgorithm(format!("transform: {uri}")))?;
            c14n = Some((mode, inclusive_prefixes(transform)));
        }
    }
    c14n.ok_or_else(|| {
        Error::UnsupportedAlgorithm("reference has no exclusive C14N transform".into())
    })
}

/// `InclusiveNamespaces/@PrefixList` under a C14N method or transform.
fn inclusive_prefixes(node: Node<'_, '_>) -> Vec<String> {
    find_child_element(node, ns::EXC_C14N, ns::node::INCLUSIVE_NAMESPACES)
        .and_then(|n| n.attribute(ns::attr::PREFIX_LIST))
        .map(|list| list.split_whitespace().map(str::to_owned).collect())
        .unwrap_or_default()
}
