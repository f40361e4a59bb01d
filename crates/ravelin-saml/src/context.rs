#![forbid(unsafe_code)]

//! Verification context: expected audience, trusted identity providers and
//! the algorithm choices fixed at deployment time.

use crate::verify::SignatureProfile;
use ravelin_crypto::{PaddingMode, SignatureAlgorithm};
use ravelin_keys::Credential;

/// Caller-supplied verification parameters.
///
/// A context is never mutated by verification and can be shared between
/// threads running independent verifications.
#[derive(Debug, Clone)]
pub struct Context {
    /// The audience this relying party answers to.
    pub audience: String,
    /// Identity provider certificates whose signatures are accepted, tried
    /// in order.
    pub trusted: Vec<Credential>,
    /// Signature algorithm expected from every identity provider.
    pub signature_algorithm: SignatureAlgorithm,
    /// What the signature value is computed over.
    pub profile: SignatureProfile,
    /// How decrypted assertions are unpadded.
    pub padding: PaddingMode,
    /// Tolerance applied to both ends of the validity window.
    pub clock_skew: chrono::Duration,
}

impl Context {
    /// Create a context with default algorithm choices and no clock skew.
    pub fn new(audience: impl Into<String>, trusted: Vec<Credential>) -> Self {
        Self {
            audience: audience.into(),
            trusted,
            signature_algorithm: SignatureAlgorithm::default(),
            profile: SignatureProfile::default(),
            padding: PaddingMode::default(),
            clock_skew: chrono::Duration::zero(),
        }
    }

    /// Add a trusted identity provider certificate.
    pub fn with_trusted(mut self, credential: Credential) -> Self {
        self.trusted.push(credential);
        self
    }

    pub fn with_signature_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.signature_algorithm = algorithm;
        self
    }

    pub fn with_profile(mut self, profile: SignatureProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_padding(mut self, padding: PaddingMode) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_clock_skew(mut self, skew: chrono::Duration) -> Self {
        self.clock_skew = skew;
        self
    }
}
