#![forbid(unsafe_code)]

//! Digest (hash) algorithm implementations.

use digest::Digest;
use ravelin_core::{algorithm, Error};

/// Trait for streaming digest computation.
pub trait DigestAlgorithm: Send {
    /// Feed data into the hash.
    fn update(&mut self, data: &[u8]);
    /// Finalize and return the hash value.
    fn finalize(self: Box<Self>) -> Vec<u8>;
}

/// Hash functions accepted anywhere in a SAML response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha384,
}

impl HashAlgorithm {
    /// Look up a hash by its `DigestMethod` URI.
    pub fn from_uri(uri: &str) -> Result<Self, Error> {
        match uri {
            algorithm::SHA1 => Ok(Self::Sha1),
            algorithm::SHA256 | algorithm::SHA256_DSIG => Ok(Self::Sha256),
            algorithm::SHA384 => Ok(Self::Sha384),
            _ => Err(Error::UnsupportedDigest(uri.to_owned())),
        }
    }

    /// The canonical `DigestMethod` URI.
    pub fn uri(&self) -> &'static str {
        match self {
            Self::Sha1 => algorithm::SHA1,
            Self::Sha256 => algorithm::SHA256,
            Self::Sha384 => algorithm::SHA384,
        }
    }

    /// A fresh streaming hasher.
    pub fn hasher(&self) -> Box<dyn DigestAlgorithm> {
        match self {
            Self::Sha1 => Box::new(Sha1Digest::new()),
            Self::Sha256 => Box::new(Sha256Digest::new()),
            Self::Sha384 => Box::new(Sha384Digest::new()),
        }
    }

    /// Compute a digest in one shot.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        let mut hasher = self.hasher();
        hasher.update(data);
        hasher.finalize()
    }
}

// ── Concrete implementations ─────────────────────────────────────────

macro_rules! impl_digest {
    ($name:ident, $hasher:ty) => {
        struct $name {
            inner: $hasher,
        }

        impl $name {
            fn new() -> Self {
                Self {
                    inner: <$hasher>::new(),
                }
            }
        }

        impl DigestAlgorithm for $name {
            fn update(&mut self, data: &[u8]) {
                Digest::update(&mut self.inner, data);
            }

            fn finalize(self: Box<Self>) -> Vec<u8> {
                Digest::finalize(self.inner).to_vec()
            }
        }
    };
}

impl_digest!(Sha1Digest, sha1::Sha1);
impl_digest!(Sha256Digest, sha2::Sha256);
impl_digest!(Sha384Digest, sha2::Sha384);
