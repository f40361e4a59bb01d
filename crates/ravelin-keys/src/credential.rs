#![forbid(unsafe_code)]

//! Certificate and key material for one party.

/// An X.509 certificate with its RSA public key and, for the relying
/// party, the matching private key.
///
/// The certificate is kept as the exact DER bytes it was loaded from so
/// that it can be compared byte for byte against certificates embedded
/// in a message.
#[derive(Clone, Default)]
pub struct Credential {
    name: Option<String>,
    certificate: Option<Vec<u8>>,
    public: Option<rsa::RsaPublicKey>,
    private: Option<rsa::RsaPrivateKey>,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("name", &self.name)
            .field("certificate_len", &self.certificate.as_ref().map(Vec::len))
            .field("has_public_key", &self.public.is_some())
            .field("has_private_key", &self.private.is_some())
            .finish()
    }
}

impl Credential {
    /// Create a credential from a certificate's DER bytes and its public key.
    pub fn new(certificate_der: Vec<u8>, public: rsa::RsaPublicKey) -> Self {
        Self {
            name: None,
            certificate: Some(certificate_der),
            public: Some(public),
            private: None,
        }
    }

    /// Set the credential name used in diagnostics.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach the private key for this certificate.
    ///
    /// Fails if the key does not belong to the certificate's public key.
    pub fn with_private_key(
        mut self,
        private: rsa::RsaPrivateKey,
    ) -> Result<Self, ravelin_core::Error> {
        if let Some(public) = &self.public {
            if &private.to_public_key() != public {
                return Err(ravelin_core::Error::Key(
                    "private key does not match certificate".into(),
                ));
            }
        } else {
            self.public = Some(private.to_public_key());
        }
        self.private = Some(private);
        Ok(self)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The certificate as DER bytes.
    pub fn certificate_der(&self) -> Option<&[u8]> {
        self.certificate.as_deref()
    }

    pub fn public_key(&self) -> Option<&rsa::RsaPublicKey> {
        self.public.as_ref()
    }

    pub fn private_key(&self) -> Option<&rsa::RsaPrivateKey> {
        self.private.as_ref()
    }
}
