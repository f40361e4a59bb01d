#![forbid(unsafe_code)]

//! Algorithm URI constants accepted in SAML responses.
//!
//! Each constant is the exact string that appears in an `Algorithm`
//! attribute. Anything not listed here is rejected.

// ── Canonicalization ─────────────────────────────────────────────────

pub const EXC_C14N: &str = "http://www.w3.org/2001/10/xml-exc-c14n#";
pub const EXC_C14N_WITH_COMMENTS: &str = "http://www.w3.org/2001/10/xml-exc-c14n#WithComments";

// ── Digest algorithms ────────────────────────────────────────────────

pub const SHA1: &str = "http://www.w3.org/2000/09/xmldsig#sha1";
pub const SHA256: &str = "http://www.w3.org/2001/04/xmlenc#sha256";
/// Non-standard SHA-256 identifier emitted by some identity providers.
pub const SHA256_DSIG: &str = "http://www.w3.org/2000/09/xmldsig#sha256";
pub const SHA384: &str = "http://www.w3.org/2001/04/xmldsig-more#sha384";

// ── RSA signature algorithms ─────────────────────────────────────────

pub const RSA_SHA256: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256";
pub const RSA_SHA384: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha384";

// ── Block cipher algorithms ──────────────────────────────────────────

pub const AES128_CBC: &str = "http://www.w3.org/2001/04/xmlenc#aes128-cbc";
pub const AES192_CBC: &str = "http://www.w3.org/2001/04/xmlenc#aes192-cbc";
pub const AES256_CBC: &str = "http://www.w3.org/2001/04/xmlenc#aes256-cbc";

// ── Key transport algorithms ─────────────────────────────────────────

pub const RSA_OAEP: &str = "http://www.w3.org/2001/04/xmlenc#rsa-oaep-mgf1p";
pub const RSA_OAEP_ENC11: &str = "http://www.w3.org/2009/xmlenc11#rsa-oaep";

// ── MGF algorithms ───────────────────────────────────────────────────

pub const MGF1_SHA1: &str = "http://www.w3.org/2009/xmlenc11#mgf1sha1";
pub const MGF1_SHA256: &str = "http://www.w3.org/2009/xmlenc11#mgf1sha256";

// ── Transform algorithms ─────────────────────────────────────────────

pub const ENVELOPED_SIGNATURE: &str = "http://www.w3.org/2000/09/xmldsig#enveloped-signature";
