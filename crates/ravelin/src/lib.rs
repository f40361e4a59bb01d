#![forbid(unsafe_code)]

pub use ravelin_core as core;
pub use ravelin_xml as xml;
pub use ravelin_c14n as c14n;
pub use ravelin_crypto as crypto;
pub use ravelin_keys as keys;
pub use ravelin_saml as saml;
