#![forbid(unsafe_code)]

//! AES-CBC content encryption with an IV-prefixed ciphertext layout.

use ravelin_core::{algorithm, Error};
use subtle::{ConstantTimeEq, ConstantTimeGreater};

const BLOCK_SIZE: usize = 16;

/// How the final plaintext block is unpadded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaddingMode {
    /// Strip trailing zero bytes, then drop as many bytes as the last
    /// remaining byte says. Accepts output from encoders that zero-fill
    /// after the padding byte. The pad bytes themselves are not checked.
    #[default]
    Compatible,
    /// XML Encryption padding: the final byte is a length in `1..=16`.
    /// The length check does not branch on the pad value.
    Strict,
}

/// AES in CBC mode, keyed by size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AesCbc {
    key_size: usize,
    uri: &'static str,
}

impl AesCbc {
    /// Select the AES variant matching a key's length.
    pub fn for_key(key: &[u8]) -> Result<Self, Error> {
        match key.len() {
            16 => Ok(Self { key_size: 16, uri: algorithm::AES128_CBC }),
            24 => Ok(Self { key_size: 24, uri: algorithm::AES192_CBC }),
            32 => Ok(Self { key_size: 32, uri: algorithm::AES256_CBC }),
            n => Err(Error::InvalidKeyLength(n)),
        }
    }

    /// Create the cipher named by an `EncryptionMethod` URI.
    pub fn from_uri(uri: &str) -> Result<Self, Error> {
        match uri {
            algorithm::AES128_CBC => Ok(Self { key_size: 16, uri: algorithm::AES128_CBC }),
            algorithm::AES192_CBC => Ok(Self { key_size: 24, uri: algorithm::AES192_CBC }),
            algorithm::AES256_CBC => Ok(Self { key_size: 32, uri: algorithm::AES256_CBC }),
            _ => Err(Error::UnsupportedAlgorithm(format!("cipher: {uri}"))),
        }
    }

    pub fn uri(&self) -> &'static str {
        self.uri
    }

    pub fn key_size(&self) -> usize {
        self.key_size
    }

    fn check_key(&self, key: &[u8]) -> Result<(), Error> {
        if key.len() != self.key_size {
            return Err(Error::InvalidKeyLength(key.len()));
        }
        Ok(())
    }

    /// Encrypt with a random IV and PKCS#7 padding; returns `IV || ciphertext`.
    pub fn encrypt(&self, key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, Error> {
        use cbc::cipher::{BlockEncryptMut, KeyIvInit};
        use rand::RngCore;

        self.check_key(key)?;

        let mut iv = [0u8; BLOCK_SIZE];
        rand::thread_rng().fill_bytes(&mut iv);

        let mut buf = pkcs7_pad(plaintext);
        let buf_len = buf.len();

        macro_rules! do_encrypt {
            ($aes:ty) => {{
                let enc = cbc::Encryptor::<$aes>::new_from_slices(key, &iv)
                    .map_err(|e| Error::Crypto(format!("AES-CBC init: {e}")))?;
                enc.encrypt_padded_mut::<cbc::cipher::block_padding::NoPadding>(&mut buf, buf_len)
                    .map_err(|e| Error::Crypto(format!("AES-CBC encrypt: {e}")))?;
            }};
        }

        match self.key_size {
            16 => do_encrypt!(aes::Aes128),
            24 => do_encrypt!(aes::Aes192),
            _ => do_encrypt!(aes::Aes256),
        }

        let mut result = Vec::with_capacity(BLOCK_SIZE + buf.len());
        result.extend_from_slice(&iv);
        result.extend_from_slice(&buf);
        Ok(result)
    }

    /// Decrypt `IV || ciphertext` and remove the padding.
    pub fn decrypt(&self, key: &[u8], data: &[u8], padding: PaddingMode) -> Result<Vec<u8>, Error> {
        use cbc::cipher::{BlockDecryptMut, KeyIvInit};

        self.check_key(key)?;
        if data.len() < BLOCK_SIZE || data.len() % BLOCK_SIZE != 0 {
            return Err(Error::TruncatedCiphertext);
        }

        let (iv, ciphertext) = data.split_at(BLOCK_SIZE);
        let mut buf = ciphertext.to_vec();

        macro_rules! do_decrypt {
            ($aes:ty) => {{
                let dec = cbc::Decryptor::<$aes>::new_from_slices(key, iv)
                    .map_err(|e| Error::Crypto(format!("AES-CBC init: {e}")))?;
                dec.decrypt_padded_mut::<cbc::cipher::block_padding::NoPadding>(&mut buf)
                    .map_err(|_| Error::TruncatedCiphertext)?;
            }};
        }

        match self.key_size {
            16 => do_decrypt!(aes::Aes128),
            24 => do_decrypt!(aes::Aes192),
            _ => do_decrypt!(aes::Aes256),
        }

        match padding {
            PaddingMode::Compatible => unpad_compatible(buf),
            PaddingMode::Strict => unpad_strict(buf),
        }
    }
}

fn pkcs7_pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - (data.len() % BLOCK_SIZE);
    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    padded.extend(std::iter::repeat(pad_len as u8).take(pad_len));
    padded
}

fn unpad_compatible(mut data: Vec<u8>) -> Result<Vec<u8>, Error> {
    while data.last() == Some(&0) {
        data.pop();
    }
    let Some(&pad) = data.last() else {
        return Err(Error::InvalidPadding);
    };
    let pad = usize::from(pad);
    if pad >= data.len() {
        return Err(Error::InvalidPadding);
    }
    data.truncate(data.len() - pad);
    Ok(data)
}

fn unpad_strict(mut data: Vec<u8>) -> Result<Vec<u8>, Error> {
    let Some(&pad) = data.last() else {
        return Err(Error::InvalidPadding);
    };
    let valid = !pad.ct_eq(&0)
        & !pad.ct_gt(&(BLOCK_SIZE as u8))
        & (data.len() as u64).ct_gt(&u64::from(pad));
    if !bool::from(valid) {
        return Err(Error::InvalidPadding);
    }
    data.truncate(data.len() - usize::from(pad));
    Ok(data)
}
