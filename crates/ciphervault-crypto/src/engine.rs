//! Mode dispatch and the file/text operations exposed to the transport layer.
//!
//! Files always use the authenticated mode. Text uses whichever mode the
//! caller selects.

use crate::aes_ecb::{ecb_decrypt, ecb_encrypt};
use crate::aes_gcm::{gcm_decrypt, gcm_encrypt};
use crate::error::CryptoError;
use crate::types::{CipherMode, Sealed};

/// Encrypt under a fresh key in the given mode.
pub fn encrypt(mode: CipherMode, plaintext: &[u8]) -> Result<Sealed, CryptoError> {
    match mode {
        CipherMode::Gcm => gcm_encrypt(plaintext),
        CipherMode::Ecb => ecb_encrypt(plaintext),
    }
}

pub fn decrypt(mode: CipherMode, ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    match mode {
        CipherMode::Gcm => gcm_decrypt(ciphertext, key),
        CipherMode::Ecb => ecb_decrypt(ciphertext, key),
    }
}

pub fn encrypt_file(contents: &[u8]) -> Result<Sealed, CryptoError> {
    gcm_encrypt(contents)
}

pub fn decrypt_file(stored: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    gcm_decrypt(stored, key)
}

pub fn encrypt_text(text: &str, mode: CipherMode) -> Result<Sealed, CryptoError> {
    encrypt(mode, text.as_bytes())
}

/// Decrypt to text. Invalid UTF-8 is replaced, not rejected.
pub fn decrypt_text(
    ciphertext: &[u8],
    key: &[u8],
    mode: CipherMode,
) -> Result<String, CryptoError> {
    let plaintext = decrypt(mode, ciphertext, key)?;
    Ok(String::from_utf8_lossy(&plaintext).into_owned())
}
