//! AES-256-GCM authenticated mode.
//!
//! Wire format: [12 bytes: nonce][N bytes: ciphertext + 16-byte tag]
//! No associated data. Every call generates a fresh key and nonce.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::error::CryptoError;
use crate::types::{Sealed, SymmetricKey, AES_GCM_NONCE_LENGTH, AES_KEY_LENGTH};

/// Generate a random 12-byte nonce for AES-GCM.
pub fn generate_nonce() -> Result<[u8; AES_GCM_NONCE_LENGTH], CryptoError> {
    let mut nonce = [0u8; AES_GCM_NONCE_LENGTH];
    getrandom::getrandom(&mut nonce).map_err(|e| CryptoError::KeyGen(e.to_string()))?;
    Ok(nonce)
}

fn cipher_for(key: &[u8]) -> Result<Aes256Gcm, CryptoError> {
    Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::CipherInit {
        expected: AES_KEY_LENGTH,
        got: key.len(),
    })
}

/// Encrypt under a freshly generated key.
///
/// Returns `nonce || ciphertext || tag` together with the key.
pub fn gcm_encrypt(plaintext: &[u8]) -> Result<Sealed, CryptoError> {
    let key = SymmetricKey::generate()?;
    let cipher = cipher_for(key.as_bytes())?;
    let nonce = generate_nonce()?;

    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut ciphertext = Vec::with_capacity(nonce.len() + sealed.len());
    ciphertext.extend_from_slice(&nonce);
    ciphertext.extend_from_slice(&sealed);
    Ok(Sealed { ciphertext, key })
}

/// Decrypt `nonce || ciphertext || tag`.
///
/// Any tag mismatch (wrong key, bit flip, truncation past the nonce) is
/// reported as `AuthenticationFailed`.
pub fn gcm_decrypt(data: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = cipher_for(key)?;
    if data.len() < AES_GCM_NONCE_LENGTH {
        return Err(CryptoError::InvalidCiphertext {
            min: AES_GCM_NONCE_LENGTH,
            got: data.len(),
        });
    }

    let (nonce, sealed) = data.split_at(AES_GCM_NONCE_LENGTH);
    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| CryptoError::AuthenticationFailed)
}
