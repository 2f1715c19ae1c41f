//! AES-256-ECB raw block mode.
//!
//! Each 16-byte block is encrypted independently under the same key, so equal
//! plaintext blocks produce equal ciphertext blocks. There is no integrity
//! check: a flipped bit decrypts to garbage, and only the final padding byte
//! can cause a decrypt error.

use std::num::NonZeroU8;

use aes_gcm::aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes_gcm::aes::{Aes256, Block};

use crate::error::CryptoError;
use crate::padding::{pad, unpad};
use crate::types::{Sealed, SymmetricKey, AES_BLOCK_SIZE, AES_KEY_LENGTH};

const PAD_BLOCK: NonZeroU8 = match NonZeroU8::new(AES_BLOCK_SIZE as u8) {
    Some(size) => size,
    None => panic!("AES block size is zero"),
};

fn cipher_for(key: &[u8]) -> Result<Aes256, CryptoError> {
    Aes256::new_from_slice(key).map_err(|_| CryptoError::CipherInit {
        expected: AES_KEY_LENGTH,
        got: key.len(),
    })
}

/// Encrypt under a freshly generated key.
pub fn ecb_encrypt(plaintext: &[u8]) -> Result<Sealed, CryptoError> {
    let key = SymmetricKey::generate()?;
    let ciphertext = ecb_encrypt_with_key(plaintext, key.as_bytes())?;
    Ok(Sealed { ciphertext, key })
}

/// Pad and encrypt under a caller-supplied key.
pub fn ecb_encrypt_with_key(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = cipher_for(key)?;
    let mut buf = pad(plaintext, PAD_BLOCK);
    for chunk in buf.chunks_exact_mut(AES_BLOCK_SIZE) {
        cipher.encrypt_block(Block::from_mut_slice(chunk));
    }
    Ok(buf)
}

/// Decrypt block by block and strip padding.
pub fn ecb_decrypt(ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = cipher_for(key)?;
    if ciphertext.len() % AES_BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidLength {
            len: ciphertext.len(),
        });
    }

    let mut buf = ciphertext.to_vec();
    for chunk in buf.chunks_exact_mut(AES_BLOCK_SIZE) {
        cipher.decrypt_block(Block::from_mut_slice(chunk));
    }

    let payload_len = unpad(&buf)?.len();
    buf.truncate(payload_len);
    Ok(buf)
}
