use std::fmt;
use std::str::FromStr;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// AES key length in bytes (256 bits).
pub const AES_KEY_LENGTH: usize = 32;

/// AES block size in bytes.
pub const AES_BLOCK_SIZE: usize = 16;

/// AES-GCM nonce length in bytes (96 bits per NIST recommendation).
pub const AES_GCM_NONCE_LENGTH: usize = 12;

/// AES-GCM tag length in bytes (128 bits).
pub const AES_GCM_TAG_LENGTH: usize = 16;

/// Cipher mode selected by the caller.
///
/// Parsed from the exact wire strings `"gcm"` and `"ecb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherMode {
    /// AES-256-GCM: random nonce, authenticated.
    Gcm,
    /// AES-256-ECB with PKCS7-style padding: no chaining, no integrity.
    Ecb,
}

impl CipherMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherMode::Gcm => "gcm",
            CipherMode::Ecb => "ecb",
        }
    }
}

impl FromStr for CipherMode {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gcm" => Ok(CipherMode::Gcm),
            "ecb" => Ok(CipherMode::Ecb),
            other => Err(CryptoError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 256-bit symmetric key. Zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; AES_KEY_LENGTH]);

impl SymmetricKey {
    /// Generate a fresh key from the OS RNG.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut key = [0u8; AES_KEY_LENGTH];
        getrandom::getrandom(&mut key).map_err(|e| CryptoError::KeyGen(e.to_string()))?;
        Ok(Self(key))
    }

    pub fn from_bytes(bytes: [u8; AES_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Copy key material out of a slice, rejecting anything but 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let key: [u8; AES_KEY_LENGTH] =
            bytes.try_into().map_err(|_| CryptoError::CipherInit {
                expected: AES_KEY_LENGTH,
                got: bytes.len(),
            })?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; AES_KEY_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}

/// Output of an encrypt operation: the ciphertext and the key it was sealed under.
///
/// The key is never persisted here; the caller decides whether to hand it
/// back to a client or drop it.
#[derive(Debug, Clone)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub key: SymmetricKey,
}

/// A successful key recovery.
#[derive(Debug, Clone)]
pub struct Recovered {
    pub plaintext: String,
    pub key: SymmetricKey,
}
