use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Key generation failed: {0}")]
    KeyGen(String),

    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    CipherInit { expected: usize, got: usize },

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Ciphertext too short: need at least {min} bytes, got {got}")]
    InvalidCiphertext { min: usize, got: usize },

    #[error("Authentication failed: wrong key or corrupted ciphertext")]
    AuthenticationFailed,

    #[error("Ciphertext is not a multiple of block size: {len} bytes")]
    InvalidLength { len: usize },

    #[error("Invalid padding: {0}")]
    InvalidPadding(String),

    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    #[error("Invalid known key part encoding: {0}")]
    InvalidKeyPrefixEncoding(String),

    #[error("Invalid {field} encoding: {reason}")]
    InvalidEncoding { field: &'static str, reason: String },

    #[error("Brute force failed: no candidate key produced readable text")]
    SearchNotFound,
}
