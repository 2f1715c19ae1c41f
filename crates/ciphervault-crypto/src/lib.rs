//! Ciphervault core: AES-256-GCM and AES-256-ECB engines, PKCS7-style
//! padding, a plaintext heuristic, and bounded known-prefix key recovery.

pub mod aes_ecb;
pub mod aes_gcm;
pub mod brute_force;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod heuristic;
pub mod padding;
pub mod types;

pub use aes_ecb::{ecb_decrypt, ecb_encrypt, ecb_encrypt_with_key};
pub use aes_gcm::{gcm_decrypt, gcm_encrypt, generate_nonce};
pub use brute_force::{
    brute_force, search, CancelToken, SearchOptions, SearchWindow, DEFAULT_SEARCH_DEADLINE,
    MAX_MISSING_BYTES,
};
pub use encoding::{base64_decode, base64_encode, decode_key_prefix};
pub use engine::{decrypt, decrypt_file, decrypt_text, encrypt, encrypt_file, encrypt_text};
pub use error::CryptoError;
pub use heuristic::{is_meaningful_text, looks_like_text};
pub use padding::{pad, unpad};
pub use types::{
    CipherMode, Recovered, Sealed, SymmetricKey, AES_BLOCK_SIZE, AES_GCM_NONCE_LENGTH,
    AES_GCM_TAG_LENGTH, AES_KEY_LENGTH,
};
