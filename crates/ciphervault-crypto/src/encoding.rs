//! Standard (padded) base64 used for keys and ciphertexts at the boundary.

use base64ct::{Base64, Encoding};

use crate::error::CryptoError;

/// Base64 encode bytes with padding.
pub fn base64_encode(data: &[u8]) -> String {
    Base64::encode_string(data)
}

/// Base64 decode a named boundary field.
pub fn base64_decode(field: &'static str, s: &str) -> Result<Vec<u8>, CryptoError> {
    Base64::decode_vec(s).map_err(|e| CryptoError::InvalidEncoding {
        field,
        reason: e.to_string(),
    })
}

/// Decode the known key part of a brute-force request.
pub fn decode_key_prefix(s: &str) -> Result<Vec<u8>, CryptoError> {
    Base64::decode_vec(s).map_err(|e| CryptoError::InvalidKeyPrefixEncoding(e.to_string()))
}
