//! PKCS7-style block padding.
//!
//! Format: `[data][p bytes, each equal to p]`, `1 <= p <= block_size`.
//! Aligned input gains a full block of padding.
//!
//! `unpad` trusts only the final byte. The other `p - 1` padding bytes are
//! not checked, so malformed padding can decode without error.

use std::num::NonZeroU8;

use crate::error::CryptoError;

/// Pad data to a multiple of `block_size`.
///
/// The pad count is stored in one byte, hence the `NonZeroU8` block size.
pub fn pad(data: &[u8], block_size: NonZeroU8) -> Vec<u8> {
    let block_size = usize::from(block_size.get());
    let padding = block_size - data.len() % block_size;
    let mut padded = Vec::with_capacity(data.len() + padding);
    padded.extend_from_slice(data);
    // padding is in 1..=block_size, so it fits in a byte.
    padded.resize(data.len() + padding, padding as u8);
    padded
}

/// Strip padding, returning the payload slice.
pub fn unpad(data: &[u8]) -> Result<&[u8], CryptoError> {
    let Some(&last) = data.last() else {
        return Err(CryptoError::InvalidPadding("empty input".into()));
    };

    let padding = last as usize;
    if padding > data.len() {
        return Err(CryptoError::InvalidPadding(format!(
            "pad count {} exceeds {} bytes of data",
            padding,
            data.len()
        )));
    }

    Ok(&data[..data.len() - padding])
}
