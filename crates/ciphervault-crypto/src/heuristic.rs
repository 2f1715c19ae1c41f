//! "Looks like text" scoring for candidate plaintexts.
//!
//! A cheap filter, not a language model: short or punctuation-heavy text is
//! rejected even when it is the real plaintext.

/// Minimum length a candidate must have to be considered text.
pub const MIN_TEXT_LENGTH: usize = 5;

/// True if `text` is printable ASCII, more than half letters, and contains a space.
pub fn is_meaningful_text(text: &str) -> bool {
    if text.len() < MIN_TEXT_LENGTH {
        return false;
    }

    let mut letters = 0usize;
    let mut spaces = 0usize;
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            letters += 1;
        } else if c == ' ' {
            spaces += 1;
        } else if !(' '..='~').contains(&c) {
            return false;
        }
    }

    letters > text.len() / 2 && spaces >= 1
}

/// Byte-level entry point. Invalid UTF-8 can never be printable ASCII.
pub fn looks_like_text(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_ok_and(is_meaningful_text)
}
