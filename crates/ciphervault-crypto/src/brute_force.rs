//! Known-prefix key recovery for AES-256-ECB ciphertexts.
//!
//! Given the leading bytes of a 32-byte key, enumerate the missing trailing
//! bytes, decrypt under each candidate and accept the first plaintext that
//! passes [`looks_like_text`].
//!
//! The window is deliberately bounded for latency:
//!
//! | missing bytes | values per byte | candidates |
//! |---------------|-----------------|------------|
//! | 1             | 0..=255         | 256        |
//! | 2             | 0..=255         | 65,536     |
//! | 3             | 0..=31          | 32,768     |
//! | 4             | 0..=15          | 65,536     |
//!
//! For 3 and 4 missing bytes this is not exhaustive: a key whose missing bytes
//! fall outside the window is reported as not found.
//!
//! One blocking worker runs the enumeration. The caller races its single-slot
//! result channel against a deadline; the loser is abandoned and the worker
//! stops at its next per-candidate cancellation check.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;
use zeroize::Zeroizing;

use crate::aes_ecb::ecb_decrypt;
use crate::error::CryptoError;
use crate::heuristic::looks_like_text;
use crate::types::{Recovered, SymmetricKey, AES_KEY_LENGTH};

/// Wall-clock budget for one search.
pub const DEFAULT_SEARCH_DEADLINE: Duration = Duration::from_secs(30);

/// Largest number of missing key bytes the search accepts.
pub const MAX_MISSING_BYTES: usize = 4;

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub deadline: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            deadline: DEFAULT_SEARCH_DEADLINE,
        }
    }
}

/// The candidate space for a given number of missing key bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    missing: usize,
    values_per_byte: u16,
}

impl SearchWindow {
    /// Window for a known prefix of `prefix_len` bytes, or `None` if the
    /// number of missing bytes is outside `1..=4`.
    pub fn for_prefix_len(prefix_len: usize) -> Option<Self> {
        let missing = AES_KEY_LENGTH.checked_sub(prefix_len)?;
        let values_per_byte = match missing {
            1 | 2 => 256,
            3 => 32,
            4 => 16,
            _ => return None,
        };
        Some(Self {
            missing,
            values_per_byte,
        })
    }

    pub fn missing(&self) -> usize {
        self.missing
    }

    pub fn values_per_byte(&self) -> u16 {
        self.values_per_byte
    }

    pub fn candidate_count(&self) -> u64 {
        u64::from(self.values_per_byte).pow(self.missing as u32)
    }

    /// Write the `index`-th candidate into `suffix`, most significant byte first.
    fn fill_suffix(&self, index: u64, suffix: &mut [u8]) {
        let base = u64::from(self.values_per_byte);
        let mut rest = index;
        for slot in suffix.iter_mut().rev() {
            *slot = (rest % base) as u8;
            rest /= base;
        }
    }
}

/// Cooperative cancellation flag shared between a search and its caller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Cancels the worker once the awaiting side is done, whichever way it ended.
struct CancelOnDrop(CancelToken);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

/// Run the enumeration on the current thread.
///
/// Returns `None` when the window is exhausted, the prefix length is
/// unsupported, or `cancel` fires. Cancellation is checked before every
/// candidate.
pub fn search(ciphertext: &[u8], prefix: &[u8], cancel: &CancelToken) -> Option<Recovered> {
    let window = SearchWindow::for_prefix_len(prefix.len())?;

    let mut key = Zeroizing::new([0u8; AES_KEY_LENGTH]);
    key[..prefix.len()].copy_from_slice(prefix);

    for index in 0..window.candidate_count() {
        if cancel.is_cancelled() {
            return None;
        }

        window.fill_suffix(index, &mut key[prefix.len()..]);
        let Ok(plaintext) = ecb_decrypt(ciphertext, key.as_slice()) else {
            continue;
        };
        if !looks_like_text(&plaintext) {
            continue;
        }
        if let Ok(plaintext) = String::from_utf8(plaintext) {
            return Some(Recovered {
                plaintext,
                key: SymmetricKey::from_bytes(*key),
            });
        }
    }

    None
}

/// Recover the missing tail of an AES-256-ECB key.
///
/// Fails with `SearchNotFound` when the prefix leaves an unsupported number of
/// missing bytes, the window is exhausted, or `options.deadline` elapses.
pub async fn brute_force(
    ciphertext: Vec<u8>,
    known_prefix: Vec<u8>,
    options: &SearchOptions,
) -> Result<Recovered, CryptoError> {
    search_until(ciphertext, known_prefix, options.deadline, CancelToken::new()).await
}

/// Run the search on the blocking pool until it resolves or `deadline`
/// elapses. `cancel` is fired when this future completes or is dropped.
async fn search_until(
    ciphertext: Vec<u8>,
    known_prefix: Vec<u8>,
    deadline: Duration,
    cancel: CancelToken,
) -> Result<Recovered, CryptoError> {
    let Some(window) = SearchWindow::for_prefix_len(known_prefix.len()) else {
        tracing::debug!(
            prefix_len = known_prefix.len(),
            "known key part leaves an unsupported number of missing bytes"
        );
        return Err(CryptoError::SearchNotFound);
    };

    tracing::debug!(
        missing = window.missing(),
        candidates = window.candidate_count(),
        deadline = ?deadline,
        "starting key search"
    );
    let started = Instant::now();

    let _guard = CancelOnDrop(cancel.clone());
    let (tx, rx) = oneshot::channel();

    let worker_cancel = cancel.clone();
    tokio::task::spawn_blocking(move || {
        if let Some(found) = search(&ciphertext, &known_prefix, &worker_cancel) {
            // Receiver may already be gone after a timeout.
            let _ = tx.send(found);
        }
    });

    match tokio::time::timeout(deadline, rx).await {
        Ok(Ok(found)) => {
            tracing::info!(elapsed = ?started.elapsed(), "key recovered");
            Ok(found)
        }
        Ok(Err(_)) => {
            tracing::info!(elapsed = ?started.elapsed(), "search window exhausted");
            Err(CryptoError::SearchNotFound)
        }
        Err(_) => {
            tracing::warn!(deadline = ?deadline, "key search deadline elapsed");
            Err(CryptoError::SearchNotFound)
        }
    }
}
