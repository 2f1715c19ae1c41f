//! Store trait and file naming.

use async_trait::async_trait;

use crate::error::{StorageError, StorageResult};

/// Number of leading ciphertext bytes used to name a stored file.
pub const NAME_PREFIX_BYTES: usize = 8;

/// Extension appended to every stored file name.
pub const STORED_FILE_EXTENSION: &str = ".enc";

/// Name under which an encrypted file is stored: the first 8 ciphertext
/// bytes, lower-case hex, plus `.enc`.
///
/// For AES-GCM blobs these bytes are the start of the random nonce, so
/// collisions are unlikely but not ruled out. This is not a content hash:
/// two uploads can map to the same name and the later one wins.
///
/// Callers pass a full ciphertext, which is always longer than
/// [`NAME_PREFIX_BYTES`]. An empty input yields the bare `.enc`, which
/// [`validate_name`] refuses, so it can never be stored.
pub fn stored_file_name(ciphertext: &[u8]) -> String {
    let head = &ciphertext[..ciphertext.len().min(NAME_PREFIX_BYTES)];
    format!("{}{}", hex::encode(head), STORED_FILE_EXTENSION)
}

/// Reject names that could escape the store or hide in it: empty, starting
/// with `.` (this covers `.`, `..` and a bare `.enc`), or containing a path
/// separator or NUL.
pub fn validate_name(name: &str) -> StorageResult<()> {
    let bad = name.is_empty() || name.starts_with('.') || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Flat, name-keyed store for encrypted files.
///
/// Created once at startup and shared by all requests.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store `data` under `name`, replacing any existing file.
    async fn put(&self, name: &str, data: &[u8]) -> StorageResult<()>;

    /// Returns `StorageError::NotFound` if nothing is stored under `name`.
    async fn get(&self, name: &str) -> StorageResult<Vec<u8>>;

    /// Names of all stored files, sorted.
    async fn list(&self) -> StorageResult<Vec<String>>;
}
