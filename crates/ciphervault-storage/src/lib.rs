//! ciphervault-storage: where encrypted uploads live between requests.
//!
//! Files are stored flat, keyed by a name derived from the ciphertext (see
//! [`stored_file_name`]). No authorization or key handling happens here.
//!
//! ## Backends
//!
//! | Backend             | Use Case                    |
//! |---------------------|-----------------------------|
//! | `InMemoryFileStore` | Unit and HTTP tests         |
//! | `LocalFileStore`    | Production (`./encrypted`)  |

mod error;
mod local;
mod memory;
mod traits;

pub use error::{StorageError, StorageResult};
pub use local::LocalFileStore;
pub use memory::InMemoryFileStore;
pub use traits::{
    stored_file_name, validate_name, FileStore, NAME_PREFIX_BYTES, STORED_FILE_EXTENSION,
};
