use std::sync::Arc;

use ciphervault_crypto::SearchOptions;
use ciphervault_storage::{FileStore, InMemoryFileStore, LocalFileStore};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FileStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store: Arc<dyn FileStore> = match config.storage.backend.as_str() {
            "local" => {
                let store = LocalFileStore::new(&config.storage.local_path).await?;
                tracing::info!("Storing encrypted files in {}", store.root().display());
                Arc::new(store)
            }
            "memory" => {
                tracing::warn!("Using in-memory file store - uploads are lost on restart");
                Arc::new(InMemoryFileStore::new())
            }
            other => {
                anyhow::bail!(
                    "Unknown storage backend '{}'. Valid options: 'local', 'memory'",
                    other
                );
            }
        };

        Ok(Self {
            store,
            config: Arc::new(config.clone()),
        })
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            deadline: self.config.search_timeout(),
        }
    }
}
