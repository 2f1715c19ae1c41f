use std::time::Duration;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub storage: StorageConfig,

    /// Largest accepted upload body, in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,

    /// Wall-clock budget for one brute-force search.
    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: String, // "local", "memory"
    #[serde(default = "default_local_path")]
    pub local_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            local_path: default_local_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            storage: StorageConfig::default(),
            max_file_size: default_max_file_size(),
            search_timeout_secs: default_search_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}
fn default_backend() -> String {
    "local".into()
}
fn default_local_path() -> String {
    "./encrypted".into()
}
fn default_max_file_size() -> usize {
    10 << 20
} // 10 MiB
fn default_search_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load from `ciphervault.toml`, overridden by `CIPHERVAULT_*` env vars.
    /// Nested keys use a double underscore, e.g. `CIPHERVAULT_STORAGE__BACKEND`.
    pub fn load() -> anyhow::Result<Self> {
        let config: Config = Figment::new()
            .merge(Toml::file("ciphervault.toml"))
            .merge(Env::prefixed("CIPHERVAULT_").split("__"))
            .extract()?;
        Ok(config)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }
}
