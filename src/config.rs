//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use std::env;
use std::str::FromStr;

/// Port the API listens on and advertises in the API root.
pub const DEFAULT_PORT: u16 = 8000;

/// Base URL reported by the API root outside a Codespace.
pub const LOCAL_BASE_URL: &str = "http://localhost:8000";

/// Which resource store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Firestore,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StorageBackend::Firestore),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::Invalid {
                name: "STORAGE_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// GitHub Codespace name, used to build the public base URL
    pub codespace_name: Option<String>,
    /// Resource store backend
    pub storage: StorageBackend,
    /// GCP project ID (Firestore backend only)
    pub gcp_project_id: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            codespace_name: None,
            storage: StorageBackend::Memory,
            gcp_project_id: "test-project".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let gcp_project_id = env::var("GCP_PROJECT_ID").ok();
        let storage = match env::var("STORAGE_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) if gcp_project_id.is_some() || env::var("FIRESTORE_EMULATOR_HOST").is_ok() => {
                StorageBackend::Firestore
            }
            Err(_) => StorageBackend::Memory,
        };

        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            codespace_name: env::var("CODESPACE_NAME")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            storage,
            gcp_project_id: gcp_project_id.unwrap_or_else(|| "local-dev".to_string()),
        })
    }

    /// Externally reachable base URL, without a trailing slash.
    pub fn public_base_url(&self) -> String {
        match &self.codespace_name {
            Some(name) => format!("https://{}-8000.app.github.dev", name),
            None => LOCAL_BASE_URL.to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
