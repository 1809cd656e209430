//! Application Factory
//!
//! Builds the AppState for the configured storage backend. The backend is a
//! type parameter of AppState, so the result is an enum with one variant per
//! backend and callers match on it once at startup.

use std::net::SocketAddr;
use std::sync::Arc;
use crate::ai::ScriptGenerator;
use crate::core::app_state::AppState;
use crate::core::config::{Config, StorageType};
use crate::storage::{FilePropertyStore, MemoryPropertyStore};
use crate::types::Result;
use crate::{log_info, log_warn};

/// Enum to hold different AppState configurations
pub enum ConfiguredAppState {
    /// Configuration using the in-memory backend
    Memory {
        /// The application state with the in-memory store
        app_state: Arc<AppState<MemoryPropertyStore>>,
    },
    /// Configuration using the file backend
    File {
        /// The application state with the file store
        app_state: Arc<AppState<FilePropertyStore>>,
    },
}

impl ConfiguredAppState {
    /// Get the configuration the state was built from
    pub fn config(&self) -> &Config {
        match self {
            ConfiguredAppState::Memory { app_state } => &app_state.config,
            ConfiguredAppState::File { app_state } => &app_state.config,
        }
    }

    /// Get the HTTP address from config
    pub fn http_addr(&self) -> SocketAddr {
        self.config().server.http_addr
    }

    /// Storage backend in use
    pub fn storage_type(&self) -> StorageType {
        match self {
            ConfiguredAppState::Memory { .. } => StorageType::Memory,
            ConfiguredAppState::File { .. } => StorageType::File,
        }
    }
}

/// Create AppState based on configuration
pub fn create_app_state(config: Config) -> Result<ConfiguredAppState> {
    log_info!("Creating AppState with storage type: {:?}", config.storage.storage_type);

    let generator = ScriptGenerator::new(&config.ai)?;
    if !generator.has_api_key() {
        log_warn!("No chat-completion API key configured; script generation will return errors");
    }

    match config.storage.storage_type {
        StorageType::Memory => {
            let store = Arc::new(MemoryPropertyStore::new());
            log_info!("In-memory store initialized");
            Ok(ConfiguredAppState::Memory {
                app_state: Arc::new(AppState::new(store, config, generator)),
            })
        }
        StorageType::File => {
            let store = Arc::new(FilePropertyStore::open(config.storage.data_dir.clone())?);
            log_info!("File store initialized at {}", store.data_dir().display());
            Ok(ConfiguredAppState::File {
                app_state: Arc::new(AppState::new(store, config, generator)),
            })
        }
    }
}
