//! Configuration and state persistence for the ticklist application.
//!
//! This crate handles loading and persisting configuration, and reading and
//! writing the task list to durable local storage.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`persistence`]: Config file discovery, reading, and writing
//! - [`storage`]: Key-value storage backends (file and in-memory)
//! - [`state`]: Task list loading and auto-saving
//! - [`error`]: Error types for configuration and persistence
//!
//! # Configuration Sources (Priority)
//!
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables (`TICKLIST_STORAGE_DIR`, `TICKLIST_LOG`)
//! 3. Local config (`./ticklist.json5` or `./ticklist.json`)
//! 4. User config (`~/.config/ticklist/config.json5` or `~/.config/ticklist/config.json`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! Wiring persistence to a task store:
//!
//! ```no_run
//! use ticklist_config::{Config, FileStorage, StatePersistence};
//! use ticklist_protocol::TaskStore;
//!
//! # async fn example() -> ticklist_config::Result<()> {
//! let mut config = Config::load().await?;
//! config.apply_env();
//!
//! let storage = FileStorage::new(config.storage.resolved_directory()?);
//! let persistence = StatePersistence::with_key(storage, config.storage.key.clone());
//!
//! let mut store = TaskStore::hydrate(persistence.load_or_default());
//! store.subscribe(Box::new(persistence));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod persistence;
pub mod state;
pub mod storage;

// Re-export primary types at crate root for convenience
pub use config::{Config, LoggingConfig, StorageConfig};
pub use error::{ConfigError, PersistenceError, Result};
pub use state::{DEFAULT_STATE_KEY, StatePersistence};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
