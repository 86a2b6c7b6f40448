//! Key-value storage backends.
//!
//! [`KeyValueStorage`] is the narrow interface the persistence adapter
//! writes through: string values addressed by string keys, read and written
//! synchronously.
//!
//! - [`FileStorage`] keeps one `<key>.json` file per key in a directory.
//! - [`MemoryStorage`] keeps values in memory. Clones share the same
//!   entries, which lets tests inspect what was written.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use crate::error::PersistenceError;

/// Synchronous string key-value storage.
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Read`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Write`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Stores each key as a JSON file inside a directory.
///
/// The directory is created on the first write. Writes go to a temporary
/// file that is then renamed over the target, so a crash mid-write leaves
/// the previous value intact.
///
/// # Examples
///
/// ```no_run
/// use ticklist_config::storage::{FileStorage, KeyValueStorage};
///
/// # fn main() -> Result<(), ticklist_config::PersistenceError> {
/// let mut storage = FileStorage::new("/tmp/ticklist");
/// storage.set("state", r#"{"tasks":[]}"#)?;
/// assert_eq!(storage.get("state")?.as_deref(), Some(r#"{"tasks":[]}"#));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    directory: PathBuf,
}

impl FileStorage {
    /// Creates a storage rooted at the given directory.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Returns the storage directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the file path used for `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(?path, "no stored value");
                Ok(None)
            }
            Err(source) => Err(PersistenceError::Read {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let write_error = |source| PersistenceError::Write {
            key: key.to_owned(),
            source,
        };

        std::fs::create_dir_all(&self.directory).map_err(write_error)?;

        let path = self.path_for(key);
        let tmp = self.directory.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, value).map_err(write_error)?;
        std::fs::rename(&tmp, &path).map_err(write_error)?;
        debug!(?path, bytes = value.len(), "stored value");
        Ok(())
    }
}

/// In-memory storage.
///
/// Clones share their entries. Writes can be made to fail on demand to
/// exercise error handling.
///
/// # Examples
///
/// ```
/// use ticklist_config::storage::{KeyValueStorage, MemoryStorage};
///
/// let storage = MemoryStorage::new();
/// let mut writer = storage.clone();
/// writer.set("state", "{}").unwrap();
/// assert_eq!(storage.get("state").unwrap().as_deref(), Some("{}"));
///
/// storage.fail_writes(true);
/// assert!(writer.set("state", "{}").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
    failing: Rc<Cell<bool>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage holding a single entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        storage
    }

    /// Makes every subsequent write fail (or succeed again).
    pub fn fail_writes(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.failing.get() {
            return Err(PersistenceError::Write {
                key: key.to_owned(),
                source: std::io::Error::new(ErrorKind::StorageFull, "storage quota exceeded"),
            });
        }
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
