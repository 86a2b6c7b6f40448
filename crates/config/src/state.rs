//! Task list persistence.
//!
//! [`StatePersistence`] loads the task list at start-up and writes it back
//! whenever the store changes. It is subscribed to the
//! [`TaskStore`](ticklist_protocol::TaskStore) as a
//! [`StoreObserver`], so every state-changing mutation produces exactly one
//! write.
//!
//! Failures never stop the application: unreadable or malformed stored data
//! is logged and replaced by an empty list, and failed writes are logged
//! while the in-memory list keeps working.

use ticklist_protocol::{StoreEvent, StoreObserver, TaskList};
use tracing::{debug, info, warn};

use crate::error::PersistenceError;
use crate::storage::KeyValueStorage;

/// Storage key the task list is written under by default.
pub const DEFAULT_STATE_KEY: &str = "state";

/// Loads and saves the task list through a [`KeyValueStorage`].
///
/// # Examples
///
/// ```
/// use ticklist_config::state::StatePersistence;
/// use ticklist_config::storage::MemoryStorage;
/// use ticklist_protocol::TaskStore;
///
/// let storage = MemoryStorage::new();
/// let persistence = StatePersistence::new(storage.clone());
///
/// let mut store = TaskStore::hydrate(persistence.load_or_default());
/// store.subscribe(Box::new(persistence));
/// store.add_task("Buy milk");
///
/// let reloaded = StatePersistence::new(storage).load_or_default();
/// assert_eq!(reloaded.tasks[0].text, "Buy milk");
/// ```
#[derive(Debug, Clone)]
pub struct StatePersistence<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> StatePersistence<S> {
    /// Creates a persistence adapter using [`DEFAULT_STATE_KEY`].
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STATE_KEY)
    }

    /// Creates a persistence adapter using a custom storage key.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Returns the storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads and decodes the stored task list.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Read`] if the storage cannot be read and
    /// [`PersistenceError::Corrupt`] if the stored value is not a task list.
    pub fn try_load(&self) -> Result<Option<TaskList>, PersistenceError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        TaskList::from_json(&raw)
            .map(Some)
            .map_err(|source| PersistenceError::Corrupt {
                key: self.key.clone(),
                source,
            })
    }

    /// Reads the stored task list, logging and discarding any failure.
    #[must_use]
    pub fn load(&self) -> Option<TaskList> {
        match self.try_load() {
            Ok(Some(list)) => {
                info!(key = %self.key, count = list.tasks.len(), "loaded task list");
                Some(list)
            }
            Ok(None) => {
                info!(key = %self.key, "no stored task list");
                None
            }
            Err(error) => {
                warn!(%error, "failed to load task list, starting empty");
                None
            }
        }
    }

    /// Reads the stored task list, falling back to an empty list.
    #[must_use]
    pub fn load_or_default(&self) -> TaskList {
        self.load().unwrap_or_default()
    }

    /// Encodes and writes the task list.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Encode`] if encoding fails and
    /// [`PersistenceError::Write`] if the storage rejects the write.
    pub fn save(&mut self, list: &TaskList) -> Result<(), PersistenceError> {
        let json = list.to_json().map_err(PersistenceError::Encode)?;
        self.storage.set(&self.key, &json)
    }
}

impl<S: KeyValueStorage> StoreObserver for StatePersistence<S> {
    fn on_change(&mut self, event: &StoreEvent, tasks: &TaskList) {
        match self.save(tasks) {
            Ok(()) => debug!(?event, count = tasks.tasks.len(), "saved task list"),
            Err(error) => warn!(?event, %error, "failed to save task list"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ticklist_protocol::{Task, TaskStore};

    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};

    fn stored(storage: &MemoryStorage) -> Option<String> {
        storage.get(DEFAULT_STATE_KEY).unwrap()
    }

    #[test]
    fn load_missing_is_none() {
        let persistence = StatePersistence::new(MemoryStorage::new());
        assert!(persistence.try_load().unwrap().is_none());
        assert_eq!(persistence.load_or_default(), TaskList::default());
    }

    #[test]
    fn load_invalid_json_falls_back_to_empty() {
        let storage = MemoryStorage::with_entry(DEFAULT_STATE_KEY, "{not json");
        let persistence = StatePersistence::new(storage);

        assert!(matches!(
            persistence.try_load(),
            Err(PersistenceError::Corrupt { .. })
        ));
        assert!(persistence.load().is_none());
        assert!(persistence.load_or_default().tasks.is_empty());
    }

    #[test]
    fn load_wrong_shape_falls_back_to_empty() {
        let storage = MemoryStorage::with_entry(DEFAULT_STATE_KEY, r#"{"tasks":"nope"}"#);
        assert!(StatePersistence::new(storage).load().is_none());
    }

    #[test]
    fn load_then_save_reproduces_stored_document() {
        let document = r#"{"tasks":[{"id":"a","text":"One","completed":true},{"id":"b","text":"Two"}]}"#;
        let storage = MemoryStorage::with_entry(DEFAULT_STATE_KEY, document);
        let mut persistence = StatePersistence::new(storage.clone());

        let list = persistence.load().expect("valid document");
        persistence.save(&list).unwrap();

        assert_eq!(stored(&storage).as_deref(), Some(document));
    }

    #[test]
    fn explicit_false_completion_survives_load_and_save() {
        let document = r#"{"tasks":[{"id":"a","text":"A","completed":false}]}"#;
        let storage = MemoryStorage::with_entry(DEFAULT_STATE_KEY, document);
        let mut persistence = StatePersistence::new(storage.clone());

        let list = persistence.load().expect("valid document");
        persistence.save(&list).unwrap();

        assert_eq!(stored(&storage).as_deref(), Some(document));
    }

    #[test]
    fn unticking_writes_false_explicitly() {
        let storage = MemoryStorage::new();
        let mut store = TaskStore::hydrate(
            TaskList::from_json(r#"{"tasks":[{"id":"a","text":"A"}]}"#).unwrap(),
        );
        store.subscribe(Box::new(StatePersistence::new(storage.clone())));

        let id = store.tasks()[0].id.clone();
        store.toggle_completed(&id);
        store.toggle_completed(&id);

        assert_eq!(
            stored(&storage).as_deref(),
            Some(r#"{"tasks":[{"id":"a","text":"A","completed":false}]}"#)
        );
    }

    #[test]
    fn custom_key_is_used() {
        let storage = MemoryStorage::new();
        let mut persistence = StatePersistence::with_key(storage.clone(), "other");
        persistence.save(&TaskList::default()).unwrap();

        assert_eq!(persistence.key(), "other");
        assert_eq!(storage.get("other").unwrap().as_deref(), Some(r#"{"tasks":[]}"#));
        assert!(stored(&storage).is_none());
    }

    #[test]
    fn every_mutation_writes_once() {
        #[derive(Clone, Default)]
        struct CountingStorage {
            inner: MemoryStorage,
            writes: Rc<RefCell<usize>>,
        }

        impl KeyValueStorage for CountingStorage {
            fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
                self.inner.get(key)
            }

            fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
                *self.writes.borrow_mut() += 1;
                self.inner.set(key, value)
            }
        }

        let storage = CountingStorage::default();
        let mut store = TaskStore::new();
        store.subscribe(Box::new(StatePersistence::new(storage.clone())));

        let id = store.add_task("one").unwrap();
        store.add_task("   ");
        store.toggle_completed(&id);
        store.delete_task(&"missing".into());
        store.update_text(&id, "uno");
        store.delete_task(&id);

        assert_eq!(*storage.writes.borrow(), 4);
        assert_eq!(
            storage.inner.get(DEFAULT_STATE_KEY).unwrap().as_deref(),
            Some(r#"{"tasks":[]}"#)
        );
    }

    #[test]
    fn failed_writes_do_not_block_mutations() {
        let storage = MemoryStorage::new();
        storage.fail_writes(true);

        let mut store = TaskStore::new();
        store.subscribe(Box::new(StatePersistence::new(storage.clone())));

        let id = store.add_task("one").expect("still added in memory");
        assert!(store.toggle_completed(&id));
        assert!(stored(&storage).is_none());

        storage.fail_writes(false);
        store.update_text(&id, "recovered");
        let saved = StatePersistence::new(storage).load().expect("saved");
        assert_eq!(saved.tasks, vec![Task {
            id,
            text: "recovered".to_string(),
            completed: Some(true),
        }]);
    }

    #[test]
    fn file_backed_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = TaskStore::new();
        store.subscribe(Box::new(StatePersistence::new(FileStorage::new(dir.path()))));

        let first = store.add_task("first").unwrap();
        store.add_task("second");
        store.toggle_completed(&first);

        let reloaded = StatePersistence::new(FileStorage::new(dir.path())).load_or_default();
        assert_eq!(&reloaded, store.snapshot());
    }
}
