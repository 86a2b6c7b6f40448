//! Task-related types for the task list.
//!
//! This module defines the task identifier, the task structure itself, and
//! the serialized [`TaskList`] that is written to storage.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};

/// Unique identifier for a task.
///
/// Identifiers are opaque strings. Fresh identifiers are UUID v4 strings,
/// but any string read back from storage is accepted verbatim.
///
/// # Examples
///
/// ```
/// use ticklist_protocol::TaskId;
///
/// let a = TaskId::generate();
/// let b = TaskId::generate();
/// assert_ne!(a, b);
///
/// let fixed = TaskId::from("task-1");
/// assert_eq!(fixed.as_str(), "task-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single item on the task list.
///
/// # Examples
///
/// ```
/// use ticklist_protocol::Task;
///
/// let task = Task::new("Buy milk");
/// assert_eq!(task.text, "Buy milk");
/// assert!(!task.is_completed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for this task. Never changes once assigned.
    pub id: TaskId,
    /// The task text. May be empty after an edit.
    pub text: String,
    /// Whether the task has been completed. `None` means the flag was never
    /// written, which reads as not completed and stays absent when saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl Task {
    /// Creates a new, uncompleted task with a freshly generated ID.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(TaskId::generate(), text)
    }

    /// Creates a new, uncompleted task with a specific ID.
    ///
    /// Useful for testing or when recreating tasks from persistent storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticklist_protocol::{Task, TaskId};
    ///
    /// let task = Task::with_id("a", "First");
    /// assert_eq!(task.id, TaskId::from("a"));
    /// ```
    #[must_use]
    pub fn with_id(id: impl Into<TaskId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: None,
        }
    }

    /// Returns `true` if the task has been completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed.unwrap_or(false)
    }

    /// Flips the completion flag, recording it explicitly from then on.
    pub fn toggle(&mut self) {
        self.completed = Some(!self.is_completed());
    }
}

/// The persisted form of the task list.
///
/// Serializes as `{ "tasks": [ { "id": ..., "text": ..., "completed": ... } ] }`.
/// `completed` is omitted for tasks that were never toggled and reads as
/// false when absent; an explicit `false` is kept. A missing `tasks` key
/// reads as an empty list.
///
/// # Examples
///
/// ```
/// use ticklist_protocol::TaskList;
///
/// let list = TaskList::from_json(r#"{"tasks":[{"id":"a","text":"Buy milk"}]}"#).unwrap();
/// assert_eq!(list.tasks.len(), 1);
/// assert!(!list.tasks[0].is_completed());
///
/// assert_eq!(list.to_json().unwrap(), r#"{"tasks":[{"id":"a","text":"Buy milk"}]}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// The tasks, in display order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty task list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a task list from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Deserialization`] if the input is not a valid
    /// task list document.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(ProtocolError::Deserialization)
    }

    /// Serializes the task list to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(ProtocolError::Serialization)
    }

    /// Drops every task whose ID was already seen earlier in the list.
    ///
    /// Returns the IDs that were dropped, in list order.
    pub fn dedup_ids(&mut self) -> Vec<TaskId> {
        let mut seen = HashSet::new();
        let mut dropped = Vec::new();
        self.tasks.retain(|task| {
            if seen.insert(task.id.clone()) {
                true
            } else {
                dropped.push(task.id.clone());
                false
            }
        });
        dropped
    }

    /// Returns the task IDs in list order.
    #[must_use]
    pub fn ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|t| t.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_uuid_strings() {
        let id = TaskId::generate();
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn completed_is_omitted_for_new_tasks() {
        let task = Task::with_id("a", "Buy milk");
        let json = serde_json::to_string(&task).expect("serialize");
        insta::assert_snapshot!(json, @r#"{"id":"a","text":"Buy milk"}"#);
    }

    #[test]
    fn completed_is_written_when_true() {
        let mut task = Task::with_id("a", "Buy milk");
        task.toggle();
        let json = serde_json::to_string(&task).expect("serialize");
        insta::assert_snapshot!(json, @r#"{"id":"a","text":"Buy milk","completed":true}"#);
    }

    #[test]
    fn missing_completed_reads_as_false() {
        let task: Task = serde_json::from_str(r#"{"id":"a","text":"x"}"#).expect("deserialize");
        assert!(!task.is_completed());
        assert_eq!(task.completed, None);
    }

    #[test]
    fn explicit_false_is_kept() {
        let input = r#"{"tasks":[{"id":"a","text":"A","completed":false}]}"#;
        let list = TaskList::from_json(input).expect("parse");
        assert!(!list.tasks[0].is_completed());
        assert_eq!(list.to_json().expect("serialize"), input);
    }

    #[test]
    fn toggling_back_writes_false() {
        let mut task = Task::with_id("a", "A");
        task.toggle();
        task.toggle();
        let json = serde_json::to_string(&task).expect("serialize");
        insta::assert_snapshot!(json, @r#"{"id":"a","text":"A","completed":false}"#);
    }

    #[test]
    fn missing_tasks_key_reads_as_empty() {
        let list = TaskList::from_json("{}").expect("parse");
        assert!(list.tasks.is_empty());
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(matches!(
            TaskList::from_json("not json"),
            Err(ProtocolError::Deserialization(_))
        ));
        assert!(TaskList::from_json(r#"{"tasks": 3}"#).is_err());
    }

    #[test]
    fn non_uuid_ids_are_accepted() {
        let list = TaskList::from_json(r#"{"tasks":[{"id":"legacy-7","text":"x"}]}"#)
            .expect("parse");
        assert_eq!(list.tasks[0].id.as_str(), "legacy-7");
    }

    #[test]
    fn dedup_ids_keeps_first_occurrence() {
        let mut list = TaskList {
            tasks: vec![
                Task::with_id("a", "first"),
                Task::with_id("b", "second"),
                Task::with_id("a", "duplicate"),
            ],
        };

        let dropped = list.dedup_ids();

        assert_eq!(dropped, vec![TaskId::from("a")]);
        assert_eq!(list.ids(), vec![TaskId::from("a"), TaskId::from("b")]);
        assert_eq!(list.tasks[0].text, "first");
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        pub(crate) fn arb_task()(
            id in "[a-z0-9-]{1,12}",
            text in "[a-zA-Z0-9 .,!?]{0,40}",
            completed in proptest::option::of(any::<bool>()),
        ) -> Task {
            Task { id: TaskId::from(id), text, completed }
        }
    }

    proptest! {
        /// Parsing what we wrote reproduces the same document text.
        #[test]
        fn task_list_json_is_stable(tasks in proptest::collection::vec(arb_task(), 0..8)) {
            let list = TaskList { tasks };
            let json = list.to_json().expect("serialize");
            let parsed = TaskList::from_json(&json).expect("parse");
            prop_assert_eq!(&parsed, &list);
            prop_assert_eq!(parsed.to_json().expect("serialize again"), json);
        }
    }
}
