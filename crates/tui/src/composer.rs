//! The new-task input.

use ticklist_protocol::{TaskId, TaskStore};

/// Draft text for a task that has not been added yet.
///
/// The draft is never persisted.
///
/// # Examples
///
/// ```
/// use ticklist_protocol::TaskStore;
/// use ticklist_tui::Composer;
///
/// let mut store = TaskStore::new();
/// let mut composer = Composer::new();
/// for ch in "Buy milk".chars() {
///     composer.insert(ch);
/// }
///
/// assert!(composer.submit(&mut store).is_some());
/// assert_eq!(composer.draft(), "");
/// assert_eq!(store.tasks()[0].text, "Buy milk");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    draft: String,
}

impl Composer {
    /// Creates an empty composer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current draft.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Appends a character to the draft.
    pub fn insert(&mut self, ch: char) {
        self.draft.push(ch);
    }

    /// Removes the last character of the draft.
    pub fn backspace(&mut self) {
        self.draft.pop();
    }

    /// Empties the draft.
    pub fn clear(&mut self) {
        self.draft.clear();
    }

    /// Adds the draft as a new task and clears it.
    ///
    /// A blank draft is kept as is and nothing is added.
    pub fn submit(&mut self, store: &mut TaskStore) -> Option<TaskId> {
        let id = store.add_task(self.draft.as_str())?;
        self.clear();
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> Composer {
        let mut composer = Composer::new();
        text.chars().for_each(|ch| composer.insert(ch));
        composer
    }

    #[test]
    fn typing_and_backspace() {
        let mut composer = typed("abc");
        composer.backspace();
        assert_eq!(composer.draft(), "ab");

        composer.clear();
        composer.backspace();
        assert_eq!(composer.draft(), "");
    }

    #[test]
    fn submit_prepends_and_clears() {
        let mut store = TaskStore::new();
        store.add_task("older");

        let mut composer = typed("Buy milk");
        let id = composer.submit(&mut store).unwrap();

        assert_eq!(store.tasks()[0].id, id);
        assert_eq!(store.tasks()[0].text, "Buy milk");
        assert!(!store.tasks()[0].is_completed());
        assert_eq!(composer.draft(), "");
    }

    #[test]
    fn blank_submit_keeps_draft() {
        let mut store = TaskStore::new();
        let mut composer = typed("   ");

        assert_eq!(composer.submit(&mut store), None);
        assert!(store.is_empty());
        assert_eq!(composer.draft(), "   ");
    }

    #[test]
    fn text_is_stored_untrimmed() {
        let mut store = TaskStore::new();
        let mut composer = typed("  padded ");

        composer.submit(&mut store);
        assert_eq!(store.tasks()[0].text, "  padded ");
    }
}
