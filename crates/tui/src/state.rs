//! Application state management.
//!
//! [`AppState`] owns the [`TaskStore`] together with the transient UI state
//! around it: the composer draft, one [`RowController`] per task that has
//! been interacted with, the active drag gesture, selection, and focus.
//! Every store mutation the UI performs goes through a method here.

use std::collections::HashMap;

use ticklist_protocol::{DragSession, Task, TaskId, TaskStore};
use tracing::debug;

use crate::composer::Composer;
use crate::row::{ConfirmFocus, ConfirmOutcome, RowController, RowState};

/// The current focus area in the UI.
///
/// Determines which UI component receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Focus is on the new-task input.
    #[default]
    Composer,
    /// Focus is on the task list.
    List,
}

/// How keyboard input is interpreted.
///
/// Derived from focus and row state; see [`AppState::input_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Moving around the list and acting on the selected task.
    List,
    /// Typing a new task.
    Composer,
    /// Editing a task's text.
    Editing,
    /// The delete confirmation is open.
    Confirm,
}

/// The application state.
#[derive(Debug)]
pub struct AppState {
    /// The task list.
    pub store: TaskStore,
    /// The new-task input.
    pub composer: Composer,
    /// Current focus area.
    pub focus: Focus,
    /// Index of the selected task, if any.
    pub selected: Option<usize>,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// Index of the first task shown in the list.
    pub list_offset: usize,
    rows: HashMap<TaskId, RowController>,
    drag: Option<DragSession>,
}

impl AppState {
    /// Creates a new application state around the given store.
    ///
    /// Focus starts on the composer; the first task, if any, is selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticklist_protocol::TaskStore;
    /// use ticklist_tui::{AppState, Focus};
    ///
    /// let state = AppState::new(TaskStore::new());
    /// assert_eq!(state.focus, Focus::Composer);
    /// assert_eq!(state.selected, None);
    /// ```
    #[must_use]
    pub fn new(store: TaskStore) -> Self {
        let selected = (!store.is_empty()).then_some(0);
        Self {
            store,
            composer: Composer::new(),
            focus: Focus::default(),
            selected,
            help_visible: false,
            list_offset: 0,
            rows: HashMap::new(),
            drag: None,
        }
    }

    /// Returns how keyboard input should currently be interpreted.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        if self.pending_delete().is_some() {
            InputMode::Confirm
        } else if self.editing().is_some() {
            InputMode::Editing
        } else if self.focus == Focus::Composer {
            InputMode::Composer
        } else {
            InputMode::List
        }
    }

    /// Toggles the help overlay visibility.
    ///
    /// Opening help abandons any pointer gesture in progress.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
        if self.help_visible {
            self.cancel_pointer();
        }
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        std::mem::replace(&mut self.help_visible, false)
    }

    // --- Rows ---

    /// Returns the controller for a task's row, if one exists.
    #[must_use]
    pub fn row(&self, id: &TaskId) -> Option<&RowController> {
        self.rows.get(id)
    }

    /// Returns the state of a task's row, `Idle` if it has no controller.
    #[must_use]
    pub fn row_state(&self, id: &TaskId) -> RowState {
        self.row(id).map(RowController::state).unwrap_or_default()
    }

    fn row_mut(&mut self, id: &TaskId) -> &mut RowController {
        self.rows
            .entry(id.clone())
            .or_insert_with(|| RowController::new(id.clone()))
    }

    /// Returns the row whose text is being edited.
    #[must_use]
    pub fn editing(&self) -> Option<&RowController> {
        self.rows.values().find(|row| row.is_editing())
    }

    /// Returns the row whose delete confirmation is open.
    #[must_use]
    pub fn pending_delete(&self) -> Option<&RowController> {
        self.rows.values().find(|row| row.is_pending_delete())
    }

    /// Returns the active drag gesture.
    #[must_use]
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    // --- Selection and focus ---

    /// Returns the ID of the task at `index`.
    #[must_use]
    pub fn task_id_at(&self, index: usize) -> Option<TaskId> {
        self.store.tasks().get(index).map(|t| t.id.clone())
    }

    /// Returns the selected task, if any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.store.tasks().get(self.selected?)
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.selected_task().map(|t| t.id.clone())
    }

    /// Selects the task at `index` and focuses the list.
    ///
    /// Any open edit is committed first.
    pub fn select(&mut self, index: usize) {
        self.commit_edit();
        if index < self.store.len() {
            self.selected = Some(index);
            self.focus = Focus::List;
        }
    }

    /// Moves the selection up, wrapping to the bottom.
    ///
    /// Any open edit is committed first.
    pub fn navigate_up(&mut self) {
        self.commit_edit();
        let len = self.store.len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(idx) if idx > 0 => Some(idx - 1),
            Some(_) => Some(len - 1),
            None => Some(0),
        };
    }

    /// Moves the selection down, wrapping to the top.
    ///
    /// Any open edit is committed first.
    pub fn navigate_down(&mut self) {
        self.commit_edit();
        let len = self.store.len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(idx) if idx + 1 < len => Some(idx + 1),
            Some(_) => Some(0),
            None => Some(0),
        };
    }

    /// Clears the current task selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Moves focus to the composer, committing any open edit.
    pub fn focus_composer(&mut self) {
        self.commit_edit();
        self.focus = Focus::Composer;
    }

    /// Moves focus to the task list, selecting the first task if nothing is
    /// selected.
    pub fn focus_list(&mut self) {
        self.focus = Focus::List;
        if self.selected.is_none() && !self.store.is_empty() {
            self.selected = Some(0);
        }
    }

    /// Adjusts the list offset so the selection is within `height` rows.
    pub fn ensure_visible(&mut self, height: usize) {
        let max_offset = self.store.len().saturating_sub(height);
        self.list_offset = self.list_offset.min(max_offset);
        if let Some(idx) = self.selected {
            if idx < self.list_offset {
                self.list_offset = idx;
            } else if height > 0 && idx >= self.list_offset + height {
                self.list_offset = idx + 1 - height;
            }
        }
    }

    // --- Composer ---

    /// Adds the composer draft as a new task.
    ///
    /// The new task is prepended, so it becomes the selection.
    pub fn submit_composer(&mut self) -> Option<TaskId> {
        let id = self.composer.submit(&mut self.store)?;
        self.selected = Some(0);
        Some(id)
    }

    // --- Completion ---

    /// Toggles completion of the given task.
    pub fn toggle_completed(&mut self, id: &TaskId) -> bool {
        match self.rows.get(id) {
            Some(row) => row.toggle_completed(&mut self.store),
            None => self.store.toggle_completed(id),
        }
    }

    /// Toggles completion of the selected task.
    pub fn toggle_selected(&mut self) -> bool {
        match self.selected_id() {
            Some(id) => self.toggle_completed(&id),
            None => false,
        }
    }

    // --- Editing ---

    /// Starts editing the selected task.
    pub fn begin_edit_selected(&mut self) -> bool {
        let Some(task) = self.selected_task() else {
            return false;
        };
        let (id, text) = (task.id.clone(), task.text.clone());
        self.focus = Focus::List;
        self.row_mut(&id).begin_edit(&text);
        true
    }

    /// Appends a character to the open edit.
    pub fn edit_input(&mut self, ch: char) {
        if let Some(row) = self.rows.values_mut().find(|row| row.is_editing()) {
            row.edit_input(ch);
        }
    }

    /// Removes the last character of the open edit.
    pub fn edit_backspace(&mut self) {
        if let Some(row) = self.rows.values_mut().find(|row| row.is_editing()) {
            row.edit_backspace();
        }
    }

    /// Commits the open edit, if any.
    ///
    /// Returns `true` if the store changed.
    pub fn commit_edit(&mut self) -> bool {
        match self.rows.values_mut().find(|row| row.is_editing()) {
            Some(row) => row.commit_edit(&mut self.store),
            None => false,
        }
    }

    /// Discards the open edit, if any.
    pub fn discard_edit(&mut self) {
        if let Some(row) = self.rows.values_mut().find(|row| row.is_editing()) {
            row.discard_edit();
        }
    }

    // --- Delete ---

    /// Opens the delete confirmation for the given task.
    ///
    /// Returns `false` if a confirmation is already open. Any drag in
    /// progress is cancelled first.
    pub fn request_delete(&mut self, id: &TaskId) -> bool {
        if self.pending_delete().is_some() || self.store.get(id).is_none() {
            return false;
        }
        self.commit_edit();
        self.cancel_pointer();
        self.row_mut(id).request_delete()
    }

    /// Opens the delete confirmation for the selected task.
    pub fn request_delete_selected(&mut self) -> bool {
        match self.selected_id() {
            Some(id) => self.request_delete(&id),
            None => false,
        }
    }

    /// Returns the focused button of the open confirmation.
    #[must_use]
    pub fn confirm_focus(&self) -> Option<ConfirmFocus> {
        self.pending_delete().and_then(RowController::confirm_focus)
    }

    /// Moves focus between the confirmation's buttons.
    pub fn switch_confirm_focus(&mut self) {
        if let Some(row) = self.pending_row_mut() {
            row.switch_confirm_focus();
        }
    }

    /// Activates the focused confirmation button.
    pub fn activate_confirm(&mut self) -> Option<ConfirmOutcome> {
        let id = self.pending_delete()?.task_id().clone();
        let index = self.store.position(&id);
        let row = self.rows.get_mut(&id)?;
        let outcome = row.activate_confirm(&mut self.store)?;
        if outcome == ConfirmOutcome::Deleted {
            self.after_delete(&id, index);
        }
        Some(outcome)
    }

    /// Deletes the task whose confirmation is open.
    pub fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete().map(|row| row.task_id().clone()) else {
            return false;
        };
        let index = self.store.position(&id);
        let deleted = self
            .rows
            .get_mut(&id)
            .is_some_and(|row| row.confirm_delete(&mut self.store));
        self.after_delete(&id, index);
        deleted
    }

    /// Closes the open confirmation without deleting.
    pub fn cancel_delete(&mut self) {
        if let Some(row) = self.pending_row_mut() {
            row.cancel_delete();
        }
    }

    fn pending_row_mut(&mut self) -> Option<&mut RowController> {
        self.rows.values_mut().find(|row| row.is_pending_delete())
    }

    /// Drops the deleted task's row and moves focus to the task now at the
    /// deleted index, else the one before it, else the composer.
    fn after_delete(&mut self, id: &TaskId, index: Option<usize>) {
        self.rows.remove(id);
        if self.drag.as_ref().is_some_and(|d| d.dragged() == id) {
            self.drag = None;
        }

        let len = self.store.len();
        if len == 0 {
            self.selected = None;
            self.focus = Focus::Composer;
        } else {
            let index = index.unwrap_or(0).min(len - 1);
            self.selected = Some(index);
            self.focus = Focus::List;
        }
        debug!(task = %id, selected = ?self.selected, "focus moved after delete");
    }

    // --- Reordering ---

    /// The pointer went down on a task's grip.
    pub fn press_grip(&mut self, id: &TaskId) -> bool {
        self.commit_edit();
        self.row_mut(id).grip_pressed()
    }

    /// The pointer moved with the button held, over `target` if it is over
    /// a task.
    ///
    /// The first movement after a grip press starts the drag gesture.
    /// Hovering never changes the store.
    pub fn drag_over(&mut self, target: Option<TaskId>) {
        if self.drag.is_none() {
            let payload = self
                .rows
                .values_mut()
                .find(|row| row.state() == RowState::DraggablePrimed)
                .and_then(RowController::drag_started);
            self.drag = payload.map(DragSession::begin);
        }
        if let (Some(drag), Some(target)) = (&mut self.drag, target) {
            drag.hover_target(target);
        }
    }

    /// The pointer button was released, over `target` if it is over a task.
    ///
    /// Completes an active drag by dropping onto `target`; a release outside
    /// the list cancels it. A primed grip without a drag returns to idle.
    /// Returns `true` if the order changed.
    pub fn release_pointer(&mut self, target: Option<TaskId>) -> bool {
        let Some(mut drag) = self.drag.take() else {
            for row in self.rows.values_mut() {
                row.pointer_released();
            }
            return false;
        };

        let dragged = drag.dragged().clone();
        let moved = match target {
            Some(target) => {
                drag.hover_target(target);
                drag.commit_hovered(&mut self.store)
            }
            None => {
                debug!(task = %dragged, "drag cancelled");
                false
            }
        };
        if let Some(row) = self.rows.get_mut(&dragged) {
            row.drag_finished();
        }
        if moved {
            self.selected = self.store.position(&dragged);
        }
        moved
    }

    /// Abandons the pointer gesture in progress without reordering.
    pub fn cancel_pointer(&mut self) {
        self.release_pointer(None);
    }

    /// Moves the selected task one place up or down.
    ///
    /// Performed as a complete drag gesture onto the neighbouring task, so
    /// it follows the same rules as a pointer drag.
    pub fn move_selected(&mut self, up: bool) -> bool {
        let Some(index) = self.selected else {
            return false;
        };
        let neighbour = if up { index.checked_sub(1) } else { Some(index + 1) };
        let (Some(dragged), Some(target)) = (
            self.task_id_at(index),
            neighbour.and_then(|n| self.task_id_at(n)),
        ) else {
            return false;
        };

        if !self.press_grip(&dragged) {
            return false;
        }
        self.drag_over(Some(target.clone()));
        self.release_pointer(Some(target))
    }
}

#[cfg(test)]
mod tests {
    use ticklist_protocol::TaskList;

    use super::*;

    fn state_with(ids: &[&str]) -> AppState {
        let tasks = ids.iter().map(|id| Task::with_id(*id, *id)).collect();
        AppState::new(TaskStore::hydrate(TaskList { tasks }))
    }

    fn ids(state: &AppState) -> Vec<&str> {
        state.store.tasks().iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn new_state_has_correct_defaults() {
        let state = state_with(&["a", "b"]);

        assert_eq!(state.focus, Focus::Composer);
        assert_eq!(state.selected, Some(0));
        assert_eq!(state.input_mode(), InputMode::Composer);
        assert!(!state.help_visible);
        assert!(state.drag().is_none());
    }

    #[test]
    fn navigation_wraps_around() {
        let mut state = state_with(&["a", "b", "c"]);

        state.navigate_up();
        assert_eq!(state.selected, Some(2));
        state.navigate_down();
        assert_eq!(state.selected, Some(0));
        state.navigate_down();
        assert_eq!(state.selected, Some(1));
    }

    #[test]
    fn navigation_on_empty_list_selects_nothing() {
        let mut state = state_with(&[]);
        state.navigate_down();
        assert_eq!(state.selected, None);
        state.focus_list();
        assert_eq!(state.selected, None);
    }

    #[test]
    fn toggle_without_row_state_leaves_rows_untouched() {
        let mut state = state_with(&["a"]);
        assert!(state.toggle_selected());
        assert!(state.store.tasks()[0].is_completed());
        assert!(state.row(&"a".into()).is_none());
    }

    #[test]
    fn delete_request_cancels_active_drag() {
        let mut state = state_with(&["a", "b", "c"]);
        assert!(state.press_grip(&"a".into()));
        state.drag_over(Some("c".into()));
        assert!(state.drag().is_some());

        assert!(state.request_delete(&"b".into()));
        assert!(state.drag().is_none());
        assert_eq!(state.row_state(&"a".into()), RowState::Idle);

        state.cancel_delete();
        assert!(!state.release_pointer(Some("c".into())));
        assert_eq!(ids(&state), ["a", "b", "c"]);
    }

    #[test]
    fn opening_help_cancels_active_drag() {
        let mut state = state_with(&["a", "b"]);
        state.press_grip(&"a".into());
        state.drag_over(Some("b".into()));

        state.toggle_help();
        assert!(state.drag().is_none());
        assert_eq!(state.row_state(&"a".into()), RowState::Idle);
    }

    #[test]
    fn dismiss_help_reports_visibility() {
        let mut state = state_with(&[]);
        assert!(!state.dismiss_help());
        state.toggle_help();
        assert!(state.dismiss_help());
        assert!(!state.help_visible);
    }

    #[test]
    fn input_mode_follows_rows_and_focus() {
        let mut state = state_with(&["a", "b"]);
        state.focus_list();
        assert_eq!(state.input_mode(), InputMode::List);

        state.begin_edit_selected();
        assert_eq!(state.input_mode(), InputMode::Editing);
        state.discard_edit();

        state.request_delete_selected();
        assert_eq!(state.input_mode(), InputMode::Confirm);
    }

    #[test]
    fn submit_selects_new_task() {
        let mut state = state_with(&["a"]);
        state.selected = None;
        "new".chars().for_each(|ch| state.composer.insert(ch));

        let id = state.submit_composer().unwrap();
        assert_eq!(state.selected_task().map(|t| &t.id), Some(&id));
        assert_eq!(state.store.len(), 2);
    }

    #[test]
    fn navigating_commits_open_edit() {
        let mut state = state_with(&["a", "b"]);
        state.focus_list();
        state.begin_edit_selected();
        state.edit_input('!');

        state.navigate_down();

        assert_eq!(state.store.tasks()[0].text, "a!");
        assert!(state.editing().is_none());
        assert_eq!(state.selected, Some(1));
    }

    #[test]
    fn focus_composer_commits_open_edit() {
        let mut state = state_with(&["a"]);
        state.focus_list();
        state.begin_edit_selected();
        state.edit_backspace();
        state.edit_input('z');

        state.focus_composer();
        assert_eq!(state.store.tasks()[0].text, "z");
    }

    #[test]
    fn only_one_confirmation_at_a_time() {
        let mut state = state_with(&["a", "b"]);
        assert!(state.request_delete(&"a".into()));
        assert!(!state.request_delete(&"b".into()));
        assert_eq!(state.confirm_focus(), Some(ConfirmFocus::Cancel));
    }

    #[test]
    fn delete_moves_focus_to_next_row() {
        let mut state = state_with(&["a", "b", "c"]);
        state.select(1);
        state.request_delete_selected();
        assert!(state.confirm_delete());

        assert_eq!(ids(&state), ["a", "c"]);
        assert_eq!(state.selected_task().map(|t| t.id.as_str()), Some("c"));
        assert_eq!(state.focus, Focus::List);
        assert!(state.row(&"b".into()).is_none());
    }

    #[test]
    fn delete_last_row_moves_focus_to_previous() {
        let mut state = state_with(&["a", "b"]);
        state.select(1);
        state.request_delete_selected();
        state.switch_confirm_focus();
        assert_eq!(state.activate_confirm(), Some(ConfirmOutcome::Deleted));

        assert_eq!(state.selected_task().map(|t| t.id.as_str()), Some("a"));
    }

    #[test]
    fn delete_only_row_moves_focus_to_composer() {
        let mut state = state_with(&["a"]);
        state.select(0);
        state.request_delete_selected();
        state.confirm_delete();

        assert!(state.store.is_empty());
        assert_eq!(state.selected, None);
        assert_eq!(state.focus, Focus::Composer);
    }

    #[test]
    fn cancelled_confirmation_keeps_task() {
        let mut state = state_with(&["a"]);
        state.request_delete_selected();
        assert_eq!(state.activate_confirm(), Some(ConfirmOutcome::Cancelled));
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.input_mode(), InputMode::Composer);
    }

    #[test]
    fn pointer_drag_reorders_on_release() {
        let mut state = state_with(&["a", "b", "c"]);

        assert!(state.press_grip(&"c".into()));
        state.drag_over(Some("b".into()));
        state.drag_over(Some("a".into()));
        // Hovering leaves the order alone.
        assert_eq!(ids(&state), ["a", "b", "c"]);
        assert_eq!(state.row_state(&"c".into()), RowState::Dragging);

        assert!(state.release_pointer(Some("a".into())));
        assert_eq!(ids(&state), ["c", "a", "b"]);
        assert_eq!(state.selected, Some(0));
        assert_eq!(state.row_state(&"c".into()), RowState::Idle);
        assert!(state.drag().is_none());
    }

    #[test]
    fn release_outside_list_cancels_drag() {
        let mut state = state_with(&["a", "b"]);
        state.press_grip(&"a".into());
        state.drag_over(Some("b".into()));

        assert!(!state.release_pointer(None));
        assert_eq!(ids(&state), ["a", "b"]);
        assert_eq!(state.row_state(&"a".into()), RowState::Idle);
    }

    #[test]
    fn release_without_drag_unprimes_grip() {
        let mut state = state_with(&["a", "b"]);
        state.press_grip(&"a".into());
        assert_eq!(state.row_state(&"a".into()), RowState::DraggablePrimed);

        assert!(!state.release_pointer(Some("a".into())));
        assert_eq!(state.row_state(&"a".into()), RowState::Idle);
    }

    #[test]
    fn drag_without_grip_does_nothing() {
        let mut state = state_with(&["a", "b"]);
        state.drag_over(Some("b".into()));
        assert!(state.drag().is_none());
    }

    #[test]
    fn move_selected_swaps_with_neighbour() {
        let mut state = state_with(&["a", "b", "c"]);
        state.select(0);

        assert!(state.move_selected(false));
        assert_eq!(ids(&state), ["b", "a", "c"]);
        assert_eq!(state.selected, Some(1));

        assert!(state.move_selected(true));
        assert_eq!(ids(&state), ["a", "b", "c"]);
        assert_eq!(state.selected, Some(0));

        // Already at the top.
        assert!(!state.move_selected(true));
        assert_eq!(state.row_state(&"a".into()), RowState::Idle);
    }

    #[test]
    fn ensure_visible_scrolls_to_selection() {
        let mut state = state_with(&["a", "b", "c", "d", "e"]);
        state.select(4);
        state.ensure_visible(2);
        assert_eq!(state.list_offset, 3);

        state.select(1);
        state.ensure_visible(2);
        assert_eq!(state.list_offset, 1);

        state.ensure_visible(10);
        assert_eq!(state.list_offset, 0);
    }
}
