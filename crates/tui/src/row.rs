//! Per-row interaction state.
//!
//! Each visible task has a [`RowController`] tracking its drag and delete
//! confirmation state, plus an optional in-progress text edit. The
//! controller holds only the task's ID; every change to the task itself
//! goes through the [`TaskStore`].
//!
//! ```text
//!            grip_pressed            drag_started
//!   Idle ─────────────────▶ Primed ───────────────▶ Dragging
//!    ▲  ◀──────────────────   │                        │
//!    │     pointer_released                            │
//!    └─────────────────────────────────────────────────┘
//!                         drag_finished
//!
//!   Idle ── request_delete ──▶ PendingDelete ── confirm / cancel ──▶ Idle
//! ```

use ticklist_protocol::{DragPayload, TaskId, TaskStore};
use tracing::debug;

/// The drag and delete state of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The grip was pressed; the row may be dragged.
    DraggablePrimed,
    /// The row is being dragged.
    Dragging,
    /// The delete confirmation is open.
    PendingDelete {
        /// Which confirmation button has focus.
        focus: ConfirmFocus,
    },
}

/// The focused button of the delete confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmFocus {
    /// Keep the task.
    #[default]
    Cancel,
    /// Delete the task.
    Delete,
}

impl ConfirmFocus {
    /// Returns the other button.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Cancel => Self::Delete,
            Self::Delete => Self::Cancel,
        }
    }
}

/// What activating the delete confirmation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The task was deleted.
    Deleted,
    /// The confirmation was dismissed.
    Cancelled,
}

/// Interaction state for one task row.
///
/// # Examples
///
/// ```
/// use ticklist_protocol::TaskStore;
/// use ticklist_tui::row::RowController;
///
/// let mut store = TaskStore::new();
/// let id = store.add_task("Buy milk").unwrap();
///
/// let mut row = RowController::new(id.clone());
/// row.begin_edit("Buy milk");
/// row.edit_input('!');
/// assert!(row.commit_edit(&mut store));
/// assert_eq!(store.get(&id).unwrap().text, "Buy milk!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowController {
    task_id: TaskId,
    state: RowState,
    edit: Option<EditBuffer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EditBuffer {
    original: String,
    text: String,
}

impl RowController {
    /// Creates an idle controller for the given task.
    #[must_use]
    pub fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            state: RowState::Idle,
            edit: None,
        }
    }

    /// Returns the ID of the task this row controls.
    #[must_use]
    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the current drag/delete state.
    #[must_use]
    pub fn state(&self) -> RowState {
        self.state
    }

    /// Returns `true` while the delete confirmation is open.
    #[must_use]
    pub fn is_pending_delete(&self) -> bool {
        matches!(self.state, RowState::PendingDelete { .. })
    }

    /// Returns the focused confirmation button, if the confirmation is open.
    #[must_use]
    pub fn confirm_focus(&self) -> Option<ConfirmFocus> {
        match self.state {
            RowState::PendingDelete { focus } => Some(focus),
            _ => None,
        }
    }

    // --- Drag ---

    /// The pointer went down on the grip.
    ///
    /// Returns `true` if the row became draggable.
    pub fn grip_pressed(&mut self) -> bool {
        if self.state != RowState::Idle {
            return false;
        }
        self.state = RowState::DraggablePrimed;
        true
    }

    /// The pointer was released without dragging.
    pub fn pointer_released(&mut self) {
        if self.state == RowState::DraggablePrimed {
            self.state = RowState::Idle;
        }
    }

    /// The pointer moved far enough to start a drag.
    ///
    /// Returns the payload to carry through the gesture, or `None` if the
    /// grip was not pressed first.
    pub fn drag_started(&mut self) -> Option<DragPayload> {
        if self.state != RowState::DraggablePrimed {
            return None;
        }
        self.state = RowState::Dragging;
        Some(DragPayload::for_task(self.task_id.clone()))
    }

    /// The drag ended, whether or not it was dropped on a target.
    pub fn drag_finished(&mut self) {
        if self.state == RowState::Dragging {
            self.state = RowState::Idle;
        }
    }

    // --- Delete confirmation ---

    /// Opens the delete confirmation with focus on Cancel.
    ///
    /// Returns `false` if another gesture is in progress.
    pub fn request_delete(&mut self) -> bool {
        if self.state != RowState::Idle {
            return false;
        }
        self.state = RowState::PendingDelete {
            focus: ConfirmFocus::Cancel,
        };
        true
    }

    /// Moves focus to the other confirmation button.
    pub fn switch_confirm_focus(&mut self) {
        if let RowState::PendingDelete { focus } = self.state {
            self.state = RowState::PendingDelete {
                focus: focus.toggled(),
            };
        }
    }

    /// Activates the focused confirmation button.
    ///
    /// Returns `None` if the confirmation is not open.
    pub fn activate_confirm(&mut self, store: &mut TaskStore) -> Option<ConfirmOutcome> {
        match self.confirm_focus()? {
            ConfirmFocus::Delete => {
                self.confirm_delete(store);
                Some(ConfirmOutcome::Deleted)
            }
            ConfirmFocus::Cancel => {
                self.cancel_delete();
                Some(ConfirmOutcome::Cancelled)
            }
        }
    }

    /// Deletes the task and closes the confirmation.
    ///
    /// Returns `true` if the store removed the task.
    pub fn confirm_delete(&mut self, store: &mut TaskStore) -> bool {
        if !self.is_pending_delete() {
            return false;
        }
        self.state = RowState::Idle;
        self.edit = None;
        store.delete_task(&self.task_id)
    }

    /// Closes the confirmation without deleting.
    pub fn cancel_delete(&mut self) {
        if self.is_pending_delete() {
            self.state = RowState::Idle;
        }
    }

    // --- Completion ---

    /// Flips the task's completion flag.
    pub fn toggle_completed(&self, store: &mut TaskStore) -> bool {
        store.toggle_completed(&self.task_id)
    }

    // --- Editing ---

    /// Returns `true` while the text is being edited.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// Returns the edit buffer, if editing.
    #[must_use]
    pub fn edit_text(&self) -> Option<&str> {
        self.edit.as_ref().map(|e| e.text.as_str())
    }

    /// Starts editing from the task's current text.
    ///
    /// Does nothing if an edit is already open.
    pub fn begin_edit(&mut self, current_text: &str) {
        if self.edit.is_none() {
            self.edit = Some(EditBuffer {
                original: current_text.to_owned(),
                text: current_text.to_owned(),
            });
        }
    }

    /// Appends a character to the edit buffer.
    pub fn edit_input(&mut self, ch: char) {
        if let Some(edit) = &mut self.edit {
            edit.text.push(ch);
        }
    }

    /// Removes the last character of the edit buffer.
    pub fn edit_backspace(&mut self) {
        if let Some(edit) = &mut self.edit {
            edit.text.pop();
        }
    }

    /// Writes the edited text to the store and closes the edit.
    ///
    /// Unchanged text is not written. Returns `true` if the store changed.
    pub fn commit_edit(&mut self, store: &mut TaskStore) -> bool {
        let Some(edit) = self.edit.take() else {
            return false;
        };
        if edit.text == edit.original {
            debug!(task = %self.task_id, "edit unchanged");
            return false;
        }
        store.update_text(&self.task_id, edit.text)
    }

    /// Closes the edit without writing.
    pub fn discard_edit(&mut self) {
        self.edit = None;
    }
}
