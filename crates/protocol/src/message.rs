//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the TUI input handler and the application state.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions in the TUI.
///
/// These messages are produced by the input handler and consumed by
/// the application state to update the UI.
///
/// # Examples
///
/// ```
/// use ticklist_protocol::Message;
///
/// let msg = Message::NavigateDown;
/// assert!(msg.is_navigation());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move selection up the list.
    NavigateUp,
    /// Move selection down the list.
    NavigateDown,
    /// Escape: close an overlay, leave an input, or clear selection.
    Escape,
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,

    // --- Composer messages ---
    /// Move keyboard focus to the new-task input.
    FocusComposer,
    /// Move keyboard focus back to the task list.
    FocusList,
    /// Submit the current input (composer draft or edit).
    Submit,
    /// Input a character into the focused text field.
    Input {
        /// The character that was input.
        ch: char,
    },
    /// Delete the last character of the focused text field.
    Backspace,

    // --- Row messages ---
    /// Toggle completion of the selected task.
    ToggleCompleted,
    /// Start editing the selected task's text.
    BeginEdit,
    /// Ask to delete the selected task (shows the confirmation).
    RequestDelete,
    /// Confirm the pending delete.
    ConfirmDelete,
    /// Cancel the pending delete.
    CancelDelete,
    /// Move focus between the confirmation's Cancel and Delete buttons.
    SwitchConfirmFocus,
    /// Move the selected task one place up.
    MoveUp,
    /// Move the selected task one place down.
    MoveDown,

    // --- Pointer messages ---
    /// Left button pressed at coordinates (column, row).
    PointerDown {
        /// Column (x coordinate) of the press.
        column: u16,
        /// Row (y coordinate) of the press.
        row: u16,
    },
    /// Pointer moved with the left button held.
    PointerDrag {
        /// Column (x coordinate) of the pointer.
        column: u16,
        /// Row (y coordinate) of the pointer.
        row: u16,
    },
    /// Left button released at coordinates (column, row).
    PointerUp {
        /// Column (x coordinate) of the release.
        column: u16,
        /// Row (y coordinate) of the release.
        row: u16,
    },
}

impl Message {
    /// Returns `true` if this message is a navigation action.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticklist_protocol::Message;
    ///
    /// assert!(Message::NavigateUp.is_navigation());
    /// assert!(!Message::MoveUp.is_navigation());
    /// ```
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(self, Self::NavigateUp | Self::NavigateDown)
    }

    /// Returns `true` if this message should terminate the application.
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message comes from the pointer.
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { .. } | Self::PointerDrag { .. } | Self::PointerUp { .. }
        )
    }
}
