//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to application messages. Key bindings depend on the current
//! [`InputMode`]: text fields capture printable characters, while the list
//! uses them as commands.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ticklist_protocol::Message;

use crate::state::InputMode;

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts an event (keyboard or mouse) to an application message.
///
/// Returns `Some(Message)` if the event maps to an action,
/// or `None` if the event is not handled.
#[must_use]
pub fn event_to_message(event: &Event, mode: InputMode) -> Option<Message> {
    match event {
        Event::Key(key) => key_to_message(*key, mode),
        Event::Mouse(mouse) => mouse_to_message(mouse),
        _ => None,
    }
}

/// Converts a mouse event to an application message.
///
/// Only the left button is handled.
#[must_use]
fn mouse_to_message(mouse: &MouseEvent) -> Option<Message> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::PointerDown { column, row }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Message::PointerDrag { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(Message::PointerUp { column, row }),
        _ => None,
    }
}

/// Converts a terminal key event to an application message.
///
/// Returns `Some(Message)` if the key event maps to an action,
/// or `None` if the key is not bound. `Ctrl+C` quits in every mode.
///
/// # Key Bindings (List Mode)
///
/// | Key | Action |
/// |-----|--------|
/// | `Up` / `Down` | Select previous / next task |
/// | `Shift+Up` / `Shift+Down` | Move task up / down |
/// | `Space` | Toggle completed |
/// | `Enter` or `e` | Edit text |
/// | `d` or `Delete` | Delete (asks first) |
/// | `Tab` or `a` | Focus the new-task input |
/// | `Esc` | Clear selection |
/// | `?` | Toggle help |
///
/// # Key Bindings (Composer and Editing Modes)
///
/// | Key | Action |
/// |-----|--------|
/// | Any char | Input |
/// | `Backspace` | Delete last character |
/// | `Enter` | Add task / save edit |
/// | `Tab`, `Esc`, `Down` | Back to the list (composer) |
/// | `Tab`, `Up`, `Down` | Save edit and move (editing) |
/// | `Esc` | Discard edit (editing) |
///
/// # Key Bindings (Confirm Mode)
///
/// | Key | Action |
/// |-----|--------|
/// | `Tab`, `Left`, `Right` | Switch between Cancel and Delete |
/// | `Enter` | Activate the focused button |
/// | `y` | Delete |
/// | `n` or `Esc` | Cancel |
#[must_use]
pub fn key_to_message(key: KeyEvent, mode: InputMode) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Message::Quit);
    }

    match mode {
        InputMode::List => list_key(key),
        InputMode::Composer => match key.code {
            KeyCode::Enter => Some(Message::Submit),
            KeyCode::Tab | KeyCode::Esc | KeyCode::Down => Some(Message::FocusList),
            KeyCode::Backspace => Some(Message::Backspace),
            KeyCode::Char(ch) => Some(Message::Input { ch }),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Enter | KeyCode::Tab => Some(Message::Submit),
            KeyCode::Esc => Some(Message::Escape),
            KeyCode::Up => Some(Message::NavigateUp),
            KeyCode::Down => Some(Message::NavigateDown),
            KeyCode::Backspace => Some(Message::Backspace),
            KeyCode::Char(ch) => Some(Message::Input { ch }),
            _ => None,
        },
        InputMode::Confirm => match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                Some(Message::SwitchConfirmFocus)
            }
            KeyCode::Enter => Some(Message::Submit),
            KeyCode::Char('y' | 'Y') => Some(Message::ConfirmDelete),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Message::CancelDelete),
            _ => None,
        },
    }
}

fn list_key(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        match key.code {
            KeyCode::Up => return Some(Message::MoveUp),
            KeyCode::Down => return Some(Message::MoveDown),
            _ => {}
        }
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),
        KeyCode::Char(' ') => Some(Message::ToggleCompleted),
        KeyCode::Enter | KeyCode::Char('e') => Some(Message::BeginEdit),
        KeyCode::Char('d') | KeyCode::Delete => Some(Message::RequestDelete),
        KeyCode::Tab | KeyCode::Char('a') => Some(Message::FocusComposer),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        _ => None,
    }
}
