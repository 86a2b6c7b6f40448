//! Status bar rendering widget.
//!
//! This module provides the footer line with keybinding hints for the
//! current input mode.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::state::InputMode;

/// Returns the key/action hints shown for an input mode.
#[must_use]
pub fn hints(mode: InputMode) -> &'static [(&'static str, &'static str)] {
    match mode {
        InputMode::List => &[
            ("↑↓", "Select"),
            ("Space", "Toggle"),
            ("e", "Edit"),
            ("d", "Delete"),
            ("Shift+↑↓", "Move"),
            ("Tab", "New"),
            ("?", "Help"),
        ],
        InputMode::Composer => &[
            ("Enter", "Add"),
            ("Tab/Esc", "Tasks"),
            ("Ctrl+C", "Quit"),
        ],
        InputMode::Editing => &[
            ("Enter", "Save"),
            ("Esc", "Discard"),
            ("↑↓", "Save and move"),
        ],
        InputMode::Confirm => &[
            ("←→", "Switch"),
            ("Enter", "Choose"),
            ("y", "Delete"),
            ("n", "Cancel"),
        ],
    }
}

/// Renders the status bar with keybinding hints for `mode`.
///
/// # Layout
///
/// ```text
/// Enter Add  Tab/Esc Tasks  Ctrl+C Quit
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use ticklist_tui::InputMode;
/// use ticklist_tui::widgets::render_status_bar;
///
/// let area = Rect::new(0, 0, 80, 1);
/// let mut buf = Buffer::empty(area);
///
/// render_status_bar(InputMode::List, area, &mut buf);
/// ```
pub fn render_status_bar(mode: InputMode, area: Rect, buf: &mut Buffer) {
    let key_style = Style::default().fg(Color::Yellow);
    let text_style = Style::default().fg(Color::Gray);

    let spans: Vec<Span<'static>> = hints(mode)
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, key_style),
                Span::styled(format!(" {action}  "), text_style),
            ]
        })
        .collect();

    Paragraph::new(Line::from(spans)).render(area, buf);
}
