//! Help overlay widget.
//!
//! This module provides the help overlay that displays all available keybindings
//! when the user presses `?`.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::layout::centered_rect;

/// The width of the help overlay panel.
const HELP_WIDTH: u16 = 42;

/// Key column width inside the help panel.
const KEY_COLUMN: usize = 13;

/// Sections of the help panel: a heading followed by key/description pairs.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Tasks",
        &[
            ("↑ ↓", "Select previous / next"),
            ("Space", "Toggle completed"),
            ("Enter, e", "Edit text"),
            ("d, Delete", "Delete task"),
            ("Shift+↑ ↓", "Move task up / down"),
            ("Tab, a", "New task"),
        ],
    ),
    (
        "Typing",
        &[
            ("Enter", "Add task / save edit"),
            ("Esc", "Leave input / discard edit"),
        ],
    ),
    (
        "Mouse",
        &[
            ("drag ⋮", "Reorder"),
            ("click ✓ ✕", "Toggle / delete"),
        ],
    ),
    (
        "General",
        &[("?", "Toggle help"), ("Ctrl+C", "Quit")],
    ),
];

/// Renders a centered help overlay displaying all keybindings.
///
/// The overlay is rendered on top of the existing content, clearing the
/// area behind it first.
///
/// # Layout
///
/// ```text
/// ╭ Help ──────────────────────────────────╮
/// │                                        │
/// │  Tasks                                 │
/// │  ↑ ↓          Select previous / next   │
/// │  Space        Toggle completed         │
/// │  ...                                   │
/// │                                        │
/// │  Press any key to close                │
/// ╰────────────────────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use ticklist_tui::widgets::render_help_overlay;
///
/// let area = Rect::new(0, 0, 80, 30);
/// let mut buf = Buffer::empty(area);
///
/// render_help_overlay(area, &mut buf);
/// ```
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let lines = build_help_lines();
    // Content plus top and bottom border.
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let popup_area = centered_rect(HELP_WIDTH, height, area);

    Clear.render(popup_area, buf);

    let help_block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightYellow));

    Paragraph::new(lines)
        .block(help_block)
        .alignment(Alignment::Left)
        .render(popup_area, buf);
}

/// Builds the lines of help content.
fn build_help_lines() -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Green);
    let text_style = Style::default().fg(Color::White);
    let hint_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    let mut lines = Vec::new();
    for (heading, bindings) in SECTIONS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {heading}"), header_style)));
        for (key, description) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<KEY_COLUMN$}"), key_style),
                Span::styled(*description, text_style),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Press any key to close", hint_style)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn help_text() -> String {
        build_help_lines()
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn render_help_overlay_creates_output() {
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);

        render_help_overlay(area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("Help"));
        assert!(content.contains("Tasks"));
        assert!(content.contains("Press any key to close"));
    }

    #[test]
    fn render_help_overlay_handles_small_area() {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);

        render_help_overlay(area, &mut buf);
    }

    #[test]
    fn build_help_lines_contains_all_keybindings() {
        let content = help_text();

        for key in ["↑ ↓", "Space", "Enter", "Delete", "Shift+↑ ↓", "Tab", "Esc", "Ctrl+C", "?"] {
            assert!(content.contains(key), "missing {key}");
        }
        assert!(content.contains("⋮"));
    }

    #[test]
    fn keys_are_aligned() {
        let content = help_text();
        let space_line = content
            .lines()
            .find(|l| l.trim_start().starts_with("Space"))
            .unwrap();
        assert_eq!(space_line, "  Space        Toggle completed");
    }
}
