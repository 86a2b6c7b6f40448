//! Delete confirmation overlay.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::layout::centered_rect;
use crate::row::ConfirmFocus;

const CONFIRM_WIDTH: u16 = 36;
const CONFIRM_HEIGHT: u16 = 7;
const CANCEL_LABEL: &str = "[ Cancel ]";
const DELETE_LABEL: &str = "[ Delete ]";
const BUTTON_WIDTH: u16 = 10;
const BUTTON_GAP: u16 = 2;

/// Screen regions of the confirmation overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmLayout {
    /// The whole popup.
    pub popup: Rect,
    /// The Cancel button.
    pub cancel: Rect,
    /// The Delete button.
    pub delete: Rect,
}

impl ConfirmLayout {
    /// Places the overlay in the middle of `area`.
    #[must_use]
    pub fn compute(area: Rect) -> Self {
        let popup = centered_rect(CONFIRM_WIDTH, CONFIRM_HEIGHT, area);
        let inner_width = popup.width.saturating_sub(2);
        let buttons_width = 2 * BUTTON_WIDTH + BUTTON_GAP;
        let x = popup.x + 1 + inner_width.saturating_sub(buttons_width) / 2;
        let y = popup.y + 4;

        Self {
            popup,
            cancel: Rect::new(x, y, BUTTON_WIDTH, 1).intersection(popup),
            delete: Rect::new(x + BUTTON_WIDTH + BUTTON_GAP, y, BUTTON_WIDTH, 1)
                .intersection(popup),
        }
    }
}

/// Renders the confirmation for deleting the task with text `text`.
///
/// ```text
/// ╭ Delete task ─────────────────────╮
/// │        Delete this task?         │
/// │            "Buy milk"            │
/// │                                  │
/// │      [ Cancel ]  [ Delete ]      │
/// ╰──────────────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use ticklist_tui::row::ConfirmFocus;
/// use ticklist_tui::widgets::render_confirm_overlay;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_confirm_overlay("Buy milk", ConfirmFocus::Cancel, area, &mut buf);
/// ```
pub fn render_confirm_overlay(text: &str, focus: ConfirmFocus, area: Rect, buf: &mut Buffer) {
    let layout = ConfirmLayout::compute(area);
    Clear.render(layout.popup, buf);

    let block = Block::default()
        .title(Span::styled(
            " Delete task ",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightRed));
    let inner = block.inner(layout.popup);
    block.render(layout.popup, buf);

    let quoted = format!("\"{text}\"");
    Paragraph::new(vec![
        Line::from("Delete this task?"),
        Line::from(Span::styled(quoted, Style::default().fg(Color::White))),
    ])
    .alignment(Alignment::Center)
    .render(inner, buf);

    let (cancel_style, delete_style) = match focus {
        ConfirmFocus::Cancel => (focused_style(Color::White), idle_style()),
        ConfirmFocus::Delete => (idle_style(), focused_style(Color::LightRed)),
    };
    for (button, label, style) in [
        (layout.cancel, CANCEL_LABEL, cancel_style),
        (layout.delete, DELETE_LABEL, delete_style),
    ] {
        if !button.is_empty() {
            buf.set_stringn(button.x, button.y, label, usize::from(button.width), style);
        }
    }
}

fn focused_style(color: Color) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(color)
        .add_modifier(Modifier::BOLD)
}

fn idle_style() -> Style {
    Style::default().fg(Color::Gray)
}
