//! New-task input rendering.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::layout::{ADD_BUTTON, ADD_BUTTON_WIDTH};

use super::tail;

const PLACEHOLDER: &str = "What needs to be done?";

/// Renders the composer box with its draft and the add affordance.
///
/// ```text
/// ╭ New task ──────────────────────────────╮
/// │Buy milk▏                        [ Add ]│
/// ╰────────────────────────────────────────╯
/// ```
///
/// The add affordance is dimmed while the draft is blank, since submitting
/// it would do nothing.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use ticklist_tui::widgets::render_composer;
///
/// let area = Rect::new(0, 0, 40, 3);
/// let mut buf = Buffer::empty(area);
///
/// render_composer("Buy milk", true, area, &mut buf);
/// ```
pub fn render_composer(draft: &str, focused: bool, area: Rect, buf: &mut Buffer) {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .title(Span::styled(
            " New task ",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height == 0 || inner.width <= ADD_BUTTON_WIDTH {
        return;
    }

    let input_width = usize::from(inner.width - ADD_BUTTON_WIDTH - 1);
    let mut x = inner.x;
    if focused {
        let shown = tail(draft, input_width.saturating_sub(1));
        (x, _) = buf.set_stringn(x, inner.y, shown, input_width, Style::default());
        buf.set_string(x, inner.y, "▏", Style::default().fg(Color::Cyan));
        x += 1;
    } else {
        (x, _) = buf.set_stringn(x, inner.y, draft, input_width, Style::default());
    }

    if draft.is_empty() {
        let remaining = input_width.saturating_sub(usize::from(x - inner.x));
        buf.set_stringn(
            x,
            inner.y,
            PLACEHOLDER,
            remaining,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        );
    }

    let button_style = if draft.trim().is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };
    buf.set_string(inner.right() - ADD_BUTTON_WIDTH, inner.y, ADD_BUTTON, button_style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(draft: &str, focused: bool) -> Buffer {
        let area = Rect::new(0, 0, 32, 3);
        let mut buf = Buffer::empty(area);
        render_composer(draft, focused, area, &mut buf);
        buf
    }

    #[test]
    fn empty_unfocused_shows_placeholder() {
        insta::assert_snapshot!(buffer_to_string(&render("", false)), @r"
        ╭ New task ────────────────────╮
        │What needs to be done? [ Add ]│
        ╰──────────────────────────────╯
        ");
    }

    #[test]
    fn focused_draft_has_cursor() {
        insta::assert_snapshot!(buffer_to_string(&render("Buy milk", true)), @r"
        ╭ New task ────────────────────╮
        │Buy milk▏              [ Add ]│
        ╰──────────────────────────────╯
        ");
    }

    #[test]
    fn long_draft_shows_its_end_while_typing() {
        let buf = render("a fairly long task that overflows", true);
        let line = buffer_to_string(&buf).lines().nth(1).unwrap().to_string();
        assert!(line.contains("overflows▏"), "{line}");
    }

    #[test]
    fn add_button_dimmed_when_blank() {
        let area_x = 32 - 1 - ADD_BUTTON_WIDTH;

        let buf = render("   ", true);
        assert_eq!(buf[(area_x, 1)].fg, Color::DarkGray);

        let buf = render("task", true);
        assert_eq!(buf[(area_x, 1)].fg, Color::Green);
    }
}
