//! Task list rendering.
//!
//! Each task takes one line:
//!
//! ```text
//! › Buy milk                            ✓ ✕ ⋮
//! ```
//!
//! The leading marker shows the selection, or where a dragged task would
//! land. The trailing actions line up with [`row_zone`](crate::layout::row_zone)
//! so pointer hit testing matches what is drawn.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use ticklist_protocol::{DropSide, Task};

use crate::layout::{ROW_ACTION_WIDTH, ROW_ACTIONS_WIDTH, ROW_MARKER_WIDTH};
use crate::row::RowState;

use super::tail;

/// Everything needed to draw one task row.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    /// The task being drawn.
    pub task: &'a Task,
    /// Whether the row is selected.
    pub selected: bool,
    /// The row's drag/delete state.
    pub state: RowState,
    /// The edit buffer, if the text is being edited.
    pub edit_text: Option<&'a str>,
    /// Where the dragged task would land relative to this row, if it is
    /// the current drop target.
    pub drop_side: Option<DropSide>,
}

impl<'a> RowView<'a> {
    /// Creates an unselected, idle view of a task.
    #[must_use]
    pub fn new(task: &'a Task) -> Self {
        Self {
            task,
            selected: false,
            state: RowState::Idle,
            edit_text: None,
            drop_side: None,
        }
    }
}

/// Renders a single task row into a one-line area.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use ticklist_protocol::Task;
/// use ticklist_tui::widgets::{RowView, render_task_row};
///
/// let task = Task::with_id("a", "Buy milk");
/// let area = Rect::new(0, 0, 30, 1);
/// let mut buf = Buffer::empty(area);
///
/// render_task_row(&RowView::new(&task), area, &mut buf);
/// ```
pub fn render_task_row(row: &RowView<'_>, area: Rect, buf: &mut Buffer) {
    if area.height == 0 || area.width <= ROW_MARKER_WIDTH + ROW_ACTIONS_WIDTH {
        return;
    }
    let y = area.y;

    let base = if row.selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    buf.set_style(Rect::new(area.x, y, area.width, 1), base);

    let marker = match (row.drop_side, row.selected) {
        (Some(DropSide::Before), _) => "▲ ",
        (Some(DropSide::After), _) => "▼ ",
        (None, true) => "› ",
        (None, false) => "  ",
    };
    buf.set_string(area.x, y, marker, base.fg(Color::Cyan));

    let text_x = area.x + ROW_MARKER_WIDTH;
    let text_width = area.width - ROW_MARKER_WIDTH - ROW_ACTIONS_WIDTH - 1;
    match row.edit_text {
        Some(edit) => {
            let shown = tail(edit, usize::from(text_width).saturating_sub(1));
            let (end_x, _) = buf.set_stringn(
                text_x,
                y,
                shown,
                usize::from(text_width),
                base.fg(Color::Yellow),
            );
            buf.set_string(end_x, y, "▏", base.fg(Color::Yellow));
        }
        None => {
            buf.set_stringn(
                text_x,
                y,
                &row.task.text,
                usize::from(text_width),
                text_style(row, base),
            );
        }
    }

    let actions_x = area.right() - ROW_ACTIONS_WIDTH;
    let toggle_style = if row.task.is_completed() {
        base.fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        base.fg(Color::Gray)
    };
    let grip_style = match row.state {
        RowState::DraggablePrimed | RowState::Dragging => {
            base.fg(Color::Cyan).add_modifier(Modifier::BOLD)
        }
        _ => base.fg(Color::Gray),
    };
    buf.set_string(actions_x, y, "✓", toggle_style);
    buf.set_string(actions_x + ROW_ACTION_WIDTH, y, "✕", base.fg(Color::Red));
    buf.set_string(actions_x + 2 * ROW_ACTION_WIDTH, y, "⋮", grip_style);
}

fn text_style(row: &RowView<'_>, base: Style) -> Style {
    let style = if row.task.is_completed() {
        base.fg(Color::Green).add_modifier(Modifier::CROSSED_OUT)
    } else {
        base.fg(Color::White)
    };
    match row.state {
        RowState::Dragging => style.add_modifier(Modifier::ITALIC | Modifier::DIM),
        RowState::PendingDelete { .. } => style.fg(Color::Red),
        _ => style,
    }
}

/// Renders the bordered task list.
///
/// `rows` holds every task in order; only those from `offset` onwards that
/// fit are drawn. The border is highlighted when the list has focus.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use ticklist_protocol::Task;
/// use ticklist_tui::widgets::{RowView, render_task_list};
///
/// let tasks = [Task::with_id("a", "Buy milk"), Task::with_id("b", "Walk dog")];
/// let rows: Vec<_> = tasks.iter().map(RowView::new).collect();
///
/// let area = Rect::new(0, 0, 40, 6);
/// let mut buf = Buffer::empty(area);
/// render_task_list(&rows, 0, true, area, &mut buf);
/// ```
pub fn render_task_list(
    rows: &[RowView<'_>],
    offset: usize,
    focused: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    let remaining = rows.iter().filter(|r| !r.task.is_completed()).count();
    let title = format!(" Tasks ({remaining}/{}) ", rows.len());
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    block.render(area, buf);

    if rows.is_empty() {
        Paragraph::new("No tasks yet. Type one above and press Enter.")
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center)
            .render(inner, buf);
        return;
    }

    for (line, row) in rows
        .iter()
        .skip(offset)
        .take(usize::from(inner.height))
        .enumerate()
    {
        // `line` is bounded by `inner.height`.
        let y = inner.y + line as u16;
        render_task_row(row, Rect::new(inner.x, y, inner.width, 1), buf);
    }
}
