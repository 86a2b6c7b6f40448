//! Widget components for the ticklist TUI.
//!
//! Each widget is a plain function that renders state into a buffer, which
//! keeps rendering easy to test and compose.
//!
//! # Modules
//!
//! - [`task_list`]: The bordered list and its one-line task rows
//! - [`composer`]: The new-task input and add affordance
//! - [`confirm`]: The delete confirmation overlay
//! - [`help`]: The keybinding overlay
//! - [`status_bar`]: The footer with context key hints
//!
//! # Example
//!
//! ```
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use ticklist_protocol::Task;
//! use ticklist_tui::widgets::{self, RowView};
//!
//! let task = Task::with_id("a", "Example");
//! let area = Rect::new(0, 0, 40, 5);
//! let mut buf = Buffer::empty(area);
//!
//! widgets::render_task_list(&[RowView::new(&task)], 0, true, area, &mut buf);
//! ```

pub mod composer;
pub mod confirm;
pub mod help;
pub mod status_bar;
pub mod task_list;

pub use composer::render_composer;
pub use confirm::{ConfirmLayout, render_confirm_overlay};
pub use help::render_help_overlay;
pub use status_bar::render_status_bar;
pub use task_list::{RowView, render_task_list, render_task_row};

/// Returns the longest suffix of `text` with at most `max` characters.
///
/// Text inputs show the end of their content so the cursor stays visible.
fn tail(text: &str, max: usize) -> &str {
    let count = text.chars().count();
    if count <= max {
        return text;
    }
    text.char_indices()
        .nth(count - max)
        .map_or("", |(idx, _)| &text[idx..])
}
