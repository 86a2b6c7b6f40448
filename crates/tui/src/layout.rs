//! Screen layout measurements and hit testing.
//!
//! Rendering and pointer handling both work from [`ScreenLayout`], so a
//! click always lands on the same region that was drawn there.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the header bar in rows.
///
/// The header displays the application title and help cue.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the new-task input, including its border.
pub const COMPOSER_HEIGHT: u16 = 3;

/// Height of the status bar in rows.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Minimum terminal height for useful rendering.
///
/// Composer, status bar, and a task list with room for one row.
/// Below this height, we display a "terminal too small" message.
pub const MIN_HEIGHT: u16 = COMPOSER_HEIGHT + STATUS_BAR_HEIGHT + 3;

/// Minimum terminal height for rendering with header.
///
/// Between `MIN_HEIGHT` and this height the header is hidden to leave
/// room for tasks.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT + 2;

/// Minimum terminal width for useful rendering.
pub const MIN_WIDTH: u16 = 30;

/// Label of the add affordance in the composer.
pub const ADD_BUTTON: &str = "[ Add ]";

/// Width of [`ADD_BUTTON`].
pub const ADD_BUTTON_WIDTH: u16 = 7;

/// Columns before a row's text (selection or drop marker).
pub const ROW_MARKER_WIDTH: u16 = 2;

/// Columns taken by each row action (symbol plus a space).
pub const ROW_ACTION_WIDTH: u16 = 2;

/// Columns taken by the toggle, delete, and grip actions together.
pub const ROW_ACTIONS_WIDTH: u16 = 3 * ROW_ACTION_WIDTH;

/// The part of a task row under a given column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowZone {
    /// The marker and task text.
    Text,
    /// The `✓` completion toggle.
    Toggle,
    /// The `✕` delete action.
    Delete,
    /// The `⋮` drag handle.
    Grip,
}

/// Returns which part of a row `width` columns wide lies at `offset`
/// columns from its left edge.
///
/// # Examples
///
/// ```
/// use ticklist_tui::layout::{row_zone, RowZone};
///
/// assert_eq!(row_zone(0, 40), RowZone::Text);
/// assert_eq!(row_zone(34, 40), RowZone::Toggle);
/// assert_eq!(row_zone(36, 40), RowZone::Delete);
/// assert_eq!(row_zone(39, 40), RowZone::Grip);
/// ```
#[must_use]
pub fn row_zone(offset: u16, width: u16) -> RowZone {
    let actions_start = width.saturating_sub(ROW_ACTIONS_WIDTH);
    if offset < actions_start {
        return RowZone::Text;
    }
    match (offset - actions_start) / ROW_ACTION_WIDTH {
        0 => RowZone::Toggle,
        1 => RowZone::Delete,
        _ => RowZone::Grip,
    }
}

/// The regions of the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Title bar, hidden on short terminals.
    pub header: Option<Rect>,
    /// New-task input box.
    pub composer: Rect,
    /// Bordered task list.
    pub list: Rect,
    /// Key hints.
    pub status: Rect,
}

impl ScreenLayout {
    /// Splits the terminal area into screen regions.
    ///
    /// Returns `None` if the area is below the minimum size.
    #[must_use]
    pub fn compute(area: Rect) -> Option<Self> {
        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            return None;
        }

        let header_height = if area.height >= MIN_HEIGHT_WITH_HEADER {
            HEADER_HEIGHT
        } else {
            0
        };

        let [header, composer, list, status] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Length(COMPOSER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(area);

        Some(Self {
            header: (header_height > 0).then_some(header),
            composer,
            list,
            status,
        })
    }

    /// Area inside the task list border, one task per line.
    #[must_use]
    pub fn list_inner(&self) -> Rect {
        inset(self.list)
    }

    /// Area inside the composer border.
    #[must_use]
    pub fn composer_inner(&self) -> Rect {
        inset(self.composer)
    }

    /// The add affordance, at the right edge of the composer.
    #[must_use]
    pub fn add_button(&self) -> Rect {
        let inner = self.composer_inner();
        let width = ADD_BUTTON_WIDTH.min(inner.width);
        Rect::new(inner.right() - width, inner.y, width, inner.height.min(1))
    }

    /// Number of task rows that fit in the list.
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        usize::from(self.list_inner().height)
    }

    /// Returns the index of the task drawn at screen row `row`, given the
    /// list's scroll offset, or `None` if `row` is outside the list.
    #[must_use]
    pub fn row_index_at(&self, column: u16, row: u16, offset: usize) -> Option<usize> {
        let inner = self.list_inner();
        if !inner.contains((column, row).into()) {
            return None;
        }
        Some(offset + usize::from(row - inner.y))
    }
}

/// Returns `rect` shrunk by one cell on every side.
fn inset(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

/// Creates a centered rectangle within a given area.
///
/// If the requested dimensions exceed the available area, the rectangle
/// will be clamped to fit.
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect::new(x, y, popup_width, popup_height)
}
