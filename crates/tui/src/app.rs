//! Main application struct and run loop.
//!
//! This module provides the `App` struct which orchestrates the TUI
//! application lifecycle including event handling, state updates, and rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use ticklist_protocol::{Message, TaskId, TaskStore, drop_side};
use tracing::{debug, info};

use crate::{
    AppState, Focus, InputMode,
    event::{event_to_message, poll_event},
    layout::{MIN_HEIGHT, MIN_WIDTH, RowZone, ScreenLayout, row_zone},
    terminal::AppTerminal,
    widgets::{
        ConfirmLayout, RowView, render_composer, render_confirm_overlay, render_help_overlay,
        render_status_bar, render_task_list,
    },
};

/// The main application struct.
///
/// Manages the application state and provides the main event loop.
#[derive(Debug)]
pub struct App {
    state: AppState,
    should_quit: bool,
    /// Last known terminal area, used for pointer hit-testing.
    last_area: Rect,
}

impl App {
    /// Creates a new application around the given task store.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticklist_protocol::TaskStore;
    /// use ticklist_tui::App;
    ///
    /// let app = App::new(TaskStore::new());
    /// assert!(!app.should_quit());
    /// ```
    #[must_use]
    pub fn new(store: TaskStore) -> Self {
        Self {
            state: AppState::new(store),
            should_quit: false,
            last_area: Rect::default(),
        }
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns `true` once the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Consumes the application, returning its task store.
    #[must_use]
    pub fn into_store(self) -> TaskStore {
        self.state.store
    }

    /// Updates the application state based on a message.
    ///
    /// When the help overlay is visible, most messages are intercepted to
    /// dismiss the help instead of their normal action. Only `Quit` and
    /// `ToggleHelp` work normally when help is shown.
    pub fn update(&mut self, msg: Message) {
        if msg.is_terminating() {
            self.should_quit = true;
            return;
        }

        if self.state.help_visible {
            match msg {
                Message::ToggleHelp | Message::Escape => self.state.toggle_help(),
                // Pointer movement alone should not close help.
                Message::PointerDrag { .. } => {}
                Message::PointerUp { .. } => self.state.cancel_pointer(),
                _ => {
                    let _ = self.state.dismiss_help();
                }
            }
            return;
        }

        match self.state.input_mode() {
            InputMode::Confirm => self.update_confirm(msg),
            InputMode::Editing => self.update_editing(msg),
            InputMode::Composer => self.update_composer(msg),
            InputMode::List => self.update_list(msg),
        }
    }

    fn update_list(&mut self, msg: Message) {
        match msg {
            Message::NavigateUp => self.state.navigate_up(),
            Message::NavigateDown => self.state.navigate_down(),
            Message::Escape => self.state.clear_selection(),
            Message::ToggleHelp => self.state.toggle_help(),
            Message::FocusComposer => self.state.focus_composer(),
            Message::FocusList => self.state.focus_list(),
            Message::ToggleCompleted => {
                self.state.toggle_selected();
            }
            Message::BeginEdit => {
                self.state.begin_edit_selected();
            }
            Message::RequestDelete => {
                self.state.request_delete_selected();
            }
            Message::MoveUp => {
                self.state.move_selected(true);
            }
            Message::MoveDown => {
                self.state.move_selected(false);
            }
            msg if msg.is_pointer() => self.handle_pointer(msg),
            _ => {}
        }
    }

    fn update_composer(&mut self, msg: Message) {
        match msg {
            Message::Input { ch } => self.state.composer.insert(ch),
            Message::Backspace => self.state.composer.backspace(),
            Message::Submit => {
                if let Some(id) = self.state.submit_composer() {
                    info!(task = %id, "task added");
                }
            }
            Message::FocusList | Message::Escape | Message::NavigateDown => {
                self.state.focus_list();
            }
            msg if msg.is_pointer() => self.handle_pointer(msg),
            _ => {}
        }
    }

    fn update_editing(&mut self, msg: Message) {
        match msg {
            Message::Input { ch } => self.state.edit_input(ch),
            Message::Backspace => self.state.edit_backspace(),
            Message::Submit => {
                self.state.commit_edit();
            }
            Message::Escape => self.state.discard_edit(),
            Message::NavigateUp => self.state.navigate_up(),
            Message::NavigateDown => self.state.navigate_down(),
            msg if msg.is_pointer() => self.handle_pointer(msg),
            _ => {}
        }
    }

    fn update_confirm(&mut self, msg: Message) {
        match msg {
            Message::SwitchConfirmFocus => self.state.switch_confirm_focus(),
            Message::Submit => {
                if let Some(outcome) = self.state.activate_confirm() {
                    debug!(?outcome, "delete confirmation closed");
                }
            }
            Message::ConfirmDelete => {
                self.state.confirm_delete();
            }
            Message::CancelDelete | Message::Escape => self.state.cancel_delete(),
            Message::PointerUp { .. } => self.state.cancel_pointer(),
            Message::PointerDown { column, row } => {
                let layout = ConfirmLayout::compute(self.last_area);
                let position = Position::new(column, row);
                if layout.delete.contains(position) {
                    self.state.confirm_delete();
                } else if layout.cancel.contains(position) {
                    self.state.cancel_delete();
                }
            }
            _ => {}
        }
    }

    /// Handles pointer presses, drags, and releases outside overlays.
    fn handle_pointer(&mut self, msg: Message) {
        let Some(layout) = ScreenLayout::compute(self.last_area) else {
            return;
        };

        match msg {
            Message::PointerDown { column, row } => self.pointer_down(&layout, column, row),
            Message::PointerDrag { column, row } => {
                let target = self.task_at(&layout, column, row);
                self.state.drag_over(target);
            }
            Message::PointerUp { column, row } => {
                let target = self.task_at(&layout, column, row);
                if self.state.release_pointer(target) {
                    info!("task moved");
                }
            }
            _ => {}
        }
    }

    fn pointer_down(&mut self, layout: &ScreenLayout, column: u16, row: u16) {
        let position = Position::new(column, row);

        if layout.add_button().contains(position) {
            self.state.commit_edit();
            self.state.focus = Focus::Composer;
            if let Some(id) = self.state.submit_composer() {
                info!(task = %id, "task added");
            }
            return;
        }
        if layout.composer_inner().contains(position) {
            self.state.focus_composer();
            return;
        }

        let Some(index) = layout.row_index_at(column, row, self.state.list_offset) else {
            return;
        };
        let Some(id) = self.state.task_id_at(index) else {
            // Empty space below the last task.
            self.state.focus_list();
            return;
        };

        let inner = layout.list_inner();
        let zone = row_zone(column - inner.x, inner.width);
        if zone != RowZone::Text && self.state.editing().is_some_and(|r| r.task_id() == &id) {
            // Acting on the row being edited saves the edit first.
            self.state.commit_edit();
        }
        self.state.select(index);
        match zone {
            RowZone::Text => {}
            RowZone::Toggle => {
                self.state.toggle_completed(&id);
            }
            RowZone::Delete => {
                self.state.request_delete(&id);
            }
            RowZone::Grip => {
                self.state.press_grip(&id);
            }
        }
    }

    fn task_at(&self, layout: &ScreenLayout, column: u16, row: u16) -> Option<TaskId> {
        layout
            .row_index_at(column, row, self.state.list_offset)
            .and_then(|index| self.state.task_id_at(index))
    }

    /// Renders the application UI to the given frame.
    ///
    /// Implements graceful degradation for small terminal sizes:
    /// - If terminal is below minimum dimensions, shows a "terminal too small" message.
    /// - If terminal is short, hides the header to leave room for tasks.
    /// - Otherwise, renders normally with header.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.last_area = area;

        let Some(layout) = ScreenLayout::compute(area) else {
            render_terminal_too_small(frame, area);
            return;
        };

        if let Some(header) = layout.header {
            self.render_header(frame, header);
        }

        self.state.ensure_visible(layout.visible_rows());
        let mode = self.state.input_mode();
        let rows = self.row_views();

        let buf = frame.buffer_mut();
        render_composer(
            self.state.composer.draft(),
            mode == InputMode::Composer,
            layout.composer,
            buf,
        );
        render_task_list(
            &rows,
            self.state.list_offset,
            self.state.focus == Focus::List,
            layout.list,
            buf,
        );
        render_status_bar(mode, layout.status, buf);

        if let (Some(row), Some(focus)) = (self.state.pending_delete(), self.state.confirm_focus())
        {
            let text = self
                .state
                .store
                .get(row.task_id())
                .map_or("", |t| t.text.as_str());
            render_confirm_overlay(text, focus, area, buf);
        }

        if self.state.help_visible {
            render_help_overlay(area, buf);
        }
    }

    /// Builds the per-row view data in task order.
    fn row_views(&self) -> Vec<RowView<'_>> {
        let tasks = self.state.store.tasks();
        let drag = self.state.drag();
        let show_selection = self.state.focus == Focus::List;

        tasks
            .iter()
            .enumerate()
            .map(|(index, task)| {
                let row = self.state.row(&task.id);
                let drop_side = drag
                    .filter(|d| d.hovered() == Some(&task.id))
                    .and_then(|d| drop_side(tasks, d.dragged(), &task.id));
                RowView {
                    task,
                    selected: show_selection && self.state.selected == Some(index),
                    state: self.state.row_state(&task.id),
                    edit_text: row.and_then(|r| r.edit_text()),
                    drop_side,
                }
            })
            .collect()
    }

    /// Renders the header bar with title, progress, and help cue.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, help_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(17), // "Press ? for help" = 16 chars + padding
        ])
        .areas(inner);

        let tasks = self.state.store.tasks();
        let done = tasks.iter().filter(|t| t.is_completed()).count();
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "ticklist",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled(
                format!("{done} of {} done", tasks.len()),
                Style::default().fg(Color::White),
            ),
        ]));
        frame.render_widget(title, title_area);

        let help_cue = Paragraph::new(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" for help", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(help_cue, help_area);
    }

    /// Runs the main application loop.
    ///
    /// This function blocks until the user quits the application.
    /// It polls for events, updates state, and renders the UI.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ticklist_protocol::TaskStore;
    /// use ticklist_tui::{App, terminal};
    ///
    /// #[tokio::main(flavor = "current_thread")]
    /// async fn main() -> anyhow::Result<()> {
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(TaskStore::new());
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| self.view(frame))?;

            if let Some(event) = poll_event()? {
                let mode = if self.state.help_visible {
                    InputMode::List
                } else {
                    self.state.input_mode()
                };
                if let Some(msg) = event_to_message(&event, mode) {
                    self.update(msg);
                }
            }

            if self.should_quit {
                break;
            }
            tokio::task::yield_now().await;
        }

        Ok(())
    }
}

/// Renders a message indicating the terminal is too small.
fn render_terminal_too_small(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: false });

    let vertical_offset = area.height.saturating_sub(2) / 2;
    let centered_area = Rect {
        x: area.x,
        y: area.y + vertical_offset,
        width: area.width,
        height: area.height.saturating_sub(vertical_offset),
    };

    frame.render_widget(paragraph, centered_area);
}
