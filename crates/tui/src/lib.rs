//! Terminal UI for ticklist.
//!
//! This crate provides a Ratatui-based editor for a single list of tasks:
//! a composer for new tasks, one row per task with completion, inline
//! editing, confirmed deletion, and drag-and-drop reordering.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct and run loop
//! - [`state`]: Application state, focus, and selection
//! - [`row`]: Per-task interaction state machine
//! - [`composer`]: New-task draft handling
//! - [`layout`]: Screen regions and pointer hit-testing
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`event`]: Event handling and key mappings
//! - [`widgets`]: Rendering functions
//!
//! # Example
//!
//! ```no_run
//! use ticklist_protocol::TaskStore;
//! use ticklist_tui::{App, terminal};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::new(TaskStore::new());
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod composer;
pub mod event;
pub mod layout;
pub mod row;
pub mod state;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::App;
pub use composer::Composer;
pub use row::{ConfirmFocus, RowController, RowState};
pub use state::{AppState, Focus, InputMode};
