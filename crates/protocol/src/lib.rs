//! Shared protocol types for the ticklist application.
//!
//! This crate defines the core types used across all ticklist components:
//! the task model, the authoritative task store, drag-and-drop reordering,
//! TUI messages, and error types.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`task`]: Task identifiers, the `Task` struct, and the persisted `TaskList`
//! - [`store`]: The `TaskStore` and its change observers
//! - [`reorder`]: Drop-order computation and drag sessions
//! - [`message`]: TUI event messages
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! Adding tasks and reordering them with a drag gesture:
//!
//! ```
//! use ticklist_protocol::{DragPayload, DragSession, TaskStore};
//!
//! let mut store = TaskStore::new();
//! let milk = store.add_task("Buy milk").unwrap();
//! let bread = store.add_task("Buy bread").unwrap();
//! assert_eq!(store.tasks()[0].id, bread);
//!
//! // Drag "Buy bread" below "Buy milk".
//! let drag = DragSession::begin(DragPayload::for_task(bread.clone()));
//! drag.commit(&mut store, &milk);
//! assert_eq!(store.tasks()[0].id, milk);
//! ```

pub mod error;
pub mod message;
pub mod reorder;
pub mod store;
pub mod task;

// Re-export primary types at crate root for convenience
pub use error::{ProtocolError, Result};
pub use message::Message;
pub use reorder::{
    DRAG_PAYLOAD_KEY, DragPayload, DragSession, DropSide, apply_drop, compute_drop_order,
    drop_side,
};
pub use store::{StoreEvent, StoreObserver, SubscriptionId, TaskStore};
pub use task::{Task, TaskId, TaskList};
