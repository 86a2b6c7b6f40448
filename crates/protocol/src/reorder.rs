//! Drag-and-drop reordering.
//!
//! A drag gesture is modelled as three explicit steps so that the ordering
//! logic does not depend on any input device:
//!
//! 1. [`DragSession::begin`] with the [`DragPayload`] produced by the row
//!    that started the drag.
//! 2. [`DragSession::hover_target`] any number of times while the pointer
//!    moves. Hovering only records the target; it never touches the store.
//! 3. [`DragSession::commit`] when the drop happens, which computes the new
//!    order with [`compute_drop_order`] and applies it to the store.
//!
//! The insertion side is decided from the original indices alone: a task
//! dragged downward lands after the target, a task dragged upward lands
//! before it. Pointer position within the target row plays no part.

use tracing::debug;

use crate::store::TaskStore;
use crate::task::{Task, TaskId};

/// Key under which the dragged task's ID travels with the gesture.
pub const DRAG_PAYLOAD_KEY: &str = "task-id";

/// The data carried from the drag source to the drop target.
///
/// Only the task ID crosses the gesture boundary, never the task content,
/// so a drop always acts on the store's current state.
///
/// # Examples
///
/// ```
/// use ticklist_protocol::{DragPayload, TaskId, DRAG_PAYLOAD_KEY};
///
/// let payload = DragPayload::for_task(TaskId::from("a"));
/// assert_eq!(payload.get(DRAG_PAYLOAD_KEY), Some(&TaskId::from("a")));
/// assert_eq!(payload.get("text/plain"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    task_id: TaskId,
}

impl DragPayload {
    /// Creates the payload for dragging the given task.
    #[must_use]
    pub fn for_task(task_id: TaskId) -> Self {
        Self { task_id }
    }

    /// Looks up a value by key, returning `None` for unknown keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TaskId> {
        (key == DRAG_PAYLOAD_KEY).then_some(&self.task_id)
    }

    /// Returns the dragged task's ID.
    #[must_use]
    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }
}

/// Where the dragged task lands relative to the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSide {
    /// Directly above the target.
    Before,
    /// Directly below the target.
    After,
}

/// Decides on which side of `target` the dragged task would land.
///
/// Returns `None` if either task is missing or both are the same task.
#[must_use]
pub fn drop_side(tasks: &[Task], dragged: &TaskId, target: &TaskId) -> Option<DropSide> {
    if dragged == target {
        return None;
    }
    let dragged_index = tasks.iter().position(|t| &t.id == dragged)?;
    let target_index = tasks.iter().position(|t| &t.id == target)?;
    Some(if dragged_index > target_index {
        DropSide::Before
    } else {
        DropSide::After
    })
}

/// Computes the task order that results from dropping `dragged` onto `target`.
///
/// Returns `None` when there is nothing to do: the dragged task vanished
/// (for example it was deleted mid-gesture), the target vanished, or the
/// task was dropped onto itself.
///
/// # Examples
///
/// ```
/// use ticklist_protocol::{compute_drop_order, Task, TaskId};
///
/// let tasks = vec![Task::with_id("a", "A"), Task::with_id("b", "B"), Task::with_id("c", "C")];
///
/// // Dragging downward lands after the target.
/// let order = compute_drop_order(&tasks, &"a".into(), &"c".into()).unwrap();
/// assert_eq!(order, vec![TaskId::from("b"), "c".into(), "a".into()]);
///
/// // Dragging upward lands before it.
/// let order = compute_drop_order(&tasks, &"c".into(), &"a".into()).unwrap();
/// assert_eq!(order, vec![TaskId::from("c"), "a".into(), "b".into()]);
/// ```
#[must_use]
pub fn compute_drop_order(
    tasks: &[Task],
    dragged: &TaskId,
    target: &TaskId,
) -> Option<Vec<TaskId>> {
    let dragged_index = tasks.iter().position(|t| &t.id == dragged)?;

    let mut rest: Vec<TaskId> = tasks
        .iter()
        .filter(|t| &t.id != dragged)
        .map(|t| t.id.clone())
        .collect();
    let target_index = rest.iter().position(|id| id == target)?;

    let insert_at = if dragged_index > target_index {
        target_index
    } else {
        target_index + 1
    };
    rest.insert(insert_at, dragged.clone());
    Some(rest)
}

/// Applies a drop of `dragged` onto `target` to the store.
///
/// Returns `true` if the store's order changed.
pub fn apply_drop(store: &mut TaskStore, dragged: &TaskId, target: &TaskId) -> bool {
    let Some(order) = compute_drop_order(store.tasks(), dragged, target) else {
        debug!(%dragged, %target, "drop has no effect");
        return false;
    };
    store.reorder(&order)
}

/// An in-progress drag gesture.
///
/// # Examples
///
/// ```
/// use ticklist_protocol::{DragPayload, DragSession, TaskList, Task, TaskStore};
///
/// let mut store = TaskStore::hydrate(TaskList {
///     tasks: vec![Task::with_id("a", "A"), Task::with_id("b", "B"), Task::with_id("c", "C")],
/// });
///
/// let mut drag = DragSession::begin(DragPayload::for_task("c".into()));
/// drag.hover_target("b".into());
/// drag.hover_target("a".into());
/// // Hovering never reorders.
/// assert_eq!(store.tasks()[0].id.as_str(), "a");
///
/// assert!(drag.commit(&mut store, &"a".into()));
/// let ids: Vec<_> = store.tasks().iter().map(|t| t.id.as_str()).collect();
/// assert_eq!(ids, ["c", "a", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    payload: DragPayload,
    hovered: Option<TaskId>,
}

impl DragSession {
    /// Starts a drag gesture carrying the given payload.
    #[must_use]
    pub fn begin(payload: DragPayload) -> Self {
        debug!(task = %payload.task_id(), "drag started");
        Self {
            payload,
            hovered: None,
        }
    }

    /// Returns the dragged task's ID.
    #[must_use]
    pub fn dragged(&self) -> &TaskId {
        self.payload.task_id()
    }

    /// Records the task currently under the pointer.
    pub fn hover_target(&mut self, target: TaskId) {
        self.hovered = Some(target);
    }

    /// Returns the task currently under the pointer, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<&TaskId> {
        self.hovered.as_ref()
    }

    /// Completes the gesture by dropping onto `target`.
    ///
    /// Returns `true` if the store's order changed.
    pub fn commit(self, store: &mut TaskStore, target: &TaskId) -> bool {
        let Some(dragged) = self.payload.get(DRAG_PAYLOAD_KEY) else {
            return false;
        };
        apply_drop(store, dragged, target)
    }

    /// Completes the gesture by dropping onto the last hovered task.
    ///
    /// Returns `false` without touching the store if nothing was hovered.
    pub fn commit_hovered(self, store: &mut TaskStore) -> bool {
        match self.hovered.clone() {
            Some(target) => self.commit(store, &target),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskList;

    fn tasks(ids: &[&str]) -> Vec<Task> {
        ids.iter().map(|id| Task::with_id(*id, *id)).collect()
    }

    fn order(ids: &[&str]) -> Vec<TaskId> {
        ids.iter().map(|id| TaskId::from(*id)).collect()
    }

    fn store(ids: &[&str]) -> TaskStore {
        TaskStore::hydrate(TaskList { tasks: tasks(ids) })
    }

    #[test]
    fn drag_down_inserts_after_target() {
        let result = compute_drop_order(&tasks(&["a", "b", "c"]), &"a".into(), &"c".into());
        assert_eq!(result, Some(order(&["b", "c", "a"])));
    }

    #[test]
    fn drag_up_inserts_before_target() {
        let result = compute_drop_order(&tasks(&["a", "b", "c"]), &"c".into(), &"a".into());
        assert_eq!(result, Some(order(&["c", "a", "b"])));
    }

    #[test]
    fn adjacent_moves_swap() {
        let list = tasks(&["a", "b", "c"]);
        assert_eq!(
            compute_drop_order(&list, &"a".into(), &"b".into()),
            Some(order(&["b", "a", "c"]))
        );
        assert_eq!(
            compute_drop_order(&list, &"c".into(), &"b".into()),
            Some(order(&["a", "c", "b"]))
        );
    }

    #[test]
    fn drop_onto_self_has_no_effect() {
        let list = tasks(&["a", "b", "c"]);
        assert_eq!(compute_drop_order(&list, &"b".into(), &"b".into()), None);

        let mut store = store(&["a", "b", "c"]);
        assert!(!apply_drop(&mut store, &"b".into(), &"b".into()));
        assert_eq!(store.snapshot().ids(), order(&["a", "b", "c"]));
    }

    #[test]
    fn vanished_tasks_are_ignored() {
        let list = tasks(&["a", "b"]);
        assert_eq!(compute_drop_order(&list, &"x".into(), &"a".into()), None);
        assert_eq!(compute_drop_order(&list, &"a".into(), &"x".into()), None);
    }

    #[test]
    fn drop_after_source_deleted_is_ignored() {
        let mut store = store(&["a", "b", "c"]);
        let drag = DragSession::begin(DragPayload::for_task("a".into()));

        store.delete_task(&"a".into());

        assert!(!drag.commit(&mut store, &"c".into()));
        assert_eq!(store.snapshot().ids(), order(&["b", "c"]));
    }

    #[test]
    fn drop_side_follows_original_indices() {
        let list = tasks(&["a", "b", "c"]);
        assert_eq!(drop_side(&list, &"a".into(), &"c".into()), Some(DropSide::After));
        assert_eq!(drop_side(&list, &"c".into(), &"a".into()), Some(DropSide::Before));
        assert_eq!(drop_side(&list, &"a".into(), &"a".into()), None);
    }

    #[test]
    fn hover_does_not_mutate() {
        let mut store = store(&["a", "b", "c"]);
        let mut drag = DragSession::begin(DragPayload::for_task("a".into()));
        for target in ["b", "c", "b", "c"] {
            drag.hover_target(target.into());
        }
        assert_eq!(drag.hovered(), Some(&TaskId::from("c")));
        assert_eq!(store.snapshot().ids(), order(&["a", "b", "c"]));

        assert!(drag.commit_hovered(&mut store));
        assert_eq!(store.snapshot().ids(), order(&["b", "c", "a"]));
    }

    #[test]
    fn commit_hovered_without_hover_is_noop() {
        let mut store = store(&["a", "b"]);
        let drag = DragSession::begin(DragPayload::for_task("a".into()));
        assert!(!drag.commit_hovered(&mut store));
        assert_eq!(store.snapshot().ids(), order(&["a", "b"]));
    }
}
