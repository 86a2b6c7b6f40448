//! The authoritative in-memory task store.
//!
//! [`TaskStore`] owns the ordered task sequence and is the only place it is
//! mutated. Every mutation that changes state notifies the subscribed
//! [`StoreObserver`]s exactly once, synchronously, in subscription order.
//! This is how persistence is wired: the persistence adapter subscribes and
//! writes on each notification.
//!
//! Mutations never fail. An ID that matches no task is a stale reference
//! (for example a task deleted while it was being dragged) and is treated
//! as a no-op.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{ProtocolError, Result};
use crate::task::{Task, TaskId, TaskList};

/// What changed in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A task was prepended to the list.
    Added(TaskId),
    /// A task's text was replaced.
    TextUpdated(TaskId),
    /// A task's completion flag was flipped.
    CompletionToggled(TaskId),
    /// A task was removed.
    Deleted(TaskId),
    /// The task sequence was permuted.
    Reordered,
}

/// Receives change notifications from a [`TaskStore`].
///
/// Closures of the form `FnMut(&StoreEvent, &TaskList)` implement this trait.
pub trait StoreObserver {
    /// Called after every state-changing mutation with the new task list.
    fn on_change(&mut self, event: &StoreEvent, tasks: &TaskList);
}

impl<F> StoreObserver for F
where
    F: FnMut(&StoreEvent, &TaskList),
{
    fn on_change(&mut self, event: &StoreEvent, tasks: &TaskList) {
        self(event, tasks);
    }
}

/// Handle returned by [`TaskStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The ordered task collection and its mutation operations.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use ticklist_protocol::{StoreEvent, TaskList, TaskStore};
///
/// let mut store = TaskStore::new();
/// let writes = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&writes);
/// store.subscribe(Box::new(move |_: &StoreEvent, _: &TaskList| {
///     counter.set(counter.get() + 1);
/// }));
///
/// let id = store.add_task("Buy milk").unwrap();
/// store.toggle_completed(&id);
/// assert!(store.get(&id).unwrap().is_completed());
/// assert_eq!(writes.get(), 2);
///
/// // Blank text is ignored and does not notify.
/// assert!(store.add_task("   ").is_none());
/// assert_eq!(writes.get(), 2);
/// ```
#[derive(Default)]
pub struct TaskStore {
    list: TaskList,
    observers: Vec<(SubscriptionId, Box<dyn StoreObserver>)>,
    next_subscription: u64,
}

impl fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskStore")
            .field("list", &self.list)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from previously persisted state.
    ///
    /// Tasks whose ID repeats an earlier task's ID are dropped so that IDs
    /// stay unique. Hydration does not notify observers.
    #[must_use]
    pub fn hydrate(mut list: TaskList) -> Self {
        let dropped = list.dedup_ids();
        if !dropped.is_empty() {
            warn!(count = dropped.len(), "dropped tasks with duplicate ids");
        }
        info!(count = list.tasks.len(), "hydrated task store");
        Self {
            list,
            ..Self::default()
        }
    }

    /// Registers an observer for change notifications.
    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    /// Removes a previously registered observer.
    ///
    /// Returns `false` if the subscription was not found.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() < before
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.list.tasks
    }

    /// Returns the full task list, as it would be persisted.
    #[must_use]
    pub fn snapshot(&self) -> &TaskList {
        &self.list
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.tasks.len()
    }

    /// Returns `true` if there are no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.tasks.is_empty()
    }

    /// Returns the task with the given ID, if any.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.list.tasks.iter().find(|t| &t.id == id)
    }

    /// Returns the index of the task with the given ID, if any.
    #[must_use]
    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.list.tasks.iter().position(|t| &t.id == id)
    }

    /// Prepends a new task.
    ///
    /// Blank (empty or whitespace-only) text is ignored. The text is stored
    /// as given. Returns the new task's ID.
    pub fn add_task(&mut self, text: impl Into<String>) -> Option<TaskId> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }

        let id = loop {
            let candidate = TaskId::generate();
            if self.get(&candidate).is_none() {
                break candidate;
            }
        };

        debug!(%id, "adding task");
        self.list.tasks.insert(0, Task::with_id(id.clone(), text));
        self.notify(StoreEvent::Added(id.clone()));
        Some(id)
    }

    /// Replaces the text of a task.
    ///
    /// Returns `false` if the task was not found or the text is unchanged.
    pub fn update_text(&mut self, id: &TaskId, text: impl Into<String>) -> bool {
        let text = text.into();
        let Some(task) = self.task_mut(id) else {
            return false;
        };
        if task.text == text {
            return false;
        }
        task.text = text;
        debug!(%id, "updated task text");
        self.notify(StoreEvent::TextUpdated(id.clone()));
        true
    }

    /// Flips the completion flag of a task.
    ///
    /// Returns `false` if the task was not found.
    pub fn toggle_completed(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.task_mut(id) else {
            return false;
        };
        task.toggle();
        debug!(%id, completed = task.is_completed(), "toggled task");
        self.notify(StoreEvent::CompletionToggled(id.clone()));
        true
    }

    /// Removes a task.
    ///
    /// Returns `false` if the task was not found, which makes repeated
    /// deletes harmless.
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let Some(index) = self.position(id) else {
            debug!(%id, "ignoring delete of unknown task");
            return false;
        };
        self.list.tasks.remove(index);
        debug!(%id, "deleted task");
        self.notify(StoreEvent::Deleted(id.clone()));
        true
    }

    /// Replaces the task sequence with the ordering named by `order`.
    ///
    /// `order` must name every current task exactly once; anything else is
    /// rejected and leaves the store untouched. Tasks are moved, never
    /// re-created. Returns `false` if the ordering was rejected or matches
    /// the current order.
    pub fn reorder(&mut self, order: &[TaskId]) -> bool {
        if let Err(error) = self.check_permutation(order) {
            warn!(%error, "rejected reorder");
            return false;
        }
        if self.list.tasks.iter().map(|t| &t.id).eq(order.iter()) {
            return false;
        }

        let mut remaining: Vec<Option<Task>> =
            std::mem::take(&mut self.list.tasks).into_iter().map(Some).collect();
        let reordered = order
            .iter()
            .filter_map(|id| {
                remaining
                    .iter_mut()
                    .find(|slot| slot.as_ref().is_some_and(|t| &t.id == id))
                    .and_then(Option::take)
            })
            .collect();
        self.list.tasks = reordered;

        debug!(count = order.len(), "reordered tasks");
        self.notify(StoreEvent::Reordered);
        true
    }

    /// Checks that `order` is a permutation of the current task IDs.
    fn check_permutation(&self, order: &[TaskId]) -> Result<()> {
        if order.len() != self.list.tasks.len() {
            return Err(ProtocolError::NotAPermutation {
                expected: self.list.tasks.len(),
                given: order.len(),
            });
        }
        let mut seen = HashSet::with_capacity(order.len());
        for id in order {
            if self.get(id).is_none() {
                return Err(ProtocolError::TaskNotFound(id.clone()));
            }
            if !seen.insert(id) {
                return Err(ProtocolError::NotAPermutation {
                    expected: self.list.tasks.len(),
                    given: seen.len(),
                });
            }
        }
        Ok(())
    }

    fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        let task = self.list.tasks.iter_mut().find(|t| &t.id == id);
        if task.is_none() {
            debug!(%id, "ignoring stale task reference");
        }
        task
    }

    fn notify(&mut self, event: StoreEvent) {
        for (_, observer) in &mut self.observers {
            observer.on_change(&event, &self.list);
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn arb_items() -> impl Strategy<Value = Vec<(String, bool)>> {
        proptest::collection::vec(("[a-zA-Z ]{1,12}", any::<bool>()), 0..10)
    }

    fn store_from(items: Vec<(String, bool)>) -> TaskStore {
        let mut store = TaskStore::new();
        for (text, completed) in items {
            if let Some(id) = store.add_task(format!("t {text}"))
                && completed
            {
                store.toggle_completed(&id);
            }
        }
        store
    }

    fn arb_store() -> impl Strategy<Value = TaskStore> {
        arb_items().prop_map(store_from)
    }

    /// A store together with a shuffled ordering of its task positions.
    fn arb_store_and_permutation() -> impl Strategy<Value = (TaskStore, Vec<usize>)> {
        arb_items()
            .prop_flat_map(|items| {
                let positions: Vec<usize> = (0..items.len()).collect();
                (Just(items), Just(positions).prop_shuffle())
            })
            .prop_map(|(items, positions)| (store_from(items), positions))
    }

    /// Task contents ignoring whether `completed` was ever written.
    fn observable(tasks: &[Task]) -> Vec<(TaskId, String, bool)> {
        tasks
            .iter()
            .map(|t| (t.id.clone(), t.text.clone(), t.is_completed()))
            .collect()
    }

    proptest! {
        #[test]
        fn add_grows_by_one_with_fresh_id(mut store in arb_store(), text in "[a-z]{1,10}") {
            let before: HashSet<TaskId> = store.tasks().iter().map(|t| t.id.clone()).collect();
            let len = store.len();

            let id = store.add_task(text.clone()).expect("non-blank text is added");

            prop_assert_eq!(store.len(), len + 1);
            prop_assert_eq!(&store.tasks()[0].id, &id);
            prop_assert_eq!(&store.tasks()[0].text, &text);
            prop_assert!(!before.contains(&id));
        }

        #[test]
        fn toggle_is_an_involution(mut store in arb_store(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!store.is_empty());
            let original = store.snapshot().clone();
            let id = original.tasks[pick.index(original.tasks.len())].id.clone();

            store.toggle_completed(&id);
            for task in store.tasks().iter().filter(|t| t.id != id) {
                let was = original.tasks.iter().find(|o| o.id == task.id).unwrap();
                prop_assert_eq!(was, task);
            }
            store.toggle_completed(&id);

            prop_assert_eq!(observable(store.tasks()), observable(&original.tasks));
        }

        #[test]
        fn delete_removes_exactly_one(mut store in arb_store(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!store.is_empty());
            let len = store.len();
            let id = store.tasks()[pick.index(len)].id.clone();

            prop_assert!(store.delete_task(&id));
            prop_assert_eq!(store.len(), len - 1);
            prop_assert!(store.get(&id).is_none());

            prop_assert!(!store.delete_task(&id));
            prop_assert_eq!(store.len(), len - 1);
        }

        #[test]
        fn reorder_preserves_ids((mut store, positions) in arb_store_and_permutation()) {
            let ids = store.snapshot().ids();
            let order: Vec<TaskId> = positions.iter().map(|&i| ids[i].clone()).collect();
            let mut expected: Vec<TaskId> = order.clone();
            expected.sort();

            store.reorder(&order);

            let mut actual = store.snapshot().ids();
            prop_assert_eq!(&actual, &order);
            actual.sort();
            prop_assert_eq!(actual, expected);
        }
    }
}
