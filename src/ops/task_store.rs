use log::{debug, info, warn};

use crate::io::storage::{StorageError, TaskStorage};
use crate::model::task::{Task, normalize_name};

/// Whether a store operation changed the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The collection changed and was written through to storage.
    Applied,
    /// Blank text or an out-of-range index; nothing changed, nothing written.
    Ignored,
}

impl Mutation {
    pub fn is_applied(self) -> bool {
        self == Mutation::Applied
    }
}

/// Sole owner of the ordered task list.
///
/// Every mutation runs to completion synchronously and writes the whole list
/// to storage before returning. A change bumps `revision`, which is how
/// observers notice "state changed". Storage failures are the only errors.
///
/// Tasks are addressed by position. An index past the end is a caller bug:
/// it trips a debug assertion and is ignored in release builds.
pub struct TaskStore<S: TaskStorage> {
    tasks: Vec<Task>,
    storage: S,
    revision: u64,
}

impl<S: TaskStorage> TaskStore<S> {
    /// Load the collection from `storage` (empty when absent or malformed).
    pub fn open(storage: S) -> Self {
        let tasks = storage.load();
        info!("event=store_open count={}", tasks.len());
        TaskStore {
            tasks,
            storage,
            revision: 0,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Bumped once per applied mutation or reload
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Append a new incomplete task. Blank text is ignored.
    pub fn add(&mut self, raw_name: &str) -> Result<Mutation, StorageError> {
        let Some(task) = Task::new(raw_name) else {
            debug!("event=add_ignored reason=blank");
            return Ok(Mutation::Ignored);
        };
        self.tasks.push(task);
        debug!("event=add index={}", self.tasks.len() - 1);
        self.commit()
    }

    /// Flip the completion flag of the task at `index`.
    pub fn toggle(&mut self, index: usize) -> Result<Mutation, StorageError> {
        if !self.check_index(index, "toggle") {
            return Ok(Mutation::Ignored);
        }
        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        debug!("event=toggle index={} completed={}", index, task.completed);
        self.commit()
    }

    /// Replace the name at `index`. Blank text keeps the old name and
    /// writes nothing.
    pub fn rename(&mut self, index: usize, new_raw_name: &str) -> Result<Mutation, StorageError> {
        if !self.check_index(index, "rename") {
            return Ok(Mutation::Ignored);
        }
        let Some(name) = normalize_name(new_raw_name) else {
            debug!("event=rename_ignored index={} reason=blank", index);
            return Ok(Mutation::Ignored);
        };
        self.tasks[index].name = name;
        debug!("event=rename index={}", index);
        self.commit()
    }

    /// Remove the task at `index`; later tasks shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<Mutation, StorageError> {
        if !self.check_index(index, "delete") {
            return Ok(Mutation::Ignored);
        }
        self.tasks.remove(index);
        debug!("event=delete index={} remaining={}", index, self.tasks.len());
        self.commit()
    }

    /// Replace the whole collection with `new_order`. The caller supplies a
    /// permutation of the current tasks; it is taken verbatim.
    pub fn reorder(&mut self, new_order: Vec<Task>) -> Result<Mutation, StorageError> {
        self.tasks = new_order;
        debug!("event=reorder count={}", self.tasks.len());
        self.commit()
    }

    /// Re-read storage and adopt its value if it differs from memory. Used
    /// when another process wrote the list. Writes nothing. A stored value
    /// that does not parse is ignored and the in-memory list stays.
    pub fn reload(&mut self) -> Mutation {
        let Some(stored) = self.storage.load_current() else {
            warn!("event=reload_skipped reason=unreadable keep={}", self.tasks.len());
            return Mutation::Ignored;
        };
        if stored == self.tasks {
            return Mutation::Ignored;
        }
        info!(
            "event=reload before={} after={}",
            self.tasks.len(),
            stored.len()
        );
        self.tasks = stored;
        self.revision += 1;
        Mutation::Applied
    }

    fn commit(&mut self) -> Result<Mutation, StorageError> {
        self.revision += 1;
        self.storage.save(&self.tasks)?;
        Ok(Mutation::Applied)
    }

    fn check_index(&self, index: usize, op: &str) -> bool {
        let in_range = index < self.tasks.len();
        debug_assert!(
            in_range,
            "{} index {} out of range (len {})",
            op,
            index,
            self.tasks.len()
        );
        in_range
    }
}

/// The permutation of `tasks` that moves the task at `from` to position `to`
/// (both clamped to the list). Feed the result to [`TaskStore::reorder`].
pub fn moved(tasks: &[Task], from: usize, to: usize) -> Vec<Task> {
    let mut order = tasks.to_vec();
    if order.is_empty() {
        return order;
    }
    let from = from.min(order.len() - 1);
    let task = order.remove(from);
    let to = to.min(order.len());
    order.insert(to, task);
    order
}
