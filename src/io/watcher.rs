use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::io::storage::TASKS_FILE;

/// Notice sent from the watcher thread to the UI loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEvent {
    /// `tasks.json` was created, rewritten or removed on disk.
    TasksChanged,
}

/// Watches the data directory for writes to `tasks.json` made by other
/// processes (and by our own saves; reloading identical data is a no-op).
pub struct TasksWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<StorageEvent>,
}

impl TasksWatcher {
    pub fn start(data_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let Ok(event) = result else { return };
                if is_tasks_event(&event) {
                    let _ = tx.send(StorageEvent::TasksChanged);
                }
            },
            Config::default(),
        )?;

        watcher.watch(data_dir, RecursiveMode::NonRecursive)?;
        Ok(TasksWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Drain pending notices without blocking; bursts collapse into one.
    pub fn poll(&self) -> Option<StorageEvent> {
        let mut latest = None;
        while let Ok(evt) = self.rx.try_recv() {
            latest = Some(evt);
        }
        latest
    }
}

fn is_tasks_event(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event
        .paths
        .iter()
        .any(|p| p.file_name().and_then(|n| n.to_str()) == Some(TASKS_FILE))
}
