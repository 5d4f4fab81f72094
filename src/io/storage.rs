use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use tempfile::NamedTempFile;

use crate::io::lock::{DataDirLock, LockError};
use crate::model::task::Task;

/// Name of the persisted task list inside the data directory
pub const TASKS_FILE: &str = "tasks.json";

/// Error type for persistence writes. Loads never fail: a missing or
/// malformed value reads as an empty list.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not serialize tasks: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error(transparent)]
    LockError(#[from] LockError),
}

/// A durable single-key slot holding the whole task list.
pub trait TaskStorage {
    /// Previously saved tasks, or an empty list when nothing usable is stored.
    fn load(&self) -> Vec<Task>;
    /// Overwrite the stored value with `tasks`.
    fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError>;
    /// The stored list for a live reload, or `None` when the value cannot be
    /// read or does not parse (for instance a file caught mid-write). Unlike
    /// `load`, this never treats damage as an empty list and makes no backup.
    fn load_current(&self) -> Option<Vec<Task>>;
}

impl<T: TaskStorage + ?Sized> TaskStorage for Box<T> {
    fn load(&self) -> Vec<Task> {
        (**self).load()
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        (**self).save(tasks)
    }

    fn load_current(&self) -> Option<Vec<Task>> {
        (**self).load_current()
    }
}

/// Serialize a task list the way it is stored: a JSON array of
/// `{"name", "completed"}` records, pretty-printed, trailing newline.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(tasks)?;
    out.push('\n');
    Ok(out)
}

/// Parse a stored value. `null` means nothing saved; anything that does not
/// match the expected shape yields `None`.
pub fn decode_tasks(raw: &str) -> Option<Vec<Task>> {
    serde_json::from_str::<Option<Vec<Task>>>(raw)
        .ok()
        .map(Option::unwrap_or_default)
}

// ---------------------------------------------------------------------------
// JSON file
// ---------------------------------------------------------------------------

/// `tasks.json` in the data directory
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TASKS_FILE)
    }

    /// Keep a copy of an unreadable file before the next save replaces it.
    fn back_up_malformed(&self, path: &Path) {
        let bak = path.with_extension("json.bak");
        match fs::copy(path, &bak) {
            Ok(_) => warn!(
                "event=load_malformed path={} backup={}",
                path.display(),
                bak.display()
            ),
            Err(e) => warn!(
                "event=load_malformed path={} backup_error={}",
                path.display(),
                e
            ),
        }
    }
}

impl TaskStorage for JsonFileStorage {
    fn load(&self) -> Vec<Task> {
        let path = self.path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("event=load_missing path={}", path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("event=load_failed path={} error={}", path.display(), e);
                return Vec::new();
            }
        };
        match decode_tasks(&raw) {
            Some(tasks) => {
                debug!("event=load path={} count={}", path.display(), tasks.len());
                tasks
            }
            None => {
                self.back_up_malformed(&path);
                Vec::new()
            }
        }
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        let path = self.path();
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::WriteError {
            path: self.dir.clone(),
            source: e,
        })?;
        let content = encode_tasks(tasks)?;
        let _lock = DataDirLock::acquire_default(&self.dir)?;
        atomic_write(&path, content.as_bytes()).map_err(|e| StorageError::WriteError {
            path: path.clone(),
            source: e,
        })?;
        debug!("event=save path={} count={}", path.display(), tasks.len());
        Ok(())
    }

    fn load_current(&self) -> Option<Vec<Task>> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(raw) => {
                let tasks = decode_tasks(&raw);
                if tasks.is_none() {
                    warn!("event=reload_unreadable path={} bytes={}", path.display(), raw.len());
                }
                tasks
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Some(Vec::new()),
            Err(e) => {
                warn!("event=reload_failed path={} error={}", path.display(), e);
                None
            }
        }
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// In-memory slot
// ---------------------------------------------------------------------------

/// Holds the serialized value in memory. Used by tests and by anything that
/// wants the store without touching disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Option<String>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an arbitrary stored value (may be malformed).
    pub fn with_raw(raw: impl Into<String>) -> Self {
        MemoryStorage {
            slot: Some(raw.into()),
            ..Self::default()
        }
    }

    /// A slot whose every save fails, for exercising error propagation.
    pub fn failing() -> Self {
        MemoryStorage {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// The stored value, exactly as last written
    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Number of successful saves
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Replace the stored value behind the store's back (another writer).
    pub fn overwrite(&mut self, raw: impl Into<String>) {
        self.slot = Some(raw.into());
    }
}

impl TaskStorage for MemoryStorage {
    fn load(&self) -> Vec<Task> {
        self.slot
            .as_deref()
            .and_then(decode_tasks)
            .unwrap_or_default()
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::WriteError {
                path: PathBuf::from("<memory>"),
                source: io::Error::other("storage quota exceeded"),
            });
        }
        self.slot = Some(encode_tasks(tasks)?);
        self.writes += 1;
        Ok(())
    }

    fn load_current(&self) -> Option<Vec<Task>> {
        match self.slot.as_deref() {
            Some(raw) => decode_tasks(raw),
            None => Some(Vec::new()),
        }
    }
}
