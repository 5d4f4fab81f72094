use serde::{Deserialize, Serialize};

/// A single to-do item
///
/// Tasks have no stable id: a task is addressed by its position in the
/// collection. Deserialization rejects a name that is blank after trimming,
/// so a stored list holding one is treated as malformed as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    /// Display text (trimmed, never empty)
    pub name: String,
    /// Completion flag
    pub completed: bool,
}

impl Task {
    /// Build a task from user input. Returns `None` when the text is blank.
    pub fn new(raw_name: &str) -> Option<Self> {
        let name = normalize_name(raw_name)?;
        Some(Task {
            name,
            completed: false,
        })
    }

    /// Checkbox glyph used by the list renderers
    pub fn checkbox(&self) -> &'static str {
        if self.completed { "[x]" } else { "[ ]" }
    }
}

/// Trim `raw` and return it, or `None` if nothing is left.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// On-disk shape of a task before validation
#[derive(Deserialize)]
struct RawTask {
    name: String,
    completed: bool,
}

impl TryFrom<RawTask> for Task {
    type Error = String;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        let name = normalize_name(&raw.name).ok_or("task name is blank")?;
        Ok(Task {
            name,
            completed: raw.completed,
        })
    }
}
