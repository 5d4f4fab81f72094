use serde::Serialize;

use crate::model::task::Task;
use crate::ops::progress::Progress;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    /// 1-based, as accepted by the other commands
    pub number: usize,
    pub name: String,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub percent: u8,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(number: usize, task: &Task) -> TaskJson {
    TaskJson {
        number,
        name: task.name.clone(),
        completed: task.completed,
    }
}

pub fn stats_to_json(progress: &Progress) -> StatsJson {
    StatsJson {
        total: progress.total,
        completed: progress.completed,
        remaining: progress.remaining(),
        percent: progress.percent,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// One task per line, numbers right-aligned to `number_width`
pub fn format_task_line(number: usize, task: &Task, number_width: usize) -> String {
    format!(
        "{:>width$} {} {}",
        number,
        task.checkbox(),
        task.name,
        width = number_width
    )
}

/// Width of the widest task number in a list of `len` tasks
pub fn number_width(len: usize) -> usize {
    len.max(1).to_string().len()
}

pub fn format_stats(progress: &Progress) -> Vec<String> {
    vec![
        format!("total      {}", progress.total),
        format!("completed  {}", progress.completed),
        format!("remaining  {}", progress.remaining()),
        format!("progress   {}%", progress.percent),
    ]
}
