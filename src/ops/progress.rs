use serde::Serialize;

use crate::model::task::Task;

/// Completion summary of a task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    /// Rounded percentage, 0 for an empty list
    pub percent: u8,
}

impl Progress {
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        Progress {
            total,
            completed,
            percent: percent(completed, total),
        }
    }

    pub fn remaining(&self) -> usize {
        self.total - self.completed
    }

    /// Gauge is full: at least one task and the rounded percent reads 100
    pub fn is_full(&self) -> bool {
        self.total > 0 && self.percent == 100
    }

    /// Fraction in `0.0..=1.0` for gauges
    pub fn ratio(&self) -> f64 {
        f64::from(self.percent) / 100.0
    }
}

/// `round(100 * completed / total)`, rounding halves up; 0 when `total == 0`.
pub fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    ((200 * completed + total) / (2 * total)) as u8
}

/// Edge detector for the celebration: fires when the percentage moves from
/// below 100 to exactly 100 with a non-empty list. Staying at 100 does not
/// fire again.
#[derive(Debug, Clone)]
pub struct Celebration {
    last_percent: u8,
}

impl Celebration {
    /// Seed with the progress the list opened with, so a list that is
    /// already complete at startup does not celebrate.
    pub fn new(initial: &Progress) -> Self {
        Celebration {
            last_percent: initial.percent,
        }
    }

    /// Record the latest progress; `true` exactly on the transition.
    pub fn observe(&mut self, progress: &Progress) -> bool {
        let fire = self.last_percent < 100 && progress.is_full();
        self.last_percent = progress.percent;
        fire
    }
}
