use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::io::storage::{MemoryStorage, TaskStorage, encode_tasks};
use crate::model::{AppConfig, Task};
use crate::ops::task_store::TaskStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    buffer_to_string(&render_to_buffer(w, h, f))
}

/// Render into an in-memory buffer and return it, styles included.
pub fn render_to_buffer<F>(w: u16, h: u16, f: F) -> Buffer
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

pub fn buffer_to_string(buf: &Buffer) -> String {
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over an in-memory store holding `tasks` (name, completed).
pub fn app_with_tasks(tasks: &[(&str, bool)]) -> App {
    let tasks: Vec<Task> = tasks
        .iter()
        .map(|&(name, completed)| Task {
            name: name.to_string(),
            completed,
        })
        .collect();
    let raw = encode_tasks(&tasks).unwrap();
    let storage: Box<dyn TaskStorage> = Box::new(MemoryStorage::with_raw(raw));
    App::new(TaskStore::open(storage), AppConfig::default())
}

/// An App with incomplete tasks named `names`.
pub fn app_with(names: &[&str]) -> App {
    let tasks: Vec<(&str, bool)> = names.iter().map(|&n| (n, false)).collect();
    app_with_tasks(&tasks)
}

/// Current task names, in store order
pub fn names(app: &App) -> Vec<&str> {
    app.store.tasks().iter().map(|t| t.name.as_str()).collect()
}
