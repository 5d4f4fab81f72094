use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{error, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};

use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::storage::{JsonFileStorage, StorageError, TaskStorage};
use crate::io::watcher::TasksWatcher;
use crate::model::AppConfig;
use crate::ops::progress::{Celebration, Progress};
use crate::ops::reorder::{ReorderController, RowSpan};
use crate::ops::task_store::{Mutation, TaskStore};

use super::confetti::Confetti;
use super::edit_line::EditLine;
use super::input;
use super::render;
use super::theme::Theme;

/// Tick rate while confetti is falling
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
/// Poll timeout when nothing animates
const IDLE_POLL: Duration = Duration::from_millis(250);
const FLASH_DURATION: Duration = Duration::from_millis(1500);
const ERROR_DURATION: Duration = Duration::from_secs(5);

/// The store as the UI holds it: any storage behind a box
pub type Store = TaskStore<Box<dyn TaskStorage>>;

/// Which tab is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Tasks,
    Stats,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Tasks, Tab::Stats];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Tasks => "Tasks",
            Tab::Stats => "Stats",
        }
    }

    /// Name used in .state.json
    pub fn key(self) -> &'static str {
        match self {
            Tab::Tasks => "tasks",
            Tab::Stats => "stats",
        }
    }

    pub fn from_key(key: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|t| t.key() == key)
    }

    pub fn next(self) -> Tab {
        match self {
            Tab::Tasks => Tab::Stats,
            Tab::Stats => Tab::Tasks,
        }
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new task into the input line
    Add,
    /// Editing the name of the task at `index` in place
    Edit { index: usize },
    /// Keyboard reorder of the task under the cursor
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Transient message in the status row
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub at: Instant,
}

impl StatusMessage {
    pub fn is_expired(&self, now: Instant) -> bool {
        let ttl = match self.kind {
            StatusKind::Info => FLASH_DURATION,
            StatusKind::Error => ERROR_DURATION,
        };
        now.duration_since(self.at) >= ttl
    }
}

/// Left button went down on a task row and has not been released yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPress {
    pub index: usize,
    pub row: u16,
}

/// Main application state
pub struct App {
    pub store: Store,
    /// Where UI state is saved; `None` keeps everything in memory
    pub data_dir: Option<PathBuf>,
    pub config: AppConfig,
    pub theme: Theme,
    pub tab: Tab,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor row in the task list (a visual slot while reordering)
    pub cursor: usize,
    /// First visible list row
    pub scroll_offset: usize,
    /// Buffer for Add and Edit modes
    pub edit: EditLine,
    pub reorder: ReorderController,
    pub press: Option<PendingPress>,
    /// Task rows as last drawn, in screen coordinates
    pub list_area: Rect,
    /// The whole terminal as last drawn
    pub screen: Rect,
    pub celebration: Celebration,
    pub confetti: Option<Confetti>,
    pub status: Option<StatusMessage>,
    seen_revision: u64,
}

impl App {
    pub fn new(store: Store, config: AppConfig) -> Self {
        let theme = Theme::from_config(&config.ui);
        let celebration = Celebration::new(&Progress::of(store.tasks()));
        let seen_revision = store.revision();
        App {
            store,
            data_dir: None,
            config,
            theme,
            tab: Tab::Tasks,
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            edit: EditLine::new(),
            reorder: ReorderController::new(),
            press: None,
            list_area: Rect::default(),
            screen: Rect::default(),
            celebration,
            confetti: None,
            status: None,
            seen_revision,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::of(self.store.tasks())
    }

    /// Task indices in drawing order: the drag's provisional order while
    /// reordering, the store's order otherwise.
    pub fn visible_order(&self) -> Vec<usize> {
        match self.reorder.visual_order() {
            Some(order) => order.to_vec(),
            None => (0..self.store.len()).collect(),
        }
    }

    /// Record the outcome of a store operation and react to the change.
    ///
    /// A failed save still changed the in-memory list, so it counts as
    /// applied; the failure is logged and shown in the status row.
    pub fn apply(&mut self, result: Result<Mutation, StorageError>) -> Mutation {
        let mutation = match result {
            Ok(m) => m,
            Err(e) => {
                error!("event=save_failed error={}", e);
                self.show_error(format!("could not save: {}", e));
                Mutation::Applied
            }
        };
        self.on_state_changed();
        mutation
    }

    /// Called whenever the store may have changed. Keeps the cursor inside
    /// the list and fires the celebration on the transition to 100%.
    pub fn on_state_changed(&mut self) {
        if self.store.revision() == self.seen_revision {
            return;
        }
        self.seen_revision = self.store.revision();
        self.clamp_cursor();

        let progress = self.progress();
        if self.celebration.observe(&progress) {
            info!("event=celebrate total={}", progress.total);
            if self.config.celebration.enabled {
                self.start_confetti();
            }
        }
    }

    pub fn start_confetti(&mut self) {
        let confetti = Confetti::burst(
            &mut rand::thread_rng(),
            self.config.celebration.particles,
            self.screen.width,
            self.screen.height,
        );
        self.confetti = Some(confetti);
    }

    pub fn is_animating(&self) -> bool {
        self.confetti.is_some()
    }

    /// Advance animations by one frame and expire old messages.
    pub fn tick(&mut self) {
        if let Some(confetti) = &mut self.confetti {
            confetti.step();
        }
        if self.confetti.as_ref().is_some_and(Confetti::is_finished) {
            self.confetti = None;
        }
        if self
            .status
            .as_ref()
            .is_some_and(|s| s.is_expired(Instant::now()))
        {
            self.status = None;
        }
    }

    /// Another process rewrote tasks.json.
    ///
    /// Positions captured before the reload may now name other tasks. An
    /// in-place edit follows its task to the new position (or is dropped if
    /// the task is gone); a drag or a pending click is abandoned.
    pub fn reload_from_disk(&mut self) {
        let edited = match self.mode {
            Mode::Edit { index } => self.store.get(index).cloned(),
            _ => None,
        };
        if !self.store.reload().is_applied() {
            return;
        }

        self.press = None;
        if let Some(origin) = self.reorder.session().map(|s| s.origin()) {
            warn!("event=drag_cancelled origin={} reason=reload", origin);
            self.reorder.cancel();
            self.cursor = origin;
            if self.mode == Mode::Move {
                self.mode = Mode::Navigate;
            }
            self.show_error("list changed on disk; move cancelled");
        }

        if let Mode::Edit { index } = self.mode {
            let moved_to = edited.and_then(|task| self.store.tasks().iter().position(|t| *t == task));
            match moved_to {
                Some(new_index) => {
                    if new_index != index {
                        info!("event=edit_followed from={} to={}", index, new_index);
                    }
                    self.mode = Mode::Edit { index: new_index };
                    self.cursor = new_index;
                }
                None => {
                    warn!("event=edit_dropped index={} reason=reload", index);
                    self.edit.clear();
                    self.mode = Mode::Navigate;
                    self.show_error("task changed on disk; edit discarded");
                }
            }
        }
        self.on_state_changed();
    }

    pub fn flash(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Info,
            at: Instant::now(),
        });
    }

    pub fn show_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
            at: Instant::now(),
        });
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.store.len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    /// Where each visual slot of the list is drawn right now
    pub fn row_layout(&self) -> Vec<RowSpan> {
        let top = i32::from(self.list_area.y) - self.scroll_offset as i32;
        (0..self.store.len())
            .map(|slot| RowSpan {
                top: top + slot as i32,
                height: 1,
            })
            .collect()
    }

    pub fn in_list(&self, column: u16, row: u16) -> bool {
        self.list_area.contains(Position::new(column, row))
    }

    /// Visual slot drawn at a screen cell, if a task is there
    pub fn slot_at(&self, column: u16, row: u16) -> Option<usize> {
        if !self.in_list(column, row) {
            return None;
        }
        let slot = usize::from(row - self.list_area.y) + self.scroll_offset;
        (slot < self.store.len()).then_some(slot)
    }
}

/// Restore tab and cursor from .state.json
pub fn restore_ui_state(app: &mut App) {
    let Some(dir) = &app.data_dir else { return };
    let Some(ui_state) = read_ui_state(dir) else {
        return;
    };
    if let Some(tab) = Tab::from_key(&ui_state.tab) {
        app.tab = tab;
    }
    app.cursor = ui_state.cursor;
    app.clamp_cursor();
}

/// Save tab and cursor to .state.json
pub fn save_ui_state(app: &App) {
    let Some(dir) = &app.data_dir else { return };
    let ui_state = UiState {
        tab: app.tab.key().to_string(),
        cursor: app.cursor,
    };
    if let Err(e) = write_ui_state(dir, &ui_state) {
        warn!("event=state_save_failed error={}", e);
    }
}

/// Run the TUI against the task list in `data_dir`
pub fn run(data_dir: &Path, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(data_dir)?;
    let storage: Box<dyn TaskStorage> = Box::new(JsonFileStorage::new(data_dir));
    let mut app = App::new(TaskStore::open(storage), config);
    app.data_dir = Some(data_dir.to_path_buf());
    restore_ui_state(&mut app);

    let watcher = match TasksWatcher::start(data_dir) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!("event=watch_failed error={}", e);
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    info!("event=tui_start tasks={}", app.store.len());
    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    info!("event=tui_exit");

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&TasksWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_frame = Instant::now();
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        let timeout = if app.is_animating() {
            FRAME_INTERVAL.saturating_sub(last_frame.elapsed())
        } else {
            IDLE_POLL
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if let Some(w) = watcher
            && w.poll().is_some()
        {
            app.reload_from_disk();
        }

        if last_frame.elapsed() >= FRAME_INTERVAL {
            app.tick();
            last_frame = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
