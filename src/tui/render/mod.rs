pub mod confetti_layer;
pub mod list_view;
pub mod progress_ring;
pub mod stats_view;
pub mod status_row;
pub mod tab_bar;

mod helpers;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Tab};

/// Width of the progress ring column
const RING_WIDTH: u16 = 24;
/// Below this width the ring is dropped to leave room for the list
const MIN_WIDTH_FOR_RING: u16 = 56;

/// Draw one frame: tab bar, the active tab, the status row, then confetti on top
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.screen = area;
    if let Some(confetti) = &mut app.confetti {
        confetti.resize(area.width, area.height);
    }

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match app.tab {
        Tab::Tasks => render_tasks_tab(frame, app, chunks[1]),
        Tab::Stats => {
            // No list on screen: mouse presses must not hit stale rows
            app.list_area = Rect::default();
            stats_view::render_stats_view(frame, app, chunks[1]);
        }
    }

    status_row::render_status_row(frame, app, chunks[2]);

    if let Some(confetti) = &app.confetti {
        confetti_layer::render_confetti(frame.buffer_mut(), confetti);
    }
}

fn render_tasks_tab(frame: &mut Frame, app: &mut App, area: Rect) {
    if area.width < MIN_WIDTH_FOR_RING {
        list_view::render_list_column(frame, app, area);
        return;
    }
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(RING_WIDTH)])
        .split(area);
    list_view::render_list_column(frame, app, columns[0]);
    progress_ring::render_progress_ring(frame, app, columns[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn render_app(app: &mut App, w: u16, h: u16) -> String {
        render_to_string(w, h, |frame, _| render(frame, app))
    }

    #[test]
    fn tasks_tab_layout() {
        let mut app = app_with_tasks(&[("Buy milk", true), ("Walk dog", false)]);
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Tasks 2"));
        assert!(out.contains("[x] Buy milk"));
        assert!(out.contains("[ ] Walk dog"));
        assert!(out.contains("50%"));
        assert!(out.contains("q quit"));
        assert_eq!(app.screen, Rect::new(0, 0, TERM_W, TERM_H));
        // Rows start under tab bar, input line and separator
        assert_eq!(app.list_area.y, 4);
    }

    #[test]
    fn narrow_terminal_drops_the_ring() {
        let mut app = app_with_tasks(&[("Buy milk", true), ("Walk dog", false)]);
        let out = render_app(&mut app, 40, 12);
        assert!(out.contains("[x] Buy milk"));
        assert!(!out.contains("50%"));
    }

    #[test]
    fn stats_tab_hides_the_list() {
        let mut app = app_with_tasks(&[("Buy milk", true)]);
        app.list_area = Rect::new(0, 4, 10, 10);
        app.tab = Tab::Stats;
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Completion rate"));
        assert!(!out.contains("Buy milk"));
        assert_eq!(app.list_area, Rect::default());
    }

    #[test]
    fn confetti_is_drawn_over_the_ui() {
        let mut app = app_with_tasks(&[("Buy milk", false)]);
        app.screen = Rect::new(0, 0, TERM_W, TERM_H);
        let result = app.store.toggle(0);
        app.apply(result);
        for _ in 0..15 {
            app.tick();
        }
        let visible = app.confetti.as_ref().map_or(0, |c| c.visible().count());
        assert!(visible > 0);
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains('·') || out.contains('•') || out.contains('●'));
    }
}
