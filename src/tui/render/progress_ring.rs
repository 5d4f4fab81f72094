use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::canvas::{Canvas, Points};

use crate::tui::app::App;

/// Points sampled around the full circle
const RING_STEPS: usize = 120;
/// Canvas extent around the unit circle
const BOUND: f64 = 1.25;

/// Unit-circle points for the first `percent` of the ring, starting at
/// twelve o'clock and running clockwise.
pub fn ring_points(percent: u8, steps: usize) -> Vec<(f64, f64)> {
    let filled = steps * usize::from(percent.min(100)) / 100;
    (0..filled)
        .map(|i| {
            let angle = FRAC_PI_2 - TAU * i as f64 / steps as f64;
            (angle.cos(), angle.sin())
        })
        .collect()
}

/// Circular gauge with the percentage in the middle and a count below.
pub fn render_progress_ring(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let ring_area = chunks[0];

    let progress = app.progress();
    let track = ring_points(100, RING_STEPS);
    let fill = ring_points(progress.percent, RING_STEPS);
    let track_color = app.theme.ring_track;
    let fill_color = app.theme.ring_color(&progress);

    let mut label_style = Style::default().fg(app.theme.text_bright);
    if progress.is_full() {
        label_style = label_style.fg(app.theme.glow).add_modifier(Modifier::BOLD);
    }
    let label = format!("{}%", progress.percent);
    // One cell in canvas units, to center the label
    let cell_w = 2.0 * BOUND / f64::from(ring_area.width.max(1));
    let label_x = -(label.len() as f64) * cell_w / 2.0;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(app.theme.background)
        .x_bounds([-BOUND, BOUND])
        .y_bounds([-BOUND, BOUND])
        .paint(move |ctx| {
            ctx.draw(&Points {
                coords: &track,
                color: track_color,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &fill,
                color: fill_color,
            });
            ctx.layer();
            ctx.print(label_x, 0.0, Line::styled(label.clone(), label_style));
        });
    frame.render_widget(canvas, ring_area);

    let caption = Paragraph::new(Line::styled(
        format!("{} of {} done", progress.completed, progress.total),
        Style::default().fg(app.theme.dim),
    ))
    .centered()
    .style(Style::default().bg(app.theme.background));
    frame.render_widget(caption, chunks[1]);
}
