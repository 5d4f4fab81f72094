use ratatui::buffer::Buffer;
use ratatui::layout::Position;

use crate::tui::confetti::Confetti;

/// Paint particles straight into the buffer, on top of everything else.
pub fn render_confetti(buf: &mut Buffer, confetti: &Confetti) {
    let origin = buf.area;
    for (x, y, particle) in confetti.visible() {
        let pos = Position::new(origin.x.saturating_add(x), origin.y.saturating_add(y));
        if let Some(cell) = buf.cell_mut(pos) {
            cell.set_symbol(particle.symbol()).set_fg(particle.color());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn falling_particles_show_up() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut confetti = Confetti::burst(&mut rng, 60, 20, 6);
        // Let the burst fall into view
        for _ in 0..8 {
            confetti.step();
        }
        let expected = confetti.visible().count();
        assert!(expected > 0);

        let buf = render_to_buffer(20, 6, |frame, _| {
            render_confetti(frame.buffer_mut(), &confetti);
        });
        let painted = buf
            .content
            .iter()
            .filter(|c| matches!(c.symbol(), "·" | "•" | "●"))
            .count();
        assert!(painted > 0);
        assert!(painted <= expected);
    }
}
