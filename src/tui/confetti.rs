//! Celebration particles.
//!
//! A burst spawns particles in the band just above the visible area. Each
//! frame a particle falls by its own speed and drifts sideways by
//! `sin(tilt)`. The animation is over once every particle has fallen past
//! the bottom edge.

use rand::Rng;
use ratatui::style::Color;

/// Hue range of the burst, in degrees (reds through yellows)
const HUE_RANGE: std::ops::Range<f32> = 0.0..60.0;
const SIZE_RANGE: std::ops::Range<f32> = 2.0..8.0;
/// Rows per frame
const SPEED_RANGE: std::ops::Range<f32> = 0.3..0.9;
const TILT_RANGE: std::ops::Range<f32> = -10.0..0.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub hue: f32,
    pub tilt: f32,
}

impl Particle {
    pub fn color(&self) -> Color {
        hue_to_color(self.hue)
    }

    pub fn symbol(&self) -> &'static str {
        if self.size < 4.0 {
            "·"
        } else if self.size < 6.0 {
            "•"
        } else {
            "●"
        }
    }
}

#[derive(Debug, Clone)]
pub struct Confetti {
    particles: Vec<Particle>,
    width: u16,
    height: u16,
}

impl Confetti {
    /// `count` particles over a `width` x `height` cell area. An empty area
    /// yields an animation that is already finished.
    pub fn burst<R: Rng>(rng: &mut R, count: usize, width: u16, height: u16) -> Self {
        let mut particles = Vec::new();
        if width > 0 && height > 0 {
            let w = f32::from(width);
            let h = f32::from(height);
            particles.reserve(count);
            for _ in 0..count {
                particles.push(Particle {
                    x: rng.gen_range(0.0..w),
                    y: rng.gen_range(-h..0.0),
                    size: rng.gen_range(SIZE_RANGE),
                    speed: rng.gen_range(SPEED_RANGE),
                    hue: rng.gen_range(HUE_RANGE),
                    tilt: rng.gen_range(TILT_RANGE),
                });
            }
        }
        Confetti {
            particles,
            width,
            height,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Follow a terminal resize. Particles keep their positions.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Advance one frame and drop particles that left the area.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.y += p.speed;
            p.x += p.tilt.sin();
        }
        let bottom = f32::from(self.height);
        self.particles.retain(|p| p.y < bottom);
    }

    pub fn is_finished(&self) -> bool {
        self.particles.is_empty()
    }

    /// Cells to paint this frame: particles inside the area, by position.
    pub fn visible(&self) -> impl Iterator<Item = (u16, u16, &Particle)> {
        let (w, h) = (f32::from(self.width), f32::from(self.height));
        self.particles.iter().filter_map(move |p| {
            if p.x < 0.0 || p.y < 0.0 || p.x >= w || p.y >= h {
                return None;
            }
            Some((p.x as u16, p.y as u16, p))
        })
    }
}

/// Fully saturated, half-lightness HSL hue (degrees) as an RGB color.
pub fn hue_to_color(hue: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let channel = |v: f32| (v * 255.0).round() as u8;
    Color::Rgb(channel(r), channel(g), channel(b))
}
