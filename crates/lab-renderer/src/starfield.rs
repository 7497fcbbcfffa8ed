//! Twinkling background stars

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::primitives::{palette, Frame};

pub const STAR_COUNT: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Position as a fraction of the viewport, each axis in [0, 1)
    pub position: Vec2,
    /// Diameter in pixels
    pub size: f32,
    /// Twinkle period in seconds
    pub period: f32,
    pub delay: f32,
}

impl Star {
    /// Opacity at time `t`, oscillating between 0.2 and 1.0
    pub fn alpha(&self, t: f32) -> f32 {
        let phase = ((t - self.delay).max(0.0) / self.period) * TAU;
        0.6 - 0.4 * phase.cos()
    }
}

#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new() -> Self {
        Self::with_rng(&mut rand::rng(), STAR_COUNT)
    }

    pub fn with_rng<R: Rng>(rng: &mut R, count: usize) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                position: Vec2::new(rng.random(), rng.random()),
                size: rng.random_range(1.0..3.0),
                period: rng.random_range(2.0..5.0),
                delay: rng.random_range(0.0..5.0),
            })
            .collect();
        log::debug!("generated {} stars", count);
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn render(&self, time: f32, frame: &mut Frame) {
        for star in &self.stars {
            frame.disc(
                star.position * frame.size,
                star.size * 0.5,
                palette::TEXT.with_alpha(star.alpha(time)),
            );
        }
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_star_ranges() {
        let field = Starfield::with_rng(&mut StdRng::seed_from_u64(42), STAR_COUNT);
        assert_eq!(field.stars().len(), 150);
        for star in field.stars() {
            assert!((0.0..1.0).contains(&star.position.x));
            assert!((0.0..1.0).contains(&star.position.y));
            assert!((1.0..3.0).contains(&star.size));
            assert!((2.0..5.0).contains(&star.period));
            assert!((0.0..5.0).contains(&star.delay));
        }
    }

    #[test]
    fn test_twinkle_bounds() {
        let star = Star {
            position: Vec2::ZERO,
            size: 2.0,
            period: 4.0,
            delay: 1.0,
        };
        // Dim until the delay has passed
        assert!((star.alpha(0.0) - 0.2).abs() < 1e-5);
        assert!((star.alpha(3.0) - 1.0).abs() < 1e-5);
        for i in 0..100 {
            let a = star.alpha(i as f32 * 0.13);
            assert!((0.2..=1.0 + 1e-5).contains(&a));
        }
    }

    #[test]
    fn test_render_scales_to_viewport() {
        let field = Starfield::with_rng(&mut StdRng::seed_from_u64(3), 10);
        let mut frame = Frame::new(Vec2::new(800.0, 600.0));
        field.render(0.0, &mut frame);
        assert_eq!(frame.len(), 10);
    }
}
