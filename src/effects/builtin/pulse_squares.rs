//! Pulse Squares
//!
//! Concentric square rings expanding outward from the center.

use std::time::Duration;

use crate::effects::Effect;
use crate::surface::{Rgba, Surface};

/// Ring growth in pixels per second
const RING_SPEED: f32 = 14.0;
/// Distance over which a ring fades out on either side
const RING_WIDTH: f32 = 2.5;

pub struct PulseSquares {
    width: u32,
    height: u32,
    /// Ring radii, oldest (largest) first
    rings: Vec<f32>,
    time: f32,
}

impl PulseSquares {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            rings: Vec::new(),
            time: 0.0,
        }
    }

    fn extent(&self) -> f32 {
        self.width.max(self.height) as f32
    }
}

impl Effect for PulseSquares {
    fn name(&self) -> &str {
        "pulse_squares"
    }

    fn reset(&mut self) {
        self.rings.clear();
        self.time = 0.0;
    }

    fn advance(&mut self, delta: Duration) {
        let dt = delta.as_secs_f32();
        self.time += dt;

        let spawn_gap = self.extent() / 6.0;
        if self.rings.last().map_or(true, |r| *r > spawn_gap) {
            self.rings.push(0.0);
        }
        for r in &mut self.rings {
            *r += RING_SPEED * dt;
        }
        let extent = self.extent();
        self.rings.retain(|r| *r <= extent);
    }

    fn render_into(&self, surface: &mut Surface) {
        let cx = (self.width - 1) as f32 / 2.0;
        let cy = (self.height - 1) as f32 / 2.0;
        for y in 0..self.height {
            for x in 0..self.width {
                // Chebyshev distance gives square rings
                let dist = (x as f32 - cx).abs().max((y as f32 - cy).abs());
                let brightness = self
                    .rings
                    .iter()
                    .map(|r| 1.0 - (dist - r).abs() / RING_WIDTH)
                    .fold(0.0_f32, f32::max);
                let hue = (self.time * 60.0 + dist * 10.0).rem_euclid(360.0);
                let color = Rgba::from_hsv(hue, 0.7, 0.2 + 0.8 * brightness);
                surface.set_pixel(x as i32, y as i32, color);
            }
        }
    }
}
