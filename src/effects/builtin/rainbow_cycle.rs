//! Rainbow Cycle
//!
//! Diagonal rainbow gradient drifting across the matrix.

use std::time::Duration;

use crate::effects::Effect;
use crate::surface::{Rgba, Surface};

/// Full cycles per second
const SPEED: f32 = 0.12;

pub struct RainbowCycle {
    width: u32,
    height: u32,
    phase: f32,
}

impl RainbowCycle {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            phase: 0.0,
        }
    }
}

impl Effect for RainbowCycle {
    fn name(&self) -> &str {
        "rainbow_cycle"
    }

    fn reset(&mut self) {
        self.phase = 0.0;
    }

    fn advance(&mut self, delta: Duration) {
        self.phase = (self.phase + delta.as_secs_f32() * SPEED).fract();
    }

    fn render_into(&self, surface: &mut Surface) {
        let w = self.width as f32;
        let h = self.height as f32;
        for y in 0..self.height {
            for x in 0..self.width {
                let hue = (x as f32 / w + self.phase + y as f32 / (h * 2.0)).fract();
                surface.set_pixel(x as i32, y as i32, Rgba::from_hsv(hue * 360.0, 1.0, 1.0));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_wraps() {
        let mut effect = RainbowCycle::new(8, 4);
        effect.advance(Duration::from_secs(10));
        assert!((0.0..1.0).contains(&effect.phase));
        effect.reset();
        assert_eq!(effect.phase, 0.0);
    }
}
