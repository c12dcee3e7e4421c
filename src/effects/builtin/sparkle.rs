//! Sparkle
//!
//! Random pixels flash bright and decay.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::effects::Effect;
use crate::surface::{Rgba, Surface};

/// New sparkles per step
const SPARKS_PER_STEP: usize = 8;
/// Brightness lost per second (fraction)
const DECAY: f32 = 3.5;
const FLASH: Rgba = Rgba::rgb(255, 255, 200);

pub struct Sparkle {
    width: u32,
    height: u32,
    brightness: Vec<f32>,
    rng: SmallRng,
}

impl Sparkle {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            brightness: vec![0.0; width as usize * height as usize],
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl Effect for Sparkle {
    fn name(&self) -> &str {
        "sparkle"
    }

    fn reset(&mut self) {
        self.brightness.fill(0.0);
    }

    fn advance(&mut self, delta: Duration) {
        let keep = (1.0 - delta.as_secs_f32() * DECAY).max(0.0);
        for b in &mut self.brightness {
            *b *= keep;
        }
        for _ in 0..SPARKS_PER_STEP {
            let i = self.rng.random_range(0..self.brightness.len());
            self.brightness[i] = 1.0;
        }
    }

    fn render_into(&self, surface: &mut Surface) {
        for y in 0..self.height {
            for x in 0..self.width {
                let value = self.brightness[(y * self.width + x) as usize];
                let color = if value > 0.8 {
                    FLASH
                } else {
                    Rgba::from_hsv(60.0, 0.2, value)
                };
                surface.set_pixel(x as i32, y as i32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparks_decay_and_reset_clears() {
        let mut effect = Sparkle::new(8, 8);
        effect.advance(Duration::from_millis(16));
        assert!(effect.brightness.iter().any(|b| *b == 1.0));
        assert!(effect.brightness.iter().all(|b| (0.0..=1.0).contains(b)));

        effect.reset();
        assert!(effect.brightness.iter().all(|b| *b == 0.0));
    }
}
