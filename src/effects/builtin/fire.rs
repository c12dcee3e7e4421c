//! Fire
//!
//! Classic heat-diffusion fire: the bottom row is seeded with random heat,
//! every row above averages the heat below it and cools a little.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::effects::Effect;
use crate::surface::{Rgba, Surface};

/// Maximum cooling per cell per step
const COOLING: i32 = 12;

pub struct Fire {
    width: usize,
    height: usize,
    heat: Vec<u8>,
    rng: SmallRng,
}

impl Fire {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1) as usize;
        let height = height.max(1) as usize;
        Self {
            width,
            height,
            heat: vec![0; width * height],
            rng: SmallRng::from_os_rng(),
        }
    }

    fn at(&self, x: usize, y: usize) -> i32 {
        self.heat[y * self.width + x] as i32
    }
}

impl Effect for Fire {
    fn name(&self) -> &str {
        "fire"
    }

    fn reset(&mut self) {
        self.heat.fill(0);
    }

    /// One diffusion step per frame regardless of `delta`
    fn advance(&mut self, _delta: Duration) {
        let (w, h) = (self.width, self.height);
        let bottom = (h - 1) * w;
        for x in 0..w {
            self.heat[bottom + x] = self.rng.random_range(160..=255);
        }

        for y in (0..h.saturating_sub(1)).rev() {
            let below = y + 1;
            let far = (y + 2).min(h - 1);
            for x in 0..w {
                let left = x.saturating_sub(1);
                let right = (x + 1).min(w - 1);
                let sum = self.at(x, below) + self.at(left, below) + self.at(right, below) + self.at(x, far);
                let cooled = sum / 4 - self.rng.random_range(0..=COOLING);
                self.heat[y * w + x] = cooled.clamp(0, 255) as u8;
            }
        }
    }

    fn render_into(&self, surface: &mut Surface) {
        for y in 0..self.height {
            for x in 0..self.width {
                let value = self.at(x, y) as f32 / 255.0;
                let hue = 20.0 + value * 40.0;
                let color = Rgba::from_hsv(hue, 1.0, value.max(0.2));
                surface.set_pixel(x as i32, y as i32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottom_row_is_seeded_hot() {
        let mut effect = Fire::new(16, 8);
        effect.advance(Duration::from_millis(16));
        for x in 0..16 {
            assert!(effect.at(x, 7) >= 160);
        }
    }

    #[test]
    fn test_heat_rises_over_time() {
        let mut effect = Fire::new(16, 8);
        for _ in 0..30 {
            effect.advance(Duration::from_millis(16));
        }
        let row: i32 = (0..16).map(|x| effect.at(x, 5)).sum();
        assert!(row > 0);

        effect.reset();
        assert!(effect.heat.iter().all(|v| *v == 0));
    }
}
