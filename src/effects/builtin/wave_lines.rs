//! Wave Lines
//!
//! A thick, color-shifting sine ribbon across the matrix.

use std::time::Duration;

use crate::effects::Effect;
use crate::surface::{Rgba, Surface};

/// Half thickness of the ribbon in pixels
const HALF_THICKNESS: i32 = 2;

pub struct WaveLines {
    width: u32,
    height: u32,
    time: f32,
}

impl WaveLines {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            time: 0.0,
        }
    }
}

impl Effect for WaveLines {
    fn name(&self) -> &str {
        "wave_lines"
    }

    fn reset(&mut self) {
        self.time = 0.0;
    }

    fn advance(&mut self, delta: Duration) {
        self.time += delta.as_secs_f32();
    }

    fn render_into(&self, surface: &mut Surface) {
        let h = self.height as f32;
        for x in 0..self.width {
            let xf = x as f32;
            let base = (self.time * 2.0 + xf * 0.25).sin();
            let offset = (self.time + xf * 0.13).cos() * 4.0;
            let center_y = h / 2.0 + offset;
            let hue = (self.time * 40.0 + xf * 2.5).rem_euclid(360.0);
            let color = Rgba::from_hsv(hue, 0.8, 0.9);
            let y = (center_y + base * (h / 3.0)) as i32;

            for dy in -HALF_THICKNESS..=HALF_THICKNESS {
                let fade = 1.0 - dy.abs() as f32 / 3.0;
                surface.set_pixel(x as i32, y + dy, color.fade(fade.clamp(0.1, 1.0)));
            }
        }
    }
}
