//! Swirl
//!
//! Rotating spiral of hue keyed to angle and distance from the center.

use std::f32::consts::TAU;
use std::time::Duration;

use glam::Vec2;

use crate::effects::Effect;
use crate::surface::{Rgba, Surface};

pub struct Swirl {
    width: u32,
    height: u32,
    time: f32,
}

impl Swirl {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            time: 0.0,
        }
    }
}

impl Effect for Swirl {
    fn name(&self) -> &str {
        "swirl"
    }

    fn reset(&mut self) {
        self.time = 0.0;
    }

    fn advance(&mut self, delta: Duration) {
        self.time += delta.as_secs_f32() * 0.9;
    }

    fn render_into(&self, surface: &mut Surface) {
        let center = Vec2::new((self.width - 1) as f32 / 2.0, (self.height - 1) as f32 / 2.0);
        for y in 0..self.height {
            for x in 0..self.width {
                let d = Vec2::new(x as f32, y as f32) - center;
                let dist = d.length();
                let angle = d.y.atan2(d.x);
                let wave = (dist * 0.6 - self.time * 4.0 + angle * 2.0).sin();
                let brightness = ((wave + 1.0) * 0.5).clamp(0.0, 1.0);
                let hue = (angle / TAU + 0.5).rem_euclid(1.0);
                let color = Rgba::from_hsv(hue * 360.0, 0.75, 0.3 + 0.7 * brightness);
                surface.set_pixel(x as i32, y as i32, color);
            }
        }
    }
}
