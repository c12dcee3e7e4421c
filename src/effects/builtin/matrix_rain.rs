//! Matrix Rain
//!
//! Green falling code columns with a bright head and fading tail.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::effects::Effect;
use crate::surface::{Rgba, Surface};

const HEAD: Rgba = Rgba::rgb(180, 255, 180);

#[derive(Debug, Clone, Copy)]
struct Column {
    x: i32,
    y: f32,
    speed: f32,
    length: i32,
}

pub struct MatrixRain {
    width: i32,
    height: i32,
    columns: Vec<Column>,
    rng: SmallRng,
}

impl MatrixRain {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) as i32,
            height: height.max(1) as i32,
            columns: Vec::new(),
            rng: SmallRng::from_os_rng(),
        }
    }

    fn random_speed(&mut self) -> f32 {
        self.rng.random_range(8.0..20.0)
    }

    fn random_length(&mut self) -> i32 {
        self.rng.random_range(6..=18)
    }
}

impl Effect for MatrixRain {
    fn name(&self) -> &str {
        "matrix_rain"
    }

    fn reset(&mut self) {
        self.columns.clear();
        // One drop every other column, each drop two pixels wide
        for x in (0..self.width).step_by(2) {
            let y = self.rng.random_range(-self.height..=self.height) as f32;
            let speed = self.random_speed();
            let length = self.random_length();
            self.columns.push(Column { x, y, speed, length });
        }
    }

    fn advance(&mut self, delta: Duration) {
        let dt = delta.as_secs_f32();
        for i in 0..self.columns.len() {
            let mut col = self.columns[i];
            col.y += col.speed * dt;
            if col.y - col.length as f32 > self.height as f32 {
                col.y = self.rng.random_range(-self.height..=0) as f32;
                col.speed = self.random_speed();
                col.length = self.random_length();
            }
            self.columns[i] = col;
        }
    }

    fn render_into(&self, surface: &mut Surface) {
        for col in &self.columns {
            for i in 0..col.length {
                let y = col.y as i32 - i;
                if y < 0 || y >= self.height {
                    continue;
                }
                let intensity = 1.0 - i as f32 / col.length as f32;
                let color = if i == 0 {
                    HEAD
                } else {
                    let g = (intensity * 255.0).clamp(40.0, 255.0) as u8;
                    Rgba::rgb(40, g, 40)
                };
                surface.set_pixel(col.x, y, color);
                if col.x + 1 < self.width {
                    surface.set_pixel(col.x + 1, y, color.fade(0.7));
                }
            }
        }
    }
}
