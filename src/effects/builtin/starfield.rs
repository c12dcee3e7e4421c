//! Starfield
//!
//! Stars flying toward the viewer with perspective projection.

use std::time::Duration;

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::effects::Effect;
use crate::surface::{Rgba, Surface};

const STAR_COUNT: usize = 90;
/// Depth units per second
const SPEED: f32 = 0.35;
const NEAR: f32 = 0.05;

pub struct Starfield {
    width: u32,
    height: u32,
    stars: Vec<Vec3>,
    rng: SmallRng,
}

impl Starfield {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            stars: Vec::with_capacity(STAR_COUNT),
            rng: SmallRng::from_os_rng(),
        }
    }

    fn random_star(&mut self, min_depth: f32) -> Vec3 {
        Vec3::new(
            self.rng.random_range(-1.0..1.0),
            self.rng.random_range(-1.0..1.0),
            self.rng.random_range(min_depth..1.0),
        )
    }
}

impl Effect for Starfield {
    fn name(&self) -> &str {
        "starfield"
    }

    fn reset(&mut self) {
        self.stars.clear();
        for _ in 0..STAR_COUNT {
            let star = self.random_star(0.2);
            self.stars.push(star);
        }
    }

    fn advance(&mut self, delta: Duration) {
        let dz = delta.as_secs_f32() * SPEED;
        for i in 0..self.stars.len() {
            self.stars[i].z -= dz;
            if self.stars[i].z <= NEAR {
                self.stars[i] = self.random_star(0.3);
            }
        }
    }

    fn render_into(&self, surface: &mut Surface) {
        let half_w = self.width as f32 / 2.0;
        let half_h = self.height as f32 / 2.0;
        for star in &self.stars {
            let px = star.x / star.z * half_w + half_w;
            let py = star.y / star.z * half_h + half_h;
            if px < 0.0 || px >= self.width as f32 || py < 0.0 || py >= self.height as f32 {
                continue;
            }
            let brightness = (1.0 - (star.z - NEAR) / (1.0 - NEAR)).clamp(0.0, 1.0);
            let v = (200.0 + 55.0 * brightness) as u8;
            surface.set_pixel(px as i32, py as i32, Rgba::rgb(v, v, v));
        }
    }
}
