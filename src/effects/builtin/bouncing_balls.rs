//! Bouncing Balls
//!
//! A handful of colored balls ricocheting off the matrix edges.

use std::time::Duration;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::effects::Effect;
use crate::surface::{Rgba, Surface};

const BALL_COUNT: usize = 5;
const RADIUS: f32 = 2.5;
/// Distance kept between a ball center and the edges
const MARGIN: f32 = 2.0;
const MAX_SPEED: f32 = 24.0;

#[derive(Debug, Clone, Copy)]
struct Ball {
    pos: Vec2,
    vel: Vec2,
    color: Rgba,
}

pub struct BouncingBalls {
    width: f32,
    height: f32,
    balls: Vec<Ball>,
    rng: SmallRng,
}

impl BouncingBalls {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
            balls: Vec::with_capacity(BALL_COUNT),
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Random coordinate in `[4, extent - 4]`, or the middle on tiny matrices
    fn random_coord(&mut self, extent: f32) -> f32 {
        let span = extent - 8.0;
        if span > 0.0 {
            4.0 + self.rng.random::<f32>() * span
        } else {
            extent / 2.0
        }
    }
}

impl Effect for BouncingBalls {
    fn name(&self) -> &str {
        "bouncing_balls"
    }

    fn reset(&mut self) {
        self.balls.clear();
        for i in 0..BALL_COUNT {
            let pos = Vec2::new(self.random_coord(self.width), self.random_coord(self.height));
            let vel = Vec2::new(
                self.rng.random_range(-MAX_SPEED..MAX_SPEED),
                self.rng.random_range(-MAX_SPEED..MAX_SPEED),
            );
            let color = Rgba::from_hsv(i as f32 * 60.0, 0.9, 1.0);
            self.balls.push(Ball { pos, vel, color });
        }
    }

    fn advance(&mut self, delta: Duration) {
        let dt = delta.as_secs_f32();
        let max = Vec2::new(self.width - 1.0 - MARGIN, self.height - 1.0 - MARGIN);

        for ball in &mut self.balls {
            ball.pos += ball.vel * dt;

            if ball.pos.x < MARGIN {
                ball.pos.x = MARGIN;
                ball.vel.x = -ball.vel.x;
            }
            if ball.pos.x > max.x {
                ball.pos.x = max.x;
                ball.vel.x = -ball.vel.x;
            }
            if ball.pos.y < MARGIN {
                ball.pos.y = MARGIN;
                ball.vel.y = -ball.vel.y;
            }
            if ball.pos.y > max.y {
                ball.pos.y = max.y;
                ball.vel.y = -ball.vel.y;
            }
        }
    }

    fn render_into(&self, surface: &mut Surface) {
        for ball in &self.balls {
            surface.fill_circle(ball.pos, RADIUS, ball.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balls_stay_inside_bounds() {
        let mut effect = BouncingBalls::new(48, 16);
        effect.reset();
        assert_eq!(effect.balls.len(), BALL_COUNT);

        for _ in 0..500 {
            effect.advance(Duration::from_millis(33));
            for ball in &effect.balls {
                assert!(ball.pos.x >= MARGIN && ball.pos.x <= 48.0 - 1.0 - MARGIN);
                assert!(ball.pos.y >= MARGIN && ball.pos.y <= 16.0 - 1.0 - MARGIN);
            }
        }
    }
}
