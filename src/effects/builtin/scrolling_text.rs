//! Scrolling Text
//!
//! A message marquee scrolling right to left, repeated back to back.

use std::time::Duration;

use crate::effects::Effect;
use crate::surface::{Rgba, Surface, GLYPH_HEIGHT};

/// Scroll speed in pixels per second
const SPEED: f32 = 24.0;
/// Gap between repeats of the message
const GAP: i32 = 4;

pub struct ScrollingText {
    width: u32,
    height: u32,
    message: String,
    text_width: i32,
    offset: f32,
}

impl ScrollingText {
    pub fn new(width: u32, height: u32, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            width: width.max(1),
            height: height.max(1),
            text_width: Surface::text_width(&message),
            message,
            offset: 0.0,
        }
    }
}

impl Effect for ScrollingText {
    fn name(&self) -> &str {
        "scrolling_text"
    }

    fn reset(&mut self) {
        self.text_width = Surface::text_width(&self.message);
        self.offset = self.width as f32;
    }

    fn advance(&mut self, delta: Duration) {
        self.offset -= delta.as_secs_f32() * SPEED;
        if self.offset < -(self.text_width as f32) {
            self.offset = self.width as f32;
        }
    }

    fn render_into(&self, surface: &mut Surface) {
        let y = self.height as i32 / 2 - GLYPH_HEIGHT as i32 / 2;
        let x = self.offset as i32;
        surface.draw_text(x, y, &self.message, Rgba::WHITE);
        surface.draw_text(x + self.text_width + GAP, y, &self.message, Rgba::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_off_screen_and_wraps() {
        let mut effect = ScrollingText::new(48, 16, "HI");
        effect.reset();
        assert_eq!(effect.offset, 48.0);

        // Scroll past the end of the message
        effect.advance(Duration::from_secs(3));
        assert_eq!(effect.offset, 48.0);
    }
}
