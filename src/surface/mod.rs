//! Pixel surface shared between the scheduler, the effects, and the host
//!
//! A `Surface` is a plain RGBA8 framebuffer sized to the LED matrix. Effects
//! draw into it through `set_pixel`/`fill_circle`/`draw_text`, the host reads
//! it back with `as_bytes()` for whatever output it drives.

mod color;
mod font;

pub use color::Rgba;
pub use font::{GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};

/// RGBA8 framebuffer, row-major, origin top-left
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    /// Create a new surface cleared to black
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![Rgba::BLACK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill the whole surface with a single color (no blending)
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Read a pixel, `None` when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Draw a single pixel, alpha-blended over what is already there.
    /// Out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index_of(x, y) {
            let dst = self.pixels[i];
            self.pixels[i] = color.over(dst);
        }
    }

    /// Draw a filled circle centered on a sub-pixel position
    pub fn fill_circle(&mut self, center: glam::Vec2, radius: f32, color: Rgba) {
        let min_x = (center.x - radius).floor() as i32;
        let max_x = (center.x + radius).ceil() as i32;
        let min_y = (center.y - radius).floor() as i32;
        let max_y = (center.y + radius).ceil() as i32;
        let r2 = radius * radius;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let d = glam::Vec2::new(x as f32, y as f32) - center;
                if d.length_squared() <= r2 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Draw text with the built-in 3x5 font, top-left at `(x, y)`
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgba) {
        let mut pen_x = x;
        for ch in text.chars() {
            let rows = font::glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                        self.set_pixel(pen_x + col as i32, y + row as i32, color);
                    }
                }
            }
            pen_x += GLYPH_ADVANCE as i32;
        }
    }

    /// Width in pixels of `text` rendered with `draw_text`
    pub fn text_width(text: &str) -> i32 {
        let count = text.chars().count() as i32;
        if count == 0 {
            0
        } else {
            count * GLYPH_ADVANCE as i32 - 1
        }
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA8 bytes for hardware or network output
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_black() {
        let surface = Surface::new(4, 3);
        assert_eq!(surface.pixels().len(), 12);
        assert!(surface.pixels().iter().all(|p| *p == Rgba::BLACK));
        assert_eq!(surface.as_bytes().len(), 48);
    }

    #[test]
    fn test_set_pixel_ignores_out_of_bounds() {
        let mut surface = Surface::new(4, 3);
        surface.set_pixel(-1, 0, Rgba::WHITE);
        surface.set_pixel(4, 0, Rgba::WHITE);
        surface.set_pixel(0, 3, Rgba::WHITE);
        assert!(surface.pixels().iter().all(|p| *p == Rgba::BLACK));

        surface.set_pixel(3, 2, Rgba::WHITE);
        assert_eq!(surface.get(3, 2), Some(Rgba::WHITE));
        assert_eq!(surface.get(4, 2), None);
    }

    #[test]
    fn test_set_pixel_blends_alpha() {
        let mut surface = Surface::new(1, 1);
        surface.set_pixel(0, 0, Rgba::WHITE.fade(0.5));
        let p = surface.get(0, 0).unwrap_or_default();
        assert!(p.r > 120 && p.r < 135);
        assert_eq!(p.a, 255);
    }

    #[test]
    fn test_clear_overwrites_everything() {
        let mut surface = Surface::new(2, 2);
        surface.set_pixel(1, 1, Rgba::WHITE);
        surface.clear(Rgba::BLACK);
        assert!(surface.pixels().iter().all(|p| *p == Rgba::BLACK));
    }

    #[test]
    fn test_fill_circle_covers_center() {
        let mut surface = Surface::new(9, 9);
        surface.fill_circle(glam::Vec2::new(4.0, 4.0), 2.5, Rgba::WHITE);
        assert_eq!(surface.get(4, 4), Some(Rgba::WHITE));
        assert_eq!(surface.get(6, 4), Some(Rgba::WHITE));
        assert_eq!(surface.get(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(Surface::text_width(""), 0);
        assert_eq!(Surface::text_width("A"), 3);
        assert_eq!(Surface::text_width("LED MATRIX"), 39);
    }

    #[test]
    fn test_draw_text_lights_pixels() {
        let mut surface = Surface::new(8, 5);
        surface.draw_text(0, 0, "I", Rgba::WHITE);
        // Top bar of the I glyph
        assert_eq!(surface.get(0, 0), Some(Rgba::WHITE));
        assert_eq!(surface.get(1, 0), Some(Rgba::WHITE));
        assert_eq!(surface.get(2, 0), Some(Rgba::WHITE));
        assert_eq!(surface.get(0, 1), Some(Rgba::BLACK));
    }
}
