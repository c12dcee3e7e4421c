//! 8-bit RGBA color

use bytemuck::{Pod, Zeroable};

/// RGBA8 color, laid out for direct byte output
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Build an opaque color from hue (degrees), saturation and value (0-1)
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let h = hue.rem_euclid(360.0);
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);

        let channel = |n: f32| {
            let k = (n + h / 60.0) % 6.0;
            let k = k.min(4.0 - k).clamp(0.0, 1.0);
            v - v * s * k
        };

        Self::rgb(to_u8(channel(5.0)), to_u8(channel(3.0)), to_u8(channel(1.0)))
    }

    /// Same color with alpha scaled by `alpha` (0-1)
    pub fn fade(self, alpha: f32) -> Self {
        Self {
            a: to_u8(alpha.clamp(0.0, 1.0) * (self.a as f32 / 255.0)),
            ..self
        }
    }

    /// Source-over composite of `self` onto `dst`
    pub fn over(self, dst: Rgba) -> Rgba {
        match self.a {
            255 => self,
            0 => dst,
            a => {
                let sa = a as f32 / 255.0;
                let mix = |s: u8, d: u8| to_u8((s as f32 * sa + d as f32 * (1.0 - sa)) / 255.0);
                Rgba {
                    r: mix(self.r, dst.r),
                    g: mix(self.g, dst.g),
                    b: mix(self.b, dst.b),
                    a: to_u8(sa + (dst.a as f32 / 255.0) * (1.0 - sa)),
                }
            }
        }
    }
}

fn to_u8(unit: f32) -> u8 {
    (unit.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hsv_primaries() {
        assert_eq!(Rgba::from_hsv(0.0, 1.0, 1.0), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::from_hsv(120.0, 1.0, 1.0), Rgba::rgb(0, 255, 0));
        assert_eq!(Rgba::from_hsv(240.0, 1.0, 1.0), Rgba::rgb(0, 0, 255));
        assert_eq!(Rgba::from_hsv(360.0, 1.0, 1.0), Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn test_from_hsv_zero_saturation_is_grey() {
        let c = Rgba::from_hsv(200.0, 0.0, 0.5);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }

    #[test]
    fn test_over_opaque_and_transparent() {
        let red = Rgba::rgb(255, 0, 0);
        assert_eq!(red.over(Rgba::BLACK), red);
        assert_eq!(red.fade(0.0).over(Rgba::BLACK), Rgba::BLACK);
    }
}
