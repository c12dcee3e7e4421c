//! Built-in effects
//!
//! The stock animations that ship with matrix-fx. Registration order here is
//! the order clients see from `GET /api/animations`.

mod bouncing_balls;
mod fire;
mod matrix_rain;
mod pulse_squares;
mod rainbow_cycle;
mod scrolling_text;
mod sparkle;
mod starfield;
mod swirl;
mod wave_lines;

pub use bouncing_balls::BouncingBalls;
pub use fire::Fire;
pub use matrix_rain::MatrixRain;
pub use pulse_squares::PulseSquares;
pub use rainbow_cycle::RainbowCycle;
pub use scrolling_text::ScrollingText;
pub use sparkle::Sparkle;
pub use starfield::Starfield;
pub use swirl::Swirl;
pub use wave_lines::WaveLines;

use super::{CatalogError, EffectCatalog};

/// Message shown by the `scrolling_text` effect
pub const DEFAULT_MESSAGE: &str = "LED MATRIX";

/// Register all built-in effects for a `width` x `height` matrix
pub fn register_builtin_effects(
    catalog: &mut EffectCatalog,
    width: u32,
    height: u32,
) -> Result<(), CatalogError> {
    catalog.register_effect(Box::new(RainbowCycle::new(width, height)))?;
    catalog.register_effect(Box::new(MatrixRain::new(width, height)))?;
    catalog.register_effect(Box::new(Starfield::new(width, height)))?;
    catalog.register_effect(Box::new(Swirl::new(width, height)))?;
    catalog.register_effect(Box::new(BouncingBalls::new(width, height)))?;
    catalog.register_effect(Box::new(WaveLines::new(width, height)))?;
    catalog.register_effect(Box::new(Sparkle::new(width, height)))?;
    catalog.register_effect(Box::new(Fire::new(width, height)))?;
    catalog.register_effect(Box::new(PulseSquares::new(width, height)))?;
    catalog.register_effect(Box::new(ScrollingText::new(width, height, DEFAULT_MESSAGE)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Rgba, Surface};
    use std::time::Duration;

    const WIDTH: u32 = 48;
    const HEIGHT: u32 = 16;

    fn builtin_catalog() -> EffectCatalog {
        let mut catalog = EffectCatalog::new();
        register_builtin_effects(&mut catalog, WIDTH, HEIGHT).unwrap();
        catalog
    }

    #[test]
    fn test_builtin_names_in_order() {
        let catalog = builtin_catalog();
        assert_eq!(
            catalog.names(),
            vec![
                "rainbow_cycle",
                "matrix_rain",
                "starfield",
                "swirl",
                "bouncing_balls",
                "wave_lines",
                "sparkle",
                "fire",
                "pulse_squares",
                "scrolling_text",
            ]
        );
    }

    #[test]
    fn test_registering_twice_fails() {
        let mut catalog = builtin_catalog();
        let err = register_builtin_effects(&mut catalog, WIDTH, HEIGHT).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateName("rainbow_cycle".to_string()));
    }

    #[test]
    fn test_every_builtin_draws_something() {
        let mut catalog = builtin_catalog();
        let mut surface = Surface::new(WIDTH, HEIGHT);

        for index in 0..catalog.len() {
            let effect = catalog.get_mut(index).unwrap();
            effect.reset();
            // Long enough for the slow starters (fire rises, text scrolls in)
            for _ in 0..120 {
                effect.advance(Duration::from_millis(16));
            }
            surface.clear(Rgba::BLACK);
            effect.render_into(&mut surface);

            let lit = surface.pixels().iter().any(|p| *p != Rgba::BLACK);
            assert!(lit, "{} rendered nothing", effect.name());
        }
    }

    #[test]
    fn test_builtins_survive_tiny_and_huge_steps() {
        let mut catalog = EffectCatalog::new();
        register_builtin_effects(&mut catalog, 3, 2).unwrap();
        let mut surface = Surface::new(3, 2);

        for index in 0..catalog.len() {
            let effect = catalog.get_mut(index).unwrap();
            effect.advance(Duration::ZERO);
            effect.advance(Duration::from_secs(30));
            effect.render_into(&mut surface);
        }
    }
}
