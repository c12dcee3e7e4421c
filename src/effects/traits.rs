//! Effect trait
//!
//! Every effect the scheduler can play implements `Effect`. The scheduler
//! only ever sees `Box<dyn Effect>`, never the concrete type.

use std::time::Duration;

use crate::surface::Surface;

/// A self-contained animation that draws into a shared surface
///
/// Lifecycle as driven by the scheduler:
/// - `reset()` once when registered, then again every time playback starts
/// - `advance()` once per tick while the effect is active
/// - `render_into()` once per rendered frame while the effect is active
///
/// Nothing is called when playback stops. The next start always resets first.
pub trait Effect: Send {
    /// Stable identifier used as the default catalog name
    fn name(&self) -> &str;

    /// Return to the initial animation state
    fn reset(&mut self);

    /// Step the animation forward by `delta`
    fn advance(&mut self, delta: Duration);

    /// Draw the current frame. The surface has already been cleared.
    fn render_into(&self, surface: &mut Surface);
}
