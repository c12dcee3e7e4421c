//! Effects system for matrix-fx
//!
//! # Architecture
//!
//! - **Traits** (`traits.rs`): the `Effect` trait every animation implements
//! - **Catalog** (`catalog.rs`): ordered, name-addressed registry of effects
//! - **Scheduler** (`scheduler.rs`): plays one effect at a time, applies
//!   requests from other threads on the next tick, reverts to idle after
//!   `PLAYBACK_DURATION`
//! - **Builtin** (`builtin/`): the stock animations
//!
//! # Usage
//!
//! ```ignore
//! let mut catalog = EffectCatalog::new();
//! builtin::register_builtin_effects(&mut catalog, 48, 16)?;
//!
//! let mut scheduler = PlaybackScheduler::new(catalog);
//! let handle = scheduler.handle(); // give this to the API server
//!
//! // Render loop
//! scheduler.tick(delta);
//! scheduler.render(&mut surface);
//! if !scheduler.is_active() {
//!     // draw idle content
//! }
//! ```

mod catalog;
mod scheduler;
mod traits;
pub mod builtin;

pub use catalog::*;
pub use scheduler::*;
pub use traits::*;

#[cfg(test)]
pub(crate) mod testing {
    //! Test doubles shared by the effects and api tests

    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use parking_lot::Mutex;

    use super::{Clock, Effect};
    use crate::surface::{Rgba, Surface};

    /// Calls observed by a `MockEffect`
    #[derive(Debug, Default)]
    pub struct EffectCalls {
        pub resets: usize,
        pub advances: usize,
        pub renders: usize,
        pub last_delta: Duration,
    }

    pub type CallLog = Arc<Mutex<EffectCalls>>;

    /// Effect that records its lifecycle calls and paints pixel (0, 0)
    pub struct MockEffect {
        name: String,
        color: Rgba,
        calls: CallLog,
    }

    impl MockEffect {
        pub fn new(name: &str, color: Rgba) -> (Self, CallLog) {
            let calls = CallLog::default();
            let effect = Self {
                name: name.to_string(),
                color,
                calls: Arc::clone(&calls),
            };
            (effect, calls)
        }
    }

    impl Effect for MockEffect {
        fn name(&self) -> &str {
            &self.name
        }

        fn reset(&mut self) {
            self.calls.lock().resets += 1;
        }

        fn advance(&mut self, delta: Duration) {
            let mut calls = self.calls.lock();
            calls.advances += 1;
            calls.last_delta = delta;
        }

        fn render_into(&self, surface: &mut Surface) {
            self.calls.lock().renders += 1;
            surface.set_pixel(0, 0, self.color);
        }
    }

    /// Clock that only moves when told to
    #[derive(Clone)]
    pub struct ManualClock {
        now: Arc<Mutex<Instant>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                now: Arc::new(Mutex::new(Instant::now())),
            }
        }

        pub fn advance(&self, by: Duration) {
            *self.now.lock() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock()
        }
    }
}
