//! Playback scheduler - decides which effect is on the matrix
//!
//! The scheduler owns the catalog and runs on the render thread. Other
//! threads (the HTTP control server) talk to it through a `PlaybackHandle`,
//! which can only park a pending request and read the active flag.
//!
//! A request is applied in two phases:
//! 1. `request_by_name()` resolves the name and stores the index as pending
//!    (any thread, last write wins)
//! 2. the next `tick()` takes the pending index and starts that effect
//!
//! An effect plays for `PLAYBACK_DURATION` and then the scheduler returns to
//! idle. A new request always replaces whatever is playing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::catalog::{CatalogIndex, EffectCatalog};
use crate::surface::{Rgba, Surface};

/// How long an effect plays before reverting to idle. Same for every effect.
pub const PLAYBACK_DURATION: Duration = Duration::from_secs(8);

/// Source of "now" for deadline handling
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Monotonic wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// What the render thread is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaybackState {
    Idle,
    Playing { index: usize, deadline: Instant },
}

/// State shared between the scheduler and its handles
struct SharedPlayback {
    index: Arc<CatalogIndex>,
    /// Request waiting for the next tick
    pending: Mutex<Option<usize>>,
    /// Mirrors `PlaybackState::Playing`
    active: AtomicBool,
}

impl SharedPlayback {
    fn request_by_name(&self, name: &str) -> bool {
        let Some(index) = self.index.lookup(name) else {
            tracing::debug!(effect = name, "Rejected request for unknown effect");
            return false;
        };

        *self.pending.lock() = Some(index);
        tracing::debug!(effect = name, "Effect request queued");
        true
    }
}

/// Thread-safe, cloneable entry point into a `PlaybackScheduler`
///
/// Handles never touch the effects themselves, so requesting never waits on
/// rendering.
#[derive(Clone)]
pub struct PlaybackHandle {
    shared: Arc<SharedPlayback>,
}

impl PlaybackHandle {
    /// Queue `name` to start on the next tick. Returns false for unknown names.
    pub fn request_by_name(&self, name: &str) -> bool {
        self.shared.request_by_name(name)
    }

    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }

    /// Effect names in catalog order
    pub fn names(&self) -> Vec<String> {
        self.shared.index.names()
    }

    /// Playback duration reported to API clients
    pub fn duration_ms(&self) -> u64 {
        PLAYBACK_DURATION.as_millis() as u64
    }
}

impl std::fmt::Debug for PlaybackHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackHandle")
            .field("effects", &self.shared.index.len())
            .field("active", &self.is_active())
            .finish()
    }
}

/// Plays one effect at a time from a catalog
pub struct PlaybackScheduler {
    catalog: EffectCatalog,
    shared: Arc<SharedPlayback>,
    state: PlaybackState,
    clock: Box<dyn Clock>,
}

impl PlaybackScheduler {
    /// Create a scheduler over a finished catalog, using the system clock
    pub fn new(catalog: EffectCatalog) -> Self {
        Self::with_clock(catalog, SystemClock)
    }

    /// Create a scheduler with a custom time source
    pub fn with_clock(catalog: EffectCatalog, clock: impl Clock + 'static) -> Self {
        let shared = Arc::new(SharedPlayback {
            index: catalog.index(),
            pending: Mutex::new(None),
            active: AtomicBool::new(false),
        });

        Self {
            catalog,
            shared,
            state: PlaybackState::Idle,
            clock: Box::new(clock),
        }
    }

    /// Handle for other threads
    pub fn handle(&self) -> PlaybackHandle {
        PlaybackHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn catalog(&self) -> &EffectCatalog {
        &self.catalog
    }

    /// Queue `name` to start on the next tick. Returns false for unknown names.
    pub fn request_by_name(&self, name: &str) -> bool {
        self.shared.request_by_name(name)
    }

    /// Apply any pending request, advance the active effect and expire it
    /// once its deadline has passed. Call once per frame from the render loop.
    pub fn tick(&mut self, delta: Duration) {
        let request = self.shared.pending.lock().take();
        if let Some(index) = request {
            self.start(index);
        }

        let PlaybackState::Playing { index, deadline } = self.state else {
            return;
        };

        match self.catalog.get_mut(index) {
            Some(effect) => effect.advance(delta),
            None => {
                self.stop();
                return;
            }
        }

        if self.clock.now() >= deadline {
            self.stop();
        }
    }

    /// Clear `surface` and draw the active effect into it, if any.
    ///
    /// When idle the surface is left cleared so the host can draw its own
    /// content on top.
    pub fn render(&self, surface: &mut Surface) {
        surface.clear(Rgba::BLACK);
        if let PlaybackState::Playing { index, .. } = self.state {
            if let Some(effect) = self.catalog.get(index) {
                effect.render_into(surface);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }

    /// Effect names in catalog order
    pub fn names(&self) -> Vec<String> {
        self.catalog.names()
    }

    /// Name of the effect currently playing
    pub fn active_name(&self) -> Option<&str> {
        match self.state {
            PlaybackState::Playing { index, .. } => self.catalog.name(index),
            PlaybackState::Idle => None,
        }
    }

    /// Time left before the active effect expires
    pub fn remaining(&self) -> Option<Duration> {
        match self.state {
            PlaybackState::Playing { deadline, .. } => {
                Some(deadline.saturating_duration_since(self.clock.now()))
            }
            PlaybackState::Idle => None,
        }
    }

    fn start(&mut self, index: usize) {
        let Some(effect) = self.catalog.get_mut(index) else {
            return;
        };
        effect.reset();

        let deadline = self.clock.now() + PLAYBACK_DURATION;
        let replaced = self.active_name().map(str::to_owned);
        self.state = PlaybackState::Playing { index, deadline };
        self.shared.active.store(true, Ordering::Release);

        tracing::info!(
            effect = self.catalog.name(index).unwrap_or_default(),
            replaced = replaced.as_deref(),
            duration_ms = PLAYBACK_DURATION.as_millis() as u64,
            "Effect started"
        );
    }

    fn stop(&mut self) {
        if let Some(name) = self.active_name() {
            tracing::info!(effect = name, "Effect finished");
        }
        self.state = PlaybackState::Idle;
        self.shared.active.store(false, Ordering::Release);
    }
}
