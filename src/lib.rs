//! matrix-fx library
//!
//! Plays one animation at a time on an LED matrix surface and accepts
//! effect switch requests over a small HTTP control API.

pub mod api;
pub mod effects;
pub mod output;
pub mod settings;
pub mod surface;
pub mod telemetry;

pub use api::{ControlServer, ServerConfig, ServerError};
pub use effects::{
    Effect, EffectCatalog, PlaybackHandle, PlaybackScheduler, PLAYBACK_DURATION,
};
pub use output::{FrameSink, NullSink, TerminalSink};
pub use settings::{Settings, SettingsError};
pub use surface::{Rgba, Surface};
