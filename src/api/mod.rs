//! HTTP control API for matrix-fx
//!
//! Lets a network client list the available animations and ask the
//! scheduler to play one. The API never schedules anything itself, it only
//! forwards to a `PlaybackHandle`.

pub mod routes;
pub mod server;
pub mod types;

pub use routes::create_router;
pub use server::{ControlServer, ServerConfig, ServerError};
pub use types::*;
