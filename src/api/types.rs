//! API request/response types
//!
//! These types are used for JSON serialization in API endpoints.

use serde::{Deserialize, Serialize};

/// `POST /api/animations/run` body could not be parsed as JSON
pub const INVALID_JSON: &str = "Invalid JSON payload";
/// Body parsed but has no string `animation` field
pub const MISSING_ANIMATION: &str = "Missing 'animation' string field";
/// Requested animation is not in the catalog
pub const UNKNOWN_ANIMATION: &str = "Unknown animation";

/// Animation list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationsResponse {
    pub animations: Vec<String>,
}

/// Successful run response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunAnimationResponse {
    pub status: String,
    pub animation: String,
    pub duration_ms: u64,
}

impl RunAnimationResponse {
    pub fn accepted(animation: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            status: "accepted".to_string(),
            animation: animation.into(),
            duration_ms,
        }
    }
}

/// API error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    /// Valid names, included when the requested one was not found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<Vec<String>>,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            available: None,
        }
    }

    pub fn invalid_json() -> Self {
        Self::new(INVALID_JSON)
    }

    pub fn missing_animation() -> Self {
        Self::new(MISSING_ANIMATION)
    }

    pub fn unknown_animation(available: Vec<String>) -> Self {
        Self {
            error: UNKNOWN_ANIMATION.to_string(),
            available: Some(available),
        }
    }
}
