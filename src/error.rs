//! Error types for the labeling engine.

use thiserror::Error;

/// Errors that can occur while configuring or driving the labeling engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Canvas dimensions leave no usable drawing area once the offset
    /// margin is subtracted from both sides.
    #[error(
        "invalid canvas: {width}x{height} with offset {offset} leaves no usable drawing area"
    )]
    InvalidCanvas {
        /// Canvas width in pixels
        width: f64,
        /// Canvas height in pixels
        height: f64,
        /// Offset margin in pixels
        offset: f64,
    },

    /// JSON serialization or deserialization of the label set failed.
    #[error("label serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Create an invalid canvas error.
    pub fn invalid_canvas(width: f64, height: f64, offset: f64) -> Self {
        Self::InvalidCanvas {
            width,
            height,
            offset,
        }
    }
}
