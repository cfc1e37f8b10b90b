//! Error types for keyframe and option parsing.
//!
//! Transport operations and registry lookups never fail; these errors only
//! come out of the parsing edges (JSON keyframe files, option values).

use thiserror::Error;

/// Result type for motion parsing operations.
pub type Result<T> = std::result::Result<T, MotionError>;

/// Errors that can occur while reading keyframes or animation options.
#[derive(Error, Debug)]
pub enum MotionError {
    /// Input was not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// JSON was well-formed but not a keyframe description.
    #[error("invalid keyframes: {0}")]
    InvalidKeyframes(String),

    /// A keyframe offset was not a percentage between 0 and 100.
    #[error("invalid keyframe offset '{0}': expected a percentage between 0 and 100")]
    InvalidOffset(String),

    /// An iteration count was neither a positive integer nor `infinite`.
    #[error("invalid iteration count '{0}': expected a positive integer or 'infinite'")]
    InvalidIteration(String),
}
