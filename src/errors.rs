// SPDX-License-Identifier: MPL-2.0

//! Error types for the barcode mask
//!
//! The mask never fails at render time: invalid values fall back to their
//! defaults. These errors only surface from the explicit parsing helpers so
//! callers can decide whether to log or recover.

use std::fmt;

/// Result type alias using MaskError
pub type MaskResult<T> = Result<T, MaskError>;

/// Mask error type
#[derive(Debug, Clone, PartialEq)]
pub enum MaskError {
    /// Color string that is neither a known name nor a hex triplet/quad
    InvalidColor(String),
    /// Configuration document could not be read
    Config(String),
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::InvalidColor(value) => write!(f, "Invalid color: {:?}", value),
            MaskError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for MaskError {}

impl From<serde_json::Error> for MaskError {
    fn from(err: serde_json::Error) -> Self {
        MaskError::Config(err.to_string())
    }
}
