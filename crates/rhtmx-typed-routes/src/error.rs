// File: src/error.rs
// Purpose: Error type for route classification and pattern synthesis

use thiserror::Error;

/// Errors produced while turning a route tree into typed declarations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypegenError {
    /// A path segment has a shape the synthesizer refuses to render
    #[error("unsupported segment `{segment}` in route `{key}`: {reason}")]
    UnsupportedSegment {
        key: String,
        segment: String,
        reason: String,
    },
}

impl TypegenError {
    pub(crate) fn unsupported(key: &str, segment: &str, reason: impl Into<String>) -> Self {
        Self::UnsupportedSegment {
            key: key.to_string(),
            segment: segment.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = TypegenError> = std::result::Result<T, E>;
