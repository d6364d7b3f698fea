//! Assessment Errors
//!
//! The closed set of failures a risk assessment can end in. Each external
//! boundary (credential exchange, inference transport, response parsing)
//! keeps its own variant so callers can tell them apart.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssessmentError {
    /// A categorical answer that is not in its lookup table. The form only
    /// offers table entries, so this points at a programming or config error.
    #[error("no code for {field} option '{value}'")]
    UnknownOption { field: &'static str, value: String },

    #[error("pre-pregnancy height must be positive, got {0}")]
    InvalidHeight(f64),

    #[error("normalization failed: {0}")]
    Normalization(String),

    #[error("credential exchange failed: {0}")]
    Credential(String),

    #[error("inference request failed: {0}")]
    Transport(String),

    #[error("could not parse inference response: {0}")]
    Parse(String),
}

impl AssessmentError {
    /// Stable tag used in JSON responses and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownOption { .. } => "unknown_option",
            Self::InvalidHeight(_) => "invalid_height",
            Self::Normalization(_) => "normalization",
            Self::Credential(_) => "credential",
            Self::Transport(_) => "transport",
            Self::Parse(_) => "parse",
        }
    }

    /// True when the failure happened at (or beyond) a remote boundary.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Credential(_) | Self::Transport(_) | Self::Parse(_))
    }
}
