//! Error taxonomy for the renderer.
//!
//! Every variant here is recoverable. Call sites log the error through
//! `tracing` and substitute a fallback.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PulselineError>;

#[derive(Debug, Error)]
pub enum PulselineError {
    #[error("[PL-1001] invalid color format: {input:?}")]
    InvalidColorFormat { input: String },

    #[error("[PL-1002] theme has no color for token {token:?}")]
    UnknownToken { token: String },

    #[error("[PL-1003] unknown separator style {name:?}")]
    UnknownSeparatorStyle { name: String },

    #[error("[PL-2001] color cache corrupt: {details}")]
    CacheCorrupt { details: String },

    #[error("[PL-3001] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[PL-3002] invalid stdin payload: {details}")]
    InvalidPayload { details: String },

    #[error("[PL-4001] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PulselineError {
    pub fn invalid_color(input: &str) -> Self {
        Self::InvalidColorFormat {
            input: input.to_string(),
        }
    }

    pub fn unknown_token(token: &str) -> Self {
        Self::UnknownToken {
            token: token.to_string(),
        }
    }

    pub fn cache_corrupt(details: impl Into<String>) -> Self {
        Self::CacheCorrupt {
            details: details.into(),
        }
    }

    /// Stable code prefix, e.g. `PL-1001`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidColorFormat { .. } => "PL-1001",
            Self::UnknownToken { .. } => "PL-1002",
            Self::UnknownSeparatorStyle { .. } => "PL-1003",
            Self::CacheCorrupt { .. } => "PL-2001",
            Self::ConfigParse { .. } => "PL-3001",
            Self::InvalidPayload { .. } => "PL-3002",
            Self::Io { .. } => "PL-4001",
        }
    }
}
