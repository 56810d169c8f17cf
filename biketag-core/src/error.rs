//! Error types for biketag-core
//!
//! Lookup misses are not errors: the indexer and assemblers return `None`
//! and extractors fall back to defaults. Only failures of the required data
//! sources (album, posts) surface here.

use crate::sources::SourceError;
use thiserror::Error;

/// Resolution error
#[derive(Debug, Error)]
pub enum BikeTagError {
    /// Album or post source failed
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Required collaborator is not configured
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// biketag-common error
    #[error("Common error: {0}")]
    Common(#[from] biketag_common::Error),
}

/// Result type for resolution operations
pub type BikeTagResult<T> = Result<T, BikeTagError>;
