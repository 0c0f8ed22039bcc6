//! Crate-level error type for a resize session.

use std::path::PathBuf;

use thiserror::Error;

use crate::decode::LoadError;
use crate::encode::EncodeError;
use crate::filter::FilterError;
use crate::geometry::PlanError;

/// Every failure a session can report. None of them are retried.
#[derive(Debug, Error)]
pub enum ImageResizeError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A rotate or flip primitive failed while correcting orientation.
    #[error("Orientation correction failed: {0}")]
    Orientation(String),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("Canvas allocation failed: {0}")]
    Canvas(String),

    #[error("Resample failed: {0}")]
    Resample(String),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Shorthand for session results.
pub type Result<T> = std::result::Result<T, ImageResizeError>;
