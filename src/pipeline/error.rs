//! Errors that abort a pipeline run.

use thiserror::Error;

use crate::error::ErrorKind;
use crate::models::SourceId;
use crate::repository::StoreError;
use crate::scrapers::ExtractError;

/// Why a single source produced nothing.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("extractor task panicked: {0}")]
    Panicked(String),
}

impl SourceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Extract(e) => e.kind(),
            Self::Panicked(_) => ErrorKind::Transient,
        }
    }
}

#[derive(Debug, Error)]
#[error("{source_id}: {error}")]
pub struct SourceFailure {
    pub source_id: SourceId,
    #[source]
    pub error: SourceError,
}

impl SourceFailure {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    /// At least one source failed. Nothing from this run was persisted.
    #[error("extraction failed: {}", describe(.0))]
    Extraction(Vec<SourceFailure>),

    #[error("cannot read watermark: {0}")]
    Watermark(#[source] StoreError),

    #[error("cannot persist listings: {0}")]
    Persist(#[source] StoreError),

    #[error("cannot advance watermark: {0}")]
    Checkpoint(#[source] StoreError),

    #[error("cannot load subscribers: {0}")]
    Subscribers(#[source] StoreError),
}

impl RunError {
    /// Structural if any source broke structurally, otherwise the class of
    /// the underlying failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Extraction(failures) => {
                if failures.iter().any(|f| f.kind() == ErrorKind::Structural) {
                    ErrorKind::Structural
                } else {
                    ErrorKind::Transient
                }
            }
            Self::Watermark(_) | Self::Persist(_) | Self::Checkpoint(_) | Self::Subscribers(_) => {
                ErrorKind::Persistence
            }
        }
    }
}

fn describe(failures: &[SourceFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
