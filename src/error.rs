//! Failure classification shared by the pipeline stages.

use std::fmt;

/// Broad class of a failure, used to decide how it is logged and whether it
/// escalates to the caller of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network trouble, timeouts, unexpected HTTP status. Worth retrying later.
    Transient,
    /// The page no longer has the shape the extractor expects.
    Structural,
    /// The store could not be read or written.
    Persistence,
    /// A single alert could not be delivered.
    Dispatch,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transient => "transient",
            Self::Structural => "structural",
            Self::Persistence => "persistence",
            Self::Dispatch => "dispatch",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
