use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    // Validation — these reject the run before any streaming or scanning
    #[error("root path missing or unreadable")]
    InvalidPath(PathBuf),

    #[error("neither directories nor files are included")]
    NoFilterSelected,

    // Config
    #[error("invalid wildcard mask: {0}")]
    InvalidMask(String),

    // Streaming
    #[error("search stream failed: {0}")]
    Stream(String),

    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EvalError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Skipped: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::InvalidPath(p) | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether this error rejects the run outright.
    ///
    /// Rejections (invalid root, no entry kind selected) publish empty results
    /// and skip both the stream and the ground-truth scan. Everything else is
    /// absorbed mid-run: a stream failure truncates the streaming phase but
    /// keeps partial results, and a per-entry IO failure only downgrades the
    /// affected entry.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::InvalidPath(_) | Self::NoFilterSelected)
    }
}
