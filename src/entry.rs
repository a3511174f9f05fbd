use std::path::PathBuf;

/// A single candidate produced by the streaming engine or the ground-truth
/// scanner during traversal.
///
/// Intentionally minimal — a path and what kind of thing it points at. Both
/// sides of the evaluation produce the same value type, so streamed output and
/// ground truth stay directly comparable. Immutable by convention: entries are
/// created once per run and never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    /// Full path to the entry.
    pub path: PathBuf,

    /// Whether the entry is a directory. Everything else (regular files,
    /// symlinks, devices) is treated as a file for filtering purposes.
    pub is_dir: bool,
}

impl SearchEntry {
    pub fn new(path: impl Into<PathBuf>, is_dir: bool) -> Self {
        Self {
            path: path.into(),
            is_dir,
        }
    }
}
