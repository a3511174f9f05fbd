use std::path::{Path, PathBuf};

use crate::error::EvalError;
use crate::mask::WildcardMask;

// ---------------------------------------------------------------------------
// SearchConfig
// ---------------------------------------------------------------------------

/// Immutable parameters for one evaluation run.
///
/// Built via [`precall::config()`](crate::config) or
/// [`SearchConfig::builder()`]. Defaults are applied explicitly at build time:
/// an empty root becomes the platform root, a blank content query becomes "no
/// content filter", and an empty mask becomes "no name filter". The query is
/// lowercased once here so every containment check downstream is a plain
/// `contains`.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    root:          PathBuf,
    content:       Option<String>,
    mask:          Option<WildcardMask>,
    include_dirs:  bool,
    include_files: bool,
}

impl SearchConfig {
    /// Create a new [`SearchConfigBuilder`] with defaults.
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }

    /// The directory the search and the ground-truth scan are rooted at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The lowercased content query, or `None` when no content filter is set.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// The raw wildcard pattern, or `None` when no name filter is set.
    pub fn mask_pattern(&self) -> Option<&str> {
        self.mask.as_ref().map(WildcardMask::pattern)
    }

    /// Whether directories count toward type inclusion.
    pub fn include_dirs(&self) -> bool {
        self.include_dirs
    }

    /// Whether files count toward type inclusion.
    pub fn include_files(&self) -> bool {
        self.include_files
    }

    /// Apply the wildcard mask to an entry name. `true` when no mask is set.
    pub fn mask_matches(&self, name: &str) -> bool {
        self.mask.as_ref().map_or(true, |m| m.matches(name))
    }
}

// ---------------------------------------------------------------------------
// SearchConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for [`SearchConfig`]. Configure with chained methods, then call
/// [`build()`](SearchConfigBuilder::build).
///
/// # Example
///
/// ```rust
/// let config = precall::config()
///     .root("/var/log")
///     .content("Timeout")
///     .mask("*.log")
///     .include_files(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.content(), Some("timeout"));
/// assert!(config.mask_matches("syslog.LOG"));
/// ```
#[derive(Debug, Default)]
pub struct SearchConfigBuilder {
    root:          PathBuf,
    content:       String,
    mask:          String,
    include_dirs:  bool,
    include_files: bool,
}

impl SearchConfigBuilder {
    /// Set the root directory. An empty path falls back to the platform root
    /// at build time.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the content query. Blank input means "no content filter".
    pub fn content(mut self, query: impl Into<String>) -> Self {
        self.content = query.into();
        self
    }

    /// Set the wildcard name mask (`*` and `?`). Empty input means
    /// "no name filter".
    pub fn mask(mut self, pattern: impl Into<String>) -> Self {
        self.mask = pattern.into();
        self
    }

    /// Include directories in type-based inclusion. Off by default.
    pub fn include_dirs(mut self, yes: bool) -> Self {
        self.include_dirs = yes;
        self
    }

    /// Include files in type-based inclusion. Off by default.
    pub fn include_files(mut self, yes: bool) -> Self {
        self.include_files = yes;
        self
    }

    /// Apply defaults and produce the immutable config.
    ///
    /// Both inclusion flags being off is accepted here — the session rejects
    /// such a run with empty results at validation time rather than at
    /// construction.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::InvalidMask`] if the wildcard pattern fails to
    /// compile.
    pub fn build(self) -> Result<SearchConfig, EvalError> {
        let root = if self.root.as_os_str().is_empty() {
            platform_root()
        } else {
            self.root
        };

        let content = if self.content.trim().is_empty() {
            None
        } else {
            Some(self.content.to_lowercase())
        };

        let mask = if self.mask.is_empty() {
            None
        } else {
            Some(WildcardMask::compile(&self.mask)?)
        };

        Ok(SearchConfig {
            root,
            content,
            mask,
            include_dirs: self.include_dirs,
            include_files: self.include_files,
        })
    }
}

/// The default search root when none is configured.
fn platform_root() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from("C:\\")
    } else {
        PathBuf::from("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_root_falls_back_to_platform_root() {
        let config = SearchConfig::builder().include_files(true).build().unwrap();
        assert_eq!(config.root(), platform_root());
    }

    #[test]
    fn blank_content_means_no_filter() {
        let config = SearchConfig::builder().content("   ").build().unwrap();
        assert_eq!(config.content(), None);
    }

    #[test]
    fn content_is_lowercased_once() {
        let config = SearchConfig::builder().content("HeLLo").build().unwrap();
        assert_eq!(config.content(), Some("hello"));
    }

    #[test]
    fn empty_mask_matches_every_name() {
        let config = SearchConfig::builder().build().unwrap();
        assert!(config.mask_matches("anything.bin"));
        assert!(config.mask_matches(""));
    }
}
