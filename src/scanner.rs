use ignore::WalkBuilder;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::SearchConfig;
use crate::entry::SearchEntry;
use crate::relevance::file_contains;

/// Exhaustive, synchronous walker that independently recomputes every entry
/// satisfying the filter criteria. The result is the recall denominator —
/// callers only ever use its cardinality.
///
/// Inclusion is a **permissive union**: an entry qualifies when *any* of type
/// inclusion, mask match, or content match holds. A file that fails the
/// content filter still counts if its type is included, and with no content
/// query configured the entire tree qualifies. This casts a wider net than
/// the conjunctive filtering engines typically apply on the streamed side; it
/// is kept as-is for behavioral parity and is a documented oddity, not a
/// candidate for "fixing" (see DESIGN.md).
pub struct GroundTruthScanner {
    config: SearchConfig,
}

impl GroundTruthScanner {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Walk every readable descendant of the configured root (the root itself
    /// is excluded) and collect the entries the filter criteria admit.
    ///
    /// Descent into a readable directory happens regardless of whether the
    /// directory itself was admitted. Symlinks are not followed, so link
    /// cycles cannot trap the walk. Unreadable children are skipped and their
    /// siblings keep scanning.
    ///
    /// Returns `None` when `cancel` fires mid-walk; a cancelled scan yields
    /// no ground truth rather than a truncated one.
    pub fn scan(&self, cancel: &CancellationToken) -> Option<Vec<SearchEntry>> {
        let walker = WalkBuilder::new(self.config.root())
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(false)
            .same_file_system(false)
            .build();

        let mut found = Vec::new();

        for result in walker {
            if cancel.is_cancelled() {
                debug!("ground-truth scan cancelled");
                return None;
            }

            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    debug!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            // The root is the search scope, not a candidate.
            if entry.depth() == 0 {
                continue;
            }

            let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
            let name = entry.file_name().to_string_lossy();

            let matches_mask = self.config.mask_matches(&name);
            let type_included = if is_dir {
                self.config.include_dirs()
            } else {
                self.config.include_files()
            };
            let content_match = match self.config.content() {
                None => true,
                Some(_) if is_dir => true,
                Some(query) => file_contains(entry.path(), query),
            };

            if type_included || matches_mask || content_match {
                debug!(path = %entry.path().display(), "ground truth: added");
                found.push(SearchEntry::new(entry.into_path(), is_dir));
            } else {
                debug!(path = %entry.path().display(), "ground truth: skipped");
            }
        }

        Some(found)
    }
}
