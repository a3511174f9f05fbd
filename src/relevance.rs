use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::SearchConfig;
use crate::entry::SearchEntry;
use crate::metrics::EvaluationTally;

/// Re-validates streamed entries against the content query.
///
/// The engine under evaluation already claims every entry it yields is a
/// match; the judge independently re-checks that claim so precision reflects
/// what the engine got right, not what it asserted. Verdicts never filter the
/// published result list — irrelevant entries stay visible and only the tally
/// records the miss.
pub struct RelevanceJudge {
    query: Option<String>,
}

impl RelevanceJudge {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            query: config.content().map(str::to_owned),
        }
    }

    /// Decide relevance for one streamed entry and fold the verdict into
    /// `tally`: `streamed` always increments, `relevant` only on a hit.
    pub fn observe(&self, entry: &SearchEntry, tally: &mut EvaluationTally) -> bool {
        let relevant = self.is_relevant(entry);
        tally.record(relevant);
        relevant
    }

    /// Directories and query-less runs are trivially relevant; a file must
    /// contain the query. An unreadable file is judged not relevant.
    pub fn is_relevant(&self, entry: &SearchEntry) -> bool {
        match &self.query {
            Some(query) if !entry.is_dir => file_contains(&entry.path, query),
            _ => true,
        }
    }
}

/// Case-insensitive whole-file containment check.
///
/// `query` must already be lowercased (the config builder guarantees this).
/// Read failures count as a miss rather than an error so a single unreadable
/// file never aborts the run.
pub(crate) fn file_contains(path: &Path, query: &str) -> bool {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes)
            .to_lowercase()
            .contains(query),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "content read failed, treating as non-match");
            false
        }
    }
}
