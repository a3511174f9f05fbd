use std::time::Duration;

/// Counters accumulated over a single evaluation run.
///
/// Owned by one run at a time — allocated fresh when the run starts and
/// discarded when its metrics are published. Never shared across runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationTally {
    /// Entries yielded by the engine, relevant or not.
    pub streamed: usize,

    /// Streamed entries judged relevant against the content query.
    pub relevant: usize,

    /// Size of the exhaustively computed ground-truth set.
    pub ground_truth: usize,
}

impl EvaluationTally {
    /// Fold one streamed entry's relevance verdict into the counters.
    pub fn record(&mut self, relevant: bool) {
        self.streamed += 1;
        if relevant {
            self.relevant += 1;
        }
    }
}

/// Quality figures for one completed run.
///
/// Recomputed from scratch each run and published atomically — a reader never
/// observes precision from one run next to recall from another.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    /// Fraction of streamed results that were relevant, in `[0, 1]`.
    pub precision: f64,

    /// Fraction of ground-truth entries that were actually streamed, in `[0, 1]`.
    pub recall: f64,

    /// Wall-clock duration of the streaming phase. The ground-truth scan is
    /// excluded — it is measurement overhead, not part of the search under test.
    pub duration_ms: u64,
}

impl Metrics {
    /// Derive precision and recall from `tally`, guarding every division.
    ///
    /// The degenerate cases are defined explicitly rather than left to float
    /// arithmetic: an empty stream has precision 0, and "nothing expected,
    /// nothing found" counts as perfect recall. Both figures are clamped to
    /// `[0, 1]` and are never NaN.
    #[must_use]
    pub fn compute(tally: &EvaluationTally, streaming_duration: Duration) -> Self {
        let precision = if tally.streamed == 0 {
            0.0
        } else {
            (tally.relevant as f64 / tally.streamed as f64).clamp(0.0, 1.0)
        };

        let recall = if tally.ground_truth == 0 {
            if tally.streamed == 0 {
                1.0
            } else {
                0.0
            }
        } else {
            (tally.relevant as f64 / tally.ground_truth as f64).clamp(0.0, 1.0)
        };

        Self {
            precision,
            recall,
            duration_ms: streaming_duration.as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(streamed: usize, relevant: usize, ground_truth: usize) -> EvaluationTally {
        EvaluationTally {
            streamed,
            relevant,
            ground_truth,
        }
    }

    #[test]
    fn nothing_expected_nothing_found_is_perfect_recall() {
        let m = Metrics::compute(&tally(0, 0, 0), Duration::ZERO);
        assert!((m.precision - 0.0).abs() < f64::EPSILON);
        assert!((m.recall - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_stream_with_ground_truth_scores_zero() {
        let m = Metrics::compute(&tally(0, 0, 5), Duration::ZERO);
        assert!((m.precision - 0.0).abs() < f64::EPSILON);
        assert!((m.recall - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn streamed_noise_with_empty_ground_truth_scores_zero_recall() {
        let m = Metrics::compute(&tally(4, 0, 0), Duration::ZERO);
        assert!((m.recall - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_recall() {
        let m = Metrics::compute(&tally(2, 2, 3), Duration::ZERO);
        assert!((m.precision - 1.0).abs() < f64::EPSILON);
        assert!((m.recall - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ratios_are_clamped() {
        // More relevant hits than ground-truth entries can happen when the
        // engine streams entries the exhaustive walk never reached.
        let m = Metrics::compute(&tally(5, 5, 2), Duration::ZERO);
        assert!((m.recall - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn duration_is_reported_in_millis() {
        let m = Metrics::compute(&tally(1, 1, 1), Duration::from_millis(250));
        assert_eq!(m.duration_ms, 250);
    }

    #[test]
    fn record_counts_every_entry_but_tallies_relevance() {
        let mut t = EvaluationTally::default();
        t.record(true);
        t.record(false);
        t.record(true);
        assert_eq!(t.streamed, 3);
        assert_eq!(t.relevant, 2);
    }
}
