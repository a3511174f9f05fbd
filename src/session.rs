use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::SearchConfig;
use crate::entry::SearchEntry;
use crate::error::EvalError;
use crate::metrics::{EvaluationTally, Metrics};
use crate::relevance::RelevanceJudge;
use crate::scanner::GroundTruthScanner;
use crate::traits::SearchEngine;

// ---------------------------------------------------------------------------
// SearchPhase
// ---------------------------------------------------------------------------

/// Where the session currently is in its run.
///
/// `Complete` is the only phase in which the published metrics are final.
/// Anything else means they are per-run defaults (zeros) or mid-flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// No search has started yet.
    Idle,

    /// A run has started and its inputs are being checked.
    Validating,

    /// Inputs failed validation; empty results were published and neither the
    /// stream nor the scan was attempted.
    Rejected,

    /// The engine's stream is being consumed.
    Streaming,

    /// The stream is drained; the ground-truth scan is running.
    Scanning,

    /// Metrics are published and final.
    Complete,

    /// The run was stopped or superseded before metrics were computed. Any
    /// results streamed before the cancel remain visible but are not final.
    Cancelled,
}

// ---------------------------------------------------------------------------
// State channels
// ---------------------------------------------------------------------------

/// One watch channel per published field, committed together at state-machine
/// transitions. Readable from any context via [`SearchSession`] subscriptions.
struct StateChannels {
    results:     watch::Sender<Vec<SearchEntry>>,
    duration_ms: watch::Sender<u64>,
    precision:   watch::Sender<f64>,
    recall:      watch::Sender<f64>,
    phase:       watch::Sender<SearchPhase>,
}

impl StateChannels {
    fn new() -> Self {
        Self {
            results:     watch::channel(Vec::new()).0,
            duration_ms: watch::channel(0).0,
            precision:   watch::channel(0.0).0,
            recall:      watch::channel(0.0).0,
            phase:       watch::channel(SearchPhase::Idle).0,
        }
    }

    /// Per-run defaults. Entering `Validating` and clearing stale state is a
    /// single commit, so a superseding run never mixes with its predecessor.
    fn reset(&self) {
        self.results.send_replace(Vec::new());
        self.duration_ms.send_replace(0);
        self.precision.send_replace(0.0);
        self.recall.send_replace(0.0);
        self.phase.send_replace(SearchPhase::Validating);
    }

    fn set_phase(&self, phase: SearchPhase) {
        self.phase.send_replace(phase);
    }

    fn push_result(&self, entry: SearchEntry) {
        self.results.send_modify(|results| results.push(entry));
    }

    fn publish(&self, metrics: &Metrics, phase: SearchPhase) {
        self.duration_ms.send_replace(metrics.duration_ms);
        self.precision.send_replace(metrics.precision);
        self.recall.send_replace(metrics.recall);
        self.phase.send_replace(phase);
    }
}

// ---------------------------------------------------------------------------
// SearchSession
// ---------------------------------------------------------------------------

struct ActiveRun {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

/// Orchestrates one evaluation run at a time: validates inputs, drives the
/// engine's stream through the relevance judge, runs the ground-truth scan,
/// and publishes results and metrics to observers.
///
/// Runs execute on a background Tokio task, so [`search()`](Self::search)
/// never blocks the caller. Starting a new search while one is in flight
/// **cancels and replaces** it: the superseded run is cancelled and fully
/// awaited before the new run publishes anything, so observers never see
/// state interleaved between runs.
///
/// One session owns one set of state channels; create a session per active
/// search surface rather than sharing a global one.
pub struct SearchSession {
    engine:   Arc<dyn SearchEngine>,
    channels: Arc<StateChannels>,
    active:   Option<ActiveRun>,
}

impl SearchSession {
    pub fn new(engine: impl SearchEngine + 'static) -> Self {
        Self {
            engine:   Arc::new(engine),
            channels: Arc::new(StateChannels::new()),
            active:   None,
        }
    }

    // ── Observers ─────────────────────────────────────────────────────────

    /// Current result list, insertion order = arrival order. Empty before any
    /// search.
    pub fn results(&self) -> watch::Receiver<Vec<SearchEntry>> {
        self.channels.results.subscribe()
    }

    /// Streaming-phase duration of the last completed run, in milliseconds.
    pub fn duration_ms(&self) -> watch::Receiver<u64> {
        self.channels.duration_ms.subscribe()
    }

    /// Precision of the last completed run, in `[0, 1]`.
    pub fn precision(&self) -> watch::Receiver<f64> {
        self.channels.precision.subscribe()
    }

    /// Recall of the last completed run, in `[0, 1]`.
    pub fn recall(&self) -> watch::Receiver<f64> {
        self.channels.recall.subscribe()
    }

    /// The run's position in the state machine. Metrics are final only in
    /// [`SearchPhase::Complete`].
    pub fn phase(&self) -> watch::Receiver<SearchPhase> {
        self.channels.phase.subscribe()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Start an evaluation run for `config` on a background task.
    ///
    /// Must be called from within a Tokio runtime. An in-flight run is
    /// cancelled and drained before the new run touches published state.
    pub fn search(&mut self, config: SearchConfig) {
        let superseded = self.active.take();
        if let Some(run) = &superseded {
            run.cancel.cancel();
        }

        let cancel = CancellationToken::new();
        let engine = Arc::clone(&self.engine);
        let channels = Arc::clone(&self.channels);
        let run_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            if let Some(run) = superseded {
                if let Err(err) = run.handle.await {
                    error!(error = %err, "superseded run did not shut down cleanly");
                }
            }
            run_search(engine, config, channels, run_cancel).await;
        });

        self.active = Some(ActiveRun { handle, cancel });
    }

    /// Cancel the in-flight run, if any. Stops both stream consumption and an
    /// in-progress scan; the run ends in [`SearchPhase::Cancelled`].
    pub fn stop(&mut self) {
        if let Some(run) = &self.active {
            run.cancel.cancel();
        }
    }

    /// Wait for the in-flight run to finish, in whatever phase it ends.
    pub async fn join(&mut self) {
        if let Some(run) = self.active.take() {
            if let Err(err) = run.handle.await {
                error!(error = %err, "search task failed");
            }
        }
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.stop();
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// One full pass of the state machine:
/// `Validating → (Rejected | Streaming) → Scanning → Complete`,
/// with `Cancelled` reachable from the streaming and scanning phases.
async fn run_search(
    engine: Arc<dyn SearchEngine>,
    config: SearchConfig,
    channels: Arc<StateChannels>,
    cancel: CancellationToken,
) {
    channels.reset();

    info!(
        root = %config.root().display(),
        query = config.content().unwrap_or("none"),
        mask = config.mask_pattern().unwrap_or("none"),
        include_dirs = config.include_dirs(),
        include_files = config.include_files(),
        "search started"
    );

    if let Err(err) = validate(&config) {
        warn!(error = %err, "search rejected");
        channels.publish(
            &Metrics::compute(&EvaluationTally::default(), Duration::ZERO),
            SearchPhase::Rejected,
        );
        return;
    }

    // Streaming phase. Every yielded entry is appended to the visible result
    // list as it arrives; relevance verdicts only feed the tally.
    channels.set_phase(SearchPhase::Streaming);
    let judge = RelevanceJudge::new(&config);
    let mut tally = EvaluationTally::default();
    let mut stream = engine.search(&config, cancel.child_token());

    let start = Instant::now();
    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                info!(streamed = tally.streamed, "search cancelled mid-stream");
                channels.set_phase(SearchPhase::Cancelled);
                return;
            }
            item = stream.recv() => match item {
                None => break,
                Some(Ok(entry)) => {
                    debug!(path = %entry.path.display(), "streamed");
                    judge.observe(&entry, &mut tally);
                    channels.push_result(entry);
                }
                Some(Err(err)) => {
                    warn!(error = %err, "stream failed mid-sequence, keeping partial results");
                    break;
                }
            }
        }
    }
    let streaming_duration = start.elapsed();

    // The scan runs unconditionally after the stream drains, even when the
    // stream yielded nothing — an empty stream against a non-empty tree is
    // exactly the recall miss being measured.
    channels.set_phase(SearchPhase::Scanning);
    let scanner = GroundTruthScanner::new(config);
    let scan_cancel = cancel.clone();
    let scanned = tokio::task::spawn_blocking(move || scanner.scan(&scan_cancel)).await;

    let ground_truth = match scanned {
        Ok(Some(entries)) => entries,
        Ok(None) => {
            info!("search cancelled mid-scan");
            channels.set_phase(SearchPhase::Cancelled);
            return;
        }
        Err(err) => {
            error!(error = %err, "ground-truth scan task failed");
            channels.set_phase(SearchPhase::Cancelled);
            return;
        }
    };
    tally.ground_truth = ground_truth.len();

    let metrics = Metrics::compute(&tally, streaming_duration);
    channels.publish(&metrics, SearchPhase::Complete);

    info!(
        streamed = tally.streamed,
        relevant = tally.relevant,
        ground_truth = tally.ground_truth,
        precision = metrics.precision,
        recall = metrics.recall,
        duration_ms = metrics.duration_ms,
        "search finished"
    );
}

/// Fail fast on inputs that make the run meaningless. Flags are checked before
/// the path so a no-filter run is rejected the same way whether or not the
/// root exists.
fn validate(config: &SearchConfig) -> Result<(), EvalError> {
    if !config.include_dirs() && !config.include_files() {
        return Err(EvalError::NoFilterSelected);
    }

    // Existence and readability in one probe.
    fs::read_dir(config.root())
        .map(|_| ())
        .map_err(|_| EvalError::InvalidPath(config.root().to_path_buf()))
}
