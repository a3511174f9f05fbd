//! # precall
//!
//! Precision/recall evaluation harness for streaming filesystem search —
//! generic, embeddable, zero opinions.
//!
//! precall measures how good a streaming search engine's output actually is.
//! It consumes the engine's asynchronous stream of candidate entries,
//! re-validates each one against the content query, independently recomputes
//! the full set of qualifying entries by exhaustive traversal, and publishes
//! guarded precision/recall plus the streaming-phase duration through
//! observable state channels. It does **not** own the engine being measured,
//! ranking, or any presentation concern — those belong to the caller.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use precall::{EvalError, SearchConfig, SearchEngine, SearchEntry, SearchSession};
//! use tokio::sync::mpsc;
//! use tokio_util::sync::CancellationToken;
//!
//! // A minimal engine for demonstration — real engines index, cache, and
//! // stream incrementally; precall only sees the channel.
//! struct FixedEngine(Vec<SearchEntry>);
//!
//! impl SearchEngine for FixedEngine {
//!     fn search(
//!         &self,
//!         _config: &SearchConfig,
//!         _cancel: CancellationToken,
//!     ) -> mpsc::Receiver<Result<SearchEntry, EvalError>> {
//!         let (tx, rx) = mpsc::channel(64);
//!         let entries = self.0.clone();
//!         tokio::spawn(async move {
//!             for entry in entries {
//!                 if tx.send(Ok(entry)).await.is_err() {
//!                     break;
//!                 }
//!             }
//!         });
//!         rx
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = precall::config()
//!         .root("/var/log")
//!         .content("timeout")
//!         .mask("*.log")
//!         .include_files(true)
//!         .build()
//!         .unwrap();
//!
//!     let mut session = SearchSession::new(FixedEngine(vec![
//!         SearchEntry::new("/var/log/syslog.log", false),
//!     ]));
//!     let precision = session.precision();
//!     let recall = session.recall();
//!
//!     session.search(config);
//!     session.join().await;
//!
//!     println!("precision {:.3}, recall {:.3}", *precision.borrow(), *recall.borrow());
//! }
//! ```
//!
//! # Observing a run
//!
//! [`SearchSession`] exposes one watch channel per published field — result
//! list, duration, precision, recall, and phase. Subscribe before starting
//! the run and read (or `await` changes) from any context:
//!
//! ```rust,ignore
//! let mut phase = session.phase();
//! session.search(config);
//! while phase.changed().await.is_ok() {
//!     if *phase.borrow() == SearchPhase::Complete {
//!         break;
//!     }
//! }
//! ```
//!
//! Metrics are final only in [`SearchPhase::Complete`]. A cancelled or
//! superseded run ends in [`SearchPhase::Cancelled`] with metrics still at
//! their per-run defaults.

#![forbid(unsafe_code)]

mod config;
mod entry;
mod error;
mod mask;
mod metrics;
mod relevance;
mod scanner;
mod session;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use config::{SearchConfig, SearchConfigBuilder};
pub use entry::SearchEntry;
pub use error::EvalError;
pub use mask::WildcardMask;
pub use metrics::{EvaluationTally, Metrics};
pub use relevance::RelevanceJudge;
pub use scanner::GroundTruthScanner;
pub use session::{SearchPhase, SearchSession};
pub use traits::SearchEngine;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`SearchConfigBuilder`] to describe an evaluation run.
///
/// # Example
///
/// ```rust
/// let config = precall::config()
///     .root("/srv/data")
///     .mask("*.csv")
///     .include_files(true)
///     .build()
///     .unwrap();
///
/// assert!(config.mask_matches("report.CSV"));
/// assert!(!config.mask_matches("report.csv.bak"));
/// ```
pub fn config() -> SearchConfigBuilder {
    SearchConfigBuilder::default()
}
