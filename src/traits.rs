use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::SearchConfig;
use crate::entry::SearchEntry;
use crate::error::EvalError;

/// The streaming search engine under evaluation.
///
/// The engine is an opaque external collaborator: configuration in, a finite
/// asynchronous sequence of candidate entries out. precall never looks inside
/// it — it only measures how well the stream agrees with an exhaustive scan.
///
/// # Object Safety
///
/// `SearchEngine` is object-safe. The session stores engines as
/// `Arc<dyn SearchEngine>`, so `search()` hands back an
/// [`mpsc::Receiver`] rather than an `impl Stream` (which would not be
/// object-safe). Implementations typically spawn their own producer task and
/// return the receiving half of the channel immediately.
///
/// # Thread Safety
///
/// `Send + Sync` are required — the engine is shared with the background task
/// that drives each run.
///
/// # Error Handling
///
/// A recoverable mid-sequence failure should be yielded as
/// `Err(EvalError::Stream(..))` (or [`EvalError::Io`]) and then the channel
/// closed. The session treats the first `Err` as the end of the stream, keeps
/// every entry collected so far, and still proceeds to the ground-truth scan.
///
/// # Cancellation
///
/// `cancel` fires when the run is stopped or superseded. Producers must stop
/// promptly — either by selecting on `cancel.cancelled()` or by noticing the
/// receiver has been dropped.
///
/// # Example
///
/// ```rust
/// use precall::{EvalError, SearchConfig, SearchEngine, SearchEntry};
/// use tokio::sync::mpsc;
/// use tokio_util::sync::CancellationToken;
///
/// /// Streams a fixed set of entries, ignoring the configuration.
/// struct FixedEngine(Vec<SearchEntry>);
///
/// impl SearchEngine for FixedEngine {
///     fn search(
///         &self,
///         _config: &SearchConfig,
///         cancel: CancellationToken,
///     ) -> mpsc::Receiver<Result<SearchEntry, EvalError>> {
///         let (tx, rx) = mpsc::channel(64);
///         let entries = self.0.clone();
///         tokio::spawn(async move {
///             for entry in entries {
///                 tokio::select! {
///                     () = cancel.cancelled() => break,
///                     sent = tx.send(Ok(entry)) => {
///                         if sent.is_err() {
///                             break;
///                         }
///                     }
///                 }
///             }
///         });
///         rx
///     }
/// }
/// ```
pub trait SearchEngine: Send + Sync {
    /// Launch a search for `config` and return the channel its candidate
    /// entries arrive on.
    ///
    /// The sequence is finite: close the channel when the search is done.
    /// Yield `Err` for a mid-sequence failure — the session logs it and keeps
    /// the partial results rather than failing the run.
    fn search(
        &self,
        config: &SearchConfig,
        cancel: CancellationToken,
    ) -> mpsc::Receiver<Result<SearchEntry, EvalError>>;
}
