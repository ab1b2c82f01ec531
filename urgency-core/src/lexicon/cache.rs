//! Single-flight lexicon cache.
//!
//! The cache owns one slot that moves through three states:
//!
//! ```text
//! Empty --get()--> Loading(shared future) --ok--> Ready(Arc<Lexicon>)
//!   ^                        |
//!   +--------- err ----------+
//! ```
//!
//! While `Loading`, every caller clones and awaits the same shared future,
//! so N concurrent callers cause exactly one fetch and all observe the same
//! outcome. A failed load empties the slot, so the next call retries.
//!
//! Threading:
//! - The fetch runs on its own tokio task and settles the slot itself, so
//!   it keeps going when every waiter is cancelled. A timeout counts from
//!   the start of the fetch, not from whenever a caller happens to poll.
//! - The slot mutex is held only to inspect or swap the slot, never across
//!   an `.await`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, error, info};

use super::parser::parse_lexicon;
use super::source::LexiconSource;
use super::Lexicon;
use crate::error::LexiconError;

type LoadResult = Result<Arc<Lexicon>, LexiconError>;
type SharedLoad = Shared<BoxFuture<'static, LoadResult>>;

enum Slot {
    Empty,
    Loading { generation: u64, load: SharedLoad },
    Ready(Arc<Lexicon>),
}

struct State {
    slot: Slot,
    generation: u64,
}

/// Lazily-loaded, process-wide lexicon.
///
/// Construct one per service instance and hand it to the
/// [`UrgencyEngine`](crate::engine::UrgencyEngine).
pub struct LexiconCache {
    source: Arc<dyn LexiconSource>,
    timeout: Option<Duration>,
    state: Arc<Mutex<State>>,
    fetches: Arc<AtomicUsize>,
}

impl LexiconCache {
    /// Creates an empty cache over `source`. Nothing is fetched yet.
    pub fn new(source: Arc<dyn LexiconSource>) -> Self {
        Self {
            source,
            timeout: None,
            state: Arc::new(Mutex::new(State {
                slot: Slot::Empty,
                generation: 0,
            })),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Bounds each fetch; an expired fetch is a load failure.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Name of the underlying source.
    pub fn source_name(&self) -> String {
        self.source.name()
    }

    /// Loads the lexicon now instead of on first use.
    ///
    /// # Errors
    ///
    /// Returns the load failure; the cache stays empty and may be retried.
    pub async fn init(&self) -> Result<(), LexiconError> {
        self.get().await.map(|_| ())
    }

    /// Returns the lexicon, loading it if needed.
    ///
    /// # Errors
    ///
    /// Returns the load failure shared by every caller of the failed attempt.
    pub async fn get(&self) -> LoadResult {
        let (generation, load) = {
            let mut state = self.lock();
            let pending = match &state.slot {
                Slot::Ready(lexicon) => return Ok(Arc::clone(lexicon)),
                Slot::Loading { generation, load } => Some((*generation, load.clone())),
                Slot::Empty => None,
            };
            match pending {
                Some(pending) => pending,
                None => {
                    state.generation += 1;
                    let generation = state.generation;
                    let load = self.start_load(generation).shared();
                    state.slot = Slot::Loading {
                        generation,
                        load: load.clone(),
                    };
                    (generation, load)
                }
            }
        };

        let outcome = load.await;
        // Normally a no-op; covers a load task that died before settling.
        settle(&self.state, generation, &outcome);
        outcome
    }

    /// Drops the cached lexicon or pending load; the next `get` reloads.
    ///
    /// Callers already awaiting a pending load still receive its outcome.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.slot = Slot::Empty;
        debug!(source = %self.source.name(), "lexicon cache reset");
    }

    /// Returns `true` once a lexicon is cached.
    pub fn is_loaded(&self) -> bool {
        matches!(self.lock().slot, Slot::Ready(_))
    }

    /// Number of fetches started against the source so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Acquire)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        lock_state(&self.state)
    }

    /// Spawns the fetch for `generation`. Must be called with the state
    /// locked so the task cannot settle before the slot is `Loading`.
    fn start_load(&self, generation: u64) -> BoxFuture<'static, LoadResult> {
        let source = Arc::clone(&self.source);
        let timeout = self.timeout;
        let fetches = Arc::clone(&self.fetches);
        let state = Arc::clone(&self.state);

        let task = tokio::spawn(async move {
            fetches.fetch_add(1, Ordering::AcqRel);
            let result = load_lexicon(source.as_ref(), timeout).await;
            if let Err(e) = &result {
                error!(source = %source.name(), generation, error = %e, "lexicon load failed");
            }
            settle(&state, generation, &result);
            result
        });

        let source_name = self.source.name();
        async move {
            task.await.unwrap_or_else(|e| {
                error!(source = %source_name, generation, error = %e, "lexicon load task died");
                Err(LexiconError::Interrupted { source_name })
            })
        }
        .boxed()
    }
}

fn lock_state(state: &Mutex<State>) -> MutexGuard<'_, State> {
    // The slot is always left in a valid state, so a poisoned lock is usable.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Publishes the outcome of load `generation`, unless a reset superseded it.
fn settle(state: &Mutex<State>, generation: u64, outcome: &LoadResult) {
    let mut state = lock_state(state);
    let current = matches!(&state.slot, Slot::Loading { generation: g, .. } if *g == generation);
    if current {
        state.slot = match outcome {
            Ok(lexicon) => Slot::Ready(Arc::clone(lexicon)),
            Err(_) => Slot::Empty,
        };
    }
}

impl std::fmt::Debug for LexiconCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexiconCache")
            .field("source", &self.source.name())
            .field("timeout", &self.timeout)
            .field("loaded", &self.is_loaded())
            .field("fetches", &self.fetch_count())
            .finish()
    }
}

async fn load_lexicon(
    source: &dyn LexiconSource,
    timeout: Option<Duration>,
) -> LoadResult {
    let name = source.name();
    debug!(source = %name, "fetching lexicon");

    let text = match timeout {
        Some(after) => tokio::time::timeout(after, source.fetch())
            .await
            .map_err(|_| LexiconError::Timeout { after })??,
        None => source.fetch().await?,
    };

    let (lexicon, report) = parse_lexicon(&text);
    if lexicon.is_empty() {
        return Err(LexiconError::Empty { source_name: name });
    }

    info!(source = %name, entries = lexicon.len(), skipped = report.skipped, "lexicon loaded");
    Ok(Arc::new(lexicon))
}
