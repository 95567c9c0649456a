//! Debounced suggestion worker.
//!
//! One named thread owns the fuzzy queries. Each submission is stamped
//! with a generation from a shared counter; bumping the counter makes
//! every older submission stale. The thread drains its queue to the
//! newest item, sleeps out the debounce window, and only computes and
//! publishes while its generation is still current, so rapid edits
//! collapse into one query and a cancelled query can never deliver.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use fanyi_core::suggest::{Suggestion, SuggestionIndex};
use tracing::debug;

use crate::types::SuggestRequest;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

struct SuggestWork {
    index: Arc<SuggestionIndex>,
    input: String,
    generation: u64,
}

/// A completed query, tagged with the input it was computed for so the
/// session can drop it if the input moved on.
pub struct SuggestResult {
    pub input: String,
    pub suggestions: Vec<Suggestion>,
}

pub struct SuggestWorker {
    work_tx: mpsc::Sender<SuggestWork>,
    result_rx: Mutex<mpsc::Receiver<SuggestResult>>,
    generation: Arc<AtomicU64>,
}

impl SuggestWorker {
    pub fn new(debounce: Duration, limit: usize) -> Self {
        let generation = Arc::new(AtomicU64::new(0));
        let (work_tx, work_rx) = mpsc::channel::<SuggestWork>();
        let (result_tx, result_rx) = mpsc::channel::<SuggestResult>();
        {
            let generation = Arc::clone(&generation);
            thread::Builder::new()
                .name("fanyi-suggest".into())
                .spawn(move || suggest_worker(work_rx, result_tx, generation, debounce, limit))
                .expect("failed to spawn suggest worker");
        }
        Self {
            work_tx,
            result_rx: Mutex::new(result_rx),
            generation,
        }
    }

    /// Queue a debounced query. Every earlier submission becomes stale.
    pub fn submit(&self, request: SuggestRequest) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.work_tx.send(SuggestWork {
            index: request.index,
            input: request.input,
            generation,
        });
    }

    /// Cancel pending and in-flight work without queueing anything.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Poll for a finished query.
    pub fn try_recv(&self) -> Option<SuggestResult> {
        let rx = self.result_rx.lock().ok()?;
        rx.try_recv().ok()
    }

    /// Wait up to `timeout` for a finished query.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SuggestResult> {
        let rx = self.result_rx.lock().ok()?;
        rx.recv_timeout(timeout).ok()
    }
}

impl Default for SuggestWorker {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE, fanyi_core::suggest::DEFAULT_LIMIT)
    }
}

fn suggest_worker(
    rx: mpsc::Receiver<SuggestWork>,
    tx: mpsc::Sender<SuggestResult>,
    generation: Arc<AtomicU64>,
    debounce: Duration,
    limit: usize,
) {
    while let Ok(work) = rx.recv() {
        // Drain: queued edits collapse to the newest
        let mut latest = work;
        while let Ok(newer) = rx.try_recv() {
            latest = newer;
        }

        // Debounce, then skip if a newer submission or invalidate arrived
        thread::sleep(debounce);
        if latest.generation != generation.load(Ordering::SeqCst) {
            continue;
        }

        let suggestions = latest.index.query(&latest.input, limit);

        // Check staleness again before publishing
        if latest.generation != generation.load(Ordering::SeqCst) {
            continue;
        }

        debug!(input = %latest.input, count = suggestions.len(), "suggest query done");
        let _ = tx.send(SuggestResult {
            input: latest.input,
            suggestions,
        });
    }
}
