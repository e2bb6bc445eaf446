//! Fetch-once, reuse-forever cache for remote display assets
//!
//! Keyed by resource identifier (URL). A miss enqueues exactly one fetch
//! job on a dedicated worker thread and the entry shows as pending until
//! the event loop drains the result via `poll`. Entries are never evicted
//! or invalidated; the distinct-identifier set is small and static for
//! the process lifetime.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tiny_skia::Pixmap;
use tracing::{debug, warn};

use crate::assets::fetch::{AssetFetchError, AssetFetcher, HttpFetcher};

/// Observable state of one cache entry
#[derive(Debug, Clone)]
pub enum AssetState {
    /// Fetch requested, result not yet delivered
    Pending,
    /// Decoded and ready to display; the `Arc` is shared by every caller
    Ready(Arc<Pixmap>),
    /// Fetch or decode failed; callers render without the asset
    Failed,
}

impl AssetState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

enum Entry {
    Pending { cancelled: Arc<AtomicBool> },
    Ready(Arc<Pixmap>),
    Failed,
}

struct FetchJob {
    url: String,
    cancelled: Arc<AtomicBool>,
}

struct FetchResult {
    url: String,
    outcome: Result<Pixmap, AssetFetchError>,
}

/// Keyed asset store plus its fetch worker
///
/// The cache itself is single-threaded like the rest of the core; only
/// the fetch runs on the worker thread, so the event loop never blocks on
/// the network.
pub struct AssetCache {
    entries: HashMap<String, Entry>,
    jobs: Option<mpsc::Sender<FetchJob>>,
    results: mpsc::Receiver<FetchResult>,
    worker: Option<JoinHandle<()>>,
}

impl AssetCache {
    /// Cache backed by the production HTTP fetcher.
    pub fn new() -> Self {
        Self::with_fetcher(HttpFetcher::new())
    }

    /// Cache backed by an arbitrary fetcher; tests inject a stub here.
    pub fn with_fetcher(fetcher: impl AssetFetcher + 'static) -> Self {
        let (jobs_tx, jobs_rx) = mpsc::channel::<FetchJob>();
        let (results_tx, results_rx) = mpsc::channel();

        let worker = thread::spawn(move || {
            for job in jobs_rx {
                // A job cancelled before it started is skipped outright.
                // Once the fetch begins it runs to completion and the
                // result is cached even if nobody is left to display it.
                if job.cancelled.load(Ordering::Relaxed) {
                    debug!(url = %job.url, "fetch cancelled before start");
                    continue;
                }
                let outcome = fetcher.fetch(&job.url);
                if results_tx
                    .send(FetchResult {
                        url: job.url,
                        outcome,
                    })
                    .is_err()
                {
                    break;
                }
            }
        });

        Self {
            entries: HashMap::new(),
            jobs: Some(jobs_tx),
            results: results_rx,
            worker: Some(worker),
        }
    }

    /// Requests the asset for `url`, returning its current state.
    ///
    /// A hit returns `Ready` immediately with no network access. A miss
    /// enqueues one fetch job and reports `Pending`; repeated requests
    /// for the same identifier never enqueue a second fetch.
    pub fn request(&mut self, url: &str) -> AssetState {
        if let Some(entry) = self.entries.get(url) {
            return match entry {
                Entry::Pending { .. } => AssetState::Pending,
                Entry::Ready(pixmap) => AssetState::Ready(Arc::clone(pixmap)),
                Entry::Failed => AssetState::Failed,
            };
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        let job = FetchJob {
            url: url.to_string(),
            cancelled: Arc::clone(&cancelled),
        };
        let sender = self.jobs.as_ref().expect("fetch worker alive until drop");
        if sender.send(job).is_ok() {
            debug!(url, "asset fetch enqueued");
            self.entries
                .insert(url.to_string(), Entry::Pending { cancelled });
            AssetState::Pending
        } else {
            // Worker is gone; treat the identifier as unfetchable.
            self.entries.insert(url.to_string(), Entry::Failed);
            AssetState::Failed
        }
    }

    /// Current state of `url`, or `None` if it was never requested.
    pub fn state(&self, url: &str) -> Option<AssetState> {
        self.entries.get(url).map(|entry| match entry {
            Entry::Pending { .. } => AssetState::Pending,
            Entry::Ready(pixmap) => AssetState::Ready(Arc::clone(pixmap)),
            Entry::Failed => AssetState::Failed,
        })
    }

    /// The decoded asset for `url` if it is ready. Every caller receives
    /// the same shared `Arc`.
    pub fn get(&self, url: &str) -> Option<Arc<Pixmap>> {
        match self.entries.get(url) {
            Some(Entry::Ready(pixmap)) => Some(Arc::clone(pixmap)),
            _ => None,
        }
    }

    /// Drains completed fetch results into the cache without blocking.
    /// Called once per event-loop turn. Returns the number of entries
    /// that settled.
    pub fn poll(&mut self) -> usize {
        let mut settled = 0;
        while let Ok(result) = self.results.try_recv() {
            self.settle(result);
            settled += 1;
        }
        settled
    }

    /// Blocks up to `timeout` for at least one result, then drains the
    /// rest. Returns true if anything settled.
    pub fn poll_blocking(&mut self, timeout: Duration) -> bool {
        match self.results.recv_timeout(timeout) {
            Ok(result) => {
                self.settle(result);
                self.poll();
                true
            }
            Err(_) => false,
        }
    }

    fn settle(&mut self, result: FetchResult) {
        match result.outcome {
            Ok(pixmap) => {
                debug!(url = %result.url, "asset ready");
                self.entries
                    .insert(result.url, Entry::Ready(Arc::new(pixmap)));
            }
            Err(err) => {
                warn!(url = %result.url, error = %err, "asset fetch failed");
                self.entries.insert(result.url, Entry::Failed);
            }
        }
    }

    /// Withdraws interest in `url` (the requesting view was destroyed).
    ///
    /// A fetch that has not started yet is skipped by the worker; one
    /// already in flight still completes and its result is cached on the
    /// next poll under a fresh request.
    pub fn cancel(&mut self, url: &str) {
        if let Some(Entry::Pending { cancelled }) = self.entries.get(url) {
            cancelled.store(true, Ordering::Relaxed);
            self.entries.remove(url);
            debug!(url, "asset request cancelled");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AssetCache {
    fn drop(&mut self) {
        // Closing the job channel ends the worker loop.
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
