use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::AbortHandle;
use tracing::debug;
use watchlist_sources::SourceError;
use crate::error::{WatchlistError, WatchlistResult};

/// Tracks the one network request allowed in flight.
///
/// Every request gets a ticket. Starting a new request, or cancelling,
/// bumps the generation and aborts whatever was running, so a late
/// response from an older ticket can be recognised and dropped.
#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: AtomicU64,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handle` as the current request, aborting the previous one
    pub fn begin(&self, handle: AbortHandle) -> u64 {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut slot) = self.in_flight.lock() {
            if let Some(previous) = slot.replace(handle) {
                debug!("Request {} supersedes an in-flight request", ticket);
                previous.abort();
            }
        }
        ticket
    }

    /// Abort the current request, if any. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let previous = self.in_flight.lock().ok().and_then(|mut slot| slot.take());
        match previous {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    fn finish(&self, ticket: u64) {
        if let Ok(mut slot) = self.in_flight.lock() {
            if self.is_current(ticket) {
                slot.take();
            }
        }
    }

    /// Run `request` as the current request and discard its outcome if it was superseded
    pub async fn run<T, Fut>(&self, request: Fut) -> WatchlistResult<T>
    where
        T: Send + 'static,
        Fut: Future<Output = Result<T, SourceError>> + Send + 'static,
    {
        let task = tokio::spawn(request);
        let ticket = self.begin(task.abort_handle());
        let outcome = task.await;

        if !self.is_current(ticket) {
            debug!("Discarding response for stale request {}", ticket);
            return Err(WatchlistError::Cancelled);
        }
        self.finish(ticket);

        match outcome {
            Ok(result) => result.map_err(WatchlistError::from),
            Err(e) if e.is_cancelled() => Err(WatchlistError::Cancelled),
            Err(e) => Err(WatchlistError::Api(format!("request task failed: {}", e))),
        }
    }
}

/// Cloneable handle that cancels whatever request is in flight
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tracker: Arc<RequestTracker>,
}

impl CancelHandle {
    pub fn new(tracker: Arc<RequestTracker>) -> Self {
        Self { tracker }
    }

    pub fn cancel(&self) -> bool {
        self.tracker.cancel()
    }
}
