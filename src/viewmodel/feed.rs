//! Feed view model: drives a [`FeedRepository`] from UI events and
//! publishes [`FeedSnapshot`]s.
//!
//! At most one fetch runs at a time. A request made while another is in
//! flight returns [`LoadOutcome::Busy`] straight away without touching the
//! state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::Duration;
use tokio::sync::{watch, Mutex, Notify};
use tracing::{debug, info, warn};

use super::state::{FeedSnapshot, FeedState, LoadOutcome};
use crate::error::{NetworkError, SeiunError};
use crate::feed::{FeedRepository, FeedSource};

/// Called with every failure, e.g. to show a toast.
pub type ErrorHandler = Box<dyn Fn(&SeiunError) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fetch {
    More,
    Refresh,
}

impl Fetch {
    fn label(self) -> &'static str {
        match self {
            Fetch::More => "loading more",
            Fetch::Refresh => "refreshing",
        }
    }
}

/// What a completed fetch did to the repository.
struct Fetched<T> {
    added: usize,
    items: Vec<T>,
    exhausted: bool,
}

/// Resets the in-flight flag when dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct FeedViewModel<S: FeedSource> {
    repository: Mutex<FeedRepository<S>>,
    timeout: Duration,
    in_flight: AtomicBool,
    disposed: AtomicBool,
    // Set while the last failure came from a refresh.
    refresh_failed: AtomicBool,
    cancel: Notify,
    state_tx: watch::Sender<FeedSnapshot<S::Item>>,
    state_rx: watch::Receiver<FeedSnapshot<S::Item>>,
    on_error: RwLock<Option<ErrorHandler>>,
}

impl<S: FeedSource> FeedViewModel<S> {
    pub fn new(repository: FeedRepository<S>, timeout: Duration) -> Self {
        let (state_tx, state_rx) = watch::channel(FeedSnapshot::initial());
        Self {
            repository: Mutex::new(repository),
            timeout,
            in_flight: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
            refresh_failed: AtomicBool::new(false),
            cancel: Notify::new(),
            state_tx,
            state_rx,
            on_error: RwLock::new(None),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> FeedSnapshot<S::Item> {
        self.state_rx.borrow().clone()
    }

    pub fn state(&self) -> FeedState {
        self.state_rx.borrow().state.clone()
    }

    /// Receiver notified on every published change.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot<S::Item>> {
        self.state_rx.clone()
    }

    pub fn set_error_handler<F>(&self, handler: F)
    where
        F: Fn(&SeiunError) + Send + Sync + 'static,
    {
        match self.on_error.write() {
            Ok(mut guard) => *guard = Some(Box::new(handler)),
            Err(poisoned) => *poisoned.into_inner() = Some(Box::new(handler)),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Cancel any in-flight fetch and stop publishing.
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            debug!("Disposing feed view model");
            self.cancel.notify_one();
        }
    }

    /// Load the next page (initial load and scroll-to-end).
    pub async fn load_more(&self) -> LoadOutcome {
        self.run(Fetch::More).await
    }

    /// Try again after an error by re-running the request that failed.
    ///
    /// A failed refresh is refreshed again; a failed page load asks for the
    /// same cursor, which the failed attempt did not advance.
    pub async fn retry(&self) -> LoadOutcome {
        if self.refresh_failed.load(Ordering::Acquire) {
            self.run(Fetch::Refresh).await
        } else {
            self.run(Fetch::More).await
        }
    }

    /// Pull-to-refresh: replace the list with the first page.
    pub async fn refresh(&self) -> LoadOutcome {
        self.run(Fetch::Refresh).await
    }

    fn try_begin(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(&self.in_flight))
    }

    async fn run(&self, kind: Fetch) -> LoadOutcome {
        if self.is_disposed() {
            return LoadOutcome::Disposed;
        }
        let Some(_guard) = self.try_begin() else {
            debug!("Dropping {:?} request, another fetch is in flight", kind);
            return LoadOutcome::Busy;
        };

        if kind == Fetch::Refresh {
            self.publish(|s| {
                s.state = FeedState::Loading;
                s.is_refreshing = true;
            });
        }

        let result = self.fetch(kind).await;

        if self.is_disposed() {
            return LoadOutcome::Disposed;
        }

        match result {
            // Nothing to fetch; the published state stays as it is.
            Ok(None) => LoadOutcome::Exhausted,
            Ok(Some(fetched)) => {
                let Fetched {
                    added,
                    items,
                    exhausted,
                } = fetched;
                debug!("{:?} loaded {} new items", kind, added);
                self.refresh_failed.store(false, Ordering::Release);
                self.publish(|s| {
                    s.state = FeedState::Loaded { exhausted };
                    s.items = items;
                    s.is_refreshing = false;
                });
                LoadOutcome::Loaded { added, exhausted }
            }
            Err(SeiunError::Network(NetworkError::Cancelled)) => LoadOutcome::Disposed,
            Err(err) => {
                warn!("{:?} failed [{}]: {}", kind, err.error_code(), err);
                self.refresh_failed
                    .store(kind == Fetch::Refresh, Ordering::Release);
                self.publish(|s| {
                    s.state = FeedState::Error {
                        message: err.user_message(),
                    };
                    s.is_refreshing = false;
                });
                self.report(&err);
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Run one repository call bounded by the timeout and raced against
    /// disposal. `Ok(None)` means the feed was already exhausted.
    async fn fetch(&self, kind: Fetch) -> Result<Option<Fetched<S::Item>>, SeiunError> {
        let mut repository = self.repository.lock().await;

        if kind == Fetch::More && repository.is_exhausted() {
            return Ok(None);
        }

        let name = repository.source().name();
        let added = {
            let call = async {
                match kind {
                    Fetch::More => repository.load_more().await,
                    Fetch::Refresh => repository.refresh().await,
                }
            };

            tokio::select! {
                _ = self.cancel.notified() => {
                    info!("{} fetch cancelled", name);
                    return Err(NetworkError::Cancelled.into());
                }
                result = tokio::time::timeout(self.timeout, call) => match result {
                    Ok(page) => page?.len(),
                    Err(_) => {
                        return Err(NetworkError::Timeout {
                            operation: format!("{} {}", kind.label(), name),
                            duration_ms: self.timeout.as_millis() as u64,
                        }
                        .into());
                    }
                },
            }
        };

        Ok(Some(Fetched {
            added,
            items: repository.items().to_vec(),
            exhausted: repository.is_exhausted(),
        }))
    }

    fn publish(&self, update: impl FnOnce(&mut FeedSnapshot<S::Item>)) {
        if self.is_disposed() {
            return;
        }
        self.state_tx.send_modify(update);
    }

    fn report(&self, err: &SeiunError) {
        let guard = match self.on_error.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(handler) = guard.as_ref() {
            handler(err);
        }
    }
}

impl<S: FeedSource> std::fmt::Debug for FeedViewModel<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedViewModel")
            .field("state", &self.state_rx.borrow().state)
            .field("in_flight", &self.is_busy())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
