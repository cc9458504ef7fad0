//! Mock implementations for test fixtures.
//!
//! Re-exports the mocks from `seiun::adapters::mock` and adds a scripted
//! notification source for view-model tests.

#![allow(dead_code)]

pub use seiun::adapters::mock::{InMemoryStore, MockHttpClient, MockResponse};

use async_trait::async_trait;
use seiun::api::Notification;
use seiun::error::{NetworkError, SeiunError, SeiunResult};
use seiun::feed::{FeedPage, FeedRepository, FeedSource};
use seiun::viewmodel::FeedViewModel;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

use super::notification;

type Reply = SeiunResult<FeedPage<Notification>>;

/// Feed source that replays queued replies in order.
///
/// With [`gated`](ScriptedSource::gated) each fetch waits for a permit
/// from [`release`](ScriptedSource::release), so a test can hold a request
/// in flight.
#[derive(Clone)]
pub struct ScriptedSource {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    cursors: Arc<Mutex<Vec<Option<String>>>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            cursors: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::new()
        }
    }

    /// Queue a page of notifications identified by `ids`.
    pub fn push_page(&self, ids: &[&str], cursor: Option<&str>) {
        let items = ids.iter().map(|id| notification(id)).collect();
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(FeedPage::new(items, cursor.map(str::to_string))));
    }

    pub fn push_error(&self, err: impl Into<SeiunError>) {
        self.replies.lock().unwrap().push_back(Err(err.into()));
    }

    pub fn push_network_error(&self) {
        self.push_error(NetworkError::ConnectionFailed {
            url: "https://bsky.test/xrpc".to_string(),
            message: "connection refused".to_string(),
        });
    }

    /// Let one gated fetch proceed.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Cursors passed to each fetch, in call order.
    pub fn calls(&self) -> Vec<Option<String>> {
        self.cursors.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.cursors.lock().unwrap().len()
    }
}

#[async_trait]
impl FeedSource for ScriptedSource {
    type Item = Notification;

    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch(&self, cursor: Option<&str>, _limit: u32) -> Reply {
        self.cursors.lock().unwrap().push(cursor.map(str::to_string));

        if let Some(gate) = &self.gate {
            let permit = gate.acquire().await.expect("gate closed");
            permit.forget();
        }

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(FeedPage::empty()))
    }
}

/// View model over `source` with a generous timeout.
pub fn view_model(source: ScriptedSource) -> FeedViewModel<ScriptedSource> {
    view_model_with_timeout(source, Duration::from_secs(5))
}

pub fn view_model_with_timeout(
    source: ScriptedSource,
    timeout: Duration,
) -> FeedViewModel<ScriptedSource> {
    FeedViewModel::new(FeedRepository::new(source), timeout)
}

/// Yield until `condition` holds, panicking after a second.
pub async fn wait_until(condition: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached in time"
        );
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}
