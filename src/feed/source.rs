//! Remote page sources backing a [`FeedRepository`](super::FeedRepository).

use async_trait::async_trait;
use std::sync::Arc;

use super::item::FeedItem;
use super::page::FeedPage;
use crate::api::{FeedViewPost, Notification, XrpcClient};
use crate::auth::{Session, SessionManager};
use crate::error::{AuthError, SeiunResult};
use crate::traits::HttpClient;

/// Fetches one page of items after `cursor` (`None` = first page).
#[async_trait]
pub trait FeedSource: Send + Sync {
    type Item: FeedItem;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn fetch(&self, cursor: Option<&str>, limit: u32)
        -> SeiunResult<FeedPage<Self::Item>>;
}

/// Shared plumbing: resolve the session at request time.
#[derive(Clone)]
struct Authorized {
    http: Arc<dyn HttpClient>,
    sessions: Arc<SessionManager>,
}

impl Authorized {
    fn client(&self) -> SeiunResult<(XrpcClient, Session)> {
        let session = self
            .sessions
            .current()
            .ok_or(AuthError::NotAuthenticated)?;
        let client = XrpcClient::new(self.http.clone(), &session.service_host);
        Ok((client, session))
    }
}

/// `app.bsky.notification.listNotifications`
#[derive(Clone)]
pub struct NotificationSource {
    inner: Authorized,
}

impl NotificationSource {
    pub fn new(http: Arc<dyn HttpClient>, sessions: Arc<SessionManager>) -> Self {
        Self {
            inner: Authorized { http, sessions },
        }
    }
}

#[async_trait]
impl FeedSource for NotificationSource {
    type Item = Notification;

    fn name(&self) -> &'static str {
        "notifications"
    }

    async fn fetch(
        &self,
        cursor: Option<&str>,
        limit: u32,
    ) -> SeiunResult<FeedPage<Notification>> {
        let (client, session) = self.inner.client()?;
        let output = client
            .list_notifications(&session.access_token, cursor, limit)
            .await?;
        Ok(FeedPage::new(output.notifications, output.cursor))
    }
}

/// `app.bsky.feed.getTimeline`
#[derive(Clone)]
pub struct TimelineSource {
    inner: Authorized,
}

impl TimelineSource {
    pub fn new(http: Arc<dyn HttpClient>, sessions: Arc<SessionManager>) -> Self {
        Self {
            inner: Authorized { http, sessions },
        }
    }
}

#[async_trait]
impl FeedSource for TimelineSource {
    type Item = FeedViewPost;

    fn name(&self) -> &'static str {
        "timeline"
    }

    async fn fetch(
        &self,
        cursor: Option<&str>,
        limit: u32,
    ) -> SeiunResult<FeedPage<FeedViewPost>> {
        let (client, session) = self.inner.client()?;
        let output = client
            .get_timeline(&session.access_token, cursor, limit)
            .await?;
        Ok(FeedPage::new(output.feed, output.cursor))
    }
}
