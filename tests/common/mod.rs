//! Common test utilities for integration tests.
//!
//! Fixtures for sessions and wire-format items, plus a scripted
//! [`FeedSource`] whose pages, failures and latency are set up per test.
//!
//! # Example
//!
//! ```ignore
//! let source = ScriptedSource::new();
//! source.push_page(&["A", "B"], Some("c1"));
//! let vm = view_model(source.clone());
//! ```

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;

use seiun::api::Notification;
use seiun::auth::Session;
use serde_json::json;

/// Session for `alice.bsky.test` on `service_host`.
#[allow(dead_code)]
pub fn test_session(service_host: &str) -> Session {
    Session {
        service_host: service_host.to_string(),
        handle: "alice.bsky.test".to_string(),
        did: "did:plc:alice".to_string(),
        access_token: "test-access-token".to_string(),
        refresh_token: "test-refresh-token".to_string(),
    }
}

/// `createSession`-style response body.
#[allow(dead_code)]
pub fn session_body(access: &str) -> serde_json::Value {
    json!({
        "accessJwt": access,
        "refreshJwt": format!("{}-refresh", access),
        "handle": "alice.bsky.test",
        "did": "did:plc:alice"
    })
}

/// Wire JSON for a like notification with the given URI suffix.
#[allow(dead_code)]
pub fn notification_json(id: &str) -> serde_json::Value {
    json!({
        "uri": format!("at://did:plc:bob/app.bsky.feed.like/{}", id),
        "cid": format!("bafy{}", id),
        "author": { "did": "did:plc:bob", "handle": "bob.bsky.test", "displayName": "Bob" },
        "reason": "like",
        "reasonSubject": "at://did:plc:alice/app.bsky.feed.post/1",
        "record": { "$type": "app.bsky.feed.like", "createdAt": "2023-03-01T12:00:00.000Z" },
        "isRead": false,
        "indexedAt": "2023-03-01T12:00:01.000Z"
    })
}

#[allow(dead_code)]
pub fn notification(id: &str) -> Notification {
    serde_json::from_value(notification_json(id)).expect("fixture should decode")
}

/// Identifiers of `items`, shortened to the URI suffix for readable asserts.
#[allow(dead_code)]
pub fn short_ids(items: &[Notification]) -> Vec<String> {
    items
        .iter()
        .map(|n| n.uri.rsplit('/').next().unwrap_or_default().to_string())
        .collect()
}
