//! Request and response bodies for the XRPC methods this client calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lexicon::{decode_typed, ExternalView, Facet, HasNsid, ReplyRef};

// ============================================================================
// com.atproto.server.*
// ============================================================================

/// Body of `com.atproto.server.createSession`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionInput<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

/// Body of `com.atproto.server.createAccount`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountInput<'a> {
    pub email: &'a str,
    pub handle: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<&'a str>,
}

/// Returned by createSession, createAccount and refreshSession.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_jwt: String,
    pub refresh_jwt: String,
    pub handle: String,
    pub did: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// XRPC error body: `{"error": "...", "message": "..."}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct XrpcErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// Actors
// ============================================================================

/// Basic profile view embedded in notifications and posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub did: String,
    pub handle: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Author {
    /// Display name if set and non-empty, otherwise the handle.
    pub fn label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.handle,
        }
    }
}

// ============================================================================
// app.bsky.notification.listNotifications
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationReason {
    Vote,
    Like,
    Repost,
    Follow,
    Invite,
    Mention,
    Reply,
    Quote,
    #[serde(other)]
    Unknown,
}

/// The record that caused the notification; only the fields the client
/// reads are decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub uri: String,
    pub cid: String,
    pub author: Author,
    pub reason: NotificationReason,
    #[serde(default)]
    pub reason_subject: Option<String>,
    pub record: NotificationRecord,
    pub is_read: bool,
    pub indexed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListNotificationsOutput {
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub cursor: Option<String>,
}

// ============================================================================
// app.bsky.feed.getTimeline
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(default)]
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub reply: Option<ReplyRef>,
    #[serde(default)]
    pub facets: Vec<Facet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub uri: String,
    pub cid: String,
    pub author: Author,
    pub record: PostRecord,
    #[serde(default)]
    pub embed: Option<serde_json::Value>,
    #[serde(default)]
    pub reply_count: Option<u64>,
    #[serde(default)]
    pub repost_count: Option<u64>,
    #[serde(default)]
    pub like_count: Option<u64>,
    pub indexed_at: DateTime<Utc>,
}

impl PostView {
    /// The link card, if the embed is an external view.
    pub fn external_embed(&self) -> Option<ExternalView> {
        self.embed.as_ref().and_then(decode_typed)
    }
}

/// `app.bsky.feed.defs#reasonRepost`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonRepost {
    pub by: Author,
    pub indexed_at: DateTime<Utc>,
}

impl HasNsid for ReasonRepost {
    const NSID: &'static str = "app.bsky.feed.defs#reasonRepost";
}

/// One timeline entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedViewPost {
    pub post: PostView,
    #[serde(default)]
    pub reason: Option<serde_json::Value>,
}

impl FeedViewPost {
    /// Who reposted this entry into the timeline, if it is a repost.
    pub fn reposted_by(&self) -> Option<Author> {
        self.reason
            .as_ref()
            .and_then(decode_typed::<ReasonRepost>)
            .map(|r| r.by)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelineOutput {
    pub feed: Vec<FeedViewPost>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notification_decodes_wire_format() {
        let value = json!({
            "uri": "at://did:plc:bob/app.bsky.feed.like/1",
            "cid": "bafy1",
            "author": { "did": "did:plc:bob", "handle": "bob.bsky.social" },
            "reason": "like",
            "reasonSubject": "at://did:plc:alice/app.bsky.feed.post/1",
            "record": { "$type": "app.bsky.feed.like", "createdAt": "2023-03-01T12:00:00.000Z" },
            "isRead": false,
            "indexedAt": "2023-03-01T12:00:01.000Z"
        });

        let n: Notification = serde_json::from_value(value).unwrap();
        assert_eq!(n.reason, NotificationReason::Like);
        assert!(!n.is_read);
        assert_eq!(n.author.label(), "bob.bsky.social");
        assert_eq!(n.record.created_at.to_rfc3339(), "2023-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_unknown_reason_is_preserved() {
        let reason: NotificationReason = serde_json::from_value(json!("starterpack-joined")).unwrap();
        assert_eq!(reason, NotificationReason::Unknown);
    }

    #[test]
    fn test_author_label_prefers_display_name() {
        let mut author = Author {
            did: "did:plc:a".to_string(),
            handle: "a.bsky.social".to_string(),
            display_name: Some("Alice".to_string()),
            avatar: None,
        };
        assert_eq!(author.label(), "Alice");

        author.display_name = Some("  ".to_string());
        assert_eq!(author.label(), "a.bsky.social");
    }

    #[test]
    fn test_feed_view_post_repost_and_embed() {
        let value = json!({
            "post": {
                "uri": "at://did:plc:a/app.bsky.feed.post/1",
                "cid": "bafy",
                "author": { "did": "did:plc:a", "handle": "a.test" },
                "record": { "text": "look", "createdAt": "2023-03-01T00:00:00Z" },
                "embed": {
                    "$type": "app.bsky.embed.external#view",
                    "external": { "uri": "https://example.com", "title": "Ex", "description": "d" }
                },
                "indexedAt": "2023-03-01T00:00:00Z"
            },
            "reason": {
                "$type": "app.bsky.feed.defs#reasonRepost",
                "by": { "did": "did:plc:b", "handle": "b.test", "displayName": "Bee" },
                "indexedAt": "2023-03-01T01:00:00Z"
            }
        });

        let entry: FeedViewPost = serde_json::from_value(value).unwrap();
        assert_eq!(entry.reposted_by().unwrap().label(), "Bee");
        assert_eq!(entry.post.external_embed().unwrap().external.uri, "https://example.com");
        assert!(entry.post.record.reply.is_none());
    }

    #[test]
    fn test_create_account_input_omits_missing_invite() {
        let input = CreateAccountInput {
            email: "a@example.com",
            handle: "a.bsky.social",
            password: "pw",
            invite_code: None,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert!(value.get("inviteCode").is_none());

        let with_code = CreateAccountInput {
            invite_code: Some("bsky-social-abc"),
            ..input
        };
        let value = serde_json::to_value(&with_code).unwrap();
        assert_eq!(value["inviteCode"], "bsky-social-abc");
    }
}
