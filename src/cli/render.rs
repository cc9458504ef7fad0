//! Plain-text rendering of feed items.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

use crate::api::{FeedViewPost, Notification, NotificationReason};
use crate::feed::FeedItem;

const DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M";

pub fn format_timestamp<Tz>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz).format(DATETIME_FORMAT).to_string()
}

fn reason_text(reason: NotificationReason) -> Option<&'static str> {
    match reason {
        NotificationReason::Vote | NotificationReason::Like => Some("liked your post"),
        NotificationReason::Repost => Some("reposted your post"),
        NotificationReason::Follow => Some("followed you"),
        NotificationReason::Invite => Some("joined with your invite code"),
        NotificationReason::Mention => Some("mentioned you"),
        NotificationReason::Reply => Some("replied to your post"),
        NotificationReason::Quote => Some("quoted your post"),
        NotificationReason::Unknown => None,
    }
}

/// One line per notification, `*` marking unread ones. Reasons this client
/// does not know are skipped.
pub fn render_notification<Tz>(notification: &Notification, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let text = reason_text(notification.reason)?;
    let marker = if notification.is_read() { ' ' } else { '*' };
    let mut line = format!(
        "{} {} {} {}",
        marker,
        format_timestamp(notification.created_at(), tz),
        notification.author.label(),
        text
    );

    if matches!(
        notification.reason,
        NotificationReason::Mention | NotificationReason::Reply | NotificationReason::Quote
    ) {
        if let Some(body) = notification.record.text.as_deref() {
            if !body.is_empty() {
                line.push_str(&format!(": {}", body));
            }
        }
    }
    Some(line)
}

/// Header line plus indented post text.
pub fn render_post<Tz>(entry: &FeedViewPost, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let post = &entry.post;
    let mut out = String::new();

    if let Some(by) = entry.reposted_by() {
        out.push_str(&format!("  (reposted by {})\n", by.label()));
    }
    out.push_str(&format!(
        "{} {} @{}",
        format_timestamp(entry.created_at(), tz),
        post.author.label(),
        post.author.handle
    ));
    if post.record.reply.is_some() {
        out.push_str(" (reply)");
    }

    for line in post.record.text.lines() {
        out.push_str("\n    ");
        out.push_str(line);
    }

    if let Some(card) = post.external_embed() {
        out.push_str(&format!("\n    [{}] {}", card.external.title, card.external.uri));
    }

    let counts = [
        (post.reply_count, "replies"),
        (post.repost_count, "reposts"),
        (post.like_count, "likes"),
    ];
    let counts: Vec<String> = counts
        .iter()
        .filter_map(|(count, label)| count.map(|n| format!("{} {}", n, label)))
        .collect();
    if !counts.is_empty() {
        out.push_str(&format!("\n    {}", counts.join(" · ")));
    }
    out
}
