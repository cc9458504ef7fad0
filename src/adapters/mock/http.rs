//! Mock HTTP client for testing.
//!
//! Responses are looked up by URL prefix, so a route such as
//! `https://bsky.test/xrpc/app.bsky.notification.listNotifications` matches
//! every cursor/limit query string.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET or POST)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (for POST requests)
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return a transport error
    Error(HttpError),
}

impl MockResponse {
    /// Shorthand for a JSON response.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(status, &value))
    }
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use seiun::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.enqueue_response(
///     "https://bsky.test/xrpc/app.bsky.feed.getTimeline",
///     MockResponse::json(200, serde_json::json!({ "feed": [], "cursor": null })),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// One-shot responses consumed in order, per URL prefix
    queued: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    /// Sticky responses by URL prefix
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Artificial latency applied to every request
    delay: Arc<Mutex<Option<Duration>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response returned for every URL starting with `url`.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Queue a response returned once, after earlier queued ones for the
    /// same prefix. Queued responses take priority over sticky ones.
    pub fn enqueue_response(&self, url: &str, response: MockResponse) {
        let mut queued = self.queued.lock().unwrap();
        queued.entry(url.to_string()).or_default().push_back(response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    /// Delay every response by `delay`.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        {
            let mut queued = self.queued.lock().unwrap();
            for (pattern, queue) in queued.iter_mut() {
                if url.starts_with(pattern.as_str()) {
                    if let Some(response) = queue.pop_front() {
                        return Some(response);
                    }
                }
            }
        }

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }
        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern.as_str()) {
                return Some(response.clone());
            }
        }

        self.default_response.lock().unwrap().clone()
    }

    async fn respond(&self, url: &str) -> Result<Response, HttpError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);
        self.respond(url).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));
        self.respond(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_queued_responses_consumed_in_order() {
        let client = MockHttpClient::new();
        client.enqueue_response("https://h/xrpc/a", MockResponse::json(200, json!({"n": 1})));
        client.enqueue_response("https://h/xrpc/a", MockResponse::json(200, json!({"n": 2})));
        client.set_response("https://h/xrpc/a", MockResponse::json(200, json!({"n": 0})));

        let headers = Headers::new();
        let first = client.get("https://h/xrpc/a?limit=1", &headers).await.unwrap();
        let second = client.get("https://h/xrpc/a?cursor=x", &headers).await.unwrap();
        let third = client.get("https://h/xrpc/a", &headers).await.unwrap();

        assert_eq!(first.json::<serde_json::Value>().unwrap()["n"], 1);
        assert_eq!(second.json::<serde_json::Value>().unwrap()["n"], 2);
        assert_eq!(third.json::<serde_json::Value>().unwrap()["n"], 0);
    }

    #[tokio::test]
    async fn test_unmatched_url_errors() {
        let client = MockHttpClient::new();
        let result = client.get("https://nowhere", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_records_post_body() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(200, json!({})));

        client.post("https://h/x", "{\"k\":1}", &Headers::new()).await.unwrap();

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].body.as_deref(), Some("{\"k\":1}"));
    }
}
