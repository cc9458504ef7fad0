//! XRPC client for a single service host.
//!
//! Queries are `GET /xrpc/{nsid}?params`, procedures are JSON
//! `POST /xrpc/{nsid}`. Every response passes through [`XrpcClient::check`],
//! which maps transport failures, auth rejections and other non-2xx statuses
//! onto [`SeiunError`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::models::{
    CreateAccountInput, CreateSessionInput, ListNotificationsOutput, SessionResponse,
    TimelineOutput, XrpcErrorBody,
};
use crate::error::{
    classify_http_error, AuthError, NetworkError, SeiunError, SeiunResult, ServerError,
};
use crate::traits::{Headers, HttpClient, Response};

/// XRPC error names that mean the token is no longer usable.
const AUTH_ERROR_NAMES: &[&str] = &["ExpiredToken", "InvalidToken", "AuthenticationRequired"];

/// Build the XRPC base URL for a service host.
///
/// A bare host gets `https://`; a value that already has a scheme is used
/// as-is (self-hosted PDS on plain HTTP, local test servers).
pub fn xrpc_base_url(service_host: &str) -> String {
    let host = service_host.trim().trim_end_matches('/');
    if host.contains("://") {
        format!("{}/xrpc", host)
    } else {
        format!("https://{}/xrpc", host)
    }
}

#[derive(Clone)]
pub struct XrpcClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl std::fmt::Debug for XrpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XrpcClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl XrpcClient {
    pub fn new(http: Arc<dyn HttpClient>, service_host: &str) -> Self {
        Self {
            http,
            base_url: xrpc_base_url(service_host),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, nsid: &str) -> String {
        format!("{}/{}", self.base_url, nsid)
    }

    fn headers(token: Option<&str>) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(token) = token {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }

    /// Call a query method.
    pub async fn query<T: DeserializeOwned>(
        &self,
        nsid: &str,
        params: &[(&str, String)],
        token: Option<&str>,
    ) -> SeiunResult<T> {
        let mut url = self.url(nsid);
        if !params.is_empty() {
            let query: Vec<String> = params
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&query.join("&"));
        }

        debug!("GET {}", url);
        let response = self
            .http
            .get(&url, &Self::headers(token))
            .await
            .map_err(|e| classify_http_error(e, &url))?;

        Self::decode(Self::check(response)?)
    }

    /// Call a procedure method with a JSON body.
    pub async fn procedure<B: Serialize, T: DeserializeOwned>(
        &self,
        nsid: &str,
        body: &B,
        token: Option<&str>,
    ) -> SeiunResult<T> {
        let url = self.url(nsid);
        let body = serde_json::to_string(body).map_err(|e| NetworkError::Other {
            message: format!("failed to encode request body: {}", e),
        })?;

        let mut headers = Self::headers(token);
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        debug!("POST {}", url);
        let response = self
            .http
            .post(&url, &body, &headers)
            .await
            .map_err(|e| classify_http_error(e, &url))?;

        Self::decode(Self::check(response)?)
    }

    /// Map a non-2xx response to an error.
    fn check(response: Response) -> SeiunResult<Response> {
        if response.is_success() {
            return Ok(response);
        }

        let body: XrpcErrorBody = response.json().unwrap_or_default();
        let message = body
            .message
            .clone()
            .or_else(|| body.error.clone())
            .unwrap_or_else(|| format!("HTTP {}", response.status));

        let is_auth_error = response.status == 401
            || body
                .error
                .as_deref()
                .is_some_and(|name| AUTH_ERROR_NAMES.contains(&name));

        if is_auth_error {
            Err(AuthError::SessionExpired { message }.into())
        } else {
            Err(ServerError::new(response.status, body.error, message).into())
        }
    }

    fn decode<T: DeserializeOwned>(response: Response) -> SeiunResult<T> {
        response.json().map_err(|e| {
            SeiunError::from(NetworkError::InvalidResponse {
                message: e.to_string(),
            })
        })
    }

    // ========================================================================
    // com.atproto.server.*
    // ========================================================================

    pub async fn create_session(
        &self,
        identifier: &str,
        password: &str,
    ) -> SeiunResult<SessionResponse> {
        self.procedure(
            "com.atproto.server.createSession",
            &CreateSessionInput {
                identifier,
                password,
            },
            None,
        )
        .await
    }

    pub async fn create_account(
        &self,
        input: &CreateAccountInput<'_>,
    ) -> SeiunResult<SessionResponse> {
        self.procedure("com.atproto.server.createAccount", input, None)
            .await
    }

    /// Exchange the refresh token for a new token pair.
    pub async fn refresh_session(&self, refresh_token: &str) -> SeiunResult<SessionResponse> {
        self.procedure(
            "com.atproto.server.refreshSession",
            &serde_json::json!({}),
            Some(refresh_token),
        )
        .await
    }

    // ========================================================================
    // app.bsky.*
    // ========================================================================

    pub async fn list_notifications(
        &self,
        access_token: &str,
        cursor: Option<&str>,
        limit: u32,
    ) -> SeiunResult<ListNotificationsOutput> {
        self.query(
            "app.bsky.notification.listNotifications",
            &page_params(cursor, limit),
            Some(access_token),
        )
        .await
    }

    pub async fn get_timeline(
        &self,
        access_token: &str,
        cursor: Option<&str>,
        limit: u32,
    ) -> SeiunResult<TimelineOutput> {
        self.query(
            "app.bsky.feed.getTimeline",
            &page_params(cursor, limit),
            Some(access_token),
        )
        .await
    }
}

fn page_params(cursor: Option<&str>, limit: u32) -> Vec<(&'static str, String)> {
    let mut params = vec![("limit", limit.to_string())];
    if let Some(cursor) = cursor {
        params.push(("cursor", cursor.to_string()));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::HttpError;
    use serde_json::json;

    fn client(mock: &MockHttpClient) -> XrpcClient {
        XrpcClient::new(Arc::new(mock.clone()), "bsky.test")
    }

    #[test]
    fn test_base_url() {
        assert_eq!(xrpc_base_url("bsky.social"), "https://bsky.social/xrpc");
        assert_eq!(xrpc_base_url("bsky.social/"), "https://bsky.social/xrpc");
        assert_eq!(
            xrpc_base_url("http://127.0.0.1:2583"),
            "http://127.0.0.1:2583/xrpc"
        );
    }

    #[tokio::test]
    async fn test_query_encodes_cursor_and_sends_bearer() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(
            200,
            json!({ "notifications": [], "cursor": null }),
        ));

        let page = client(&mock)
            .list_notifications("tok", Some("1677:bafy/x"), 30)
            .await
            .unwrap();
        assert!(page.notifications.is_empty());
        assert!(page.cursor.is_none());

        let request = &mock.get_requests()[0];
        assert_eq!(
            request.url,
            "https://bsky.test/xrpc/app.bsky.notification.listNotifications?limit=30&cursor=1677%3Abafy%2Fx"
        );
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Bearer tok")
        );
    }

    #[tokio::test]
    async fn test_expired_token_maps_to_auth_error() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(
            400,
            json!({ "error": "ExpiredToken", "message": "Token has expired" }),
        ));

        let err = client(&mock)
            .get_timeline("tok", None, 50)
            .await
            .unwrap_err();
        assert!(err.requires_reauth());
        assert_eq!(
            err,
            SeiunError::Auth(AuthError::SessionExpired {
                message: "Token has expired".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::new(
            502,
            bytes::Bytes::from("Bad Gateway"),
        )));

        let err = client(&mock).get_timeline("tok", None, 50).await.unwrap_err();
        assert_eq!(err, SeiunError::Server(ServerError::new(502, None, "HTTP 502")));
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_network_error() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));

        let err = client(&mock).create_session("a", "b").await.unwrap_err();
        assert!(matches!(
            err,
            SeiunError::Network(NetworkError::ConnectionFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({ "unexpected": true })));

        let err = client(&mock).get_timeline("tok", None, 50).await.unwrap_err();
        assert!(matches!(
            err,
            SeiunError::Network(NetworkError::InvalidResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_refresh_uses_refresh_token() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(
            200,
            json!({
                "accessJwt": "a2", "refreshJwt": "r2",
                "handle": "alice.bsky.test", "did": "did:plc:alice"
            }),
        ));

        let session = client(&mock).refresh_session("r1").await.unwrap();
        assert_eq!(session.access_jwt, "a2");

        let request = &mock.get_requests()[0];
        assert_eq!(request.method, "POST");
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Bearer r1")
        );
    }
}
