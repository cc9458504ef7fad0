//! Login, registration and session renewal.

use std::sync::Arc;
use tracing::{info, warn};

use super::session::{Credential, Session, SessionManager};
use super::validation::{validate_service_host, RegistrationParams};
use crate::api::models::CreateAccountInput;
use crate::api::XrpcClient;
use crate::error::{AuthError, SeiunError, SeiunResult, ValidationError};
use crate::traits::HttpClient;

/// Talks to the `com.atproto.server.*` methods and keeps the
/// [`SessionManager`] up to date with the result.
pub struct Authenticator {
    http: Arc<dyn HttpClient>,
    sessions: Arc<SessionManager>,
}

impl Authenticator {
    pub fn new(http: Arc<dyn HttpClient>, sessions: Arc<SessionManager>) -> Self {
        Self { http, sessions }
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    fn client(&self, service_host: &str) -> XrpcClient {
        XrpcClient::new(self.http.clone(), service_host)
    }

    /// Sign in with handle (or email) and password.
    ///
    /// On success both the credential and the new session are persisted.
    pub async fn login(
        &self,
        service_host: &str,
        handle: &str,
        password: &str,
    ) -> SeiunResult<Session> {
        validate_service_host(service_host)?;
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(ValidationError::MissingField { field: "handle" }.into());
        }
        if handle.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidHandle {
                handle: handle.to_string(),
            }
            .into());
        }
        if password.is_empty() {
            return Err(ValidationError::MissingField { field: "password" }.into());
        }

        let service_host = service_host.trim();
        let response = self
            .client(service_host)
            .create_session(handle, password)
            .await
            .map_err(|e| match e {
                // createSession answers bad passwords with 401 AuthenticationRequired
                SeiunError::Auth(AuthError::SessionExpired { message }) => {
                    AuthError::InvalidLogin { message }.into()
                }
                other => other,
            })?;

        let session = Session::from_response(service_host, response);
        self.sessions
            .save_credential(&Credential::new(service_host, handle, password))
            .await?;
        self.sessions.save(&session).await?;

        info!("Logged in as {} on {}", session.handle, service_host);
        Ok(session)
    }

    /// Create an account. Input is validated before any request is sent.
    pub async fn register(&self, params: &RegistrationParams) -> SeiunResult<Session> {
        params.validate()?;

        let service_host = params.service_host.trim();
        let account_handle = params.account_handle();
        let input = CreateAccountInput {
            email: params.email.trim(),
            handle: &account_handle,
            password: &params.password,
            invite_code: params.invite_code.as_deref(),
        };

        let response = self.client(service_host).create_account(&input).await?;
        let session = Session::from_response(service_host, response);

        self.sessions
            .save_credential(&Credential::new(
                service_host,
                account_handle.as_str(),
                params.password.as_str(),
            ))
            .await?;
        self.sessions.save(&session).await?;

        info!("Registered {} on {}", session.handle, service_host);
        Ok(session)
    }

    /// Trade the current refresh token for a new session.
    pub async fn refresh_session(&self) -> SeiunResult<Session> {
        let current = self
            .sessions
            .current()
            .ok_or(AuthError::NotAuthenticated)?;

        let response = self
            .client(&current.service_host)
            .refresh_session(&current.refresh_token)
            .await
            .map_err(|e| match e {
                SeiunError::Auth(AuthError::SessionExpired { message }) => {
                    AuthError::RefreshFailed { message }.into()
                }
                other => other,
            })?;

        let session = Session::from_response(&current.service_host, response);
        self.sessions.save(&session).await?;
        info!("Refreshed session for {}", session.handle);
        Ok(session)
    }

    /// Log in again with the stored credential.
    pub async fn reauthenticate(&self) -> SeiunResult<Session> {
        let credential = match self.sessions.load_credential().await {
            Some(credential) => credential,
            None => {
                warn!("Re-authentication requested without a stored credential");
                return Err(AuthError::NoCredential.into());
            }
        };

        self.login(
            &credential.service_host,
            &credential.handle,
            &credential.password,
        )
        .await
    }

    pub async fn logout(&self) -> SeiunResult<()> {
        self.sessions.clear().await
    }
}
