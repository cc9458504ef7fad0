//! Registration input checks, run before any request is sent.

use crate::error::ValidationError;

/// Everything `com.atproto.server.createAccount` needs from the user.
#[derive(Clone, PartialEq)]
pub struct RegistrationParams {
    pub service_host: String,
    pub email: String,
    /// Handle label; the account handle is `{handle}.{service_host}`.
    pub handle: String,
    pub password: String,
    pub invite_code: Option<String>,
}

impl std::fmt::Debug for RegistrationParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationParams")
            .field("service_host", &self.service_host)
            .field("email", &self.email)
            .field("handle", &self.handle)
            .field("invite_code", &self.invite_code)
            .finish_non_exhaustive()
    }
}

impl RegistrationParams {
    pub fn new(
        service_host: impl Into<String>,
        email: impl Into<String>,
        handle: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            service_host: service_host.into(),
            email: email.into(),
            handle: handle.into(),
            password: password.into(),
            invite_code: None,
        }
    }

    pub fn with_invite_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.invite_code = if code.trim().is_empty() {
            None
        } else {
            Some(code)
        };
        self
    }

    /// Check all fields, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_service_host(&self.service_host)?;

        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "email" });
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail {
                email: self.email.clone(),
            });
        }

        if self.handle.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "handle" });
        }
        if !is_valid_handle_label(&self.handle) {
            return Err(ValidationError::InvalidHandle {
                handle: self.handle.clone(),
            });
        }

        if self.password.is_empty() {
            return Err(ValidationError::MissingField { field: "password" });
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Full handle to register, e.g. `alice.bsky.social`.
    ///
    /// Only the host name takes part: a scheme, port or path given with
    /// the service host is left out.
    pub fn account_handle(&self) -> String {
        format!("{}.{}", self.handle.trim(), host_name(&self.service_host))
    }
}

fn host_name(service_host: &str) -> &str {
    let host = service_host.trim();
    let host = host.split_once("://").map_or(host, |(_, rest)| rest);
    let host = host.split('/').next().unwrap_or(host);
    host.rsplit_once(':').map_or(host, |(name, _)| name)
}

pub(crate) fn validate_service_host(host: &str) -> Result<(), ValidationError> {
    if host.trim().is_empty() {
        return Err(ValidationError::MissingField {
            field: "service host",
        });
    }
    if host.trim().chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidServiceHost {
            host: host.to_string(),
        });
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

// A single DNS label: letters, digits and inner hyphens.
fn is_valid_handle_label(handle: &str) -> bool {
    !handle.starts_with('-')
        && !handle.ends_with('-')
        && handle.len() <= 63
        && handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
