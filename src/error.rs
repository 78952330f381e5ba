//! Error types
//!
//! Every failure the client can produce is a variant of [`Error`]. Nothing is
//! swallowed: retries in the request pipeline are the only automatic recovery.

use chrono::{DateTime, Utc};

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the Denvr client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required parameter was not supplied and had no configured default.
    /// Raised before any network traffic.
    #[error("Required parameter {field} is missing for {method} request to {path}")]
    MissingRequiredField {
        field: String,
        method: String,
        path: String,
    },

    /// The login or refresh exchange failed
    #[error("Authentication failed{}: {body}", fmt_status(.status))]
    AuthenticationFailed { status: Option<u16>, body: String },

    /// The refresh token has expired; a new login is required
    #[error("Refresh token expired at {expired_at}, re-authentication required")]
    CredentialExpired { expired_at: DateTime<Utc> },

    /// A resource call hit a non-retryable status or exhausted its retries.
    /// `status` is `None` when no response was ever received.
    #[error("API request failed{}: {body}", fmt_status(.status))]
    RequestFailed { status: Option<u16>, body: String },

    /// A success response did not carry valid JSON
    #[error("Failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A login credential was empty or could not be found
    #[error("Missing credential: {field}")]
    MissingCredential { field: &'static str },

    /// The underlying HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl Error {
    /// HTTP status attached to the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed { status, .. } | Self::RequestFailed { status, .. } => {
                *status
            },
            _ => None,
        }
    }

    /// True for the terminal credential state that needs a fresh login
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::CredentialExpired { .. })
    }

    /// Whether a later retry of the same call could succeed: transport
    /// failures and transient statuses. Auth and validation errors never are.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed { status: None, .. } => true,
            Self::RequestFailed {
                status: Some(code), ..
            } => crate::api::retry::RETRYABLE_STATUS_CODES.contains(code),
            _ => false,
        }
    }
}

/// Format an API error for display
/// Security: Avoids echoing raw response bodies back to the user
pub fn format_api_error(error: &Error) -> String {
    match error {
        Error::MissingRequiredField { .. } | Error::MissingCredential { .. } => {
            return error.to_string();
        },
        Error::CredentialExpired { .. } => {
            return "Session expired. Log in again with your username and password.".to_string();
        },
        Error::AuthenticationFailed { .. } => {
            return "Authentication failed. Check your username and password.".to_string();
        },
        _ => {},
    }

    match error.status() {
        Some(401) => "Authentication failed. Check your Denvr credentials.".to_string(),
        Some(403) => "Permission denied for this tenant or cluster.".to_string(),
        Some(404) => "Resource not found.".to_string(),
        Some(409) => "Resource conflict. The resource may already exist or be in use.".to_string(),
        Some(429) => "Rate limit exceeded. Please try again later.".to_string(),
        Some(400) => "Invalid request. Check your parameters.".to_string(),
        Some(s) if s >= 500 => "Denvr API temporarily unavailable. Please try again.".to_string(),
        Some(_) => "Request failed.".to_string(),
        None if matches!(error, Error::RequestFailed { .. }) => {
            "Request failed. Check your network connection and try again.".to_string()
        },
        None => {
            let error_str = error.to_string();
            let sanitized = error_str
                .chars()
                .filter(|c| c.is_ascii_graphic() || *c == ' ')
                .take(80)
                .collect::<String>();

            if sanitized.len() < error_str.len() {
                format!("{}...", sanitized)
            } else {
                sanitized
            }
        },
    }
}
