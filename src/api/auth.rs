//! Denvr Authentication
//!
//! Exchanges a username and password for an access/refresh token pair and
//! keeps the access token fresh. Renewal is lazy: the expiry check runs on
//! every [`Auth::current_token`] call, so there is no background task.

use super::http::{join_url, sanitize_for_log, unwrap_envelope};
use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use url::Url;

const AUTHENTICATE_PATH: &str = "api/TokenAuth/Authenticate";
const REFRESH_PATH: &str = "api/TokenAuth/RefreshToken";

/// Access and refresh tokens with their expiry times
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

impl Credential {
    /// Build a credential, keeping the access expiry within the refresh expiry
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_at: DateTime<Utc>,
        refresh_expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_at: clamp_expiry(access_expires_at, refresh_expires_at),
            refresh_expires_at,
        }
    }

    pub fn is_refresh_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.refresh_expires_at
    }

    pub fn is_access_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.access_expires_at
    }
}

// Security: token values never end up in logs
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("access_expires_at", &self.access_expires_at)
            .field("refresh_expires_at", &self.refresh_expires_at)
            .finish()
    }
}

fn clamp_expiry(access: DateTime<Utc>, refresh: DateTime<Utc>) -> DateTime<Utc> {
    if access > refresh {
        tracing::warn!("Access token outlives refresh token, clamping its expiry");
        refresh
    } else {
        access
    }
}

/// `now + seconds`, saturating at the representable range. Servers may send
/// very large lifetimes to mean "never expires".
fn expiry_after(now: DateTime<Utc>, seconds: i64) -> DateTime<Utc> {
    Duration::try_seconds(seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or(if seconds < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// Login response payload
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResult {
    access_token: String,
    refresh_token: String,
    expire_in_seconds: i64,
    refresh_token_expire_in_seconds: i64,
}

/// Refresh response payload; only the access fields are used
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResult {
    access_token: String,
    expire_in_seconds: i64,
}

/// Credential manager holding the current token pair
pub struct Auth {
    server: Url,
    http: Client,
    clock: Arc<dyn Clock>,
    /// Held across the expiry check and any refresh, so concurrent callers
    /// wait for one in-flight refresh instead of starting their own
    credential: Mutex<Credential>,
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("server", &self.server.as_str())
            .finish_non_exhaustive()
    }
}

impl Auth {
    /// Log in against `server` using the wall clock
    pub async fn authenticate(http: Client, server: Url, username: &str, password: &str) -> Result<Self> {
        Self::authenticate_with_clock(http, server, username, password, Arc::new(SystemClock)).await
    }

    /// Log in with an explicit time source
    pub async fn authenticate_with_clock(
        http: Client,
        server: Url,
        username: &str,
        password: &str,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if username.is_empty() {
            return Err(Error::MissingCredential { field: "username" });
        }
        if password.is_empty() {
            return Err(Error::MissingCredential { field: "password" });
        }

        let url = join_url(&server, AUTHENTICATE_PATH)?;
        tracing::debug!("POST {}", url);

        let request = http
            .post(url)
            .json(&json!({
                "userNameOrEmailAddress": username,
                "password": password,
            }));
        let result: LoginResult = serde_json::from_value(send_auth_request(request).await?)?;

        let now = clock.now();
        let credential = Credential::new(
            result.access_token,
            result.refresh_token,
            expiry_after(now, result.expire_in_seconds),
            expiry_after(now, result.refresh_token_expire_in_seconds),
        );

        tracing::info!(
            "Authenticated, access token valid until {}, refresh token until {}",
            credential.access_expires_at,
            credential.refresh_expires_at
        );

        Ok(Self::from_credential(http, server, credential, clock))
    }

    /// Wrap an existing credential without a login round trip
    pub fn from_credential(http: Client, server: Url, credential: Credential, clock: Arc<dyn Clock>) -> Self {
        Self {
            server,
            http,
            clock,
            credential: Mutex::new(credential),
        }
    }

    pub fn server(&self) -> &Url {
        &self.server
    }

    /// Snapshot of the current credential
    pub async fn credential(&self) -> Credential {
        self.credential.lock().await.clone()
    }

    /// Get a valid access token, refreshing it first when it has expired.
    ///
    /// Fails with [`Error::CredentialExpired`] once the refresh token itself has
    /// expired. A failed refresh leaves the stored credential unchanged.
    pub async fn current_token(&self) -> Result<String> {
        let mut credential = self.credential.lock().await;
        let now = self.clock.now();

        if credential.is_refresh_expired(now) {
            tracing::warn!("Refresh token expired at {}", credential.refresh_expires_at);
            return Err(Error::CredentialExpired {
                expired_at: credential.refresh_expires_at,
            });
        }

        if credential.is_access_expired(now) {
            tracing::debug!("Access token expired, refreshing");
            let result = self.refresh(&credential.refresh_token).await?;

            let refreshed_at = self.clock.now();
            credential.access_token = result.access_token;
            credential.access_expires_at = clamp_expiry(
                expiry_after(refreshed_at, result.expire_in_seconds),
                credential.refresh_expires_at,
            );

            tracing::debug!(
                "Access token refreshed, expires at {}",
                credential.access_expires_at
            );
        }

        Ok(credential.access_token.clone())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResult> {
        let url = join_url(&self.server, REFRESH_PATH)?;
        tracing::debug!("GET {}", url);

        let request = self
            .http
            .get(url)
            .query(&[("refreshToken", refresh_token)]);
        Ok(serde_json::from_value(send_auth_request(request).await?)?)
    }
}

/// Send a login/refresh call. Auth endpoints are never retried.
async fn send_auth_request(request: RequestBuilder) -> Result<serde_json::Value> {
    let response = request.send().await.map_err(|e| Error::AuthenticationFailed {
        status: None,
        body: e.to_string(),
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| Error::AuthenticationFailed {
        status: Some(status.as_u16()),
        body: e.to_string(),
    })?;

    if !status.is_success() {
        tracing::error!("Auth error: {} - {}", status, sanitize_for_log(&body));
        return Err(Error::AuthenticationFailed {
            status: Some(status.as_u16()),
            body,
        });
    }

    Ok(unwrap_envelope(serde_json::from_str(&body)?))
}
