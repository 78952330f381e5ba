//! HTTP utilities for Denvr REST API calls

use super::request::Method;
use super::retry::RetryPolicy;
use crate::error::{Error, Result};
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Per-request transport timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Build the shared reqwest client used for auth and resource calls
pub fn build_client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(format!("denvr-rs/{}", crate::VERSION))
        .timeout(DEFAULT_TIMEOUT)
        .build()?)
}

/// Parse a configured server URL, normalised to end with a path separator
pub fn parse_server(server: &str) -> Result<Url> {
    let mut url = Url::parse(server)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Resolve `path` against the server root.
///
/// Leading separators are stripped so `/api/x` and `api/x` both land under the
/// configured server; a path can never redirect the call to another host.
pub fn join_url(server: &Url, path: &str) -> Result<Url> {
    let relative = path.trim_start_matches('/');
    let mut base = server.as_str().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(Url::parse(&format!("{base}{relative}"))?)
}

/// Return `result` from an envelope object, or the body as-is
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("result") => {
            map.remove("result").unwrap_or(Value::Null)
        },
        other => other,
    }
}

fn decode_body(body: &str) -> Result<Value> {
    // Handle empty response
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    let value: Value = serde_json::from_str(body)?;
    Ok(unwrap_envelope(value))
}

/// HTTP client wrapper that applies a [`RetryPolicy`] to resource calls
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn new(client: Client, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Send one API call, retrying transient failures, and decode the result.
    ///
    /// Transport errors are retried like retryable statuses and, once the
    /// attempts run out, reported as [`Error::RequestFailed`] without a status.
    pub async fn send(
        &self,
        method: Method,
        url: &Url,
        token: &str,
        query: &[(String, String)],
        body: Option<&Map<String, Value>>,
    ) -> Result<Value> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let mut request = self
                .client
                .request(method.to_reqwest(), url.clone())
                .bearer_auth(token)
                .header(CONTENT_TYPE, "application/json");
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            tracing::debug!(attempt, "{} {}", method, url);

            let response = match request.send().await {
                Ok(response) => response,
                Err(err) => {
                    if self.retry.should_retry(method, attempt) {
                        let delay = self.retry.backoff_delay(attempt);
                        tracing::warn!(attempt, ?delay, "Request failed: {}, retrying", err);
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    tracing::error!(attempt, "Request failed: {}", err);
                    return Err(Error::RequestFailed {
                        status: None,
                        body: err.to_string(),
                    });
                },
            };

            let status = response.status();
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let response_body = response.text().await.map_err(|e| Error::RequestFailed {
                status: Some(status.as_u16()),
                body: e.to_string(),
            })?;

            if status.is_success() {
                return decode_body(&response_body);
            }

            let code = status.as_u16();
            if self.retry.is_retryable_status(code) && self.retry.should_retry(method, attempt) {
                let delay = self
                    .retry
                    .retry_after(code, retry_after.as_deref())
                    .unwrap_or_else(|| self.retry.backoff_delay(attempt));
                tracing::warn!(attempt, ?delay, "API returned {}, retrying", status);
                tokio::time::sleep(delay).await;
                continue;
            }

            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            return Err(Error::RequestFailed {
                status: Some(code),
                body: response_body,
            });
        }
    }
}
