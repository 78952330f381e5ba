//! Denvr Session
//!
//! Main entry point for API calls, combining authentication, the retrying
//! HTTP client and the configured defaults.

use super::auth::Auth;
use super::endpoint::Endpoint;
use super::http::{build_client, join_url, parse_server, HttpClient};
use super::request::{json_object, query_pairs, strip_nulls, ParamGroup, Params, Request};
use super::retry::RetryPolicy;
use super::validate::validate;
use crate::config::{Config, Credentials};
use crate::error::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

/// Authenticated session against one Denvr server
#[derive(Clone)]
pub struct Session {
    config: Arc<Config>,
    auth: Arc<Auth>,
    http: HttpClient,
    server: Url,
}

impl Session {
    /// Log in with `credentials` and build a session for `config.server()`
    pub async fn connect(config: Config, credentials: &Credentials) -> Result<Self> {
        let client = build_client()?;
        let server = parse_server(config.server())?;

        tracing::info!("Connecting to {} as {}", server, credentials.username);

        let auth = Auth::authenticate(
            client.clone(),
            server.clone(),
            &credentials.username,
            &credentials.password,
        )
        .await?;

        Self::with_client(config, auth, client)
    }

    /// Build a session around an existing credential manager
    pub fn new(config: Config, auth: Auth) -> Result<Self> {
        Self::with_client(config, auth, build_client()?)
    }

    /// Build a session sharing `client` with the credential manager
    pub fn with_client(config: Config, auth: Auth, client: reqwest::Client) -> Result<Self> {
        let server = parse_server(config.server())?;
        let http = HttpClient::new(client, RetryPolicy::from_config(&config));

        Ok(Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            http,
            server,
        })
    }

    /// Replace the retry policy derived from the configuration
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.http = self.http.with_retry_policy(policy);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn server(&self) -> &Url {
        &self.server
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        self.http.retry_policy()
    }

    /// Execute one API call end to end and return its decoded result
    pub async fn execute(&self, request: Request) -> Result<Value> {
        let span = tracing::debug_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method,
            path = %request.path
        );
        self.execute_inner(request).instrument(span).await
    }

    async fn execute_inner(&self, request: Request) -> Result<Value> {
        let url = join_url(&self.server, &request.path)?;

        let query = query_pairs(&strip_nulls(ParamGroup::Query, &request.query));
        let body = request
            .body
            .as_ref()
            .map(|b| json_object(&strip_nulls(ParamGroup::Body, b)));

        // May refresh the access token before anything is sent
        let token = self.auth.current_token().await?;

        self.http
            .send(request.method, &url, &token, &query, body.as_ref())
            .await
    }

    /// Validate `params` against the endpoint contract, then execute
    pub async fn call(&self, endpoint: &Endpoint, params: Params) -> Result<Value> {
        let cleaned = validate(
            endpoint.method,
            endpoint.path,
            &endpoint.group(params),
            endpoint.required,
        )?;
        self.execute(Request::from_groups(endpoint.method, endpoint.path, cleaned))
            .await
    }

    /// Make a GET request
    pub async fn get(&self, path: &str, query: Params) -> Result<Value> {
        self.execute(Request::get(path).query(query)).await
    }

    /// Make a POST request
    pub async fn post(&self, path: &str, body: Params) -> Result<Value> {
        self.execute(Request::post(path).json(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str, query: Params) -> Result<Value> {
        self.execute(Request::delete(path).query(query)).await
    }
}
