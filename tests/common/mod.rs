//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::Utc;
use denvr::api::http::parse_server;
use denvr::clock::ManualClock;
use denvr::{Auth, Config, RetryPolicy, Session};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret";

pub fn token_body(access: &str, expire: i64, refresh_expire: i64) -> serde_json::Value {
    json!({
        "result": {
            "accessToken": access,
            "refreshToken": "refresh1",
            "expireInSeconds": expire,
            "refreshTokenExpireInSeconds": refresh_expire
        }
    })
}

/// Login endpoint accepting alice/secret, expected to be hit exactly once
pub async fn mount_login(server: &MockServer, access: &str, expire: i64, refresh_expire: i64) {
    Mock::given(method("POST"))
        .and(path("/api/TokenAuth/Authenticate"))
        .and(body_json(json!({
            "userNameOrEmailAddress": USERNAME,
            "password": PASSWORD
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(access, expire, refresh_expire)))
        .expect(1)
        .mount(server)
        .await;
}

/// Refresh endpoint handing out `access`, expected to be hit `times` times
pub async fn mount_refresh(server: &MockServer, access: &str, expire: i64, times: u64) {
    Mock::given(method("GET"))
        .and(path("/api/TokenAuth/RefreshToken"))
        .and(query_param("refreshToken", "refresh1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "accessToken": access,
                "expireInSeconds": expire
            }
        })))
        .expect(times)
        .mount(server)
        .await;
}

pub fn config_for(server: &MockServer) -> Config {
    Config::from_toml_str(&format!(
        "[defaults]\nserver = \"{}\"\ncluster = \"Hou1\"\ntenant = \"denvr\"\nretries = 3\n",
        server.uri()
    ))
    .expect("valid test config")
}

pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Utc::now()))
}

pub async fn login(server: &MockServer, clock: Arc<ManualClock>) -> Auth {
    let url = parse_server(&server.uri()).expect("mock server url");
    Auth::authenticate_with_clock(reqwest::Client::new(), url, USERNAME, PASSWORD, clock)
        .await
        .expect("login should succeed")
}

/// Logged-in session with a near-zero backoff so retry tests stay fast
pub async fn session(server: &MockServer, clock: Arc<ManualClock>) -> Session {
    mount_login(server, "access1", 60, 3600).await;
    let auth = login(server, clock).await;
    Session::with_client(config_for(server), auth, reqwest::Client::new())
        .expect("session")
        .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(1)))
}
