//! Client library for the Denvr Cloud API
//!
//! The interesting part lives in [`api`]: a [`Session`] turns a logical call
//! into an authenticated, retried HTTP request and unwraps its result, while
//! [`api::auth::Auth`] logs in and refreshes the bearer token as it expires.
//! The [`resource`] clients are thin parameter builders on top of it.
//!
//! ```ignore
//! use denvr::{Config, Session};
//!
//! #[tokio::main]
//! async fn main() -> denvr::Result<()> {
//!     let (config, credentials) = Config::load(None)?;
//!     let session = Session::connect(config, &credentials).await?;
//!     let servers = session.virtual_servers().get_servers(None).await?;
//!     println!("{servers:#}");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod resource;

/// Version injected at compile time via DENVR_VERSION env var (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("DENVR_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

pub use api::auth::{Auth, Credential};
pub use api::endpoint::Endpoint;
pub use api::request::{params, Method, ParamGroup, Params, Request};
pub use api::retry::RetryPolicy;
pub use api::session::Session;
pub use config::{Config, Credentials};
pub use error::{format_api_error, Error, Result};
