//! Denvr API interaction module
//!
//! This module provides the core functionality for talking to the Denvr Cloud
//! API: authentication, parameter validation and the retrying request pipeline.
//!
//! # Module Structure
//!
//! - [`auth`] - Token login and lazy refresh
//! - [`endpoint`] - Per-endpoint verb, path and required fields
//! - [`http`] - HTTP client with retry, URL joining and envelope handling
//! - [`request`] - Request descriptors and null stripping
//! - [`retry`] - Retry policy
//! - [`session`] - Main session combining the pieces above
//! - [`validate`] - Client-side required field checks
//!
//! # Example
//!
//! ```ignore
//! use denvr::{Config, Session};
//!
//! async fn example() -> denvr::Result<()> {
//!     let (config, credentials) = Config::load(None)?;
//!     let session = Session::connect(config, &credentials).await?;
//!     let clusters = session.clusters().get_all().await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod endpoint;
pub mod http;
pub mod request;
pub mod retry;
pub mod session;
pub mod validate;
