//! Resource clients
//!
//! Thin per-group wrappers over [`Session::call`]. Each method resolves its
//! arguments against the configured defaults, then hands the parameters to the
//! request pipeline.
//!
//! # Architecture
//!
//! - [`registry`] - Endpoint definitions keyed by `<group>/<method>`
//! - [`clusters`], [`images`], [`vpcs`] - Top level resource groups
//! - [`servers`] - Applications, virtual machines and bare metal hosts
//!
//! # Example
//!
//! ```ignore
//! async fn list_vms(session: &denvr::Session) -> denvr::Result<serde_json::Value> {
//!     session.virtual_servers().get_servers(Some("Hou1")).await
//! }
//! ```

pub mod clusters;
pub mod images;
pub mod registry;
pub mod servers;
pub mod vpcs;

use crate::api::request::Params;
use crate::api::session::Session;
use crate::error::{Error, Result};
use serde_json::Value;

pub use registry::{endpoint_keys, get_endpoint};

impl Session {
    pub fn applications(&self) -> servers::applications::Applications<'_> {
        servers::applications::Applications::new(self)
    }

    pub fn clusters(&self) -> clusters::Clusters<'_> {
        clusters::Clusters::new(self)
    }

    pub fn images(&self) -> images::Images<'_> {
        images::Images::new(self)
    }

    pub fn vpcs(&self) -> vpcs::Vpcs<'_> {
        vpcs::Vpcs::new(self)
    }

    pub fn virtual_servers(&self) -> servers::virtual_servers::VirtualServers<'_> {
        servers::virtual_servers::VirtualServers::new(self)
    }

    pub fn metal(&self) -> servers::metal::Metal<'_> {
        servers::metal::Metal::new(self)
    }
}

/// Call a registered endpoint by key with pre-built wire parameters
pub async fn invoke(session: &Session, key: &str, params: Params) -> Result<Value> {
    tracing::debug!("invoke: endpoint={}", key);

    let Some(endpoint) = get_endpoint(key) else {
        return Err(Error::Config(format!("Unknown endpoint: {}", key)));
    };

    session.call(endpoint, params).await
}
