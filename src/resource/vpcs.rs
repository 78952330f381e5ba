//! VPC networking

use super::registry::{VPCS_CREATE_VPC, VPCS_DESTROY_VPC, VPCS_GET_VPC, VPCS_GET_VPCS};
use crate::api::request::params;
use crate::api::session::Session;
use crate::error::Result;
use serde_json::Value;

pub struct Vpcs<'a> {
    session: &'a Session,
}

impl<'a> Vpcs<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Get a list of VPCs
    pub async fn get_vpcs(&self, cluster: Option<&str>) -> Result<Value> {
        let config = self.session.config();
        let params = params([("Cluster", config.resolve("cluster", cluster))]);
        self.session.call(&VPCS_GET_VPCS, params).await
    }

    /// Get detailed information about a specific VPC
    pub async fn get_vpc(&self, id: Option<&str>, cluster: Option<&str>) -> Result<Value> {
        let config = self.session.config();
        let params = params([
            ("Id", config.resolve("id", id)),
            ("Cluster", config.resolve("cluster", cluster)),
        ]);
        self.session.call(&VPCS_GET_VPC, params).await
    }

    /// Create a new VPC
    pub async fn create_vpc(&self, id: Option<&str>, cluster: Option<&str>) -> Result<Value> {
        let config = self.session.config();
        let params = params([
            ("id", config.resolve("id", id)),
            ("cluster", config.resolve("cluster", cluster)),
        ]);
        self.session.call(&VPCS_CREATE_VPC, params).await
    }

    /// Destroy a VPC
    pub async fn destroy_vpc(&self, id: Option<&str>, cluster: Option<&str>) -> Result<Value> {
        let config = self.session.config();
        let params = params([
            ("Id", config.resolve("id", id)),
            ("Cluster", config.resolve("cluster", cluster)),
        ]);
        self.session.call(&VPCS_DESTROY_VPC, params).await
    }
}
