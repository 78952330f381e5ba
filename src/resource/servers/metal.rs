//! Bare metal hosts

use crate::api::request::params;
use crate::api::session::Session;
use crate::error::Result;
use crate::resource::registry::{
    METAL_ADD_HOST_VPC, METAL_GET_HOST, METAL_GET_HOSTS, METAL_REBOOT_HOST, METAL_REMOVE_HOST_VPC,
};
use serde_json::Value;

pub struct Metal<'a> {
    session: &'a Session,
}

impl<'a> Metal<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Get a list of bare metal hosts in a cluster
    pub async fn get_hosts(&self, cluster: Option<&str>) -> Result<Value> {
        let config = self.session.config();
        let params = params([("Cluster", config.resolve("cluster", cluster))]);
        self.session.call(&METAL_GET_HOSTS, params).await
    }

    /// Get detailed information about a bare metal host
    pub async fn get_host(&self, id: Option<&str>, cluster: Option<&str>) -> Result<Value> {
        let config = self.session.config();
        let params = params([
            ("Id", config.resolve("id", id)),
            ("Cluster", config.resolve("cluster", cluster)),
        ]);
        self.session.call(&METAL_GET_HOST, params).await
    }

    /// Attach a bare metal host to a VPC
    pub async fn add_host_vpc(
        &self,
        id: Option<&str>,
        cluster: Option<&str>,
        vpc_id: Option<&str>,
    ) -> Result<Value> {
        let config = self.session.config();
        let params = params([
            ("id", config.resolve("id", id)),
            ("cluster", config.resolve("cluster", cluster)),
            ("vpcId", config.resolve("vpc_id", vpc_id)),
        ]);
        self.session.call(&METAL_ADD_HOST_VPC, params).await
    }

    /// Detach a bare metal host from a VPC
    pub async fn remove_host_vpc(
        &self,
        id: Option<&str>,
        cluster: Option<&str>,
        vpc_id: Option<&str>,
    ) -> Result<Value> {
        let config = self.session.config();
        let params = params([
            ("id", config.resolve("id", id)),
            ("cluster", config.resolve("cluster", cluster)),
            ("vpcId", config.resolve("vpc_id", vpc_id)),
        ]);
        self.session.call(&METAL_REMOVE_HOST_VPC, params).await
    }

    /// Reboot a bare metal host
    pub async fn reboot_host(&self, id: Option<&str>, cluster: Option<&str>) -> Result<Value> {
        let config = self.session.config();
        let params = params([
            ("id", config.resolve("id", id)),
            ("cluster", config.resolve("cluster", cluster)),
        ]);
        self.session.call(&METAL_REBOOT_HOST, params).await
    }
}
