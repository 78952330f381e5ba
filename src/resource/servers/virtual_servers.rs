//! Virtual machines
//!
//! A virtual machine is addressed by its id, the namespace it lives in
//! (usually the tenant name) and its cluster.

use crate::api::request::{params, Params};
use crate::api::session::Session;
use crate::error::Result;
use crate::resource::registry::{
    VIRTUAL_CREATE_SERVER, VIRTUAL_DESTROY_SERVER, VIRTUAL_GET_AVAILABILITY,
    VIRTUAL_GET_CONFIGURATIONS, VIRTUAL_GET_SERVER, VIRTUAL_GET_SERVERS, VIRTUAL_START_SERVER,
    VIRTUAL_STOP_SERVER,
};
use serde_json::Value;

/// Arguments for [`VirtualServers::create_server`].
/// Unset fields fall back to the configured defaults or are left out.
#[derive(Debug, Clone, Default)]
pub struct CreateServer {
    /// Generated by the API when absent
    pub name: Option<String>,
    pub rpool: Option<String>,
    pub vpc: Option<String>,
    /// Configuration name from `get_configurations`, e.g. `A100_40GB_PCIe_1x`
    pub configuration: Option<String>,
    pub cluster: Option<String>,
    pub ssh_keys: Option<Vec<String>>,
    pub operating_system_image: Option<String>,
    pub personal_storage_mount_path: Option<String>,
    pub tenant_shared_additional_storage: Option<String>,
    /// Persistent rather than ephemeral direct attached storage
    pub persist_storage: Option<bool>,
    pub direct_storage_mount_path: Option<String>,
    /// Root disk size in GiB
    pub root_disk_size: Option<u64>,
}

pub struct VirtualServers<'a> {
    session: &'a Session,
}

impl<'a> VirtualServers<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    fn server_ref(
        &self,
        id: Option<&str>,
        namespace: Option<&str>,
        cluster: Option<&str>,
        names: [&str; 3],
    ) -> Params {
        let config = self.session.config();
        params([
            (names[0], config.resolve("id", id)),
            (names[1], config.resolve("namespace", namespace)),
            (names[2], config.resolve("cluster", cluster)),
        ])
    }

    /// Get a list of virtual machines
    pub async fn get_servers(&self, cluster: Option<&str>) -> Result<Value> {
        let config = self.session.config();
        let params = params([("Cluster", config.resolve("cluster", cluster))]);
        self.session.call(&VIRTUAL_GET_SERVERS, params).await
    }

    /// Get detailed information about a specific virtual machine
    pub async fn get_server(
        &self,
        id: Option<&str>,
        namespace: Option<&str>,
        cluster: Option<&str>,
    ) -> Result<Value> {
        let params = self.server_ref(id, namespace, cluster, ["Id", "Namespace", "Cluster"]);
        self.session.call(&VIRTUAL_GET_SERVER, params).await
    }

    /// Create a new virtual machine using a pre-defined configuration
    pub async fn create_server(&self, args: &CreateServer) -> Result<Value> {
        let config = self.session.config();
        let params = params([
            ("name", config.resolve("name", args.name.clone())),
            ("rpool", config.resolve("rpool", args.rpool.clone())),
            ("vpc", config.resolve("vpc", args.vpc.clone())),
            ("configuration", config.resolve("configuration", args.configuration.clone())),
            ("cluster", config.resolve("cluster", args.cluster.clone())),
            ("ssh_keys", config.resolve("ssh_keys", args.ssh_keys.clone())),
            (
                "operatingSystemImage",
                config.resolve("operating_system_image", args.operating_system_image.clone()),
            ),
            (
                "personalStorageMountPath",
                config.resolve(
                    "personal_storage_mount_path",
                    args.personal_storage_mount_path.clone(),
                ),
            ),
            (
                "tenantSharedAdditionalStorage",
                config.resolve(
                    "tenant_shared_additional_storage",
                    args.tenant_shared_additional_storage.clone(),
                ),
            ),
            ("persistStorage", config.resolve("persist_storage", args.persist_storage)),
            (
                "directStorageMountPath",
                config.resolve("direct_storage_mount_path", args.direct_storage_mount_path.clone()),
            ),
            ("rootDiskSize", config.resolve("root_disk_size", args.root_disk_size)),
        ]);
        self.session.call(&VIRTUAL_CREATE_SERVER, params).await
    }

    /// Start a provisioned virtual machine that is currently OFFLINE
    pub async fn start_server(
        &self,
        id: Option<&str>,
        namespace: Option<&str>,
        cluster: Option<&str>,
    ) -> Result<Value> {
        let params = self.server_ref(id, namespace, cluster, ["id", "namespace", "cluster"]);
        self.session.call(&VIRTUAL_START_SERVER, params).await
    }

    /// Stop a running virtual machine
    pub async fn stop_server(
        &self,
        id: Option<&str>,
        namespace: Option<&str>,
        cluster: Option<&str>,
    ) -> Result<Value> {
        let params = self.server_ref(id, namespace, cluster, ["id", "namespace", "cluster"]);
        self.session.call(&VIRTUAL_STOP_SERVER, params).await
    }

    /// Permanently delete a virtual machine and its data
    pub async fn destroy_server(
        &self,
        id: Option<&str>,
        namespace: Option<&str>,
        cluster: Option<&str>,
    ) -> Result<Value> {
        let params = self.server_ref(id, namespace, cluster, ["Id", "Namespace", "Cluster"]);
        self.session.call(&VIRTUAL_DESTROY_SERVER, params).await
    }

    /// Get the list of virtual machine configurations
    pub async fn get_configurations(&self) -> Result<Value> {
        self.session
            .call(&VIRTUAL_GET_CONFIGURATIONS, Params::new())
            .await
    }

    /// Get the current availability of each configuration
    pub async fn get_availability(
        &self,
        cluster: Option<&str>,
        resource_pool: Option<&str>,
    ) -> Result<Value> {
        let config = self.session.config();
        let params = params([
            ("cluster", config.resolve("cluster", cluster)),
            ("resourcePool", config.resolve("resource_pool", resource_pool)),
        ]);
        self.session.call(&VIRTUAL_GET_AVAILABILITY, params).await
    }
}
