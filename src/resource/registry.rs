//! Endpoint Registry
//!
//! Every API path the client knows about, with the wire fields each one
//! requires. Keys follow `<group>/<method>`, e.g. `servers/virtual/get_server`.

use crate::api::endpoint::Endpoint;

pub const CLUSTERS_GET_ALL: Endpoint = Endpoint::get("/api/v1/clusters/GetAll", &[]);

pub const APPLICATIONS_GET_APPLICATIONS: Endpoint =
    Endpoint::get("/api/v1/servers/applications/GetApplications", &[]);
pub const APPLICATIONS_GET_APPLICATION_DETAILS: Endpoint = Endpoint::get(
    "/api/v1/servers/applications/GetApplicationDetails",
    &["Id", "Cluster"],
);
pub const APPLICATIONS_GET_CONFIGURATIONS: Endpoint =
    Endpoint::get("/api/v1/servers/applications/GetConfigurations", &[]);
pub const APPLICATIONS_GET_AVAILABILITY: Endpoint = Endpoint::get(
    "/api/v1/servers/applications/GetAvailability",
    &["cluster", "resourcePool"],
);
pub const APPLICATIONS_GET_APPLICATION_CATALOG_ITEMS: Endpoint =
    Endpoint::get("/api/v1/servers/applications/GetApplicationCatalogItems", &[]);
pub const APPLICATIONS_START_APPLICATION: Endpoint = Endpoint::post(
    "/api/v1/servers/applications/StartApplication",
    &["id", "cluster"],
);
pub const APPLICATIONS_STOP_APPLICATION: Endpoint = Endpoint::post(
    "/api/v1/servers/applications/StopApplication",
    &["id", "cluster"],
);
pub const APPLICATIONS_DESTROY_APPLICATION: Endpoint = Endpoint::delete(
    "/api/v1/servers/applications/DestroyApplication",
    &["Id", "Cluster"],
);

pub const IMAGES_GET_OPERATING_SYSTEM_IMAGES: Endpoint =
    Endpoint::get("/api/v1/servers/images/GetOperatingSystemImages", &[]);

pub const METAL_GET_HOSTS: Endpoint = Endpoint::get("/api/v1/servers/metal/GetHosts", &[]);
pub const METAL_GET_HOST: Endpoint =
    Endpoint::get("/api/v1/servers/metal/GetHost", &["Id", "Cluster"]);
pub const METAL_ADD_HOST_VPC: Endpoint =
    Endpoint::post("/api/v1/servers/metal/AddHostVpc", &["id", "cluster", "vpcId"]);
pub const METAL_REMOVE_HOST_VPC: Endpoint =
    Endpoint::post("/api/v1/servers/metal/RemoveHostVpc", &["id", "cluster", "vpcId"]);
pub const METAL_REBOOT_HOST: Endpoint =
    Endpoint::post("/api/v1/servers/metal/RebootHost", &["id", "cluster"]);

pub const VIRTUAL_GET_SERVERS: Endpoint =
    Endpoint::get("/api/v1/servers/virtual/GetServers", &[]);
pub const VIRTUAL_GET_SERVER: Endpoint = Endpoint::get(
    "/api/v1/servers/virtual/GetServer",
    &["Id", "Namespace", "Cluster"],
);
pub const VIRTUAL_CREATE_SERVER: Endpoint = Endpoint::post(
    "/api/v1/servers/virtual/CreateServer",
    &["vpc", "configuration", "cluster", "ssh_keys"],
);
pub const VIRTUAL_START_SERVER: Endpoint = Endpoint::post(
    "/api/v1/servers/virtual/StartServer",
    &["id", "namespace", "cluster"],
);
pub const VIRTUAL_STOP_SERVER: Endpoint = Endpoint::post(
    "/api/v1/servers/virtual/StopServer",
    &["id", "namespace", "cluster"],
);
pub const VIRTUAL_DESTROY_SERVER: Endpoint = Endpoint::delete(
    "/api/v1/servers/virtual/DestroyServer",
    &["Id", "Namespace", "Cluster"],
);
pub const VIRTUAL_GET_CONFIGURATIONS: Endpoint =
    Endpoint::get("/api/v1/servers/virtual/GetConfigurations", &[]);
pub const VIRTUAL_GET_AVAILABILITY: Endpoint =
    Endpoint::get("/api/v1/servers/virtual/GetAvailability", &["cluster"]);

pub const VPCS_GET_VPCS: Endpoint = Endpoint::get("/api/v1/vpcs/GetVpcs", &[]);
pub const VPCS_GET_VPC: Endpoint = Endpoint::get("/api/v1/vpcs/GetVpc", &["Id", "Cluster"]);
pub const VPCS_CREATE_VPC: Endpoint =
    Endpoint::post("/api/v1/vpcs/CreateVpc", &["id", "cluster"]);
pub const VPCS_DESTROY_VPC: Endpoint =
    Endpoint::delete("/api/v1/vpcs/DestroyVpc", &["Id", "Cluster"]);

/// All endpoints by key
pub static ENDPOINTS: &[(&str, Endpoint)] = &[
    ("clusters/get_all", CLUSTERS_GET_ALL),
    ("servers/applications/get_applications", APPLICATIONS_GET_APPLICATIONS),
    ("servers/applications/get_application_details", APPLICATIONS_GET_APPLICATION_DETAILS),
    ("servers/applications/get_configurations", APPLICATIONS_GET_CONFIGURATIONS),
    ("servers/applications/get_availability", APPLICATIONS_GET_AVAILABILITY),
    (
        "servers/applications/get_application_catalog_items",
        APPLICATIONS_GET_APPLICATION_CATALOG_ITEMS,
    ),
    ("servers/applications/start_application", APPLICATIONS_START_APPLICATION),
    ("servers/applications/stop_application", APPLICATIONS_STOP_APPLICATION),
    ("servers/applications/destroy_application", APPLICATIONS_DESTROY_APPLICATION),
    ("servers/images/get_operating_system_images", IMAGES_GET_OPERATING_SYSTEM_IMAGES),
    ("servers/metal/get_hosts", METAL_GET_HOSTS),
    ("servers/metal/get_host", METAL_GET_HOST),
    ("servers/metal/add_host_vpc", METAL_ADD_HOST_VPC),
    ("servers/metal/remove_host_vpc", METAL_REMOVE_HOST_VPC),
    ("servers/metal/reboot_host", METAL_REBOOT_HOST),
    ("servers/virtual/get_servers", VIRTUAL_GET_SERVERS),
    ("servers/virtual/get_server", VIRTUAL_GET_SERVER),
    ("servers/virtual/create_server", VIRTUAL_CREATE_SERVER),
    ("servers/virtual/start_server", VIRTUAL_START_SERVER),
    ("servers/virtual/stop_server", VIRTUAL_STOP_SERVER),
    ("servers/virtual/destroy_server", VIRTUAL_DESTROY_SERVER),
    ("servers/virtual/get_configurations", VIRTUAL_GET_CONFIGURATIONS),
    ("servers/virtual/get_availability", VIRTUAL_GET_AVAILABILITY),
    ("vpcs/get_vpcs", VPCS_GET_VPCS),
    ("vpcs/get_vpc", VPCS_GET_VPC),
    ("vpcs/create_vpc", VPCS_CREATE_VPC),
    ("vpcs/destroy_vpc", VPCS_DESTROY_VPC),
];

/// Get an endpoint by key
pub fn get_endpoint(key: &str) -> Option<&'static Endpoint> {
    ENDPOINTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, endpoint)| endpoint)
}

/// All registered keys
pub fn endpoint_keys() -> Vec<&'static str> {
    ENDPOINTS.iter().map(|(k, _)| *k).collect()
}
