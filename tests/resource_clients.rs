//! Integration tests for the typed resource clients
//!
//! Checks that arguments resolve against configured defaults, land in the
//! right parameter group under their wire names, and that missing required
//! fields never reach the network.

mod common;

use common::*;
use denvr::resource::servers::virtual_servers::CreateServer;
use denvr::{params, Error};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The configured cluster fills in an omitted argument
#[tokio::test]
async fn test_config_default_fills_cluster() {
    let server = MockServer::start().await;
    let session = session(&server, manual_clock()).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vpcs/GetVpcs"))
        .and(query_param("Cluster", "Hou1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"items": []}})))
        .expect(1)
        .mount(&server)
        .await;

    let result = session.vpcs().get_vpcs(None).await.unwrap();
    assert_eq!(result, json!({"items": []}));
}

/// An explicit argument overrides the configured default
#[tokio::test]
async fn test_explicit_argument_wins() {
    let server = MockServer::start().await;
    let session = session(&server, manual_clock()).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/servers/metal/GetHost"))
        .and(query_param("Id", "host-7"))
        .and(query_param("Cluster", "Msc1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"id": "host-7"}})))
        .expect(1)
        .mount(&server)
        .await;

    let host = session.metal().get_host(Some("host-7"), Some("Msc1")).await.unwrap();
    assert_eq!(host["id"], "host-7");
}

/// A required field with no value and no default fails before sending
#[tokio::test]
async fn test_missing_required_field_sends_nothing() {
    let server = MockServer::start().await;
    let session = session(&server, manual_clock()).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/servers/virtual/GetServer"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = session
        .virtual_servers()
        .get_server(None, Some("denvr"), None)
        .await
        .unwrap_err();

    match err {
        Error::MissingRequiredField { field, method, path } => {
            assert_eq!(field, "Id");
            assert_eq!(method, "GET");
            assert_eq!(path, "/api/v1/servers/virtual/GetServer");
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Optional fields without a value are dropped from the query
#[tokio::test]
async fn test_optional_fields_dropped() {
    let server = MockServer::start().await;
    let session = session(&server, manual_clock()).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/servers/virtual/GetAvailability"))
        .and(query_param("cluster", "Hou1"))
        .and(query_param_is_missing("resourcePool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
        .expect(1)
        .mount(&server)
        .await;

    session.virtual_servers().get_availability(None, None).await.unwrap();
}

/// create_server sends camelCase body fields merged with defaults
#[tokio::test]
async fn test_create_server_body() {
    let server = MockServer::start().await;
    let session = session(&server, manual_clock()).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/servers/virtual/CreateServer"))
        .and(body_json(json!({
            "rpool": "on-demand",
            "vpc": "denvr-vpc",
            "configuration": "A100_40GB_PCIe_1x",
            "cluster": "Hou1",
            "ssh_keys": ["ssh-ed25519 AAAA alice"],
            "operatingSystemImage": "Ubuntu 22.04.4 LTS",
            "persistStorage": false,
            "rootDiskSize": 500
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"id": "vm-1", "status": "PENDING"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let args = CreateServer {
        vpc: Some("denvr-vpc".into()),
        configuration: Some("A100_40GB_PCIe_1x".into()),
        ssh_keys: Some(vec!["ssh-ed25519 AAAA alice".into()]),
        operating_system_image: Some("Ubuntu 22.04.4 LTS".into()),
        persist_storage: Some(false),
        root_disk_size: Some(500),
        ..Default::default()
    };

    let created = session.virtual_servers().create_server(&args).await.unwrap();
    assert_eq!(created["id"], "vm-1");
}

/// create_server without ssh keys is rejected locally
#[tokio::test]
async fn test_create_server_requires_ssh_keys() {
    let server = MockServer::start().await;
    let session = session(&server, manual_clock()).await;

    let args = CreateServer {
        vpc: Some("denvr-vpc".into()),
        configuration: Some("A100_40GB_PCIe_1x".into()),
        ..Default::default()
    };

    let err = session.virtual_servers().create_server(&args).await.unwrap_err();
    assert!(matches!(err, Error::MissingRequiredField { ref field, .. } if field == "ssh_keys"));
    // Only the login request reached the server
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

/// Endpoints with no parameters send an empty query
#[tokio::test]
async fn test_parameterless_endpoint() {
    let server = MockServer::start().await;
    let session = session(&server, manual_clock()).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/servers/images/GetOperatingSystemImages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{"name": "Ubuntu 22.04.4 LTS"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let images = session.images().get_operating_system_images().await.unwrap();
    assert_eq!(images[0]["name"], "Ubuntu 22.04.4 LTS");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.last().unwrap().url.query(), None);
}

/// Bare metal actions post their identifiers in the body
#[tokio::test]
async fn test_metal_reboot_host() {
    let server = MockServer::start().await;
    let session = session(&server, manual_clock()).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/servers/metal/RebootHost"))
        .and(body_json(json!({"id": "host-7", "cluster": "Hou1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"status": "REBOOTING"}})))
        .expect(1)
        .mount(&server)
        .await;

    let result = session.metal().reboot_host(Some("host-7"), None).await.unwrap();
    assert_eq!(result["status"], "REBOOTING");
}

mod application_tests {
    use super::*;

    /// Details are looked up by Id and the configured cluster
    #[tokio::test]
    async fn test_get_application_details() {
        let server = MockServer::start().await;
        let session = session(&server, manual_clock()).await;

        Mock::given(method("GET"))
            .and(path("/api/v1/servers/applications/GetApplicationDetails"))
            .and(query_param("Id", "my-jupyter-application"))
            .and(query_param("Cluster", "Hou1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"instance_details": {"id": "my-jupyter-application"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let details = session
            .applications()
            .get_application_details(Some("my-jupyter-application"), None)
            .await
            .unwrap();
        assert_eq!(details["instance_details"]["id"], "my-jupyter-application");
    }

    /// Start posts id and cluster in the body
    #[tokio::test]
    async fn test_start_application() {
        let server = MockServer::start().await;
        let session = session(&server, manual_clock()).await;

        Mock::given(method("POST"))
            .and(path("/api/v1/servers/applications/StartApplication"))
            .and(body_json(json!({"id": "my-jupyter-application", "cluster": "Msc1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"id": "my-jupyter-application", "cluster": "Msc1"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = session
            .applications()
            .start_application(Some("my-jupyter-application"), Some("Msc1"))
            .await
            .unwrap();
        assert_eq!(result["cluster"], "Msc1");
    }

    /// Availability needs a resource pool; none is configured, so nothing is sent
    #[tokio::test]
    async fn test_availability_requires_resource_pool() {
        let server = MockServer::start().await;
        let session = session(&server, manual_clock()).await;

        Mock::given(method("GET"))
            .and(path("/api/v1/servers/applications/GetAvailability"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = session
            .applications()
            .get_availability(None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField { ref field, .. } if field == "resourcePool"));
    }

    /// Destroy sends a DELETE with query identifiers
    #[tokio::test]
    async fn test_destroy_application() {
        let server = MockServer::start().await;
        let session = session(&server, manual_clock()).await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/servers/applications/DestroyApplication"))
            .and(query_param("Id", "my-jupyter-application"))
            .and(query_param("Cluster", "Hou1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"id": "my-jupyter-application"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        session
            .applications()
            .destroy_application(Some("my-jupyter-application"), None)
            .await
            .unwrap();
    }

    /// Catalog listing takes no parameters
    #[tokio::test]
    async fn test_get_application_catalog_items() {
        let server = MockServer::start().await;
        let session = session(&server, manual_clock()).await;

        Mock::given(method("GET"))
            .and(path("/api/v1/servers/applications/GetApplicationCatalogItems"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"items": [{"name": "jupyter-notebook"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let items = session
            .applications()
            .get_application_catalog_items()
            .await
            .unwrap();
        assert_eq!(items["items"][0]["name"], "jupyter-notebook");
    }
}

mod invoke_tests {
    use super::*;
    use denvr::resource::invoke;

    /// A registered key dispatches to its endpoint
    #[tokio::test]
    async fn test_invoke_registered_endpoint() {
        let server = MockServer::start().await;
        let session = session(&server, manual_clock()).await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/vpcs/DestroyVpc"))
            .and(query_param("Id", "denvr-vpc"))
            .and(query_param("Cluster", "Hou1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"id": "denvr-vpc"}})))
            .expect(1)
            .mount(&server)
            .await;

        let result = invoke(
            &session,
            "vpcs/destroy_vpc",
            params([("Id", Some(json!("denvr-vpc"))), ("Cluster", Some(json!("Hou1")))]),
        )
        .await
        .unwrap();
        assert_eq!(result["id"], "denvr-vpc");
    }

    /// Unknown keys are reported without a request
    #[tokio::test]
    async fn test_invoke_unknown_endpoint() {
        let server = MockServer::start().await;
        let session = session(&server, manual_clock()).await;

        let err = invoke(&session, "vpcs/teleport", Default::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("vpcs/teleport")));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }
}
