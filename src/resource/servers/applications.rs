//! Applications
//!
//! Catalog-based workloads (e.g. a Jupyter notebook) addressed by their
//! application name and cluster.

use crate::api::request::{params, Params};
use crate::api::session::Session;
use crate::error::Result;
use crate::resource::registry::{
    APPLICATIONS_DESTROY_APPLICATION, APPLICATIONS_GET_APPLICATIONS,
    APPLICATIONS_GET_APPLICATION_CATALOG_ITEMS, APPLICATIONS_GET_APPLICATION_DETAILS,
    APPLICATIONS_GET_AVAILABILITY, APPLICATIONS_GET_CONFIGURATIONS,
    APPLICATIONS_START_APPLICATION, APPLICATIONS_STOP_APPLICATION,
};
use serde_json::Value;

pub struct Applications<'a> {
    session: &'a Session,
}

impl<'a> Applications<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    fn application_ref(&self, id: Option<&str>, cluster: Option<&str>, names: [&str; 2]) -> Params {
        let config = self.session.config();
        params([
            (names[0], config.resolve("id", id)),
            (names[1], config.resolve("cluster", cluster)),
        ])
    }

    /// Get a list of applications
    pub async fn get_applications(&self) -> Result<Value> {
        self.session
            .call(&APPLICATIONS_GET_APPLICATIONS, Params::new())
            .await
    }

    /// Get detailed information about a specific application
    pub async fn get_application_details(
        &self,
        id: Option<&str>,
        cluster: Option<&str>,
    ) -> Result<Value> {
        let params = self.application_ref(id, cluster, ["Id", "Cluster"]);
        self.session
            .call(&APPLICATIONS_GET_APPLICATION_DETAILS, params)
            .await
    }

    /// Get the list of application configurations
    pub async fn get_configurations(&self) -> Result<Value> {
        self.session
            .call(&APPLICATIONS_GET_CONFIGURATIONS, Params::new())
            .await
    }

    /// Get the configurations currently available for applications
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
        self.session.call(&APPLICATIONS_GET_AVAILABILITY, params).await
    }

    /// Get the application catalog
    pub async fn get_application_catalog_items(&self) -> Result<Value> {
        self.session
            .call(&APPLICATIONS_GET_APPLICATION_CATALOG_ITEMS, Params::new())
            .await
    }

    /// Start a provisioned application that is currently OFFLINE
    pub async fn start_application(&self, id: Option<&str>, cluster: Option<&str>) -> Result<Value> {
        let params = self.application_ref(id, cluster, ["id", "cluster"]);
        self.session
            .call(&APPLICATIONS_START_APPLICATION, params)
            .await
    }

    /// Stop a running application
    pub async fn stop_application(&self, id: Option<&str>, cluster: Option<&str>) -> Result<Value> {
        let params = self.application_ref(id, cluster, ["id", "cluster"]);
        self.session
            .call(&APPLICATIONS_STOP_APPLICATION, params)
            .await
    }

    /// Permanently delete an application and its data
    pub async fn destroy_application(
        &self,
        id: Option<&str>,
        cluster: Option<&str>,
    ) -> Result<Value> {
        let params = self.application_ref(id, cluster, ["Id", "Cluster"]);
        self.session
            .call(&APPLICATIONS_DESTROY_APPLICATION, params)
            .await
    }
}
