//! Clusters

use super::registry::CLUSTERS_GET_ALL;
use crate::api::request::Params;
use crate::api::session::Session;
use crate::error::Result;
use serde_json::Value;

pub struct Clusters<'a> {
    session: &'a Session,
}

impl<'a> Clusters<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Get a list of allocated clusters
    pub async fn get_all(&self) -> Result<Value> {
        self.session.call(&CLUSTERS_GET_ALL, Params::new()).await
    }
}
