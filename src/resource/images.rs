//! Operating system images

use super::registry::IMAGES_GET_OPERATING_SYSTEM_IMAGES;
use crate::api::request::Params;
use crate::api::session::Session;
use crate::error::Result;
use serde_json::Value;

pub struct Images<'a> {
    session: &'a Session,
}

impl<'a> Images<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Get the operating system images available for new virtual machines
    pub async fn get_operating_system_images(&self) -> Result<Value> {
        self.session
            .call(&IMAGES_GET_OPERATING_SYSTEM_IMAGES, Params::new())
            .await
    }
}
