//! Platform service for native targets, based on `reqwest`.

use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use reqwest::multipart::{Form, Part};

use crate::error::HazardMapError;
use crate::platform::{HttpResponse, PlatformService};
use crate::upload::{UploadRequest, DATASET_TYPE_FIELD, SHAPEFILE_FIELD};

/// Platform service for native targets.
#[derive(Debug, Clone)]
pub struct NativePlatformService {
    http_client: reqwest::Client,
}

impl NativePlatformService {
    /// Creates a new service with its own HTTP client.
    pub fn new() -> Result<Self, HazardMapError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("hazard-map/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http_client })
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PlatformService for NativePlatformService {
    async fn load_bytes_from_url(&self, url: &str) -> Result<Bytes, HazardMapError> {
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            debug!("GET {url} failed with status {status}");
            return Err(HazardMapError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Loaded {} bytes from {url}", body.len());
        Ok(body)
    }

    async fn post_multipart(
        &self,
        url: &str,
        request: &UploadRequest,
    ) -> Result<HttpResponse, HazardMapError> {
        let file = Part::stream(request.file.data.clone()).file_name(request.file.name.clone());
        let form = Form::new()
            .part(SHAPEFILE_FIELD, file)
            .text(DATASET_TYPE_FIELD, request.dataset_type.as_str());

        let response = self.http_client.post(url).multipart(form).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!("POST {url} finished with status {status}");
        Ok(HttpResponse { status, body })
    }
}
