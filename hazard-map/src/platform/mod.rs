//! Provides platform specific logic and [`PlatformService`] to access it.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::HazardMapError;
use crate::upload::UploadRequest;

/// Response of an HTTP request that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Whether the status is in the `2xx` range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Service providing network access on the current platform.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PlatformService {
    /// Loads a byte array from the given url. A response with a non-OK status is returned as
    /// [`HazardMapError::Status`].
    async fn load_bytes_from_url(&self, url: &str) -> Result<Bytes, HazardMapError>;

    /// Sends the upload as a `multipart/form-data` POST request. Any response received from the server is returned
    /// as is, regardless of its status. An error means the request did not complete.
    async fn post_multipart(
        &self,
        url: &str,
        request: &UploadRequest,
    ) -> Result<HttpResponse, HazardMapError>;
}

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        pub mod web;

        /// Default implementation of the [`PlatformService`] for the current platform.
        pub type PlatformServiceImpl = web::WebPlatformService;
    } else {
        pub mod native;

        /// Default implementation of the [`PlatformService`] for the current platform.
        pub type PlatformServiceImpl = native::NativePlatformService;
    }
}
