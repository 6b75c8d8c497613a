//! Platform service for WASM32 (web) targets, based on the browser `fetch` API.

use async_trait::async_trait;
use bytes::Bytes;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, FormData, Request, RequestInit, RequestMode, Response, WorkerGlobalScope,
};

use crate::error::HazardMapError;
use crate::platform::{HttpResponse, PlatformService};
use crate::upload::{UploadRequest, DATASET_TYPE_FIELD, SHAPEFILE_FIELD};

/// Platform service for Web target.
#[derive(Debug, Default, Clone)]
pub struct WebPlatformService {}

impl WebPlatformService {
    /// Creates a new service.
    pub fn new() -> Self {
        Self {}
    }

    async fn fetch(&self, request: &Request) -> Result<HttpResponse, HazardMapError> {
        let resp_value = if let Some(window) = web_sys::window() {
            JsFuture::from(window.fetch_with_request(request)).await?
        } else if let Ok(global) = js_sys::global().dyn_into::<WorkerGlobalScope>() {
            JsFuture::from(global.fetch_with_request(request)).await?
        } else {
            return Err(HazardMapError::Wasm(Some(
                "Global object is not available".into(),
            )));
        };

        let resp: Response = resp_value.dyn_into()?;
        let bytes_val = JsFuture::from(resp.array_buffer()?).await?;
        let array = Uint8Array::new(&bytes_val);

        Ok(HttpResponse {
            status: resp.status(),
            body: array.to_vec().into(),
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PlatformService for WebPlatformService {
    async fn load_bytes_from_url(&self, url: &str) -> Result<Bytes, HazardMapError> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(url, &opts)?;
        request.headers().set("Accept", "application/geo+json, application/json")?;

        let response = self.fetch(&request).await?;
        if !response.is_success() {
            log::debug!("GET {url} failed with status {}", response.status);
            return Err(HazardMapError::Status {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response.body)
    }

    async fn post_multipart(
        &self,
        url: &str,
        request: &UploadRequest,
    ) -> Result<HttpResponse, HazardMapError> {
        let data = Uint8Array::from(&request.file.data[..]);
        let blob = Blob::new_with_u8_array_sequence(&Array::of1(&data))?;

        let form = FormData::new()?;
        form.append_with_blob_and_filename(SHAPEFILE_FIELD, &blob, &request.file.name)?;
        form.append_with_str(DATASET_TYPE_FIELD, request.dataset_type.as_str())?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&form);

        let request = Request::new_with_str_and_init(url, &opts)?;
        let response = self.fetch(&request).await?;
        log::debug!("POST {url} finished with status {}", response.status);

        Ok(response)
    }
}
