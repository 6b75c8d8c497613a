//! Dataset upload: form validation, the upload state machine and result parsing.

use bytes::Bytes;
use serde::Deserialize;

use crate::error::HazardMapError;
use crate::hazard::HazardKind;
use crate::platform::{HttpResponse, PlatformService};

/// Name of the multipart field with the shapefile archive.
pub const SHAPEFILE_FIELD: &str = "shapefile";
/// Name of the multipart field with the dataset type.
pub const DATASET_TYPE_FIELD: &str = "dataset_type";

const NETWORK_ERROR_MESSAGE: &str = "Upload failed: the server could not be reached.";

/// A file selected by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name, including extension.
    pub name: String,
    /// File contents.
    pub data: Bytes,
}

impl SelectedFile {
    /// Creates a new file.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Values of the upload form at the moment of submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    /// Selected file, if any.
    pub file: Option<SelectedFile>,
    /// Selected dataset type, as given by the form control. Empty string means nothing is selected.
    pub dataset_type: Option<String>,
}

impl UploadForm {
    /// Checks the form and converts it into a request.
    pub fn validate(self) -> Result<UploadRequest, HazardMapError> {
        let Some(file) = self.file else {
            return Err(HazardMapError::Validation(
                "Please select a shapefile to upload.".into(),
            ));
        };

        let dataset_type = match self.dataset_type.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => value.parse::<HazardKind>()?,
            _ => {
                return Err(HazardMapError::Validation(
                    "Please select a dataset type.".into(),
                ))
            }
        };

        if !file.name.to_ascii_lowercase().ends_with(".zip") {
            return Err(HazardMapError::Validation(
                "Please select a zipped shapefile (.zip).".into(),
            ));
        }

        Ok(UploadRequest { file, dataset_type })
    }
}

/// A validated upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Shapefile archive.
    pub file: SelectedFile,
    /// Kind of the hazard data in the archive.
    pub dataset_type: HazardKind,
}

/// State of the upload panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadState {
    /// The form is shown.
    #[default]
    Idle,
    /// The request is in flight. The form is hidden and the submit control is disabled.
    InProgress,
    /// The server accepted the dataset.
    Succeeded(String),
    /// The upload failed. The message is shown to the user.
    Failed(String),
}

impl UploadState {
    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        matches!(self, UploadState::Idle)
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    records_created: u64,
}

/// Upload state machine: `Idle -> InProgress -> Succeeded | Failed -> Idle`.
#[derive(Debug, Clone, Default)]
pub struct UploadFlow {
    state: UploadState,
}

impl UploadFlow {
    /// Current state.
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Validates the form and moves to [`UploadState::InProgress`].
    ///
    /// Fails without changing the state if the form is invalid or the flow is not idle: an upload is in flight, or
    /// the result of the previous one has not been dismissed yet.
    pub fn begin(&mut self, form: UploadForm) -> Result<UploadRequest, HazardMapError> {
        match self.state {
            UploadState::Idle => {}
            UploadState::InProgress => return Err(HazardMapError::UploadInProgress),
            UploadState::Succeeded(_) | UploadState::Failed(_) => {
                return Err(HazardMapError::UploadNotDismissed)
            }
        }

        let request = form.validate()?;
        self.state = UploadState::InProgress;
        Ok(request)
    }

    /// Records the result of the request. Returns `true` if the upload succeeded.
    ///
    /// A result that arrives when no upload is in flight is ignored.
    pub fn finish(&mut self, result: Result<HttpResponse, HazardMapError>) -> bool {
        if self.state != UploadState::InProgress {
            log::warn!("Upload result received while no upload is in progress");
            return false;
        }

        self.state = match result {
            Ok(response) => parse_response(&response),
            Err(err) => {
                log::warn!("Upload request failed: {err}");
                UploadState::Failed(NETWORK_ERROR_MESSAGE.into())
            }
        };

        matches!(self.state, UploadState::Succeeded(_))
    }

    /// Returns to [`UploadState::Idle`] after a finished upload. Does nothing while the upload is in flight.
    pub fn dismiss(&mut self) {
        if self.state != UploadState::InProgress {
            self.state = UploadState::Idle;
        }
    }
}

fn parse_response(response: &HttpResponse) -> UploadState {
    if response.is_success() {
        return match serde_json::from_slice::<UploadResponse>(&response.body) {
            Ok(parsed) => {
                log::info!("Upload processed {} records", parsed.records_created);
                UploadState::Succeeded(format!(
                    "Successfully processed {} records",
                    parsed.records_created
                ))
            }
            Err(err) => {
                log::warn!("Unexpected upload response: {err}");
                UploadState::Failed(format!("Upload failed: unexpected server response ({err})"))
            }
        };
    }

    let error = HazardMapError::Status {
        status: response.status,
        body: response.body.clone(),
    };
    let message = error
        .server_message()
        .unwrap_or_else(|| format!("Upload failed with status {}", response.status));
    log::warn!("Upload rejected by the server: {message}");
    UploadState::Failed(message)
}

/// An upload that passed validation and waits to be sent.
///
/// The request is sent separately from the state change so that the application state is not borrowed while the
/// request is in flight.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    url: String,
    request: UploadRequest,
}

impl PendingUpload {
    pub(crate) fn new(url: String, request: UploadRequest) -> Self {
        Self { url, request }
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends the request. The result should be given to the application's `on_upload_finished`.
    pub async fn send<P: PlatformService>(
        &self,
        platform: &P,
    ) -> Result<HttpResponse, HazardMapError> {
        log::info!(
            "Uploading {} ({} bytes) as {} data",
            self.request.file.name,
            self.request.file.data.len(),
            self.request.dataset_type
        );
        platform.post_multipart(&self.url, &self.request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid_form() -> UploadForm {
        UploadForm {
            file: Some(SelectedFile::new("flood.zip", vec![1u8, 2, 3])),
            dataset_type: Some("flood".into()),
        }
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: Bytes::copy_from_slice(body.as_bytes()),
        }
    }

    #[test]
    fn missing_file_is_rejected() {
        let form = UploadForm {
            file: None,
            ..valid_form()
        };
        assert_matches!(form.validate(), Err(HazardMapError::Validation(msg)) => {
            assert_eq!(msg, "Please select a shapefile to upload.");
        });
    }

    #[test]
    fn missing_dataset_type_is_rejected() {
        for dataset_type in [None, Some(String::new()), Some("  ".into())] {
            let form = UploadForm {
                dataset_type,
                ..valid_form()
            };
            assert_matches!(form.validate(), Err(HazardMapError::Validation(msg)) => {
                assert_eq!(msg, "Please select a dataset type.");
            });
        }
    }

    #[test]
    fn unknown_dataset_type_is_rejected() {
        let form = UploadForm {
            dataset_type: Some("earthquake".into()),
            ..valid_form()
        };
        assert_matches!(form.validate(), Err(HazardMapError::Validation(msg)) => {
            assert!(msg.contains("earthquake"));
        });
    }

    #[test]
    fn non_zip_file_is_rejected() {
        let form = UploadForm {
            file: Some(SelectedFile::new("flood.shp", vec![0u8])),
            ..valid_form()
        };
        assert_matches!(form.validate(), Err(HazardMapError::Validation(_)));

        let form = UploadForm {
            file: Some(SelectedFile::new("FLOOD.ZIP", vec![0u8])),
            ..valid_form()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn second_submission_is_rejected() {
        let mut flow = UploadFlow::default();
        let request = flow.begin(valid_form()).expect("valid form");
        assert_eq!(request.dataset_type, HazardKind::Flood);
        assert_eq!(flow.state(), &UploadState::InProgress);
        assert!(!flow.state().can_submit());

        assert_matches!(
            flow.begin(valid_form()),
            Err(HazardMapError::UploadInProgress)
        );
        assert_eq!(flow.state(), &UploadState::InProgress);
    }

    #[test]
    fn invalid_form_keeps_idle() {
        let mut flow = UploadFlow::default();
        assert!(flow.begin(UploadForm::default()).is_err());
        assert_eq!(flow.state(), &UploadState::Idle);
    }

    #[test]
    fn success_reports_record_count() {
        let mut flow = UploadFlow::default();
        flow.begin(valid_form()).expect("valid form");

        let succeeded = flow.finish(Ok(response(
            200,
            r#"{"success": true, "dataset_id": 3, "records_created": 42}"#,
        )));

        assert!(succeeded);
        assert_matches!(flow.state(), UploadState::Succeeded(msg) => {
            assert_eq!(msg, "Successfully processed 42 records");
        });
    }

    #[test]
    fn server_error_message_is_shown() {
        let mut flow = UploadFlow::default();
        flow.begin(valid_form()).expect("valid form");

        let succeeded = flow.finish(Ok(response(500, r#"{"error": "bad format"}"#)));

        assert!(!succeeded);
        assert_matches!(flow.state(), UploadState::Failed(msg) => {
            assert!(msg.contains("bad format"));
        });
    }

    #[test]
    fn non_json_error_uses_status() {
        let mut flow = UploadFlow::default();
        flow.begin(valid_form()).expect("valid form");
        flow.finish(Ok(response(502, "<html>Bad gateway</html>")));

        assert_matches!(flow.state(), UploadState::Failed(msg) => {
            assert!(msg.contains("502"));
        });
    }

    #[test]
    fn network_error_is_shown() {
        let mut flow = UploadFlow::default();
        flow.begin(valid_form()).expect("valid form");
        flow.finish(Err(HazardMapError::IO));

        assert_eq!(
            flow.state(),
            &UploadState::Failed(NETWORK_ERROR_MESSAGE.into())
        );
    }

    #[test]
    fn dismiss_returns_to_idle() {
        let mut flow = UploadFlow::default();
        flow.begin(valid_form()).expect("valid form");
        flow.dismiss();
        assert_eq!(flow.state(), &UploadState::InProgress);

        flow.finish(Ok(response(400, r#"{"error": "No shapefile provided"}"#)));
        flow.dismiss();
        assert_eq!(flow.state(), &UploadState::Idle);
        assert!(flow.begin(valid_form()).is_ok());
    }

    #[test]
    fn finished_upload_must_be_dismissed_before_next_one() {
        let mut flow = UploadFlow::default();
        flow.begin(valid_form()).expect("valid form");
        assert!(flow.finish(Ok(response(200, r#"{"records_created": 42}"#))));
        assert!(!flow.state().can_submit());

        assert_matches!(
            flow.begin(valid_form()),
            Err(HazardMapError::UploadNotDismissed)
        );
        assert_matches!(flow.state(), UploadState::Succeeded(_));

        flow.dismiss();
        assert!(flow.state().can_submit());
        assert!(flow.begin(valid_form()).is_ok());
        assert_eq!(flow.state(), &UploadState::InProgress);
    }

    #[test]
    fn failed_upload_must_be_dismissed_before_retry() {
        let mut flow = UploadFlow::default();
        flow.begin(valid_form()).expect("valid form");
        flow.finish(Err(HazardMapError::IO));

        assert_matches!(
            flow.begin(valid_form()),
            Err(HazardMapError::UploadNotDismissed)
        );
        assert_matches!(flow.state(), UploadState::Failed(_));
    }

    #[test]
    fn late_result_is_ignored() {
        let mut flow = UploadFlow::default();
        assert!(!flow.finish(Ok(response(200, r#"{"records_created": 1}"#))));
        assert_eq!(flow.state(), &UploadState::Idle);
    }
}
