use std::sync::mpsc;

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use panel_logging::{panel_debug, panel_warn};

use crate::mime::mime_for_file_name;
use crate::{
    EngineEvent, FailureKind, FilePayload, SubmissionId, SubmissionRequest, SubmitError,
    SummarizeInput, UploadProgress, UploadStage, OVERLOADED_MESSAGE,
};

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    /// Base URL of the analysis API, e.g. `http://localhost:8000/api/v1`.
    pub api_base: String,
}

impl SubmitSettings {
    pub fn new(api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { api_base }
    }

    fn endpoint_url(&self, request: &SubmissionRequest) -> String {
        format!("{}{}", self.api_base, request.endpoint_path())
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(
        &self,
        submission_id: SubmissionId,
        request: &SubmissionRequest,
        sink: &dyn ProgressSink,
    ) -> Result<Value, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    settings: SubmitSettings,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Self {
        Self { settings }
    }

    // No timeout or redirect policy on top of the transport defaults.
    fn build_client(&self, request: &SubmissionRequest) -> Result<reqwest::Client, SubmitError> {
        reqwest::Client::builder().build().map_err(|err| {
            panel_warn!("Failed to build HTTP client: {err}");
            SubmitError::new(FailureKind::Network, request.generic_failure_message())
        })
    }

    async fn build_form(&self, request: &SubmissionRequest) -> Result<Form, SubmitError> {
        let form = match request {
            SubmissionRequest::Summarize(SummarizeInput::Url(url)) => Form::new()
                .text("inputType", "URL")
                .text("url", url.clone()),
            SubmissionRequest::Summarize(SummarizeInput::File(file)) => Form::new()
                .text("inputType", "File")
                .part("file", file_part(request, file).await?),
            SubmissionRequest::AnalyzeImage { image, prompt } => Form::new()
                .part("image", file_part(request, image).await?)
                .text("prompt", prompt.clone()),
            SubmissionRequest::AnalyzeConversation { audio } => {
                Form::new().part("audio", file_part(request, audio).await?)
            }
        };
        Ok(form)
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(
        &self,
        submission_id: SubmissionId,
        request: &SubmissionRequest,
        sink: &dyn ProgressSink,
    ) -> Result<Value, SubmitError> {
        sink.emit(EngineEvent::Progress(UploadProgress {
            submission_id,
            stage: UploadStage::Preparing,
        }));

        let client = self.build_client(request)?;
        let form = self.build_form(request).await?;
        let url = self.settings.endpoint_url(request);
        panel_debug!("Submitting {} to {url}", request.endpoint_path());

        sink.emit(EngineEvent::Progress(UploadProgress {
            submission_id,
            stage: UploadStage::Uploading,
        }));

        let response = client.post(&url).multipart(form).send().await.map_err(|err| {
            panel_warn!("Request to {url} failed: {err}");
            SubmitError::new(FailureKind::Network, request.generic_failure_message())
        })?;

        classify_response(request, response).await
    }
}

async fn file_part(request: &SubmissionRequest, file: &FilePayload) -> Result<Part, SubmitError> {
    let bytes = tokio::fs::read(&file.path).await.map_err(|err| {
        panel_warn!("Failed to read {:?}: {err}", file.path);
        SubmitError::new(
            FailureKind::UnreadableInput,
            format!("Could not read file: {}", file.file_name),
        )
    })?;
    Part::bytes(bytes)
        .file_name(file.file_name.clone())
        .mime_str(mime_for_file_name(&file.file_name))
        .map_err(|err| {
            panel_warn!("Failed to build multipart part for {:?}: {err}", file.path);
            SubmitError::new(FailureKind::Network, request.generic_failure_message())
        })
}

/// 2xx bodies are decoded as JSON; 503 maps to the fixed overload message;
/// other statuses use the body's `detail` string when present, else the
/// per-skill fallback.
async fn classify_response(
    request: &SubmissionRequest,
    response: reqwest::Response,
) -> Result<Value, SubmitError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<Value>().await.map_err(|err| {
            panel_warn!("Undecodable success body ({status}): {err}");
            SubmitError::new(
                FailureKind::Api {
                    status: status.as_u16(),
                },
                request.generic_failure_message(),
            )
        });
    }

    if status.as_u16() == 503 {
        return Err(SubmitError::new(FailureKind::Overloaded, OVERLOADED_MESSAGE));
    }

    let detail = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("detail")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
        })
        .filter(|detail| !detail.is_empty());

    Err(SubmitError::new(
        FailureKind::Api {
            status: status.as_u16(),
        },
        detail.unwrap_or_else(|| request.generic_failure_message().to_string()),
    ))
}
