use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

pub type SubmissionId = u64;

/// Shown verbatim on any HTTP 503, whatever the response body says.
pub const OVERLOADED_MESSAGE: &str =
    "The AI service is temporarily overloaded. Please try again in a few minutes.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Preparing,
    Uploading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProgress {
    pub submission_id: SubmissionId,
    pub stage: UploadStage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(UploadProgress),
    SubmissionCompleted {
        submission_id: SubmissionId,
        result: Result<Value, SubmitError>,
    },
}

/// A file to upload as one multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub path: PathBuf,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizeInput {
    Url(String),
    File(FilePayload),
}

/// One multipart POST to a skill endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionRequest {
    Summarize(SummarizeInput),
    AnalyzeImage { image: FilePayload, prompt: String },
    AnalyzeConversation { audio: FilePayload },
}

impl SubmissionRequest {
    /// Endpoint path relative to the configured API base.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            SubmissionRequest::Summarize(_) => "/summarize",
            SubmissionRequest::AnalyzeImage { .. } => "/analyze-image",
            SubmissionRequest::AnalyzeConversation { .. } => "/analyze-conversation",
        }
    }

    /// Fallback message when a failure carries no usable detail.
    pub fn generic_failure_message(&self) -> &'static str {
        match self {
            SubmissionRequest::Summarize(_) => "An error occurred during summarization.",
            SubmissionRequest::AnalyzeImage { .. } => "An error occurred during image analysis.",
            SubmissionRequest::AnalyzeConversation { .. } => {
                "An error occurred during conversation analysis."
            }
        }
    }
}

/// A failed submission. `message` is the user-facing string the panel
/// displays; `kind` is kept for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct SubmitError {
    pub kind: FailureKind,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// HTTP 503 from the backend.
    Overloaded,
    /// Any other non-2xx status.
    Api { status: u16 },
    /// No response: connect failure, DNS, broken transport.
    Network,
    /// The chosen input file could not be read.
    UnreadableInput,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Overloaded => write!(f, "service overloaded"),
            FailureKind::Api { status } => write!(f, "http status {status}"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::UnreadableInput => write!(f, "unreadable input file"),
        }
    }
}
