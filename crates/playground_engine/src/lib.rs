//! Playground engine: multipart submission and effect execution.
mod engine;
mod mime;
mod submit;
mod types;

pub use engine::EngineHandle;
pub use mime::mime_for_file_name;
pub use submit::{
    ChannelProgressSink, ProgressSink, ReqwestSubmitter, SubmitSettings, Submitter,
};
pub use types::{
    EngineEvent, FailureKind, FilePayload, SubmissionId, SubmissionRequest, SubmitError,
    SummarizeInput, UploadProgress, UploadStage, OVERLOADED_MESSAGE,
};
