use std::path::PathBuf;

use serde_json::Value;

pub type SubmissionId = u64;

/// Instruction sent with the image form when the user leaves the prompt blank.
pub const DEFAULT_IMAGE_PROMPT: &str =
    "Analyze this image and describe what you see in detail.";

/// One of the selectable analysis modes, each with its own form and endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skill {
    Summarization,
    ImageAnalysis,
    ConversationAnalysis,
}

impl Skill {
    /// All configured skills, in selector order. The first is the default.
    pub const ALL: [Skill; 3] = [
        Skill::Summarization,
        Skill::ImageAnalysis,
        Skill::ConversationAnalysis,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Skill::Summarization => "Document/URL Summarization",
            Skill::ImageAnalysis => "Image Analysis",
            Skill::ConversationAnalysis => "Conversation Analysis",
        }
    }
}

/// A file the user picked for upload: path plus the metadata the forms display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChosenFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
}

impl ChosenFile {
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            path,
            file_name,
            size_bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummarizeMode {
    #[default]
    Url,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummarizeForm {
    pub mode: SummarizeMode,
    pub url: String,
    pub file: Option<ChosenFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageForm {
    pub image: Option<ChosenFile>,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationForm {
    pub audio: Option<ChosenFile>,
}

/// Signed-in/signed-out state as reported by the external identity provider.
/// The panel never sees tokens or session data, only this gate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    SignedOut,
    SignedIn {
        account: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Preparing,
    Uploading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InFlight {
    pub(crate) id: SubmissionId,
    pub(crate) stage: UploadStage,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) auth: AuthStatus,
    pub(crate) selected: Skill,
    pub(crate) summarize: SummarizeForm,
    pub(crate) image: ImageForm,
    pub(crate) conversation: ConversationForm,
    pub(crate) in_flight: Option<InFlight>,
    pub(crate) next_submission_id: SubmissionId,
    pub(crate) output: Option<Value>,
    pub(crate) error: String,
    pub(crate) dirty: bool,
}

impl Default for Skill {
    fn default() -> Self {
        Skill::ALL[0]
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(&self) -> bool {
        matches!(self.auth, AuthStatus::SignedIn { .. })
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn allocate_submission_id(&mut self) -> SubmissionId {
        self.next_submission_id += 1;
        self.next_submission_id
    }
}
