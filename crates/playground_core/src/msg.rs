use serde_json::Value;

use crate::{ChosenFile, Skill, SubmissionId, SummarizeMode, UploadStage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Identity provider reported a signed-in session.
    SignedIn { account: String },
    /// Identity provider reported sign-out; all panel state is discarded.
    SignedOut,
    /// User picked a skill from the selector.
    SkillSelected(Skill),
    /// User toggled the summarization input mode (URL vs. file).
    SummarizeModeChanged(SummarizeMode),
    /// User edited the summarization URL box.
    SummarizeUrlChanged(String),
    /// User picked a document for summarization.
    SummarizeFileChosen(ChosenFile),
    /// User picked an image for analysis.
    ImageFileChosen(ChosenFile),
    /// User edited the image-analysis prompt.
    ImagePromptChanged(String),
    /// User picked an audio file for conversation analysis.
    AudioFileChosen(ChosenFile),
    /// User pressed the submit control for the active skill.
    SubmitClicked,
    /// Engine progress for an in-flight submission.
    SubmissionProgress {
        submission_id: SubmissionId,
        stage: UploadStage,
    },
    /// Engine completion: the success payload or a user-facing error string.
    SubmissionCompleted {
        submission_id: SubmissionId,
        result: Result<Value, String>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
