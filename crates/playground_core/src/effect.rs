use crate::{ChosenFile, Skill, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Upload the payload to the active skill's endpoint.
    Submit {
        submission_id: SubmissionId,
        submission: Submission,
    },
}

/// One multipart payload, built from the form fields current at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Summarize(SummarizeInput),
    AnalyzeImage { image: ChosenFile, prompt: String },
    AnalyzeConversation { audio: ChosenFile },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizeInput {
    Url(String),
    File(ChosenFile),
}

impl Submission {
    pub fn skill(&self) -> Skill {
        match self {
            Submission::Summarize(_) => Skill::Summarization,
            Submission::AnalyzeImage { .. } => Skill::ImageAnalysis,
            Submission::AnalyzeConversation { .. } => Skill::ConversationAnalysis,
        }
    }
}
