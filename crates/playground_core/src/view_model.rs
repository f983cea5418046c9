use serde_json::Value;

use crate::{AppState, AuthStatus, ChosenFile, Skill, SummarizeMode, UploadStage};

pub const EMPTY_OUTPUT_HINT: &str =
    "No output yet. Select a skill and provide input to get started.";

/// Everything the shell needs to draw one frame. Derived from [`AppState`]
/// only; the renderer owns no state of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    /// Account label when signed in; `None` renders the sign-in screen.
    pub account: Option<String>,
    /// Present only while signed in.
    pub panel: Option<PanelView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub skill_labels: Vec<&'static str>,
    pub selected: Skill,
    pub form: FormView,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub output: OutputView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormView {
    Summarize {
        mode: SummarizeMode,
        url: String,
        file_label: Option<String>,
    },
    Image {
        file_label: Option<String>,
        prompt: String,
    },
    Conversation {
        file_label: Option<String>,
    },
}

/// Display priority: loading > error > output > empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputView {
    Empty,
    Loading { status: &'static str },
    Error(String),
    Conversation {
        transcript: String,
        diarization: String,
        summary: String,
    },
    Generic(String),
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let account = match &self.auth {
            AuthStatus::SignedIn { account } => Some(account.clone()),
            AuthStatus::SignedOut => None,
        };
        let panel = account.is_some().then(|| self.panel_view());
        AppViewModel {
            account,
            panel,
            dirty: self.dirty,
        }
    }

    fn panel_view(&self) -> PanelView {
        let loading = self.is_loading();
        PanelView {
            skill_labels: Skill::ALL.iter().map(|skill| skill.label()).collect(),
            selected: self.selected,
            form: self.form_view(),
            submit_label: submit_label(self.selected, loading),
            submit_enabled: !loading,
            output: self.output_view(),
        }
    }

    fn form_view(&self) -> FormView {
        match self.selected {
            Skill::Summarization => FormView::Summarize {
                mode: self.summarize.mode,
                url: self.summarize.url.clone(),
                file_label: self.summarize.file.as_ref().map(file_label),
            },
            Skill::ImageAnalysis => FormView::Image {
                file_label: self.image.image.as_ref().map(file_label),
                prompt: self.image.prompt.clone(),
            },
            Skill::ConversationAnalysis => FormView::Conversation {
                file_label: self.conversation.audio.as_ref().map(file_label),
            },
        }
    }

    fn output_view(&self) -> OutputView {
        if let Some(in_flight) = &self.in_flight {
            let status = match in_flight.stage {
                UploadStage::Preparing => "Loading...",
                UploadStage::Uploading => "Uploading...",
            };
            return OutputView::Loading { status };
        }
        if !self.error.is_empty() {
            return OutputView::Error(self.error.clone());
        }
        match &self.output {
            Some(value) => {
                if self.selected == Skill::ConversationAnalysis {
                    if let Some(transcript) = value.get("transcript").and_then(Value::as_str) {
                        return OutputView::Conversation {
                            transcript: transcript.to_string(),
                            diarization: text_field(value, "diarization"),
                            summary: text_field(value, "summary"),
                        };
                    }
                }
                OutputView::Generic(pretty_json(value))
            }
            None => OutputView::Empty,
        }
    }
}

fn submit_label(skill: Skill, loading: bool) -> &'static str {
    match (skill, loading) {
        (Skill::Summarization, false) => "Generate Summary",
        (Skill::Summarization, true) => "Summarizing...",
        (Skill::ImageAnalysis, false) => "Analyze Image",
        (Skill::ImageAnalysis, true) => "Analyzing...",
        (Skill::ConversationAnalysis, false) => "Analyze Conversation",
        (Skill::ConversationAnalysis, true) => "Processing Audio...",
    }
}

fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn file_label(file: &ChosenFile) -> String {
    let megabytes = file.size_bytes as f64 / 1024.0 / 1024.0;
    format!("{} ({:.2} MB)", file.file_name, megabytes)
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
