use crate::state::InFlight;
use crate::{
    AppState, AuthStatus, Effect, Msg, Skill, Submission, SummarizeInput, SummarizeMode,
    UploadStage, DEFAULT_IMAGE_PROMPT,
};

pub const SUMMARIZE_INPUT_MISSING: &str = "Please provide a URL or a file.";
pub const IMAGE_INPUT_MISSING: &str = "Please select an image file.";
pub const AUDIO_INPUT_MISSING: &str = "Please select an audio file.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SignedIn { account } => {
            state.auth = AuthStatus::SignedIn { account };
            state.mark_dirty();
            Vec::new()
        }
        Msg::SignedOut => {
            // The panel is torn down on sign-out; nothing survives into the
            // next session. A late completion finds no in-flight id and is
            // dropped.
            state = AppState::new();
            state.mark_dirty();
            Vec::new()
        }
        Msg::SkillSelected(skill) => {
            if state.signed_in() && state.selected != skill {
                state.selected = skill;
                if !state.is_loading() {
                    state.output = None;
                    state.error.clear();
                }
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SummarizeModeChanged(mode) => {
            if state.signed_in() && state.summarize.mode != mode {
                state.summarize.mode = mode;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SummarizeUrlChanged(url) => {
            if state.signed_in() {
                state.summarize.url = url;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SummarizeFileChosen(file) => {
            if state.signed_in() {
                state.summarize.file = Some(file);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ImageFileChosen(file) => {
            if state.signed_in() {
                state.image.image = Some(file);
                state.error.clear();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ImagePromptChanged(prompt) => {
            if state.signed_in() {
                state.image.prompt = prompt;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AudioFileChosen(file) => {
            if state.signed_in() {
                state.conversation.audio = Some(file);
                state.error.clear();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::SubmissionProgress {
            submission_id,
            stage,
        } => {
            if let Some(in_flight) = state.in_flight.as_mut() {
                if in_flight.id == submission_id && in_flight.stage != stage {
                    in_flight.stage = stage;
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::SubmissionCompleted {
            submission_id,
            result,
        } => {
            match state.in_flight.as_ref() {
                Some(in_flight) if in_flight.id == submission_id => {
                    state.in_flight = None;
                    match result {
                        Ok(value) => {
                            state.output = Some(value);
                            state.error.clear();
                        }
                        Err(message) => {
                            state.output = None;
                            state.error = message;
                        }
                    }
                    state.mark_dirty();
                }
                // Stale or unknown submission; newer state wins.
                _ => {}
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if !state.signed_in() {
        return Vec::new();
    }
    // The submit control is disabled while a request is outstanding, so at
    // most one submission is ever in flight.
    if state.is_loading() {
        return Vec::new();
    }

    let submission = match build_submission(state) {
        Ok(submission) => submission,
        Err(message) => {
            state.error = message.to_string();
            state.mark_dirty();
            return Vec::new();
        }
    };

    let submission_id = state.allocate_submission_id();
    state.in_flight = Some(InFlight {
        id: submission_id,
        stage: UploadStage::Preparing,
    });
    state.output = None;
    state.error.clear();
    state.mark_dirty();

    vec![Effect::Submit {
        submission_id,
        submission,
    }]
}

/// Validates the active form and builds its payload, or returns the local
/// validation message. No request is issued on the error path.
fn build_submission(state: &AppState) -> Result<Submission, &'static str> {
    match state.selected {
        Skill::Summarization => {
            let form = &state.summarize;
            match form.mode {
                SummarizeMode::Url if form.url.is_empty() => Err(SUMMARIZE_INPUT_MISSING),
                SummarizeMode::Url => Ok(Submission::Summarize(SummarizeInput::Url(
                    form.url.clone(),
                ))),
                SummarizeMode::File => match &form.file {
                    Some(file) => Ok(Submission::Summarize(SummarizeInput::File(file.clone()))),
                    None => Err(SUMMARIZE_INPUT_MISSING),
                },
            }
        }
        Skill::ImageAnalysis => match &state.image.image {
            Some(image) => {
                let prompt = if state.image.prompt.is_empty() {
                    DEFAULT_IMAGE_PROMPT.to_string()
                } else {
                    state.image.prompt.clone()
                };
                Ok(Submission::AnalyzeImage {
                    image: image.clone(),
                    prompt,
                })
            }
            None => Err(IMAGE_INPUT_MISSING),
        },
        Skill::ConversationAnalysis => match &state.conversation.audio {
            Some(audio) => Ok(Submission::AnalyzeConversation {
                audio: audio.clone(),
            }),
            None => Err(AUDIO_INPUT_MISSING),
        },
    }
}
