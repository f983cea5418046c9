use std::sync::Once;

use playground_core::{
    update, AppState, ChosenFile, Effect, Msg, Skill, Submission, SummarizeInput, SummarizeMode,
    AUDIO_INPUT_MISSING, DEFAULT_IMAGE_PROMPT, IMAGE_INPUT_MISSING, SUMMARIZE_INPUT_MISSING,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(panel_logging::initialize_for_tests);
}

fn signed_in() -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::SignedIn {
            account: "dev@example.com".to_string(),
        },
    );
    state
}

fn select(state: AppState, skill: Skill) -> AppState {
    let (state, _) = update(state, Msg::SkillSelected(skill));
    state
}

fn error_text(state: &AppState) -> Option<String> {
    match state.view().panel.unwrap().output {
        playground_core::OutputView::Error(text) => Some(text),
        _ => None,
    }
}

#[test]
fn summarize_url_mode_empty_url_never_submits() {
    init_logging();
    let state = signed_in();

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert!(!state.is_loading());
    assert_eq!(error_text(&state), Some(SUMMARIZE_INPUT_MISSING.to_string()));
}

#[test]
fn summarize_file_mode_without_file_never_submits() {
    init_logging();
    let state = signed_in();
    let (state, _) = update(state, Msg::SummarizeModeChanged(SummarizeMode::File));

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(error_text(&state), Some(SUMMARIZE_INPUT_MISSING.to_string()));
}

#[test]
fn summarize_url_submit_emits_effect_and_sets_loading() {
    init_logging();
    let state = signed_in();
    let (state, _) = update(
        state,
        Msg::SummarizeUrlChanged("https://example.com/article".to_string()),
    );

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::Submit {
            submission_id: 1,
            submission: Submission::Summarize(SummarizeInput::Url(
                "https://example.com/article".to_string()
            )),
        }]
    );
    assert!(state.is_loading());
    let view = state.view();
    let panel = view.panel.unwrap();
    assert!(!panel.submit_enabled);
    assert_eq!(panel.submit_label, "Summarizing...");
}

#[test]
fn summarize_file_submit_carries_chosen_file() {
    init_logging();
    let state = signed_in();
    let (state, _) = update(state, Msg::SummarizeModeChanged(SummarizeMode::File));
    let file = ChosenFile::new("/tmp/report.pdf", 2048);
    let (state, _) = update(state, Msg::SummarizeFileChosen(file.clone()));

    let (_state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::Submit {
            submission_id: 1,
            submission: Submission::Summarize(SummarizeInput::File(file)),
        }]
    );
}

#[test]
fn image_submit_without_file_sets_local_error() {
    init_logging();
    let state = select(signed_in(), Skill::ImageAnalysis);

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert!(!state.is_loading());
    assert_eq!(error_text(&state), Some(IMAGE_INPUT_MISSING.to_string()));
}

#[test]
fn image_submit_blank_prompt_uses_default_instruction() {
    init_logging();
    let state = select(signed_in(), Skill::ImageAnalysis);
    let image = ChosenFile::new("/tmp/photo.png", 100);
    let (state, _) = update(state, Msg::ImageFileChosen(image.clone()));

    let (_state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::Submit {
            submission_id: 1,
            submission: Submission::AnalyzeImage {
                image,
                prompt: DEFAULT_IMAGE_PROMPT.to_string(),
            },
        }]
    );
}

#[test]
fn image_submit_keeps_custom_prompt() {
    init_logging();
    let state = select(signed_in(), Skill::ImageAnalysis);
    let image = ChosenFile::new("/tmp/photo.png", 100);
    let (state, _) = update(state, Msg::ImageFileChosen(image.clone()));
    let (state, _) = update(
        state,
        Msg::ImagePromptChanged("What breed is this dog?".to_string()),
    );

    let (_state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::Submit {
            submission_id: 1,
            submission: Submission::AnalyzeImage {
                image,
                prompt: "What breed is this dog?".to_string(),
            },
        }]
    );
}

#[test]
fn choosing_an_image_clears_previous_error() {
    init_logging();
    let state = select(signed_in(), Skill::ImageAnalysis);
    let (state, _) = update(state, Msg::SubmitClicked);
    assert_eq!(error_text(&state), Some(IMAGE_INPUT_MISSING.to_string()));

    let (state, _) = update(state, Msg::ImageFileChosen(ChosenFile::new("/tmp/a.png", 1)));

    assert_eq!(error_text(&state), None);
}

#[test]
fn conversation_submit_without_audio_sets_local_error() {
    init_logging();
    let state = select(signed_in(), Skill::ConversationAnalysis);

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(error_text(&state), Some(AUDIO_INPUT_MISSING.to_string()));
}

#[test]
fn conversation_submit_carries_audio_file() {
    init_logging();
    let state = select(signed_in(), Skill::ConversationAnalysis);
    let audio = ChosenFile::new("/tmp/call.mp3", 4_000_000);
    let (state, _) = update(state, Msg::AudioFileChosen(audio.clone()));

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::Submit {
            submission_id: 1,
            submission: Submission::AnalyzeConversation { audio },
        }]
    );
    assert_eq!(
        state.view().panel.unwrap().submit_label,
        "Processing Audio..."
    );
}

#[test]
fn submit_is_ignored_while_a_submission_is_in_flight() {
    init_logging();
    let state = signed_in();
    let (state, _) = update(
        state,
        Msg::SummarizeUrlChanged("https://example.com".to_string()),
    );
    let (state, first) = update(state, Msg::SubmitClicked);
    assert_eq!(first.len(), 1);

    let (state, second) = update(state, Msg::SubmitClicked);

    assert!(second.is_empty());
    assert!(state.is_loading());
}

#[test]
fn submission_ids_are_monotonic() {
    init_logging();
    let state = signed_in();
    let (state, _) = update(
        state,
        Msg::SummarizeUrlChanged("https://example.com".to_string()),
    );
    let (state, effects) = update(state, Msg::SubmitClicked);
    let first_id = match &effects[0] {
        Effect::Submit { submission_id, .. } => *submission_id,
    };
    let (state, _) = update(
        state,
        Msg::SubmissionCompleted {
            submission_id: first_id,
            result: Ok(serde_json::json!({"summary": "ok"})),
        },
    );

    let (_state, effects) = update(state, Msg::SubmitClicked);

    match &effects[0] {
        Effect::Submit { submission_id, .. } => assert_eq!(*submission_id, first_id + 1),
    }
}
