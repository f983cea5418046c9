use std::sync::Once;

use playground_core::{
    update, AppState, ChosenFile, Msg, OutputView, Skill, UploadStage, EMPTY_OUTPUT_HINT,
};
use pretty_assertions::assert_eq;
use serde_json::json;

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

fn output_view(state: &AppState) -> OutputView {
    state.view().panel.unwrap().output
}

/// Drives a conversation-analysis submission up to the in-flight point.
fn conversation_in_flight() -> AppState {
    let (state, _) = update(signed_in(), Msg::SkillSelected(Skill::ConversationAnalysis));
    let (state, _) = update(
        state,
        Msg::AudioFileChosen(ChosenFile::new("/tmp/call.wav", 1024)),
    );
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(effects.len(), 1);
    state
}

#[test]
fn initial_output_is_the_placeholder() {
    init_logging();
    let state = signed_in();
    assert_eq!(output_view(&state), OutputView::Empty);
    assert_eq!(
        EMPTY_OUTPUT_HINT,
        "No output yet. Select a skill and provide input to get started."
    );
}

#[test]
fn loading_outranks_previous_error_and_output() {
    init_logging();
    let state = conversation_in_flight();
    assert_eq!(
        output_view(&state),
        OutputView::Loading { status: "Loading..." }
    );
}

#[test]
fn progress_updates_the_loading_status() {
    init_logging();
    let state = conversation_in_flight();
    let (state, _) = update(
        state,
        Msg::SubmissionProgress {
            submission_id: 1,
            stage: UploadStage::Uploading,
        },
    );
    assert_eq!(
        output_view(&state),
        OutputView::Loading { status: "Uploading..." }
    );
}

#[test]
fn conversation_result_with_transcript_renders_three_sections() {
    init_logging();
    let state = conversation_in_flight();
    let (state, _) = update(
        state,
        Msg::SubmissionCompleted {
            submission_id: 1,
            result: Ok(json!({
                "transcript": "Hello there.",
                "diarization": "Speaker 1: Hello there.",
                "summary": "A greeting.",
            })),
        },
    );

    assert!(!state.is_loading());
    assert_eq!(
        output_view(&state),
        OutputView::Conversation {
            transcript: "Hello there.".to_string(),
            diarization: "Speaker 1: Hello there.".to_string(),
            summary: "A greeting.".to_string(),
        }
    );
}

#[test]
fn conversation_result_missing_sections_render_empty() {
    init_logging();
    let state = conversation_in_flight();
    let (state, _) = update(
        state,
        Msg::SubmissionCompleted {
            submission_id: 1,
            result: Ok(json!({"transcript": "Hi."})),
        },
    );

    assert_eq!(
        output_view(&state),
        OutputView::Conversation {
            transcript: "Hi.".to_string(),
            diarization: String::new(),
            summary: String::new(),
        }
    );
}

#[test]
fn conversation_result_without_transcript_renders_generic_dump() {
    init_logging();
    let state = conversation_in_flight();
    let (state, _) = update(
        state,
        Msg::SubmissionCompleted {
            submission_id: 1,
            result: Ok(json!({"status": "queued"})),
        },
    );

    match output_view(&state) {
        OutputView::Generic(dump) => assert!(dump.contains("\"status\": \"queued\"")),
        other => panic!("expected generic output, got {other:?}"),
    }
}

#[test]
fn summarization_result_renders_generic_dump_even_with_transcript_field() {
    init_logging();
    let state = signed_in();
    let (state, _) = update(
        state,
        Msg::SummarizeUrlChanged("https://example.com".to_string()),
    );
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::SubmissionCompleted {
            submission_id: 1,
            result: Ok(json!({"transcript": "not a conversation"})),
        },
    );

    assert!(matches!(output_view(&state), OutputView::Generic(_)));
}

#[test]
fn failure_sets_error_and_clears_loading() {
    init_logging();
    let state = conversation_in_flight();
    let (state, _) = update(
        state,
        Msg::SubmissionCompleted {
            submission_id: 1,
            result: Err("An error occurred during conversation analysis.".to_string()),
        },
    );

    assert!(!state.is_loading());
    assert_eq!(
        output_view(&state),
        OutputView::Error("An error occurred during conversation analysis.".to_string())
    );
    assert!(state.view().panel.unwrap().submit_enabled);
}

#[test]
fn stale_completion_is_dropped() {
    init_logging();
    let state = conversation_in_flight();
    let (state, _) = update(
        state,
        Msg::SubmissionCompleted {
            submission_id: 99,
            result: Ok(json!({"transcript": "stale"})),
        },
    );

    // The unknown id must not clobber the in-flight submission.
    assert!(state.is_loading());
    assert!(matches!(output_view(&state), OutputView::Loading { .. }));
}

#[test]
fn switching_skills_while_idle_resets_output_and_error() {
    init_logging();
    let state = conversation_in_flight();
    let (state, _) = update(
        state,
        Msg::SubmissionCompleted {
            submission_id: 1,
            result: Ok(json!({"transcript": "Hi."})),
        },
    );
    assert!(matches!(
        output_view(&state),
        OutputView::Conversation { .. }
    ));

    let (state, effects) = update(state, Msg::SkillSelected(Skill::Summarization));

    assert!(effects.is_empty());
    assert_eq!(output_view(&state), OutputView::Empty);
}

#[test]
fn switching_skills_does_not_cancel_an_in_flight_submission() {
    init_logging();
    let state = conversation_in_flight();
    let (state, _) = update(state, Msg::SkillSelected(Skill::Summarization));
    assert!(state.is_loading());

    // The late completion still lands; it renders generically because the
    // conversation skill is no longer active.
    let (state, _) = update(
        state,
        Msg::SubmissionCompleted {
            submission_id: 1,
            result: Ok(json!({"transcript": "Hi."})),
        },
    );
    assert!(matches!(output_view(&state), OutputView::Generic(_)));
}
