//! Playground core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Submission, SummarizeInput};
pub use msg::Msg;
pub use state::{
    AppState, AuthStatus, ChosenFile, ConversationForm, ImageForm, Skill, SubmissionId,
    SummarizeForm, SummarizeMode, UploadStage, DEFAULT_IMAGE_PROMPT,
};
pub use update::{
    update, AUDIO_INPUT_MISSING, IMAGE_INPUT_MISSING, SUMMARIZE_INPUT_MISSING,
};
pub use view_model::{AppViewModel, FormView, OutputView, PanelView, EMPTY_OUTPUT_HINT};
