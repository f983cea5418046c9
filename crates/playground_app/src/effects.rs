use panel_logging::{panel_info, panel_warn};
use playground_core::{ChosenFile, Effect, Msg, Submission, SummarizeInput, UploadStage};
use playground_engine::{EngineEvent, EngineHandle, FilePayload, SubmitSettings};

/// Bridges the pure core and the submission engine: effects go out as engine
/// commands, engine events come back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(api_base: &str) -> Self {
        Self {
            engine: EngineHandle::new(SubmitSettings::new(api_base)),
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Submit {
                    submission_id,
                    submission,
                } => {
                    panel_info!(
                        "Submit id={} skill={:?}",
                        submission_id,
                        submission.skill()
                    );
                    self.engine.submit(submission_id, map_submission(submission));
                }
            }
        }
    }

    /// Drains pending engine events into messages for the update loop.
    pub fn poll_events(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress(progress) => Msg::SubmissionProgress {
            submission_id: progress.submission_id,
            stage: map_stage(progress.stage),
        },
        EngineEvent::SubmissionCompleted {
            submission_id,
            result,
        } => Msg::SubmissionCompleted {
            submission_id,
            result: result.map_err(|err| {
                panel_warn!("Submission {} failed: {}", submission_id, err);
                err.message
            }),
        },
    }
}

fn map_stage(stage: playground_engine::UploadStage) -> UploadStage {
    match stage {
        playground_engine::UploadStage::Preparing => UploadStage::Preparing,
        playground_engine::UploadStage::Uploading => UploadStage::Uploading,
    }
}

fn map_submission(submission: Submission) -> playground_engine::SubmissionRequest {
    match submission {
        Submission::Summarize(SummarizeInput::Url(url)) => {
            playground_engine::SubmissionRequest::Summarize(
                playground_engine::SummarizeInput::Url(url),
            )
        }
        Submission::Summarize(SummarizeInput::File(file)) => {
            playground_engine::SubmissionRequest::Summarize(
                playground_engine::SummarizeInput::File(map_file(file)),
            )
        }
        Submission::AnalyzeImage { image, prompt } => {
            playground_engine::SubmissionRequest::AnalyzeImage {
                image: map_file(image),
                prompt,
            }
        }
        Submission::AnalyzeConversation { audio } => {
            playground_engine::SubmissionRequest::AnalyzeConversation {
                audio: map_file(audio),
            }
        }
    }
}

fn map_file(file: ChosenFile) -> FilePayload {
    FilePayload {
        path: file.path,
        file_name: file.file_name,
    }
}
