pub mod render;

use playground_core::{Skill, SummarizeMode};

/// UI-local chrome: focus, in-progress path text, and transient hints.
/// Everything the backend cares about lives in `playground_core::AppState`;
/// this is only what the terminal needs to echo while the user types.
pub struct Chrome {
    pub title: String,
    pub focus: Focus,
    pub summarize_path: String,
    pub image_path: String,
    pub audio_path: String,
    pub path_hint: Option<String>,
    pub sign_in_hint: Option<String>,
    dirty: bool,
}

impl Chrome {
    pub fn new(title: String) -> Self {
        Self {
            title,
            focus: Focus::Skills,
            summarize_path: String::new(),
            image_path: String::new(),
            audio_path: String::new(),
            path_hint: None,
            sign_in_hint: None,
            dirty: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn path_input(&self, skill: Skill) -> &str {
        match skill {
            Skill::Summarization => &self.summarize_path,
            Skill::ImageAnalysis => &self.image_path,
            Skill::ConversationAnalysis => &self.audio_path,
        }
    }

    pub fn path_input_mut(&mut self, skill: Skill) -> &mut String {
        match skill {
            Skill::Summarization => &mut self.summarize_path,
            Skill::ImageAnalysis => &mut self.image_path,
            Skill::ConversationAnalysis => &mut self.audio_path,
        }
    }
}

/// Focusable controls; which ones exist depends on the active form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Skills,
    Mode,
    Url,
    FilePath,
    Prompt,
    Submit,
}

/// Tab order for the active form, first entry is the default focus.
pub fn focus_ring(skill: Skill, mode: SummarizeMode) -> &'static [Focus] {
    match (skill, mode) {
        (Skill::Summarization, SummarizeMode::Url) => {
            &[Focus::Skills, Focus::Mode, Focus::Url, Focus::Submit]
        }
        (Skill::Summarization, SummarizeMode::File) => {
            &[Focus::Skills, Focus::Mode, Focus::FilePath, Focus::Submit]
        }
        (Skill::ImageAnalysis, _) => {
            &[Focus::Skills, Focus::FilePath, Focus::Prompt, Focus::Submit]
        }
        (Skill::ConversationAnalysis, _) => &[Focus::Skills, Focus::FilePath, Focus::Submit],
    }
}

/// Moves focus forward or backward along the ring, re-homing first if the
/// current focus no longer exists (after a skill or mode change).
pub fn cycle_focus(current: Focus, skill: Skill, mode: SummarizeMode, forward: bool) -> Focus {
    let ring = focus_ring(skill, mode);
    let position = match ring.iter().position(|focus| *focus == current) {
        Some(position) => position,
        None => return ring[0],
    };
    let len = ring.len();
    let next = if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    };
    ring[next]
}
