use std::io::Stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use panel_logging::panel_info;
use playground_core::{update, AppState, ChosenFile, FormView, Msg, Skill, SummarizeMode};

use crate::auth::{ConfiguredIdentityProvider, IdentityProvider};
use crate::config::{Settings, ACCOUNT_VAR};
use crate::effects::EffectRunner;
use crate::ui::{cycle_focus, render, Chrome, Focus};

enum Flow {
    Continue,
    Quit,
}

pub struct App {
    state: AppState,
    chrome: Chrome,
    provider: ConfiguredIdentityProvider,
    runner: EffectRunner,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        panel_info!(
            "Starting {} against {}",
            settings.app_name,
            settings.api_base_url
        );
        Self {
            state: AppState::new(),
            chrome: Chrome::new(settings.app_name),
            provider: ConfiguredIdentityProvider::new(settings.account),
            runner: EffectRunner::new(&settings.api_base_url),
        }
    }

    pub fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            for msg in self.runner.poll_events() {
                self.dispatch(msg);
            }

            let state_dirty = self.state.consume_dirty();
            let chrome_dirty = self.chrome.take_dirty();
            if state_dirty || chrome_dirty {
                let view = self.state.view();
                terminal.draw(|frame| render::draw(frame, &view, &self.chrome))?;
            }

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Flow::Quit = self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Resize(_, _) => self.chrome.mark_dirty(),
                    _ => {}
                }
            }
        }
    }

    /// Applies a message to the state machine and executes emitted effects.
    fn dispatch(&mut self, msg: Msg) {
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;
        self.runner.run(effects);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => return Flow::Quit,
                KeyCode::Char('o') => self.sign_out(),
                _ => {}
            }
            return Flow::Continue;
        }

        if !self.state.signed_in() {
            return self.handle_signed_out_key(key);
        }
        self.handle_panel_key(key);
        Flow::Continue
    }

    fn handle_signed_out_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Char('s') => match self.provider.sign_in() {
                Some(account) => {
                    self.chrome.sign_in_hint = None;
                    self.chrome.mark_dirty();
                    self.dispatch(Msg::SignedIn { account });
                }
                None => {
                    self.chrome.sign_in_hint = Some(format!(
                        "Sign-in unavailable: set {ACCOUNT_VAR} to enable the identity provider."
                    ));
                    self.chrome.mark_dirty();
                }
            },
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            _ => {}
        }
        Flow::Continue
    }

    fn handle_panel_key(&mut self, key: KeyEvent) {
        let view = self.state.view();
        let Some(panel) = view.panel else { return };
        let skill = panel.selected;
        let (mode, url, prompt) = match &panel.form {
            FormView::Summarize { mode, url, .. } => (*mode, url.clone(), String::new()),
            FormView::Image { prompt, .. } => (SummarizeMode::Url, String::new(), prompt.clone()),
            FormView::Conversation { .. } => (SummarizeMode::Url, String::new(), String::new()),
        };

        match (self.chrome.focus, key.code) {
            (_, KeyCode::Tab) => {
                self.chrome.focus = cycle_focus(self.chrome.focus, skill, mode, true);
                self.chrome.mark_dirty();
            }
            (_, KeyCode::BackTab) => {
                self.chrome.focus = cycle_focus(self.chrome.focus, skill, mode, false);
                self.chrome.mark_dirty();
            }
            (Focus::Skills, KeyCode::Left) => self.select_adjacent_skill(skill, -1),
            (Focus::Skills, KeyCode::Right) => self.select_adjacent_skill(skill, 1),
            (Focus::Mode, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) => {
                let toggled = match mode {
                    SummarizeMode::Url => SummarizeMode::File,
                    SummarizeMode::File => SummarizeMode::Url,
                };
                self.dispatch(Msg::SummarizeModeChanged(toggled));
            }
            (Focus::Url, KeyCode::Char(c)) => {
                let mut url = url;
                url.push(c);
                self.dispatch(Msg::SummarizeUrlChanged(url));
            }
            (Focus::Url, KeyCode::Backspace) => {
                let mut url = url;
                url.pop();
                self.dispatch(Msg::SummarizeUrlChanged(url));
            }
            (Focus::Prompt, KeyCode::Char(c)) => {
                let mut prompt = prompt;
                prompt.push(c);
                self.dispatch(Msg::ImagePromptChanged(prompt));
            }
            (Focus::Prompt, KeyCode::Backspace) => {
                let mut prompt = prompt;
                prompt.pop();
                self.dispatch(Msg::ImagePromptChanged(prompt));
            }
            (Focus::FilePath, KeyCode::Char(c)) => {
                self.chrome.path_input_mut(skill).push(c);
                self.chrome.mark_dirty();
            }
            (Focus::FilePath, KeyCode::Backspace) => {
                self.chrome.path_input_mut(skill).pop();
                self.chrome.mark_dirty();
            }
            (Focus::FilePath, KeyCode::Enter) => self.confirm_path(skill),
            (Focus::Url | Focus::Submit, KeyCode::Enter) => self.dispatch(Msg::SubmitClicked),
            _ => {}
        }
    }

    fn select_adjacent_skill(&mut self, current: Skill, delta: isize) {
        let all = Skill::ALL;
        let index = all
            .iter()
            .position(|skill| *skill == current)
            .unwrap_or(0) as isize;
        let next = (index + delta).rem_euclid(all.len() as isize) as usize;
        self.chrome.path_hint = None;
        self.chrome.mark_dirty();
        self.dispatch(Msg::SkillSelected(all[next]));
    }

    /// The terminal analog of a file input: the typed path is checked here,
    /// then handed to the state machine as a chosen file.
    fn confirm_path(&mut self, skill: Skill) {
        let text = self.chrome.path_input(skill).trim().to_string();
        if text.is_empty() {
            return;
        }
        match std::fs::metadata(&text) {
            Ok(metadata) if metadata.is_file() => {
                self.chrome.path_hint = None;
                self.chrome.mark_dirty();
                let file = ChosenFile::new(text, metadata.len());
                let msg = match skill {
                    Skill::Summarization => Msg::SummarizeFileChosen(file),
                    Skill::ImageAnalysis => Msg::ImageFileChosen(file),
                    Skill::ConversationAnalysis => Msg::AudioFileChosen(file),
                };
                self.dispatch(msg);
            }
            _ => {
                self.chrome.path_hint = Some(format!("Not a readable file: {text}"));
                self.chrome.mark_dirty();
            }
        }
    }

    fn sign_out(&mut self) {
        let title = std::mem::take(&mut self.chrome.title);
        self.chrome = Chrome::new(title);
        self.dispatch(Msg::SignedOut);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(account: Option<&str>) -> App {
        App::new(Settings {
            app_name: "Test Playground".to_string(),
            // Nothing listens here; tests never let a request through.
            api_base_url: "http://127.0.0.1:9".to_string(),
            account: account.map(ToOwned::to_owned),
        })
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn sign_in_key_opens_the_panel() {
        let mut app = test_app(Some("dev@example.com"));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(
            app.state.view().account.as_deref(),
            Some("dev@example.com")
        );
    }

    #[test]
    fn sign_in_without_configured_account_shows_a_hint() {
        let mut app = test_app(None);
        press(&mut app, KeyCode::Char('s'));
        assert!(app.state.view().account.is_none());
        assert!(app.chrome.sign_in_hint.is_some());
    }

    #[test]
    fn typing_in_the_url_field_reaches_the_state_machine() {
        let mut app = test_app(Some("dev@example.com"));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Tab); // Mode
        press(&mut app, KeyCode::Tab); // Url
        for c in "https://x".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);

        match app.state.view().panel.unwrap().form {
            FormView::Summarize { url, .. } => assert_eq!(url, "https://"),
            other => panic!("unexpected form: {other:?}"),
        }
    }

    #[test]
    fn confirming_an_existing_path_attaches_the_file() {
        let mut app = test_app(Some("dev@example.com"));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Left); // selector wraps to Conversation Analysis
        press(&mut app, KeyCode::Tab); // FilePath

        let file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file.as_file(), b"RIFF fake audio").unwrap();
        app.chrome.audio_path = file.path().to_string_lossy().into_owned();
        press(&mut app, KeyCode::Enter);

        assert!(app.chrome.path_hint.is_none());
        match app.state.view().panel.unwrap().form {
            FormView::Conversation { file_label } => assert!(file_label.is_some()),
            other => panic!("unexpected form: {other:?}"),
        }
    }

    #[test]
    fn confirming_a_missing_path_shows_a_hint() {
        let mut app = test_app(Some("dev@example.com"));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Tab);

        app.chrome.audio_path = "/nonexistent/call.wav".to_string();
        press(&mut app, KeyCode::Enter);

        assert!(app.chrome.path_hint.is_some());
        match app.state.view().panel.unwrap().form {
            FormView::Conversation { file_label } => assert!(file_label.is_none()),
            other => panic!("unexpected form: {other:?}"),
        }
    }

    #[test]
    fn ctrl_o_signs_out_and_resets_the_chrome() {
        let mut app = test_app(Some("dev@example.com"));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Tab);
        app.chrome.image_path = "/tmp/x.png".to_string();

        app.handle_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL));

        assert!(app.state.view().account.is_none());
        assert_eq!(app.chrome.focus, Focus::Skills);
        assert!(app.chrome.image_path.is_empty());
        assert_eq!(app.chrome.title, "Test Playground");
    }
}
