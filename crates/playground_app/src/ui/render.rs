use playground_core::{AppViewModel, FormView, OutputView, PanelView, SummarizeMode, EMPTY_OUTPUT_HINT};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use super::{Chrome, Focus};

const FOCUS_STYLE: Style = Style::new().fg(Color::Yellow);
const LABEL_STYLE: Style = Style::new().fg(Color::DarkGray);
const HINT_STYLE: Style = Style::new().fg(Color::DarkGray);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);

pub fn draw(frame: &mut Frame, view: &AppViewModel, chrome: &Chrome) {
    match (&view.account, &view.panel) {
        (Some(account), Some(panel)) => draw_panel(frame, chrome, account, panel),
        _ => draw_welcome(frame, chrome),
    }
}

fn draw_welcome(frame: &mut Frame, chrome: &Chrome) {
    let [header, body] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::styled("Signed out", HINT_STYLE))
            .block(Block::bordered().title(chrome.title.as_str())),
        header,
    );

    let mut lines = vec![
        Line::styled(
            "Welcome to the AI Playground",
            Style::new().add_modifier(Modifier::BOLD),
        ),
        Line::raw("Please sign in to access the tools."),
        Line::raw(""),
        Line::styled("[s] Sign in    [q] Quit", HINT_STYLE),
    ];
    if let Some(hint) = &chrome.sign_in_hint {
        lines.push(Line::raw(""));
        lines.push(Line::styled(hint.clone(), ERROR_STYLE));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered()),
        body,
    );
}

fn draw_panel(frame: &mut Frame, chrome: &Chrome, account: &str, panel: &PanelView) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Signed in as "),
            Span::styled(account.to_string(), Style::new().fg(Color::Cyan)),
        ]))
        .block(Block::bordered().title(chrome.title.as_str())),
        header,
    );

    let [input_area, output_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);

    draw_input(frame, chrome, panel, input_area);
    draw_output(frame, panel, output_area);

    frame.render_widget(
        Paragraph::new(Line::styled(
            "Tab focus · ←/→ change · Enter confirm/submit · Ctrl+O sign out · Ctrl+C quit",
            HINT_STYLE,
        )),
        footer,
    );
}

fn draw_input(frame: &mut Frame, chrome: &Chrome, panel: &PanelView, area: Rect) {
    let mut lines = Vec::new();

    lines.push(Line::styled(
        "Select a Skill",
        focus_label_style(chrome.focus == Focus::Skills),
    ));
    for (index, label) in panel.skill_labels.iter().enumerate() {
        let selected = index
            == playground_core::Skill::ALL
                .iter()
                .position(|skill| *skill == panel.selected)
                .unwrap_or(0);
        let marker = if selected { "●" } else { "○" };
        let style = if selected {
            Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD)
        } else {
            Style::new()
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {marker} ")),
            Span::styled((*label).to_string(), style),
        ]));
    }
    lines.push(Line::raw(""));

    match &panel.form {
        FormView::Summarize {
            mode,
            url,
            file_label,
        } => {
            let (url_dot, file_dot) = match mode {
                SummarizeMode::Url => ("●", "○"),
                SummarizeMode::File => ("○", "●"),
            };
            lines.push(Line::from(vec![
                focus_marker(chrome.focus == Focus::Mode),
                Span::styled("Input: ", LABEL_STYLE),
                Span::raw(format!("({url_dot}) URL   ({file_dot}) File (PDF/DOCX)")),
            ]));
            match mode {
                SummarizeMode::Url => {
                    lines.push(field_line(
                        "URL",
                        url,
                        "https://example.com/article",
                        chrome.focus == Focus::Url,
                    ));
                }
                SummarizeMode::File => {
                    lines.push(field_line(
                        "File path",
                        chrome.path_input(panel.selected),
                        "type a path, Enter to attach",
                        chrome.focus == Focus::FilePath,
                    ));
                    lines.push(chosen_line(file_label, "No file selected"));
                }
            }
        }
        FormView::Image { file_label, prompt } => {
            lines.push(field_line(
                "Image path",
                chrome.path_input(panel.selected),
                "PNG, JPG, JPEG, WebP",
                chrome.focus == Focus::FilePath,
            ));
            lines.push(chosen_line(file_label, "No image selected"));
            lines.push(field_line(
                "Prompt",
                prompt,
                "optional; default instruction is used when blank",
                chrome.focus == Focus::Prompt,
            ));
        }
        FormView::Conversation { file_label } => {
            lines.push(field_line(
                "Audio path",
                chrome.path_input(panel.selected),
                "MP3, WAV, M4A, FLAC",
                chrome.focus == Focus::FilePath,
            ));
            lines.push(chosen_line(file_label, "No audio selected"));
        }
    }

    if let Some(hint) = &chrome.path_hint {
        lines.push(Line::styled(hint.clone(), ERROR_STYLE));
    }

    lines.push(Line::raw(""));
    let submit_style = if !panel.submit_enabled {
        Style::new().fg(Color::DarkGray)
    } else if chrome.focus == Focus::Submit {
        FOCUS_STYLE.add_modifier(Modifier::BOLD)
    } else {
        Style::new().add_modifier(Modifier::BOLD)
    };
    lines.push(Line::styled(
        format!("[ {} ]", panel.submit_label),
        submit_style,
    ));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(panel.selected.label())),
        area,
    );
}

fn draw_output(frame: &mut Frame, panel: &PanelView, area: Rect) {
    let lines = match &panel.output {
        OutputView::Empty => vec![Line::styled(EMPTY_OUTPUT_HINT, HINT_STYLE)],
        OutputView::Loading { status } => vec![Line::raw(*status)],
        OutputView::Error(message) => vec![Line::styled(message.clone(), ERROR_STYLE)],
        OutputView::Conversation {
            transcript,
            diarization,
            summary,
        } => {
            let mut lines = Vec::new();
            push_section(&mut lines, "Transcript", Color::Blue, transcript);
            push_section(&mut lines, "Diarization", Color::Green, diarization);
            push_section(&mut lines, "Summary & Analysis", Color::Magenta, summary);
            lines
        }
        OutputView::Generic(dump) => dump.lines().map(|line| Line::raw(line.to_string())).collect(),
    };

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title("Output")),
        area,
    );
}

fn push_section(lines: &mut Vec<Line<'static>>, heading: &'static str, color: Color, body: &str) {
    if !lines.is_empty() {
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled(
        heading,
        Style::new().fg(color).add_modifier(Modifier::BOLD),
    ));
    for line in body.lines() {
        lines.push(Line::raw(line.to_string()));
    }
}

fn field_line(label: &'static str, value: &str, placeholder: &str, focused: bool) -> Line<'static> {
    let mut spans = vec![
        focus_marker(focused),
        Span::styled(format!("{label}: "), LABEL_STYLE),
    ];
    if value.is_empty() {
        spans.push(Span::styled(placeholder.to_string(), HINT_STYLE));
    } else {
        spans.push(Span::raw(value.to_string()));
    }
    if focused {
        spans.push(Span::styled("▏", FOCUS_STYLE));
    }
    Line::from(spans)
}

fn chosen_line(file_label: &Option<String>, empty_text: &'static str) -> Line<'static> {
    match file_label {
        Some(label) => Line::from(vec![
            Span::styled("  Selected: ", LABEL_STYLE),
            Span::raw(label.clone()),
        ]),
        None => Line::styled(format!("  {empty_text}"), HINT_STYLE),
    }
}

fn focus_marker(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("▸ ", FOCUS_STYLE)
    } else {
        Span::raw("  ")
    }
}

fn focus_label_style(focused: bool) -> Style {
    if focused {
        FOCUS_STYLE
    } else {
        LABEL_STYLE
    }
}
