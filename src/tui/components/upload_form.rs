//! # Upload Form Component
//!
//! Shown until a document has been submitted: a path field, the accepted
//! file types, and a Submit button, centered in the body area.
//!
//! The form only resolves the typed path into a [`SelectedFile`] (or none);
//! whether a missing selection is an error is decided by the core.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::core::state::SelectedFile;
use crate::tui::component::{Component, EventHandler, hit};
use crate::tui::components::button::{BUTTON_HEIGHT, Button};
use crate::tui::components::input_box::{INPUT_HEIGHT, InputBox, InputEvent};
use crate::tui::event::TuiEvent;

const FORM_WIDTH: u16 = 60;
pub const SUBMIT_LABEL: &str = "Submit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    Submit(Option<SelectedFile>),
}

pub struct UploadFormState {
    pub input: InputBox,
    submit_area: Rect,
}

impl UploadFormState {
    pub fn new(initial_path: Option<&str>) -> Self {
        let mut input = InputBox::new("Document", "Path to a file...");
        if let Some(path) = initial_path {
            input.set_text(path);
        }
        Self {
            input,
            submit_area: Rect::default(),
        }
    }

    fn submit(&self) -> UploadEvent {
        UploadEvent::Submit(SelectedFile::from_input(self.input.text()))
    }
}

impl EventHandler for UploadFormState {
    type Event = UploadEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::MouseClick(col, row) => {
                hit(self.submit_area, *col, *row).then(|| self.submit())
            }
            other => match self.input.handle_event(other)? {
                InputEvent::Submit => Some(self.submit()),
                InputEvent::Changed(_) => None,
            },
        }
    }
}

/// "Accepted: .pdf, .doc, .docx"
pub fn accepted_hint(extensions: &[String]) -> String {
    let list: Vec<String> = extensions
        .iter()
        .map(|e| format!(".{}", e.trim_start_matches('.')))
        .collect();
    format!("Accepted: {}", list.join(", "))
}

pub struct UploadForm<'a> {
    pub state: &'a mut UploadFormState,
    pub accepted_extensions: &'a [String],
}

impl<'a> UploadForm<'a> {
    pub fn new(state: &'a mut UploadFormState, accepted_extensions: &'a [String]) -> Self {
        Self {
            state,
            accepted_extensions,
        }
    }
}

impl Component for UploadForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [column] = Layout::horizontal([Constraint::Length(FORM_WIDTH)])
            .flex(Flex::Center)
            .areas(area);
        let [row, hint_area] = Layout::vertical([
            Constraint::Length(INPUT_HEIGHT.max(BUTTON_HEIGHT)),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(column);

        let submit = Button::new(SUBMIT_LABEL, Color::Yellow);
        let [input_area, submit_area] =
            Layout::horizontal([Constraint::Min(10), Constraint::Length(submit.width())]).areas(row);

        self.state.input.render(frame, input_area);
        frame.render_widget(submit, submit_area);
        self.state.submit_area = submit_area;

        let hint = Paragraph::new(accepted_hint(self.accepted_extensions))
            .alignment(Alignment::Left)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, hint_area);
    }
}
