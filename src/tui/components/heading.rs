//! # Heading Component
//!
//! Top line of the screen: the application title on the left and, once a
//! document is loaded, its name plus the key hints on the right.
//!
//! Stateless: everything it shows is passed in as props.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

pub const TITLE: &str = "Merkle Document Chatbot";

pub struct Heading {
    /// Name of the submitted document, if any
    pub document: Option<String>,
    /// Key hints for the current screen
    pub hints: &'static str,
}

impl Heading {
    pub fn new(document: Option<String>, hints: &'static str) -> Self {
        Self { document, hints }
    }

    fn right_text(&self) -> String {
        match &self.document {
            Some(name) => format!("{} | {}", name, self.hints),
            None => self.hints.to_string(),
        }
    }
}

impl Component for Heading {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(title, area);

        // Hints only when they fit beside the title
        let right = self.right_text();
        let needed = (TITLE.width() + 2 + right.width()) as u16;
        if needed <= area.width {
            let hints = Paragraph::new(right)
                .alignment(Alignment::Right)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(hints, area);
        }
    }
}
