//! # Button Component
//!
//! A bordered, centered label. Buttons are stateless: the parent decides the
//! label, color, and whether it is enabled, and records the area it was drawn
//! in for mouse hit testing.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};

pub const BUTTON_HEIGHT: u16 = 3;

#[derive(Clone, Copy)]
pub struct Button<'a> {
    pub label: &'a str,
    pub color: Color,
    pub enabled: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, color: Color) -> Self {
        Self {
            label,
            color,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Columns needed to show the label with borders and one space each side.
    pub fn width(&self) -> u16 {
        unicode_width::UnicodeWidthStr::width(self.label) as u16 + 4
    }

    fn style(&self) -> Style {
        if self.enabled {
            Style::default()
                .fg(Color::Black)
                .bg(self.color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        }
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = self.style();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style);

        Paragraph::new(self.label)
            .alignment(Alignment::Center)
            .style(style)
            .block(block)
            .render(area, buf);
    }
}
