//! # Toast Stack Component
//!
//! Draws live notifications in the top-right corner, oldest on top, each in
//! its own bordered box. Overlays whatever is underneath.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::core::toast::{ToastLevel, Toasts};
use crate::tui::component::Component;

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 3;

pub fn level_color(level: ToastLevel) -> Color {
    match level {
        ToastLevel::Error => Color::Red,
        ToastLevel::Warning => Color::Yellow,
    }
}

fn level_title(level: ToastLevel) -> &'static str {
    match level {
        ToastLevel::Error => " Error ",
        ToastLevel::Warning => " Warning ",
    }
}

pub struct ToastStack<'a> {
    pub toasts: &'a Toasts,
}

impl<'a> ToastStack<'a> {
    pub fn new(toasts: &'a Toasts) -> Self {
        Self { toasts }
    }

    /// Box for the `index`-th toast, or None once the stack runs off screen.
    pub fn slot(area: Rect, index: usize) -> Option<Rect> {
        let width = TOAST_WIDTH.min(area.width);
        let y = area.y + 1 + (index as u16).saturating_mul(TOAST_HEIGHT);
        if y + TOAST_HEIGHT > area.y + area.height {
            return None;
        }
        Some(Rect::new(area.x + area.width - width, y, width, TOAST_HEIGHT))
    }
}

impl Component for ToastStack<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        for (index, toast) in self.toasts.iter().enumerate() {
            let Some(slot) = Self::slot(area, index) else {
                break;
            };
            let color = level_color(toast.level);
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .title(level_title(toast.level))
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .title_bottom(" Esc ");

            frame.render_widget(Clear, slot);
            frame.render_widget(
                Paragraph::new(toast.message.as_str()).block(block),
                slot,
            );
        }
    }
}
