//! # InputBox Component
//!
//! Single-line text field used for both the document path and the question.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste)
//! - Handle editing (backspace, delete, cursor movement)
//! - Report changes and Enter to the parent
//! - Scroll horizontally so the cursor stays visible
//!
//! ## State Management
//!
//! The field keeps its own copy of the text for editing, but the parent owns
//! the value: every edit is reported as `InputEvent::Changed`, and the parent
//! pushes outside changes back with [`InputBox::set_text`]. Enter does not
//! clear the field; clearing is the parent's decision.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Border (2) + padding (2) consumed horizontally
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Offset from area edge to the first text column
const TEXT_OFFSET: u16 = 2;
/// Height of the field: one text row plus top and bottom border
pub const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The text changed; carries the full new value
    Changed(String),
    /// Enter pressed
    Submit,
}

pub struct InputBox {
    buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// Display columns hidden off the left edge
    scroll: u16,
    /// Border title (Prop)
    pub title: String,
    /// Hint shown while empty (Prop)
    pub placeholder: String,
    /// Whether to place the terminal cursor in this field (Prop)
    pub focused: bool,
}

impl InputBox {
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll: 0,
            title: title.into(),
            placeholder: placeholder.into(),
            focused: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the content from outside (e.g. draft reset, voice transcript).
    /// The cursor moves to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = single_line(&text.into());
        self.cursor = self.buffer.len();
    }

    fn changed(&self) -> Option<InputEvent> {
        Some(InputEvent::Changed(self.buffer.clone()))
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        let text = single_line(text);
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor, &text);
        self.cursor += text.len();
        self.changed()
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let cursor_col = self.buffer[..self.cursor].width() as u16;
        self.scroll = adjust_scroll(cursor_col, self.scroll, width);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .title(self.title.as_str());

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder.as_str()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Paragraph::new(visible_slice(&self.buffer, self.scroll, width))
                .style(Style::default().fg(Color::White))
        };

        frame.render_widget(paragraph.block(block), area);

        if self.focused && width > 0 {
            let x = area.x + TEXT_OFFSET + cursor_col.saturating_sub(self.scroll);
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }
}

/// Line breaks become spaces; carriage returns are dropped.
fn single_line(text: &str) -> String {
    text.chars()
        .filter(|&c| c != '\r')
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}

/// Keep `cursor_col` inside the window `[scroll, scroll + width)`.
fn adjust_scroll(cursor_col: u16, scroll: u16, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    if cursor_col < scroll {
        cursor_col
    } else if cursor_col >= scroll + width {
        cursor_col + 1 - width
    } else {
        scroll
    }
}

/// The part of `text` between display columns `scroll` and `scroll + width`.
/// A wide char straddling the left edge is dropped.
fn visible_slice(text: &str, scroll: u16, width: u16) -> String {
    let mut col: u16 = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0) as u16;
        if col >= scroll && col + w <= scroll + width {
            out.push(c);
        }
        col += w;
        if col >= scroll + width {
            break;
        }
    }
    out
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
