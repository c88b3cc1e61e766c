//! # ChatPanel Component
//!
//! The conversation view: a scrollable column of message bubbles above an
//! input row (question field, microphone toggle, Send).
//!
//! ## Architecture
//!
//! `ChatPanel` is a transient component (created each frame) holding the
//! props it renders (`messages`, `listening`, `voice_available`) and a
//! `&'a mut ChatPanelState` with everything that must survive between frames:
//! scroll position, the question field, and where the buttons were drawn.
//!
//! The panel never mutates application state. User intent leaves as a
//! [`ChatEvent`] from `ChatPanelState::handle_event`, and the event loop
//! turns it into a core `Action`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::ChatMessage;
use crate::tui::component::{Component, EventHandler, hit};
use crate::tui::components::button::{BUTTON_HEIGHT, Button};
use crate::tui::components::input_box::{InputBox, InputEvent};
use crate::tui::components::message_bubble::MessageBubble;
use crate::tui::event::TuiEvent;

/// Blank rows between bubbles.
const BUBBLE_GAP: u16 = 1;

pub const MIC_LABEL: &str = "🎤 Voice";
pub const LISTENING_LABEL: &str = "Listening...";
pub const MIC_OFF_LABEL: &str = "Voice off";
pub const SEND_LABEL: &str = "Send";

/// High-level events emitted by the chat panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    DraftChanged(String),
    Send,
    ToggleVoice,
}

/// Persistent state for the chat panel. Lives in `TuiState`.
pub struct ChatPanelState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to the newest message
    pub stick_to_bottom: bool,
    /// Measurements from the last render, used between frames
    pub viewport_height: u16,
    pub content_height: u16,
    pub input: InputBox,
    send_area: Rect,
    mic_area: Rect,
    mic_enabled: bool,
}

impl Default for ChatPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPanelState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            viewport_height: 0,
            content_height: 0,
            input: InputBox::new("Question", "Type your question..."),
            send_area: Rect::default(),
            mic_area: Rect::default(),
            mic_enabled: false,
        }
    }

    /// Clamp and re-engage auto-scroll once the user reaches the bottom.
    fn repin_if_at_bottom(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

impl EventHandler for ChatPanelState {
    type Event = ChatEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            // The shortcut works in every state so a running capture can be stopped
            TuiEvent::ToggleVoice => Some(ChatEvent::ToggleVoice),
            TuiEvent::MouseClick(col, row) => {
                if hit(self.send_area, *col, *row) {
                    Some(ChatEvent::Send)
                } else if self.mic_enabled && hit(self.mic_area, *col, *row) {
                    Some(ChatEvent::ToggleVoice)
                } else {
                    None
                }
            }
            other => match self.input.handle_event(other)? {
                InputEvent::Changed(text) => Some(ChatEvent::DraftChanged(text)),
                InputEvent::Submit => Some(ChatEvent::Send),
            },
        }
    }
}

/// Newest messages whose bubbles fit on a `u16` canvas, as the index of the
/// first one kept plus their heights. Older messages drop off the top.
fn visible_tail(messages: &[ChatMessage], width: u16) -> (usize, Vec<u16>) {
    let mut used: u32 = 0;
    let mut heights = Vec::new();
    for message in messages.iter().rev() {
        let height = MessageBubble::calculate_height(message, width);
        let gap = if heights.is_empty() { 0 } else { BUBBLE_GAP };
        let next = used + u32::from(height) + u32::from(gap);
        if next > u32::from(u16::MAX) {
            break;
        }
        used = next;
        heights.push(height);
    }
    heights.reverse();
    (messages.len() - heights.len(), heights)
}

/// Total canvas rows for bubbles of `heights` separated by gaps.
fn canvas_height(heights: &[u16]) -> u16 {
    let gaps = heights.len().saturating_sub(1) as u32 * u32::from(BUBBLE_GAP);
    let total = heights.iter().map(|&h| u32::from(h)).sum::<u32>() + gaps;
    total.min(u32::from(u16::MAX)) as u16
}

/// Conversation view. Created fresh each frame.
pub struct ChatPanel<'a> {
    pub state: &'a mut ChatPanelState,
    pub messages: &'a [ChatMessage],
    pub listening: bool,
    pub voice_available: bool,
}

impl<'a> ChatPanel<'a> {
    pub fn new(
        state: &'a mut ChatPanelState,
        messages: &'a [ChatMessage],
        listening: bool,
        voice_available: bool,
    ) -> Self {
        Self {
            state,
            messages,
            listening,
            voice_available,
        }
    }

    /// The microphone button for the current props. Disabled while
    /// listening and when no recognizer exists.
    pub fn mic_button(&self) -> Button<'static> {
        if self.listening {
            Button::new(LISTENING_LABEL, Color::Blue).enabled(false)
        } else if !self.voice_available {
            Button::new(MIC_OFF_LABEL, Color::Blue).enabled(false)
        } else {
            Button::new(MIC_LABEL, Color::Blue)
        }
    }

    fn render_messages(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let (first, heights) = visible_tail(self.messages, content_width);
        let total_height = canvas_height(&heights);

        self.state.viewport_height = area.height;
        self.state.content_height = total_height;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y: u16 = 0;
        for (message, &height) in self.messages[first..].iter().zip(&heights) {
            let row = Rect::new(0, y, content_width, height);
            scroll_view.render_widget(MessageBubble::new(message), row);
            y = y.saturating_add(height).saturating_add(BUBBLE_GAP);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl Component for ChatPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let panel = Block::bordered()
            .title(" Chat ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = panel.inner(area);
        frame.render_widget(panel, area);

        let [list_area, input_row] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(BUTTON_HEIGHT)]).areas(inner);

        self.render_messages(frame, list_area);

        let mic = self.mic_button();
        let send = Button::new(SEND_LABEL, Color::Yellow);
        let [input_area, mic_area, send_area] = Layout::horizontal([
            Constraint::Min(10),
            Constraint::Length(mic.width()),
            Constraint::Length(send.width()),
        ])
        .areas(input_row);

        self.state.input.render(frame, input_area);
        frame.render_widget(mic, mic_area);
        frame.render_widget(send, send_area);

        self.state.mic_area = mic_area;
        self.state.send_area = send_area;
        self.state.mic_enabled = mic.enabled;
    }
}
