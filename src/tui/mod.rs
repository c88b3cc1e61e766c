//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates terminal events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (toasts on screen or voice capture running): polls every 100ms
//!   so toasts expire on time and transcripts show up promptly.
//! - **Idle**: sleeps up to 500ms, only redraws on events or state changes.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::speech::build_capability;
use crate::tui::component::EventHandler;
use crate::tui::components::{ChatEvent, ChatPanelState, UploadEvent, UploadFormState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const BUSY_POLL: Duration = Duration::from_millis(100);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-only state that persists between frames
pub struct TuiState {
    pub upload: UploadFormState,
    pub chat: ChatPanelState,
}

impl TuiState {
    pub fn new(initial_path: Option<&str>) -> Self {
        Self {
            upload: UploadFormState::new(initial_path),
            chat: ChatPanelState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Apply an action, logging it first. Returns true when the loop should exit.
fn dispatch(app: &mut App, action: Action) -> bool {
    debug!("Action: {:?}", action);
    update(app, action) == Effect::Quit
}

/// Map one terminal event to the actions it causes.
fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Vec<Action> {
    match event {
        TuiEvent::ForceQuit => vec![Action::Quit],
        TuiEvent::Escape if !app.toasts.is_empty() => vec![Action::DismissToast],
        TuiEvent::Escape => vec![Action::Quit],
        TuiEvent::Resize => Vec::new(),
        other if !app.chat_visible => match tui.upload.handle_event(&other) {
            Some(UploadEvent::Submit(selection)) => vec![Action::SubmitFile(selection)],
            None => Vec::new(),
        },
        other => match tui.chat.handle_event(&other) {
            Some(ChatEvent::DraftChanged(text)) => vec![Action::DraftChanged(text)],
            Some(ChatEvent::Send) => vec![Action::SendQuestion],
            Some(ChatEvent::ToggleVoice) => vec![Action::ToggleVoice],
            None => Vec::new(),
        },
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let capability = build_capability(&config);
    info!("Speech capability: {}", capability.name());

    // Recognizer events arrive here from the background task
    let (speech_tx, speech_rx) = mpsc::channel();
    let mut app = App::new(capability, speech_tx, &config);

    let initial_path = config.initial_file.as_ref().map(|p| p.display().to_string());
    let mut tui = TuiState::new(initial_path.as_deref());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true;
    let result = loop {
        // The core owns the draft; speech results and sends rewrite it
        if tui.chat.input.text() != app.draft {
            tui.chat.input.set_text(app.draft.as_str());
            needs_redraw = true;
        }

        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let timeout = if app.toasts.is_empty() && !app.listening() {
            IDLE_POLL
        } else {
            BUSY_POLL
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            for action in route_event(&app, &mut tui, event) {
                should_quit |= dispatch(&mut app, action);
            }
        }

        for speech_event in speech_rx.try_iter() {
            should_quit |= dispatch(&mut app, Action::Speech(speech_event));
            needs_redraw = true;
        }

        let toasts_before = app.toasts.len();
        update(&mut app, Action::Tick(Instant::now()));
        if app.toasts.len() != toasts_before {
            needs_redraw = true;
        }

        if should_quit {
            break Ok(());
        }
    };

    info!("Shutting down");
    ratatui::restore();
    result
}
