//! # Voice Capture
//!
//! Voice input is a three-state machine driven by an external recognizer:
//!
//! ```text
//!            toggle / start()                toggle / stop()
//!   Idle ───────────────────────▶ (Started) ─▶ Listening ─────────▶ Stopping
//!    ▲                                              │                   │
//!    └──────────────────── Ended ───────────────────┴───────────────────┘
//! ```
//!
//! The recognizer sits behind [`SpeechCapability`] and reports back through a
//! [`SpeechSink`]. Notifications arrive whenever the recognizer decides, so
//! `Listening` is only entered on `Started` and `Idle` only on `Ended`.

use std::fmt;
use std::sync::mpsc::Sender;

/// Locale handed to the recognizer when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "en-US";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoiceState {
    #[default]
    Idle,
    Listening,
    /// Stop requested, waiting for the recognizer's `Ended`.
    Stopping,
}

/// Notifications emitted by a recognizer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Started,
    /// Recognized transcript. A later result replaces an earlier one.
    Result(String),
    /// Recognizer-side failure. `Ended` still follows.
    Error(String),
    Ended,
}

/// Channel the recognizer reports on. The event loop drains the other end.
pub type SpeechSink = Sender<SpeechEvent>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// No recognizer backend on this system.
    Unavailable,
    /// `start` called while a session is running.
    AlreadyActive,
    /// `stop` called with no session running.
    NotActive,
    /// The recognizer could not be launched.
    Spawn(String),
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::Unavailable => write!(f, "Voice input is unavailable."),
            SpeechError::AlreadyActive => write!(f, "voice capture already running"),
            SpeechError::NotActive => write!(f, "voice capture is not running"),
            SpeechError::Spawn(msg) => write!(f, "Voice input failed: {msg}"),
        }
    }
}

impl std::error::Error for SpeechError {}

/// A speech-recognition backend.
///
/// `start` begins a session and must eventually send `Started` followed by
/// zero or more `Result`/`Error` events and exactly one `Ended` to `sink`.
/// `stop` asks the running session to finish; its `Ended` follows.
pub trait SpeechCapability {
    fn name(&self) -> &str;

    fn is_available(&self) -> bool;

    fn start(&mut self, locale: &str, sink: SpeechSink) -> Result<(), SpeechError>;

    fn stop(&mut self) -> Result<(), SpeechError>;
}

/// What a toggle actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceTransition {
    StartRequested,
    StopRequested,
    /// A stop is already in flight.
    Ignored,
}

pub struct VoiceCapture {
    state: VoiceState,
    capability: Box<dyn SpeechCapability>,
    locale: String,
    sink: SpeechSink,
}

impl VoiceCapture {
    pub fn new(capability: Box<dyn SpeechCapability>, locale: impl Into<String>, sink: SpeechSink) -> Self {
        Self {
            state: VoiceState::Idle,
            capability,
            locale: locale.into(),
            sink,
        }
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    /// True from `Started` until `Ended`, including while a stop is pending.
    pub fn is_listening(&self) -> bool {
        matches!(self.state, VoiceState::Listening | VoiceState::Stopping)
    }

    pub fn is_available(&self) -> bool {
        self.capability.is_available()
    }

    pub fn toggle(&mut self) -> Result<VoiceTransition, SpeechError> {
        match self.state {
            VoiceState::Idle => {
                if !self.capability.is_available() {
                    return Err(SpeechError::Unavailable);
                }
                self.capability.start(&self.locale, self.sink.clone())?;
                log::info!(
                    "Voice capture requested via {} ({})",
                    self.capability.name(),
                    self.locale
                );
                Ok(VoiceTransition::StartRequested)
            }
            VoiceState::Listening => {
                self.capability.stop()?;
                self.state = VoiceState::Stopping;
                log::info!("Voice capture stop requested");
                Ok(VoiceTransition::StopRequested)
            }
            VoiceState::Stopping => Ok(VoiceTransition::Ignored),
        }
    }

    /// Apply a recognizer notification. Returns the transcript for `Result`.
    pub fn on_event(&mut self, event: SpeechEvent) -> Option<String> {
        match event {
            SpeechEvent::Started => {
                if self.state == VoiceState::Idle {
                    self.state = VoiceState::Listening;
                }
                None
            }
            SpeechEvent::Result(transcript) => Some(transcript),
            SpeechEvent::Error(reason) => {
                log::warn!("Recognizer error: {}", reason);
                None
            }
            SpeechEvent::Ended => {
                self.state = VoiceState::Idle;
                None
            }
        }
    }
}
