//! # Application State
//!
//! Core state for the chat client. Domain logic only, no TUI types.
//! Presentation state (cursor, scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── chat_visible: bool            // upload form hidden, chat shown
//! ├── draft: String                 // question being typed
//! ├── messages: Vec<ChatMessage>    // append-only transcript
//! ├── voice: VoiceCapture           // listening state + recognizer
//! ├── toasts: Toasts                // transient notifications
//! └── selected_file: Option<SelectedFile>
//! ```
//!
//! Every mutation goes through the entry points below; `update()` in
//! action.rs turns their errors into toasts.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::config::ResolvedConfig;
use crate::core::message::{ChatMessage, GREETING};
use crate::core::toast::Toasts;
use crate::core::voice::{SpeechCapability, SpeechError, SpeechEvent, SpeechSink, VoiceCapture, VoiceTransition};

/// A rejected user action. Recovered where detected and shown as a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingFile,
    EmptyQuestion,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingFile => write!(f, "Please upload a file."),
            ValidationError::EmptyQuestion => write!(f, "Please enter a question."),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Handle to a document the user picked. Only the path is kept; the file's
/// bytes are never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    path: PathBuf,
}

impl SelectedFile {
    /// Interpret text typed into the file field. Blank input, or a path that
    /// does not name an existing regular file, is no selection.
    pub fn from_input(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let path = PathBuf::from(trimmed);
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Some(Self { path }),
            Ok(_) => {
                log::debug!("Not a regular file: {}", path.display());
                None
            }
            Err(e) => {
                log::debug!("Cannot select {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

pub struct App {
    pub chat_visible: bool,
    pub draft: String,
    messages: Vec<ChatMessage>,
    pub voice: VoiceCapture,
    pub toasts: Toasts,
    selected_file: Option<SelectedFile>,
    /// Advisory hint for the file field
    pub accepted_extensions: Vec<String>,
}

impl App {
    pub fn new(speech: Box<dyn SpeechCapability>, sink: SpeechSink, config: &ResolvedConfig) -> Self {
        Self {
            chat_visible: false,
            draft: String::new(),
            messages: Vec::new(),
            voice: VoiceCapture::new(speech, config.locale.clone(), sink),
            toasts: Toasts::new(config.toast_duration),
            selected_file: None,
            accepted_extensions: config.accepted_extensions.clone(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn listening(&self) -> bool {
        self.voice.is_listening()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    /// Reveal the chat and post the greeting. Requires a selected file.
    pub fn submit_file(&mut self, selection: Option<SelectedFile>) -> Result<(), ValidationError> {
        let file = selection.ok_or(ValidationError::MissingFile)?;
        log::info!("Document selected: {}", file.path().display());
        self.selected_file = Some(file);
        self.chat_visible = true;
        self.messages.push(ChatMessage::bot(GREETING));
        Ok(())
    }

    /// Append the draft as a user message and clear it. No reply is produced.
    pub fn submit_question(&mut self) -> Result<(), ValidationError> {
        if self.draft.is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }
        let text = std::mem::take(&mut self.draft);
        log::debug!("Question sent ({} bytes)", text.len());
        self.messages.push(ChatMessage::me(text));
        Ok(())
    }

    pub fn set_draft(&mut self, text: String) {
        self.draft = text;
    }

    pub fn toggle_voice_capture(&mut self) -> Result<VoiceTransition, SpeechError> {
        self.voice.toggle()
    }

    pub fn handle_speech_event(&mut self, event: SpeechEvent) {
        if let Some(transcript) = self.voice.on_event(event) {
            self.draft = transcript;
        }
    }
}
