//! # Actions
//!
//! Everything that can happen in the chat client becomes an `Action`.
//! User presses Enter on the file field? That's `Action::SubmitFile(..)`.
//! The recognizer hears something? That's `Action::Speech(SpeechEvent::Result(..))`.
//!
//! `update()` applies an action to the state and tells the event loop what
//! to do next. Rejections never escape: they are turned into toasts here.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```

use std::time::Instant;

use crate::core::state::{App, SelectedFile};
use crate::core::toast::ToastLevel;
use crate::core::voice::{SpeechError, SpeechEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Submit button on the upload form
    SubmitFile(Option<SelectedFile>),
    /// Text field edited
    DraftChanged(String),
    /// Send button
    SendQuestion,
    /// Microphone button
    ToggleVoice,
    /// Notification from the speech recognizer
    Speech(SpeechEvent),
    /// Close the newest toast
    DismissToast,
    /// Periodic clock tick, expires old toasts
    Tick(Instant),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitFile(selection) => {
            if let Err(e) = app.submit_file(selection) {
                app.toasts.raise(e.to_string(), ToastLevel::Error, Instant::now());
            }
            Effect::None
        }
        Action::DraftChanged(text) => {
            app.set_draft(text);
            Effect::None
        }
        Action::SendQuestion => {
            if let Err(e) = app.submit_question() {
                app.toasts.raise(e.to_string(), ToastLevel::Error, Instant::now());
            }
            Effect::None
        }
        Action::ToggleVoice => {
            match app.toggle_voice_capture() {
                Ok(transition) => log::debug!("Voice toggle: {:?}", transition),
                Err(e @ (SpeechError::AlreadyActive | SpeechError::NotActive)) => {
                    log::debug!("Voice toggle ignored: {}", e);
                }
                Err(e) => {
                    log::warn!("Voice capture unavailable: {}", e);
                    app.toasts.raise(e.to_string(), ToastLevel::Warning, Instant::now());
                }
            }
            Effect::None
        }
        Action::Speech(event) => {
            if let SpeechEvent::Error(reason) = &event {
                app.toasts.raise(
                    format!("Voice input failed: {reason}"),
                    ToastLevel::Warning,
                    Instant::now(),
                );
            }
            app.handle_speech_event(event);
            Effect::None
        }
        Action::DismissToast => {
            app.toasts.dismiss_latest();
            Effect::None
        }
        Action::Tick(now) => {
            app.toasts.expire(now);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::ChatMessage;
    use crate::test_support::{FakeSpeech, test_app, test_app_with};
    use std::path::PathBuf;
    use std::time::Duration;

    fn real_file() -> (SelectedFile, PathBuf) {
        let path = std::env::temp_dir().join(format!("merkle-chat-action-{}.pdf", std::process::id()));
        std::fs::write(&path, b"%PDF-1.4").unwrap();
        let file = SelectedFile::from_input(&path.display().to_string()).unwrap();
        (file, path)
    }

    fn latest_toast(app: &App) -> Option<(&str, ToastLevel)> {
        app.toasts.latest().map(|t| (t.message.as_str(), t.level))
    }

    #[test]
    fn submit_without_file_raises_toast() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::SubmitFile(None)), Effect::None);
        assert!(!app.chat_visible);
        assert!(app.messages().is_empty());
        assert_eq!(latest_toast(&app), Some(("Please upload a file.", ToastLevel::Error)));
    }

    #[test]
    fn submit_with_file_greets() {
        let mut app = test_app();
        let (file, path) = real_file();
        update(&mut app, Action::SubmitFile(Some(file)));
        std::fs::remove_file(path).unwrap();

        assert!(app.chat_visible);
        assert_eq!(app.messages(), &[ChatMessage::bot("Ask me now")]);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn send_empty_raises_toast() {
        let mut app = test_app();
        update(&mut app, Action::SendQuestion);
        assert!(app.messages().is_empty());
        assert_eq!(latest_toast(&app), Some(("Please enter a question.", ToastLevel::Error)));
    }

    #[test]
    fn send_hello_appends_and_resets() {
        let mut app = test_app();
        update(&mut app, Action::DraftChanged("Hello".to_string()));
        update(&mut app, Action::SendQuestion);
        assert_eq!(app.messages(), &[ChatMessage::me("Hello")]);
        assert_eq!(app.draft, "");
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn voice_round_trip_through_actions() {
        let fake = FakeSpeech::new();
        let calls = fake.calls();
        let (mut app, _rx) = test_app_with(fake);

        update(&mut app, Action::ToggleVoice);
        assert!(!app.listening(), "listening waits for the recognizer's start");
        update(&mut app, Action::Speech(SpeechEvent::Started));
        assert!(app.listening());

        update(&mut app, Action::Speech(SpeechEvent::Result("summarize section two".into())));
        assert_eq!(app.draft, "summarize section two");

        update(&mut app, Action::ToggleVoice);
        assert_eq!(calls.borrow().stops, 1);
        assert!(app.listening(), "still listening until the recognizer ends");

        update(&mut app, Action::Speech(SpeechEvent::Ended));
        assert!(!app.listening());
    }

    #[test]
    fn unavailable_voice_warns_without_state_change() {
        let (mut app, _rx) = test_app_with(FakeSpeech::unavailable());
        update(&mut app, Action::ToggleVoice);
        assert!(!app.listening());
        assert_eq!(
            latest_toast(&app),
            Some(("Voice input is unavailable.", ToastLevel::Warning))
        );
    }

    #[test]
    fn double_start_is_silent() {
        let (mut app, _rx) = test_app_with(FakeSpeech::new());
        update(&mut app, Action::ToggleVoice);
        // Recognizer has not reported Started yet; second press hits AlreadyActive
        update(&mut app, Action::ToggleVoice);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn recognizer_error_warns() {
        let (mut app, _rx) = test_app_with(FakeSpeech::new());
        update(&mut app, Action::ToggleVoice);
        update(&mut app, Action::Speech(SpeechEvent::Started));
        update(&mut app, Action::Speech(SpeechEvent::Error("no microphone".into())));
        assert_eq!(
            latest_toast(&app),
            Some(("Voice input failed: no microphone", ToastLevel::Warning))
        );
        update(&mut app, Action::Speech(SpeechEvent::Ended));
        assert!(!app.listening());
    }

    #[test]
    fn tick_expires_and_dismiss_closes() {
        let mut app = test_app();
        update(&mut app, Action::SendQuestion);
        update(&mut app, Action::SubmitFile(None));
        assert_eq!(app.toasts.len(), 2);

        update(&mut app, Action::DismissToast);
        assert_eq!(latest_toast(&app).map(|(m, _)| m), Some("Please enter a question."));

        update(&mut app, Action::Tick(Instant::now() + Duration::from_secs(10)));
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
