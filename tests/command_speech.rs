use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use merkle_chat::core::action::{Action, update};
use merkle_chat::core::config::{ChatConfig, CliOverrides, resolve};
use merkle_chat::core::state::{App, SelectedFile};
use merkle_chat::core::voice::{SpeechCapability, SpeechError, SpeechEvent};
use merkle_chat::speech::CommandSpeech;
use tokio_test::{assert_err, assert_ok};

// ============================================================================
// Helper Functions
// ============================================================================

const EVENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Collects events until `Ended` (inclusive) or the timeout runs out.
async fn collect_events(rx: Receiver<SpeechEvent>) -> Vec<SpeechEvent> {
    tokio::task::spawn_blocking(move || {
        let deadline = Instant::now() + EVENT_TIMEOUT;
        let mut events = Vec::new();
        while let Some(left) = deadline.checked_duration_since(Instant::now()) {
            match rx.recv_timeout(left) {
                Ok(SpeechEvent::Ended) => {
                    events.push(SpeechEvent::Ended);
                    break;
                }
                Ok(event) => events.push(event),
                Err(_) => break,
            }
        }
        events
    })
    .await
    .unwrap()
}

async fn run_command(command: &str, locale: &str) -> Vec<SpeechEvent> {
    let (tx, rx) = mpsc::channel();
    let mut speech = CommandSpeech::new(command);
    assert_ok!(speech.start(locale, tx));
    collect_events(rx).await
}

// ============================================================================
// Recognizer Sessions
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_lines_become_results() {
    let events = run_command("echo hello; echo world", "en-US").await;
    assert_eq!(
        events,
        vec![
            SpeechEvent::Started,
            SpeechEvent::Result("hello".into()),
            SpeechEvent::Result("world".into()),
            SpeechEvent::Ended,
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_locale_is_substituted_and_exported() {
    let events = run_command("echo {locale}; echo $SPEECH_LOCALE", "fr-FR").await;
    assert_eq!(
        events,
        vec![
            SpeechEvent::Started,
            SpeechEvent::Result("fr-FR".into()),
            SpeechEvent::Result("fr-FR".into()),
            SpeechEvent::Ended,
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blank_lines_are_skipped() {
    let events = run_command("echo; echo '   '; echo '  spaced  '", "en-US").await;
    assert_eq!(
        events,
        vec![
            SpeechEvent::Started,
            SpeechEvent::Result("spaced".into()),
            SpeechEvent::Ended,
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failing_command_reports_error_then_ends() {
    let events = run_command("exit 3", "en-US").await;
    assert_eq!(events.first(), Some(&SpeechEvent::Started));
    assert!(matches!(events.get(1), Some(SpeechEvent::Error(reason)) if reason.contains("exited")));
    assert_eq!(events.last(), Some(&SpeechEvent::Ended));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stop_kills_long_running_recognizer() {
    let (tx, rx) = mpsc::channel();
    let mut speech = CommandSpeech::new("sleep 30");
    assert_ok!(speech.start("en-US", tx));
    assert_ok!(speech.stop());

    let started = Instant::now();
    let events = collect_events(rx).await;
    assert!(started.elapsed() < EVENT_TIMEOUT);
    // A requested stop is not an error
    assert_eq!(events, vec![SpeechEvent::Started, SpeechEvent::Ended]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_second_start_is_rejected_while_running() {
    let (tx, rx) = mpsc::channel();
    let mut speech = CommandSpeech::new("sleep 30");
    assert_ok!(speech.start("en-US", tx.clone()));

    let err = assert_err!(speech.start("en-US", tx));
    assert_eq!(err, SpeechError::AlreadyActive);

    assert_ok!(speech.stop());
    collect_events(rx).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stop_without_start_is_not_active() {
    let mut speech = CommandSpeech::new("echo unused");
    let err = assert_err!(speech.stop());
    assert_eq!(err, SpeechError::NotActive);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_restart_immediately_after_ended() {
    let mut speech = CommandSpeech::new("echo once");

    // Starting again as soon as Ended arrives must not hit AlreadyActive
    for _ in 0..5 {
        let (tx, rx) = mpsc::channel();
        assert_ok!(speech.start("en-US", tx));
        let events = collect_events(rx).await;
        assert!(events.contains(&SpeechEvent::Result("once".into())));
        assert_eq!(events.last(), Some(&SpeechEvent::Ended));
    }
}

// ============================================================================
// End-to-end through the state holder
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_transcript_fills_draft_and_can_be_sent() {
    let config = resolve(&ChatConfig::default(), &CliOverrides::default());

    let document = std::env::temp_dir().join(format!("merkle-chat-it-{}.pdf", std::process::id()));
    std::fs::write(&document, b"%PDF").unwrap();

    let (tx, rx) = mpsc::channel();
    let mut app = App::new(Box::new(CommandSpeech::new("echo what is a merkle tree")), tx, &config);

    let selection = SelectedFile::from_input(&document.display().to_string());
    update(&mut app, Action::SubmitFile(selection));
    std::fs::remove_file(&document).unwrap();
    assert!(app.chat_visible);

    update(&mut app, Action::ToggleVoice);
    for event in collect_events(rx).await {
        update(&mut app, Action::Speech(event));
    }
    assert!(!app.listening());
    assert_eq!(app.draft, "what is a merkle tree");

    update(&mut app, Action::SendQuestion);
    let texts: Vec<&str> = app.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["Ask me now", "what is a merkle tree"]);
    assert!(app.draft.is_empty());
}
