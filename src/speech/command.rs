//! External-process recognizer.
//!
//! The configured command is run through `sh -c`. `{locale}` in the command
//! is replaced with the locale, which is also exported as `SPEECH_LOCALE`.
//! Every non-empty stdout line is a transcript; the process exiting ends the
//! session. Stopping kills the process.
//!
//! Must be started from inside a tokio runtime.

use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio::sync::oneshot;

use crate::core::voice::{SpeechCapability, SpeechError, SpeechEvent, SpeechSink};

struct Session {
    stop_tx: Option<oneshot::Sender<()>>,
    /// Set by the task just before it sends `Ended`.
    finished: Arc<AtomicBool>,
}

pub struct CommandSpeech {
    command: String,
    session: Option<Session>,
}

impl CommandSpeech {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            session: None,
        }
    }

    fn is_running(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| !s.finished.load(Ordering::Acquire))
    }
}

impl SpeechCapability for CommandSpeech {
    fn name(&self) -> &str {
        "command"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn start(&mut self, locale: &str, sink: SpeechSink) -> Result<(), SpeechError> {
        if self.is_running() {
            return Err(SpeechError::AlreadyActive);
        }

        let script = self.command.replace("{locale}", locale);
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&script)
            .env("SPEECH_LOCALE", locale)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpeechError::Spawn(e.to_string()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SpeechError::Spawn("recognizer stdout unavailable".to_string()))?;

        info!("Recognizer started: {}", script);
        let (stop_tx, stop_rx) = oneshot::channel();
        let finished = Arc::new(AtomicBool::new(false));
        tokio::spawn(run_session(child, stdout, stop_rx, sink, finished.clone()));
        self.session = Some(Session {
            stop_tx: Some(stop_tx),
            finished,
        });
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SpeechError> {
        if !self.is_running() {
            return Err(SpeechError::NotActive);
        }
        let stop_tx = self
            .session
            .as_mut()
            .and_then(|s| s.stop_tx.take())
            .ok_or(SpeechError::NotActive)?;
        // Err means the session finished on its own in the meantime
        if stop_tx.send(()).is_err() {
            debug!("Recognizer already finished before stop");
        }
        Ok(())
    }
}

/// Drives one recognizer process. Always finishes with `Ended`.
async fn run_session(
    mut child: Child,
    stdout: ChildStdout,
    mut stop_rx: oneshot::Receiver<()>,
    sink: SpeechSink,
    finished: Arc<AtomicBool>,
) {
    let send = |event: SpeechEvent| {
        if sink.send(event).is_err() {
            warn!("Failed to deliver speech event: receiver dropped");
        }
    };

    send(SpeechEvent::Started);

    let mut lines = BufReader::new(stdout).lines();
    let mut stopped = false;

    loop {
        tokio::select! {
            _ = &mut stop_rx => {
                stopped = true;
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill recognizer: {}", e);
                }
                break;
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    let transcript = line.trim();
                    if !transcript.is_empty() {
                        debug!("Recognizer result ({} bytes)", transcript.len());
                        send(SpeechEvent::Result(transcript.to_string()));
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    send(SpeechEvent::Error(e.to_string()));
                    break;
                }
            }
        }
    }

    match child.wait().await {
        Ok(status) if !stopped && !status.success() => {
            warn!("Recognizer exited with {}", status);
            send(SpeechEvent::Error(format!("recognizer exited with {status}")));
        }
        Ok(status) => debug!("Recognizer finished ({})", status),
        Err(e) => warn!("Failed to reap recognizer: {}", e),
    }

    // Whoever sees `Ended` may start again right away
    finished.store(true, Ordering::Release);
    send(SpeechEvent::Ended);
}
