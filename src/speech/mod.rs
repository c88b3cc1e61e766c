//! # Speech Recognizers
//!
//! Concrete [`SpeechCapability`] backends.
//!
//! - [`CommandSpeech`]: runs an external recognizer program and reads
//!   transcripts from its stdout
//! - [`UnavailableSpeech`]: stands in when no recognizer is configured

mod command;

pub use command::CommandSpeech;

use crate::core::config::ResolvedConfig;
use crate::core::voice::{SpeechCapability, SpeechError, SpeechSink};

/// Backend used when voice input has not been set up.
pub struct UnavailableSpeech;

impl SpeechCapability for UnavailableSpeech {
    fn name(&self) -> &str {
        "none"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn start(&mut self, _locale: &str, _sink: SpeechSink) -> Result<(), SpeechError> {
        Err(SpeechError::Unavailable)
    }

    fn stop(&mut self) -> Result<(), SpeechError> {
        Err(SpeechError::NotActive)
    }
}

/// Pick a recognizer from the resolved config.
pub fn build_capability(config: &ResolvedConfig) -> Box<dyn SpeechCapability> {
    match &config.speech_command {
        Some(command) => {
            log::info!("Voice input via command: {}", command);
            Box::new(CommandSpeech::new(command.clone()))
        }
        None => {
            log::info!("No recognizer command configured, voice input disabled");
            Box::new(UnavailableSpeech)
        }
    }
}
