//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};

use crate::core::config::{ChatConfig, ResolvedConfig, resolve};
use crate::core::state::App;
use crate::core::voice::{SpeechCapability, SpeechError, SpeechEvent, SpeechSink};

/// Everything the fake recognizer was asked to do.
#[derive(Default)]
pub struct FakeCalls {
    pub starts: Vec<String>,
    pub stops: usize,
    pub sink: Option<SpeechSink>,
}

/// In-memory recognizer. Records calls and never emits on its own; tests
/// feed `SpeechEvent`s straight into the state holder.
pub struct FakeSpeech {
    available: bool,
    fail_with: Option<String>,
    active: bool,
    calls: Rc<RefCell<FakeCalls>>,
}

impl FakeSpeech {
    pub fn new() -> Self {
        Self {
            available: true,
            fail_with: None,
            active: false,
            calls: Rc::new(RefCell::new(FakeCalls::default())),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Rc<RefCell<FakeCalls>> {
        self.calls.clone()
    }
}

impl SpeechCapability for FakeSpeech {
    fn name(&self) -> &str {
        "fake"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn start(&mut self, locale: &str, sink: SpeechSink) -> Result<(), SpeechError> {
        if let Some(reason) = &self.fail_with {
            return Err(SpeechError::Spawn(reason.clone()));
        }
        if self.active {
            return Err(SpeechError::AlreadyActive);
        }
        self.active = true;
        let mut calls = self.calls.borrow_mut();
        calls.starts.push(locale.to_string());
        calls.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SpeechError> {
        if !self.active {
            return Err(SpeechError::NotActive);
        }
        self.active = false;
        self.calls.borrow_mut().stops += 1;
        Ok(())
    }
}

/// Config resolved from an empty file with no CLI overrides.
pub fn test_config() -> ResolvedConfig {
    resolve(&ChatConfig::default(), &Default::default())
}

/// Creates a test App backed by the given recognizer.
pub fn test_app_with(speech: FakeSpeech) -> (App, Receiver<SpeechEvent>) {
    let (tx, rx) = mpsc::channel();
    let app = App::new(Box::new(speech), tx, &test_config());
    (app, rx)
}

/// Creates a test App with a working fake recognizer.
pub fn test_app() -> App {
    test_app_with(FakeSpeech::new()).0
}
