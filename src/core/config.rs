//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.merkle-chat/config.toml`. The file is optional and
//! only ever read; a missing file means defaults.
//!
//! ```toml
//! [general]
//! toast_duration_ms = 3000
//!
//! [voice]
//! command = "my-recognizer --lang {locale}"
//! locale = "en-US"
//!
//! [upload]
//! accepted_extensions = ["pdf", "doc", "docx"]
//! ```

use log::{debug, info, warn};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::toast::DEFAULT_TOAST_DURATION;
use crate::core::voice::DEFAULT_LOCALE;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeneralConfig {
    pub toast_duration_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VoiceConfig {
    /// Shell command that prints recognized transcripts on stdout.
    pub command: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UploadConfig {
    pub accepted_extensions: Option<Vec<String>>,
}

/// Values given on the command line (None = flag not passed).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub speech_command: Option<String>,
    pub locale: Option<String>,
    pub file: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub toast_duration: Duration,
    pub speech_command: Option<String>,
    pub locale: String,
    /// Advisory only: shown next to the file field, never enforced.
    pub accepted_extensions: Vec<String>,
    pub initial_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.merkle-chat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".merkle-chat").join("config.toml"))
}

/// Load config from `~/.merkle-chat/config.toml`.
///
/// A missing file (or missing home directory) yields `ChatConfig::default()`.
/// A malformed file yields `ConfigError::Parse`.
pub fn load_config() -> Result<ChatConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(ChatConfig::default());
    };

    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(ChatConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<ChatConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChatConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Recognizer command: CLI → env → config → none
    let speech_command = cli
        .speech_command
        .clone()
        .or_else(|| std::env::var("MERKLE_CHAT_SPEECH_COMMAND").ok())
        .or_else(|| config.voice.command.clone())
        .filter(|cmd| !cmd.trim().is_empty());

    // Locale: CLI → env → config → default
    let locale = cli
        .locale
        .clone()
        .or_else(|| std::env::var("MERKLE_CHAT_LOCALE").ok())
        .or_else(|| config.voice.locale.clone())
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

    let toast_duration = config
        .general
        .toast_duration_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_TOAST_DURATION);

    let accepted_extensions = config
        .upload
        .accepted_extensions
        .clone()
        .unwrap_or_else(|| {
            DEFAULT_ACCEPTED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect()
        });

    ResolvedConfig {
        toast_duration,
        speech_command,
        locale,
        accepted_extensions,
        initial_file: cli.file.clone(),
    }
}
