//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.hera/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Profile;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HeraConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub base_url: Option<String>,
    pub profile: Option<Profile>,
    pub request_timeout_secs: Option<u64>,
    pub greeting: Option<String>,
}

/// Per-field overrides on top of the selected profile preset.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub assistant_label: Option<String>,
    pub avatar_char: Option<char>,
    pub include_success_annotation: Option<bool>,
    pub send_session_id: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InputConfig {
    pub clear_on_dropped_submit: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const CHAT_PATH: &str = "/chat";

pub const DEFAULT_GREETING: &str = "Hi, I am HERA. Tell me what you're noticing with your child, \
    and I will help you find a calm way to respond.";

// ============================================================================
// Client Profile
// ============================================================================

/// Everything that differs between client variants. Behavior is selected
/// here, never by editing code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientProfile {
    pub assistant_label: String,
    pub avatar_char: char,
    /// Add an `OK` chip to replies that were not refused.
    pub include_success_annotation: bool,
    /// Attach `session_id` to every outbound request.
    pub send_session_id: bool,
}

impl ClientProfile {
    pub fn hera() -> Self {
        Self {
            assistant_label: "HERA".to_string(),
            avatar_char: 'H',
            include_success_annotation: true,
            send_session_id: false,
        }
    }

    pub fn pace() -> Self {
        Self {
            assistant_label: "PACE".to_string(),
            avatar_char: 'P',
            include_success_annotation: false,
            send_session_id: true,
        }
    }
}

impl Default for ClientProfile {
    fn default() -> Self {
        Self::hera()
    }
}

impl From<Profile> for ClientProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Hera => Self::hera(),
            Profile::Pace => Self::pace(),
        }
    }
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub profile: ClientProfile,
    pub request_timeout: Option<Duration>,
    pub greeting: String,
    pub clear_on_dropped_submit: bool,
}

impl ResolvedConfig {
    /// Full URL of the chat endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CHAT_PATH)
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: ClientProfile::default(),
            request_timeout: None,
            greeting: DEFAULT_GREETING.to_string(),
            clear_on_dropped_submit: false,
        }
    }
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

/// Returns the path to `~/.hera/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".hera").join("config.toml"))
}

/// Load config from `~/.hera/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HeraConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<HeraConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HeraConfig::default());
        }
    };
    load_config_from(&path)
}

/// Same as [`load_config`] against an explicit path.
pub fn load_config_from(path: &Path) -> Result<HeraConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(HeraConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HeraConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Hera Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# base_url = "http://localhost:8000"   # Or set HERA_BASE_URL; requests go to <base_url>/chat
# profile = "hera"                     # "hera" or "pace" (or set HERA_PROFILE)
# request_timeout_secs = 120           # No timeout unless set
# greeting = "Hi, I am HERA."

# [display]                            # Overrides on top of the selected profile
# assistant_label = "HERA"
# avatar_char = "H"
# include_success_annotation = true    # OK chip on replies that were not refused
# send_session_id = false              # Attach session_id to every request

# [input]
# clear_on_dropped_submit = false      # Keep typed text when a send is ignored mid-request
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_profile` and `cli_base_url` are from CLI flags (None = not specified).
pub fn resolve(
    config: &HeraConfig,
    cli_profile: Option<Profile>,
    cli_base_url: Option<&str>,
) -> ResolvedConfig {
    // Profile: CLI → env → config → default
    let preset = cli_profile
        .or_else(|| std::env::var("HERA_PROFILE").ok().and_then(|s| parse_profile(&s)))
        .or(config.general.profile)
        .unwrap_or_default();

    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("HERA_BASE_URL").ok())
        .or_else(|| config.general.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let mut profile = ClientProfile::from(preset);
    let display = &config.display;
    if let Some(ref label) = display.assistant_label {
        profile.assistant_label = label.clone();
    }
    if let Some(avatar) = display.avatar_char {
        profile.avatar_char = avatar;
    }
    if let Some(include) = display.include_success_annotation {
        profile.include_success_annotation = include;
    }
    if let Some(send) = display.send_session_id {
        profile.send_session_id = send;
    }

    ResolvedConfig {
        base_url,
        profile,
        request_timeout: config.general.request_timeout_secs.map(Duration::from_secs),
        greeting: config
            .general
            .greeting
            .clone()
            .unwrap_or_else(|| DEFAULT_GREETING.to_string()),
        clear_on_dropped_submit: config.input.clear_on_dropped_submit.unwrap_or(false),
    }
}

fn parse_profile(name: &str) -> Option<Profile> {
    match name.trim().to_ascii_lowercase().as_str() {
        "hera" => Some(Profile::Hera),
        "pace" => Some(Profile::Pace),
        other => {
            warn!("Ignoring unknown HERA_PROFILE '{}'", other);
            None
        }
    }
}
