//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub automation: AutomationConfig,

    #[serde(default)]
    pub voice: VoiceConfig,
}

/// Browser launch options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default)]
    pub headless: bool,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    /// Persistent Chrome profile; `~` is expanded.
    #[serde(default)]
    pub profile_dir: Option<String>,

    #[serde(default = "default_start_url")]
    pub start_url: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: false,
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            profile_dir: None,
            start_url: default_start_url(),
        }
    }
}

impl BrowserConfig {
    pub fn profile_path(&self) -> Option<PathBuf> {
        self.profile_dir
            .as_deref()
            .map(|p| PathBuf::from(crate::ConfigLoader::expand_path(p)))
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    800
}

fn default_start_url() -> String {
    "https://www.google.com".to_string()
}

/// Language model settings for the action planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

impl LlmConfig {
    /// Whether the planner can be used at all.
    pub fn is_enabled(&self) -> bool {
        self.provider != "none"
    }
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_llm_timeout() -> u64 {
    30
}

/// Resolution, retry and session tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// Attempts per candidate selector.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff unit; attempt `n` waits `n * retry_base_ms`.
    #[serde(default = "default_retry_base_ms")]
    pub retry_base_ms: u64,

    /// Visibility wait per attempt.
    #[serde(default = "default_element_timeout_ms")]
    pub element_timeout_ms: u64,

    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// Pause after clicks and dropdown openings.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Intent fuzzy-match threshold.
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,

    #[serde(default = "default_max_history")]
    pub max_history: usize,

    #[serde(default = "default_confirmation_timeout")]
    pub confirmation_timeout_seconds: u64,

    #[serde(default = "default_login_url")]
    pub login_url: String,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_base_ms: default_retry_base_ms(),
            element_timeout_ms: default_element_timeout_ms(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            settle_ms: default_settle_ms(),
            fuzzy_threshold: default_fuzzy_threshold(),
            max_history: default_max_history(),
            confirmation_timeout_seconds: default_confirmation_timeout(),
            login_url: default_login_url(),
        }
    }
}

impl AutomationConfig {
    pub fn retry_base(&self) -> Duration {
        Duration::from_millis(self.retry_base_ms)
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_ms() -> u64 {
    1000
}

fn default_element_timeout_ms() -> u64 {
    10_000
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

fn default_settle_ms() -> u64 {
    1000
}

fn default_fuzzy_threshold() -> f64 {
    0.8
}

fn default_max_history() -> usize {
    50
}

fn default_confirmation_timeout() -> u64 {
    20
}

fn default_login_url() -> String {
    "https://www.redberyltest.in/#/signin".to_string()
}

/// How commands are captured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Text,
    Voice,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Text => "text",
            InputMode::Voice => "voice",
        }
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(InputMode::Text),
            "voice" => Ok(InputMode::Voice),
            other => Err(format!("unknown input mode '{}'", other)),
        }
    }
}

/// Input channel settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default)]
    pub initial_mode: InputMode,
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
