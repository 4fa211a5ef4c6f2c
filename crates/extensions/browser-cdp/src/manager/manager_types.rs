//! Manager configuration and errors.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use webassist_config::BrowserConfig;

use crate::cdp::CdpError;

/// Failures while bringing up the automated browser.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Chrome executable not found; install Google Chrome or Chromium")]
    ChromeNotFound,

    #[error("Could not start Chrome: {0}")]
    LaunchFailed(String),

    #[error("No browser connection")]
    NotConnected,

    #[error(transparent)]
    Cdp(#[from] CdpError),
}

/// How the manager finds or starts Chrome.
#[derive(Debug, Clone)]
pub struct BrowserManagerConfig {
    pub debug_port: u16,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Keeps cookies and logins between runs.
    pub profile_dir: Option<PathBuf>,
    pub headless: bool,
    /// Budget for Chrome to start listening after launch.
    pub launch_timeout: Duration,
}

impl Default for BrowserManagerConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            viewport_width: 1280,
            viewport_height: 800,
            profile_dir: None,
            headless: false,
            launch_timeout: Duration::from_secs(6),
        }
    }
}

impl From<&BrowserConfig> for BrowserManagerConfig {
    fn from(config: &BrowserConfig) -> Self {
        Self {
            debug_port: config.debug_port,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            profile_dir: config.profile_path(),
            headless: config.headless,
            ..Default::default()
        }
    }
}

impl BrowserManagerConfig {
    /// The profile directory, defaulting to `~/.webassist/browser-profile`.
    pub fn profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".webassist")
                .join("browser-profile")
        })
    }

    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }
}
