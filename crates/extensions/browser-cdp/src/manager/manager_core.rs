//! BrowserManager: Chrome discovery, launch, connection and the active page.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::process::{Child, Command};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{BrowserError, BrowserManagerConfig};
use crate::cdp::{CdpClient, PageSession};
use crate::driver::CdpPageDriver;

const LAUNCH_POLL: Duration = Duration::from_millis(200);

/// Manages the browser connection and the single automated page.
pub struct BrowserManager {
    config: BrowserManagerConfig,
    client: RwLock<Option<Arc<CdpClient>>>,
    page: RwLock<Option<Arc<PageSession>>>,
    /// Chrome process handle, if we launched it.
    chrome_process: RwLock<Option<Child>>,
}

impl BrowserManager {
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            page: RwLock::new(None),
            chrome_process: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &BrowserManagerConfig {
        &self.config
    }

    /// Find a Chrome or Chromium executable.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    async fn is_chrome_running(&self) -> bool {
        reqwest::get(&format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok()
    }

    async fn launch_chrome(&self) -> Result<Child, BrowserError> {
        let chrome_path = Self::find_chrome().ok_or(BrowserError::ChromeNotFound)?;
        let profile_dir = self.config.profile_dir();

        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!("Launching Chrome with profile at: {}", profile_dir.display());

        let mut cmd = Command::new(&chrome_path);
        cmd.arg(format!("--remote-debugging-port={}", self.config.debug_port))
            .arg(format!("--user-data-dir={}", profile_dir.display()))
            .arg(format!(
                "--window-size={},{}",
                self.config.viewport_width, self.config.viewport_height
            ))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        if self.config.headless {
            cmd.arg("--headless=new");
        }

        let child = cmd
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Connect to the browser, launching it if necessary.
    pub async fn connect(&self) -> Result<(), BrowserError> {
        if self.client.read().await.is_some() {
            return Ok(());
        }

        if self.is_chrome_running().await {
            info!("Chrome already running on port {}", self.config.debug_port);
        } else {
            info!("Chrome not running on port {}, launching...", self.config.debug_port);
            let child = self.launch_chrome().await?;
            *self.chrome_process.write().await = Some(child);

            let start = Instant::now();
            loop {
                tokio::time::sleep(LAUNCH_POLL).await;
                if self.is_chrome_running().await {
                    break;
                }
                if start.elapsed() >= self.config.launch_timeout {
                    return Err(BrowserError::LaunchFailed(
                        "Chrome failed to start within timeout".to_string(),
                    ));
                }
            }
        }

        let client = CdpClient::connect(&self.config.endpoint()).await?;
        *self.client.write().await = Some(Arc::new(client));

        info!("Connected to Chrome at {}", self.config.endpoint());
        Ok(())
    }

    async fn client(&self) -> Result<Arc<CdpClient>, BrowserError> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(BrowserError::NotConnected)
    }

    /// The automated page, attaching to the first open tab or creating one.
    pub async fn page(&self) -> Result<Arc<PageSession>, BrowserError> {
        if let Some(page) = self.page.read().await.clone() {
            return Ok(page);
        }

        self.connect().await?;
        let client = self.client().await?;

        let existing = client
            .list_pages()
            .await?
            .into_iter()
            .find(|p| p.page_type == "page" && !p.url.starts_with("devtools://"));

        let session = match existing {
            Some(info) => {
                debug!("Attaching to open tab {} ({})", info.id, info.url);
                client.attach_page(&info.id).await?
            }
            None => client.new_page(None).await?,
        };

        if self.config.headless {
            session
                .set_viewport(self.config.viewport_width, self.config.viewport_height)
                .await?;
        }
        if let Err(e) = session.bring_to_front().await {
            debug!("Could not focus tab: {}", e);
        }

        let session = Arc::new(session);
        *self.page.write().await = Some(session.clone());
        Ok(session)
    }

    /// A page driver over the automated page.
    pub async fn driver(&self) -> Result<CdpPageDriver, BrowserError> {
        Ok(CdpPageDriver::new(self.page().await?))
    }

    /// Drop the connection and stop Chrome if we launched it.
    pub async fn shutdown(&self) -> Result<(), BrowserError> {
        self.page.write().await.take();
        self.client.write().await.take();
        info!("Browser connection closed");

        if let Some(mut child) = self.chrome_process.write().await.take() {
            info!("Shutting down Chrome...");
            let _ = child.kill().await;
        }
        Ok(())
    }
}
