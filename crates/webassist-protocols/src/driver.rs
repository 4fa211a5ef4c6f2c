//! Page driver protocol.
//!
//! A [`PageDriver`] is the single live page the engine automates. Every
//! operation is addressed by selector string; besides plain CSS, drivers
//! accept the text pseudo-classes `:has-text("...")` and `:text("...")`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DriverError;

/// Interval between polls in [`PageDriver::wait_for_selector`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Observable state of the first element matching a selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementState {
    /// Lowercase tag name.
    pub tag: String,
    /// Rendered with a non-empty box and not hidden by style.
    pub visible: bool,
    /// Not `disabled`.
    pub enabled: bool,
}

#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate and wait for the document to settle.
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), DriverError>;

    /// Current document URL.
    async fn url(&self) -> Result<String, DriverError>;

    /// Current document title.
    async fn title(&self) -> Result<String, DriverError>;

    /// State of the first element matching `selector`, if any.
    async fn query(&self, selector: &str) -> Result<Option<ElementState>, DriverError>;

    /// Wait until the first match of `selector` is visible.
    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<ElementState, DriverError> {
        let start = Instant::now();
        loop {
            if let Some(state) = self.query(selector).await? {
                if state.visible {
                    return Ok(state);
                }
            }

            if start.elapsed() >= timeout {
                return Err(DriverError::Timeout(format!(
                    "Waiting for selector '{}' timed out",
                    selector
                )));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<(), DriverError>;

    async fn click(&self, selector: &str) -> Result<(), DriverError>;

    /// Replace the element's value with `text`, dispatching input/change.
    async fn fill(&self, selector: &str, text: &str) -> Result<(), DriverError>;

    async fn hover(&self, selector: &str) -> Result<(), DriverError>;

    /// Choose an option of a native `<select>` by value or label.
    async fn select_option(&self, selector: &str, value: &str) -> Result<(), DriverError>;

    /// Ensure a checkbox-like element is checked.
    async fn check(&self, selector: &str) -> Result<(), DriverError>;

    /// Current `value` of a form control; `None` when it has none.
    async fn read_value(&self, selector: &str) -> Result<Option<String>, DriverError>;

    async fn press_key(&self, key: &str) -> Result<(), DriverError>;

    /// Call `script` (a JavaScript function expression) in the page with
    /// `args` and return its JSON result.
    async fn evaluate(&self, script: &str, args: Vec<Value>) -> Result<Value, DriverError>;
}
