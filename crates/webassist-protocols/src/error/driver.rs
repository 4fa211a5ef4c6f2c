//! Page driver errors.

use thiserror::Error;

/// Failure reported by a [`PageDriver`](crate::PageDriver) operation.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Element not visible: {0}")]
    NotVisible(String),

    #[error("Element rejected action: {0}")]
    Rejected(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Browser not connected")]
    NotConnected,

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl DriverError {
    /// True when the element could not be located at all, as opposed to
    /// being located and then refusing the action.
    pub fn is_missing_element(&self) -> bool {
        matches!(
            self,
            DriverError::ElementNotFound(_) | DriverError::NotVisible(_) | DriverError::InvalidSelector(_)
        )
    }
}
