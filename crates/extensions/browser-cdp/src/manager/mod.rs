//! Browser instance manager.
//!
//! Connects to (or launches) Chrome with a persistent profile and hands
//! out the single page the assistant drives.

mod manager_core;
mod manager_types;

pub use manager_core::BrowserManager;
pub use manager_types::{BrowserError, BrowserManagerConfig};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
