//! Chrome DevTools Protocol page driver for WebAssist.
//!
//! Drives one Chrome tab over CDP with no Node.js or Playwright runtime.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │  CdpPageDriver  │ ◄──────────────► │   Chrome/Edge    │
//! │  (this crate)   │       CDP        │  (user's browser)│
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! ## Setup
//!
//! [`BrowserManager`] reuses a Chrome already listening on the debug port,
//! or launches one with a persistent profile so logins survive restarts:
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222
//! ```
//!
//! ## Selectors
//!
//! Everything the driver does is addressed by selector. Plain CSS is passed
//! to the page; the text pseudo-classes `:has-text("...")` and
//! `:text("...")` are resolved by a small helper script evaluated with each
//! operation.

pub mod cdp;
pub mod driver;
pub mod manager;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use driver::CdpPageDriver;
pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig};
