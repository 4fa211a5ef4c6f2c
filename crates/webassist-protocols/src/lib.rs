//! # WebAssist Protocols
//!
//! Capability interfaces consumed by the automation engine. Contains only
//! trait and type definitions - adapters live in the extension crates.
//!
//! ## Core Traits
//!
//! - [`LLMProvider`] - text completion backends (Gemini, ...)
//! - [`PageDriver`] - a single live browser page addressed by selector
//! - [`SpeechChannel`] - the `listen` / `speak` side channel

pub mod channel;
pub mod driver;
pub mod error;
pub mod provider;
pub mod types;

pub use channel::SpeechChannel;
pub use driver::{ElementState, PageDriver};
pub use error::{ChannelError, DriverError, ProviderError};
pub use provider::{CompletionRequest, CompletionResponse, LLMProvider};
pub use types::*;
