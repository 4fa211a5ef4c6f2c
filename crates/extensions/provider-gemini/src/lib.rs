//! # WebAssist Provider - Gemini
//!
//! Google Gemini `generateContent` provider used by the action planner.

mod client;
mod provider;
mod types;

pub use client::DEFAULT_BASE_URL;
pub use provider::GeminiProvider;
pub use types::*;
