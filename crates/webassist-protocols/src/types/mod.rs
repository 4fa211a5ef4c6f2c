//! Common types shared across WebAssist crates.

mod common;
mod message;

pub use common::*;
pub use message::*;
