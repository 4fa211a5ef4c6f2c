//! Error types for the WebAssist protocol layer.

mod channel;
mod driver;
mod provider;

pub use channel::*;
pub use driver::*;
pub use provider::*;
