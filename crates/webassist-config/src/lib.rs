//! # WebAssist Config
//!
//! Configuration management for the WebAssist assistant. Settings are
//! read once at startup; there is no reload.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
