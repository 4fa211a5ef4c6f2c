//! LLM provider protocol definitions.
//!
//! Providers connect to hosted language models and expose plain text
//! completion. The automation engine never relies on structured output.

mod model;
mod request;
mod response;
mod traits;

pub use model::*;
pub use request::*;
pub use response::*;
pub use traits::*;
