//! Speech/text channel errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Input closed")]
    Closed,

    #[error("Channel IO error: {0}")]
    Io(#[from] std::io::Error),
}
