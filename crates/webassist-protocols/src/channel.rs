//! Speech/text side channel.

use async_trait::async_trait;

use crate::error::ChannelError;

/// The `listen` / `speak` capability used to talk to the user.
///
/// Voice implementations wrap speech recognition and synthesis; the text
/// implementation reads and writes lines.
#[async_trait]
pub trait SpeechChannel: Send + Sync {
    /// Block until an utterance or line is available. An empty string means
    /// nothing was recognized.
    async fn listen(&self) -> Result<String, ChannelError>;

    /// Say `text` to the user. Also echoed to the visible log.
    async fn speak(&self, text: &str);

    /// Show reference text without reading it aloud. Defaults to speaking.
    async fn display(&self, text: &str) {
        self.speak(text).await;
    }
}
