//! Console speech channel: one stdin line per utterance, one stdout line
//! per spoken sentence.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::info;

use webassist_protocols::{ChannelError, SpeechChannel};

pub struct ConsoleChannel {
    lines: Mutex<Lines<BufReader<Stdin>>>,
    prompt: String,
}

impl ConsoleChannel {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            prompt: prompt.into(),
        }
    }
}

#[async_trait]
impl SpeechChannel for ConsoleChannel {
    async fn listen(&self) -> Result<String, ChannelError> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(self.prompt.as_bytes()).await?;
        stdout.flush().await?;

        let mut lines = self.lines.lock().await;
        match lines.next_line().await? {
            Some(line) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    info!(target: "webassist::heard", "{}", line);
                }
                Ok(line)
            }
            None => Err(ChannelError::Closed),
        }
    }

    async fn speak(&self, text: &str) {
        info!(target: "webassist::spoken", "{}", text);
        println!("Assistant: {}", text);
    }

    async fn display(&self, text: &str) {
        println!("{}", text);
    }
}
