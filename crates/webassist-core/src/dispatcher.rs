//! Top-level command pipeline.
//!
//! raw input -> confirmation gate -> meta commands -> normalize ->
//! classify -> handlers -> literal URL -> planner -> "could not
//! understand". One command runs to completion before the next is read.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};
use webassist_config::InputMode;
use webassist_protocols::ChannelError;

use crate::classifier::CommandClassifier;
use crate::command::{Command, Intent};
use crate::engine::Engine;
use crate::handlers::{HandlerContext, HandlerRegistry};
use crate::normalizer::normalize;
use crate::session::{ConfirmationReply, Session};

/// How many history entries "show history" reads out.
const HISTORY_SPOKEN: usize = 5;

pub const HELP_TEXT: &str = "\
Available commands:
  Navigation:  go to <website>, open <url>, search for <query>
  Login:       login with email <email> and password <password>
  Forms:       enter email <email>, enter password <password>
               enter <value> in <field>, enter <value> as LLC name
  Selection:   select LLC, select state <name>, select county <name>
               open state dropdown, filter dropdown for <text>
  Business:    open business purpose dropdown, select business purpose <name>
  Members:     select member named <name>, set row <n> to manager
               add member, add organizer, open organizer dropdown
  Products:    check product <name>, check all products
  Clicking:    click <element>, click <name> tab
  Session:     help, history, repeat, voice mode, text mode, exit";

static HISTORY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:show\s+)?(?:command\s+)?history$|^previous\s+commands$")
        .expect("history pattern must compile")
});
static REPEAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:repeat(?:\s+(?:the\s+)?last(?:\s+command)?)?|again|do\s+(?:that|it)\s+again)$")
        .expect("repeat pattern must compile")
});

/// Result of processing one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Continue,
    Exit,
}

/// A bare domain or URL typed on its own.
pub fn literal_url(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || text.contains(char::is_whitespace) || !text.contains('.') {
        return None;
    }
    if text.starts_with("http://") || text.starts_with("https://") {
        return Some(text.to_string());
    }
    let host = text.split(['/', '#', '?']).next().unwrap_or_default();
    let labels_ok = host
        .split('.')
        .all(|label| !label.is_empty() && label.chars().all(|c| c.is_alphanumeric() || c == '-'));
    labels_ok.then(|| format!("https://{}", text))
}

pub struct Assistant {
    engine: Engine,
    registry: HandlerRegistry,
    classifier: CommandClassifier,
    session: Session,
}

impl Assistant {
    pub fn new(engine: Engine, session: Session) -> Self {
        let classifier = CommandClassifier::new(engine.config().fuzzy_threshold);
        Self {
            engine,
            registry: HandlerRegistry::with_defaults(),
            classifier,
            session,
        }
    }

    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read and process commands until exit or until the channel closes.
    pub async fn run(&mut self) {
        self.engine
            .speak(&format!(
                "Web assistant ready in {} mode. Say or type 'help' for commands.",
                self.session.mode()
            ))
            .await;

        loop {
            let input = match self.engine.listen().await {
                Ok(input) => input,
                Err(ChannelError::Closed) => {
                    info!("Input channel closed");
                    break;
                }
                Err(e) => {
                    warn!("Listen failed: {}", e);
                    continue;
                }
            };
            if self.process(&input).await == DispatchOutcome::Exit {
                break;
            }
        }
    }

    pub async fn process(&mut self, raw: &str) -> DispatchOutcome {
        self.process_at(raw, Utc::now()).await
    }

    /// Process one input as if it arrived at `now`.
    pub async fn process_at(&mut self, raw: &str, now: DateTime<Utc>) -> DispatchOutcome {
        let raw = raw.trim();
        if raw.is_empty() {
            debug!("Nothing recognized");
            return DispatchOutcome::Continue;
        }
        info!("Input ({}): {}", self.session.mode(), raw);

        match self.session.resolve_pending(raw, now) {
            Some(ConfirmationReply::Confirmed(pending)) => {
                info!("Confirmed pending '{}'", pending.action);
                self.engine.speak("Goodbye!").await;
                return DispatchOutcome::Exit;
            }
            Some(ConfirmationReply::Cancelled(pending)) => {
                self.engine.speak(&format!("Cancelled {}", pending.action)).await;
                return DispatchOutcome::Continue;
            }
            Some(ConfirmationReply::Unclear) => {
                self.engine.speak("Please say yes to confirm or no to cancel").await;
                return DispatchOutcome::Continue;
            }
            Some(ConfirmationReply::Expired(pending)) => {
                info!("Confirmation for '{}' expired", pending.action);
                self.engine
                    .speak(&format!("No confirmation received, {} cancelled", pending.action))
                    .await;
            }
            None => {}
        }

        let normalized = normalize(raw);
        if normalized != raw {
            debug!("Normalized '{}' to '{}'", raw, normalized);
        }

        if HISTORY.is_match(&normalized) {
            self.speak_history().await;
            return DispatchOutcome::Continue;
        }
        if REPEAT.is_match(&normalized) {
            let Some(last) = self.session.history().last().map(|e| e.command_text.clone()) else {
                self.engine.speak("There is no previous command to repeat").await;
                return DispatchOutcome::Continue;
            };
            self.engine.speak(&format!("Repeating: {}", last)).await;
            let command = self.classifier.classify(&last);
            return self.execute(command, now).await;
        }

        let command = self.classifier.classify(&normalized);
        debug!(
            "Classified as {} (confidence {:.2}, target '{}')",
            command.intent, command.confidence, command.target
        );
        self.execute(command, now).await
    }

    async fn execute(&mut self, command: Command, now: DateTime<Utc>) -> DispatchOutcome {
        match command.intent {
            Intent::Exit => return self.exit(now).await,
            Intent::Help => {
                self.engine.speak("Here is what I can do").await;
                self.engine.display(HELP_TEXT).await;
                return DispatchOutcome::Continue;
            }
            Intent::ModeSwitch => {
                self.switch_mode(&command).await;
                return DispatchOutcome::Continue;
            }
            _ => {}
        }

        self.session.record(command.text.clone());

        let ctx = HandlerContext {
            engine: &self.engine,
            session: &self.session,
        };
        if self.registry.dispatch(&command, &ctx).await.is_some() {
            return DispatchOutcome::Continue;
        }

        if let Some(url) = literal_url(&command.text) {
            info!("Treating '{}' as a URL", command.text);
            match self.engine.navigate(&url).await {
                Ok(_) => {
                    let title = self.engine.title().await;
                    self.engine.speak(&format!("Loaded: {}", title)).await;
                }
                Err(e) => self.engine.speak(&e.spoken()).await,
            }
            return DispatchOutcome::Continue;
        }

        if self.engine.has_planner() {
            match self.engine.plan_and_execute(&command.text).await {
                Ok(outcomes) => {
                    let message = outcomes
                        .last()
                        .map(|o| o.message.clone())
                        .unwrap_or_else(|| "Done".to_string());
                    self.engine.speak(&message).await;
                    return DispatchOutcome::Continue;
                }
                Err(e) => debug!("Planner could not handle '{}': {}", command.text, e),
            }
        }

        self.engine
            .speak(&format!("Sorry, I could not understand: '{}'", command.text))
            .await;
        DispatchOutcome::Continue
    }

    async fn exit(&mut self, now: DateTime<Utc>) -> DispatchOutcome {
        if self.session.mode() == InputMode::Voice {
            if self.session.request_confirmation("exit", now) {
                self.engine
                    .speak("Are you sure you want to exit? Say yes to confirm or no to cancel.")
                    .await;
            }
            return DispatchOutcome::Continue;
        }
        self.engine.speak("Goodbye!").await;
        DispatchOutcome::Exit
    }

    async fn switch_mode(&mut self, command: &Command) {
        let mode = match command.param("mode").map(str::parse::<InputMode>) {
            Some(Ok(mode)) => mode,
            _ => {
                self.engine.speak("Say 'voice mode' or 'text mode'").await;
                return;
            }
        };
        if self.session.set_mode(mode) {
            self.engine.speak(&format!("Switched to {} mode", mode)).await;
        } else {
            self.engine.speak(&format!("Already in {} mode", mode)).await;
        }
    }

    async fn speak_history(&self) {
        let history = self.session.history();
        if history.is_empty() {
            self.engine.speak("No commands yet").await;
            return;
        }
        let recent: Vec<String> = history
            .recent(HISTORY_SPOKEN)
            .map(|e| format!("{} ({})", e.command_text, e.mode))
            .collect();
        self.engine
            .speak(&format!("Recent commands: {}", recent.join("; ")))
            .await;
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
