//! Per-session state: input mode, command history and the voice-mode
//! confirmation gate.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use webassist_config::{Config, InputMode};

use crate::command::Intent;
use crate::phrases;

const CONFIRM_WORDS: &[&str] = &[
    "yes", "y", "yeah", "yep", "sure", "ok", "okay", "confirm", "proceed",
];
const CANCEL_WORDS: &[&str] = &["no", "n", "nope", "cancel", "abort", "don't", "never"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub command_text: String,
    pub mode: InputMode,
}

/// Bounded FIFO of dispatched commands.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl CommandHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, command_text: impl Into<String>, mode: InputMode) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            timestamp: Utc::now(),
            command_text: command_text.into(),
            mode,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Up to `n` most recent entries, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

/// An action waiting for a spoken yes or no.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConfirmation {
    pub action: String,
    pub requested_at: DateTime<Utc>,
    pub timeout: Duration,
}

impl PendingConfirmation {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let elapsed = (now - self.requested_at).to_std().unwrap_or(Duration::ZERO);
        elapsed >= self.timeout
    }
}

/// How an input resolved the pending confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationReply {
    Confirmed(PendingConfirmation),
    Cancelled(PendingConfirmation),
    /// Timed out before this input; the input is a normal command.
    Expired(PendingConfirmation),
    /// Neither yes nor no; still pending.
    Unclear,
}

/// Classify a reply to a confirmation prompt.
///
/// Any exit phrase (including "stop") repeats the pending exit and so
/// confirms it.
pub fn reply_kind(input: &str) -> Option<bool> {
    let lower = input
        .trim()
        .trim_end_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    let first = lower
        .split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .unwrap_or("");
    if CANCEL_WORDS.contains(&first) {
        Some(false)
    } else if CONFIRM_WORDS.contains(&first) {
        Some(true)
    } else if matches!(phrases::leading_phrase(&lower), Some((Intent::Exit, _))) {
        Some(true)
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    mode: InputMode,
    history: CommandHistory,
    pending: Option<PendingConfirmation>,
    confirmation_timeout: Duration,
}

impl Session {
    pub fn new(mode: InputMode, max_history: usize, confirmation_timeout: Duration) -> Self {
        Self {
            mode,
            history: CommandHistory::new(max_history),
            pending: None,
            confirmation_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.voice.initial_mode,
            config.automation.max_history,
            Duration::from_secs(config.automation.confirmation_timeout_seconds),
        )
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Returns false when already in `mode`.
    pub fn set_mode(&mut self, mode: InputMode) -> bool {
        if self.mode == mode {
            return false;
        }
        debug!("Input mode {} -> {}", self.mode, mode);
        self.mode = mode;
        true
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn record(&mut self, command_text: impl Into<String>) {
        let mode = self.mode;
        self.history.push(command_text, mode);
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    /// Open the confirmation gate. At most one confirmation is live;
    /// returns false if one already is.
    pub fn request_confirmation(&mut self, action: impl Into<String>, now: DateTime<Utc>) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(PendingConfirmation {
            action: action.into(),
            requested_at: now,
            timeout: self.confirmation_timeout,
        });
        true
    }

    /// Resolve the pending confirmation against the next input. Expiry is
    /// only noticed here, when input arrives.
    pub fn resolve_pending(&mut self, input: &str, now: DateTime<Utc>) -> Option<ConfirmationReply> {
        let pending = self.pending.take()?;
        if pending.is_expired(now) {
            return Some(ConfirmationReply::Expired(pending));
        }
        let reply = match reply_kind(input) {
            Some(true) => ConfirmationReply::Confirmed(pending),
            Some(false) => ConfirmationReply::Cancelled(pending),
            None => {
                self.pending = Some(pending);
                ConfirmationReply::Unclear
            }
        };
        Some(reply)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
