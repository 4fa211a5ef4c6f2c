use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use webassist_config::InputMode;

use super::*;
use crate::testing::{FakeElement, FakePage, RecordingChannel, ScriptedProvider, engine};

fn assistant(
    page: Arc<FakePage>,
    channel: Arc<RecordingChannel>,
    provider: Option<Arc<ScriptedProvider>>,
    mode: InputMode,
) -> Assistant {
    let session = Session::new(mode, 50, Duration::from_secs(20));
    Assistant::new(engine(page, channel, provider), session)
}

fn text_assistant(page: Arc<FakePage>, channel: Arc<RecordingChannel>) -> Assistant {
    assistant(page, channel, None, InputMode::Text)
}

#[test]
fn test_literal_url() {
    assert_eq!(literal_url("example.org").as_deref(), Some("https://example.org"));
    assert_eq!(literal_url("https://a.b/c").as_deref(), Some("https://a.b/c"));
    assert_eq!(literal_url("redberyltest.in/#/signin").as_deref(), Some("https://redberyltest.in/#/signin"));
    assert_eq!(literal_url("hello world.com"), None);
    assert_eq!(literal_url("nodots"), None);
    assert_eq!(literal_url("a..b"), None);
}

#[tokio::test]
async fn test_email_and_password_scenario() {
    let page = FakePage::new()
        .at("https://www.redberyltest.in/#/signin")
        .with("#floating_outlined3", FakeElement::input())
        .with("#floating_outlined15", FakeElement::input())
        .with("#signInButton", FakeElement::new("button"))
        .arc();
    let channel = Arc::new(RecordingChannel::new(&[]));
    let mut assistant = text_assistant(page.clone(), channel.clone());

    let outcome = assistant
        .process("enter email user@example.com and password 12345")
        .await;

    assert_eq!(outcome, DispatchOutcome::Continue);
    assert_eq!(page.value_of("#floating_outlined3").as_deref(), Some("user@example.com"));
    assert_eq!(page.value_of("#floating_outlined15").as_deref(), Some("12345"));
    assert!(page.log().contains(&"click #signInButton".to_string()));
    assert_eq!(channel.spoken(), vec!["Logged in with the provided credentials"]);
    assert_eq!(assistant.session().history().len(), 1);
}

#[tokio::test]
async fn test_voice_exit_expires_and_processes_next_input() {
    let page = FakePage::new().titled("https://example.org", "Example Domain").arc();
    let channel = Arc::new(RecordingChannel::new(&[]));
    let mut assistant = assistant(page.clone(), channel.clone(), None, InputMode::Voice);
    let start = Utc::now();

    assert_eq!(assistant.process_at("exit", start).await, DispatchOutcome::Continue);
    assert!(assistant.session().pending().is_some());

    let later = start + ChronoDuration::seconds(21);
    let outcome = assistant.process_at("go to example.org", later).await;

    assert_eq!(outcome, DispatchOutcome::Continue);
    assert!(assistant.session().pending().is_none());
    assert_eq!(
        channel.spoken(),
        vec![
            "Are you sure you want to exit? Say yes to confirm or no to cancel.",
            "No confirmation received, exit cancelled",
            "Navigating to https://example.org",
            "Loaded: Example Domain",
        ]
    );
    assert_eq!(page.log(), vec!["goto https://example.org"]);
}

#[tokio::test]
async fn test_voice_exit_confirmed() {
    let channel = Arc::new(RecordingChannel::new(&[]));
    let mut assistant = assistant(FakePage::new().arc(), channel.clone(), None, InputMode::Voice);
    let start = Utc::now();

    assistant.process_at("exit", start).await;
    let outcome = assistant.process_at("yes", start + ChronoDuration::seconds(3)).await;

    assert_eq!(outcome, DispatchOutcome::Exit);
    assert_eq!(channel.spoken().last().map(String::as_str), Some("Goodbye!"));
}

#[tokio::test]
async fn test_saying_exit_twice_confirms() {
    let channel = Arc::new(RecordingChannel::new(&[]));
    let mut assistant = assistant(FakePage::new().arc(), channel.clone(), None, InputMode::Voice);
    let start = Utc::now();

    assistant.process_at("exit", start).await;
    assert_eq!(assistant.process_at("exit", start).await, DispatchOutcome::Exit);
}

#[tokio::test]
async fn test_any_exit_phrase_confirms_pending_exit() {
    for second in ["goodbye", "stop", "close", "terminate"] {
        let channel = Arc::new(RecordingChannel::new(&[]));
        let mut assistant = assistant(FakePage::new().arc(), channel.clone(), None, InputMode::Voice);
        let start = Utc::now();

        assistant.process_at("exit", start).await;
        let outcome = assistant.process_at(second, start + ChronoDuration::seconds(2)).await;

        assert_eq!(outcome, DispatchOutcome::Exit, "'{}' after 'exit'", second);
        assert!(!channel.said("Please say yes to confirm or no to cancel"));
        assert_eq!(channel.spoken().last().map(String::as_str), Some("Goodbye!"));
    }
}

#[tokio::test]
async fn test_voice_exit_cancelled_and_unclear() {
    let channel = Arc::new(RecordingChannel::new(&[]));
    let mut assistant = assistant(FakePage::new().arc(), channel.clone(), None, InputMode::Voice);
    let start = Utc::now();

    assistant.process_at("quit", start).await;
    assistant.process_at("maybe later", start).await;
    assert!(assistant.session().pending().is_some());
    assert!(channel.said("Please say yes to confirm or no to cancel"));

    assert_eq!(assistant.process_at("no", start).await, DispatchOutcome::Continue);
    assert!(assistant.session().pending().is_none());
    assert_eq!(channel.spoken().last().map(String::as_str), Some("Cancelled exit"));
}

#[tokio::test]
async fn test_text_mode_exits_immediately() {
    let channel = Arc::new(RecordingChannel::new(&[]));
    let mut assistant = text_assistant(FakePage::new().arc(), channel.clone());

    assert_eq!(assistant.process("quit").await, DispatchOutcome::Exit);
    assert_eq!(channel.spoken(), vec!["Goodbye!"]);
}

#[tokio::test]
async fn test_help_lists_commands() {
    let channel = Arc::new(RecordingChannel::new(&[]));
    let mut assistant = text_assistant(FakePage::new().arc(), channel.clone());

    assistant.process("help").await;

    assert!(channel.said("Here is what I can do"));
    assert!(channel.said("Available commands:"));
    assert!(assistant.session().history().is_empty());
}

#[tokio::test]
async fn test_mode_switch() {
    let channel = Arc::new(RecordingChannel::new(&[]));
    let mut assistant = text_assistant(FakePage::new().arc(), channel.clone());

    assistant.process("voice mode").await;
    assert_eq!(assistant.session().mode(), InputMode::Voice);
    assistant.process("switch to voice").await;
    assistant.process("text mode").await;

    assert_eq!(
        channel.spoken(),
        vec!["Switched to voice mode", "Already in voice mode", "Switched to text mode"]
    );
}

#[tokio::test]
async fn test_history_and_repeat() {
    let page = FakePage::new().titled("https://example.org", "Example Domain").arc();
    let channel = Arc::new(RecordingChannel::new(&[]));
    let mut assistant = text_assistant(page.clone(), channel.clone());

    assistant.process("history").await;
    assistant.process("repeat").await;
    assistant.process("go to example.org").await;
    assistant.process("show command history").await;
    assistant.process("repeat last command").await;

    let spoken = channel.spoken();
    assert_eq!(spoken[0], "No commands yet");
    assert_eq!(spoken[1], "There is no previous command to repeat");
    assert!(spoken.contains(&"Recent commands: go to example.org (text)".to_string()));
    assert!(spoken.contains(&"Repeating: go to example.org".to_string()));
    assert_eq!(page.log(), vec!["goto https://example.org", "goto https://example.org"]);
    assert_eq!(assistant.session().history().len(), 2);
}

#[tokio::test]
async fn test_bare_domain_is_opened() {
    let page = FakePage::new().titled("https://example.org", "Example Domain").arc();
    let channel = Arc::new(RecordingChannel::new(&[]));
    let mut assistant = text_assistant(page.clone(), channel.clone());

    assistant.process("example.org").await;

    assert_eq!(page.log(), vec!["goto https://example.org"]);
    assert_eq!(channel.spoken(), vec!["Loaded: Example Domain"]);
}

#[tokio::test]
async fn test_command_after_leading_words() {
    let page = FakePage::new().titled("https://example.com", "Example Domain").arc();
    let channel = Arc::new(RecordingChannel::new(&[]));
    let mut assistant = text_assistant(page.clone(), channel.clone());

    assert_eq!(assistant.process("please go to example.com").await, DispatchOutcome::Continue);

    assert_eq!(page.log(), vec!["goto https://example.com"]);
    assert!(!channel.spoken().iter().any(|s| s.starts_with("Sorry")));
    assert_eq!(channel.spoken().last().map(String::as_str), Some("Loaded: Example Domain"));
}

#[tokio::test]
async fn test_unrecognized_command() {
    let channel = Arc::new(RecordingChannel::new(&[]));
    let mut assistant = text_assistant(FakePage::new().arc(), channel.clone());

    assert_eq!(assistant.process("xyzzy plugh").await, DispatchOutcome::Continue);
    assert_eq!(channel.spoken(), vec!["Sorry, I could not understand: 'xyzzy plugh'"]);
}

#[tokio::test]
async fn test_empty_input_is_ignored() {
    let channel = Arc::new(RecordingChannel::new(&[]));
    let mut assistant = text_assistant(FakePage::new().arc(), channel.clone());

    assert_eq!(assistant.process("   ").await, DispatchOutcome::Continue);
    assert!(channel.spoken().is_empty());
    assert!(assistant.session().history().is_empty());
}

#[tokio::test]
async fn test_unknown_command_goes_to_planner() {
    let page = FakePage::new().titled("https://example.org", "Example Domain").arc();
    let channel = Arc::new(RecordingChannel::new(&[]));
    let provider = Arc::new(ScriptedProvider::replying(&[
        r#"{"actions": [{"type": "navigate", "url": "https://example.org", "purpose": "open the page"}], "confidence": 0.9}"#,
    ]));
    let mut assistant = assistant(page.clone(), channel.clone(), Some(provider.clone()), InputMode::Text);

    assistant.process("xyzzy plugh").await;

    assert_eq!(provider.calls(), 1);
    assert!(provider.prompts()[0].contains("xyzzy plugh"));
    assert_eq!(page.log(), vec!["goto https://example.org"]);
    assert_eq!(channel.spoken(), vec!["Navigated to https://example.org"]);
}

#[tokio::test]
async fn test_run_stops_when_input_closes() {
    let channel = Arc::new(RecordingChannel::new(&["help", "voice mode"]));
    let mut assistant = text_assistant(FakePage::new().arc(), channel.clone());

    assistant.run().await;

    let spoken = channel.spoken();
    assert!(spoken[0].starts_with("Web assistant ready in text mode"));
    assert_eq!(spoken.last().map(String::as_str), Some("Switched to voice mode"));
}

#[tokio::test]
async fn test_run_stops_on_exit() {
    let channel = Arc::new(RecordingChannel::new(&["exit", "help"]));
    let mut assistant = text_assistant(FakePage::new().arc(), channel.clone());

    assistant.run().await;

    assert_eq!(channel.spoken().last().map(String::as_str), Some("Goodbye!"));
    assert!(!channel.said("Here is what I can do"));
}
