use chrono::Duration as ChronoDuration;

use super::*;

fn session(timeout_secs: u64) -> Session {
    Session::new(InputMode::Voice, 3, Duration::from_secs(timeout_secs))
}

#[test]
fn test_history_is_bounded_fifo() {
    let mut history = CommandHistory::new(3);
    for i in 0..10 {
        history.push(format!("command {}", i), InputMode::Text);
        assert!(history.len() <= history.capacity());
    }
    let texts: Vec<_> = history.iter().map(|e| e.command_text.as_str()).collect();
    assert_eq!(texts, vec!["command 7", "command 8", "command 9"]);
    assert_eq!(history.last().map(|e| e.command_text.as_str()), Some("command 9"));
}

#[test]
fn test_history_recent() {
    let mut history = CommandHistory::new(10);
    for text in ["a", "b", "c"] {
        history.push(text, InputMode::Voice);
    }
    let recent: Vec<_> = history.recent(2).map(|e| e.command_text.as_str()).collect();
    assert_eq!(recent, vec!["b", "c"]);
    assert_eq!(history.recent(10).count(), 3);
}

#[test]
fn test_zero_capacity_still_holds_one() {
    let mut history = CommandHistory::new(0);
    history.push("a", InputMode::Text);
    history.push("b", InputMode::Text);
    assert_eq!(history.len(), 1);
}

#[test]
fn test_record_uses_current_mode() {
    let mut s = session(20);
    s.record("go to google.com");
    assert!(s.set_mode(InputMode::Text));
    s.record("help");
    let modes: Vec<_> = s.history().iter().map(|e| e.mode).collect();
    assert_eq!(modes, vec![InputMode::Voice, InputMode::Text]);
    assert!(!s.set_mode(InputMode::Text));
}

#[test]
fn test_confirmation_is_single_flight() {
    let mut s = session(20);
    let now = Utc::now();
    assert!(s.request_confirmation("exit", now));
    assert!(!s.request_confirmation("exit", now));
    assert_eq!(s.pending().map(|p| p.action.as_str()), Some("exit"));
}

#[test]
fn test_confirm_and_cancel() {
    let now = Utc::now();

    let mut s = session(20);
    s.request_confirmation("exit", now);
    assert!(matches!(s.resolve_pending("yes please", now), Some(ConfirmationReply::Confirmed(_))));
    assert!(s.pending().is_none());

    let mut s = session(20);
    s.request_confirmation("exit", now);
    assert!(matches!(s.resolve_pending("No.", now), Some(ConfirmationReply::Cancelled(_))));
    assert!(s.pending().is_none());
}

#[test]
fn test_repeated_exit_answers_the_pending_one() {
    let now = Utc::now();
    let mut s = session(20);
    s.request_confirmation("exit", now);
    assert!(matches!(s.resolve_pending("exit", now), Some(ConfirmationReply::Confirmed(_))));
}

#[test]
fn test_every_exit_phrase_confirms() {
    let now = Utc::now();
    for reply in ["goodbye", "Bye!", "close", "terminate", "shut down", "quit", "stop", "done"] {
        let mut s = session(20);
        s.request_confirmation("exit", now);
        assert!(
            matches!(s.resolve_pending(reply, now), Some(ConfirmationReply::Confirmed(_))),
            "'{}' should confirm the pending exit",
            reply
        );
        assert!(s.pending().is_none());
    }
}

#[test]
fn test_unclear_reply_keeps_pending() {
    let now = Utc::now();
    let mut s = session(20);
    s.request_confirmation("exit", now);
    assert_eq!(s.resolve_pending("what", now), Some(ConfirmationReply::Unclear));
    assert!(s.pending().is_some());
}

#[test]
fn test_expiry_is_checked_on_next_input() {
    let now = Utc::now();
    let mut s = session(20);
    s.request_confirmation("exit", now);

    let later = now + ChronoDuration::seconds(21);
    assert!(matches!(s.resolve_pending("yes", later), Some(ConfirmationReply::Expired(_))));
    assert!(s.pending().is_none());
}

#[test]
fn test_no_pending_resolves_to_none() {
    let mut s = session(20);
    assert_eq!(s.resolve_pending("yes", Utc::now()), None);
}

#[test]
fn test_reply_kind() {
    assert_eq!(reply_kind("Proceed"), Some(true));
    assert_eq!(reply_kind("cancel that"), Some(false));
    assert_eq!(reply_kind("don't"), Some(false));
    assert_eq!(reply_kind("never mind"), Some(false));
    assert_eq!(reply_kind("stop"), Some(true));
    assert_eq!(reply_kind("closet"), None);
    assert_eq!(reply_kind("go to google.com"), None);
    assert_eq!(reply_kind(""), None);
}
