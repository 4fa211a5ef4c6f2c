use std::time::Duration;

use serde_json::json;

use super::*;
use crate::testing::{FakeElement, FakePage};

fn policy() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        base_delay: Duration::from_millis(1),
        element_timeout: Duration::from_millis(10),
        navigation_timeout: Duration::from_millis(50),
        settle: Duration::ZERO,
    }
}

fn candidates(selectors: &[&str]) -> SelectorCandidateSet {
    SelectorCandidateSet::from_raw(selectors.iter().copied())
}

#[test]
fn test_linear_backoff() {
    let policy = RetryPolicy {
        base_delay: Duration::from_millis(1000),
        ..policy()
    };
    assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(1000));
    assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(3000));
}

#[test]
fn test_policy_from_config() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_retries, 3);
    assert_eq!(policy.base_delay, Duration::from_secs(1));
    assert_eq!(policy.element_timeout, Duration::from_secs(10));
}

#[tokio::test]
async fn test_click_first_live_candidate() {
    let page = FakePage::new().with("#b", FakeElement::new("button")).arc();
    let executor = ActionExecutor::new(page.clone(), policy());

    let outcome = executor
        .execute(&Action::click("next button"), &candidates(&["#a", "#b"]), None)
        .await
        .unwrap();

    assert_eq!(outcome.selector.as_deref(), Some("#b"));
    assert_eq!(outcome.message, "Clicked next button");
    assert_eq!(page.log(), vec!["click #b"]);
    // "#a" was retried three times before moving on.
    assert_eq!(page.queries().iter().filter(|q| *q == "#a").count(), 3);
}

#[tokio::test]
async fn test_fill_clears_then_verifies() {
    let page = FakePage::new().with("#email", FakeElement::input()).arc();
    let executor = ActionExecutor::new(page.clone(), policy());

    executor
        .execute(&Action::type_text("email field", "user@example.com"), &candidates(&["#email"]), None)
        .await
        .unwrap();

    assert_eq!(page.log(), vec!["fill #email=", "fill #email=user@example.com"]);
    assert_eq!(page.value_of("#email").as_deref(), Some("user@example.com"));
}

#[tokio::test]
async fn test_fill_is_idempotent() {
    let page = FakePage::new().with("#name", FakeElement::input()).arc();
    let executor = ActionExecutor::new(page.clone(), policy());
    let action = Action::type_text("name", "Acme");

    executor.execute(&action, &candidates(&["#name"]), None).await.unwrap();
    executor.execute(&action, &candidates(&["#name"]), None).await.unwrap();
    assert_eq!(page.value_of("#name").as_deref(), Some("Acme"));
}

#[tokio::test]
async fn test_fill_that_does_not_stick_is_an_action_failure() {
    let page = FakePage::new()
        .with("#zip", FakeElement::input().ignoring_fill())
        .arc();
    let executor = ActionExecutor::new(page.clone(), policy());

    let err = executor
        .execute(&Action::type_text("zip code field", "12345"), &candidates(&["#zip"]), None)
        .await
        .unwrap_err();

    assert!(matches!(err, AutomationError::Action { .. }));
    assert_eq!(err.spoken(), "Could not fill zip code field");
    assert_eq!(page.log().iter().filter(|l| l.ends_with("=12345")).count(), 3);
}

#[tokio::test]
async fn test_rejected_click_reports_action_failure() {
    let page = FakePage::new()
        .with("#submit", FakeElement::new("button").rejecting())
        .arc();
    let executor = ActionExecutor::new(page, policy());

    let err = executor
        .execute(&Action::click("submit button"), &candidates(&["#submit"]), None)
        .await
        .unwrap_err();
    assert_eq!(err.spoken(), "Could not click submit button");
}

#[tokio::test]
async fn test_hidden_element_is_a_resolution_failure() {
    let page = FakePage::new().with("#x", FakeElement::new("div").hidden()).arc();
    let executor = ActionExecutor::new(page, policy());

    let err = executor
        .execute(&Action::click("x"), &candidates(&["#x"]), None)
        .await
        .unwrap_err();
    assert_eq!(err, AutomationError::Resolution("x".to_string()));
}

#[tokio::test]
async fn test_dom_search_runs_after_candidates_fail() {
    let page = FakePage::new()
        .on_evaluate(|_, args| json!({"success": args.first() == Some(&json!("Organizer"))}))
        .arc();
    let executor = ActionExecutor::new(page.clone(), policy());
    let search = DomSearch::open_dropdown("Organizer", &["Organizer"], None);

    let outcome = executor
        .execute(&Action::click("organizer dropdown"), &candidates(&["#Organizer"]), Some(&search))
        .await
        .unwrap();

    assert!(outcome.used_dom_search);
    assert_eq!(outcome.selector, None);
    assert_eq!(page.evaluations().len(), 1);
}

#[tokio::test]
async fn test_dom_search_false_surfaces_resolution() {
    let page = FakePage::new().arc();
    let executor = ActionExecutor::new(page.clone(), policy());
    let search = DomSearch::open_dropdown("Organizer", &["Organizer"], None);

    let err = executor
        .execute(&Action::click("organizer dropdown"), &candidates(&[]), Some(&search))
        .await
        .unwrap_err();

    assert_eq!(err.spoken(), "Could not find organizer dropdown");
    assert_eq!(page.evaluations().len(), 1);
}

#[tokio::test]
async fn test_select_on_native_select() {
    let page = FakePage::new().with("#state", FakeElement::new("select")).arc();
    let executor = ActionExecutor::new(page.clone(), policy());
    let action = Action::new(ActionKind::Select, "state dropdown").with_value("Texas");

    let outcome = executor.execute(&action, &candidates(&["#state"]), None).await.unwrap();
    assert_eq!(page.log(), vec!["select #state=Texas"]);
    assert_eq!(outcome.message, "Selected Texas in state dropdown");
}

#[tokio::test]
async fn test_select_on_custom_dropdown_clicks_item() {
    let page = FakePage::new()
        .with("#entity", FakeElement::new("div"))
        .on_evaluate(|_, args| json!(args.first() == Some(&json!("LLC"))))
        .arc();
    let executor = ActionExecutor::new(page.clone(), policy());
    let action = Action::new(ActionKind::Select, "entity type dropdown").with_value("LLC");

    executor.execute(&action, &candidates(&["#entity"]), None).await.unwrap();
    assert_eq!(page.log(), vec!["click #entity"]);
    assert_eq!(page.evaluations()[0].1, vec![json!("LLC")]);
}

#[tokio::test]
async fn test_navigate_failure() {
    let page = FakePage::new().failing("https://down.example").arc();
    let executor = ActionExecutor::new(page, policy());

    let err = executor
        .execute_action(&Action::navigate("https://down.example"))
        .await
        .unwrap_err();
    assert_eq!(err.spoken(), "Failed to navigate to https://down.example");
}

#[tokio::test]
async fn test_execute_action_filters_planner_selectors() {
    let page = FakePage::new()
        .with("tr[id=\"123\"]", FakeElement::new("tr"))
        .arc();
    let executor = ActionExecutor::new(page.clone(), policy());
    let action = Action::click("row")
        .with_selector("tr#123")
        .with_fallbacks(vec!["((".to_string()]);

    let outcome = executor.execute_action(&action).await.unwrap();
    assert_eq!(outcome.selector.as_deref(), Some("tr[id=\"123\"]"));
    assert!(!page.queries().iter().any(|q| q == "(("));
}

#[tokio::test]
async fn test_wait_uses_value_in_ms() {
    let executor = ActionExecutor::new(FakePage::new().arc(), policy());
    let outcome = executor
        .execute_action(&Action::new(ActionKind::Wait, "pause").with_value("5"))
        .await
        .unwrap();
    assert_eq!(outcome.message, "Waited 5 ms");
}
