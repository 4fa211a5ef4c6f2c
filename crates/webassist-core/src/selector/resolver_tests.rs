use std::sync::Arc;

use super::*;
use crate::testing::{FakeElement, FakePage, ScriptedProvider, planner};

#[test]
fn test_target_infers_kind() {
    let target = Target::new("the organizer dropdown");
    assert_eq!(target.kind, Some(TargetKind::OrganizerDropdown));
    assert_eq!(Target::new("Next").kind, None);
    assert_eq!(Target::of_kind(TargetKind::Email).description, "email field");
}

#[test]
fn test_curated_puts_preferred_first() {
    let target = Target::of_kind(TargetKind::LoginButton).prefer(["#custom-login", "#123"]);
    let set = SelectorResolver::curated(&target);
    assert_eq!(set.as_slice()[0], "#custom-login");
    assert_eq!(set.as_slice()[1], "[id=\"123\"]");
    assert!(set.contains("#signInButton"));
}

#[test]
fn test_tier_ordering() {
    assert!(Tier::Curated < Tier::Heuristic);
    assert!(Tier::Suggested < Tier::DomSearch);
    assert_eq!(Tier::Heuristic.to_string(), "tier 2 (heuristic)");
}

#[tokio::test]
async fn test_curated_hit_skips_later_tiers() {
    let page = FakePage::new().with("#signInButton", FakeElement::new("button")).arc();
    let provider = Arc::new(ScriptedProvider::replying(&["[\"#never\"]"]));
    let resolver = SelectorResolver::new(page.clone(), Some(planner(provider.clone())));

    let target = Target::of_kind(TargetKind::LoginButton);
    let resolution = resolver.resolve(&target, ActionKind::Click, None).await.unwrap();

    assert_eq!(resolution.tier, Tier::Curated);
    assert_eq!(resolution.candidates.as_slice(), &["#signInButton"]);
    assert_eq!(provider.calls(), 0);

    let curated = TargetKind::LoginButton.selectors();
    let heuristic_only: Vec<String> = heuristic_selectors(&target.description, ActionKind::Click)
        .into_iter()
        .filter(|s| !curated.contains(&s.as_str()))
        .collect();
    assert!(!heuristic_only.is_empty());
    let queries = page.queries();
    for selector in &heuristic_only {
        assert!(!queries.contains(selector), "tier 2 selector queried: {}", selector);
    }
    assert!(page.evaluations().is_empty());
}

#[tokio::test]
async fn test_heuristic_tier_when_curated_misses() {
    let page = FakePage::new()
        .with("button:has-text(\"Next\")", FakeElement::new("button"))
        .arc();
    let resolver = SelectorResolver::new(page.clone(), None);

    let resolution = resolver
        .resolve(&Target::new("Next"), ActionKind::Click, None)
        .await
        .unwrap();

    assert_eq!(resolution.tier, Tier::Heuristic);
    assert_eq!(resolution.candidates.as_slice(), &["button:has-text(\"Next\")"]);
}

#[tokio::test]
async fn test_suggested_tier_filters_and_probes() {
    let page = FakePage::new()
        .with("div.wizard > button.primary", FakeElement::new("button"))
        .arc();
    let provider = Arc::new(ScriptedProvider::replying(&[
        r##"["123abc", "div.wizard > button.primary", "#missing"]"##,
    ]));
    let resolver = SelectorResolver::new(page.clone(), Some(planner(provider.clone())));

    let resolution = resolver
        .resolve(&Target::new("continue"), ActionKind::Click, Some("it is blue"))
        .await
        .unwrap();

    assert_eq!(resolution.tier, Tier::Suggested);
    assert_eq!(resolution.candidates.as_slice(), &["div.wizard > button.primary"]);
    assert_eq!(provider.calls(), 1);
    assert!(provider.prompts()[0].contains("it is blue"));
    // The malformed suggestion never reached the page.
    assert!(!page.queries().iter().any(|q| q == "123abc"));
}

#[tokio::test]
async fn test_exhausted_tiers_report_description() {
    let page = FakePage::new().arc();
    let provider = Arc::new(ScriptedProvider::replying(&["[]"]));
    let resolver = SelectorResolver::new(page, Some(planner(provider)));

    let err = resolver
        .resolve(&Target::of_kind(TargetKind::OrganizerDropdown), ActionKind::Select, None)
        .await
        .unwrap_err();

    assert_eq!(err, AutomationError::Resolution("organizer dropdown".to_string()));
    assert_eq!(err.spoken(), "Could not find organizer dropdown");
}

#[tokio::test]
async fn test_hidden_element_still_counts_as_present() {
    let page = FakePage::new()
        .with("#floating_outlined3", FakeElement::input().hidden())
        .arc();
    let resolver = SelectorResolver::new(page, None);

    let resolution = resolver
        .resolve(&Target::of_kind(TargetKind::Email), ActionKind::Type, None)
        .await
        .unwrap();
    assert_eq!(resolution.tier, Tier::Curated);
}
