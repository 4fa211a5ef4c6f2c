use super::*;
use crate::normalizer::normalize;

fn classify(text: &str) -> Command {
    CommandClassifier::default().classify(&normalize(text))
}

#[test]
fn test_email_and_password_is_form_filling() {
    let cmd = classify("enter email user@example.com and password 12345");
    assert_eq!(cmd.intent, Intent::FormFilling);
    assert_eq!(cmd.param("email"), Some("user@example.com"));
    assert_eq!(cmd.param("password"), Some("12345"));
}

#[test]
fn test_navigation_with_corrected_domain() {
    let cmd = classify("go to red berry test.in/signup");
    assert_eq!(cmd.intent, Intent::Navigation);
    assert_eq!(cmd.param("url"), Some("https://redberyltest.in/signup"));
}

#[test]
fn test_navigation_bare_word() {
    let cmd = classify("open google");
    assert_eq!(cmd.intent, Intent::Navigation);
    assert_eq!(cmd.param("url"), Some("https://www.google.com"));
}

#[test]
fn test_navigation_explicit_scheme_kept() {
    let cmd = classify("navigate to http://localhost:8080/app");
    assert_eq!(cmd.param("url"), Some("http://localhost:8080/app"));
}

#[test]
fn test_navigation_phrase_without_url() {
    let cmd = classify("go to the billing page");
    assert_eq!(cmd.intent, Intent::Navigation);
    assert_eq!(cmd.target, "the billing page");
    assert_eq!(cmd.param("url"), None);
}

#[test]
fn test_login_button_beats_click() {
    let cmd = classify("click login button");
    assert_eq!(cmd.intent, Intent::Login);
    assert!(cmd.param("email").is_none());
}

#[test]
fn test_plain_login() {
    assert_eq!(classify("login").intent, Intent::Login);
    assert_eq!(classify("sign in").intent, Intent::Login);
    assert_eq!(classify("signin").intent, Intent::Login);
}

#[test]
fn test_login_with_credentials() {
    let cmd = classify("login with email jane@corp.io and password Pa55");
    assert_eq!(cmd.intent, Intent::Login);
    assert_eq!(cmd.param("email"), Some("jane@corp.io"));
    assert_eq!(cmd.param("password"), Some("Pa55"));

    let cmd = classify("log in with jane@corp.io and password Pa55");
    assert_eq!(cmd.param("email"), Some("jane@corp.io"));
    assert_eq!(cmd.param("password"), Some("Pa55"));
}

#[test]
fn test_login_credentials_with_misheard_words() {
    let cmd = classify("login wth email jane@corp.io and oassword Pa55");
    assert_eq!(cmd.intent, Intent::Login);
    assert_eq!(cmd.param("password"), Some("Pa55"));
}

#[test]
fn test_single_email() {
    let cmd = classify("enter email jane@corp.io");
    assert_eq!(cmd.intent, Intent::FormFilling);
    assert_eq!(cmd.param("email"), Some("jane@corp.io"));
    assert_eq!(cmd.param("password"), None);
}

#[test]
fn test_single_password_keeps_case() {
    let cmd = classify("type password S3cr3T");
    assert_eq!(cmd.intent, Intent::FormFilling);
    assert_eq!(cmd.param("password"), Some("S3cr3T"));
}

#[test]
fn test_generic_fill_into_field() {
    let cmd = classify("enter 123 Main Street in address line 1");
    assert_eq!(cmd.intent, Intent::FormFilling);
    assert_eq!(cmd.param("value"), Some("123 Main Street"));
    assert_eq!(cmd.param("field"), Some("address line 1"));

    let cmd = classify("put Acme Ventures as llc name field");
    assert_eq!(cmd.param("value"), Some("Acme Ventures"));
    assert_eq!(cmd.param("field"), Some("llc name"));
}

#[test]
fn test_fill_with() {
    let cmd = classify("fill first name with Alice");
    assert_eq!(cmd.param("field"), Some("first name"));
    assert_eq!(cmd.param("value"), Some("Alice"));
}

#[test]
fn test_row_assignment_is_not_a_field_fill() {
    let cmd = classify("set row 2 to manager");
    assert_eq!(cmd.intent, Intent::Click);
    assert_eq!(cmd.param("row"), Some("2"));
    assert_eq!(cmd.param("option"), Some("manager"));
    assert_eq!(cmd.param("field"), None);

    assert_eq!(classify("set city to Austin").intent, Intent::FormFilling);
}

#[test]
fn test_click_element() {
    let cmd = classify("click on the submit button");
    assert_eq!(cmd.intent, Intent::Click);
    assert_eq!(cmd.param("element"), Some("submit button"));
}

#[test]
fn test_search_query() {
    let cmd = classify("search for registered agent");
    assert_eq!(cmd.intent, Intent::Search);
    assert_eq!(cmd.param("query"), Some("registered agent"));
}

#[test]
fn test_help_exit_and_mode() {
    assert_eq!(classify("help").intent, Intent::Help);
    assert_eq!(classify("what can you do").intent, Intent::Help);
    assert_eq!(classify("exit").intent, Intent::Exit);
    assert_eq!(classify("quit").intent, Intent::Exit);

    let cmd = classify("switch to voice mode");
    assert_eq!(cmd.intent, Intent::ModeSwitch);
    assert_eq!(cmd.param("mode"), Some("voice"));
    assert_eq!(classify("text").param("mode"), Some("text"));
}

#[test]
fn test_exit_requires_exact_phrase() {
    assert_ne!(classify("close the dialog").intent, Intent::Exit);
}

#[test]
fn test_fuzzy_fallback() {
    let cmd = classify("serach registered agent");
    assert_eq!(cmd.intent, Intent::Search);
    assert!(cmd.confidence >= DEFAULT_FUZZY_THRESHOLD && cmd.confidence < 1.0);
    assert_eq!(cmd.param("query"), Some("registered agent"));
}

#[test]
fn test_phrase_after_leading_words() {
    let cmd = classify("can you navigate to example.com");
    assert_eq!(cmd.intent, Intent::Navigation);
    assert_eq!(cmd.target, "example.com");
    assert_eq!(cmd.param("url"), Some("https://example.com"));
    assert_eq!(cmd.confidence, 1.0);

    let cmd = classify("please go to example.com");
    assert_eq!(cmd.intent, Intent::Navigation);
    assert_eq!(cmd.param("url"), Some("https://example.com"));
    assert!(cmd.text.starts_with("please"));

    let cmd = classify("i would like to search for registered agent");
    assert_eq!(cmd.intent, Intent::Search);
    assert_eq!(cmd.param("query"), Some("registered agent"));
}

#[test]
fn test_inner_phrase_never_exits() {
    assert_ne!(classify("please close the dialog").intent, Intent::Exit);
    assert_ne!(classify("we are done").intent, Intent::Exit);
}

#[test]
fn test_fuzzy_target_follows_matched_word() {
    let cmd = classify("plese navigatte to example.com");
    assert_eq!(cmd.intent, Intent::Navigation);
    assert_eq!(cmd.target, "example.com");
    assert_eq!(cmd.param("url"), Some("https://example.com"));
}

#[test]
fn test_fuzzy_respects_threshold() {
    let strict = CommandClassifier::new(0.95);
    assert_eq!(strict.classify("serach registered agent").intent, Intent::Unknown);
}

#[test]
fn test_unknown() {
    let cmd = classify("purple monkey dishwasher");
    assert_eq!(cmd.intent, Intent::Unknown);
    assert_eq!(cmd.confidence, 0.0);
    assert_eq!(classify("").intent, Intent::Unknown);
}

#[test]
fn test_target_to_url() {
    assert_eq!(target_to_url("example.com."), Some("https://example.com".to_string()));
    assert_eq!(target_to_url("GitHub"), Some("https://www.github.com".to_string()));
    assert_eq!(target_to_url("two words"), None);
    assert_eq!(target_to_url(""), None);
}
