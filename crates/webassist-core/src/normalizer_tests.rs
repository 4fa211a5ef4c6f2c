use super::*;

#[test]
fn test_domain_correction_spoken_form() {
    assert_eq!(
        normalize("go to red berry test.in/signup"),
        "go to redberyltest.in/signup"
    );
}

#[test]
fn test_domain_correction_without_tld() {
    assert_eq!(normalize("open red beryl test"), "go to redberyltest.in");
    assert_eq!(normalize("go to redberyltest"), "go to redberyltest.in");
}

#[test]
fn test_domain_correction_is_case_insensitive() {
    assert_eq!(normalize("go to Red Bus.in"), "go to redberyltest.in");
}

#[test]
fn test_canonical_domain_is_stable() {
    assert_eq!(
        normalize("go to https://www.redberyltest.in/#/signin"),
        "go to https://www.redberyltest.in/#/signin"
    );
}

#[test]
fn test_word_corrections() {
    assert_eq!(
        normalize("enter oassword Secret1"),
        "enter password Secret1"
    );
    assert_eq!(normalize("clcik the login buttn"), "click the login button");
    assert_eq!(normalize("serch for state Florida"), "search for state Florida");
}

#[test]
fn test_word_correction_is_whole_token() {
    assert_eq!(normalize("select statement"), "select statement");
    assert_eq!(normalize("select stat"), "select state");
}

#[test]
fn test_word_correction_skips_urls_and_emails() {
    assert_eq!(
        normalize("go to example.com/signin"),
        "go to example.com/signin"
    );
    assert_eq!(
        normalize("enter email clk@example.com"),
        "enter email clk@example.com"
    );
}

#[test]
fn test_preserves_value_case() {
    assert_eq!(
        normalize("enter password HunTer2"),
        "enter password HunTer2"
    );
}

#[test]
fn test_navigation_phrasing() {
    assert_eq!(normalize("navigate to google.com"), "go to google.com");
    assert_eq!(normalize("take me to Example.org"), "go to Example.org");
    assert_eq!(normalize("visit github"), "go to github");
}

#[test]
fn test_other_intents_pass_through() {
    assert_eq!(normalize("click on submit"), "click on submit");
    assert_eq!(normalize("search for llc"), "search for llc");
}

#[test]
fn test_bare_navigation_phrase_untouched() {
    assert_eq!(normalize("open"), "open");
}

#[test]
fn test_whitespace_collapsed() {
    assert_eq!(normalize("  click    login  "), "click login");
    assert_eq!(normalize("   "), "");
}

#[test]
fn test_idempotent_on_samples() {
    let samples = [
        "go to red berry test.in/signup",
        "open red beryl test",
        "navigate to redbus.in",
        "enter e-mail a@b.com and passward x",
        "clik sign-in",
        "take me to the dashboard",
        "select stte florida",
        "",
    ];
    for sample in samples {
        let once = normalize(sample);
        assert_eq!(normalize(&once), once, "not idempotent for '{}'", sample);
    }
}
