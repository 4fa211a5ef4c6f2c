use super::*;
use crate::types::MessageRole;

#[test]
fn test_request_builder() {
    let request = CompletionRequest::new("gemini-1.5-flash", vec![Message::user("hi")])
        .with_system("Return JSON only")
        .with_max_tokens(512)
        .with_temperature(0.2)
        .with_timeout(30);

    assert_eq!(request.model, "gemini-1.5-flash");
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, MessageRole::User);
    assert_eq!(request.system.as_deref(), Some("Return JSON only"));
    assert_eq!(request.max_tokens, Some(512));
    assert_eq!(request.temperature, Some(0.2));
    assert_eq!(request.timeout_seconds, Some(30));
}

#[test]
fn test_request_serialization_skips_unset() {
    let request = CompletionRequest::new("m", vec![]);
    let json = serde_json::to_value(&request).unwrap();
    assert!(json.get("system").is_none());
    assert!(json.get("max_tokens").is_none());
    assert_eq!(json["stop"], serde_json::json!([]));
}
