use super::*;

#[test]
fn test_part_text() {
    let json = serde_json::to_value(Part::text("Hello")).unwrap();
    assert_eq!(json, serde_json::json!({"text": "Hello"}));
}

#[test]
fn test_generation_config_default() {
    let config = GenerationConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, "{}");
}

#[test]
fn test_generation_config_camel_case() {
    let config = GenerationConfig {
        temperature: Some(0.2),
        max_output_tokens: Some(512),
        stop_sequences: vec!["END".to_string()],
    };
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["maxOutputTokens"], 512);
    assert_eq!(json["stopSequences"][0], "END");
    assert!(json.get("max_output_tokens").is_none());
}

#[test]
fn test_request_omits_empty_fields() {
    let request = GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part::text("hi")],
        }],
        system_instruction: None,
        generation_config: None,
    };
    let json = serde_json::to_value(&request).unwrap();
    assert!(json.get("systemInstruction").is_none());
    assert!(json.get("generationConfig").is_none());
    assert_eq!(json["contents"][0]["role"], "user");
}

#[test]
fn test_system_instruction_has_no_role() {
    let request = GenerateContentRequest {
        contents: vec![],
        system_instruction: Some(Content {
            role: String::new(),
            parts: vec![Part::text("be brief")],
        }),
        generation_config: None,
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["systemInstruction"], serde_json::json!({"parts": [{"text": "be brief"}]}));
}

#[test]
fn test_response_parse() {
    let body = r##"{
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "[\"#a\", "}, {"text": "\"#b\"]"}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4, "totalTokenCount": 16}
    }"##;
    let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
    let candidate = &response.candidates[0];
    assert_eq!(candidate.content.as_ref().unwrap().text(), r##"["#a", "#b"]"##);
    assert_eq!(candidate.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(response.usage_metadata.unwrap().total_token_count, 16);
}

#[test]
fn test_blocked_candidate_without_content() {
    let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
    let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
    assert!(response.candidates[0].content.is_none());
}

#[test]
fn test_empty_response_parse() {
    let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
    assert!(response.candidates.is_empty());
    assert!(response.usage_metadata.is_none());
}

#[test]
fn test_error_parse() {
    let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
    let error: GeminiError = serde_json::from_str(body).unwrap();
    assert_eq!(error.error.code, 400);
    assert_eq!(error.error.status, "INVALID_ARGUMENT");
}
