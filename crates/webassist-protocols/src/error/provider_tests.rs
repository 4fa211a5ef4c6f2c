use super::*;

#[test]
fn test_api_error_display() {
    let err = ProviderError::ApiError {
        status: 500,
        message: "Internal Server Error".to_string(),
    };
    assert!(err.to_string().contains("500"));
    assert!(err.to_string().contains("Internal Server Error"));
}

#[test]
fn test_timeout_display() {
    let err = ProviderError::Timeout(30);
    assert_eq!(err.to_string(), "Timeout after 30 seconds");
}

#[test]
fn test_from_api_response_auth_failed() {
    let err = ProviderError::from_api_response(403, "API key not valid".to_string());
    assert!(matches!(err, ProviderError::AuthenticationFailed(_)));
}

#[test]
fn test_from_api_response_rate_limited() {
    let err = ProviderError::from_api_response(429, "Resource has been exhausted".to_string());
    assert!(matches!(err, ProviderError::RateLimited { .. }));
}

#[test]
fn test_from_api_response_safety_blocked() {
    let err = ProviderError::from_api_response(
        400,
        "Response blocked by safety settings".to_string(),
    );
    assert!(matches!(err, ProviderError::ContentFiltered(_)));
}

#[test]
fn test_from_api_response_bad_request() {
    let err = ProviderError::from_api_response(400, "Invalid JSON payload".to_string());
    assert!(matches!(err, ProviderError::InvalidRequest(_)));
}

#[test]
fn test_from_api_response_generic_error() {
    let err = ProviderError::from_api_response(503, "Service Unavailable".to_string());
    assert!(matches!(err, ProviderError::ApiError { status: 503, .. }));
}

#[test]
fn test_is_retryable() {
    assert!(ProviderError::RateLimited { retry_after_seconds: 5 }.is_retryable());
    assert!(ProviderError::Network("reset".to_string()).is_retryable());
    assert!(ProviderError::Timeout(30).is_retryable());
    assert!(!ProviderError::AuthenticationFailed("bad key".to_string()).is_retryable());
    assert!(!ProviderError::EmptyResponse.is_retryable());
}
