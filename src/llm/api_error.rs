use serde::Deserialize;

/// Builds a readable message for a non-2xx provider response, digging the
/// provider's own error text out of the body when it has one.
pub(crate) fn describe_api_failure(provider: &str, status: reqwest::StatusCode, body: &str) -> String {
    format!("{} API error ({}): {}", provider, status, extract_api_error(body))
}

pub(crate) fn extract_api_error(body: &str) -> String {
    #[derive(Debug, Deserialize)]
    struct ErrorEnvelope {
        error: Option<ProviderError>,
    }
    // OpenAI, Gemini and Claude all nest the details under `error`; only the
    // secondary fields differ.
    #[derive(Debug, Deserialize)]
    struct ProviderError {
        message: Option<String>,
        #[serde(rename = "type")]
        kind: Option<String>,
        status: Option<String>,
        code: Option<serde_json::Value>,
    }

    let Ok(ErrorEnvelope { error: Some(err) }) = serde_json::from_str::<ErrorEnvelope>(body) else {
        return body.trim().to_string();
    };

    let message = err.message.unwrap_or_else(|| "unknown error".to_string());
    let mut details = Vec::new();
    if let Some(kind) = err.kind {
        details.push(format!("type={}", kind));
    }
    if let Some(status) = err.status {
        details.push(format!("status={}", status));
    }
    match err.code {
        Some(serde_json::Value::String(code)) => details.push(format!("code={}", code)),
        Some(serde_json::Value::Number(code)) => details.push(format!("code={}", code)),
        _ => {}
    }
    if details.is_empty() {
        message
    } else {
        format!("{} ({})", message, details.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_openai_error_envelope() {
        let body = r#"{"error":{"message":"Incorrect API key","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert_eq!(
            extract_api_error(body),
            "Incorrect API key (type=invalid_request_error, code=invalid_api_key)"
        );
    }

    #[test]
    fn extracts_gemini_error_envelope() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            extract_api_error(body),
            "API key not valid (status=INVALID_ARGUMENT, code=400)"
        );
    }

    #[test]
    fn falls_back_to_raw_body() {
        assert_eq!(extract_api_error(" upstream timeout \n"), "upstream timeout");
    }

    #[test]
    fn prefixes_provider_and_status() {
        let message =
            describe_api_failure("Claude", reqwest::StatusCode::UNAUTHORIZED, r#"{"error":{"type":"authentication_error","message":"invalid x-api-key"}}"#);
        assert_eq!(
            message,
            "Claude API error (401 Unauthorized): invalid x-api-key (type=authentication_error)"
        );
    }
}
