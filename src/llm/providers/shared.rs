use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;

use crate::llm::api_error::describe_api_failure;

pub(super) fn base_url(env_key: &str, default: &str) -> String {
    std::env::var(env_key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

pub(super) async fn send_json<T: DeserializeOwned>(
    provider: &str,
    request: reqwest::RequestBuilder,
) -> Result<T> {
    let response = request
        .send()
        .await
        .with_context(|| format!("failed to reach {} API", provider))?;
    let status = response.status();
    let payload = response.text().await.unwrap_or_default();
    if !status.is_success() {
        return Err(anyhow!(describe_api_failure(provider, status, &payload)));
    }
    serde_json::from_str(&payload)
        .with_context(|| format!("failed to parse {} response JSON", provider))
}
