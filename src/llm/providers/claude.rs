use anyhow::{Result, anyhow};
use serde::Deserialize;
use serde_json::json;

use super::shared::{base_url, send_json};
use crate::llm::{CompletionRequest, LlmClient};

impl LlmClient {
    pub(crate) async fn call_claude(&self, request: &CompletionRequest) -> Result<String> {
        let base = base_url("ANTHROPIC_BASE_URL", "https://api.anthropic.com/v1");
        let version =
            std::env::var("ANTHROPIC_API_VERSION").unwrap_or_else(|_| "2023-06-01".to_string());
        let url = format!("{}/messages", base);

        let messages = request.user_messages().collect::<Vec<_>>();
        let body = json!({
            "model": request.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature.min(1.0),
            "system": request.system_text(),
            "messages": messages
        });

        let parsed: ClaudeResponse = send_json(
            "Claude",
            self.http
                .post(url)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", version)
                .json(&body),
        )
        .await?;

        let text = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() {
            return Err(anyhow!("no text block returned from Claude"));
        }
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<ClaudeContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}
