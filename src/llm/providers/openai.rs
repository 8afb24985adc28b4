use anyhow::{Result, anyhow};
use serde::Deserialize;
use serde_json::json;

use super::shared::{base_url, send_json};
use crate::llm::{CompletionRequest, LlmClient};

impl LlmClient {
    pub(crate) async fn call_openai(&self, request: &CompletionRequest) -> Result<String> {
        let base = base_url("OPENAI_BASE_URL", "https://api.openai.com/v1");
        let url = format!("{}/chat/completions", base);
        let body = json!({
            "model": request.model,
            "messages": request.messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature
        });

        let parsed: OpenAIResponse = send_json(
            "OpenAI",
            self.http.post(url).bearer_auth(&self.api_key).json(&body),
        )
        .await?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("no message content returned from OpenAI"))
    }
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}
