use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::{Value, json};

use super::shared::{base_url, send_json};
use crate::llm::{CompletionRequest, LlmClient};

impl LlmClient {
    pub(crate) async fn call_gemini(&self, request: &CompletionRequest) -> Result<String> {
        let base = base_url(
            "GEMINI_BASE_URL",
            "https://generativelanguage.googleapis.com/v1beta",
        );
        let model_path = if request.model.starts_with("models/") {
            request.model.clone()
        } else {
            format!("models/{}", request.model)
        };
        let endpoint = format!("{}/{}:generateContent", base, model_path);
        let mut url = reqwest::Url::parse(&endpoint)
            .with_context(|| "failed to parse Gemini endpoint URL")?;
        url.query_pairs_mut().append_pair("key", &self.api_key);

        let contents = request
            .user_messages()
            .map(|message| {
                json!({
                    "role": "user",
                    "parts": [{"text": message.content}]
                })
            })
            .collect::<Vec<Value>>();
        let body = json!({
            "system_instruction": {
                "parts": [
                    {"text": request.system_text()}
                ]
            },
            "contents": contents,
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": request.max_tokens
            }
        });

        let parsed: GeminiResponse = send_json("Gemini", self.http.post(url).json(&body)).await?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        if text.is_empty() {
            return Err(anyhow!("no text candidate returned from Gemini"));
        }
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}
