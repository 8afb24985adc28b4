mod api_error;
mod providers;

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::model::ProviderKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// One chat-completion call: which model, what to say, and how to sample.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn system_text(&self) -> String {
        self.messages
            .iter()
            .filter(|message| message.role == ChatRole::System)
            .map(|message| message.content.trim())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn user_messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages
            .iter()
            .filter(|message| message.role == ChatRole::User)
    }
}

#[derive(Debug, Clone)]
pub struct LlmClient {
    provider: ProviderKind,
    api_key: String,
    http: reqwest::Client,
}

impl LlmClient {
    pub fn new(provider: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let text = match self.provider {
            ProviderKind::OpenAI => self.call_openai(request).await?,
            ProviderKind::Gemini => self.call_gemini(request).await?,
            ProviderKind::Claude => self.call_claude(request).await?,
        };
        let text = text.trim();
        if text.is_empty() {
            return Err(anyhow!(
                "{} returned an empty completion",
                self.provider.as_str()
            ));
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![
                ChatMessage::system("Be brief."),
                ChatMessage::system("  The last city discussed was Paris. "),
                ChatMessage::user("Will it rain?"),
            ],
            max_tokens: 50,
            temperature: 0.8,
        }
    }

    #[test]
    fn joins_system_messages_for_single_instruction_providers() {
        assert_eq!(
            request().system_text(),
            "Be brief.\n\nThe last city discussed was Paris."
        );
    }

    #[test]
    fn serializes_roles_in_lowercase() {
        let value = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(value["role"], "user");
        assert_eq!(request().user_messages().count(), 1);
    }
}
