pub mod suffix;

use anyhow::{Context, Result};

use crate::intent::GENERAL_INQUIRY;
use crate::llm::{ChatMessage, CompletionRequest};
use crate::prompt::{self, ReplyTemplate};
use crate::request_engine::gateway::GenerationGateway;
use crate::session::DialogContext;
use crate::weather::WeatherData;

use suffix::apply_details_suffix;

pub const REPLY_TEMPERATURE: f32 = 0.9;
pub const REPLY_MAX_TOKENS: u32 = 100;
pub const COMPOSE_FALLBACK: &str = "Unable to generate response.";

pub struct ComposeInput<'a> {
    pub user_input: &'a str,
    pub tone: &'a str,
    pub requirement: &'a str,
    /// Only successful lookups reach the composer.
    pub weather: Option<&'a WeatherData>,
    pub context: &'a DialogContext,
    /// Weather phenomenon a fact question is about, e.g. "rain".
    pub phenomenon: Option<&'a str>,
}

/// Writes the user-facing reply with the reply model.
pub struct Composer {
    model: String,
}

impl Composer {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    pub fn template_for(requirement: &str) -> ReplyTemplate {
        if requirement.eq_ignore_ascii_case(GENERAL_INQUIRY) {
            ReplyTemplate::General
        } else {
            ReplyTemplate::Weather
        }
    }

    pub fn build_request(&self, input: &ComposeInput<'_>) -> Result<CompletionRequest> {
        let template = Self::template_for(input.requirement);
        let weather_json = match (template, input.weather) {
            (ReplyTemplate::Weather, Some(data)) => Some(
                serde_json::to_string(data.raw())
                    .with_context(|| "failed to serialize weather data")?,
            ),
            _ => None,
        };
        let instruction = prompt::render_reply(template, weather_json.as_deref())?;

        let mut messages = vec![ChatMessage::system(instruction)];
        messages.extend(context_messages(input.context));
        if let Some(phenomenon) = input.phenomenon {
            messages.push(ChatMessage::system(format!(
                "The question is about {}.",
                phenomenon
            )));
        }
        messages.push(ChatMessage::user(input.user_input));

        Ok(CompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: REPLY_MAX_TOKENS,
            temperature: REPLY_TEMPERATURE,
        })
    }

    /// Provider failures become [`COMPOSE_FALLBACK`]; only prompt rendering
    /// errors are returned.
    pub async fn compose(
        &self,
        gateway: &dyn GenerationGateway,
        input: &ComposeInput<'_>,
    ) -> Result<String> {
        let request = self.build_request(input)?;
        match gateway.complete(&request).await {
            Ok(reply) => Ok(apply_details_suffix(
                reply,
                input.tone,
                input.requirement,
                input.user_input,
            )),
            Err(err) => {
                tracing::warn!(error = %err, "reply generation failed");
                Ok(COMPOSE_FALLBACK.to_string())
            }
        }
    }
}

fn context_messages(context: &DialogContext) -> Vec<ChatMessage> {
    if context.is_empty() {
        return Vec::new();
    }
    let mut messages = Vec::new();
    if let Some(city) = context.last_city.as_deref() {
        messages.push(ChatMessage::system(format!(
            "The last city discussed was {}.",
            city
        )));
    }
    if let Some(requirement) = context.last_requirement.as_deref() {
        messages.push(ChatMessage::system(format!(
            "The last requirement was {}.",
            requirement
        )));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatRole;

    #[test]
    fn selects_template_by_requirement() {
        assert_eq!(Composer::template_for("General Inquiry"), ReplyTemplate::General);
        assert_eq!(Composer::template_for("temperature"), ReplyTemplate::Weather);
    }

    #[test]
    fn request_carries_context_then_user_input() {
        let mut context = DialogContext::default();
        context.remember(Some("Paris"), Some("humidity"), Some("2024-11-16"));
        let data = WeatherData::new(serde_json::json!({"resolvedAddress": "Paris, France"}));
        let composer = Composer::new("reply-model");

        let request = composer
            .build_request(&ComposeInput {
                user_input: "And humidity?",
                tone: "neutral",
                requirement: "humidity",
                weather: Some(&data),
                context: &context,
                phenomenon: None,
            })
            .unwrap();

        assert_eq!(request.model, "reply-model");
        assert_eq!(request.max_tokens, REPLY_MAX_TOKENS);
        assert_eq!(request.messages.len(), 4);
        assert!(request.messages[0].content.contains("Paris, France"));
        assert_eq!(
            request.messages[1].content,
            "The last city discussed was Paris."
        );
        assert_eq!(request.messages[2].content, "The last requirement was humidity.");
        assert_eq!(request.messages[3], ChatMessage::user("And humidity?"));
    }

    #[test]
    fn empty_context_adds_no_messages() {
        let composer = Composer::new("reply-model");
        let request = composer
            .build_request(&ComposeInput {
                user_input: "Tell me about space exploration.",
                tone: "neutral",
                requirement: GENERAL_INQUIRY,
                weather: None,
                context: &DialogContext::default(),
                phenomenon: None,
            })
            .unwrap();
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, ChatRole::System);
    }

    #[test]
    fn phenomenon_follows_context_lines() {
        let mut context = DialogContext::default();
        context.remember(Some("Oslo"), None, None);
        let request = Composer::new("reply-model")
            .build_request(&ComposeInput {
                user_input: "Fun fact about snow?",
                tone: "casual",
                requirement: "fact",
                weather: None,
                context: &context,
                phenomenon: Some("snow"),
            })
            .unwrap();
        assert_eq!(request.messages.len(), 4);
        assert_eq!(request.messages[1].content, "The last city discussed was Oslo.");
        assert_eq!(request.messages[2].content, "The question is about snow.");
        assert_eq!(request.messages[3], ChatMessage::user("Fun fact about snow?"));
    }
}
