use anyhow::Result;
use chrono::NaiveDate;

use super::{ExtractedIntent, parse_intent};
use crate::dates;
use crate::llm::{ChatMessage, CompletionRequest};
use crate::prompt::{self, ExtractionPromptInput};
use crate::request_engine::gateway::GenerationGateway;
use crate::session::DialogContext;

pub const EXTRACTION_TEMPERATURE: f32 = 0.8;
pub const EXTRACTION_MAX_TOKENS: u32 = 50;

/// Turns free text into an [`ExtractedIntent`] with one LLM call.
pub struct Extractor {
    model: String,
}

impl Extractor {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    pub fn build_request(
        &self,
        user_input: &str,
        context: &DialogContext,
        today: NaiveDate,
    ) -> Result<CompletionRequest> {
        let instruction = prompt::render_extraction(&ExtractionPromptInput::new(context, today)?)?;
        Ok(CompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(instruction), ChatMessage::user(user_input)],
            max_tokens: EXTRACTION_MAX_TOKENS,
            temperature: EXTRACTION_TEMPERATURE,
        })
    }

    /// Returns `None` when the provider fails or its answer is not usable
    /// intent JSON. On success the dialog context absorbs every field the
    /// answer carried; fields it left out keep their previous values.
    ///
    /// Errors are only returned for prompt rendering failures.
    pub async fn extract(
        &self,
        gateway: &dyn GenerationGateway,
        user_input: &str,
        context: &mut DialogContext,
        today: NaiveDate,
    ) -> Result<Option<ExtractedIntent>> {
        let request = self.build_request(user_input, context, today)?;

        let raw = match gateway.complete(&request).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "extraction call failed");
                return Ok(None);
            }
        };

        let mut intent = match parse_intent(&raw, user_input) {
            Ok(intent) => intent,
            Err(err) => {
                tracing::warn!(error = %err, output = %raw, "unusable extraction output");
                return Ok(None);
            }
        };

        if let ExtractedIntent::Weather(weather) = &mut intent {
            weather.date = weather
                .date
                .as_deref()
                .map(|date| dates::resolve_date(date, today, context.last_date.as_deref()));
            context.remember(
                weather.city.as_deref(),
                weather.requirement.as_deref(),
                weather.date.as_deref(),
            );
        }

        tracing::debug!(?intent, "extracted intent");
        Ok(Some(intent))
    }
}
