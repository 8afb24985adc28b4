use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tera::{Context as TeraContext, Tera};

use crate::dates;
use crate::session::DialogContext;

const EXTRACTION_TEMPLATE: &str = include_str!("prompts/extraction.tera");
const GENERAL_REPLY_TEMPLATE: &str = include_str!("prompts/general_reply.tera");
const WEATHER_REPLY_TEMPLATE: &str = include_str!("prompts/weather_reply.tera");

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionPromptInput {
    pub today: String,
    pub weekday: String,
    pub tomorrow: String,
    pub dialog_context: String,
}

impl ExtractionPromptInput {
    pub fn new(context: &DialogContext, today: NaiveDate) -> Result<Self> {
        let tomorrow = today.succ_opt().unwrap_or(today);
        Ok(Self {
            today: dates::format_date(today),
            weekday: today.weekday().to_string(),
            tomorrow: dates::format_date(tomorrow),
            dialog_context: serde_json::to_string(context)
                .with_context(|| "failed to serialize dialog context")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTemplate {
    General,
    Weather,
}

pub fn render_extraction(input: &ExtractionPromptInput) -> Result<String> {
    let mut context = TeraContext::new();
    context.insert("today", &input.today);
    context.insert("weekday", &input.weekday);
    context.insert("tomorrow", &input.tomorrow);
    context.insert("dialog_context", &input.dialog_context);
    Tera::one_off(EXTRACTION_TEMPLATE, &context, false)
        .with_context(|| "failed to render extraction prompt")
}

pub fn render_reply(template: ReplyTemplate, weather_json: Option<&str>) -> Result<String> {
    let mut context = TeraContext::new();
    context.insert("weather_data", &weather_json.unwrap_or("{}"));
    let (source, name) = match template {
        ReplyTemplate::General => (GENERAL_REPLY_TEMPLATE, "general reply"),
        ReplyTemplate::Weather => (WEATHER_REPLY_TEMPLATE, "weather reply"),
    };
    Tera::one_off(source, &context, false)
        .with_context(|| format!("failed to render {} prompt", name))
}
