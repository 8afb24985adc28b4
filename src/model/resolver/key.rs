use anyhow::{Result, anyhow};

use super::super::provider_kind::ProviderKind;
use super::env::get_env;

pub(super) fn resolve_key_internal(
    provider: ProviderKind,
    override_key: Option<&str>,
) -> Result<String> {
    if let Some(key) = non_empty(override_key) {
        return Ok(key);
    }

    match provider {
        ProviderKind::OpenAI => get_env("OPENAI_API_KEY"),
        ProviderKind::Gemini => get_env("GEMINI_API_KEY").or_else(|| get_env("GOOGLE_API_KEY")),
        ProviderKind::Claude => get_env("ANTHROPIC_API_KEY"),
    }
    .ok_or_else(|| anyhow!("API key not found for provider '{}'", provider.as_str()))
}

pub(super) fn resolve_weather_key_internal(override_key: Option<&str>) -> Result<String> {
    if let Some(key) = non_empty(override_key) {
        return Ok(key);
    }
    get_env("VISUAL_CROSSING_API_KEY").ok_or_else(|| {
        anyhow!("weather API key not found (checked --weather-key and VISUAL_CROSSING_API_KEY)")
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
