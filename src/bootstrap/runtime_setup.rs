use anyhow::{Result, anyhow};
use std::sync::Arc;

use crate::cli::Cli;
use crate::llm::LlmClient;
use crate::model::{self, ProviderKind};
use crate::request_engine::TurnEngine;
use crate::weather::VisualCrossingClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ModelPlan {
    pub provider: ProviderKind,
    pub extraction_model: String,
    pub reply_model: String,
}

/// Both models run on one provider; `--reply-model` may name the provider
/// again (`openai:gpt-4o`) but may not switch to another one.
pub(super) fn resolve_models(
    model_arg: Option<&str>,
    reply_model_arg: Option<&str>,
    key_arg: Option<&str>,
) -> Result<ModelPlan> {
    let selection = model::resolve_provider_selection(model_arg, key_arg)?;
    let provider = selection.provider;
    let extraction_model = selection
        .requested_model
        .unwrap_or_else(|| model::default_extraction_model(provider).to_string());

    let reply_model = match reply_model_arg {
        Some(raw) => {
            let reply = model::resolve_provider_selection(Some(raw), key_arg)?;
            if reply.provider != provider {
                return Err(anyhow!(
                    "reply model '{}' belongs to provider '{}' but extraction uses '{}'",
                    raw.trim(),
                    reply.provider.as_str(),
                    provider.as_str()
                ));
            }
            reply
                .requested_model
                .unwrap_or_else(|| model::default_reply_model(provider).to_string())
        }
        None => model::default_reply_model(provider).to_string(),
    };

    Ok(ModelPlan {
        provider,
        extraction_model,
        reply_model,
    })
}

pub(super) fn prepare_engine(cli: &Cli) -> Result<TurnEngine> {
    let plan = resolve_models(
        cli.model.as_deref(),
        cli.reply_model.as_deref(),
        cli.key.as_deref(),
    )?;
    let api_key = model::resolve_key(plan.provider, cli.key.as_deref())?;
    let weather_key = model::resolve_weather_key(cli.weather_key.as_deref())?;

    let llm = LlmClient::new(plan.provider, api_key);
    tracing::info!(
        provider = llm.provider().as_str(),
        extraction_model = %plan.extraction_model,
        reply_model = %plan.reply_model,
        "runtime ready"
    );

    Ok(TurnEngine::new(
        Arc::new(llm),
        Arc::new(VisualCrossingClient::new(weather_key)),
        plan.extraction_model,
        plan.reply_model,
    ))
}
