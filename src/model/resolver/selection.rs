use anyhow::{Result, anyhow};

use super::super::provider_kind::{ProviderKind, provider_from_name};
use super::env::{get_env, provider_from_model_name};
use super::types::ProviderSelection;

pub(super) fn resolve_provider_selection_internal(
    model_arg: Option<&str>,
    override_key: Option<&str>,
) -> Result<ProviderSelection> {
    match model_arg {
        Some(model) => parse_model_arg(model, override_key),
        None => Ok(ProviderSelection {
            provider: infer_default_provider(override_key)?,
            requested_model: None,
        }),
    }
}

pub(super) fn parse_model_arg(
    model_arg: &str,
    override_key: Option<&str>,
) -> Result<ProviderSelection> {
    let raw = model_arg.trim();
    if raw.is_empty() {
        return Err(anyhow!("model argument is empty"));
    }

    if let Some((provider_part, model_part)) = raw.split_once(':')
        && let Some(provider) = provider_from_name(provider_part)
    {
        let requested_model = Some(model_part.trim())
            .filter(|model| !model.is_empty())
            .map(str::to_string);
        return Ok(ProviderSelection {
            provider,
            requested_model,
        });
    }

    if let Some(provider) = provider_from_name(raw) {
        return Ok(ProviderSelection {
            provider,
            requested_model: None,
        });
    }

    // `ft:gpt-...` fine-tune ids carry a colon but no provider prefix.
    if let Some(provider) = provider_from_model_name(raw) {
        return Ok(ProviderSelection {
            provider,
            requested_model: Some(raw.to_string()),
        });
    }

    if let Some((provider_part, _)) = raw.split_once(':') {
        return Err(anyhow!("unknown provider '{}'", provider_part));
    }

    let provider = infer_default_provider(override_key)?;
    Ok(ProviderSelection {
        provider,
        requested_model: Some(raw.to_string()),
    })
}

fn infer_default_provider(override_key: Option<&str>) -> Result<ProviderKind> {
    if get_env("OPENAI_API_KEY").is_some() {
        return Ok(ProviderKind::OpenAI);
    }
    if get_env("GEMINI_API_KEY").is_some() || get_env("GOOGLE_API_KEY").is_some() {
        return Ok(ProviderKind::Gemini);
    }
    if get_env("ANTHROPIC_API_KEY").is_some() {
        return Ok(ProviderKind::Claude);
    }

    if override_key.is_some() {
        return Ok(ProviderKind::OpenAI);
    }

    Err(anyhow!(
        "no API key found (checked OPENAI_API_KEY, GEMINI_API_KEY/GOOGLE_API_KEY, ANTHROPIC_API_KEY, and --key)"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_and_model_pair() {
        let selection = parse_model_arg("gemini:gemini-2.5-flash", None).unwrap();
        assert_eq!(selection.provider, ProviderKind::Gemini);
        assert_eq!(
            selection.requested_model.as_deref(),
            Some("gemini-2.5-flash")
        );
    }

    #[test]
    fn parses_provider_only() {
        let selection = parse_model_arg("claude", None).unwrap();
        assert_eq!(selection.provider, ProviderKind::Claude);
        assert!(selection.requested_model.is_none());
    }

    #[test]
    fn keeps_fine_tuned_openai_ids_intact() {
        let selection = parse_model_arg("ft:gpt-3.5-turbo-0125:personal::abc", None).unwrap();
        assert_eq!(selection.provider, ProviderKind::OpenAI);
        assert_eq!(
            selection.requested_model.as_deref(),
            Some("ft:gpt-3.5-turbo-0125:personal::abc")
        );
    }

    #[test]
    fn infers_provider_from_model_name() {
        let openai = parse_model_arg("gpt-3.5-turbo", None).unwrap();
        assert_eq!(openai.provider, ProviderKind::OpenAI);
        let claude = parse_model_arg("claude-sonnet-4-5", None).unwrap();
        assert_eq!(claude.provider, ProviderKind::Claude);
    }

    #[test]
    fn provider_prefix_wins_over_model_name_prefix() {
        let claude = parse_model_arg("claude:claude-sonnet-4-5", None).unwrap();
        assert_eq!(claude.provider, ProviderKind::Claude);
        assert_eq!(claude.requested_model.as_deref(), Some("claude-sonnet-4-5"));

        let bare = parse_model_arg("gemini:", None).unwrap();
        assert_eq!(bare.provider, ProviderKind::Gemini);
        assert!(bare.requested_model.is_none());
    }

    #[test]
    fn rejects_unknown_provider_prefix() {
        assert!(parse_model_arg("mistral:large", None).is_err());
    }

    #[test]
    fn rejects_empty_model_argument() {
        assert!(parse_model_arg("   ", None).is_err());
    }
}
