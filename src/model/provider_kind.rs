#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAI,
    Gemini,
    Claude,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Claude => "claude",
        }
    }
}

/// Small, cheap model for turning free text into intent JSON.
pub fn default_extraction_model(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::OpenAI => "gpt-3.5-turbo",
        ProviderKind::Gemini => "gemini-2.5-flash-lite",
        ProviderKind::Claude => "claude-3-5-haiku-latest",
    }
}

/// Chattier model used for the user-facing reply.
pub fn default_reply_model(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::OpenAI => "gpt-4o-mini",
        ProviderKind::Gemini => "gemini-2.5-flash",
        ProviderKind::Claude => "claude-sonnet-4-5",
    }
}

pub fn provider_from_name(name: &str) -> Option<ProviderKind> {
    match name.trim().to_lowercase().as_str() {
        "openai" => Some(ProviderKind::OpenAI),
        "gemini" | "google" => Some(ProviderKind::Gemini),
        "claude" | "anthropic" => Some(ProviderKind::Claude),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_aliases() {
        assert_eq!(provider_from_name(" Google "), Some(ProviderKind::Gemini));
        assert_eq!(provider_from_name("anthropic"), Some(ProviderKind::Claude));
        assert_eq!(provider_from_name("mistral"), None);
    }

    #[test]
    fn extraction_and_reply_models_differ() {
        for provider in [ProviderKind::OpenAI, ProviderKind::Gemini, ProviderKind::Claude] {
            assert_ne!(
                default_extraction_model(provider),
                default_reply_model(provider)
            );
        }
    }
}
