mod provider_kind;
mod resolver;

pub use provider_kind::{ProviderKind, default_extraction_model, default_reply_model};
pub use resolver::{resolve_key, resolve_provider_selection, resolve_weather_key};
