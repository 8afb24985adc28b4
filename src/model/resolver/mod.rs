mod env;
mod key;
mod selection;
mod types;

use anyhow::Result;

use super::provider_kind::ProviderKind;

pub use types::ProviderSelection;

pub fn resolve_provider_selection(
    model_arg: Option<&str>,
    override_key: Option<&str>,
) -> Result<ProviderSelection> {
    selection::resolve_provider_selection_internal(model_arg, override_key)
}

pub fn resolve_key(provider: ProviderKind, override_key: Option<&str>) -> Result<String> {
    key::resolve_key_internal(provider, override_key)
}

pub fn resolve_weather_key(override_key: Option<&str>) -> Result<String> {
    key::resolve_weather_key_internal(override_key)
}
