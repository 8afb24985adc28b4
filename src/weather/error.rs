use thiserror::Error;

/// Why a weather lookup produced no data. The messages are safe to log but
/// are never shown to users verbatim.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("city is undefined")]
    UndefinedCity,

    #[error(
        "Error fetching weather data for '{city}': HTTP {status}. Please check the city name and try again."
    )]
    Http {
        city: String,
        status: reqwest::StatusCode,
    },

    #[error("Oops! Something went wrong: {0}. Please try again later.")]
    Transient(String),

    #[error("An unexpected error occurred: {0}. Please try again.")]
    Unexpected(String),
}

impl LookupError {
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::UndefinedCity => "undefined_city",
            LookupError::Http { .. } => "http",
            LookupError::Transient(_) => "transient",
            LookupError::Unexpected(_) => "unexpected",
        }
    }
}
