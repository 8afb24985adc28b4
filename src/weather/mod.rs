mod client;
mod error;

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

pub use client::VisualCrossingClient;
pub use error::LookupError;

/// Sentinel the extraction model uses when it could not tell which city.
pub const UNDEFINED_CITY: &str = "undefined";

pub type LookupResult = Result<WeatherData, LookupError>;

/// Provider weather record, kept exactly as returned.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherData(Value);

impl WeatherData {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    pub fn resolved_address(&self) -> Option<&str> {
        self.0.get("resolvedAddress").and_then(Value::as_str)
    }
}

pub trait WeatherSource: Send + Sync {
    fn lookup<'a>(
        &'a self,
        city: &'a str,
        date: &'a str,
    ) -> Pin<Box<dyn Future<Output = LookupResult> + Send + 'a>>;
}

pub fn is_undefined_city(city: &str) -> bool {
    let city = city.trim();
    city.is_empty() || city.eq_ignore_ascii_case(UNDEFINED_CITY)
}
