use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

use super::{LookupError, LookupResult, WeatherData, WeatherSource, is_undefined_city};

const DEFAULT_BASE_URL: &str = "https://weather.visualcrossing.com";
const TIMELINE_PATH: [&str; 4] = [
    "VisualCrossingWebServices",
    "rest",
    "services",
    "timeline",
];

/// Visual Crossing timeline API, one GET per lookup, metric units, day rows.
#[derive(Debug, Clone)]
pub struct VisualCrossingClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl VisualCrossingClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let base_url = std::env::var("VISUAL_CROSSING_BASE_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(api_key, base_url)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn timeline_url(&self, city: &str, date: &str) -> Result<reqwest::Url, LookupError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|err| LookupError::Unexpected(format!("invalid weather base URL: {}", err)))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Unexpected("weather base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(TIMELINE_PATH)
            .push(city.trim());
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("unitGroup", "metric")
            .append_pair("include", "days")
            .append_pair("date", date);
        Ok(url)
    }

    pub async fn fetch(&self, city: &str, date: &str) -> LookupResult {
        if is_undefined_city(city) {
            return Err(LookupError::UndefinedCity);
        }

        let url = self.timeline_url(city, date)?;
        tracing::debug!(city, date, "requesting weather timeline");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| LookupError::Transient(err.without_url().to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Http {
                city: city.trim().to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| LookupError::Transient(err.without_url().to_string()))?;
        let raw: Value = serde_json::from_str(&body).map_err(|err| {
            LookupError::Unexpected(format!("weather response is not JSON: {}", err))
        })?;
        Ok(WeatherData::new(raw))
    }
}

impl WeatherSource for VisualCrossingClient {
    fn lookup<'a>(
        &'a self,
        city: &'a str,
        date: &'a str,
    ) -> Pin<Box<dyn Future<Output = LookupResult> + Send + 'a>> {
        Box::pin(self.fetch(city, date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves `response` verbatim to the first connection and returns the base URL.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 4096];
            let _ = socket.read(&mut request).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn builds_timeline_url_with_encoded_city() {
        let client = VisualCrossingClient::with_base_url("secret", "https://example.test/");
        let url = client.timeline_url(" New York ", "2024-11-16").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/VisualCrossingWebServices/rest/services/timeline/New%20York?key=secret&unitGroup=metric&include=days&date=2024-11-16"
        );
    }

    #[tokio::test]
    async fn undefined_city_fails_without_network() {
        // Unroutable base URL: any request attempt would surface as Transient.
        let client = VisualCrossingClient::with_base_url("secret", "http://127.0.0.1:9");
        for city in ["undefined", "Undefined", "  "] {
            let err = client.lookup(city, "today").await.unwrap_err();
            assert!(matches!(err, LookupError::UndefinedCity), "city {city:?}");
        }
    }

    #[tokio::test]
    async fn connection_failure_is_transient() {
        let client = VisualCrossingClient::with_base_url("secret", "http://127.0.0.1:9");
        let err = client.lookup("Paris", "today").await.unwrap_err();
        assert!(matches!(err, LookupError::Transient(_)), "got {err:?}");
        assert!(err.to_string().ends_with("Please try again later."));
    }

    #[test]
    fn exposes_resolved_address() {
        let data = WeatherData::new(serde_json::json!({"resolvedAddress": "Paris, France"}));
        assert_eq!(data.resolved_address(), Some("Paris, France"));
    }

    #[tokio::test]
    async fn error_status_maps_to_http_with_city() {
        let base_url = serve_once(
            "HTTP/1.1 400 Bad Request\r\ncontent-length: 21\r\nconnection: close\r\n\r\nBad API Request: city",
        )
        .await;
        let client = VisualCrossingClient::with_base_url("secret", base_url);

        let err = client.lookup(" Pariss ", "today").await.unwrap_err();
        match &err {
            LookupError::Http { city, status } => {
                assert_eq!(city, "Pariss");
                assert_eq!(*status, reqwest::StatusCode::BAD_REQUEST);
            }
            other => panic!("expected Http, got {other:?}"),
        }
        assert!(err.to_string().contains("'Pariss'"));
    }

    #[tokio::test]
    async fn non_json_body_is_unexpected() {
        let base_url = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\ncontent-length: 14\r\nconnection: close\r\n\r\n<html></html>\n",
        )
        .await;
        let client = VisualCrossingClient::with_base_url("secret", base_url);

        let err = client.lookup("Paris", "today").await.unwrap_err();
        assert!(matches!(err, LookupError::Unexpected(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn json_body_is_returned_unmodified() {
        let base_url = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 29\r\nconnection: close\r\n\r\n{\"resolvedAddress\":\"Paris\"}\n\n",
        )
        .await;
        let client = VisualCrossingClient::with_base_url("secret", base_url);

        let data = client.lookup("Paris", "today").await.unwrap();
        assert_eq!(data.raw(), &serde_json::json!({"resolvedAddress": "Paris"}));
    }
}
