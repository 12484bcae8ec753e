use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::CityDataProvider;
use crate::config::UpstreamConfig;
use crate::{GatewayError, Result};

const USER_AGENT: &str = concat!("city-info-gateway/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the city-insights and weather-prediction services
pub struct UpstreamClient {
    client: Client,
    api_key: String,
    city_api_url: String,
    weather_api_url: String,
}

impl UpstreamClient {
    /// Create a new client. Requests carry no timeout unless one is configured.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            city_api_url: config.city_api_url.trim_end_matches('/').to_string(),
            weather_api_url: config.weather_api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issue a single GET carrying the credential. The URL is dropped from
    /// transport errors since the query string holds the API key.
    async fn get(&self, service: &str, url: &str, query: &[(&str, String)]) -> Result<Response> {
        let start_time = Instant::now();

        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                GatewayError::upstream(format!("{service} request failed: {}", e.without_url()))
            })?;

        debug!(
            "{} responded {} in {:.3}s",
            service,
            response.status(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(response)
    }

    async fn read_json(service: &str, response: Response) -> Result<Value> {
        response.json::<Value>().await.map_err(|e| {
            GatewayError::shape(format!(
                "{service} returned an unreadable body: {}",
                e.without_url()
            ))
        })
    }
}

#[async_trait]
impl CityDataProvider for UpstreamClient {
    #[instrument(skip(self))]
    async fn fetch_city_info(&self, city_id: &str) -> Result<Value> {
        let url = format!(
            "{}/cities/{}/insights",
            self.city_api_url,
            urlencoding::encode(city_id)
        );

        let response = self.get("City insights", &url, &[]).await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                info!("City {} not found upstream", city_id);
                Err(GatewayError::not_found("City not found"))
            }
            status if !status.is_success() => {
                let error_text = response.text().await.unwrap_or_default();
                warn!("City insights error {}: {}", status, error_text);
                Err(GatewayError::upstream(format!(
                    "City insights returned {status}: {error_text}"
                )))
            }
            _ => Self::read_json("City insights", response).await,
        }
    }

    #[instrument(skip(self))]
    async fn fetch_weather(&self, latitude: f64, longitude: f64) -> Result<Value> {
        let url = format!("{}/weather-predictions", self.weather_api_url);
        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
        ];

        let response = self.get("Weather predictions", &url, &query).await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Weather predictions error {}: {}", status, error_text);
            return Err(GatewayError::upstream(format!(
                "Weather predictions returned {status}: {error_text}"
            )));
        }

        Self::read_json("Weather predictions", response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> UpstreamConfig {
        UpstreamConfig {
            api_key: "test-api-key".to_string(),
            city_api_url: server.uri(),
            weather_api_url: format!("{}/", server.uri()),
            timeout_seconds: Some(5),
        }
    }

    #[tokio::test]
    async fn test_fetch_city_info_success() {
        let mock_server = MockServer::start().await;
        let body = json!({
            "coordinates": [45.75, 4.85],
            "population": 513275,
            "knownFor": ["gastronomy"]
        });

        Mock::given(method("GET"))
            .and(path("/cities/lyon/insights"))
            .and(query_param("apiKey", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = UpstreamClient::new(&config_for(&mock_server)).unwrap();
        let value = client.fetch_city_info("lyon").await.unwrap();

        assert_eq!(value, body);
    }

    #[tokio::test]
    async fn test_fetch_city_info_encodes_city_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cities/saint%20etienne/insights"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = UpstreamClient::new(&config_for(&mock_server)).unwrap();
        assert!(client.fetch_city_info("saint etienne").await.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_city_info_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cities/atlantis/insights"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = UpstreamClient::new(&config_for(&mock_server)).unwrap();
        let err = client.fetch_city_info("atlantis").await.unwrap_err();

        assert!(matches!(err, GatewayError::NotFound { .. }));
        assert_eq!(err.user_message(), "City not found");
    }

    #[tokio::test]
    async fn test_fetch_city_info_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cities/lyon/insights"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = UpstreamClient::new(&config_for(&mock_server)).unwrap();
        let err = client.fetch_city_info("lyon").await.unwrap_err();

        assert!(matches!(err, GatewayError::Upstream { .. }));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_city_info_invalid_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cities/lyon/insights"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = UpstreamClient::new(&config_for(&mock_server)).unwrap();
        let err = client.fetch_city_info("lyon").await.unwrap_err();

        assert!(matches!(err, GatewayError::Shape { .. }));
    }

    #[tokio::test]
    async fn test_fetch_city_info_network_error_hides_key() {
        let config = UpstreamConfig {
            api_key: "secret-key-123".to_string(),
            city_api_url: "http://127.0.0.1:1".to_string(),
            weather_api_url: "http://127.0.0.1:1".to_string(),
            timeout_seconds: Some(2),
        };

        let client = UpstreamClient::new(&config).unwrap();
        let err = client.fetch_city_info("lyon").await.unwrap_err();

        assert!(matches!(err, GatewayError::Upstream { .. }));
        assert!(!err.to_string().contains("secret-key-123"));
    }

    #[tokio::test]
    async fn test_fetch_weather_sends_coordinates() {
        let mock_server = MockServer::start().await;
        let body = json!({ "predictions": [] });

        Mock::given(method("GET"))
            .and(path("/weather-predictions"))
            .and(query_param("latitude", "45.75"))
            .and(query_param("longitude", "4.85"))
            .and(query_param("apiKey", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = UpstreamClient::new(&config_for(&mock_server)).unwrap();
        let value = client.fetch_weather(45.75, 4.85).await.unwrap();

        assert_eq!(value, body);
    }

    #[tokio::test]
    async fn test_fetch_weather_not_found_is_upstream_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather-predictions"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = UpstreamClient::new(&config_for(&mock_server)).unwrap();
        let err = client.fetch_weather(1.0, 2.0).await.unwrap_err();

        assert!(matches!(err, GatewayError::Upstream { .. }));
    }
}
