use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{Coordinate, Forecast},
    provider::Units,
};

use super::ForecastProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Typed binding for the OpenWeather 5-day `/forecast` endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    units: Units,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, units: Units) -> Self {
        Self {
            api_key,
            units,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the client at a different host. Tests use this to talk to a
    /// local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherClient {
    async fn fetch_forecast(&self, coordinate: Coordinate) -> Result<Forecast, FetchError> {
        let url = format!("{}/forecast", self.base_url);

        debug!(
            lat = coordinate.latitude,
            lon = coordinate.longitude,
            units = %self.units,
            "requesting forecast"
        );

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coordinate.latitude.to_string()),
                ("lon", coordinate.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", self.units.as_str().to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Http { status, body: truncate_body(&body) });
        }

        Forecast::from_json(body.as_bytes())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn berlin() -> Coordinate {
        Coordinate::new(52.52, 13.405).unwrap()
    }

    fn client_for(server: &MockServer) -> OpenWeatherClient {
        OpenWeatherClient::new("key123".to_string(), Units::Metric).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn fetches_and_decodes_forecast() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("lat", "52.52"))
            .and(query_param("lon", "13.405"))
            .and(query_param("appid", "key123"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cod": "200",
                "cnt": 1,
                "list": [{
                    "dt_txt": "2024-01-01 12:00:00",
                    "main": {"temp": 3.2, "humidity": 81},
                    "weather": [{"description": "clear sky"}]
                }],
                "city": {"name": "Berlin", "coord": {"lat": 52.52, "lon": 13.405}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let forecast = client_for(&server).fetch_forecast(berlin()).await.unwrap();

        let city = forecast.city.expect("city must be present");
        assert_eq!(city.name.as_deref(), Some("Berlin"));
        assert_eq!(forecast.intervals.len(), 1);
        let metrics = forecast.intervals[0].metrics.as_ref().unwrap();
        assert_eq!(metrics.temperature, Some(3.2));
        assert_eq!(metrics.humidity, Some(81));
    }

    #[tokio::test]
    async fn preserves_server_interval_ordering() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "list": [
                    {"dt_txt": "2024-01-02 00:00:00"},
                    {"dt_txt": "2024-01-01 00:00:00"},
                    {"dt_txt": "2024-01-03 00:00:00"}
                ]
            })))
            .mount(&server)
            .await;

        let forecast = client_for(&server).fetch_forecast(berlin()).await.unwrap();

        let timestamps: Vec<_> =
            forecast.intervals.iter().filter_map(|i| i.timestamp.as_deref()).collect();
        assert_eq!(
            timestamps,
            ["2024-01-02 00:00:00", "2024-01-01 00:00:00", "2024-01-03 00:00:00"]
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"cod": 401, "message": "Invalid API key"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_forecast(berlin()).await.unwrap_err();

        match err {
            FetchError::Http { status, ref body } => {
                assert_eq!(status.as_u16(), 401);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
        assert!(err.is_auth_failure());
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"list\": 42}"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_forecast(berlin()).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let client = OpenWeatherClient::new("key123".to_string(), Units::Metric)
            .with_base_url("http://127.0.0.1:9");

        let err = client.fetch_forecast(berlin()).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[test]
    fn truncates_long_error_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.ends_with("..."));

        assert_eq!(truncate_body("short"), "short");
    }
}
