use std::time::Duration;

use serde::Deserialize;

use crate::geo::error::GeoError;
use crate::geo::models::GeoPoint;

const DEFAULT_BASE_URL: &str = "https://geocode-maps.yandex.ru/1.x";
const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

/// Configuration for the geocoding provider.
///
/// Built once at startup and handed to `GeocoderClient::new`; the API key is
/// never read from the environment per call.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeocoderConfig {
    /// Read the geocoder configuration from the environment.
    ///
    /// A missing `GEOCODER_API_KEY` is a configuration error and should abort
    /// startup; base URL and timeout have sensible defaults.
    pub fn from_env() -> Result<Self, GeoError> {
        let api_key = std::env::var("GEOCODER_API_KEY")
            .map_err(|_| GeoError::Config("GEOCODER_API_KEY is not set".to_string()))?;

        let base_url =
            std::env::var("GEOCODER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_seconds = std::env::var("GEOCODER_TIMEOUT_SECONDS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        Ok(Self {
            api_key,
            base_url,
            timeout: Duration::from_secs(timeout_seconds),
        })
    }
}

/// Response payload of the geocoding provider.
///
/// The provider wraps results several levels deep; each feature member
/// carries a `pos` string with the position as `"<longitude> <latitude>"`,
/// longitude first.
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    response: GeocodeBody,
}

#[derive(Debug, Deserialize)]
struct GeocodeBody {
    #[serde(rename = "GeoObjectCollection")]
    collection: GeoObjectCollection,
}

#[derive(Debug, Deserialize)]
struct GeoObjectCollection {
    #[serde(rename = "featureMember", default)]
    members: Vec<FeatureMember>,
}

#[derive(Debug, Deserialize)]
struct FeatureMember {
    #[serde(rename = "GeoObject")]
    geo_object: GeoObject,
}

#[derive(Debug, Deserialize)]
struct GeoObject {
    #[serde(rename = "Point")]
    point: ProviderPoint,
}

#[derive(Debug, Deserialize)]
struct ProviderPoint {
    pos: String,
}

/// HTTP client for the external geocoding service.
#[derive(Debug)]
pub struct GeocoderClient {
    http: reqwest::Client,
    config: GeocoderConfig,
}

impl GeocoderClient {
    /// Create a new client with a bounded per-request timeout.
    pub fn new(config: GeocoderConfig) -> Result<Self, GeoError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config })
    }

    /// Resolve a free-text address to a coordinate pair.
    ///
    /// Issues a single request and takes the first (most relevant) result;
    /// an empty result collection means the address is unknown to the
    /// provider and yields `Ok(None)`. No retry is performed: transport and
    /// provider errors propagate to the caller, which logs them and treats
    /// the address as unresolved.
    pub async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, GeoError> {
        tracing::debug!("Geocoding address: {}", address);

        let response = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("geocode", address),
                ("apikey", self.config.api_key.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::Provider(status.as_u16()));
        }

        let payload: GeocodeResponse = response.json().await?;

        match payload.response.collection.members.first() {
            Some(most_relevant) => parse_pos(&most_relevant.geo_object.point.pos).map(Some),
            None => {
                tracing::debug!("Geocoder found no results for address: {}", address);
                Ok(None)
            }
        }
    }
}

/// Parse the provider's `"<longitude> <latitude>"` position string.
///
/// This is the only place the provider's longitude-first ordering is
/// converted into the canonical `GeoPoint` representation.
fn parse_pos(pos: &str) -> Result<GeoPoint, GeoError> {
    let mut parts = pos.split_whitespace();
    let lon = parts.next().and_then(|value| value.parse::<f64>().ok());
    let lat = parts.next().and_then(|value| value.parse::<f64>().ok());

    match (lat, lon, parts.next()) {
        (Some(lat), Some(lon), None) => Ok(GeoPoint { lat, lon }),
        _ => Err(GeoError::MalformedPosition(pos.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pos_is_longitude_first() {
        let point = parse_pos("37.617698 55.755864").expect("valid position");
        assert_eq!(point.lat, 55.755864);
        assert_eq!(point.lon, 37.617698);
    }

    #[test]
    fn parse_pos_rejects_garbage() {
        assert!(parse_pos("").is_err());
        assert!(parse_pos("37.6").is_err());
        assert!(parse_pos("north east").is_err());
        assert!(parse_pos("37.6 55.7 12.0").is_err());
    }

    #[test]
    fn response_with_members_deserializes() {
        let raw = r#"{
            "response": {
                "GeoObjectCollection": {
                    "featureMember": [
                        {"GeoObject": {"Point": {"pos": "37.617698 55.755864"}}},
                        {"GeoObject": {"Point": {"pos": "30.315868 59.939095"}}}
                    ]
                }
            }
        }"#;

        let parsed: GeocodeResponse = serde_json::from_str(raw).expect("valid payload");
        assert_eq!(parsed.response.collection.members.len(), 2);
        assert_eq!(
            parsed.response.collection.members[0].geo_object.point.pos,
            "37.617698 55.755864"
        );
    }

    #[test]
    fn response_without_members_deserializes_to_empty() {
        let raw = r#"{"response": {"GeoObjectCollection": {}}}"#;
        let parsed: GeocodeResponse = serde_json::from_str(raw).expect("valid payload");
        assert!(parsed.response.collection.members.is_empty());
    }

    #[test]
    fn from_env_requires_api_key() {
        std::env::remove_var("GEOCODER_API_KEY");
        let result = GeocoderConfig::from_env();
        assert!(matches!(result, Err(GeoError::Config(_))));
    }
}
