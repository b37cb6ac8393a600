use crate::core::error::TmapError;
use crate::core::geo::Coordinate;
use crate::providers::base_client::HttpClient;
use crate::providers::{Geocoder, Place, validate_place_query};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// One candidate from the Nominatim search endpoint. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: Option<serde_json::Value>,
    lon: Option<serde_json::Value>,
    #[serde(default)]
    display_name: String,
}

fn parse_degrees(value: Option<&serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::String(s) => s.trim().parse().ok(),
        serde_json::Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

#[derive(Clone)]
pub struct NominatimGeocoder {
    client: HttpClient,
}

impl NominatimGeocoder {
    pub fn new(base_url: String, user_agent: String, timeout: Duration) -> Result<Self, TmapError> {
        let mut client = HttpClient::new(base_url, timeout, None)?;
        // Nominatim's usage policy rejects requests without an identifying agent.
        client.add_header("User-Agent", user_agent);
        Ok(Self { client })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, place: &str) -> Result<Place, TmapError> {
        let query = validate_place_query(place)?;

        let response = self
            .client
            .get("search", &[("format", "json"), ("q", query), ("limit", "1")])
            .await?;

        if !response.status().is_success() {
            return Err(TmapError::Network(format!(
                "Geocoder returned status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let candidates: Vec<NominatimPlace> = serde_json::from_str(&body)
            .map_err(|e| TmapError::LocationNotFound(format!("{}: malformed response ({})", query, e)))?;

        let first = candidates
            .first()
            .ok_or_else(|| TmapError::LocationNotFound(query.to_string()))?;

        let lat = parse_degrees(first.lat.as_ref());
        let lon = parse_degrees(first.lon.as_ref());
        let coordinate = match (lat, lon) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon),
            _ => {
                return Err(TmapError::LocationNotFound(format!(
                    "{}: candidate has no usable coordinate",
                    query
                )));
            }
        };

        if !coordinate.is_valid() {
            return Err(TmapError::LocationNotFound(format!(
                "{}: coordinate out of range",
                query
            )));
        }

        tracing::debug!(query, %coordinate, "geocoded");
        Ok(Place {
            coordinate,
            label: if first.display_name.is_empty() {
                query.to_string()
            } else {
                first.display_name.clone()
            },
        })
    }
}
