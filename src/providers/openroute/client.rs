use crate::core::error::TmapError;
use crate::core::geo::Coordinate;
use crate::providers::base_client::HttpClient;
use crate::providers::openroute::types::*;
use crate::route::{self, Route};
use reqwest::Response;
use std::time::Duration;

/// Pull the service's own error message out of a failed response, if it sent one.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => format!("{} ({})", parsed.error.message(), status),
        Err(_) => format!("service returned status {}", status),
    }
}

#[derive(Clone)]
pub struct OpenRouteClient {
    pub profile: String,
    client: HttpClient,
}

impl OpenRouteClient {
    pub fn new(
        base_url: String,
        api_key: String,
        profile: String,
        timeout: Duration,
    ) -> Result<Self, TmapError> {
        let mut client = HttpClient::new(base_url, timeout, None)?;
        client.add_header("Authorization", api_key);
        Ok(Self { client, profile })
    }

    pub async fn directions(&self, waypoints: &[Coordinate]) -> Result<Route, TmapError> {
        if waypoints.len() < 2 {
            return Err(TmapError::Input(format!(
                "A route needs at least two waypoints, got {}",
                waypoints.len()
            )));
        }

        let payload = DirectionsRequest {
            coordinates: waypoints.iter().map(|c| c.to_lon_lat()).collect(),
        };

        let response = self
            .client
            .post(&format!("v2/directions/{}/geojson", self.profile), &payload)
            .await?;

        if !response.status().is_success() {
            return Err(TmapError::RouteUnavailable(error_message(response).await));
        }

        let body = response.text().await?;
        let parsed: RouteFeatureCollection = serde_json::from_str(&body).map_err(|e| {
            TmapError::RouteUnavailable(format!("Unexpected directions response: {}", e))
        })?;

        let feature = parsed
            .features
            .first()
            .ok_or_else(|| TmapError::RouteUnavailable("No route returned".to_string()))?;

        let geometry = feature
            .geometry
            .coordinates
            .iter()
            .map(|pair| Coordinate::from_lon_lat(*pair))
            .collect();

        Ok(Route {
            geometry,
            summary: route::present(feature),
        })
    }

    pub async fn geocode(&self, text: &str) -> Result<(Coordinate, Option<String>), TmapError> {
        let response = self
            .client
            .get("geocode/search", &[("text", text), ("size", "1")])
            .await?;

        if !response.status().is_success() {
            return Err(TmapError::Network(error_message(response).await));
        }

        let body = response.text().await?;
        let parsed: GeocodeCollection = serde_json::from_str(&body).map_err(|e| {
            TmapError::LocationNotFound(format!("{}: malformed response ({})", text, e))
        })?;

        let feature = parsed
            .features
            .into_iter()
            .next()
            .ok_or_else(|| TmapError::LocationNotFound(text.to_string()))?;

        let coordinate = match feature.geometry.as_ref().map(|g| g.coordinates.as_slice()) {
            Some([lon, lat, ..]) => Coordinate::new(*lat, *lon),
            _ => {
                return Err(TmapError::LocationNotFound(format!(
                    "{}: candidate has no usable coordinate",
                    text
                )));
            }
        };

        Ok((coordinate, feature.properties.label))
    }
}
