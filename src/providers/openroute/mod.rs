use crate::core::error::TmapError;
use crate::core::geo::Coordinate;
use crate::providers::{Geocoder, Place, RoutingService, validate_place_query};
use crate::route::Route;
use async_trait::async_trait;
use std::time::Duration;

mod client;
pub mod types;

pub use client::OpenRouteClient;

/// Driving directions from openrouteservice.
#[derive(Clone)]
pub struct OpenRouteRouter {
    client: OpenRouteClient,
}

impl OpenRouteRouter {
    pub fn new(
        base_url: String,
        api_key: String,
        profile: String,
        timeout: Duration,
    ) -> Result<Self, TmapError> {
        Ok(Self {
            client: OpenRouteClient::new(base_url, api_key, profile, timeout)?,
        })
    }
}

#[async_trait]
impl RoutingService for OpenRouteRouter {
    async fn route(&self, waypoints: &[Coordinate]) -> Result<Route, TmapError> {
        tracing::debug!(
            profile = %self.client.profile,
            waypoints = waypoints.len(),
            "requesting route"
        );
        self.client.directions(waypoints).await
    }
}

/// Geocoding through openrouteservice's search endpoint.
#[derive(Clone)]
pub struct OpenRouteGeocoder {
    client: OpenRouteClient,
}

impl OpenRouteGeocoder {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, TmapError> {
        Ok(Self {
            client: OpenRouteClient::new(base_url, api_key, String::new(), timeout)?,
        })
    }
}

#[async_trait]
impl Geocoder for OpenRouteGeocoder {
    async fn resolve(&self, place: &str) -> Result<Place, TmapError> {
        let query = validate_place_query(place)?;
        let (coordinate, label) = self.client.geocode(query).await?;

        if !coordinate.is_valid() {
            return Err(TmapError::LocationNotFound(format!(
                "{}: coordinate out of range",
                query
            )));
        }

        Ok(Place {
            coordinate,
            label: label.unwrap_or_else(|| query.to_string()),
        })
    }
}
