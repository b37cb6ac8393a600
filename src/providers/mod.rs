use crate::core::error::TmapError;
use crate::core::geo::Coordinate;
use crate::route::Route;
use async_trait::async_trait;

/// A geocoder match.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub coordinate: Coordinate,
    pub label: String,
}

/// Resolves free-text place names to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns the first match for `place`, or `LocationNotFound`.
    async fn resolve(&self, place: &str) -> Result<Place, TmapError>;
}

/// Requests driving routes through an ordered list of waypoints.
#[async_trait]
pub trait RoutingService: Send + Sync {
    async fn route(&self, waypoints: &[Coordinate]) -> Result<Route, TmapError>;
}

pub(crate) fn validate_place_query(place: &str) -> Result<&str, TmapError> {
    let trimmed = place.trim();
    if trimmed.is_empty() {
        return Err(TmapError::Input("Place name cannot be empty".to_string()));
    }
    Ok(trimmed)
}

pub mod base_client;
pub mod factory;
pub mod nominatim;
pub mod openroute;
