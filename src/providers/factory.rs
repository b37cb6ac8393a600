use crate::config::{Config, GeocoderProvider};
use crate::core::error::TmapError;
use crate::providers::nominatim::NominatimGeocoder;
use crate::providers::openroute::{OpenRouteGeocoder, OpenRouteRouter};
use crate::providers::{Geocoder, RoutingService};
use std::collections::HashMap;
use std::sync::Arc;

type GeocoderCreator = Box<dyn Fn(&Config) -> Result<Arc<dyn Geocoder>, TmapError> + Send + Sync>;

fn missing_key_error(config: &Config) -> TmapError {
    TmapError::Config(format!(
        "No openrouteservice API key configured. Set routing.api_key in {} or the {} environment variable",
        config.source_path().display(),
        crate::config::API_KEY_ENV
    ))
}

fn require_api_key(config: &Config) -> Result<String, TmapError> {
    config.api_key().ok_or_else(|| missing_key_error(config))
}

pub struct ProviderFactory {
    geocoders: HashMap<GeocoderProvider, GeocoderCreator>,
}

impl ProviderFactory {
    pub fn new() -> Self {
        let mut geocoders = HashMap::new();

        geocoders.insert(
            GeocoderProvider::Nominatim,
            Box::new(|config: &Config| {
                let geocoder = NominatimGeocoder::new(
                    config.geocoder.base_url(),
                    config.geocoder.user_agent.clone(),
                    config.request_timeout(),
                )?;
                Ok(Arc::new(geocoder) as Arc<dyn Geocoder>)
            }) as GeocoderCreator,
        );

        geocoders.insert(
            GeocoderProvider::OpenRouteService,
            Box::new(|config: &Config| {
                let geocoder = OpenRouteGeocoder::new(
                    config.geocoder.base_url(),
                    require_api_key(config)?,
                    config.request_timeout(),
                )?;
                Ok(Arc::new(geocoder) as Arc<dyn Geocoder>)
            }) as GeocoderCreator,
        );

        Self { geocoders }
    }

    pub fn create_geocoder(&self, config: &Config) -> Result<Arc<dyn Geocoder>, TmapError> {
        let provider = config.geocoder.provider;
        self.geocoders
            .get(&provider)
            .ok_or_else(|| TmapError::Config(format!("Geocoder not found: {:?}", provider)))
            .and_then(|creator| creator(config))
    }

    pub fn create_router(&self, config: &Config) -> Result<Arc<dyn RoutingService>, TmapError> {
        let router = OpenRouteRouter::new(
            config.routing.base_url.clone(),
            require_api_key(config)?,
            config.routing.profile.clone(),
            config.request_timeout(),
        )?;
        Ok(Arc::new(router))
    }
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}
