use crate::core::error::TmapError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_KEY_ENV: &str = "ORS_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocoderProvider {
    Nominatim,
    OpenRouteService,
}

impl GeocoderProvider {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nominatim" => Some(GeocoderProvider::Nominatim),
            "openrouteservice" | "ors" => Some(GeocoderProvider::OpenRouteService),
            _ => None,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            GeocoderProvider::Nominatim => "https://nominatim.openstreetmap.org",
            GeocoderProvider::OpenRouteService => "https://api.openrouteservice.org",
        }
    }
}

impl Default for GeocoderProvider {
    fn default() -> Self {
        GeocoderProvider::Nominatim
    }
}

fn default_user_agent() -> String {
    format!("tmap/{}", env!("CARGO_PKG_VERSION"))
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_routing_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_profile() -> String {
    "driving-car".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    #[serde(default)]
    pub provider: GeocoderProvider,
    pub base_url: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Pause between the two lookups of one search, for the service's rate limit.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            provider: GeocoderProvider::default(),
            base_url: None,
            user_agent: default_user_agent(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl GeocoderConfig {
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.provider.default_base_url().to_string())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_routing_base_url(),
            profile: default_profile(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// File this configuration was read from or written to by `load`.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoder: GeocoderConfig::default(),
            routing: RoutingConfig::default(),
            request_timeout_secs: default_timeout_secs(),
            source: None,
        }
    }
}

impl Config {
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tmap")
    }

    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    pub fn history_path() -> PathBuf {
        Self::config_dir().join("input_history.txt")
    }

    /// Load the configuration at `path`, writing a default file if none exists.
    pub fn load(path: &Path) -> Result<Config, TmapError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let mut config = Self::from_yaml(&contents)
                .map_err(|e| TmapError::Config(format!("Parse {}: {}", path.display(), e)))?;
            tracing::debug!(path = %path.display(), "configuration loaded");
            config.source = Some(path.to_path_buf());
            return Ok(config);
        }

        let mut config = Config::default();
        if let Err(e) = config.save(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default configuration");
        }
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Config, TmapError> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yml::from_str::<Config>(contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), TmapError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let yaml_content = serde_yml::to_string(self)?;
        fs::write(path, yaml_content)?;
        Ok(())
    }

    /// Switch geocoder by name, as given on the command line.
    pub fn set_geocoder(&mut self, name: &str) -> Result<(), TmapError> {
        let provider = GeocoderProvider::from_str(name).ok_or_else(|| {
            TmapError::Config(format!(
                "Unknown geocoder '{}'. Use nominatim or openrouteservice",
                name
            ))
        })?;
        if provider != self.geocoder.provider {
            // A base URL set for the other service would not apply.
            self.geocoder.base_url = None;
        }
        self.geocoder.provider = provider;
        Ok(())
    }

    /// Where the user should edit settings: the loaded file, else the default location.
    pub fn source_path(&self) -> PathBuf {
        self.source.clone().unwrap_or_else(Self::default_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The routing API key, with the environment taking precedence over the file.
    pub fn api_key(&self) -> Option<String> {
        Self::resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.routing.api_key.clone())
    }

    fn resolve_api_key(from_env: Option<String>, from_file: Option<String>) -> Option<String> {
        from_env
            .filter(|k| !k.trim().is_empty())
            .or(from_file.filter(|k| !k.trim().is_empty()))
    }
}
