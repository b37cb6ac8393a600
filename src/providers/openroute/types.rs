use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct DirectionsRequest {
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteFeatureCollection {
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteFeature {
    pub geometry: LineString,
    pub properties: RouteProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineString {
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteProperties {
    #[serde(default)]
    pub summary: RawSummary,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

/// The service omits zero-valued fields, so everything defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSummary {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSegment {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub steps: Vec<RawStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStep {
    #[serde(rename = "type")]
    pub kind: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Structured { message: String },
    Plain(String),
}

impl ErrorDetail {
    pub fn message(&self) -> &str {
        match self {
            ErrorDetail::Structured { message } => message,
            ErrorDetail::Plain(message) => message,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GeocodeCollection {
    #[serde(default)]
    pub features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeFeature {
    pub geometry: Option<PointGeometry>,
    #[serde(default)]
    pub properties: GeocodeProperties,
}

#[derive(Debug, Deserialize)]
pub struct PointGeometry {
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeocodeProperties {
    #[serde(default)]
    pub label: Option<String>,
}
