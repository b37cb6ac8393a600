//! Route presentation.
//!
//! Turns the raw routing feature into the flat summary shown to the user.
//! Nothing in here performs I/O.

mod format;

pub use format::{format_distance, format_duration};

use crate::core::geo::Coordinate;
use crate::providers::openroute::types::RouteFeature;

pub const UNKNOWN_KIND: &str = "Unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub distance_m: f64,
    pub duration_s: f64,
    pub kind_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub total_distance_m: f64,
    pub total_duration_s: f64,
    pub segments: Vec<Segment>,
}

/// A fetched route: the path to draw plus its summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub geometry: Vec<Coordinate>,
    pub summary: RouteSummary,
}

/// Build the summary for one routing feature.
///
/// Totals are taken from the feature's own summary rather than re-summed
/// from the segments.
pub fn present(feature: &RouteFeature) -> RouteSummary {
    let segments = feature
        .properties
        .segments
        .iter()
        .map(|segment| Segment {
            distance_m: segment.distance,
            duration_s: segment.duration,
            kind_label: kind_label(segment.steps.first().and_then(|step| step.kind)),
        })
        .collect();

    RouteSummary {
        total_distance_m: feature.properties.summary.distance,
        total_duration_s: feature.properties.summary.duration,
        segments,
    }
}

/// Name for an openrouteservice instruction type.
pub fn kind_label(step_type: Option<u8>) -> String {
    let Some(code) = step_type else {
        return UNKNOWN_KIND.to_string();
    };

    let name = match code {
        0 => "Left",
        1 => "Right",
        2 => "Sharp left",
        3 => "Sharp right",
        4 => "Slight left",
        5 => "Slight right",
        6 => "Straight",
        7 => "Enter roundabout",
        8 => "Exit roundabout",
        9 => "U-turn",
        10 => "Goal",
        11 => "Depart",
        12 => "Keep left",
        13 => "Keep right",
        other => return format!("Instruction {}", other),
    };
    name.to_string()
}
