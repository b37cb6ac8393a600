use crate::core::error::TmapError;
use crate::core::geo::Coordinate;
use crate::providers::Place;
use crate::route::Route;

pub const SEARCH_NOT_FOUND_MESSAGE: &str =
    "Could not find one or both locations. Please try again with more specific addresses.";
pub const SEARCH_FAILED_MESSAGE: &str = "An error occurred while searching. Please try again.";
pub const ROUTE_FAILED_MESSAGE: &str = "Failed to fetch route details";

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub id: u64,
    pub coordinate: Coordinate,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Single,
    Ready,
}

/// A route fetch for the point list as it stood at `generation`.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub generation: u64,
    pub waypoints: Vec<Coordinate>,
}

/// Point list state for the map view.
///
/// Every change to the list bumps `generation`. A route result is only
/// committed when it was requested for the current generation.
#[derive(Debug, Clone)]
pub struct MapSurface {
    points: Vec<Point>,
    next_id: u64,
    generation: u64,
    route: Option<Route>,
    route_error: Option<String>,
    search_error: Option<String>,
    search_inputs: Option<(String, String)>,
}

impl Default for MapSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            next_id: 1,
            generation: 0,
            route: None,
            route_error: None,
            search_error: None,
            search_inputs: None,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn phase(&self) -> Phase {
        match self.points.len() {
            0 => Phase::Empty,
            1 => Phase::Single,
            _ => Phase::Ready,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn route_error(&self) -> Option<&str> {
        self.route_error.as_deref()
    }

    pub fn search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }

    /// The last submitted start and destination text.
    pub fn search_inputs(&self) -> Option<(&str, &str)> {
        self.search_inputs
            .as_ref()
            .map(|(start, destination)| (start.as_str(), destination.as_str()))
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a point placed directly on the map.
    pub fn add_point(&mut self, coordinate: Coordinate) -> Option<RouteRequest> {
        let id = self.allocate_id();
        self.points.push(Point {
            id,
            coordinate,
            label: format!("Location {}", id),
        });
        self.points_changed()
    }

    /// Replace the whole list with a resolved start and destination.
    pub fn replace_points(&mut self, start: Place, destination: Place) -> Option<RouteRequest> {
        let start_id = self.allocate_id();
        let destination_id = self.allocate_id();
        self.points = vec![
            Point {
                id: start_id,
                coordinate: start.coordinate,
                label: start.label,
            },
            Point {
                id: destination_id,
                coordinate: destination.coordinate,
                label: destination.label,
            },
        ];
        self.search_error = None;
        self.points_changed()
    }

    /// Remove the point with `id`. Unknown ids leave everything untouched.
    pub fn remove_point(&mut self, id: u64) -> Option<RouteRequest> {
        let index = self.points.iter().position(|p| p.id == id)?;
        self.points.remove(index);
        self.points_changed()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.search_inputs = None;
        self.search_error = None;
        self.route = None;
        self.route_error = None;
        self.generation += 1;
    }

    pub fn set_search_inputs(&mut self, start: &str, destination: &str) {
        self.search_inputs = Some((start.to_string(), destination.to_string()));
        self.search_error = None;
    }

    pub fn record_search_failure(&mut self, err: &TmapError) {
        let message = match err {
            TmapError::LocationNotFound(_) => SEARCH_NOT_FOUND_MESSAGE,
            _ => SEARCH_FAILED_MESSAGE,
        };
        self.search_error = Some(message.to_string());
    }

    /// The request for the current list, if it has enough points to route.
    pub fn current_request(&self) -> Option<RouteRequest> {
        if self.points.len() < 2 {
            return None;
        }
        Some(RouteRequest {
            generation: self.generation,
            waypoints: self.points.iter().map(|p| p.coordinate).collect(),
        })
    }

    fn points_changed(&mut self) -> Option<RouteRequest> {
        self.generation += 1;
        let request = self.current_request();
        if request.is_none() {
            self.route = None;
            self.route_error = None;
        }
        request
    }

    /// Apply a routing result. Returns false when the result is stale and was dropped.
    pub fn commit_route(&mut self, generation: u64, result: Result<Route, TmapError>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding stale route result"
            );
            return false;
        }

        match result {
            Ok(route) => {
                self.route = Some(route);
                self.route_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "route fetch failed");
                self.route = None;
                self.route_error = Some(ROUTE_FAILED_MESSAGE.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteSummary;

    fn place(label: &str, lat: f64, lon: f64) -> Place {
        Place {
            coordinate: Coordinate::new(lat, lon),
            label: label.to_string(),
        }
    }

    fn route(distance: f64) -> Route {
        Route {
            geometry: vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)],
            summary: RouteSummary {
                total_distance_m: distance,
                total_duration_s: 60.0,
                segments: Vec::new(),
            },
        }
    }

    #[test]
    fn test_clicks_walk_through_phases() {
        let mut surface = MapSurface::new();
        assert_eq!(surface.phase(), Phase::Empty);

        assert!(surface.add_point(Coordinate::new(51.5, -0.1)).is_none());
        assert_eq!(surface.phase(), Phase::Single);

        let request = surface.add_point(Coordinate::new(51.6, -0.2)).unwrap();
        assert_eq!(surface.phase(), Phase::Ready);
        assert_eq!(request.waypoints.len(), 2);
        assert_eq!(request.generation, surface.generation());

        let request = surface.add_point(Coordinate::new(51.7, -0.3)).unwrap();
        assert_eq!(surface.phase(), Phase::Ready);
        assert_eq!(request.waypoints.len(), 3);
    }

    #[test]
    fn test_click_labels_and_ids_increase() {
        let mut surface = MapSurface::new();
        surface.add_point(Coordinate::new(1.0, 1.0));
        surface.add_point(Coordinate::new(2.0, 2.0));
        let ids: Vec<u64> = surface.points().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(surface.points()[1].label, "Location 2");
    }

    #[test]
    fn test_search_replaces_existing_points() {
        let mut surface = MapSurface::new();
        surface.add_point(Coordinate::new(1.0, 1.0));
        surface.add_point(Coordinate::new(2.0, 2.0));
        surface.add_point(Coordinate::new(3.0, 3.0));

        let request = surface
            .replace_points(place("Start", 48.85, 2.29), place("End", 48.86, 2.35))
            .unwrap();

        assert_eq!(surface.points().len(), 2);
        assert_eq!(surface.points()[0].label, "Start");
        assert_eq!(surface.points()[1].label, "End");
        assert_eq!(
            request.waypoints,
            vec![Coordinate::new(48.85, 2.29), Coordinate::new(48.86, 2.35)]
        );
        // Ids keep counting; they are never reused.
        assert_eq!(surface.points()[0].id, 4);
        assert_eq!(surface.points()[1].id, 5);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut surface = MapSurface::new();
        surface.add_point(Coordinate::new(1.0, 1.0));
        surface.add_point(Coordinate::new(2.0, 2.0));
        let before = surface.points().to_vec();
        let generation = surface.generation();

        assert!(surface.remove_point(99).is_none());
        assert_eq!(surface.points(), before.as_slice());
        assert_eq!(surface.generation(), generation);
    }

    #[test]
    fn test_remove_transitions() {
        let mut surface = MapSurface::new();
        surface.add_point(Coordinate::new(1.0, 1.0));
        surface.add_point(Coordinate::new(2.0, 2.0));
        surface.add_point(Coordinate::new(3.0, 3.0));

        let request = surface.remove_point(2).unwrap();
        assert_eq!(request.waypoints.len(), 2);
        assert_eq!(surface.phase(), Phase::Ready);

        assert!(surface.remove_point(1).is_none());
        assert_eq!(surface.phase(), Phase::Single);

        assert!(surface.remove_point(3).is_none());
        assert_eq!(surface.phase(), Phase::Empty);
    }

    #[test]
    fn test_dropping_below_two_points_blanks_route() {
        let mut surface = MapSurface::new();
        surface.add_point(Coordinate::new(1.0, 1.0));
        let request = surface.add_point(Coordinate::new(2.0, 2.0)).unwrap();
        assert!(surface.commit_route(request.generation, Ok(route(1000.0))));
        assert!(surface.route().is_some());

        surface.remove_point(1);
        assert!(surface.route().is_none());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut surface = MapSurface::new();
        surface.add_point(Coordinate::new(1.0, 1.0));
        let old = surface.add_point(Coordinate::new(2.0, 2.0)).unwrap();
        let new = surface.add_point(Coordinate::new(3.0, 3.0)).unwrap();

        // Newer result lands first, then the slow stale one arrives.
        assert!(surface.commit_route(new.generation, Ok(route(3000.0))));
        assert!(!surface.commit_route(old.generation, Ok(route(1000.0))));

        assert_eq!(surface.route().unwrap().summary.total_distance_m, 3000.0);
    }

    #[test]
    fn test_route_failure_keeps_markers() {
        let mut surface = MapSurface::new();
        surface.add_point(Coordinate::new(1.0, 1.0));
        let first = surface.add_point(Coordinate::new(2.0, 2.0)).unwrap();
        surface.commit_route(first.generation, Ok(route(1000.0)));

        let second = surface.add_point(Coordinate::new(3.0, 3.0)).unwrap();
        surface.commit_route(
            second.generation,
            Err(TmapError::RouteUnavailable("no route".to_string())),
        );

        assert_eq!(surface.points().len(), 3);
        assert!(surface.route().is_none());
        assert_eq!(surface.route_error(), Some(ROUTE_FAILED_MESSAGE));
    }

    #[test]
    fn test_clear_resets_and_supersedes_in_flight() {
        let mut surface = MapSurface::new();
        surface.add_point(Coordinate::new(1.0, 1.0));
        let request = surface.add_point(Coordinate::new(2.0, 2.0)).unwrap();
        surface.set_search_inputs("a", "b");

        surface.clear();
        assert_eq!(surface.phase(), Phase::Empty);
        assert!(surface.search_inputs().is_none());
        assert!(!surface.commit_route(request.generation, Ok(route(1000.0))));
        assert!(surface.route().is_none());

        // The id counter survives a clear.
        surface.add_point(Coordinate::new(5.0, 5.0));
        assert_eq!(surface.points()[0].id, 3);
    }

    #[test]
    fn test_search_failure_messages() {
        let mut surface = MapSurface::new();
        surface.record_search_failure(&TmapError::LocationNotFound("x".to_string()));
        assert_eq!(surface.search_error(), Some(SEARCH_NOT_FOUND_MESSAGE));

        surface.record_search_failure(&TmapError::Network("timeout".to_string()));
        assert_eq!(surface.search_error(), Some(SEARCH_FAILED_MESSAGE));

        surface.replace_points(place("A", 1.0, 1.0), place("B", 2.0, 2.0));
        assert!(surface.search_error().is_none());
    }
}
