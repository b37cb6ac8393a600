use crate::core::error::TmapError;
use crate::core::geo::Coordinate;
use crate::map::surface::{MapSurface, RouteRequest};
use crate::providers::{Geocoder, Place, RoutingService};
use crate::route::Route;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{Id, JoinError, JoinSet};

type RouteCompletion = (u64, Result<Route, TmapError>);

/// Drives a [`MapSurface`]: geocodes searches and runs route fetches in the background.
pub struct MapSession {
    surface: MapSurface,
    geocoder: Arc<dyn Geocoder>,
    router: Arc<dyn RoutingService>,
    geocode_delay: Duration,
    fetches: JoinSet<RouteCompletion>,
    /// Generation each running fetch was requested for, so a task that dies still settles.
    fetch_generations: HashMap<Id, u64>,
}

impl MapSession {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        router: Arc<dyn RoutingService>,
        geocode_delay: Duration,
    ) -> Self {
        Self {
            surface: MapSurface::new(),
            geocoder,
            router,
            geocode_delay,
            fetches: JoinSet::new(),
            fetch_generations: HashMap::new(),
        }
    }

    pub fn surface(&self) -> &MapSurface {
        &self.surface
    }

    pub fn is_route_pending(&self) -> bool {
        !self.fetches.is_empty()
    }

    /// Resolve both places and replace the point list with them.
    ///
    /// On failure the point list is left as it was and the user-facing
    /// message is recorded on the surface.
    pub async fn search(&mut self, start: &str, destination: &str) -> Result<(), TmapError> {
        let (start, destination) = (start.trim(), destination.trim());
        if start.is_empty() || destination.is_empty() {
            return Err(TmapError::Input(
                "Both a start and a destination are required".to_string(),
            ));
        }

        self.surface.set_search_inputs(start, destination);

        match self.resolve_pair(start, destination).await {
            Ok((start_place, destination_place)) => {
                let request = self.surface.replace_points(start_place, destination_place);
                self.dispatch(request);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(start, destination, network = err.is_network(), error = %err, "location search failed");
                self.surface.record_search_failure(&err);
                Err(err)
            }
        }
    }

    async fn resolve_pair(&self, start: &str, destination: &str) -> Result<(Place, Place), TmapError> {
        let start_place = self.geocoder.resolve(start).await?;
        // Geocoders rate-limit per client; space the two lookups out.
        if !self.geocode_delay.is_zero() {
            tokio::time::sleep(self.geocode_delay).await;
        }
        let destination_place = self.geocoder.resolve(destination).await?;
        Ok((start_place, destination_place))
    }

    pub fn add_point(&mut self, coordinate: Coordinate) {
        let request = self.surface.add_point(coordinate);
        self.dispatch(request);
    }

    /// Returns whether a point with `id` existed.
    pub fn remove_point(&mut self, id: u64) -> bool {
        let existed = self.surface.points().iter().any(|p| p.id == id);
        let request = self.surface.remove_point(id);
        self.dispatch(request);
        existed
    }

    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// Fetch the route for the current list again, if there is one to fetch.
    pub fn refresh_route(&mut self) -> bool {
        let request = self.surface.current_request();
        let dispatched = request.is_some();
        self.dispatch(request);
        dispatched
    }

    fn dispatch(&mut self, request: Option<RouteRequest>) {
        let Some(RouteRequest {
            generation,
            waypoints,
        }) = request
        else {
            return;
        };

        let router = Arc::clone(&self.router);
        let handle = self.fetches.spawn(async move {
            let result = router.route(&waypoints).await;
            (generation, result)
        });
        self.fetch_generations.insert(handle.id(), generation);
    }

    fn apply(&mut self, joined: Result<(Id, RouteCompletion), JoinError>) {
        let (generation, result) = match joined {
            Ok((id, completion)) => {
                self.fetch_generations.remove(&id);
                completion
            }
            Err(err) => {
                let Some(generation) = self.fetch_generations.remove(&err.id()) else {
                    return;
                };
                tracing::error!(generation, error = %err, "route fetch task failed");
                (
                    generation,
                    Err(TmapError::RouteUnavailable(format!("route fetch aborted: {}", err))),
                )
            }
        };
        self.surface.commit_route(generation, result);
    }

    /// Commit whatever route results have arrived, without waiting.
    pub fn poll_routes(&mut self) -> usize {
        let mut applied = 0;
        while let Some(joined) = self.fetches.try_join_next_with_id() {
            self.apply(joined);
            applied += 1;
        }
        applied
    }

    /// Wait for every outstanding route fetch and commit the results.
    pub async fn settle(&mut self) {
        while let Some(joined) = self.fetches.join_next_with_id().await {
            self.apply(joined);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::surface::{Phase, ROUTE_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE, SEARCH_NOT_FOUND_MESSAGE};
    use crate::route::RouteSummary;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeGeocoder {
        places: HashMap<String, Coordinate>,
        calls: AtomicUsize,
    }

    impl FakeGeocoder {
        fn new() -> Self {
            let mut places = HashMap::new();
            places.insert("Eiffel Tower".to_string(), Coordinate::new(48.8584, 2.2945));
            places.insert("Louvre".to_string(), Coordinate::new(48.8606, 2.3376));
            places.insert("Big Ben".to_string(), Coordinate::new(51.5007, -0.1246));
            Self {
                places,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn resolve(&self, place: &str) -> Result<Place, TmapError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if place == "offline" {
                return Err(TmapError::Network("Connection failed".to_string()));
            }
            self.places
                .get(place)
                .map(|coordinate| Place {
                    coordinate: *coordinate,
                    label: place.to_string(),
                })
                .ok_or_else(|| TmapError::LocationNotFound(place.to_string()))
        }
    }

    /// Sums waypoint count into the distance; the first request can be made slow.
    struct FakeRouter {
        calls: Mutex<Vec<Vec<Coordinate>>>,
        slow_first: bool,
        fail: bool,
    }

    impl FakeRouter {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                slow_first: false,
                fail: false,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RoutingService for FakeRouter {
        async fn route(&self, waypoints: &[Coordinate]) -> Result<Route, TmapError> {
            let call_index = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(waypoints.to_vec());
                calls.len()
            };

            if self.slow_first && call_index == 1 {
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
            if self.fail {
                return Err(TmapError::RouteUnavailable("no route".to_string()));
            }

            Ok(Route {
                geometry: waypoints.to_vec(),
                summary: RouteSummary {
                    total_distance_m: waypoints.len() as f64 * 1000.0,
                    total_duration_s: 60.0,
                    segments: Vec::new(),
                },
            })
        }
    }

    fn session(router: Arc<FakeRouter>) -> MapSession {
        MapSession::new(Arc::new(FakeGeocoder::new()), router, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_search_places_two_points_and_routes() {
        let router = Arc::new(FakeRouter::new());
        let mut session = session(router.clone());

        session.search("Eiffel Tower", "Louvre").await.unwrap();
        session.settle().await;

        let points = session.surface().points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "Eiffel Tower");
        assert_eq!(points[1].label, "Louvre");
        assert_eq!(router.call_count(), 1);
        assert_eq!(
            session.surface().route().unwrap().summary.total_distance_m,
            2000.0
        );
    }

    #[tokio::test]
    async fn test_search_replaces_clicked_points() {
        let router = Arc::new(FakeRouter::new());
        let mut session = session(router.clone());

        session.add_point(Coordinate::new(1.0, 1.0));
        session.add_point(Coordinate::new(2.0, 2.0));
        session.add_point(Coordinate::new(3.0, 3.0));
        session.search("Eiffel Tower", "Big Ben").await.unwrap();
        session.settle().await;

        let labels: Vec<&str> = session
            .surface()
            .points()
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Eiffel Tower", "Big Ben"]);
        assert_eq!(
            session.surface().route().unwrap().geometry,
            vec![Coordinate::new(48.8584, 2.2945), Coordinate::new(51.5007, -0.1246)]
        );
    }

    #[tokio::test]
    async fn test_search_not_found_leaves_points() {
        let router = Arc::new(FakeRouter::new());
        let mut session = session(router.clone());
        session.add_point(Coordinate::new(1.0, 1.0));

        let err = session
            .search("Eiffel Tower", "xyzzynotaplace123")
            .await
            .unwrap_err();
        assert!(matches!(err, TmapError::LocationNotFound(_)));

        assert_eq!(session.surface().points().len(), 1);
        assert_eq!(session.surface().phase(), Phase::Single);
        assert_eq!(session.surface().search_error(), Some(SEARCH_NOT_FOUND_MESSAGE));
        assert_eq!(router.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_network_failure_message() {
        let router = Arc::new(FakeRouter::new());
        let mut session = session(router);

        assert!(session.search("offline", "Louvre").await.is_err());
        assert_eq!(session.surface().search_error(), Some(SEARCH_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_search_requires_both_inputs() {
        let router = Arc::new(FakeRouter::new());
        let geocoder = Arc::new(FakeGeocoder::new());
        let mut session = MapSession::new(geocoder.clone(), router, Duration::ZERO);

        assert!(matches!(
            session.search("Eiffel Tower", "  ").await.unwrap_err(),
            TmapError::Input(_)
        ));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_waits_between_lookups() {
        let router = Arc::new(FakeRouter::new());
        let mut session =
            MapSession::new(Arc::new(FakeGeocoder::new()), router, Duration::from_secs(1));

        let started = tokio::time::Instant::now();
        session.search("Eiffel Tower", "Louvre").await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_no_route_call_below_two_points() {
        let router = Arc::new(FakeRouter::new());
        let mut session = session(router.clone());

        session.add_point(Coordinate::new(1.0, 1.0));
        session.settle().await;
        assert!(!session.is_route_pending());
        assert!(!session.refresh_route());
        assert_eq!(router.call_count(), 0);

        session.add_point(Coordinate::new(2.0, 2.0));
        session.settle().await;
        assert_eq!(router.call_count(), 1);
    }

    #[tokio::test]
    async fn test_clicks_route_through_every_point() {
        let router = Arc::new(FakeRouter::new());
        let mut session = session(router.clone());

        session.add_point(Coordinate::new(1.0, 1.0));
        session.add_point(Coordinate::new(2.0, 2.0));
        session.add_point(Coordinate::new(3.0, 3.0));
        session.settle().await;

        let calls = router.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].len(), 3);
        assert_eq!(
            session.surface().route().unwrap().summary.total_distance_m,
            3000.0
        );
    }

    #[tokio::test]
    async fn test_slow_stale_route_does_not_overwrite_newer() {
        let router = Arc::new(FakeRouter {
            calls: Mutex::new(Vec::new()),
            slow_first: true,
            fail: false,
        });
        let mut session = session(router.clone());

        session.add_point(Coordinate::new(1.0, 1.0));
        session.add_point(Coordinate::new(2.0, 2.0)); // slow fetch for 2 points
        session.add_point(Coordinate::new(3.0, 3.0)); // fast fetch for 3 points
        session.settle().await;

        assert_eq!(router.call_count(), 2);
        assert!(!session.is_route_pending());
        assert_eq!(
            session.surface().route().unwrap().summary.total_distance_m,
            3000.0
        );
    }

    #[tokio::test]
    async fn test_route_failure_keeps_points() {
        let router = Arc::new(FakeRouter {
            calls: Mutex::new(Vec::new()),
            slow_first: false,
            fail: true,
        });
        let mut session = session(router);

        session.add_point(Coordinate::new(1.0, 1.0));
        session.add_point(Coordinate::new(2.0, 2.0));
        session.settle().await;

        assert_eq!(session.surface().points().len(), 2);
        assert!(session.surface().route().is_none());
        assert_eq!(session.surface().route_error(), Some(ROUTE_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_remove_unknown_point() {
        let router = Arc::new(FakeRouter::new());
        let mut session = session(router.clone());
        session.add_point(Coordinate::new(1.0, 1.0));
        session.add_point(Coordinate::new(2.0, 2.0));
        session.settle().await;

        assert!(!session.remove_point(42));
        session.settle().await;
        assert_eq!(session.surface().points().len(), 2);
        assert_eq!(router.call_count(), 1);
    }

    #[tokio::test]
    async fn test_clear_discards_in_flight() {
        let router = Arc::new(FakeRouter {
            calls: Mutex::new(Vec::new()),
            slow_first: true,
            fail: false,
        });
        let mut session = session(router);

        session.add_point(Coordinate::new(1.0, 1.0));
        session.add_point(Coordinate::new(2.0, 2.0));
        session.clear();
        session.settle().await;

        assert_eq!(session.surface().phase(), Phase::Empty);
        assert!(session.surface().route().is_none());
    }

    #[tokio::test]
    async fn test_poll_routes_does_not_block() {
        let router = Arc::new(FakeRouter {
            calls: Mutex::new(Vec::new()),
            slow_first: true,
            fail: false,
        });
        let mut session = session(router);

        session.add_point(Coordinate::new(1.0, 1.0));
        session.add_point(Coordinate::new(2.0, 2.0));
        assert_eq!(session.poll_routes(), 0);
        assert!(session.is_route_pending());

        session.settle().await;
        assert_eq!(session.poll_routes(), 0);
        assert!(session.surface().route().is_some());
    }

    struct PanickingRouter;

    #[async_trait]
    impl RoutingService for PanickingRouter {
        async fn route(&self, _waypoints: &[Coordinate]) -> Result<Route, TmapError> {
            panic!("router blew up");
        }
    }

    #[tokio::test]
    async fn test_panicking_fetch_settles_as_route_failure() {
        let mut session = MapSession::new(
            Arc::new(FakeGeocoder::new()),
            Arc::new(PanickingRouter),
            Duration::ZERO,
        );

        session.add_point(Coordinate::new(1.0, 1.0));
        session.add_point(Coordinate::new(2.0, 2.0));
        assert!(session.is_route_pending());

        tokio::time::timeout(Duration::from_secs(5), session.settle())
            .await
            .expect("settle returned");

        assert!(!session.is_route_pending());
        assert_eq!(session.surface().points().len(), 2);
        assert_eq!(session.surface().route_error(), Some(ROUTE_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_routing_timeout_shows_route_failure() {
        use crate::providers::openroute::OpenRouteRouter;
        use axum::Router;
        use axum::routing::post;

        async fn slow_directions() -> &'static str {
            tokio::time::sleep(Duration::from_secs(3)).await;
            "{}"
        }

        let app = Router::new().route("/v2/directions/{profile}/geojson", post(slow_directions));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let router = OpenRouteRouter::new(
            format!("http://{}", addr),
            "key".to_string(),
            "driving-car".to_string(),
            Duration::from_millis(200),
        )
        .unwrap();
        let mut session = MapSession::new(Arc::new(FakeGeocoder::new()), Arc::new(router), Duration::ZERO);

        session.search("Eiffel Tower", "Louvre").await.unwrap();
        session.settle().await;

        assert_eq!(session.surface().points().len(), 2);
        assert!(session.surface().route().is_none());
        assert_eq!(session.surface().route_error(), Some(ROUTE_FAILED_MESSAGE));
    }
}
