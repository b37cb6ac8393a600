use super::{ChatState, MapState, SessionControl};
use crate::core::error::TmapError;
use crate::core::geo::Coordinate;
use crate::display;
use async_trait::async_trait;
use console::style;
use regex::Regex;
use std::sync::LazyLock;

static COORDINATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*[,\s]\s*(-?\d+(?:\.\d+)?)\s*$")
        .expect("coordinate pattern is valid")
});

/// Parse "lat lon" or "lat, lon".
pub fn parse_coordinate(text: &str) -> Option<Coordinate> {
    let caps = COORDINATE_RE.captures(text)?;
    let lat = caps.get(1)?.as_str().parse().ok()?;
    let lon = caps.get(2)?.as_str().parse().ok()?;
    let coordinate = Coordinate::new(lat, lon);
    coordinate.is_valid().then_some(coordinate)
}

#[async_trait]
pub trait CommandHandler<S: Send>: Send + Sync {
    async fn execute(&self, state: &mut S, args: &[&str]) -> Result<Option<String>, TmapError>;
    fn help(&self) -> &'static str;
}

pub const HELP_LINE: &str = "/help - Show available commands";

pub struct QuitCommand;

pub struct HelpCommand {
    lines: Vec<&'static str>,
}

impl HelpCommand {
    pub fn new(lines: Vec<&'static str>) -> Self {
        Self { lines }
    }
}

pub struct SearchCommand;
pub struct AddPointCommand;
pub struct RemovePointCommand;
pub struct ClearCommand;
pub struct PointsCommand;
pub struct RouteCommand;
pub struct RefreshCommand;
pub struct HistoryCommand;

#[async_trait]
impl<S: SessionControl + Send> CommandHandler<S> for QuitCommand {
    async fn execute(&self, state: &mut S, _args: &[&str]) -> Result<Option<String>, TmapError> {
        state.stop();
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/quit - Leave the session"
    }
}

#[async_trait]
impl<S: Send> CommandHandler<S> for HelpCommand {
    async fn execute(&self, _state: &mut S, _args: &[&str]) -> Result<Option<String>, TmapError> {
        let title = style("Available Commands").bold().underlined();
        let mut help_text = vec![title.to_string()];
        help_text.extend(self.lines.iter().map(|line| line.to_string()));
        Ok(Some(help_text.join("\n")))
    }

    fn help(&self) -> &'static str {
        HELP_LINE
    }
}

#[async_trait]
impl CommandHandler<MapState> for SearchCommand {
    async fn execute(
        &self,
        state: &mut MapState,
        args: &[&str],
    ) -> Result<Option<String>, TmapError> {
        let joined = args.join(" ");
        let Some((start, destination)) = joined.split_once('|') else {
            return Ok(Some("Usage: /search <start> | <destination>".to_string()));
        };

        match state.session.search(start, destination).await {
            Ok(()) => Ok(Some(format!(
                "{}\n{}",
                display::render_points(state.session.surface().points()),
                style("Fetching route...").dim()
            ))),
            Err(TmapError::Input(msg)) => Err(TmapError::Input(msg)),
            Err(_) => Ok(state
                .session
                .surface()
                .search_error()
                .map(display::render_error)),
        }
    }

    fn help(&self) -> &'static str {
        "/search <start> | <destination> - Find two places and route between them"
    }
}

#[async_trait]
impl CommandHandler<MapState> for AddPointCommand {
    async fn execute(
        &self,
        state: &mut MapState,
        args: &[&str],
    ) -> Result<Option<String>, TmapError> {
        let Some(coordinate) = parse_coordinate(&args.join(" ")) else {
            return Ok(Some(
                "Usage: /add <lat> <lon>  (latitude -90..90, longitude -180..180)".to_string(),
            ));
        };

        state.session.add_point(coordinate);
        let added = state
            .session
            .surface()
            .points()
            .last()
            .map(|p| format!("Added {} (#{}) at {}", p.label, p.id, p.coordinate))
            .unwrap_or_default();

        if state.session.is_route_pending() {
            Ok(Some(format!("{}\n{}", added, style("Fetching route...").dim())))
        } else {
            Ok(Some(added))
        }
    }

    fn help(&self) -> &'static str {
        "/add <lat> <lon> - Drop a point on the map"
    }
}

#[async_trait]
impl CommandHandler<MapState> for RemovePointCommand {
    async fn execute(
        &self,
        state: &mut MapState,
        args: &[&str],
    ) -> Result<Option<String>, TmapError> {
        let Some(id) = args.first().and_then(|a| a.trim_start_matches('#').parse::<u64>().ok())
        else {
            return Ok(Some("Usage: /remove <id>".to_string()));
        };

        if state.session.remove_point(id) {
            Ok(Some(format!("Removed point #{}", id)))
        } else {
            Ok(Some(format!("No point with id #{}", id)))
        }
    }

    fn help(&self) -> &'static str {
        "/remove <id> - Remove a point"
    }
}

#[async_trait]
impl CommandHandler<MapState> for ClearCommand {
    async fn execute(
        &self,
        state: &mut MapState,
        _args: &[&str],
    ) -> Result<Option<String>, TmapError> {
        state.session.clear();
        Ok(Some("Cleared all points.".to_string()))
    }

    fn help(&self) -> &'static str {
        "/clear - Remove every point and the route"
    }
}

#[async_trait]
impl CommandHandler<MapState> for PointsCommand {
    async fn execute(
        &self,
        state: &mut MapState,
        _args: &[&str],
    ) -> Result<Option<String>, TmapError> {
        let surface = state.session.surface();
        let points = display::render_points(surface.points());
        match surface.search_inputs() {
            Some((start, destination)) => Ok(Some(format!(
                "{}\n{}",
                style(format!("Last search: {} | {}", start, destination)).dim(),
                points
            ))),
            None => Ok(Some(points)),
        }
    }

    fn help(&self) -> &'static str {
        "/points - List the points on the map"
    }
}

#[async_trait]
impl CommandHandler<MapState> for RouteCommand {
    async fn execute(
        &self,
        state: &mut MapState,
        _args: &[&str],
    ) -> Result<Option<String>, TmapError> {
        state.session.settle().await;
        Ok(Some(display::render_route_status(state.session.surface())))
    }

    fn help(&self) -> &'static str {
        "/route - Show route details for the current points"
    }
}

#[async_trait]
impl CommandHandler<MapState> for RefreshCommand {
    async fn execute(
        &self,
        state: &mut MapState,
        _args: &[&str],
    ) -> Result<Option<String>, TmapError> {
        if state.session.refresh_route() {
            state.session.settle().await;
        }
        Ok(Some(display::render_route_status(state.session.surface())))
    }

    fn help(&self) -> &'static str {
        "/refresh - Fetch the route again for the current points"
    }
}

#[async_trait]
impl CommandHandler<ChatState> for HistoryCommand {
    async fn execute(
        &self,
        state: &mut ChatState,
        _args: &[&str],
    ) -> Result<Option<String>, TmapError> {
        if state.transcript.is_empty() {
            return Ok(Some("No messages yet.".to_string()));
        }
        Ok(Some(display::render_transcript(&state.transcript)))
    }

    fn help(&self) -> &'static str {
        "/history - Show this conversation"
    }
}
