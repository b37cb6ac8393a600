use crate::chat::{Sender, Transcript};
use crate::core::geo::{Coordinate, TravelMode, estimate_travel_time, haversine_km};
use crate::map::{MapSurface, Phase, Point};
use crate::route::{Route, format_distance, format_duration};
use console::style;
use termimad::MadSkin;

fn box_width(max: usize, min: usize) -> usize {
    let term = console::Term::stdout();
    let terminal_width = term.size().1 as usize;
    std::cmp::min(terminal_width.saturating_sub(4), max).max(min)
}

/// Break `line` into pieces no longer than `width` characters, preferring spaces.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split(' ') {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        // A single word wider than the box is cut hard.
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > width {
            let rest = chars.split_off(width);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }
        current = chars.into_iter().collect();
    }

    lines.push(current);
    lines
}

/// One line per point, followed by straight-line legs between neighbours.
pub fn render_points(points: &[Point]) -> String {
    if points.is_empty() {
        return style("No points on the map. Use /search or /add.").dim().to_string();
    }

    let mut lines = vec![style("Points").bold().underlined().to_string()];
    for point in points {
        lines.push(format!(
            "  {} {}  {}",
            style(format!("#{}", point.id)).bold().cyan(),
            point.label,
            style(point.coordinate).dim()
        ));
    }

    if points.len() > 1 {
        lines.push(style("Straight-line legs").bold().underlined().to_string());
        for pair in points.windows(2) {
            let km = haversine_km(pair[0].coordinate, pair[1].coordinate);
            lines.push(format!(
                "  #{} -> #{}  {:.1} km  {}",
                pair[0].id,
                pair[1].id,
                km,
                style(format!(
                    "car {} / bike {} / foot {}",
                    estimate_travel_time(km, TravelMode::Driving),
                    estimate_travel_time(km, TravelMode::Cycling),
                    estimate_travel_time(km, TravelMode::Walking)
                ))
                .dim()
            ));
        }
    }

    lines.join("\n")
}

fn segment_table(route: &Route) -> String {
    let mut md = String::from("|#|Distance|Duration|Maneuver|\n|-:|-:|-:|:-|\n");
    for (index, segment) in route.summary.segments.iter().enumerate() {
        md.push_str(&format!(
            "|{}|{}|{}|{}|\n",
            index + 1,
            format_distance(segment.distance_m),
            format_duration(segment.duration_s),
            segment.kind_label
        ));
    }
    MadSkin::default().term_text(&md).to_string()
}

/// South-west and north-east corners of the path.
fn bounding_box(geometry: &[Coordinate]) -> Option<(Coordinate, Coordinate)> {
    let first = *geometry.first()?;
    Some(geometry.iter().fold((first, first), |(sw, ne), c| {
        (
            Coordinate::new(sw.lat.min(c.lat), sw.lon.min(c.lon)),
            Coordinate::new(ne.lat.max(c.lat), ne.lon.max(c.lon)),
        )
    }))
}

pub fn render_route(route: &Route) -> String {
    let mut out = format!(
        "{}\n  {} {}\n  {} {}\n  {} {} points",
        style("Route Details").bold().green(),
        style("Total distance:").bold(),
        format_distance(route.summary.total_distance_m),
        style("Estimated time:").bold(),
        format_duration(route.summary.total_duration_s),
        style("Path:").bold(),
        route.geometry.len(),
    );

    if let (Some(start), Some(end), Some((sw, ne))) = (
        route.geometry.first(),
        route.geometry.last(),
        bounding_box(&route.geometry),
    ) {
        out.push_str(&format!(
            "\n  {} {}\n  {} {}\n  {} {} to {}",
            style("Start:").bold(),
            start,
            style("End:").bold(),
            end,
            style("Bounds:").bold(),
            sw,
            ne
        ));
    }

    if !route.summary.segments.is_empty() {
        out.push('\n');
        out.push_str(&segment_table(route));
    }
    out
}

/// What the route panel currently shows for the surface.
pub fn render_route_status(surface: &MapSurface) -> String {
    if let Some(route) = surface.route() {
        return render_route(route);
    }
    if let Some(message) = surface.route_error() {
        return render_error(message);
    }

    match surface.phase() {
        Phase::Empty | Phase::Single => style("Add at least two points to get a route.")
            .dim()
            .to_string(),
        Phase::Ready => style("Route not available yet.").dim().to_string(),
    }
}

pub fn render_error(message: &str) -> String {
    format!("{} {}", style("✗").bold().red(), style(message).red())
}

pub fn render_transcript(transcript: &Transcript) -> String {
    transcript
        .messages()
        .iter()
        .map(|message| {
            let who = match message.sender {
                Sender::User => style("you").bold().cyan(),
                Sender::Bot => style("assistant").bold().blue(),
            };
            format!(
                "{} {} {}: {}",
                style(format!("#{}", message.id)).dim(),
                style(message.sent_at.format("%H:%M:%S")).dim(),
                who,
                message.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print an assistant reply in a box.
pub fn display_reply(reply: &str) {
    let max_width = box_width(100, 50);
    let wrapped: Vec<String> = reply
        .lines()
        .flat_map(|line| wrap_line(line, max_width.saturating_sub(4)))
        .collect();

    let content = wrapped.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = std::cmp::min(max_width, content + 4);

    println!("\n{}", style("🚦 TRAFFIC ASSISTANT").bold().blue());
    println!("{}", style(format!("┌{}┐", "─".repeat(width - 2))).dim().blue());
    for line in wrapped {
        let padding = width.saturating_sub(line.chars().count() + 3);
        println!("│ {}{}│", style(&line).white(), " ".repeat(padding));
    }
    println!("{}", style(format!("└{}┘", "─".repeat(width - 2))).dim().blue());
}

pub fn display_banner(title: &str, hint: &str) {
    let width = box_width(80, 40);
    println!("{}", style("═".repeat(width)).dim());
    println!("{}", style(title).bold().green());
    println!("{}", style(hint).dim());
    println!("{}", style("═".repeat(width)).dim());
}

pub fn display_error(message: &str) {
    eprintln!("{}", render_error(message));
}
