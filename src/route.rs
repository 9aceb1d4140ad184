use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::extract::ExtractedTrack;
use crate::metrics::{self, Bounds};

/// Fixed line-color palette, reused cyclically by sorted route index.
pub const PALETTE: [&str; 10] = [
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#a65628", "#f781bf", "#1b9e77",
    "#d95f02", "#7570b3",
];

/// One persisted route, immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub name: String,
    pub filename: String,
    /// Great-circle length in km, rounded to one decimal.
    pub distance: f64,
    /// Rounded climb in meters; None means no elevation data, as
    /// opposed to a flat route's 0.
    #[serde(rename = "elevationGain")]
    pub elevation_gain: Option<u64>,
    pub bounds: Bounds,
    /// [lon, lat] pairs in original point order; the order defines the
    /// line geometry and is never resorted.
    pub coordinates: Vec<[f64; 2]>,
    pub color: String,
}

/// Derive a URL-safe identifier from a display name: lowercase ASCII
/// alphanumerics, each maximal run of anything else collapsed to one
/// hyphen, ends trimmed. Idempotent. Ids must stay ASCII: browsers
/// percent-encode non-ASCII fragment characters, so a non-ASCII id
/// would never read back from location.hash as itself.
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Assemble the final route list: drop empty extractions, compute
/// metrics (rounding once, here), sort by name, then assign each route
/// its identity and palette color from its sorted position.
pub fn build_routes(tracks: Vec<ExtractedTrack>) -> Vec<Route> {
    let mut routes: Vec<Route> = tracks.into_iter().filter_map(route_from_track).collect();

    routes.sort_by_key(|r| (r.name.to_lowercase(), r.name.clone()));

    let mut seen: HashMap<String, u32> = HashMap::new();
    for (index, route) in routes.iter_mut().enumerate() {
        let base = match slugify(&route.name) {
            s if s.is_empty() => format!("route-{}", index + 1),
            s => s,
        };
        let count = seen.entry(base.clone()).or_insert(0);
        *count += 1;
        route.id = if *count == 1 {
            base
        } else {
            format!("{base}-{count}")
        };
        route.color = PALETTE[index % PALETTE.len()].to_string();
    }

    routes
}

fn route_from_track(track: ExtractedTrack) -> Option<Route> {
    // Zero-point extractions have no bounds and are not usable
    let bounds = metrics::bounds(&track.points)?;
    let distance = metrics::total_distance_km(&track.points);
    let gain = metrics::elevation_gain_m(&track.points);
    let coordinates = track.points.iter().map(|p| [p.lon, p.lat]).collect();

    Some(Route {
        id: String::new(),
        name: track.name,
        filename: track.filename,
        distance: (distance * 10.0).round() / 10.0,
        elevation_gain: gain.map(|g| g.round() as u64),
        bounds,
        coordinates,
        color: String::new(),
    })
}
