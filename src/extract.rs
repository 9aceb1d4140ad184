use std::path::Path;

use crate::error::RouteMapError;
use crate::gpx_types::{TrackLog, TrackPoint};
use crate::parser;

/// One track-log file after extraction: resolved display name plus the
/// flattened point sequence, in document order.
#[derive(Debug)]
pub struct ExtractedTrack {
    pub name: String,
    /// Original file name, kept for the per-route download link.
    pub filename: String,
    pub points: Vec<TrackPoint>,
}

/// Parse a track-log file's content and resolve its display name.
///
/// Zero points is not an error here; the caller decides whether an
/// empty extraction is usable.
pub fn extract_track(xml: &str, filename: &str) -> Result<ExtractedTrack, RouteMapError> {
    let log = parser::parse_track_log(xml)?;
    let name = resolve_name(&log, filename);
    let points = flatten_points(&log);
    Ok(ExtractedTrack {
        name,
        filename: filename.to_string(),
        points,
    })
}

/// Name resolution priority: document metadata name, first track name,
/// cleaned filename stem.
fn resolve_name(log: &TrackLog, filename: &str) -> String {
    if let Some(name) = non_empty(log.name.as_deref()) {
        return name.to_string();
    }
    if let Some(name) = log
        .tracks
        .iter()
        .find_map(|t| non_empty(t.name.as_deref()))
    {
        return name.to_string();
    }
    filename_stem(filename)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Strip the extension and turn separator characters into spaces.
fn filename_stem(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    stem.replace(['_', '-'], " ").trim().to_string()
}

/// Collect every point across all tracks and segments, preserving
/// document order and duplicates.
fn flatten_points(log: &TrackLog) -> Vec<TrackPoint> {
    log.tracks
        .iter()
        .flat_map(|track| track.segments.iter())
        .flat_map(|segment| segment.points.iter().copied())
        .collect()
}
