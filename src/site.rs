use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::document;
use crate::error::RouteMapError;
use crate::extract::{self, ExtractedTrack};
use crate::route::{self, Route};

const INDEX_TEMPLATE: &str = include_str!("../assets/index.html");
const APP_SCRIPT: &str = include_str!("../assets/app.js");

pub const DEFAULT_TITLE: &str = "Route Map";

/// Name of the output subdirectory holding verbatim input copies.
pub const TRACKS_DIR: &str = "tracks";

/// Run the whole build: discover .gpx files, extract each, assemble
/// the route list, and write the site. A single bad file is logged
/// and skipped; nothing is written unless at least one route is
/// usable.
pub fn build_site(
    input_dir: &Path,
    output_dir: &Path,
    title: &str,
) -> Result<Vec<Route>, RouteMapError> {
    if !input_dir.is_dir() {
        return Err(RouteMapError::MissingInputDir(input_dir.to_path_buf()));
    }

    let candidates = discover_gpx_files(input_dir)?;
    if candidates.is_empty() {
        return Err(RouteMapError::NoCandidateFiles(input_dir.to_path_buf()));
    }

    let mut tracks: Vec<ExtractedTrack> = Vec::new();
    let mut usable_files: Vec<(PathBuf, String)> = Vec::new();

    for (path, filename) in candidates {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(file = %filename, error = %e, "Unreadable file, skipping");
                continue;
            }
        };
        match extract::extract_track(&content, &filename) {
            Ok(track) if track.points.is_empty() => {
                warn!(file = %filename, "No track points, skipping");
            }
            Ok(track) => {
                tracks.push(track);
                usable_files.push((path, filename));
            }
            Err(e) => {
                warn!(file = %filename, error = %e, "Parse failed, skipping");
            }
        }
    }

    let routes = route::build_routes(tracks);
    if routes.is_empty() {
        return Err(RouteMapError::NoUsableRoutes);
    }

    // All parsing is done; only now touch the output directory
    let tracks_dir = output_dir.join(TRACKS_DIR);
    fs::create_dir_all(&tracks_dir)?;
    fs::write(output_dir.join("routes.json"), document::to_json(&routes)?)?;
    fs::write(
        output_dir.join("index.html"),
        INDEX_TEMPLATE.replace("{{TITLE}}", &escape_html(title)),
    )?;
    fs::write(output_dir.join("app.js"), APP_SCRIPT)?;
    for (path, filename) in &usable_files {
        fs::copy(path, tracks_dir.join(filename))?;
    }

    info!(
        routes = routes.len(),
        output = %output_dir.display(),
        "Site written"
    );
    Ok(routes)
}

/// Candidate .gpx files directly inside the input directory, sorted by
/// file name so regeneration is deterministic.
fn discover_gpx_files(input_dir: &Path) -> Result<Vec<(PathBuf, String)>, RouteMapError> {
    let mut files = Vec::new();

    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_gpx = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("gpx"));
        if is_gpx {
            let filename = entry.file_name().to_string_lossy().into_owned();
            files.push((path, filename));
        }
    }

    files.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(files)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
