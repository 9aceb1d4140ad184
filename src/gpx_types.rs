/// Parsed track-log data: document-level name plus all tracks.
#[derive(Debug, Default)]
pub struct TrackLog {
    /// Name from <metadata><name>, if present.
    pub name: Option<String>,
    pub tracks: Vec<Track>,
}

/// A single track (<trk>).
#[derive(Debug, Default)]
pub struct Track {
    pub name: Option<String>,
    pub segments: Vec<Segment>,
}

/// A track segment (<trkseg>).
#[derive(Debug, Default)]
pub struct Segment {
    pub points: Vec<TrackPoint>,
}

/// One recorded sample: position plus optional elevation in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    pub ele: Option<f64>,
}

impl TrackPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            ele: None,
        }
    }
}
