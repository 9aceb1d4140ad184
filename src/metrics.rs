use serde::{Deserialize, Serialize};

use crate::gpx_types::TrackPoint;

/// Mean earth radius in kilometers, spherical approximation.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Axis-aligned geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[[f64; 2]; 2]", try_from = "[[f64; 2]; 2]")]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Southwest corner as [lon, lat].
    pub fn sw(&self) -> [f64; 2] {
        [self.min_lon, self.min_lat]
    }

    /// Northeast corner as [lon, lat].
    pub fn ne(&self) -> [f64; 2] {
        [self.max_lon, self.max_lat]
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }
}

impl From<Bounds> for [[f64; 2]; 2] {
    fn from(b: Bounds) -> Self {
        [b.sw(), b.ne()]
    }
}

impl TryFrom<[[f64; 2]; 2]> for Bounds {
    type Error = String;

    fn try_from(corners: [[f64; 2]; 2]) -> Result<Self, Self::Error> {
        let [[min_lon, min_lat], [max_lon, max_lat]] = corners;
        if min_lon > max_lon || min_lat > max_lat {
            return Err(format!("Inverted bounds: {corners:?}"));
        }
        Ok(Bounds {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }
}

/// Great-circle distance between two points in kilometers (haversine).
pub fn haversine_km(a: &TrackPoint, b: &TrackPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Total path length in kilometers, summed over consecutive pairs.
/// Zero for empty and single-point sequences.
pub fn total_distance_km(points: &[TrackPoint]) -> f64 {
    points.windows(2).map(|w| haversine_km(&w[0], &w[1])).sum()
}

/// Cumulative elevation gain in meters: the sum of strictly positive
/// deltas over consecutive pairs where both points carry elevation.
///
/// Returns None when no pair has elevation on both ends, so "no
/// elevation instrumentation" stays distinct from a flat route's 0.
pub fn elevation_gain_m(points: &[TrackPoint]) -> Option<f64> {
    let mut gain = 0.0;
    let mut any_pair = false;

    for w in points.windows(2) {
        if let (Some(prev), Some(next)) = (w[0].ele, w[1].ele) {
            any_pair = true;
            if next > prev {
                gain += next - prev;
            }
        }
    }

    any_pair.then_some(gain)
}

/// Bounding box over all points; None for an empty sequence.
pub fn bounds(points: &[TrackPoint]) -> Option<Bounds> {
    let first = points.first()?;
    let mut b = Bounds {
        min_lon: first.lon,
        min_lat: first.lat,
        max_lon: first.lon,
        max_lat: first.lat,
    };
    for p in &points[1..] {
        b.min_lon = b.min_lon.min(p.lon);
        b.min_lat = b.min_lat.min(p.lat);
        b.max_lon = b.max_lon.max(p.lon);
        b.max_lat = b.max_lat.max(p.lat);
    }
    Some(b)
}
