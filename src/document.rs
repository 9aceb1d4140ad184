use crate::error::RouteMapError;
use crate::route::Route;

/// Serialize the finished route list to the persisted document.
pub fn to_json(routes: &[Route]) -> Result<String, RouteMapError> {
    serde_json::to_string(routes).map_err(RouteMapError::Json)
}

/// Load a persisted route document.
pub fn from_json(json: &str) -> Result<Vec<Route>, RouteMapError> {
    serde_json::from_str(json).map_err(RouteMapError::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractedTrack;
    use crate::gpx_types::TrackPoint;
    use crate::route::build_routes;

    fn sample_routes() -> Vec<Route> {
        build_routes(vec![
            ExtractedTrack {
                name: "With Climb".to_string(),
                filename: "with-climb.gpx".to_string(),
                points: vec![
                    TrackPoint {
                        lat: 47.0,
                        lon: 11.0,
                        ele: Some(600.0),
                    },
                    TrackPoint {
                        lat: 47.01,
                        lon: 11.01,
                        ele: Some(650.0),
                    },
                ],
            },
            ExtractedTrack {
                name: "No Elevation".to_string(),
                filename: "no-elevation.gpx".to_string(),
                points: vec![TrackPoint::new(47.0, 11.0), TrackPoint::new(47.1, 11.1)],
            },
        ])
    }

    #[test]
    fn test_document_field_names() {
        let json = to_json(&sample_routes()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value[0];

        assert_eq!(first["name"], "No Elevation");
        assert_eq!(first["filename"], "no-elevation.gpx");
        assert!(first["distance"].is_number());
        assert!(first["elevationGain"].is_null());
        assert!(first["bounds"][0].is_array());
        assert!(first["coordinates"][0][0].is_number());
        assert!(first["color"].is_string());

        assert_eq!(value[1]["name"], "With Climb");
        assert_eq!(value[1]["elevationGain"], 50);
    }

    #[test]
    fn test_order_preserved_through_roundtrip() {
        let routes = sample_routes();
        let back = from_json(&to_json(&routes).unwrap()).unwrap();
        let ids: Vec<&str> = back.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["no-elevation", "with-climb"]);
    }

    #[test]
    fn test_invalid_document_is_error() {
        assert!(from_json("{not json").is_err());
        assert!(from_json(r#"{"id": "not-an-array"}"#).is_err());
    }
}
