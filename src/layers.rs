use geojson::{Feature, Geometry, Value};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::route::Route;
use crate::selection::Selection;
use crate::store::RouteStore;

/// Width of the invisible hit line, generous enough for touch.
pub const HIT_LINE_WIDTH: f64 = 24.0;

/// Viewport padding, in pixels, when fitting to route bounds.
pub const FIT_PADDING: f64 = 60.0;

/// Visible-line (opacity, width) pair for one emphasis level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Emphasis {
    pub opacity: f64,
    pub width: f64,
}

/// The route that is currently selected.
pub const EMPHASIS_SELECTED: Emphasis = Emphasis {
    opacity: 1.0,
    width: 5.0,
};

/// Another route is selected; stay visible for overlap context.
pub const EMPHASIS_DIMMED: Emphasis = Emphasis {
    opacity: 0.25,
    width: 3.0,
};

/// No specific selection; every route shown equally.
pub const EMPHASIS_ALL: Emphasis = Emphasis {
    opacity: 0.85,
    width: 3.5,
};

pub fn source_id(route_id: &str) -> String {
    format!("route-{route_id}")
}

pub fn line_layer_id(route_id: &str) -> String {
    format!("route-{route_id}-line")
}

pub fn hit_layer_id(route_id: &str) -> String {
    format!("route-{route_id}-hit")
}

/// One line-geometry source: a GeoJSON LineString per route.
#[derive(Debug, Serialize)]
pub struct LineSource {
    pub id: String,
    pub data: Feature,
}

/// One line layer bound to a source. `hit` layers are fully
/// transparent and exist only as pointer targets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineLayer {
    pub id: String,
    pub source: String,
    pub route_id: String,
    pub color: String,
    pub opacity: f64,
    pub width: f64,
    pub hit: bool,
}

/// Everything the map engine needs to register route lines once at
/// startup. Selection changes only restyle these layers, never
/// recreate them.
#[derive(Debug, Serialize)]
pub struct LayerPlan {
    pub sources: Vec<LineSource>,
    pub layers: Vec<LineLayer>,
}

impl LayerPlan {
    pub fn for_store(store: &RouteStore) -> Self {
        let mut sources = Vec::new();
        let mut layers = Vec::new();

        for route in store.routes() {
            sources.push(LineSource {
                id: source_id(&route.id),
                data: route_feature(route),
            });
            layers.push(LineLayer {
                id: line_layer_id(&route.id),
                source: source_id(&route.id),
                route_id: route.id.clone(),
                color: route.color.clone(),
                opacity: EMPHASIS_ALL.opacity,
                width: EMPHASIS_ALL.width,
                hit: false,
            });
            // Hit layers go on top so clicks land on them
            layers.push(LineLayer {
                id: hit_layer_id(&route.id),
                source: source_id(&route.id),
                route_id: route.id.clone(),
                color: route.color.clone(),
                opacity: 0.0,
                width: HIT_LINE_WIDTH,
                hit: true,
            });
        }

        Self { sources, layers }
    }
}

fn route_feature(route: &Route) -> Feature {
    let coords: Vec<Vec<f64>> = route.coordinates.iter().map(|c| c.to_vec()).collect();
    let geometry = Geometry::new(Value::LineString(coords));

    let mut props = Map::new();
    props.insert(
        "routeId".to_string(),
        JsonValue::String(route.id.clone()),
    );
    props.insert("name".to_string(), JsonValue::String(route.name.clone()));

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

/// Restyle instruction for one visible line layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStyle {
    pub layer_id: String,
    pub opacity: f64,
    pub width: f64,
}

/// Per-route styling for a selection state: the selected route gets
/// the selected pair, everything else the dimmed pair; with no
/// specific selection all routes get the "all" pair.
pub fn layer_styles(store: &RouteStore, selection: &Selection) -> Vec<LayerStyle> {
    store
        .routes()
        .iter()
        .map(|route| {
            let emphasis = match selection {
                Selection::All => EMPHASIS_ALL,
                Selection::Route(id) if *id == route.id => EMPHASIS_SELECTED,
                Selection::Route(_) => EMPHASIS_DIMMED,
            };
            LayerStyle {
                layer_id: line_layer_id(&route.id),
                opacity: emphasis.opacity,
                width: emphasis.width,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractedTrack;
    use crate::gpx_types::TrackPoint;
    use crate::route::build_routes;

    fn store() -> RouteStore {
        RouteStore::new(build_routes(vec![
            ExtractedTrack {
                name: "East".to_string(),
                filename: "east.gpx".to_string(),
                points: vec![TrackPoint::new(50.0, 10.0), TrackPoint::new(50.1, 10.1)],
            },
            ExtractedTrack {
                name: "West".to_string(),
                filename: "west.gpx".to_string(),
                points: vec![TrackPoint::new(50.0, 9.0), TrackPoint::new(50.1, 8.9)],
            },
        ]))
    }

    #[test]
    fn test_plan_has_one_source_and_two_layers_per_route() {
        let plan = LayerPlan::for_store(&store());
        assert_eq!(plan.sources.len(), 2);
        assert_eq!(plan.layers.len(), 4);

        let hits: Vec<&LineLayer> = plan.layers.iter().filter(|l| l.hit).collect();
        assert_eq!(hits.len(), 2);
        for hit in hits {
            assert_eq!(hit.opacity, 0.0);
            assert_eq!(hit.width, HIT_LINE_WIDTH);
        }
    }

    #[test]
    fn test_layers_share_their_route_source() {
        let plan = LayerPlan::for_store(&store());
        for layer in &plan.layers {
            assert_eq!(layer.source, source_id(&layer.route_id));
        }
    }

    #[test]
    fn test_sources_carry_linestring_geometry() {
        let plan = LayerPlan::for_store(&store());
        let geom = plan.sources[0].data.geometry.as_ref().unwrap();
        match &geom.value {
            Value::LineString(coords) => assert_eq!(coords.len(), 2),
            other => panic!("Expected LineString, got {other:?}"),
        }
    }

    #[test]
    fn test_styles_for_specific_selection() {
        let store = store();
        let styles = layer_styles(&store, &Selection::Route("east".to_string()));
        assert_eq!(styles.len(), 2);

        let east = styles.iter().find(|s| s.layer_id == line_layer_id("east")).unwrap();
        assert_eq!(east.opacity, EMPHASIS_SELECTED.opacity);
        assert_eq!(east.width, EMPHASIS_SELECTED.width);

        let west = styles.iter().find(|s| s.layer_id == line_layer_id("west")).unwrap();
        assert_eq!(west.opacity, EMPHASIS_DIMMED.opacity);
        assert_eq!(west.width, EMPHASIS_DIMMED.width);
    }

    #[test]
    fn test_styles_for_all_selection() {
        let store = store();
        for style in layer_styles(&store, &Selection::All) {
            assert_eq!(style.opacity, EMPHASIS_ALL.opacity);
            assert_eq!(style.width, EMPHASIS_ALL.width);
        }
    }
}
