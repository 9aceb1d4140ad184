use routemap::document;
use routemap::extract::extract_track;
use routemap::route::{PALETTE, build_routes};

const LOOP_A: &str = r#"<?xml version="1.0"?>
<gpx xmlns="http://www.topografix.com/GPX/1/1" version="1.1">
  <trk>
    <name>Loop A</name>
    <trkseg>
      <trkpt lat="47.00" lon="11.00"><ele>100</ele></trkpt>
      <trkpt lat="47.01" lon="11.01"><ele>110</ele></trkpt>
      <trkpt lat="47.02" lon="11.00"><ele>105</ele></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

const LOOP_B: &str = r#"<?xml version="1.0"?>
<gpx xmlns="http://www.topografix.com/GPX/1/1" version="1.1">
  <trk>
    <name>Loop B</name>
    <trkseg>
      <trkpt lat="48.00" lon="12.00"/>
      <trkpt lat="48.05" lon="12.05"/>
    </trkseg>
  </trk>
</gpx>"#;

fn build_document() -> serde_json::Value {
    // Feed files out of order; the document must come out sorted
    let tracks = vec![
        extract_track(LOOP_B, "loop_b.gpx").unwrap(),
        extract_track(LOOP_A, "loop_a.gpx").unwrap(),
    ];
    let routes = build_routes(tracks);
    serde_json::from_str(&document::to_json(&routes).unwrap()).unwrap()
}

#[test]
fn test_two_file_document_end_to_end() {
    let doc = build_document();
    let routes = doc.as_array().unwrap();
    assert_eq!(routes.len(), 2);

    let a = &routes[0];
    let b = &routes[1];

    // Alphabetical order
    assert_eq!(a["name"], "Loop A");
    assert_eq!(b["name"], "Loop B");
    assert_eq!(a["id"], "loop-a");
    assert_eq!(b["id"], "loop-b");

    // Only the 100 -> 110 climb counts; B has no elevation at all
    assert_eq!(a["elevationGain"], 10);
    assert!(b["elevationGain"].is_null());

    // First two palette entries, in sorted order
    assert_eq!(a["color"], PALETTE[0]);
    assert_eq!(b["color"], PALETTE[1]);
    assert_ne!(a["color"], b["color"]);
}

#[test]
fn test_document_geometry_fields() {
    let doc = build_document();
    let a = &doc[0];

    // Coordinates are [lon, lat] pairs in document order
    let coords = a["coordinates"].as_array().unwrap();
    assert_eq!(coords.len(), 3);
    assert_eq!(coords[0][0], 11.00);
    assert_eq!(coords[0][1], 47.00);
    assert_eq!(coords[1][1], 47.01);

    let bounds = a["bounds"].as_array().unwrap();
    assert_eq!(bounds[0][0], 11.00); // min lon
    assert_eq!(bounds[0][1], 47.00); // min lat
    assert_eq!(bounds[1][0], 11.01); // max lon
    assert_eq!(bounds[1][1], 47.02); // max lat

    assert_eq!(a["filename"], "loop_a.gpx");
    assert!(a["distance"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_regeneration_is_deterministic() {
    // Stable ids and colors across runs keep shared links working
    assert_eq!(build_document(), build_document());
}
