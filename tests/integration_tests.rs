use quake_mapper::error::QuakeError;
use quake_mapper::event::Event;
use quake_mapper::fetch::{BasicClient, FeedSource};
use quake_mapper::marker::{MagnitudeClass, Marker};
use quake_mapper::parser::parse_events;
use quake_mapper::pipeline::run;
use quake_mapper::render::RasterMap;
use std::fs::File;
use std::path::Path;

const FIXTURE: &str = "tests/fixtures/all_week_sample.csv";

fn fixture_path() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join(FIXTURE)
        .to_string_lossy()
        .into_owned()
}

#[test]
fn test_fixture_parses_and_drops_missing_magnitude() {
    let text = BasicClient::new().load(&fixture_path()).unwrap();
    let events = parse_events(&text).expect("Failed to parse feed");

    // One of the six rows has an empty magnitude.
    assert_eq!(events.len(), 5);
    assert!(events.iter().all(|e| e.magnitude > 0.0));
    assert_eq!(events[0].timestamp, "2021-11-14T10:12:31.520Z");
}

#[test]
fn test_scenario_row_classification() {
    let text = "time,latitude,longitude,depth,mag,place\n\
                2021-11-14T10:00:00Z,34.5,-118.2,10,4.2,...\n";
    let events = parse_events(text).unwrap();
    assert_eq!(events.len(), 1);

    let marker = Marker::for_magnitude(events[0].magnitude);
    assert_eq!(marker.class, MagnitudeClass::Elevated);
    assert!((marker.size - 10.5).abs() < 1e-9);
}

#[test]
fn test_full_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("earthquakes_report");
    let mut canvas = RasterMap::new(480, 360);

    let report = run(
        &BasicClient::new(),
        &fixture_path(),
        &mut canvas,
        base.to_str().unwrap(),
    )
    .unwrap();

    assert_eq!(report.event_count, 5);
    assert_eq!(report.title, "Earthquakes 2021-11-08 to 2021-11-14");

    // Listing is strict JSON, strongest first.
    let listing: Vec<Event> =
        serde_json::from_str(&std::fs::read_to_string(&report.json_path).unwrap()).unwrap();
    let mags: Vec<_> = listing.iter().map(|e| e.magnitude).collect();
    assert_eq!(mags, vec![6.0, 4.2, 3.0, 1.6, 0.45]);

    // Every written field matches what the parser produced.
    let text = std::fs::read_to_string(fixture_path()).unwrap();
    let parsed = parse_events(&text).unwrap();
    for event in &listing {
        assert!(parsed.contains(event), "{event:?} not in parsed feed");
    }

    // Image is a PNG of the requested size carrying the title.
    let decoder = png::Decoder::new(File::open(&report.png_path).unwrap());
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    assert_eq!((info.width, info.height), (480, 360));
    assert!(
        info.uncompressed_latin1_text
            .iter()
            .any(|t| t.keyword == "Title" && t.text == report.title)
    );
}

#[test]
fn test_missing_source_file_fails_without_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("out");
    let mut canvas = RasterMap::new(100, 80);

    let missing = dir.path().join("missing.csv");
    let result = run(
        &BasicClient::new(),
        missing.to_str().unwrap(),
        &mut canvas,
        base.to_str().unwrap(),
    );

    assert!(result.is_err());
    assert!(!dir.path().join("out.png").exists());
    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn test_extreme_magnitudes_render_and_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let feed = dir.path().join("extreme.csv");
    std::fs::write(
        &feed,
        "time,latitude,longitude,depth,mag\n\
         2021-11-14T10:00:00Z,1,2,10,inf\n\
         2021-11-13T10:00:00Z,3,4,10,1e9\n\
         2021-11-12T10:00:00Z,5,6,10,NaN\n\
         2021-11-11T10:00:00Z,7,8,10,2.0\n",
    )
    .unwrap();
    let base = dir.path().join("out");
    let mut canvas = RasterMap::new(200, 150);

    let report = run(
        &BasicClient::new(),
        feed.to_str().unwrap(),
        &mut canvas,
        base.to_str().unwrap(),
    )
    .unwrap();

    assert_eq!(report.event_count, 2);
    let listing: Vec<Event> =
        serde_json::from_str(&std::fs::read_to_string(&report.json_path).unwrap()).unwrap();
    let mags: Vec<_> = listing.iter().map(|e| e.magnitude).collect();
    assert_eq!(mags, vec![1e9, 2.0]);
}

#[test]
fn test_nan_latitude_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let feed = dir.path().join("nan.csv");
    std::fs::write(
        &feed,
        "time,latitude,longitude,depth,mag\n2021-11-14T10:00:00Z,NaN,-118.2,10,4.2\n",
    )
    .unwrap();
    let base = dir.path().join("out");
    let mut canvas = RasterMap::new(100, 80);

    let err = run(
        &BasicClient::new(),
        feed.to_str().unwrap(),
        &mut canvas,
        base.to_str().unwrap(),
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<QuakeError>(),
        Some(QuakeError::InvalidCoordinate { field: "latitude", .. })
    ));
    assert!(!dir.path().join("out.json").exists());
}
