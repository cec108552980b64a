//! Interactive HTML map of a trace and its water POI.
//!
//! The page is a fixed Leaflet template; route and markers are injected as
//! JSON so that any string coming from OSM is escaped by `serde_json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::{Result, ThirstyError};
use crate::models::{GeoPoint, Poi};

const DEFAULT_ZOOM: u8 = 12;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>thirsty</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
const data = __DATA__;
const map = L.map("map").setView(data.center, data.zoom);
L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);
for (const segment of data.segments) {
  L.polyline(segment, { color: "blue", weight: 2.5, opacity: 1 }).addTo(map);
}
for (const marker of data.markers) {
  L.marker([marker.lat, marker.lon]).bindPopup(marker.label, { maxWidth: 300 }).addTo(map);
}
</script>
</body>
</html>
"#;

#[derive(Debug, Serialize)]
struct MapMarker {
    lat: f64,
    lon: f64,
    label: String,
}

#[derive(Debug, Serialize)]
struct MapData {
    center: [f64; 2],
    zoom: u8,
    segments: Vec<Vec<[f64; 2]>>,
    markers: Vec<MapMarker>,
}

/// Path of the map written next to `output`: `<output>.html`
pub fn map_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".html");
    PathBuf::from(name)
}

/// Mean position of all points, used to center the map
fn center_of(segments: &[Vec<GeoPoint>]) -> Result<[f64; 2]> {
    let (mut lat, mut lon, mut count) = (0.0, 0.0, 0usize);
    for p in segments.iter().flatten() {
        lat += p.lat;
        lon += p.lon;
        count += 1;
    }
    if count == 0 {
        return Err(ThirstyError::EmptyRoute);
    }
    Ok([lat / count as f64, lon / count as f64])
}

/// Render the HTML page for the given track segments and POI
pub fn render_map(segments: &[Vec<GeoPoint>], pois: &[Poi]) -> Result<String> {
    let data = MapData {
        center: center_of(segments)?,
        zoom: DEFAULT_ZOOM,
        segments: segments
            .iter()
            .map(|seg| seg.iter().map(|p| [p.lat, p.lon]).collect())
            .collect(),
        markers: pois
            .iter()
            .map(|poi| MapMarker {
                lat: poi.lat,
                lon: poi.lon,
                label: poi.label(),
            })
            .collect(),
    };

    let json = serde_json::to_string(&data)
        .map_err(|e| ThirstyError::Parse(format!("failed to encode map data: {}", e)))?;
    // Keep a `</script>` inside a tag value from closing the script element
    let json = json.replace("</", "<\\/");

    Ok(TEMPLATE.replace("__DATA__", &json))
}

pub fn write_map(path: &Path, segments: &[Vec<GeoPoint>], pois: &[Poi]) -> Result<()> {
    let html = render_map(segments, pois)?;
    fs::write(path, html)?;
    info!("Wrote map to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_path() {
        assert_eq!(
            map_path(Path::new("out/trace.gpx")),
            PathBuf::from("out/trace.gpx.html")
        );
    }

    #[test]
    fn test_center_is_mean() {
        let segments = vec![
            vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(2.0, 4.0)],
            vec![GeoPoint::new(4.0, 2.0)],
        ];
        assert_eq!(center_of(&segments).unwrap(), [2.0, 2.0]);
        assert!(matches!(center_of(&[]), Err(ThirstyError::EmptyRoute)));
    }

    #[test]
    fn test_render_contains_data() {
        let segments = vec![vec![GeoPoint::new(45.0, 5.0), GeoPoint::new(45.1, 5.1)]];
        let mut poi = Poi::new(45.05, 5.05);
        poi.tags
            .insert("amenity".to_string(), "drinking_water".to_string());

        let html = render_map(&segments, &[poi]).unwrap();
        assert!(html.contains(r#""segments":[[[45.0,5.0],[45.1,5.1]]]"#));
        assert!(html.contains(r#""label":"water""#));
        assert!(!html.contains("__DATA__"));
    }

    #[test]
    fn test_render_escapes_script_end() {
        let segments = vec![vec![GeoPoint::new(1.0, 1.0)]];
        let mut poi = Poi::new(1.0, 1.0);
        poi.tags
            .insert("amenity".to_string(), "</script><b>".to_string());

        let html = render_map(&segments, &[poi]).unwrap();
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_write_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = map_path(&dir.path().join("trace.gpx"));
        write_map(&path, &[vec![GeoPoint::new(1.0, 1.0)]], &[]).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("L.map"));
    }
}
