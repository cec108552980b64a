//! Blocking Overpass API client.

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::build_query;
use crate::config::OverpassConfig;
use crate::error::{Result, ThirstyError};
use crate::models::{BoundingBox, Poi, PoiCategory};

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<Poi>,
}

/// Sends a single query per call, without retry
pub struct OverpassClient {
    client: Client,
    url: String,
    query_timeout_secs: u64,
}

impl OverpassClient {
    pub fn new(config: &OverpassConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.http_timeout())
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Reuse an existing HTTP client (shared with the GPX downloader)
    pub fn with_client(client: Client, config: &OverpassConfig) -> Self {
        Self {
            client,
            url: config.url.clone(),
            query_timeout_secs: config.query_timeout_secs,
        }
    }

    /// Fetch every POI of the given categories inside `bbox`
    pub fn fetch_pois(&self, bbox: &BoundingBox, categories: &[PoiCategory]) -> Result<Vec<Poi>> {
        if categories.is_empty() {
            return Err(ThirstyError::InvalidParameter(
                "at least one POI type is required".to_string(),
            ));
        }

        let query = build_query(bbox, categories, self.query_timeout_secs);
        info!("Querying Overpass at {}", self.url);
        debug!("Overpass query: {}", query);

        let response = self.client.post(&self.url).body(query).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ThirstyError::RemoteQuery(format!(
                "Overpass returned status {}: {}",
                status,
                body.trim()
            )));
        }

        let body = response.text()?;
        let pois = parse_response(&body)?;
        info!("Overpass returned {} POI", pois.len());
        Ok(pois)
    }
}

/// Decode the `elements` array of an Overpass JSON answer
pub fn parse_response(body: &str) -> Result<Vec<Poi>> {
    let data: OverpassResponse = serde_json::from_str(body)
        .map_err(|e| ThirstyError::Parse(format!("invalid Overpass response: {}", e)))?;
    Ok(data.elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn stub_client(status: u16, body: &str) -> OverpassClient {
        let base = test_support::serve(vec![(status, body.to_string())]);
        let config = OverpassConfig {
            url: format!("{}/api/interpreter", base),
            http_timeout_secs: 5,
            ..OverpassConfig::default()
        };
        OverpassClient::new(&config).unwrap()
    }

    #[test]
    fn test_parse_response() {
        let body = r#"
{
  "version": 0.6,
  "generator": "Overpass API 0.7.62.1 084b4234",
  "osm3s": {
    "timestamp_osm_base": "2025-06-01T10:00:00Z",
    "copyright": "The data included in this document is from www.openstreetmap.org."
  },
  "elements": [
    {
      "type": "node",
      "id": 305393184,
      "lat": 45.1885,
      "lon": 5.7245,
      "tags": {
        "amenity": "drinking_water"
      }
    },
    {
      "type": "node",
      "id": 1234567,
      "lat": 45.19,
      "lon": 5.73
    }
  ]
}
"#;
        let pois = parse_response(body).unwrap();
        assert_eq!(pois.len(), 2);
        assert_eq!(pois[0].id, Some(305393184));
        assert_eq!(pois[0].category(), Some(PoiCategory::Water));
        assert!(pois[1].tags.is_empty());
    }

    #[test]
    fn test_parse_empty_elements() {
        assert!(parse_response(r#"{"elements": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        for body in [
            "",
            "<html>rate limited</html>",
            r#"{"remark": "runtime error"}"#,
            r#"{"elements": [{"type": "node", "id": 1, "lon": 5.0}]}"#,
        ] {
            assert!(
                matches!(parse_response(body), Err(ThirstyError::Parse(_))),
                "body {:?}",
                body
            );
        }
    }

    #[test]
    fn test_no_category_rejected() {
        let client = OverpassClient::new(&OverpassConfig::default()).unwrap();
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            client.fetch_pois(&bbox, &[]),
            Err(ThirstyError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_unreachable_endpoint() {
        let config = OverpassConfig {
            url: "http://127.0.0.1:9/api/interpreter".to_string(),
            http_timeout_secs: 5,
            ..OverpassConfig::default()
        };
        let client = OverpassClient::new(&config).unwrap();
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            client.fetch_pois(&bbox, &[PoiCategory::Water]),
            Err(ThirstyError::RemoteQuery(_))
        ));
    }

    #[test]
    fn test_error_status() {
        let client = stub_client(500, "oops");
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        match client.fetch_pois(&bbox, &[PoiCategory::Water]) {
            Err(ThirstyError::RemoteQuery(msg)) => {
                assert!(msg.contains("500"), "{}", msg);
                assert!(msg.contains("oops"), "{}", msg);
            }
            other => panic!("expected RemoteQuery, got {:?}", other),
        }
    }

    #[test]
    fn test_success_status_malformed_body() {
        let client = stub_client(200, "<html>busy</html>");
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            client.fetch_pois(&bbox, &[PoiCategory::Water]),
            Err(ThirstyError::Parse(_))
        ));
    }

    #[test]
    fn test_fetch_pois() {
        let client = stub_client(
            200,
            r#"{"elements": [{"type": "node", "id": 7, "lat": 0.0, "lon": 0.0005, "tags": {"amenity": "drinking_water"}}]}"#,
        );
        let bbox = BoundingBox::new(0.0, 0.0, 0.0, 0.001);
        let pois = client.fetch_pois(&bbox, &[PoiCategory::Water]).unwrap();
        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].id, Some(7));
    }
}
