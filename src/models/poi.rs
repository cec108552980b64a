//! POI records returned by Overpass and the fixed category table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use super::GeoPoint;
use crate::error::ThirstyError;

/// Kind of drinking water amenity to look for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiCategory {
    /// Drinking water amenity
    #[default]
    Water,
    /// Water point with potable water
    Point,
    /// Water tap with potable water
    Tap,
    /// Natural spring with potable water
    Spring,
    /// Fountain with potable water
    Fountain,
}

impl PoiCategory {
    pub const ALL: [PoiCategory; 5] = [
        PoiCategory::Water,
        PoiCategory::Point,
        PoiCategory::Tap,
        PoiCategory::Spring,
        PoiCategory::Fountain,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PoiCategory::Water => "water",
            PoiCategory::Point => "point",
            PoiCategory::Tap => "tap",
            PoiCategory::Spring => "spring",
            PoiCategory::Fountain => "fountain",
        }
    }

    /// Overpass QL tag filter selecting this category
    pub fn tag_filter(&self) -> &'static str {
        match self {
            PoiCategory::Water => "[amenity=drinking_water]",
            PoiCategory::Point => "[amenity=water_point][drinking_water=yes]",
            PoiCategory::Tap => "[man_made=water_tap][drinking_water=yes]",
            PoiCategory::Spring => "[natural=spring][drinking_water=yes]",
            PoiCategory::Fountain => "[amenity=fountain][drinking_water=yes]",
        }
    }

    /// `(key, value)` pairs an element must carry to match this category
    fn required_tags(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            PoiCategory::Water => &[("amenity", "drinking_water")],
            PoiCategory::Point => &[("amenity", "water_point"), ("drinking_water", "yes")],
            PoiCategory::Tap => &[("man_made", "water_tap"), ("drinking_water", "yes")],
            PoiCategory::Spring => &[("natural", "spring"), ("drinking_water", "yes")],
            PoiCategory::Fountain => &[("amenity", "fountain"), ("drinking_water", "yes")],
        }
    }

    pub fn matches(&self, tags: &HashMap<String, String>) -> bool {
        self.required_tags()
            .iter()
            .all(|(k, v)| tags.get(*k).map(|t| t == v).unwrap_or(false))
    }
}

impl std::fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PoiCategory {
    type Err = ThirstyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PoiCategory::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = PoiCategory::ALL.iter().map(|c| c.name()).collect();
                ThirstyError::InvalidParameter(format!(
                    "unknown POI type '{}' (expected one of: {})",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Raw element from an Overpass `elements` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl Poi {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            id: None,
            lat,
            lon,
            tags: HashMap::new(),
        }
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    /// First category of the table whose tags this POI carries
    pub fn category(&self) -> Option<PoiCategory> {
        PoiCategory::ALL.into_iter().find(|c| c.matches(&self.tags))
    }

    /// Short human label, used for map popups
    pub fn label(&self) -> String {
        if let Some(category) = self.category() {
            return category.to_string();
        }
        self.tags
            .get("amenity")
            .cloned()
            .unwrap_or_else(|| "water".to_string())
    }
}
