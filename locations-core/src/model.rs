use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::validate::Coordinate;

/// Location name to `"lat, lon"` string, as stored in the config file.
///
/// Keeps insertion order: listings are numbered in it and the file is written in it.
pub type Locations = IndexMap<String, String>;

/// Display name used when reverse geocoding an IP-derived point finds nothing.
pub const APPROXIMATE_IP_LOCATION: &str = "Approximate location based on IP";

/// Output of the resolver: a human-readable address and its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
}

impl ResolvedLocation {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate { lat: self.lat, lon: self.lon }
    }
}

/// A location picked from the saved list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChosenLocation {
    pub name: String,
    /// Trimmed latitude and longitude, as written in the config file.
    pub lat: String,
    pub lon: String,
}

impl ChosenLocation {
    /// Split a stored `"lat, lon"` string into its trimmed parts.
    pub fn from_entry(name: &str, coordinate: &str) -> Self {
        let (lat, lon) = coordinate.split_once(',').unwrap_or((coordinate, ""));
        Self {
            name: name.to_string(),
            lat: lat.trim().to_string(),
            lon: lon.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chosen_location_trims_parts() {
        let chosen = ChosenLocation::from_entry("home", " 1.599,   12.6168 ");
        assert_eq!(chosen.name, "home");
        assert_eq!(chosen.lat, "1.599");
        assert_eq!(chosen.lon, "12.6168");
    }

    #[test]
    fn resolved_location_coordinate_formats_for_storage() {
        let resolved = ResolvedLocation {
            display_name: "Paris".into(),
            lat: 48.8566,
            lon: 2.3522,
        };
        assert_eq!(resolved.coordinate().to_string(), "48.8566, 2.3522");
    }
}
