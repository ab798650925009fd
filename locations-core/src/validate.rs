use std::{fmt, str::FromStr};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Parse a `"lat, lon"` string, returning `None` unless both parts are
    /// numbers within range.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split(',');
        let (lat, lon) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lon), None) => (lat, lon),
            _ => return None,
        };

        let lat: f64 = lat.trim().parse().ok()?;
        let lon: f64 = lon.trim().parse().ok()?;

        let coord = Self { lat, lon };
        coord.in_range().then_some(coord)
    }

    /// NaN fails both comparisons, so it is never in range.
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Formats as the `"lat, lon"` string stored in the config file.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

impl FromStr for Coordinate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid coordinate '{s}'. Expected \"lat, lon\" with lat in -90..=90 and lon in -180..=180."
            )
        })
    }
}

/// Check if a given value is a valid `"lat, lon"` coordinate.
pub fn is_valid_location(value: &str) -> bool {
    tracing::debug!("Checking if '{value}' is a valid location coordinate");
    Coordinate::parse(value).is_some()
}
