use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{model::ResolvedLocation, validate::Coordinate};

use super::{Geocoder, ProviderError, fetch_json};

const SERVICE: &str = "Nominatim";

/// OpenStreetMap Nominatim geocoder.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }
}

/// One search hit. Nominatim sends coordinates as strings.
#[derive(Debug, Deserialize)]
struct NmPlace {
    display_name: String,
    lat: String,
    lon: String,
}

/// Reverse lookups answer `{"error": "Unable to geocode"}` when nothing is there.
#[derive(Debug, Deserialize)]
struct NmReverse {
    display_name: Option<String>,
    error: Option<String>,
}

impl NmPlace {
    fn into_resolved(self) -> Result<ResolvedLocation, ProviderError> {
        let parse = |field: &str, value: &str| {
            value.trim().parse::<f64>().map_err(|_| ProviderError::Malformed {
                service: SERVICE,
                reason: format!("{field} is not a number: '{value}'"),
            })
        };

        Ok(ResolvedLocation {
            lat: parse("lat", &self.lat)?,
            lon: parse("lon", &self.lon)?,
            display_name: self.display_name,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<ResolvedLocation>, ProviderError> {
        tracing::debug!("Geocoding '{query}'");
        let url = format!("{}/search", self.base_url);

        let request = self
            .http
            .get(url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")]);
        let places: Vec<NmPlace> = fetch_json(SERVICE, request).await?;

        places.into_iter().next().map(NmPlace::into_resolved).transpose()
    }

    async fn reverse(&self, at: Coordinate) -> Result<Option<ResolvedLocation>, ProviderError> {
        tracing::debug!("Reverse geocoding {at}");
        let url = format!("{}/reverse", self.base_url);

        let request = self.http.get(url).query(&[
            ("lat", at.lat.to_string()),
            ("lon", at.lon.to_string()),
            ("format", "json".to_string()),
        ]);
        let parsed: NmReverse = fetch_json(SERVICE, request).await?;

        if let Some(error) = parsed.error {
            tracing::debug!("Nominatim has no address at {at}: {error}");
            return Ok(None);
        }

        Ok(parsed.display_name.map(|display_name| ResolvedLocation {
            display_name,
            lat: at.lat,
            lon: at.lon,
        }))
    }
}
