//! Turns an address, or `me`, into a named coordinate.
//!
//! `me`:      IP locator → reverse geocode (address optional)
//! otherwise: forward geocode → not found error

use anyhow::Context;

use crate::{
    error::LocationError,
    model::{APPROXIMATE_IP_LOCATION, ResolvedLocation},
    provider::{
        Geocoder, IpInfoLocator, IpLocator, NominatimGeocoder, ProviderError, ProviderSettings,
    },
};

/// Query token that asks for the current location.
pub const CURRENT_LOCATION: &str = "me";

#[derive(Debug)]
pub struct LocationResolver {
    ip: Box<dyn IpLocator>,
    geocoder: Box<dyn Geocoder>,
}

impl LocationResolver {
    pub fn new(ip: Box<dyn IpLocator>, geocoder: Box<dyn Geocoder>) -> Self {
        Self { ip, geocoder }
    }

    /// Resolver backed by ipinfo.io and Nominatim.
    pub fn from_settings(settings: &ProviderSettings) -> anyhow::Result<Self> {
        let http = settings.http_client().context("Failed to build HTTP client")?;

        Ok(Self::new(
            Box::new(IpInfoLocator::new(settings.ip_url.clone(), http.clone())),
            Box::new(NominatimGeocoder::new(settings.geocoder_url.clone(), http)),
        ))
    }

    /// Resolve `query`, which is either `me` (any case) or a free-text address.
    pub async fn resolve(&self, query: &str) -> Result<ResolvedLocation, LocationError> {
        let query = query.trim();
        if query.eq_ignore_ascii_case(CURRENT_LOCATION) {
            self.resolve_current().await
        } else {
            self.resolve_address(query).await
        }
    }

    async fn resolve_current(&self) -> Result<ResolvedLocation, LocationError> {
        tracing::debug!("Getting current location...");

        let at = self.ip.locate().await.map_err(|e| {
            tracing::warn!("Error getting current location coordinate from IP: {e}");
            match e {
                ProviderError::Timeout { .. } => LocationError::CurrentTimedOut,
                ProviderError::Connect { .. } => LocationError::CurrentConnection,
                ProviderError::Status { .. } | ProviderError::Request { .. } => {
                    LocationError::CurrentRequestFailed
                }
                ProviderError::Malformed { .. } => LocationError::Unexpected(e.into()),
            }
        })?;

        let place = self.geocoder.reverse(at).await.map_err(|e| {
            tracing::warn!("Error getting current location, reverse geocoding failed: {e}");
            if e.is_timeout() {
                LocationError::CurrentGeocodingTimedOut
            } else {
                geocoder_failure(e)
            }
        })?;

        Ok(place.unwrap_or_else(|| ResolvedLocation {
            display_name: APPROXIMATE_IP_LOCATION.to_string(),
            lat: at.lat,
            lon: at.lon,
        }))
    }

    async fn resolve_address(&self, address: &str) -> Result<ResolvedLocation, LocationError> {
        tracing::debug!("Getting location for: {address}");

        let place = self.geocoder.geocode(address).await.map_err(|e| {
            tracing::warn!("Geocoding '{address}' failed: {e}");
            if e.is_timeout() {
                LocationError::GeocodingTimedOut
            } else {
                geocoder_failure(e)
            }
        })?;

        place.ok_or_else(|| {
            tracing::warn!("Geolocator could not find location: '{address}'");
            LocationError::NotFound(address.to_string())
        })
    }
}

fn geocoder_failure(e: ProviderError) -> LocationError {
    if e.is_unavailable() {
        LocationError::GeocoderUnavailable
    } else {
        LocationError::Unexpected(e.into())
    }
}
