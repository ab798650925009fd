use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::validate::Coordinate;

use super::{IpLocator, ProviderError, fetch_json};

const SERVICE: &str = "ipinfo";

/// IP geolocation through an ipinfo.io compatible endpoint.
#[derive(Debug, Clone)]
pub struct IpInfoLocator {
    url: String,
    http: Client,
}

impl IpInfoLocator {
    pub fn new(url: impl Into<String>, http: Client) -> Self {
        Self { url: url.into(), http }
    }
}

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    /// `"lat,lon"`
    loc: Option<String>,
}

#[async_trait]
impl IpLocator for IpInfoLocator {
    async fn locate(&self) -> Result<Coordinate, ProviderError> {
        tracing::debug!("Getting current location from {}", self.url);

        let parsed: IpInfoResponse = fetch_json(SERVICE, self.http.get(&self.url)).await?;

        let loc = parsed.loc.ok_or_else(|| ProviderError::Malformed {
            service: SERVICE,
            reason: "response has no `loc` field".to_string(),
        })?;

        Coordinate::parse(&loc).ok_or_else(|| ProviderError::Malformed {
            service: SERVICE,
            reason: format!("`loc` is not a coordinate: '{loc}'"),
        })
    }
}
