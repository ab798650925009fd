use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::{fmt::Debug, time::Duration};

use crate::{model::ResolvedLocation, validate::Coordinate};

pub mod ipinfo;
pub mod nominatim;

pub use ipinfo::IpInfoLocator;
pub use nominatim::NominatimGeocoder;

pub const DEFAULT_IP_URL: &str = "https://ipinfo.io/json";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "weather_assistant";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoints and client settings shared by the HTTP providers.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub ip_url: String,
    pub geocoder_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            ip_url: DEFAULT_IP_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ProviderSettings {
    /// HTTP client carrying the user agent and per-request timeout.
    pub fn http_client(&self) -> reqwest::Result<Client> {
        Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()
    }
}

/// Transport level failure of a provider call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{service} request timed out: {detail}")]
    Timeout { service: &'static str, detail: String },

    #[error("Could not connect to {service}: {detail}")]
    Connect { service: &'static str, detail: String },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{service} request failed: {detail}")]
    Request { service: &'static str, detail: String },

    #[error("Malformed response from {service}: {reason}")]
    Malformed { service: &'static str, reason: String },
}

impl ProviderError {
    fn from_reqwest(service: &'static str, err: reqwest::Error) -> Self {
        let detail = err.to_string();
        if err.is_timeout() {
            Self::Timeout { service, detail }
        } else if err.is_connect() {
            Self::Connect { service, detail }
        } else {
            Self::Request { service, detail }
        }
    }

    /// Client deadline elapsed, or the service answered 504.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status == StatusCode::GATEWAY_TIMEOUT,
            _ => false,
        }
    }

    /// Connection refused/reset, or the service answered 503.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Connect { .. } => true,
            Self::Status { status, .. } => *status == StatusCode::SERVICE_UNAVAILABLE,
            _ => false,
        }
    }
}

/// Approximate current position of this machine.
#[async_trait]
pub trait IpLocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinate, ProviderError>;
}

/// Address to coordinate and back. `Ok(None)` means the service had no match.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn geocode(&self, query: &str) -> Result<Option<ResolvedLocation>, ProviderError>;
    async fn reverse(&self, at: Coordinate) -> Result<Option<ResolvedLocation>, ProviderError>;
}

/// Send `request` and decode a successful JSON body.
async fn fetch_json<T: DeserializeOwned>(
    service: &'static str,
    request: RequestBuilder,
) -> Result<T, ProviderError> {
    let res = request
        .send()
        .await
        .map_err(|e| ProviderError::from_reqwest(service, e))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| ProviderError::from_reqwest(service, e))?;

    if !status.is_success() {
        return Err(ProviderError::Status { service, status, body: truncate_body(&body) });
    }

    serde_json::from_str(&body)
        .map_err(|e| ProviderError::Malformed { service, reason: e.to_string() })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: StatusCode) -> ProviderError {
        ProviderError::Status { service: "test", status: code, body: String::new() }
    }

    #[test]
    fn only_503_counts_as_unavailable() {
        assert!(status(StatusCode::SERVICE_UNAVAILABLE).is_unavailable());
        assert!(!status(StatusCode::BAD_GATEWAY).is_unavailable());
        assert!(!status(StatusCode::GATEWAY_TIMEOUT).is_unavailable());
        assert!(!status(StatusCode::FORBIDDEN).is_unavailable());
        assert!(!status(StatusCode::TOO_MANY_REQUESTS).is_unavailable());
    }

    #[test]
    fn gateway_timeout_status_is_a_timeout() {
        assert!(status(StatusCode::GATEWAY_TIMEOUT).is_timeout());
        assert!(!status(StatusCode::SERVICE_UNAVAILABLE).is_timeout());
        assert!(!status(StatusCode::BAD_GATEWAY).is_timeout());
    }

    #[test]
    fn malformed_is_neither_timeout_nor_unavailable() {
        let err = ProviderError::Malformed { service: "test", reason: "eof".into() };
        assert!(!err.is_timeout());
        assert!(!err.is_unavailable());
    }

    #[test]
    fn truncate_body_caps_length() {
        let long = "é".repeat(250);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn default_settings_use_ten_second_timeout() {
        let settings = ProviderSettings::default();
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.user_agent, "weather_assistant");
        assert!(settings.http_client().is_ok());
    }
}
