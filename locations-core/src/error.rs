//! Errors surfaced by the location resolver.
//!
//! Every anticipated provider failure collapses into one of the recoverable
//! variants below, each carrying the message shown to the user. Anything the
//! resolver did not anticipate is wrapped in [`LocationError::Unexpected`] and
//! is meant to reach the process boundary.

/// Failure to turn an address or `me` into a coordinate.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error(
        "Failed to get your current location, Request timed out. Please check your network connection."
    )]
    CurrentTimedOut,

    #[error(
        "Failed to get your current location, Network error. Please check your connection and try again."
    )]
    CurrentConnection,

    #[error("Failed to get your current location, Please try again later.")]
    CurrentRequestFailed,

    #[error(
        "Failed to get your current location, geocoding timed out. Please check your network connection."
    )]
    CurrentGeocodingTimedOut,

    #[error("Could not find location, Geocoding timed out.")]
    GeocodingTimedOut,

    #[error("Geocoding service is unavailable. Please check your internet connection.")]
    GeocoderUnavailable,

    #[error("Could not find location: '{0}'")]
    NotFound(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl LocationError {
    /// Whether a CLI flow may print this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Unexpected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unexpected_is_fatal() {
        assert!(LocationError::CurrentTimedOut.is_recoverable());
        assert!(LocationError::GeocoderUnavailable.is_recoverable());
        assert!(LocationError::NotFound("x".into()).is_recoverable());
        assert!(!LocationError::Unexpected(anyhow::anyhow!("boom")).is_recoverable());
    }

    #[test]
    fn not_found_quotes_the_query() {
        let err = LocationError::NotFound("Atlantis".into());
        assert_eq!(err.to_string(), "Could not find location: 'Atlantis'");
    }

    #[test]
    fn unexpected_is_transparent() {
        let err = LocationError::from(anyhow::anyhow!("missing `loc` field"));
        assert_eq!(err.to_string(), "missing `loc` field");
    }
}
