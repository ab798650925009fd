//! Core library for the `locations` CLI.
//!
//! This crate defines:
//! - The configuration document and its on-disk store
//! - Coordinate validation
//! - Address and current-location resolution over HTTP providers
//! - The saved-location repository
//!
//! It is used by `locations-cli`, but a weather front-end can reuse it to pick a saved location.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod repository;
pub mod resolver;
pub mod validate;

pub use config::{Config, ConfigError, ConfigStore, FileConfigStore};
pub use error::LocationError;
pub use model::{APPROXIMATE_IP_LOCATION, ChosenLocation, Locations, ResolvedLocation};
pub use provider::{Geocoder, IpLocator, ProviderError, ProviderSettings};
pub use repository::{LocationRepository, RepositoryError};
pub use resolver::LocationResolver;
pub use validate::{Coordinate, is_valid_location};
