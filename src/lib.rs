//! city-resolver Library
//!
//! Picks a session's city from the user's position, with a default-city
//! fallback. Exposed as a library for integration tests and embedding.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use application::{
    LocationResolver, ResolutionOutcome, ResolverSessions, ResolverSettings, ResolverState,
    SessionId,
};
pub use config::{load_config, Config, ConfigError};
pub use domain::entities::{AddressFields, City, Coordinates, SelectedLocation};
pub use domain::ports::{
    CityDirectory, LocationSearch, PositionProvider, ReverseGeocoder, SelectionStore,
};
pub use domain::services::CityMatcher;
pub use domain::value_objects::{DefaultCity, MatchSource, PositionOptions};
