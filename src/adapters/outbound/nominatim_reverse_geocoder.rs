//! Nominatim Reverse Geocoder
//!
//! Implements ReverseGeocoder using the public Nominatim (OpenStreetMap) API.

use crate::adapters::outbound::http::{get_json, join_url};
use crate::domain::entities::{AddressFields, Coordinates};
use crate::domain::errors::LookupError;
use crate::domain::ports::ReverseGeocoder;
use async_trait::async_trait;
use serde::Deserialize;

/// Nominatim reverse geocoder.
///
/// No API key is needed, but the usage policy requires an identifying
/// User-Agent, which the shared client sets. Names are requested in
/// English so they line up with the directory's Latin city names.
pub struct NominatimReverseGeocoder {
    base_url: String,
    language: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<AddressFields>,
    #[serde(default)]
    error: Option<String>,
}

impl NominatimReverseGeocoder {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            language: "en".to_string(),
            client,
        }
    }

    /// Override the `accept-language` sent to Nominatim.
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimReverseGeocoder {
    async fn reverse(&self, coords: Coordinates) -> Result<AddressFields, LookupError> {
        let url = join_url(&self.base_url, "reverse");
        let request = self.client.get(&url).query(&[
            ("format", "json".to_string()),
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
            ("accept-language", self.language.clone()),
        ]);

        let body: ReverseResponse = get_json(request).await?;

        // Nominatim answers 200 with an "error" field for open water etc.
        if let Some(error) = body.error {
            tracing::debug!(
                "nominatim has no address for ({}, {}): {}",
                coords.latitude,
                coords.longitude,
                error
            );
        }

        Ok(body.address.unwrap_or_default())
    }
}
