//! HTTP Location Search
//!
//! Implements LocationSearch against the backend's unified search endpoint.

use crate::adapters::outbound::http::{get_json, join_url, Envelope};
use crate::domain::entities::LocationSearchResults;
use crate::domain::errors::LookupError;
use crate::domain::ports::LocationSearch;
use async_trait::async_trait;

/// REST-backed unified location search (`GET {base_url}/locations/search?q=`).
pub struct HttpLocationSearch {
    base_url: String,
    client: reqwest::Client,
}

impl HttpLocationSearch {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
        }
    }
}

#[async_trait]
impl LocationSearch for HttpLocationSearch {
    async fn search(&self, term: &str) -> Result<LocationSearchResults, LookupError> {
        let url = join_url(&self.base_url, "locations/search");
        let body: Envelope<LocationSearchResults> =
            get_json(self.client.get(&url).query(&[("q", term)])).await?;

        let results = body.into_inner();
        tracing::debug!(
            "location search {:?}: countries={} regions={} cities={}",
            term,
            results.countries.len(),
            results.regions.len(),
            results.cities.len()
        );
        Ok(results)
    }
}
