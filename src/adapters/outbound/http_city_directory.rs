//! HTTP City Directory
//!
//! Implements CityDirectory against the backend's REST API.

use crate::adapters::outbound::http::{get_json, join_url, Envelope};
use crate::domain::entities::City;
use crate::domain::errors::LookupError;
use crate::domain::ports::CityDirectory;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// REST-backed city directory.
///
/// Fetches `GET {base_url}/cities` once and serves the cached list
/// afterwards. A failed fetch is not cached, so the next call retries.
pub struct HttpCityDirectory {
    base_url: String,
    client: reqwest::Client,
    cities: RwLock<Option<Vec<City>>>,
}

impl HttpCityDirectory {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
            cities: RwLock::new(None),
        }
    }

    async fn fetch(&self) -> Result<Vec<City>, LookupError> {
        let url = join_url(&self.base_url, "cities");
        let body: Envelope<Vec<City>> = get_json(self.client.get(&url)).await?;
        Ok(body.into_inner())
    }
}

#[async_trait]
impl CityDirectory for HttpCityDirectory {
    async fn list(&self) -> Result<Vec<City>, LookupError> {
        if let Some(cities) = self.cities.read().await.as_ref() {
            return Ok(cities.clone());
        }

        let mut guard = self.cities.write().await;
        if let Some(cities) = guard.as_ref() {
            return Ok(cities.clone());
        }

        let cities = self.fetch().await?;
        tracing::info!("city directory loaded, cities={}", cities.len());
        *guard = Some(cities.clone());
        Ok(cities)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cities_json() -> serde_json::Value {
        serde_json::json!([
            {"id": "1", "name": "Riyadh", "slug": "riyadh", "regionId": "r1"},
            {"id": "2", "name": "Jeddah", "slug": "jeddah", "regionId": "r2",
             "region": {"id": "r2", "name": "Makkah"}}
        ])
    }

    #[tokio::test]
    async fn test_list_bare_array() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(cities_json()))
            .mount(&mock_server)
            .await;

        let directory = HttpCityDirectory::new(&mock_server.uri(), reqwest::Client::new());
        let cities = directory.list().await.unwrap();

        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].name, "Riyadh");
        assert_eq!(cities[1].region.as_ref().unwrap().name, "Makkah");
    }

    #[tokio::test]
    async fn test_list_wrapped_in_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/cities"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "data": cities_json() })),
            )
            .mount(&mock_server)
            .await;

        let base = format!("{}/api/", mock_server.uri());
        let directory = HttpCityDirectory::new(&base, reqwest::Client::new());
        let cities = directory.list().await.unwrap();

        assert_eq!(cities.len(), 2);
        assert_eq!(cities[1].id, "2");
    }

    #[tokio::test]
    async fn test_list_is_fetched_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(cities_json()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let directory = HttpCityDirectory::new(&mock_server.uri(), reqwest::Client::new());
        let first = directory.list().await.unwrap();
        let second = directory.list().await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_list_error_not_cached() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(cities_json()))
            .mount(&mock_server)
            .await;

        let directory = HttpCityDirectory::new(&mock_server.uri(), reqwest::Client::new());

        assert_eq!(directory.list().await, Err(LookupError::Status(503)));
        assert_eq!(directory.list().await.unwrap().len(), 2);
    }
}
