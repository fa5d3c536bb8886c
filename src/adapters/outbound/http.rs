//! Shared HTTP plumbing for the REST-backed adapters.

use crate::domain::errors::LookupError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Build the HTTP client shared by all outbound adapters.
pub fn build_client(user_agent: &str, timeout: Duration) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// A payload that may arrive bare or wrapped as `{ "data": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(data) => data,
        }
    }
}

/// Send a request and decode a JSON body, mapping every failure onto
/// `LookupError`.
pub(crate) async fn get_json<T>(request: reqwest::RequestBuilder) -> Result<T, LookupError>
where
    T: DeserializeOwned,
{
    let response = request.send().await.map_err(transport_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(LookupError::Status(status.as_u16()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| LookupError::Decode(e.to_string()))
}

pub(crate) fn transport_error(e: reqwest::Error) -> LookupError {
    LookupError::Transport(e.to_string())
}

/// Join a base URL and a path without doubling or dropping the slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://api/", "/cities"), "http://api/cities");
        assert_eq!(join_url("http://api", "cities"), "http://api/cities");
        assert_eq!(
            join_url("http://api/v1", "locations/search"),
            "http://api/v1/locations/search"
        );
    }

    #[test]
    fn test_envelope_bare_and_wrapped() {
        let bare: Envelope<Vec<u32>> = serde_json::from_str("[1, 2]").unwrap();
        let wrapped: Envelope<Vec<u32>> = serde_json::from_str(r#"{"data": [3]}"#).unwrap();

        assert_eq!(bare.into_inner(), vec![1, 2]);
        assert_eq!(wrapped.into_inner(), vec![3]);
    }

    #[test]
    fn test_build_client() {
        assert!(build_client("city-resolver/test", Duration::from_secs(1)).is_ok());
    }

    #[tokio::test]
    async fn test_get_json_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let result: Result<serde_json::Value, _> =
            get_json(client.get(format!("{}/broken", mock_server.uri()))).await;

        assert_eq!(result.unwrap_err(), LookupError::Status(502));
    }

    #[tokio::test]
    async fn test_get_json_invalid_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/garbage"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let result: Result<Vec<u32>, _> =
            get_json(client.get(format!("{}/garbage", mock_server.uri()))).await;

        assert!(matches!(result, Err(LookupError::Decode(_))));
    }

    #[tokio::test]
    async fn test_get_json_connection_refused() {
        let client = reqwest::Client::new();
        // Port 9 (discard) is not expected to be listening locally
        let result: Result<Vec<u32>, _> = get_json(client.get("http://127.0.0.1:9/")).await;

        assert!(matches!(result, Err(LookupError::Transport(_))));
    }
}
