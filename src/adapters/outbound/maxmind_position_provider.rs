//! MaxMind Position Provider
//!
//! Implements PositionProvider by locating the host's public IP in a
//! MaxMind GeoLite2-City database.

use crate::domain::entities::Coordinates;
use crate::domain::errors::PositionError;
use crate::domain::ports::PositionProvider;
use crate::domain::value_objects::PositionOptions;
use async_trait::async_trait;
use maxminddb::Reader;
use parking_lot::RwLock;
use serde::Deserialize;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// IP-based position provider.
///
/// IP fixes are city-level at best, so `enable_high_accuracy` has no
/// effect. The last fix is reused while younger than `maximum_age`.
pub struct MaxMindPositionProvider {
    reader: Arc<Reader<Vec<u8>>>,
    client: reqwest::Client,
    public_ip_url: String,
    last_fix: FixCache,
}

impl MaxMindPositionProvider {
    /// Load a GeoLite2-City database from a file path.
    pub fn from_file(
        path: &str,
        public_ip_url: &str,
        client: reqwest::Client,
    ) -> anyhow::Result<Self> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self::with_reader(reader, public_ip_url, client))
    }

    /// Load a GeoLite2-City database from memory.
    pub fn from_bytes(
        bytes: Vec<u8>,
        public_ip_url: &str,
        client: reqwest::Client,
    ) -> anyhow::Result<Self> {
        let reader = Reader::from_source(bytes)?;
        Ok(Self::with_reader(reader, public_ip_url, client))
    }

    fn with_reader(reader: Reader<Vec<u8>>, public_ip_url: &str, client: reqwest::Client) -> Self {
        Self {
            reader: Arc::new(reader),
            client,
            public_ip_url: public_ip_url.to_string(),
            last_fix: FixCache::new(),
        }
    }

    /// Look up the coordinates recorded for an IP.
    pub fn locate_ip(&self, ip: IpAddr) -> Option<Coordinates> {
        #[derive(Debug, Deserialize)]
        struct Location {
            latitude: Option<f64>,
            longitude: Option<f64>,
        }

        #[derive(Debug, Deserialize)]
        struct CityResp {
            location: Option<Location>,
        }

        let resp: CityResp = self.reader.lookup(ip).ok()?;
        let location = resp.location?;

        Some(Coordinates::new(location.latitude?, location.longitude?))
    }

    /// Fetch the host's public IP from a plain-text IP echo service.
    async fn fetch_public_ip(client: &reqwest::Client, url: &str) -> Result<IpAddr, PositionError> {
        let resp = client
            .get(url)
            .send()
            .await
            .map_err(|e| PositionError::PositionUnavailable(format!("public IP lookup: {}", e)))?;

        if !resp.status().is_success() {
            return Err(PositionError::PositionUnavailable(format!(
                "public IP lookup returned {}",
                resp.status()
            )));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| PositionError::PositionUnavailable(format!("public IP lookup: {}", e)))?;

        text.trim().parse::<IpAddr>().map_err(|_| {
            PositionError::PositionUnavailable(format!("invalid public IP {:?}", text.trim()))
        })
    }
}

#[async_trait]
impl PositionProvider for MaxMindPositionProvider {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, PositionError> {
        if let Some(coords) = self.last_fix.fresh(options.maximum_age) {
            return Ok(coords);
        }

        let ip = Self::fetch_public_ip(&self.client, &self.public_ip_url).await?;
        tracing::debug!("public IP detected: {}", ip);

        let coords = self.locate_ip(ip).ok_or_else(|| {
            PositionError::PositionUnavailable(format!("no location recorded for {}", ip))
        })?;

        self.last_fix.store(coords);
        Ok(coords)
    }
}

/// Last known fix and when it was taken.
struct FixCache {
    last: RwLock<Option<(Coordinates, Instant)>>,
}

impl FixCache {
    fn new() -> Self {
        Self {
            last: RwLock::new(None),
        }
    }

    fn fresh(&self, maximum_age: Duration) -> Option<Coordinates> {
        let last = *self.last.read();
        last.filter(|(_, taken)| taken.elapsed() <= maximum_age)
            .map(|(coords, _)| coords)
    }

    fn store(&self, coords: Coordinates) {
        *self.last.write() = Some((coords, Instant::now()));
    }
}
