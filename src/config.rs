use crate::application::ResolverSettings;
use crate::domain::entities::Coordinates;
use crate::domain::value_objects::{DefaultCity, PositionOptions};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Collaborator endpoints
    pub api_base_url: String,
    pub geocoder_url: String,
    pub user_agent: String,

    // Position sources
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub geoip_path: Option<String>,
    pub public_ip_url: String,

    // Position request options
    pub position_timeout_ms: u64,
    pub position_max_age_secs: u64,
    pub high_accuracy: bool,

    // Resolution
    pub lookup_timeout_secs: u64,
    pub default_city: String,
    pub selection_path: String,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3001/api".to_string(),
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "city-resolver/0.1".to_string(),
            latitude: None,
            longitude: None,
            geoip_path: None,
            public_ip_url: "https://checkip.amazonaws.com/".to_string(),
            position_timeout_ms: 10_000,
            position_max_age_secs: 300,
            high_accuracy: false,
            lookup_timeout_secs: 10,
            default_city: "riyadh,الرياض".to_string(),
            selection_path: "selected_location.json".to_string(),
            debug: false,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("latitude {0} is outside -90..=90")]
    InvalidLatitude(f64),
    #[error("longitude {0} is outside -180..=180")]
    InvalidLongitude(f64),
    #[error("latitude and longitude must be set together")]
    PartialCoordinates,
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

impl Config {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(ConfigError::InvalidLatitude(lat));
                }
                if !(-180.0..=180.0).contains(&lon) {
                    return Err(ConfigError::InvalidLongitude(lon));
                }
            }
            (None, None) => {}
            _ => return Err(ConfigError::PartialCoordinates),
        }
        if self.position_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout("position_timeout_ms"));
        }
        if self.lookup_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("lookup_timeout_secs"));
        }
        Ok(())
    }

    /// Fixed coordinates, when both halves are configured.
    pub fn static_coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            enable_high_accuracy: self.high_accuracy,
            timeout: Duration::from_millis(self.position_timeout_ms),
            maximum_age: Duration::from_secs(self.position_max_age_secs),
        }
    }

    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            position_options: self.position_options(),
            lookup_timeout: self.lookup_timeout(),
            default_city: DefaultCity::parse(&self.default_city),
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    Ok(config_from(|key| std::env::var(key).ok()))
}

/// Build a config from a variable lookup. Unparseable numbers fall back
/// to their defaults.
pub fn config_from<F>(var: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();

    let string = |key: &str, default: String| var(key).unwrap_or(default);
    let number = |key: &str, default: u64| {
        var(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    };
    let flag = |key: &str| {
        var(key)
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
    };
    let coordinate = |key: &str| var(key).and_then(|v| v.trim().parse::<f64>().ok());

    let api_base_url = string("CITY_RESOLVER_API_BASE_URL", defaults.api_base_url);
    let geocoder_url = string("CITY_RESOLVER_GEOCODER_URL", defaults.geocoder_url);
    let user_agent = string("CITY_RESOLVER_USER_AGENT", defaults.user_agent);

    let latitude = coordinate("CITY_RESOLVER_LATITUDE");
    let longitude = coordinate("CITY_RESOLVER_LONGITUDE");
    let geoip_path = var("CITY_RESOLVER_GEOIP_PATH");
    let public_ip_url = string("CITY_RESOLVER_PUBLIC_IP_URL", defaults.public_ip_url);

    let position_timeout_ms = number(
        "CITY_RESOLVER_POSITION_TIMEOUT_MS",
        defaults.position_timeout_ms,
    );
    let position_max_age_secs = number(
        "CITY_RESOLVER_POSITION_MAX_AGE_SECS",
        defaults.position_max_age_secs,
    );
    let high_accuracy = flag("CITY_RESOLVER_HIGH_ACCURACY");

    let lookup_timeout_secs = number(
        "CITY_RESOLVER_LOOKUP_TIMEOUT_SECS",
        defaults.lookup_timeout_secs,
    );
    let default_city = string("CITY_RESOLVER_DEFAULT_CITY", defaults.default_city);
    let selection_path = string("CITY_RESOLVER_SELECTION_PATH", defaults.selection_path);

    let debug = var("DEBUG").is_some();

    Config {
        api_base_url,
        geocoder_url,
        user_agent,
        latitude,
        longitude,
        geoip_path,
        public_ip_url,
        position_timeout_ms,
        position_max_age_secs,
        high_accuracy,
        lookup_timeout_secs,
        default_city,
        selection_path,
        debug,
    }
}
