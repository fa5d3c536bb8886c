//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options for a single position request.
///
/// Mirrors the knobs of a platform geolocation API: accuracy hint,
/// how long to wait, and how old a cached fix may be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionOptions {
    /// Ask for a high-accuracy fix (slower, more power)
    pub enable_high_accuracy: bool,
    /// How long to wait for a fix before giving up
    pub timeout: Duration,
    /// Maximum age of a cached fix that may be returned instead
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: false,
            timeout: Duration::from_millis(10_000),
            maximum_age: Duration::from_secs(5 * 60),
        }
    }
}

/// Which rule picked the resolved city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// Case-insensitive equality against the city name
    ExactName,
    /// Case-insensitive equality against the city slug
    ExactSlug,
    /// City name contains the candidate
    Substring,
    /// First city returned by the location search
    SearchCity,
    /// Directory city inside the first region returned by the search
    SearchRegion,
}

impl MatchSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactName => "exact_name",
            Self::ExactSlug => "exact_slug",
            Self::Substring => "substring",
            Self::SearchCity => "search_city",
            Self::SearchRegion => "search_region",
        }
    }
}

impl std::fmt::Display for MatchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Names that identify the default city.
///
/// Matching is a case-insensitive substring test, so one alias covers
/// "Riyadh", "riyadh" and "Riyadh Province".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultCity {
    aliases: Vec<String>,
}

impl DefaultCity {
    /// Build from a list of aliases. Blank entries are dropped.
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            aliases: aliases
                .into_iter()
                .map(|a| a.as_ref().trim().to_lowercase())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }

    /// Parse a comma-separated alias list.
    pub fn parse(s: &str) -> Self {
        Self::new(s.split(','))
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// True when `text` contains any alias, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.aliases.iter().any(|a| text.contains(a.as_str()))
    }
}

impl Default for DefaultCity {
    fn default() -> Self {
        Self::new(["riyadh", "الرياض"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_options_defaults() {
        let opts = PositionOptions::default();
        assert!(!opts.enable_high_accuracy);
        assert_eq!(opts.timeout, Duration::from_millis(10_000));
        assert_eq!(opts.maximum_age, Duration::from_secs(300));
    }

    #[test]
    fn test_match_source_display() {
        assert_eq!(MatchSource::ExactName.to_string(), "exact_name");
        assert_eq!(MatchSource::SearchRegion.to_string(), "search_region");
    }

    #[test]
    fn test_default_city_matches_latin_and_arabic() {
        let default = DefaultCity::default();

        assert!(default.matches("Riyadh"));
        assert!(default.matches("RIYADH"));
        assert!(default.matches("riyadh-city"));
        assert!(default.matches("مدينة الرياض"));
        assert!(!default.matches("Jeddah"));
    }

    #[test]
    fn test_default_city_parse_drops_blanks() {
        let default = DefaultCity::parse(" Dubai , ,DXB ");
        assert_eq!(default.aliases(), &["dubai".to_string(), "dxb".to_string()]);
        assert!(default.matches("Dubai Marina"));
    }

    #[test]
    fn test_default_city_empty_matches_nothing() {
        let default = DefaultCity::parse("");
        assert!(default.aliases().is_empty());
        assert!(!default.matches("Riyadh"));
    }
}
