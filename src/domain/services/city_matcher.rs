//! City Matcher Service
//!
//! Pure domain logic for mapping free-text place names onto directory
//! cities. This service has NO external dependencies - it's pure Rust.

use crate::domain::entities::{AddressFields, City, LocationSearchResults, SelectedLocation};
use crate::domain::value_objects::{DefaultCity, MatchSource};

/// Matching rules for picking a directory city.
///
/// For a single name the rules are tried in order:
/// 1. exact name (case-insensitive)
/// 2. exact slug (case-insensitive)
/// 3. substring: the city name contains the candidate
///
/// Across names, the first candidate that matches anything wins.
pub struct CityMatcher;

impl CityMatcher {
    /// Extract candidate place names from a geocoded address.
    ///
    /// Priority order is city, town, village, municipality. Blank values
    /// are skipped so they can never substring-match every city.
    pub fn candidate_names(address: &AddressFields) -> Vec<&str> {
        [
            address.city.as_deref(),
            address.town.as_deref(),
            address.village.as_deref(),
            address.municipality.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
    }

    /// Match a single name against the directory.
    pub fn match_name<'a>(cities: &'a [City], name: &str) -> Option<(&'a City, MatchSource)> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        if let Some(city) = cities.iter().find(|c| c.name.to_lowercase() == needle) {
            return Some((city, MatchSource::ExactName));
        }

        if let Some(city) = cities.iter().find(|c| c.slug.to_lowercase() == needle) {
            return Some((city, MatchSource::ExactSlug));
        }

        cities
            .iter()
            .find(|c| c.name.to_lowercase().contains(&needle))
            .map(|city| (city, MatchSource::Substring))
    }

    /// Match candidates in priority order, returning the first hit.
    pub fn match_candidates<'a>(
        cities: &'a [City],
        candidates: &[&str],
    ) -> Option<(&'a City, MatchSource)> {
        candidates
            .iter()
            .find_map(|name| Self::match_name(cities, name))
    }

    /// Pick a city from a location search response.
    ///
    /// The first returned city wins; the directory's copy is preferred when
    /// one shares its id. Otherwise the first returned region is mapped to
    /// the first directory city inside it.
    pub fn city_from_search(
        cities: &[City],
        results: &LocationSearchResults,
    ) -> Option<(City, MatchSource)> {
        if let Some(found) = results.cities.first() {
            let city = cities
                .iter()
                .find(|c| c.id == found.id)
                .unwrap_or(found)
                .clone();
            return Some((city, MatchSource::SearchCity));
        }

        let region = results.regions.first()?;
        cities
            .iter()
            .find(|c| c.region_id == region.id)
            .map(|city| (city.clone(), MatchSource::SearchRegion))
    }

    /// Pick the fallback city: the first whose name matches the default
    /// aliases, else the first city in list order.
    pub fn default_city<'a>(cities: &'a [City], default: &DefaultCity) -> Option<&'a City> {
        cities
            .iter()
            .find(|c| default.matches(&c.name))
            .or_else(|| cities.first())
    }

    /// Whether a selection is the default city rather than an explicit choice.
    pub fn is_default_selection(selection: &SelectedLocation, default: &DefaultCity) -> bool {
        default.matches(selection.name()) || selection.slug().is_some_and(|s| default.matches(s))
    }
}
