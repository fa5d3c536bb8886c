//! Domain Entities - Core location objects
//!
//! These entities represent the locations the directory knows about and the
//! raw signals (coordinates, geocoded addresses) used to pick one of them.
//! They have no external dependencies beyond serde.

use serde::{Deserialize, Serialize};

/// A canonical, directory-listed city.
///
/// Cities are read-only reference data: the full list is fetched once per
/// session and never mutated by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Unique identifier assigned by the backend
    pub id: String,
    /// Display name (e.g. "Riyadh")
    pub name: String,
    /// URL slug (e.g. "riyadh")
    pub slug: String,
    /// ID of the region this city belongs to
    pub region_id: String,
    /// Embedded region, when the backend expands it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

impl City {
    pub fn new(id: &str, name: &str, slug: &str, region_id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            region_id: region_id.to_string(),
            region: None,
        }
    }
}

/// An administrative region grouping several cities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
}

/// A country, the broadest location tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    /// ISO 3166-1 alpha-2 code, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// The location currently treated as "active" for a session.
///
/// Exactly one is live at a time. It is written by the resolver or by an
/// explicit user choice and is only ever replaced, never cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SelectedLocation {
    City(City),
    Region(Region),
    Country(Country),
}

impl SelectedLocation {
    pub fn id(&self) -> &str {
        match self {
            Self::City(c) => &c.id,
            Self::Region(r) => &r.id,
            Self::Country(c) => &c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::City(c) => &c.name,
            Self::Region(r) => &r.name,
            Self::Country(c) => &c.name,
        }
    }

    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::City(c) => Some(&c.slug),
            Self::Region(r) => r.slug.as_deref(),
            Self::Country(c) => c.slug.as_deref(),
        }
    }
}

impl From<City> for SelectedLocation {
    fn from(city: City) -> Self {
        Self::City(city)
    }
}

/// A geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Address breakdown returned by a reverse geocoder.
///
/// Every field is best-effort; any subset may be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressFields {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
}

impl AddressFields {
    pub fn with_city(city: &str) -> Self {
        Self {
            city: Some(city.to_string()),
            ..Default::default()
        }
    }
}

/// Results of a free-text search across all location tiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSearchResults {
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub cities: Vec<City>,
}

impl LocationSearchResults {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty() && self.regions.is_empty() && self.cities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_deserializes_camel_case() {
        let json = r#"{"id":"1","name":"Riyadh","slug":"riyadh","regionId":"r1"}"#;
        let city: City = serde_json::from_str(json).unwrap();

        assert_eq!(city.id, "1");
        assert_eq!(city.region_id, "r1");
        assert!(city.region.is_none());
    }

    #[test]
    fn test_city_with_embedded_region() {
        let json = r#"{
            "id": "2", "name": "Jeddah", "slug": "jeddah", "regionId": "r2",
            "region": {"id": "r2", "name": "Makkah", "countryId": "sa"}
        }"#;
        let city: City = serde_json::from_str(json).unwrap();

        let region = city.region.unwrap();
        assert_eq!(region.name, "Makkah");
        assert_eq!(region.country_id.as_deref(), Some("sa"));
        assert!(region.slug.is_none());
    }

    #[test]
    fn test_selected_location_tagged_json() {
        let selected = SelectedLocation::City(City::new("1", "Riyadh", "riyadh", "r1"));
        let json = serde_json::to_value(&selected).unwrap();

        assert_eq!(json["type"], "city");
        assert_eq!(json["regionId"], "r1");

        let back: SelectedLocation = serde_json::from_value(json).unwrap();
        assert_eq!(back, selected);
    }

    #[test]
    fn test_selected_location_accessors() {
        let region = SelectedLocation::Region(Region {
            id: "r1".to_string(),
            name: "Riyadh Region".to_string(),
            slug: None,
            country_id: None,
        });

        assert_eq!(region.id(), "r1");
        assert_eq!(region.name(), "Riyadh Region");
        assert_eq!(region.slug(), None);
    }

    #[test]
    fn test_address_fields_tolerate_missing_and_extra_keys() {
        let json = r#"{"town":"Al Khobar","road":"King Fahd Rd","country":"Saudi Arabia"}"#;
        let addr: AddressFields = serde_json::from_str(json).unwrap();

        assert_eq!(addr.town.as_deref(), Some("Al Khobar"));
        assert!(addr.city.is_none());
        assert!(addr.village.is_none());
        assert!(addr.municipality.is_none());
    }

    #[test]
    fn test_search_results_default_to_empty() {
        let results: LocationSearchResults = serde_json::from_str("{}").unwrap();
        assert!(results.is_empty());
    }
}
