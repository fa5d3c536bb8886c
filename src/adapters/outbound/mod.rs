mod file_selection_store;
mod http;
mod http_city_directory;
mod http_location_search;
mod in_memory_selection_store;
mod maxmind_position_provider;
mod nominatim_reverse_geocoder;
mod static_position_provider;

pub use file_selection_store::FileSelectionStore;
pub use http::build_client;
pub use http_city_directory::HttpCityDirectory;
pub use http_location_search::HttpLocationSearch;
pub use in_memory_selection_store::InMemorySelectionStore;
pub use maxmind_position_provider::MaxMindPositionProvider;
pub use nominatim_reverse_geocoder::NominatimReverseGeocoder;
pub use static_position_provider::StaticPositionProvider;
