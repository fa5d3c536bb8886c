mod city_directory;
mod location_search;
mod position_provider;
mod reverse_geocoder;
mod selection_store;

pub use city_directory::CityDirectory;
pub use location_search::LocationSearch;
pub use position_provider::PositionProvider;
pub use reverse_geocoder::ReverseGeocoder;
pub use selection_store::SelectionStore;
