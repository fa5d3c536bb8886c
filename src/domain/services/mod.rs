mod city_matcher;

pub use city_matcher::CityMatcher;
