mod geo_lookup;

pub use geo_lookup::{GeoLookup, LookupError};
