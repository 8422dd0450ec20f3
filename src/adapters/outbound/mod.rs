mod ip_api_lookup;

pub use ip_api_lookup::{IpApiLookup, DEFAULT_ENDPOINT, LOOKUP_FIELDS};
