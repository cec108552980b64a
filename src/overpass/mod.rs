//! Overpass API boundary: query construction and the HTTP client.

mod client;
mod query;

pub use client::{parse_response, OverpassClient};
pub use query::build_query;
