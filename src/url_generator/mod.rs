//! Campaign URL generation
//!
//! Expands a base URL and a list of query parameters, each with one or more
//! candidate values, into every possible parameterized URL.

pub mod assembler;
pub mod combiner;
pub mod params;
pub mod parser;
pub mod slug;


pub use assembler::{create, generate_queries, generate_urls, search, CreateOptions};
pub use combiner::{cartesian_values, CartesianValues};
pub use params::{encode_uri_component, map_values, ParamSpec, ParamValue};
pub use parser::{parse_url, ParsedUrl, QueryKey};
pub use slug::slug;

/// Number of URLs the given parameters would expand to
///
/// Returns `None` if the count does not fit in a `usize`.
pub fn combination_count(params: &[ParamSpec]) -> Option<usize> {
    combiner::product_len(params.iter().map(|spec| spec.values.len()))
}
