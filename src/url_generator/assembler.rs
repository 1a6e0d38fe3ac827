use anyhow::{bail, Result};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::combiner::cartesian_values;
use super::params::{map_values, ParamSpec, ParamValue};
use super::parser::{parse_url, ParsedUrl};
use super::slug::slug;

/// Input for [`create`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOptions {
    /// Base URL; any query parameters it already has are kept
    pub url: String,
    /// Parameters to expand, in the order they should appear
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    /// Optional text appended to the path as a slug
    #[serde(default)]
    pub slug: Option<String>,
}

impl CreateOptions {
    pub fn new(url: impl Into<String>, params: Vec<ParamSpec>) -> Self {
        Self {
            url: url.into(),
            params,
            slug: None,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

/// Creates one URL for every combination of the given parameters
///
/// This function performs the following steps:
/// 1. Parses the base URL into its components
/// 2. Puts the URL's existing query parameters in front of `params`
/// 3. Expands every parameter into its `&key=value` fragments
/// 4. Assembles one URL per combination, in odometer order
///
/// The work is purely computational and completes without suspending.
///
/// # Arguments
/// * `options` - Base URL, parameters and optional slug
///
/// # Returns
/// * `Result<Vec<String>>` - The generated URLs, or an error for a parameter without a key
#[instrument(level = "debug", skip_all, fields(url = %options.url, params = options.params.len()))]
pub async fn create(options: CreateOptions) -> Result<Vec<String>> {
    generate_urls(&options)
}

/// Creates one query string for every combination of the given parameters
///
/// Each result starts with `?`; no base URL is involved.
#[instrument(level = "debug", skip_all, fields(params = params.len()))]
pub async fn search(params: Vec<ParamSpec>) -> Result<Vec<String>> {
    generate_queries(&params)
}

/// Blocking counterpart of [`create`]
pub fn generate_urls(options: &CreateOptions) -> Result<Vec<String>> {
    validate_params(&options.params)?;

    let parsed = parse_url(&options.url);
    let specs = merge_existing_query(&parsed, &options.params);
    debug!(
        "Merged {} existing query parameter(s) with {} new parameter(s)",
        parsed.query_key.len(),
        options.params.len()
    );

    let fragments = map_values(&specs);
    let slug_value = options.slug.as_deref();
    let urls: Vec<String> = cartesian_values(&fragments)
        .map(|combination| make_url(&to_search(&combination), &parsed, slug_value))
        .collect();

    info!("Generated {} URL(s) for {}", urls.len(), options.url);
    Ok(urls)
}

/// Blocking counterpart of [`search`]
pub fn generate_queries(params: &[ParamSpec]) -> Result<Vec<String>> {
    validate_params(params)?;

    let fragments = map_values(params);
    let queries: Vec<String> = cartesian_values(&fragments)
        .map(|combination| to_search(&combination))
        .collect();

    info!("Generated {} query string(s)", queries.len());
    Ok(queries)
}

fn validate_params(params: &[ParamSpec]) -> Result<()> {
    if let Some(idx) = params.iter().position(|spec| spec.key.is_empty()) {
        bail!("Parameter at position {} has an empty key", idx);
    }
    Ok(())
}

/// Existing query parameters become single-valued specs ahead of `params`
///
/// Their values are already in URL form, so they are not encoded again.
fn merge_existing_query(parsed: &ParsedUrl, params: &[ParamSpec]) -> Vec<ParamSpec> {
    parsed
        .query_key
        .iter()
        .map(|(key, value)| ParamSpec::single(key, ParamValue::with_options(value, true)))
        .chain(params.iter().cloned())
        .collect()
}

/// Swaps the first `&` of a combination for `?`
fn to_search(combination: &str) -> String {
    combination.replacen('&', "?", 1)
}

/// Builds the final URL from a query string, the parsed base URL and a slug
fn make_url(search: &str, parsed: &ParsedUrl, slug_value: Option<&str>) -> String {
    let mut url = String::with_capacity(
        parsed.protocol.len() + parsed.host.len() + parsed.path.len() + search.len() + 16,
    );
    url.push_str(&parsed.protocol);
    url.push_str("://");
    url.push_str(&parsed.host);
    if !parsed.port.is_empty() {
        url.push(':');
        url.push_str(&parsed.port);
    }
    url.push_str(&make_path(&parsed.path, slug_value));
    url.push_str(search);
    url.push_str(&parsed.fragment);
    url
}

/// Existing path followed by `/slug` when a slug is given
fn make_path(path: &str, slug_value: Option<&str>) -> String {
    match slug_value.filter(|s| !s.is_empty()) {
        Some(value) => format!("{}/{}", path, slug(value)),
        None => path.to_string(),
    }
}
