use serde::{Deserialize, Serialize};

use crate::url_generator::{CreateOptions, ParamSpec};

/// Form submitted from the index page
#[derive(Debug, Deserialize, Clone)]
pub struct ScanForm {
    /// URL to encode as a QR code
    #[serde(default)]
    pub url: String,
}

/// Request body for `/generate`
#[derive(Debug, Deserialize, Clone)]
pub struct GenerateRequest {
    /// Base URL, parameters and optional slug
    #[serde(flatten)]
    pub options: CreateOptions,

    /// Also return a QR code for every generated URL
    #[serde(default)]
    pub qr: bool,
}

/// Response for `/generate`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerateResponse {
    /// Status indicator: success
    pub status: String,

    /// Number of generated URLs
    pub count: usize,

    /// Generated URLs in enumeration order
    pub urls: Vec<String>,

    /// QR code data URLs, one per entry in `urls`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub qr_codes: Option<Vec<String>>,
}

/// Request body for `/search`
#[derive(Debug, Deserialize, Clone)]
pub struct SearchRequest {
    /// Parameters to expand
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

/// Response for `/search`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchResponse {
    /// Status indicator: success
    pub status: String,

    /// Number of generated query strings
    pub count: usize,

    /// Query strings, each starting with `?`
    pub queries: Vec<String>,
}

/// Health status response for the /health endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: healthy
    pub status: String,

    /// Server uptime in seconds
    pub uptime_secs: u64,
}

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status indicator: error
    pub status: String,

    /// Error message details
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
