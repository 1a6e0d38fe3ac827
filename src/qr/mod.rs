use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use qrcode::render::svg;
use qrcode::QrCode;
use tracing::{debug, instrument};

/// Default minimum edge length of a rendered code, in pixels
pub const DEFAULT_MIN_DIMENSION: u32 = 200;

const DATA_URL_PREFIX: &str = "data:image/svg+xml;base64,";

/// Encodes `data` as a QR code and returns it as an SVG data URL
///
/// The result can be used directly as the `src` of an `<img>` tag.
///
/// # Arguments
/// * `data` - Text to encode, usually a URL
/// * `min_dimension` - Minimum width and height of the image in pixels
///
/// # Returns
/// * `Result<String>` - `data:image/svg+xml;base64,...`, or an error if the
///   text is empty or too long for a QR code
#[instrument(level = "debug", skip(data), fields(len = data.len()))]
pub fn to_data_url(data: &str, min_dimension: u32) -> Result<String> {
    let svg = to_svg(data, min_dimension)?;
    debug!("Rendered QR code SVG ({} bytes)", svg.len());
    Ok(format!("{}{}", DATA_URL_PREFIX, BASE64.encode(svg.as_bytes())))
}

/// Encodes `data` as a QR code rendered to an SVG document
pub fn to_svg(data: &str, min_dimension: u32) -> Result<String> {
    if data.is_empty() {
        bail!("Cannot encode empty data as a QR code");
    }

    let code = QrCode::new(data.as_bytes())
        .with_context(|| format!("Failed to encode {} bytes as a QR code", data.len()))?;

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(min_dimension, min_dimension)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}
