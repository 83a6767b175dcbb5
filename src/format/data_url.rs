//! Data URL encoding and decoding for embedded page images.
//!
//! Portfolio documents embed images as `data:` URLs:
//!
//! ```text
//! data:image/jpeg;base64,/9j/4AAQSkZJRg...
//! data:image/svg+xml,%3Csvg...
//! ```
//!
//! Base64 payloads are decoded leniently (ASCII whitespace ignored, padding
//! optional) to accept what browsers produce; other payloads are
//! percent-decoded.

use std::path::Path;

use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use bytes::Bytes;
use tracing::debug;

use crate::error::DataUrlError;

use super::exif::extract_year;

/// URL scheme prefix
const SCHEME: &str = "data:";

/// Parameter marking a base64 payload
const BASE64_PARAM: &str = "base64";

/// MIME type assumed when the header omits one
pub const DEFAULT_MIME_TYPE: &str = "text/plain";

/// MIME type for files with an unknown extension
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Base64 decoder that accepts both padded and unpadded input.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

// =============================================================================
// DataUrl
// =============================================================================

/// A decoded data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Media type from the header, e.g. `image/jpeg`
    pub mime_type: String,

    /// Whether the payload was base64-encoded
    pub is_base64: bool,

    /// Decoded payload
    pub data: Bytes,
}

impl DataUrl {
    /// Whether the media type is an image type.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Decode a data URL.
///
/// # Errors
/// - `MissingScheme` if the string does not start with `data:`
/// - `MissingPayload` if there is no comma after the header
/// - `InvalidBase64` if a base64 payload does not decode
pub fn decode_data_url(url: &str) -> Result<DataUrl, DataUrlError> {
    let scheme = url.get(..SCHEME.len()).ok_or(DataUrlError::MissingScheme)?;
    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return Err(DataUrlError::MissingScheme);
    }

    let (header, payload) = url[SCHEME.len()..]
        .split_once(',')
        .ok_or(DataUrlError::MissingPayload)?;

    let mut params = header.split(';');
    let mime_type = match params.next().map(str::trim) {
        Some(mime) if !mime.is_empty() => mime.to_ascii_lowercase(),
        _ => DEFAULT_MIME_TYPE.to_string(),
    };
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case(BASE64_PARAM));

    let data = if is_base64 {
        let compact: Vec<u8> = payload
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        LENIENT
            .decode(compact)
            .map_err(|e| DataUrlError::InvalidBase64(e.to_string()))?
    } else {
        urlencoding::decode_binary(payload.as_bytes()).into_owned()
    };

    Ok(DataUrl {
        mime_type,
        is_base64,
        data: Bytes::from(data),
    })
}

/// Encode bytes as a base64 data URL.
pub fn encode_data_url(mime_type: &str, data: &[u8]) -> String {
    format!("{SCHEME}{mime_type};{BASE64_PARAM},{}", STANDARD.encode(data))
}

/// Extract the capture year from an image embedded as a data URL.
///
/// Returns `None` if the URL does not decode or the image has no year.
pub fn extract_year_from_data_url(url: &str) -> Option<String> {
    match decode_data_url(url) {
        Ok(decoded) => extract_year(&decoded.data),
        Err(reason) => {
            debug!(%reason, "Image data URL did not decode");
            None
        }
    }
}

/// Guess an image MIME type from a file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg" | "jpeg" | "jfif") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("tif" | "tiff") => "image/tiff",
        _ => FALLBACK_MIME_TYPE,
    }
}

// =============================================================================
// Tests
// =============================================================================
