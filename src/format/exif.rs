//! EXIF capture-year extraction.
//!
//! Pipeline:
//!
//! ```text
//! image bytes
//!     │  jpeg::find_exif_payload      (APP1 segment, "Exif\0\0")
//!     ▼
//! TIFF container
//!     │  tiff::locate_date_time_original  (IFD0 → Exif IFD → 0x9003)
//!     ▼
//! IFD entry
//!     │  tiff::decode_year            (ASCII value, leading 4 digits)
//!     ▼
//! "2019"
//! ```
//!
//! The year only auto-fills a cosmetic field, so [`extract_year`] never
//! fails: every malformation is logged at debug level and becomes `None`.

use tracing::debug;

use crate::error::ExifError;
use crate::io::ByteView;

use super::jpeg::find_exif_payload;
use super::tiff::{decode_year, locate_date_time_original};

/// Extract the four-digit capture year from an image's EXIF metadata.
///
/// Returns `None` when the buffer has no EXIF segment, the metadata is
/// malformed or truncated, or `DateTimeOriginal` does not start with a year.
pub fn extract_year(data: &[u8]) -> Option<String> {
    match try_extract_year(data) {
        Ok(year) => Some(year),
        Err(reason) => {
            debug!(%reason, len = data.len(), "No capture year");
            None
        }
    }
}

/// Extract the capture year, reporting why it could not be found.
pub fn try_extract_year(data: &[u8]) -> Result<String, ExifError> {
    let container = ByteView::new(find_exif_payload(data)?);
    let found = locate_date_time_original(container)?;
    decode_year(container, &found.entry, found.header.byte_order)
}

// =============================================================================
// Tests
// =============================================================================
