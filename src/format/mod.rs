//! Image metadata parsing.
//!
//! This module reads just enough of an image to recover its capture year:
//!
//! - [`jpeg`] walks JPEG segments to the EXIF APP1 payload
//! - [`tiff`] reads the TIFF directories inside that payload
//! - [`exif`] chains the two into [`extract_year`]
//! - [`data_url`] decodes images embedded as `data:` URLs

pub mod data_url;
pub mod exif;
pub mod jpeg;
pub mod tiff;

pub use data_url::{
    decode_data_url, encode_data_url, extract_year_from_data_url, mime_for_path, DataUrl,
};
pub use exif::{extract_year, try_extract_year};
pub use jpeg::has_soi;
