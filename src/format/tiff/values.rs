//! Tag value decoding.
//!
//! Values either live inline in the entry's last 4 bytes or at an offset
//! relative to the container start. Only ASCII values are decoded here,
//! which is all the capture-date lookup needs.

use crate::error::ExifError;
use crate::io::ByteView;

use super::parser::{ByteOrder, IfdEntry};

/// Length of the year prefix in an EXIF date ("YYYY:MM:DD HH:MM:SS").
pub const YEAR_LEN: usize = 4;

/// Read an ASCII value.
///
/// Values of at most 4 bytes sit in the entry itself, longer ones at an
/// offset relative to the container start. Reads at most `count` bytes,
/// stops at the first NUL and stops at the end of the container when
/// `count` overruns it. A value that starts past the end decodes as an
/// empty string.
///
/// # Errors
/// `UnexpectedFieldType` if the entry is not ASCII.
pub fn read_ascii(
    container: ByteView<'_>,
    entry: &IfdEntry,
    byte_order: ByteOrder,
) -> Result<String, ExifError> {
    if !entry.is_ascii() {
        return Err(ExifError::UnexpectedFieldType(entry.field_type));
    }

    let start = if entry.is_ascii_inline() {
        entry.value_field_position()
    } else {
        entry.value_offset(byte_order) as usize
    };
    let available = container.as_slice().get(start..).unwrap_or_default();
    let declared = usize::try_from(entry.count).unwrap_or(usize::MAX);

    Ok(available
        .iter()
        .take(declared)
        .take_while(|&&b| b != 0)
        .map(|&b| char::from(b))
        .collect())
}

/// Return the leading four-digit year of a date string.
pub fn parse_year(date: &str) -> Option<&str> {
    let prefix = date.get(..YEAR_LEN)?;
    prefix
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then_some(prefix)
}

/// Decode the year from a `DateTimeOriginal` entry.
pub fn decode_year(
    container: ByteView<'_>,
    entry: &IfdEntry,
    byte_order: ByteOrder,
) -> Result<String, ExifError> {
    let date = read_ascii(container, entry, byte_order)?;
    match parse_year(&date) {
        Some(year) => Ok(year.to_string()),
        None => Err(ExifError::NoYear(date)),
    }
}

// =============================================================================
// Tests
// =============================================================================
