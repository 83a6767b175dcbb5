//! JPEG segment scanning.
//!
//! A JPEG stream after its SOI marker is a sequence of segments:
//!
//! ```text
//! 0xFF <marker> <length: u16 big-endian, includes itself> <payload>
//! ```
//!
//! EXIF metadata lives in an APP1 segment whose payload starts with the
//! 6-byte signature `Exif\0\0`, followed by a TIFF structure. This module
//! walks the segment chain to find that TIFF structure; it does not validate
//! the rest of the image.

use tracing::trace;

use crate::error::ExifError;
use crate::io::ByteView;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// First byte of every marker
pub const MARKER_PREFIX: u8 = 0xFF;

/// Application segment 1 (EXIF) marker code
pub const APP1: u8 = 0xE1;

/// Signature at the start of an EXIF APP1 payload
pub const EXIF_SIGNATURE: [u8; 6] = *b"Exif\0\0";

/// Offset of the first segment (just past SOI)
const FIRST_SEGMENT_OFFSET: usize = 2;

/// Size of the marker plus length field
const SEGMENT_HEADER_SIZE: usize = 4;

/// Smallest valid segment length (the length field itself)
const MIN_SEGMENT_LENGTH: u16 = 2;

// =============================================================================
// Segment Header
// =============================================================================

/// Marker and length of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentHeader {
    /// Offset of the 0xFF prefix within the buffer
    pub offset: usize,

    /// Marker code (second marker byte)
    pub marker: u8,

    /// Declared length, including the 2-byte length field
    pub length: u16,
}

impl SegmentHeader {
    /// Offset of the first payload byte.
    #[inline]
    pub const fn payload_start(&self) -> usize {
        self.offset + SEGMENT_HEADER_SIZE
    }

    /// Offset one past the last payload byte.
    ///
    /// Only meaningful when `length >= 2`.
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + 2 + self.length as usize
    }
}

/// Check whether data starts with the JPEG SOI marker.
pub fn has_soi(data: &[u8]) -> bool {
    data.starts_with(&SOI)
}

// =============================================================================
// EXIF Segment Lookup
// =============================================================================

/// Find the TIFF structure carried by the EXIF APP1 segment.
///
/// Scanning starts at offset 2; the SOI marker itself is not checked. The
/// walk ends without a result when a segment does not start with 0xFF, when
/// no complete segment header remains, or when a declared length is below 2.
///
/// The first APP1 segment decides the outcome: if it lacks the `Exif\0\0`
/// signature the scan stops instead of looking for a later APP1.
///
/// # Returns
/// The APP1 payload after the signature, through the end of the segment.
pub fn find_exif_payload(data: &[u8]) -> Result<&[u8], ExifError> {
    let view = ByteView::new(data);
    let mut offset = FIRST_SEGMENT_OFFSET;

    // Require at least one byte beyond the segment header
    while offset
        .checked_add(SEGMENT_HEADER_SIZE)
        .is_some_and(|end| end < data.len())
    {
        if view.read_u8(offset)? != MARKER_PREFIX {
            trace!(offset, "Segment walk hit a non-marker byte");
            break;
        }

        let header = SegmentHeader {
            offset,
            marker: view.read_u8(offset + 1)?,
            length: view.read_u16_be(offset + 2)?,
        };

        if header.marker == APP1 {
            return exif_payload(view, &header);
        }

        if header.length < MIN_SEGMENT_LENGTH {
            trace!(offset, length = header.length, "Segment length below minimum");
            break;
        }

        offset = header.end();
    }

    Err(ExifError::SegmentNotFound)
}

/// Slice the TIFF structure out of an APP1 segment.
fn exif_payload<'a>(view: ByteView<'a>, header: &SegmentHeader) -> Result<&'a [u8], ExifError> {
    let start = header.payload_start();

    let has_signature = view
        .bytes(start, EXIF_SIGNATURE.len())
        .is_ok_and(|sig| sig == EXIF_SIGNATURE);
    if !has_signature {
        return Err(ExifError::MissingSignature(header.offset));
    }

    let tiff_start = start + EXIF_SIGNATURE.len();
    let tiff_len = header
        .end()
        .checked_sub(tiff_start)
        .ok_or(ExifError::Truncated {
            offset: tiff_start,
            requested: 0,
            size: view.len(),
        })?;

    view.bytes(tiff_start, tiff_len)
}

// =============================================================================
// Tests
// =============================================================================
