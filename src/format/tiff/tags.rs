//! TIFF field types and the EXIF tags used for capture-date lookup.
//!
//! Only the vocabulary needed to reach `DateTimeOriginal` is defined here.
//! Entries with other tags are skipped during directory lookup.

// =============================================================================
// TIFF Field Types
// =============================================================================

/// Field type code of 8-bit ASCII values (1 byte per element).
///
/// `DateTimeOriginal` is always ASCII, so no other type is decoded.
pub const FIELD_TYPE_ASCII: u16 = 2;

/// Size of the value field of an IFD entry.
///
/// An ASCII value of at most this many bytes is stored in the entry itself;
/// a longer one lives at the offset held in that field.
pub const INLINE_VALUE_SIZE: u32 = 4;

// =============================================================================
// EXIF Tags
// =============================================================================

/// Tags followed on the way from IFD0 to the capture date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExifTag {
    /// Pointer from IFD0 to the Exif sub-IFD
    ExifIfdPointer = 0x8769,

    /// Date and time the original image was captured ("YYYY:MM:DD HH:MM:SS")
    DateTimeOriginal = 0x9003,
}

impl ExifTag {
    /// Get the numeric tag ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Conventional EXIF tag name.
    pub const fn name(self) -> &'static str {
        match self {
            ExifTag::ExifIfdPointer => "ExifIFDPointer",
            ExifTag::DateTimeOriginal => "DateTimeOriginal",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
