//! TIFF header and directory parsing inside an EXIF payload.
//!
//! The EXIF APP1 payload (after the `Exif\0\0` signature) is a complete
//! classic TIFF structure. Every offset inside it is relative to the first
//! byte of the TIFF header, so all reads here take a [`ByteView`] whose
//! offset 0 is that byte.
//!
//! # TIFF Header Structure
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42), not checked
//! Bytes 4-7: Offset to IFD0 (4 bytes)
//! ```
//!
//! # IFD Structure
//! ```text
//! Bytes 0-1:  Entry count N
//! Then N entries of 12 bytes:
//!   Bytes 0-1:  Tag
//!   Bytes 2-3:  Field type
//!   Bytes 4-7:  Value count
//!   Bytes 8-11: Value (if it fits) or offset to value
//! ```

use crate::error::ExifError;
use crate::io::ByteView;

use super::tags::{ExifTag, FIELD_TYPE_ASCII, INLINE_VALUE_SIZE};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Size of one IFD entry in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the entry count at the start of an IFD
pub const IFD_COUNT_SIZE: usize = 2;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Resolve a byte-order marker.
    ///
    /// Both markers are palindromic, so it does not matter which order the
    /// two bytes were combined in.
    pub fn from_marker(marker: u16) -> Result<Self, ExifError> {
        match marker {
            BYTE_ORDER_LITTLE_ENDIAN => Ok(ByteOrder::LittleEndian),
            BYTE_ORDER_BIG_ENDIAN => Ok(ByteOrder::BigEndian),
            _ => Err(ExifError::InvalidByteOrder(marker)),
        }
    }

    /// Read a u16 at `offset` using this byte order.
    #[inline]
    pub fn read_u16(self, view: ByteView<'_>, offset: usize) -> Result<u16, ExifError> {
        match self {
            ByteOrder::LittleEndian => view.read_u16_le(offset),
            ByteOrder::BigEndian => view.read_u16_be(offset),
        }
    }

    /// Read a u32 at `offset` using this byte order.
    #[inline]
    pub fn read_u32(self, view: ByteView<'_>, offset: usize) -> Result<u32, ExifError> {
        match self {
            ByteOrder::LittleEndian => view.read_u32_le(offset),
            ByteOrder::BigEndian => view.read_u32_be(offset),
        }
    }

    /// Decode a u32 from 4 raw bytes already copied out of an entry.
    #[inline]
    pub fn u32_from_bytes(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        }
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header of an EXIF container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the container
    pub byte_order: ByteOrder,

    /// Offset to IFD0, relative to the container start
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse the header at offset 0 of `container`.
    ///
    /// # Errors
    /// - `Truncated` if the container is shorter than 8 bytes
    /// - `InvalidByteOrder` if the first two bytes are not II or MM
    pub fn parse(container: ByteView<'_>) -> Result<Self, ExifError> {
        let marker = container.read_u16_be(0)?;
        let byte_order = ByteOrder::from_marker(marker)?;
        let first_ifd_offset = byte_order.read_u32(container, 4)?;

        Ok(TiffHeader {
            byte_order,
            first_ifd_offset,
        })
    }
}

// =============================================================================
// IfdEntry
// =============================================================================

/// A single 12-byte IFD entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    /// Position of the entry, relative to the container start
    pub position: usize,

    /// Tag ID
    pub tag: u16,

    /// Field type code
    pub field_type: u16,

    /// Number of values
    pub count: u32,

    /// Raw value/offset field, in file byte order
    pub value_offset_bytes: [u8; 4],
}

impl IfdEntry {
    /// Parse the entry at `position`.
    pub fn parse(
        container: ByteView<'_>,
        position: usize,
        byte_order: ByteOrder,
    ) -> Result<Self, ExifError> {
        // Make sure the whole entry is present before decoding any field
        container.bytes(position, IFD_ENTRY_SIZE)?;

        let tag = byte_order.read_u16(container, position)?;
        let field_type = byte_order.read_u16(container, position + 2)?;
        let count = byte_order.read_u32(container, position + 4)?;
        let value_offset_bytes = container.array::<4>(position + 8)?;

        Ok(IfdEntry {
            position,
            tag,
            field_type,
            count,
            value_offset_bytes,
        })
    }

    /// Position of the value/offset field within the container.
    #[inline]
    pub const fn value_field_position(&self) -> usize {
        self.position + 8
    }

    /// Interpret the value/offset field as a u32.
    #[inline]
    pub fn value_offset(&self, byte_order: ByteOrder) -> u32 {
        byte_order.u32_from_bytes(self.value_offset_bytes)
    }

    /// Whether the entry holds an ASCII value.
    #[inline]
    pub const fn is_ascii(&self) -> bool {
        self.field_type == FIELD_TYPE_ASCII
    }

    /// Whether an ASCII value fits in the entry's own value field.
    #[inline]
    pub const fn is_ascii_inline(&self) -> bool {
        self.count <= INLINE_VALUE_SIZE
    }
}

// =============================================================================
// Ifd
// =============================================================================

/// An Image File Directory located inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ifd {
    /// Position of the IFD, relative to the container start
    pub offset: usize,

    /// Number of entries declared by the IFD
    pub entry_count: u16,
}

impl Ifd {
    /// Read the entry count of the IFD at `offset`.
    pub fn read(
        container: ByteView<'_>,
        offset: usize,
        byte_order: ByteOrder,
    ) -> Result<Self, ExifError> {
        let entry_count = byte_order.read_u16(container, offset)?;
        Ok(Ifd {
            offset,
            entry_count,
        })
    }

    /// Position of entry `index`.
    #[inline]
    pub const fn entry_position(&self, index: u16) -> usize {
        self.offset + IFD_COUNT_SIZE + index as usize * IFD_ENTRY_SIZE
    }

    /// Find the first entry with the given tag.
    ///
    /// Entries are read in order; a truncated entry before the tag is found
    /// is an error, not a miss.
    pub fn find(
        &self,
        container: ByteView<'_>,
        tag: ExifTag,
        byte_order: ByteOrder,
    ) -> Result<Option<IfdEntry>, ExifError> {
        for index in 0..self.entry_count {
            let position = self.entry_position(index);
            if byte_order.read_u16(container, position)? == tag.as_u16() {
                return IfdEntry::parse(container, position, byte_order).map(Some);
            }
        }
        Ok(None)
    }

    /// Like [`Ifd::find`], but a missing tag is an error.
    pub fn require(
        &self,
        container: ByteView<'_>,
        tag: ExifTag,
        byte_order: ByteOrder,
    ) -> Result<IfdEntry, ExifError> {
        self.find(container, tag, byte_order)?
            .ok_or(ExifError::MissingTag(tag.name()))
    }
}

// =============================================================================
// Tests
// =============================================================================
