//! Bounds-checked reads over a borrowed byte buffer.
//!
//! EXIF data comes from user-supplied images, so every offset in it is
//! untrusted. All multi-byte reads go through [`ByteView`], which returns
//! [`ExifError::Truncated`] instead of panicking when a read would leave
//! the buffer.

use crate::error::ExifError;

/// A borrowed, immutable window onto a byte buffer.
///
/// Offsets passed to a `ByteView` are relative to the start of the view, so
/// wrapping the EXIF payload makes every TIFF offset resolve against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteView<'a> {
    /// Wrap a byte slice.
    #[inline]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Number of bytes in the view.
    #[inline]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the view is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The underlying slice.
    #[inline]
    pub const fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    /// Borrow `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// `Truncated` if the range does not lie entirely within the view,
    /// including when `offset + len` overflows.
    pub fn bytes(&self, offset: usize, len: usize) -> Result<&'a [u8], ExifError> {
        offset
            .checked_add(len)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or(ExifError::Truncated {
                offset,
                requested: len,
                size: self.bytes.len(),
            })
    }

    /// Read a fixed-size array at `offset`.
    #[inline]
    pub fn array<const N: usize>(&self, offset: usize) -> Result<[u8; N], ExifError> {
        let slice = self.bytes(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&self, offset: usize) -> Result<u8, ExifError> {
        self.array::<1>(offset).map(|[b]| b)
    }

    /// Read a big-endian u16.
    #[inline]
    pub fn read_u16_be(&self, offset: usize) -> Result<u16, ExifError> {
        self.array(offset).map(u16::from_be_bytes)
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16_le(&self, offset: usize) -> Result<u16, ExifError> {
        self.array(offset).map(u16::from_le_bytes)
    }

    /// Read a big-endian u32.
    #[inline]
    pub fn read_u32_be(&self, offset: usize) -> Result<u32, ExifError> {
        self.array(offset).map(u32::from_be_bytes)
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32_le(&self, offset: usize) -> Result<u32, ExifError> {
        self.array(offset).map(u32::from_le_bytes)
    }
}

impl<'a> From<&'a [u8]> for ByteView<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

// =============================================================================
// Tests
// =============================================================================
