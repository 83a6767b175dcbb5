//! Two-level directory walk from IFD0 to `DateTimeOriginal`.

use tracing::trace;

use crate::error::ExifError;
use crate::io::ByteView;

use super::parser::{Ifd, IfdEntry, TiffHeader};
use super::tags::ExifTag;

/// Location of the capture-date entry inside an EXIF container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeOriginal {
    /// Header of the container the entry was found in
    pub header: TiffHeader,

    /// The `DateTimeOriginal` entry of the Exif sub-IFD
    pub entry: IfdEntry,
}

/// Find the `DateTimeOriginal` entry of an EXIF container.
///
/// `container` must start at the TIFF header; every pointer followed here
/// is taken relative to that position.
///
/// # Errors
/// - `InvalidByteOrder` / `Truncated` from the header or any directory read
/// - `MissingTag` if IFD0 has no Exif pointer (or a null one), or the Exif
///   sub-IFD has no `DateTimeOriginal`
pub fn locate_date_time_original(container: ByteView<'_>) -> Result<DateTimeOriginal, ExifError> {
    let header = TiffHeader::parse(container)?;
    let byte_order = header.byte_order;

    let ifd0 = Ifd::read(container, header.first_ifd_offset as usize, byte_order)?;
    let pointer = ifd0.require(container, ExifTag::ExifIfdPointer, byte_order)?;

    let exif_ifd_offset = pointer.value_offset(byte_order);
    if exif_ifd_offset == 0 {
        return Err(ExifError::MissingTag(ExifTag::ExifIfdPointer.name()));
    }

    let exif_ifd = Ifd::read(container, exif_ifd_offset as usize, byte_order)?;
    let entry = exif_ifd.require(container, ExifTag::DateTimeOriginal, byte_order)?;

    trace!(
        ifd0 = header.first_ifd_offset,
        exif_ifd = exif_ifd_offset,
        entry = entry.position,
        "Located DateTimeOriginal"
    );

    Ok(DateTimeOriginal { header, entry })
}
