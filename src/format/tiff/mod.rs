//! TIFF structure reader for EXIF containers.
//!
//! An EXIF APP1 payload is a classic TIFF file in miniature: a byte-order
//! header, IFD0, and an Exif sub-IFD reached through a pointer tag in IFD0.
//!
//! # Key Concepts
//!
//! - **Byte order**: the container declares its endianness (II = little-endian,
//!   MM = big-endian) once in the header. Every multi-byte value, including
//!   those in nested directories, must be read respecting this order.
//!
//! - **Offset base**: every offset stored in the container is relative to the
//!   first byte of the TIFF header, never to the start of the image file or
//!   of the current IFD.
//!
//! - **Inline vs offset values**: values of at most 4 bytes are stored inline
//!   in the IFD entry, larger values are stored at an offset pointed to by the
//!   entry.

mod directory;
mod parser;
mod tags;
mod values;

pub use directory::{locate_date_time_original, DateTimeOriginal};
pub use parser::{ByteOrder, IfdEntry, TiffHeader};
pub use values::decode_year;
