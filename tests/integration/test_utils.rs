//! Test utilities for integration tests.
//!
//! This module provides builders for EXIF containers with various
//! configurations and helpers for wrapping them in real JPEG streams.

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

use portfolio_exif::encode_data_url;

/// Tag of the Exif sub-IFD pointer
pub const TAG_EXIF_IFD: u16 = 0x8769;

/// Tag of DateTimeOriginal
pub const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;

/// TIFF ASCII field type
pub const TYPE_ASCII: u16 = 2;

/// TIFF LONG field type
pub const TYPE_LONG: u16 = 4;

/// A typical camera timestamp, NUL-terminated (20 bytes).
pub const SAMPLE_DATE: &[u8] = b"2019:06:01 12:00:00\0";

// =============================================================================
// EXIF Container Builder
// =============================================================================

/// Byte order for test containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

/// Builder for a minimal EXIF (TIFF) container.
///
/// Layout, relative to the container start:
///
/// ```text
/// 0   header (byte order, 42, IFD0 offset = 8)
/// 8   IFD0: one entry, ExifIFDPointer -> 26
/// 26  Exif IFD: one entry, DateTimeOriginal
/// 44  out-of-line date value (when it does not fit inline)
/// ```
#[derive(Debug, Clone)]
pub struct ExifBuilder {
    byte_order: ByteOrderType,
    date: Option<Vec<u8>>,
    date_type: u16,
    exif_pointer: Option<u32>,
    date_count: Option<u32>,
}

impl ExifBuilder {
    /// Offset of IFD0
    pub const IFD0_OFFSET: u32 = 8;
    /// Offset of the Exif IFD
    pub const EXIF_IFD_OFFSET: u32 = 26;
    /// Offset of out-of-line values
    pub const VALUE_OFFSET: u32 = 44;

    pub fn new() -> Self {
        Self {
            byte_order: ByteOrderType::LittleEndian,
            date: Some(SAMPLE_DATE.to_vec()),
            date_type: TYPE_ASCII,
            exif_pointer: None,
            date_count: None,
        }
    }

    pub fn with_byte_order(mut self, order: ByteOrderType) -> Self {
        self.byte_order = order;
        self
    }

    /// Set the raw DateTimeOriginal bytes (the count is their length).
    pub fn with_date(mut self, date: &[u8]) -> Self {
        self.date = Some(date.to_vec());
        self
    }

    /// Leave DateTimeOriginal out of the Exif IFD.
    pub fn without_date(mut self) -> Self {
        self.date = None;
        self
    }

    /// Store the date with a different field type.
    pub fn with_date_type(mut self, field_type: u16) -> Self {
        self.date_type = field_type;
        self
    }

    /// Override the declared count of the date entry.
    pub fn with_date_count(mut self, count: u32) -> Self {
        self.date_count = Some(count);
        self
    }

    /// Point IFD0's ExifIFDPointer somewhere else.
    pub fn with_exif_pointer(mut self, offset: u32) -> Self {
        self.exif_pointer = Some(offset);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut data = Vec::new();

        // Header
        match self.byte_order {
            ByteOrderType::LittleEndian => data.extend_from_slice(b"II"),
            ByteOrderType::BigEndian => data.extend_from_slice(b"MM"),
        }
        self.write_u16(&mut data, 42);
        self.write_u32(&mut data, Self::IFD0_OFFSET);

        // IFD0
        self.write_u16(&mut data, 1);
        self.write_u16(&mut data, TAG_EXIF_IFD);
        self.write_u16(&mut data, TYPE_LONG);
        self.write_u32(&mut data, 1);
        self.write_u32(
            &mut data,
            self.exif_pointer.unwrap_or(Self::EXIF_IFD_OFFSET),
        );
        self.write_u32(&mut data, 0);
        assert_eq!(data.len(), Self::EXIF_IFD_OFFSET as usize);

        // Exif IFD
        let mut out_of_line = Vec::new();
        match &self.date {
            Some(date) => {
                let count = self.date_count.unwrap_or(date.len() as u32);
                self.write_u16(&mut data, 1);
                self.write_u16(&mut data, TAG_DATE_TIME_ORIGINAL);
                self.write_u16(&mut data, self.date_type);
                self.write_u32(&mut data, count);
                if date.len() <= 4 {
                    let mut inline = [0u8; 4];
                    inline[..date.len()].copy_from_slice(date);
                    data.extend_from_slice(&inline);
                } else {
                    self.write_u32(&mut data, Self::VALUE_OFFSET);
                    out_of_line.extend_from_slice(date);
                }
            }
            None => self.write_u16(&mut data, 0),
        }
        self.write_u32(&mut data, 0);

        if !out_of_line.is_empty() {
            assert_eq!(data.len(), Self::VALUE_OFFSET as usize);
            data.extend_from_slice(&out_of_line);
        }

        data
    }

    fn write_u16(&self, data: &mut Vec<u8>, value: u16) {
        match self.byte_order {
            ByteOrderType::LittleEndian => data.extend_from_slice(&value.to_le_bytes()),
            ByteOrderType::BigEndian => data.extend_from_slice(&value.to_be_bytes()),
        }
    }

    fn write_u32(&self, data: &mut Vec<u8>, value: u32) {
        match self.byte_order {
            ByteOrderType::LittleEndian => data.extend_from_slice(&value.to_le_bytes()),
            ByteOrderType::BigEndian => data.extend_from_slice(&value.to_be_bytes()),
        }
    }
}

impl Default for ExifBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// JPEG Helpers
// =============================================================================

/// Wrap an EXIF container in an APP1 segment (marker, length, signature).
pub fn app1_segment(container: &[u8]) -> Vec<u8> {
    let length = (2 + 6 + container.len()) as u16;
    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&length.to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(container);
    segment
}

/// A minimal stream: SOI, APP1 and EOI.
pub fn minimal_jpeg(container: &[u8]) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    data.extend_from_slice(&app1_segment(container));
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

/// Create a real JPEG image using the image crate.
pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8])
    });

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, 80);
    encoder.encode_image(&img).unwrap();
    buf
}

/// Insert an APP1 segment carrying `container` into an encoded JPEG.
///
/// The segment goes after the JFIF APP0 segment when there is one, the way
/// cameras order them, otherwise straight after SOI.
pub fn splice_exif(jpeg: &[u8], container: &[u8]) -> Vec<u8> {
    assert!(is_valid_jpeg(jpeg));

    let mut insert_at = 2;
    if jpeg.len() >= 6 && jpeg[2] == 0xFF && jpeg[3] == 0xE0 {
        let length = u16::from_be_bytes([jpeg[4], jpeg[5]]) as usize;
        insert_at = 2 + 2 + length;
    }

    let mut out = Vec::with_capacity(jpeg.len() + container.len() + 10);
    out.extend_from_slice(&jpeg[..insert_at]);
    out.extend_from_slice(&app1_segment(container));
    out.extend_from_slice(&jpeg[insert_at..]);
    out
}

/// A real JPEG carrying `date` as DateTimeOriginal.
pub fn create_jpeg_with_date(date: &[u8], order: ByteOrderType) -> Vec<u8> {
    let container = ExifBuilder::new()
        .with_byte_order(order)
        .with_date(date)
        .build();
    splice_exif(&create_test_jpeg(8, 8), &container)
}

/// A JPEG data URL carrying `date` as DateTimeOriginal.
pub fn jpeg_data_url_with_date(date: &[u8]) -> String {
    encode_data_url(
        "image/jpeg",
        &create_jpeg_with_date(date, ByteOrderType::LittleEndian),
    )
}

/// A JPEG data URL without any EXIF segment.
pub fn plain_jpeg_data_url() -> String {
    encode_data_url("image/jpeg", &create_test_jpeg(8, 8))
}

/// Check if data starts with the JPEG SOI marker.
pub fn is_valid_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8
}
