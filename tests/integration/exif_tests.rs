//! Capture-year extraction tests.
//!
//! Tests verify:
//! - Short, markerless and truncated buffers yield no year
//! - Little- and big-endian containers give the same result
//! - Inline (count <= 4) and offset-stored dates both decode
//! - Malformed directories fail closed
//! - Real encoded JPEGs with a spliced APP1 segment

use portfolio_exif::{extract_year, try_extract_year, ExifError};

use super::test_utils::{
    app1_segment, create_jpeg_with_date, create_test_jpeg, is_valid_jpeg, minimal_jpeg,
    ByteOrderType, ExifBuilder, TYPE_LONG,
};

// =============================================================================
// Degenerate Input Tests
// =============================================================================

#[test]
fn test_buffers_shorter_than_four_bytes() {
    assert_eq!(extract_year(&[]), None);
    assert_eq!(extract_year(&[0xFF]), None);
    assert_eq!(extract_year(&[0xFF, 0xD8]), None);
    assert_eq!(extract_year(&[0xFF, 0xD8, 0xFF]), None);
}

#[test]
fn test_buffer_without_app1_marker() {
    let jpeg = create_test_jpeg(8, 8);
    assert!(is_valid_jpeg(&jpeg));
    assert_eq!(extract_year(&jpeg), None);
    assert_eq!(try_extract_year(&jpeg), Err(ExifError::SegmentNotFound));
}

#[test]
fn test_non_jpeg_bytes() {
    let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    assert_eq!(extract_year(&png), None);
}

#[test]
fn test_soi_followed_by_overrunning_length() {
    // APP1 claims 0x4000 bytes but only the signature follows
    let data = [
        0xFF, 0xD8, 0xFF, 0xE1, 0x40, 0x00, b'E', b'x', b'i', b'f', 0, 0,
    ];
    assert_eq!(extract_year(&data), None);
    assert!(matches!(
        try_extract_year(&data),
        Err(ExifError::Truncated { .. })
    ));

    // Another segment with an overrunning length ends the walk
    let data = [0xFF, 0xD8, 0xFF, 0xE0, 0xFF, 0xFF, 0x00, 0x00];
    assert_eq!(extract_year(&data), None);
}

#[test]
fn test_segment_length_below_minimum_stops_walk() {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x01];
    data.extend_from_slice(&app1_segment(&ExifBuilder::new().build()));
    assert_eq!(try_extract_year(&data), Err(ExifError::SegmentNotFound));
}

#[test]
fn test_first_app1_without_signature_stops_scan() {
    // XMP-style APP1 first, then a valid EXIF APP1
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x08];
    data.extend_from_slice(b"http");
    data.extend_from_slice(&[0, 0]);
    data.extend_from_slice(&app1_segment(&ExifBuilder::new().build()));

    assert_eq!(try_extract_year(&data), Err(ExifError::MissingSignature(2)));
}

// =============================================================================
// Well-Formed Container Tests
// =============================================================================

#[test]
fn test_offset_stored_date() {
    let data = minimal_jpeg(&ExifBuilder::new().build());
    assert_eq!(extract_year(&data), Some("2019".to_string()));
}

#[test]
fn test_both_byte_orders_produce_equivalent_results() {
    let le = ExifBuilder::new()
        .with_byte_order(ByteOrderType::LittleEndian)
        .build();
    let be = ExifBuilder::new()
        .with_byte_order(ByteOrderType::BigEndian)
        .build();

    assert_eq!(&le[..2], b"II");
    assert_eq!(&be[..2], b"MM");
    assert_ne!(le, be);

    let le_year = extract_year(&minimal_jpeg(&le));
    let be_year = extract_year(&minimal_jpeg(&be));
    assert_eq!(le_year, Some("2019".to_string()));
    assert_eq!(le_year, be_year);
}

#[test]
fn test_inline_and_offset_storage() {
    for order in [ByteOrderType::LittleEndian, ByteOrderType::BigEndian] {
        // Exactly four bytes: stored inline
        let inline = ExifBuilder::new()
            .with_byte_order(order)
            .with_date(b"1987")
            .build();
        assert_eq!(inline.len(), ExifBuilder::VALUE_OFFSET as usize);
        assert_eq!(extract_year(&minimal_jpeg(&inline)), Some("1987".to_string()));

        // Twenty bytes: stored at an offset
        let offset = ExifBuilder::new()
            .with_byte_order(order)
            .with_date(b"2003:11:30 08:15:00\0")
            .build();
        assert_eq!(offset.len(), ExifBuilder::VALUE_OFFSET as usize + 20);
        assert_eq!(extract_year(&minimal_jpeg(&offset)), Some("2003".to_string()));
    }
}

#[test]
fn test_date_count_overrunning_container() {
    // Declared count runs past the end; the value stops at the container end
    let container = ExifBuilder::new().with_date_count(500).build();
    assert_eq!(extract_year(&minimal_jpeg(&container)), Some("2019".to_string()));
}

#[test]
fn test_extraction_is_idempotent() {
    let data = minimal_jpeg(&ExifBuilder::new().build());
    let first = extract_year(&data);
    let second = extract_year(&data);
    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("2019"));
}

// =============================================================================
// Malformed Container Tests
// =============================================================================

#[test]
fn test_exif_pointer_past_end() {
    let container = ExifBuilder::new().with_exif_pointer(10_000).build();
    let data = minimal_jpeg(&container);
    assert_eq!(extract_year(&data), None);
    assert!(matches!(
        try_extract_year(&data),
        Err(ExifError::Truncated { .. })
    ));
}

#[test]
fn test_null_exif_pointer() {
    let container = ExifBuilder::new().with_exif_pointer(0).build();
    assert_eq!(
        try_extract_year(&minimal_jpeg(&container)),
        Err(ExifError::MissingTag("ExifIFDPointer"))
    );
}

#[test]
fn test_missing_date_tag() {
    let container = ExifBuilder::new().without_date().build();
    assert_eq!(
        try_extract_year(&minimal_jpeg(&container)),
        Err(ExifError::MissingTag("DateTimeOriginal"))
    );
}

#[test]
fn test_invalid_byte_order_marker() {
    let mut container = ExifBuilder::new().build();
    container[0] = b'X';
    container[1] = b'X';
    assert_eq!(
        try_extract_year(&minimal_jpeg(&container)),
        Err(ExifError::InvalidByteOrder(0x5858))
    );
}

#[test]
fn test_non_ascii_date_type() {
    let container = ExifBuilder::new().with_date_type(TYPE_LONG).build();
    assert_eq!(
        try_extract_year(&minimal_jpeg(&container)),
        Err(ExifError::UnexpectedFieldType(TYPE_LONG))
    );
}

#[test]
fn test_non_numeric_and_empty_dates() {
    let cases: [&[u8]; 4] = [b"    :  :     :  :  \0", b"abcd:01:01 00:00:00\0", b"\0", b"19"];
    for date in cases {
        let data = minimal_jpeg(&ExifBuilder::new().with_date(date).build());
        assert_eq!(extract_year(&data), None, "date {:?}", date);
        assert!(matches!(try_extract_year(&data), Err(ExifError::NoYear(_))));
    }
}

#[test]
fn test_every_truncation_is_safe() {
    let data = minimal_jpeg(&ExifBuilder::new().build());
    for len in 0..data.len() {
        // Must not panic; any answer must be the real year
        if let Some(year) = extract_year(&data[..len]) {
            assert_eq!(year, "2019");
        }
    }
}

// =============================================================================
// Real JPEG Tests
// =============================================================================

#[test]
fn test_real_jpeg_little_endian() {
    let jpeg = create_jpeg_with_date(b"2021:03:14 15:09:26\0", ByteOrderType::LittleEndian);
    assert!(is_valid_jpeg(&jpeg));
    assert_eq!(extract_year(&jpeg), Some("2021".to_string()));
}

#[test]
fn test_real_jpeg_big_endian() {
    let jpeg = create_jpeg_with_date(b"1999:12:31 23:59:59\0", ByteOrderType::BigEndian);
    assert_eq!(extract_year(&jpeg), Some("1999".to_string()));
}

#[test]
fn test_spliced_jpeg_still_decodes_as_image() {
    let jpeg = create_jpeg_with_date(b"2010:01:01 00:00:00\0", ByteOrderType::LittleEndian);
    let img = image::load_from_memory_with_format(&jpeg, image::ImageFormat::Jpeg).unwrap();
    assert_eq!(img.width(), 8);
    assert_eq!(img.height(), 8);
}
