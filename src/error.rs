use thiserror::Error;

/// Reasons an EXIF capture year could not be determined.
///
/// These never reach callers of [`crate::extract_year`]; they exist so the
/// extraction pipeline can be written with `?` and so each failure can be
/// logged before it collapses into `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExifError {
    /// A read ran past the end of the buffer
    #[error("Truncated read: requested {requested} bytes at offset {offset}, size is {size}")]
    Truncated {
        offset: usize,
        requested: usize,
        size: usize,
    },

    /// No APP1 segment was found before the segment walk terminated
    #[error("No EXIF segment found")]
    SegmentNotFound,

    /// An APP1 segment was found but does not start with "Exif\0\0"
    #[error("APP1 segment at offset {0} lacks the Exif signature")]
    MissingSignature(usize),

    /// Invalid TIFF byte-order marker (not II or MM)
    #[error("Invalid byte order marker: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidByteOrder(u16),

    /// Required tag is missing from its directory
    #[error("Missing tag: {0}")]
    MissingTag(&'static str),

    /// DateTimeOriginal is not stored as ASCII
    #[error("Unexpected field type {0} for DateTimeOriginal (expected ASCII)")]
    UnexpectedFieldType(u16),

    /// The date string does not start with four digits
    #[error("No leading four-digit year in {0:?}")]
    NoYear(String),
}

/// Errors that can occur when decoding a data URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUrlError {
    /// The string does not start with "data:"
    #[error("Not a data URL")]
    MissingScheme,

    /// No comma separates the header from the payload
    #[error("Data URL has no payload separator")]
    MissingPayload,

    /// Payload declared as base64 failed to decode
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Errors raised by a portfolio store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored document is not valid portfolio JSON
    #[error("Invalid portfolio JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from document-model operations
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Storage error while loading or saving
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Page index does not exist
    #[error("Page index {index} out of range (document has {len} pages)")]
    PageOutOfRange { index: usize, len: usize },

    /// A series needs at least one image page
    #[error("Series must contain at least one image")]
    EmptySeries,
}
