//! # Portfolio EXIF
//!
//! Capture-year extraction for portfolio documents.
//!
//! A portfolio is a JSON document of pages (a cover, single images and
//! multi-image series) whose images are embedded as data URLs. When an image
//! is placed on a page, the page's year is filled from the capture date in
//! the image's EXIF metadata.
//!
//! ## Features
//!
//! - **Best-effort extraction**: [`extract_year`] never fails; any malformed,
//!   truncated or missing metadata simply yields `None`
//! - **Bounds-checked parsing**: every read of untrusted image bytes goes
//!   through [`io::ByteView`], so malformed offsets cannot panic
//! - **Lossless documents**: fields this crate does not model survive a
//!   load/save round trip
//!
//! ## Architecture
//!
//! - [`io`] - Bounds-checked byte reads
//! - [`mod@format`] - JPEG segment scanner, TIFF directory reader, data URLs
//! - [`portfolio`] - Document model, year annotation and storage
//! - [`config`] - CLI configuration types
//!
//! ## Example
//!
//! ```rust
//! use portfolio_exif::{extract_year, Portfolio};
//!
//! // Not a JPEG with EXIF: no year, no error
//! assert_eq!(extract_year(&[0x89, b'P', b'N', b'G']), None);
//!
//! let mut portfolio = Portfolio::new();
//! let index = portfolio.add_image_page("data:image/png;base64,iVBORw0KGgo=");
//! assert_eq!(portfolio.pages[index].data.year.as_deref(), Some(""));
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod portfolio;

// Re-export commonly used types
pub use config::{AddConfig, AnnotateConfig, Cli, Command, YearConfig};
pub use error::{DataUrlError, ExifError, PortfolioError, StoreError};
pub use format::{
    decode_data_url, encode_data_url, extract_year, extract_year_from_data_url, mime_for_path,
    try_extract_year, DataUrl,
};
pub use portfolio::{
    annotate_years, AnnotationReport, FileStore, Link, MemoryStore, Page, PageData, PageKind,
    Portfolio, PortfolioStore, ProfileUpdate, Theme, ThemeColor, ThemePreset, UserInfo,
    APP_VERSION, DEFAULT_PORTFOLIO_FILE,
};
