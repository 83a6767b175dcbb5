//! Portfolio document model and persistence.
//!
//! The extractor in [`crate::format`] feeds this layer: adding or replacing a
//! page image fills the page's year from the image's capture date, and
//! [`annotate_years`] does the same for a whole stored document.

mod annotate;
mod model;
mod profile;
mod store;
mod theme;

pub use annotate::{annotate_years, AnnotationReport};
pub use model::{
    Link, Page, PageData, PageKind, Portfolio, UserInfo, APP_VERSION, DEFAULT_PORTFOLIO_LABEL,
};
pub use profile::{
    hostname, instagram_url, normalize_url, parse_additional_links, ProfileUpdate,
};
pub use store::{FileStore, MemoryStore, PortfolioStore, DEFAULT_PORTFOLIO_FILE};
pub use theme::{
    normalize_hex, Theme, ThemeColor, ThemePreset, FALLBACK_COLOR, MAX_BODY_FONT_SIZE,
    MIN_BODY_FONT_SIZE,
};
