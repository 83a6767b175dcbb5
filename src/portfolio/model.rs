//! Portfolio document model.
//!
//! The stored JSON has this shape:
//!
//! ```text
//! {
//!   "appVersion": "web",
//!   "userInfo": { "name": ..., "themePreset": ..., "theme": { ... } },
//!   "pages": [
//!     { "type": "cover",        "data": {}, "image": null },
//!     { "type": "single",       "data": { "title", "year", "desc" }, "image": "data:..." },
//!     { "type": "series-cover", "data": { "title", "year", "desc", "total" }, "image": null, "seriesTitle": ... },
//!     { "type": "series-image", "data": { "title", "desc" }, "image": null, "seriesTitle": ..., "seriesTotal": ... }
//!   ]
//! }
//! ```
//!
//! Fields not modelled here are kept in `extra` maps so that a load/save
//! round trip does not drop data written by other editors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::PortfolioError;
use crate::format::extract_year_from_data_url;

use super::theme::{Theme, ThemePreset};

/// Value written to `appVersion` on save.
pub const APP_VERSION: &str = "web";

/// Default label shown on the cover.
pub const DEFAULT_PORTFOLIO_LABEL: &str = "Portfolio";

// =============================================================================
// User Info
// =============================================================================

/// A named external link shown on the cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

/// The portfolio owner's profile and theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    pub name: String,
    pub years: String,
    pub statement: String,
    pub instagram: String,
    pub username: String,
    pub email: String,
    pub website: String,
    pub website_label: String,
    pub additional_links: Vec<Link>,
    pub portfolio_label: String,
    pub theme_preset: String,
    pub theme: Option<Theme>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for UserInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            years: String::new(),
            statement: String::new(),
            instagram: String::new(),
            username: String::new(),
            email: String::new(),
            website: String::new(),
            website_label: String::new(),
            additional_links: Vec::new(),
            portfolio_label: DEFAULT_PORTFOLIO_LABEL.to_string(),
            theme_preset: ThemePreset::Default.key().to_string(),
            theme: Some(ThemePreset::Default.defaults()),
            extra: Map::new(),
        }
    }
}

impl UserInfo {
    /// The normalised preset.
    pub fn preset(&self) -> ThemePreset {
        ThemePreset::normalize(&self.theme_preset)
    }

    /// Normalise the preset key and fill missing theme fields from it.
    ///
    /// Returns the resulting theme.
    pub fn ensure_theme_consistency(&mut self) -> &Theme {
        let preset = self.preset();
        self.theme_preset = preset.key().to_string();

        let theme = self.theme.get_or_insert_with(Theme::default);
        theme.fill_from(&preset.defaults());
        theme
    }
}

// =============================================================================
// Pages
// =============================================================================

/// Page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    /// Cover built from the user profile
    Cover,
    /// One image with title, year and description
    Single,
    /// Title page of a series project
    SeriesCover,
    /// One image of a series project
    SeriesImage,
}

/// Editable text of a page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// Number of images in a series (series covers only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageData {
    /// Whether the year is unset or blank.
    pub fn year_is_blank(&self) -> bool {
        self.year.as_deref().map_or(true, |y| y.trim().is_empty())
    }
}

/// A page of the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(rename = "type")]
    pub kind: PageKind,

    #[serde(default)]
    pub data: PageData,

    /// Embedded image as a data URL
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_total: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Page {
    fn new(kind: PageKind, data: PageData) -> Self {
        Self {
            kind,
            data,
            image: None,
            series_title: None,
            series_total: None,
            extra: Map::new(),
        }
    }

    /// An empty cover page.
    pub fn cover() -> Self {
        Self::new(PageKind::Cover, PageData::default())
    }

    /// The embedded image, if any.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.is_empty())
    }
}

// =============================================================================
// Portfolio
// =============================================================================

/// A portfolio document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    #[serde(default = "default_app_version")]
    pub app_version: String,

    #[serde(default)]
    pub user_info: UserInfo,

    #[serde(default)]
    pub pages: Vec<Page>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_app_version() -> String {
    APP_VERSION.to_string()
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new()
    }
}

impl Portfolio {
    /// An empty document with a cover page.
    pub fn new() -> Self {
        let mut portfolio = Self {
            app_version: default_app_version(),
            user_info: UserInfo::default(),
            pages: Vec::new(),
            extra: Map::new(),
        };
        portfolio.normalize();
        portfolio
    }

    /// Parse a stored document.
    ///
    /// Missing `userInfo` or `pages` fall back to defaults. The theme is made
    /// consistent with its preset and a cover page is guaranteed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut portfolio: Portfolio = serde_json::from_str(json)?;
        portfolio.normalize();
        Ok(portfolio)
    }

    /// Serialize as pretty-printed JSON, stamping the current app version.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert("appVersion".to_string(), Value::from(APP_VERSION));
        }
        serde_json::to_string_pretty(&value)
    }

    fn normalize(&mut self) {
        self.user_info.ensure_theme_consistency();
        self.ensure_cover_page();
    }

    /// Reset the cover page's data, inserting a cover at the front if none
    /// exists.
    pub fn ensure_cover_page(&mut self) {
        match self.pages.iter_mut().find(|p| p.kind == PageKind::Cover) {
            Some(cover) => cover.data = PageData::default(),
            None => self.pages.insert(0, Page::cover()),
        }
    }

    /// Number of pages of the given kind.
    pub fn count_pages(&self, kind: PageKind) -> usize {
        self.pages.iter().filter(|p| p.kind == kind).count()
    }

    fn check_index(&self, index: usize) -> Result<(), PortfolioError> {
        if index < self.pages.len() {
            Ok(())
        } else {
            Err(PortfolioError::PageOutOfRange {
                index,
                len: self.pages.len(),
            })
        }
    }

    /// Append a single-image page for `data_url`.
    ///
    /// The page is titled "Image N" after the existing single pages, and its
    /// year is taken from the image's EXIF capture date when available.
    ///
    /// Returns the new page's index.
    pub fn add_image_page(&mut self, data_url: impl Into<String>) -> usize {
        let data_url = data_url.into();
        let number = self.count_pages(PageKind::Single) + 1;
        let year = extract_year_from_data_url(&data_url).unwrap_or_default();

        debug!(number, year = %year, "Adding image page");

        let mut page = Page::new(
            PageKind::Single,
            PageData {
                title: Some(format!("Image {number}")),
                year: Some(year),
                desc: Some(String::new()),
                ..PageData::default()
            },
        );
        page.image = Some(data_url);
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Replace the image of an existing page.
    ///
    /// The page's year is overwritten only when the new image carries one.
    /// Returns the year found, if any.
    pub fn set_page_image(
        &mut self,
        index: usize,
        data_url: impl Into<String>,
    ) -> Result<Option<String>, PortfolioError> {
        self.check_index(index)?;
        let data_url = data_url.into();
        let year = extract_year_from_data_url(&data_url);

        let page = &mut self.pages[index];
        page.image = Some(data_url);
        if let Some(ref year) = year {
            page.data.year = Some(year.clone());
        }
        Ok(year)
    }

    /// Append a series: a cover page followed by `count` empty image pages.
    pub fn add_series(
        &mut self,
        title: &str,
        year: &str,
        desc: &str,
        count: u32,
    ) -> Result<(), PortfolioError> {
        if count == 0 {
            return Err(PortfolioError::EmptySeries);
        }

        let mut cover = Page::new(
            PageKind::SeriesCover,
            PageData {
                title: Some(title.to_string()),
                year: Some(year.to_string()),
                desc: Some(desc.to_string()),
                total: Some(count),
                ..PageData::default()
            },
        );
        cover.series_title = Some(title.to_string());
        self.pages.push(cover);

        for i in 1..=count {
            let mut page = Page::new(
                PageKind::SeriesImage,
                PageData {
                    title: Some(format!("Image {i}")),
                    desc: Some(String::new()),
                    ..PageData::default()
                },
            );
            page.series_title = Some(title.to_string());
            page.series_total = Some(count);
            self.pages.push(page);
        }

        Ok(())
    }

    /// Swap two pages.
    pub fn swap_pages(&mut self, a: usize, b: usize) -> Result<(), PortfolioError> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.pages.swap(a, b);
        Ok(())
    }

    /// Remove and return a page.
    pub fn delete_page(&mut self, index: usize) -> Result<Page, PortfolioError> {
        self.check_index(index)?;
        Ok(self.pages.remove(index))
    }
}

// =============================================================================
// Tests
// =============================================================================
