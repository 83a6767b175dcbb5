//! Bulk capture-year annotation for stored portfolios.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::format::{decode_data_url, extract_year};

use super::model::Portfolio;

/// Outcome of [`annotate_years`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AnnotationReport {
    /// Pages carrying an image
    pub scanned: usize,
    /// Pages whose year was written
    pub annotated: usize,
    /// Pages skipped because they already had a year
    pub skipped: usize,
    /// Pages whose image has no usable capture date
    pub without_year: usize,
    /// Pages whose image data URL could not be decoded
    pub undecodable: usize,
}

impl AnnotationReport {
    /// Whether any page changed.
    pub fn changed(&self) -> bool {
        self.annotated > 0
    }
}

/// Fill page years from the capture dates of their embedded images.
///
/// Pages that already have a non-blank year are left alone unless
/// `overwrite` is set. A page whose image has no capture year keeps its
/// current year.
pub fn annotate_years(portfolio: &mut Portfolio, overwrite: bool) -> AnnotationReport {
    let mut report = AnnotationReport::default();

    for (index, page) in portfolio.pages.iter_mut().enumerate() {
        let Some(image) = page.image() else {
            continue;
        };
        report.scanned += 1;

        if !overwrite && !page.data.year_is_blank() {
            report.skipped += 1;
            continue;
        }

        let decoded = match decode_data_url(image) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(page = index, error = %e, "Skipping page with undecodable image");
                report.undecodable += 1;
                continue;
            }
        };

        match extract_year(&decoded.data) {
            Some(year) => {
                debug!(page = index, year = %year, "Annotated page");
                page.data.year = Some(year);
                report.annotated += 1;
            }
            None => report.without_year += 1,
        }
    }

    info!(
        scanned = report.scanned,
        annotated = report.annotated,
        skipped = report.skipped,
        without_year = report.without_year,
        undecodable = report.undecodable,
        "Year annotation finished"
    );

    report
}
