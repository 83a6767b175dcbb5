//! Profile editing for the cover page.
//!
//! The profile form takes free text: an Instagram handle in any common
//! shape, a website with or without a scheme, and extra links as
//! `[name](url)` items or bare URLs. [`UserInfo::update_profile`] turns
//! that text into the stored, normalised profile.

use tracing::debug;
use url::Url;

use super::model::{Link, UserInfo, DEFAULT_PORTFOLIO_LABEL};
use super::theme::ThemePreset;

const INSTAGRAM_BASE: &str = "https://www.instagram.com/";

/// Free-text profile fields as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub years: String,
    pub statement: String,
    /// Instagram handle, `@handle` or profile URL
    pub username: String,
    pub email: String,
    pub website: String,
    /// Comma- or newline-separated links
    pub links: String,
    /// Preset key to switch to; `None` keeps the current preset
    pub theme_preset: Option<String>,
}

impl UserInfo {
    /// Replace the profile with normalised values from `update`.
    ///
    /// Switching to a different preset resets the theme to that preset's
    /// defaults. Keeping the preset keeps the theme overrides and fills any
    /// missing field. Fields this crate does not model are left untouched.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        let previous = self.preset();
        let selected = update
            .theme_preset
            .as_deref()
            .map_or(previous, ThemePreset::normalize);

        let theme = if selected == previous {
            let mut theme = self.theme.take().unwrap_or_default();
            theme.fill_from(&selected.defaults());
            theme
        } else {
            debug!(from = previous.key(), to = selected.key(), "Theme preset changed");
            selected.defaults()
        };

        let website = normalize_url(&update.website);
        self.website_label = if website.is_empty() {
            String::new()
        } else {
            hostname(&website)
        };
        self.website = website;
        self.instagram = instagram_url(&update.username);
        self.username = update.username;
        self.additional_links = parse_additional_links(&update.links);

        self.name = update.name;
        self.years = update.years;
        self.statement = update.statement;
        self.email = update.email;

        if self.portfolio_label.is_empty() {
            self.portfolio_label = DEFAULT_PORTFOLIO_LABEL.to_string();
        }
        self.theme_preset = selected.key().to_string();
        self.theme = Some(theme);
    }
}

// =============================================================================
// Link Helpers
// =============================================================================

fn has_http_scheme(value: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> &'a str {
    match value.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &value[prefix.len()..],
        _ => value,
    }
}

/// Normalise a web address, adding `https://` when no scheme is given.
///
/// Returns an empty string for blank or unparseable input.
pub fn normalize_url(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return String::new();
    }

    let candidate = if has_http_scheme(value) {
        value.to_string()
    } else {
        format!("https://{}", value.trim_start_matches('/'))
    };

    match Url::parse(&candidate) {
        Ok(url) => url.into(),
        Err(e) => {
            debug!(url = %candidate, error = %e, "Dropping unparseable URL");
            String::new()
        }
    }
}

/// Host of a URL without a leading `www.`.
///
/// Returns the input unchanged when it does not parse.
pub fn hostname(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            host.strip_prefix("www.").unwrap_or(host).to_string()
        }
        Err(_) => url.to_string(),
    }
}

/// Profile URL for an Instagram handle.
///
/// Accepts `handle`, `@handle`, `instagram.com/handle` and full profile
/// URLs. Characters Instagram does not allow in handles are removed. Returns
/// an empty string when no handle remains.
pub fn instagram_url(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }

    let from_url;
    let mut handle = value;
    if has_http_scheme(value) {
        if let Ok(url) = Url::parse(value) {
            from_url = url
                .path()
                .trim_start_matches('/')
                .split('/')
                .next()
                .unwrap_or_default()
                .to_string();
            handle = &from_url;
        }
    }

    let handle = handle.trim_start_matches('@');
    let handle = strip_prefix_ignore_case(handle, "instagram.com/");
    let handle = strip_prefix_ignore_case(handle, "www.instagram.com/");
    let handle: String = handle
        .trim_start_matches('/')
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_'))
        .collect();

    if handle.is_empty() {
        String::new()
    } else {
        format!("{INSTAGRAM_BASE}{handle}")
    }
}

/// Split a `[name](url)` item into its parts.
fn markdown_link(item: &str) -> Option<(&str, &str)> {
    let inner = item.strip_prefix('[')?.strip_suffix(')')?;
    let (name, url) = inner.split_once("](")?;
    if name.is_empty() || url.is_empty() || url.contains(')') {
        return None;
    }
    Some((name, url))
}

/// Parse extra profile links.
///
/// Items are separated by commas or newlines. Each is either `[name](url)`
/// or a bare URL named after its host. Items whose URL does not parse are
/// dropped.
pub fn parse_additional_links(input: &str) -> Vec<Link> {
    let mut links = Vec::new();

    for item in input.split(['\n', ',']).map(str::trim).filter(|s| !s.is_empty()) {
        if let Some((name, url)) = markdown_link(item) {
            let name = name.trim();
            let url = normalize_url(url);
            if !name.is_empty() && !url.is_empty() {
                links.push(Link {
                    name: name.to_string(),
                    url,
                });
            }
            continue;
        }

        let url = normalize_url(item);
        if let Some(host) = Url::parse(&url).ok().and_then(|u| u.host_str().map(str::to_string)) {
            links.push(Link { name: host, url });
        }
    }

    links
}

// =============================================================================
// Tests
// =============================================================================
