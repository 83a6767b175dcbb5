//! Theme presets and theme normalisation.
//!
//! A document stores a preset key plus a theme object. Older documents may
//! use legacy preset names or carry partial themes; [`ThemePreset::normalize`]
//! and [`Theme::fill_from`] bring both back to a consistent state without
//! discarding user overrides.

use serde::{Deserialize, Serialize};

/// Built-in theme presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemePreset {
    #[default]
    Default,
    DefaultDark,
    Classic,
}

impl ThemePreset {
    /// Key stored in documents.
    pub const fn key(self) -> &'static str {
        match self {
            ThemePreset::Default => "default",
            ThemePreset::DefaultDark => "default-dark",
            ThemePreset::Classic => "classic",
        }
    }

    /// Resolve a stored preset key.
    ///
    /// Legacy keys (`light`, `dark`) map to their replacements; empty or
    /// unknown keys fall back to [`ThemePreset::Default`].
    pub fn normalize(key: &str) -> Self {
        match key.trim() {
            "default" | "light" => ThemePreset::Default,
            "default-dark" | "dark" => ThemePreset::DefaultDark,
            "classic" => ThemePreset::Classic,
            _ => ThemePreset::Default,
        }
    }

    /// The preset's full theme.
    pub fn defaults(self) -> Theme {
        let (paper, text, muted, font_family, body_font_size) = match self {
            ThemePreset::Default => ("#ffffff", "#0b0b0b", "#6f6f6f", SANS_STACK, "14px"),
            ThemePreset::DefaultDark => ("#121212", "#f5f5f5", "#a0a0a0", SANS_STACK, "14px"),
            ThemePreset::Classic => ("#fdf7ef", "#1f1a14", "#887869", SERIF_STACK, "13px"),
        };

        Theme {
            paper: Some(paper.to_string()),
            text: Some(text.to_string()),
            muted: Some(muted.to_string()),
            font_family: Some(font_family.to_string()),
            body_font_size: Some(body_font_size.to_string()),
            extra: serde_json::Map::new(),
        }
    }
}

const SANS_STACK: &str =
    "Manrope, system-ui, -apple-system, 'Segoe UI', Roboto, 'Helvetica Neue', Arial";

const SERIF_STACK: &str = "'Garamond', 'Times New Roman', Times, serif";

/// Smallest accepted body font size, in pixels.
pub const MIN_BODY_FONT_SIZE: i32 = 8;

/// Largest accepted body font size, in pixels.
pub const MAX_BODY_FONT_SIZE: i32 = 32;

/// Colour stored when a value is not a valid hex colour.
pub const FALLBACK_COLOR: &str = "#000000";

/// Colour slots of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    /// Page background
    Paper,
    /// Body text
    Text,
    /// Secondary text
    Muted,
}

/// Normalise a colour to upper-case `#RRGGBB`.
///
/// Accepts values with or without the leading `#` and expands the 3-digit
/// short form. Anything else becomes [`FALLBACK_COLOR`].
pub fn normalize_hex(value: &str) -> String {
    let digits = value.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    if expanded.len() == 6 && expanded.bytes().all(|b| b.is_ascii_hexdigit()) {
        format!("#{}", expanded.to_ascii_uppercase())
    } else {
        FALLBACK_COLOR.to_string()
    }
}

/// Page colours and typography.
///
/// Every field is optional in stored documents; missing fields are filled
/// from the active preset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_font_size: Option<String>,

    /// Fields this crate does not interpret, kept for round trips
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Theme {
    /// Fill unset fields from `defaults`, keeping every field already set.
    pub fn fill_from(&mut self, defaults: &Theme) {
        fn fill(slot: &mut Option<String>, default: &Option<String>) {
            if slot.is_none() {
                slot.clone_from(default);
            }
        }

        fill(&mut self.paper, &defaults.paper);
        fill(&mut self.text, &defaults.text);
        fill(&mut self.muted, &defaults.muted);
        fill(&mut self.font_family, &defaults.font_family);
        fill(&mut self.body_font_size, &defaults.body_font_size);
    }

    fn color_slot(&mut self, color: ThemeColor) -> &mut Option<String> {
        match color {
            ThemeColor::Paper => &mut self.paper,
            ThemeColor::Text => &mut self.text,
            ThemeColor::Muted => &mut self.muted,
        }
    }

    /// The colour in `color`'s slot, if set.
    pub fn color(&self, color: ThemeColor) -> Option<&str> {
        match color {
            ThemeColor::Paper => self.paper.as_deref(),
            ThemeColor::Text => self.text.as_deref(),
            ThemeColor::Muted => self.muted.as_deref(),
        }
    }

    /// Override a colour. The value is stored normalised by [`normalize_hex`].
    pub fn set_color(&mut self, color: ThemeColor, value: &str) {
        *self.color_slot(color) = Some(normalize_hex(value));
    }

    /// Override the font family. A blank value is ignored.
    pub fn set_font_family(&mut self, family: &str) {
        let family = family.trim();
        if !family.is_empty() {
            self.font_family = Some(family.to_string());
        }
    }

    /// Override the body font size, clamped to 8-32 px.
    pub fn set_body_font_size(&mut self, px: i32) {
        let px = px.clamp(MIN_BODY_FONT_SIZE, MAX_BODY_FONT_SIZE);
        self.body_font_size = Some(format!("{px}px"));
    }

    /// Restore the font family and size of `preset`, keeping colours.
    pub fn reset_typography(&mut self, preset: ThemePreset) {
        let defaults = preset.defaults();
        self.font_family = defaults.font_family;
        self.body_font_size = defaults.body_font_size;
    }
}
