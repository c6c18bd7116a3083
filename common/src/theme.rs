//! Visual themes: the fixed, process-wide catalog of colours, fonts and sizes.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// An RGB colour triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Upper-case hex without a leading `#`, as DrawingML `srgbClr` expects.
    pub fn hex(self) -> String {
        let Rgb(r, g, b) = self;
        format!("{r:02X}{g:02X}{b:02X}")
    }
}

/// Names of the catalog themes, in catalog order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    EnumIter,
    EnumString,
    Display,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ThemeName {
    #[default]
    Professional,
    Creative,
    Minimal,
    Vibrant,
    Academic,
    Tech,
}

impl ThemeName {
    /// The catalog entry for this name.
    pub fn settings(self) -> &'static Theme {
        &CATALOG[self as usize]
    }

    /// Capitalised label shown to users ("Professional", "Tech", ...).
    pub fn display_name(self) -> &'static str {
        match self {
            ThemeName::Professional => "Professional",
            ThemeName::Creative => "Creative",
            ThemeName::Minimal => "Minimal",
            ThemeName::Vibrant => "Vibrant",
            ThemeName::Academic => "Academic",
            ThemeName::Tech => "Tech",
        }
    }

    /// One-line connotation used when asking a model to pick a theme.
    pub fn connotation(self) -> &'static str {
        match self {
            ThemeName::Professional => "business, corporate, formal",
            ThemeName::Creative => "art, design, innovation",
            ThemeName::Minimal => "modern, simple, clean",
            ThemeName::Vibrant => "energetic, bold, marketing",
            ThemeName::Academic => "education, research, scholarly",
            ThemeName::Tech => "technology, digital, futuristic",
        }
    }
}

/// A named bundle of colours, fonts and point sizes applied to a whole deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background_color: Rgb,
    pub title_color: Rgb,
    pub content_color: Rgb,
    pub accent_color: Rgb,
    pub title_font: Cow<'static, str>,
    pub content_font: Cow<'static, str>,
    pub title_font_size: u16,
    pub content_font_size: u16,
    pub description: Cow<'static, str>,
}

impl Default for Theme {
    fn default() -> Self {
        ThemeName::default().settings().clone()
    }
}

/// Indexed by `ThemeName as usize`.
static CATALOG: [Theme; 6] = [
    // professional
    Theme {
        background_color: Rgb(255, 255, 255),
        title_color: Rgb(0, 51, 102),
        content_color: Rgb(0, 0, 0),
        accent_color: Rgb(0, 120, 212),
        title_font: Cow::Borrowed("Arial"),
        content_font: Cow::Borrowed("Arial"),
        title_font_size: 40,
        content_font_size: 18,
        description: Cow::Borrowed("Clean and corporate look suitable for business presentations"),
    },
    // creative
    Theme {
        background_color: Rgb(240, 248, 255),
        title_color: Rgb(70, 130, 180),
        content_color: Rgb(47, 79, 79),
        accent_color: Rgb(255, 105, 180),
        title_font: Cow::Borrowed("Calibri"),
        content_font: Cow::Borrowed("Calibri"),
        title_font_size: 44,
        content_font_size: 20,
        description: Cow::Borrowed("Modern and artistic style for creative topics"),
    },
    // minimal
    Theme {
        background_color: Rgb(248, 248, 248),
        title_color: Rgb(33, 33, 33),
        content_color: Rgb(66, 66, 66),
        accent_color: Rgb(128, 128, 128),
        title_font: Cow::Borrowed("Helvetica"),
        content_font: Cow::Borrowed("Helvetica"),
        title_font_size: 38,
        content_font_size: 16,
        description: Cow::Borrowed("Simple, clean design focusing on content"),
    },
    // vibrant
    Theme {
        background_color: Rgb(42, 42, 64),
        title_color: Rgb(255, 192, 0),
        content_color: Rgb(255, 255, 255),
        accent_color: Rgb(0, 204, 204),
        title_font: Cow::Borrowed("Verdana"),
        content_font: Cow::Borrowed("Verdana"),
        title_font_size: 42,
        content_font_size: 18,
        description: Cow::Borrowed("Bold and energetic with high contrast colors"),
    },
    // academic
    Theme {
        background_color: Rgb(245, 245, 245),
        title_color: Rgb(128, 0, 0),
        content_color: Rgb(0, 0, 0),
        accent_color: Rgb(169, 169, 169),
        title_font: Cow::Borrowed("Georgia"),
        content_font: Cow::Borrowed("Georgia"),
        title_font_size: 36,
        content_font_size: 18,
        description: Cow::Borrowed("Traditional style suitable for educational content"),
    },
    // tech
    Theme {
        background_color: Rgb(15, 15, 35),
        title_color: Rgb(0, 255, 153),
        content_color: Rgb(204, 204, 204),
        accent_color: Rgb(51, 153, 255),
        title_font: Cow::Borrowed("Consolas"),
        content_font: Cow::Borrowed("Consolas"),
        title_font_size: 40,
        content_font_size: 18,
        description: Cow::Borrowed("Futuristic look ideal for technology topics"),
    },
];
