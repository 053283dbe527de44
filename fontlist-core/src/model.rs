//! Common font data model shared by every backend

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FontListError;

/// Upright, italic, or mechanically slanted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Oblique => "oblique",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FontStyle {
    type Err = FontListError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(FontStyle::Normal),
            "italic" => Ok(FontStyle::Italic),
            "oblique" => Ok(FontStyle::Oblique),
            _ => Err(FontListError::UnknownStyle(raw.to_string())),
        }
    }
}

/// A single installed face.
///
/// `weight` is on the 100–900 CSS scale. `size` is only filled in by
/// backends that report one (Fontconfig bitmap strikes, the default font).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub style: FontStyle,
    pub weight: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    pub file: PathBuf,
}

impl Font {
    pub fn new(style: FontStyle, weight: u16, file: impl Into<PathBuf>) -> Self {
        Self {
            style,
            weight,
            size: None,
            file: file.into(),
        }
    }

    pub fn with_size(mut self, size: Option<f64>) -> Self {
        self.size = size;
        self
    }
}

/// Fonts sharing one display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFamily {
    pub name: String,
    pub fonts: Vec<Font>,
}

impl FontFamily {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fonts: Vec::new(),
        }
    }

    pub fn with_fonts(mut self, fonts: Vec<Font>) -> Self {
        self.fonts = fonts;
        self
    }
}
