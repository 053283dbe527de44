//! Native weight and slant codes mapped onto the common scale
//!
//! Every backend reports weight on its own scale: Fontconfig uses small
//! integers (0..=215), DirectWrite is already CSS-like but runs up to 950,
//! and CoreText hands out a float in `[-1.0, 1.0]`. Each gets an anchor table
//! and goes through [`nearest_weight`]. The native constants are kept here,
//! outside the `cfg`-gated backends, so the mappings can be checked on any host.

use crate::model::FontStyle;

/// `(native value, css weight)` pairs, ascending by native value.
pub type WeightTable = [(f64, u16)];

/// Weight reported when a table is empty.
pub const DEFAULT_WEIGHT: u16 = 400;

/// Fontconfig `FC_WEIGHT_*` and `FC_SLANT_*` values.
pub mod fc {
    pub const WEIGHT_THIN: i32 = 0;
    pub const WEIGHT_EXTRALIGHT: i32 = 40;
    pub const WEIGHT_LIGHT: i32 = 50;
    pub const WEIGHT_REGULAR: i32 = 80;
    pub const WEIGHT_MEDIUM: i32 = 100;
    pub const WEIGHT_SEMIBOLD: i32 = 180;
    pub const WEIGHT_BOLD: i32 = 200;
    pub const WEIGHT_EXTRABOLD: i32 = 205;
    pub const WEIGHT_BLACK: i32 = 210;

    pub const SLANT_ROMAN: i32 = 0;
    pub const SLANT_ITALIC: i32 = 100;
    pub const SLANT_OBLIQUE: i32 = 110;
}

/// DirectWrite `DWRITE_FONT_STYLE` values.
pub mod dwrite {
    pub const STYLE_NORMAL: i32 = 0;
    pub const STYLE_OBLIQUE: i32 = 1;
    pub const STYLE_ITALIC: i32 = 2;
}

pub const FONTCONFIG_WEIGHTS: [(f64, u16); 9] = [
    (fc::WEIGHT_THIN as f64, 100),
    (fc::WEIGHT_EXTRALIGHT as f64, 200),
    (fc::WEIGHT_LIGHT as f64, 300),
    (fc::WEIGHT_REGULAR as f64, 400),
    (fc::WEIGHT_MEDIUM as f64, 500),
    (fc::WEIGHT_SEMIBOLD as f64, 600),
    (fc::WEIGHT_BOLD as f64, 700),
    (fc::WEIGHT_EXTRABOLD as f64, 800),
    (fc::WEIGHT_BLACK as f64, 900),
];

pub const DIRECTWRITE_WEIGHTS: [(f64, u16); 9] = [
    (100.0, 100),
    (200.0, 200),
    (300.0, 300),
    (400.0, 400),
    (500.0, 500),
    (600.0, 600),
    (700.0, 700),
    (800.0, 800),
    (900.0, 900),
];

pub const CORE_TEXT_WEIGHTS: [(f64, u16); 9] = [
    (-0.7, 100),
    (-0.5, 200),
    (-0.23, 300),
    (0.0, 400),
    (0.2, 500),
    (0.3, 600),
    (0.4, 700),
    (0.6, 800),
    (0.8, 900),
];

/// Pick the css weight of the anchor closest to `value`.
///
/// Ties go to the earliest anchor in the table.
pub fn nearest_weight(value: f64, table: &WeightTable) -> u16 {
    let mut best = match table.first() {
        Some(&(native, css)) => (css, (value - native).abs()),
        None => return DEFAULT_WEIGHT,
    };

    for &(native, css) in &table[1..] {
        let diff = (value - native).abs();
        if diff < best.1 {
            best = (css, diff);
        }
    }

    best.0
}

pub fn fontconfig_weight(code: i32) -> u16 {
    nearest_weight(f64::from(code), &FONTCONFIG_WEIGHTS)
}

pub fn fontconfig_slant(code: i32) -> FontStyle {
    match code {
        fc::SLANT_ROMAN => FontStyle::Normal,
        fc::SLANT_ITALIC => FontStyle::Italic,
        fc::SLANT_OBLIQUE => FontStyle::Oblique,
        _ => FontStyle::Normal,
    }
}

pub fn directwrite_weight(code: i32) -> u16 {
    nearest_weight(f64::from(code), &DIRECTWRITE_WEIGHTS)
}

pub fn directwrite_style(code: i32) -> FontStyle {
    match code {
        dwrite::STYLE_NORMAL => FontStyle::Normal,
        dwrite::STYLE_OBLIQUE => FontStyle::Oblique,
        dwrite::STYLE_ITALIC => FontStyle::Italic,
        _ => FontStyle::Normal,
    }
}

pub fn core_text_weight(normalized: f64) -> u16 {
    nearest_weight(normalized, &CORE_TEXT_WEIGHTS)
}

/// CoreText has no oblique flag; a slanted face without the italic trait counts as oblique.
pub fn core_text_style(italic_trait: bool, normalized_slant: f64) -> FontStyle {
    if italic_trait {
        FontStyle::Italic
    } else if normalized_slant != 0.0 {
        FontStyle::Oblique
    } else {
        FontStyle::Normal
    }
}
