//! fontlist-core: installed fonts and the default UI font, one data model
//!
//! Every desktop OS already keeps an index of its fonts; this crate asks
//! that index and hands back the answer in one shape. Fontconfig on Linux,
//! DirectWrite on Windows and CoreText on macOS each get a backend that
//! translates native weights, slants and file locations into
//! [`FontFamily`]/[`Font`] records.
//!
//! ## Two questions
//!
//! - [`enumerate_font`]: every installed family, one entry per family name.
//! - [`get_default_font`]: the font the OS uses for its default UI text,
//!   as a family holding exactly one font.
//!
//! ```rust,no_run
//! use fontlist_core::{enumerate_font, get_default_font};
//!
//! for family in enumerate_font()? {
//!     println!("{} ({} faces)", family.name, family.fonts.len());
//! }
//!
//! let default = get_default_font()?;
//! println!("default: {} at {}", default.name, default.fonts[0].file.display());
//! # Ok::<(), fontlist_core::error::FontListError>(())
//! ```
//!
//! ## What comes back
//!
//! - Weights are snapped onto the 100–900 scale by nearest anchor
//!   ([`normalize`]).
//! - Native records missing a family name, file, slant or weight are dropped
//!   quietly (they show up in `debug` logs).
//! - Family order is unspecified.
//! - Nothing is cached; each call is a fresh snapshot of the system.
//!
//! To pin a font set (tests, sandboxes), build a [`backend::StaticBackend`]
//! from [`collect::FaceRecord`]s and call it through [`backend::FontBackend`].

pub mod backend;
pub mod collect;
pub mod error;
pub mod model;
pub mod normalize;
pub mod output;

pub use backend::{FontBackend, ListOptions, SystemBackend};
pub use error::{FontListError, Result};
pub use model::{Font, FontFamily, FontStyle};

/// Enumerate every installed font family with the compiled-in backend.
///
/// Options come from the environment ([`ListOptions::from_env`]).
pub fn enumerate_font() -> Result<Vec<FontFamily>> {
    SystemBackend::new(ListOptions::from_env()).enumerate()
}

/// Resolve the platform's default UI font with the compiled-in backend.
pub fn get_default_font() -> Result<FontFamily> {
    SystemBackend::new(ListOptions::from_env()).default_font()
}
