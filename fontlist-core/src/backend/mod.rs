//! Platform backends and compile-time selection of the active one
//!
//! Exactly one native backend is compiled per target: Fontconfig on Linux,
//! DirectWrite on Windows, CoreText on macOS. Other targets get
//! [`UnsupportedBackend`]. Whatever was compiled in is re-exported as
//! [`SystemBackend`].

use std::env;

use crate::collect::{default_family, families_from_records, FaceRecord};
use crate::error::Result;
use crate::model::FontFamily;

#[cfg(target_os = "linux")]
mod fontconfig;
#[cfg(target_os = "linux")]
pub use self::fontconfig::FontconfigBackend;
#[cfg(target_os = "linux")]
pub use self::fontconfig::FontconfigBackend as SystemBackend;

#[cfg(target_os = "windows")]
mod directwrite;
#[cfg(target_os = "windows")]
pub use self::directwrite::DirectWriteBackend;
#[cfg(target_os = "windows")]
pub use self::directwrite::DirectWriteBackend as SystemBackend;

#[cfg(target_os = "macos")]
mod core_text;
#[cfg(target_os = "macos")]
pub use self::core_text::CoreTextBackend;
#[cfg(target_os = "macos")]
pub use self::core_text::CoreTextBackend as SystemBackend;

mod unsupported;
pub use self::unsupported::UnsupportedBackend;
#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
pub use self::unsupported::UnsupportedBackend as SystemBackend;

/// Environment variable overriding [`ListOptions::locale`].
pub const LOCALE_ENV: &str = "FONTLIST_LOCALE";

/// A source of installed fonts.
pub trait FontBackend {
    /// Every installed family, one entry per distinct name, in unspecified order.
    fn enumerate(&self) -> Result<Vec<FontFamily>>;

    /// The font the platform uses for its default UI text, as a one-font family.
    fn default_font(&self) -> Result<FontFamily>;
}

impl<B: FontBackend + ?Sized> FontBackend for &B {
    fn enumerate(&self) -> Result<Vec<FontFamily>> {
        (**self).enumerate()
    }

    fn default_font(&self) -> Result<FontFamily> {
        (**self).default_font()
    }
}

impl<B: FontBackend + ?Sized> FontBackend for Box<B> {
    fn enumerate(&self) -> Result<Vec<FontFamily>> {
        (**self).enumerate()
    }

    fn default_font(&self) -> Result<FontFamily> {
        (**self).default_font()
    }
}

/// Knobs shared by all backends. Backends ignore what they have no use for.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Locale (e.g. `de-DE`) used to pick localized family names.
    /// `None` means the user default locale.
    pub locale: Option<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale.filter(|l| !l.trim().is_empty());
        self
    }

    /// Options taken from `FONTLIST_LOCALE`; an empty value counts as unset.
    pub fn from_env() -> Self {
        Self::new().with_locale(env::var(LOCALE_ENV).ok())
    }
}

/// Index of the localized name to use: the first locale that has one, else 0.
///
/// `found` holds, per candidate locale in preference order, the index the
/// platform reported for it (`None` when it has no name in that locale).
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
pub(crate) fn localized_name_index<I>(found: I) -> u32
where
    I: IntoIterator<Item = Option<u32>>,
{
    found.into_iter().flatten().next().unwrap_or(0)
}

/// In-memory backend fed with already translated records.
///
/// Runs the same grouping and default-font rules as the native backends.
#[derive(Debug, Default, Clone)]
pub struct StaticBackend {
    records: Vec<FaceRecord>,
    default: Option<FaceRecord>,
}

impl StaticBackend {
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = FaceRecord>,
    {
        Self {
            records: records.into_iter().collect(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: Option<FaceRecord>) -> Self {
        self.default = default;
        self
    }
}

impl FontBackend for StaticBackend {
    fn enumerate(&self) -> Result<Vec<FontFamily>> {
        Ok(families_from_records(self.records.iter().cloned()))
    }

    fn default_font(&self) -> Result<FontFamily> {
        default_family(self.default.clone())
    }
}
