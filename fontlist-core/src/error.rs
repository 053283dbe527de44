//! Error type for fontlist-core

use thiserror::Error;

pub type Result<T, E = FontListError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FontListError {
    /// No backend was compiled in for the target OS.
    #[error("fontlist: platform not supported")]
    UnsupportedPlatform,

    /// The platform resolved no default font, or only an incomplete one.
    #[error("fontlist: default font not found")]
    DefaultFontNotFound,

    /// An intermediate native call reported failure.
    #[error("fontlist: {call} failed (0x{code:08X})")]
    Native { call: &'static str, code: u32 },

    #[error("fontlist: unknown font style: {0}")]
    UnknownStyle(String),
}

impl FontListError {
    /// True for failures that come from the platform font service itself.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            FontListError::DefaultFontNotFound | FontListError::Native { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_errors_render_hex_code() {
        let err = FontListError::Native {
            call: "IDWriteFactory::GetSystemFontCollection",
            code: 0x8007_0057,
        };

        assert_eq!(
            err.to_string(),
            "fontlist: IDWriteFactory::GetSystemFontCollection failed (0x80070057)"
        );
        assert!(err.is_resolution_failure());
    }

    #[test]
    fn unsupported_platform_is_not_a_resolution_failure() {
        assert!(!FontListError::UnsupportedPlatform.is_resolution_failure());
        assert!(FontListError::DefaultFontNotFound.is_resolution_failure());
    }
}
