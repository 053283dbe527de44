//! Fallback for targets with no native font backend

use super::{FontBackend, ListOptions};
use crate::error::{FontListError, Result};
use crate::model::FontFamily;

#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedBackend;

impl UnsupportedBackend {
    pub fn new(_options: ListOptions) -> Self {
        Self
    }
}

impl FontBackend for UnsupportedBackend {
    fn enumerate(&self) -> Result<Vec<FontFamily>> {
        Err(FontListError::UnsupportedPlatform)
    }

    fn default_font(&self) -> Result<FontFamily> {
        Err(FontListError::UnsupportedPlatform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_operations_report_unsupported_platform() {
        let backend = UnsupportedBackend::new(ListOptions::default());

        assert!(matches!(
            backend.enumerate(),
            Err(FontListError::UnsupportedPlatform)
        ));
        assert!(matches!(
            backend.default_font(),
            Err(FontListError::UnsupportedPlatform)
        ));
    }
}
