//! macOS backend over CoreText

use core_text::font::{new_ui_font_for_language, CTFontUIFontType};
use core_text::font_collection::create_for_all_families;
use core_text::font_descriptor::{CTFontDescriptor, SymbolicTraitAccessors, TraitAccessors};
use log::debug;

use super::{FontBackend, ListOptions};
use crate::collect::{default_family, FaceRecord, FamilyCollector};
use crate::error::Result;
use crate::model::FontFamily;
use crate::normalize::{core_text_style, core_text_weight};

/// `kCTFontUIFontSystem`
const SYSTEM_UI_FONT: CTFontUIFontType = 2;

/// Fonts from the CoreText collection of all available families.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreTextBackend;

impl CoreTextBackend {
    pub fn new(_options: ListOptions) -> Self {
        Self
    }
}

impl FontBackend for CoreTextBackend {
    fn enumerate(&self) -> Result<Vec<FontFamily>> {
        let collection = create_for_all_families();
        let Some(descriptors) = collection.get_descriptors() else {
            debug!("coretext: collection returned no descriptors");
            return Ok(Vec::new());
        };

        let mut collector = FamilyCollector::new();
        collector.extend(descriptors.iter().map(|descriptor| face_record(&descriptor)));
        Ok(collector.finish())
    }

    fn default_font(&self) -> Result<FontFamily> {
        // Size 0.0 asks CoreText for the default size of this UI element.
        let font = new_ui_font_for_language(SYSTEM_UI_FONT, 0.0, None);
        let mut record = face_record(&font.copy_descriptor());
        record.size = Some(font.pt_size());
        default_family(Some(record))
    }
}

fn face_record(descriptor: &CTFontDescriptor) -> FaceRecord {
    let traits = descriptor.traits();
    let italic = traits.symbolic_traits().is_italic();

    FaceRecord {
        family: Some(descriptor.family_name()),
        file: descriptor.font_path(),
        size: None,
        style: Some(core_text_style(italic, traits.normalized_slant())),
        weight: Some(core_text_weight(traits.normalized_weight())),
    }
}
