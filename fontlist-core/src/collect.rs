//! Grouping translated native records into families

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::debug;

use crate::error::{FontListError, Result};
use crate::model::{Font, FontFamily, FontStyle};

/// One native font record after per-field translation.
///
/// A field is `None` when the native record did not carry it. Everything but
/// `size` must be present for the record to become a [`Font`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceRecord {
    pub family: Option<String>,
    pub file: Option<PathBuf>,
    pub size: Option<f64>,
    pub style: Option<FontStyle>,
    pub weight: Option<u16>,
}

impl FaceRecord {
    /// Record with every required field present.
    pub fn complete(
        family: impl Into<String>,
        file: impl Into<PathBuf>,
        style: FontStyle,
        weight: u16,
    ) -> Self {
        Self {
            family: Some(family.into()),
            file: Some(file.into()),
            size: None,
            style: Some(style),
            weight: Some(weight),
        }
    }

    pub fn into_font(self) -> Option<(String, Font)> {
        let FaceRecord {
            family: Some(family),
            file: Some(file),
            size,
            style: Some(style),
            weight: Some(weight),
        } = self
        else {
            return None;
        };

        Some((family, Font::new(style, weight, file).with_size(size)))
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.family.is_none() {
            missing.push("family");
        }
        if self.file.is_none() {
            missing.push("file");
        }
        if self.style.is_none() {
            missing.push("style");
        }
        if self.weight.is_none() {
            missing.push("weight");
        }
        missing
    }
}

/// Name-keyed accumulator; one family per distinct name.
#[derive(Debug, Default)]
pub struct FamilyCollector {
    families: BTreeMap<String, Vec<Font>>,
    faces: usize,
    skipped: usize,
}

impl FamilyCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, returning `false` if it was incomplete and dropped.
    pub fn push(&mut self, record: FaceRecord) -> bool {
        let missing = record.missing_fields();
        match record.into_font() {
            Some((family, font)) => {
                self.families.entry(family).or_default().push(font);
                self.faces += 1;
                true
            }
            None => {
                debug!("skipping font record without {}", missing.join(", "));
                self.skipped += 1;
                false
            }
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn finish(self) -> Vec<FontFamily> {
        debug!(
            "grouped {} faces into {} families ({} skipped)",
            self.faces,
            self.len(),
            self.skipped
        );
        self.families
            .into_iter()
            .map(|(name, fonts)| FontFamily { name, fonts })
            .collect()
    }
}

impl Extend<FaceRecord> for FamilyCollector {
    fn extend<I: IntoIterator<Item = FaceRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

impl FromIterator<FaceRecord> for FamilyCollector {
    fn from_iter<I: IntoIterator<Item = FaceRecord>>(iter: I) -> Self {
        let mut collector = Self::new();
        collector.extend(iter);
        collector
    }
}

/// Group records by family name, dropping incomplete ones.
pub fn families_from_records<I>(records: I) -> Vec<FontFamily>
where
    I: IntoIterator<Item = FaceRecord>,
{
    records.into_iter().collect::<FamilyCollector>().finish()
}

/// Wrap a default-font match into a single-font family.
///
/// `None` stands for a native "no match"; an incomplete match fails the same way.
pub fn default_family(matched: Option<FaceRecord>) -> Result<FontFamily> {
    let record = matched.ok_or(FontListError::DefaultFontNotFound)?;
    let missing = record.missing_fields();
    let (name, font) = record.into_font().ok_or_else(|| {
        debug!("default font match is missing {}", missing.join(", "));
        FontListError::DefaultFontNotFound
    })?;

    Ok(FontFamily {
        name,
        fonts: vec![font],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_family_name_produces_one_family() {
        let families = families_from_records([
            FaceRecord::complete("Example Sans", "/fonts/a.ttf", FontStyle::Normal, 400),
            FaceRecord::complete("Example Sans", "/fonts/b.ttf", FontStyle::Italic, 400),
        ]);

        assert_eq!(families.len(), 1);
        assert_eq!(families[0].name, "Example Sans");
        assert_eq!(families[0].fonts.len(), 2);
    }

    #[test]
    fn record_without_weight_is_skipped() {
        let mut broken = FaceRecord::complete("Broken", "/fonts/x.ttf", FontStyle::Normal, 400);
        broken.weight = None;

        let mut collector = FamilyCollector::new();
        collector.push(FaceRecord::complete(
            "Mono",
            "/fonts/mono.ttf",
            FontStyle::Normal,
            400,
        ));
        assert!(!collector.push(broken));
        collector.push(FaceRecord::complete(
            "Serif",
            "/fonts/serif.ttf",
            FontStyle::Normal,
            400,
        ));

        assert_eq!(collector.skipped(), 1);
        let names: Vec<String> = collector.finish().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["Mono".to_string(), "Serif".to_string()]);
    }

    #[test]
    fn collector_counts_families_not_faces() {
        let mut collector = FamilyCollector::new();
        assert!(collector.is_empty());

        collector.extend([
            FaceRecord::complete("Mono", "/fonts/mono.ttf", FontStyle::Normal, 400),
            FaceRecord::complete("Mono", "/fonts/mono-bold.ttf", FontStyle::Normal, 700),
            FaceRecord::complete("Serif", "/fonts/serif.ttf", FontStyle::Normal, 400),
        ]);

        assert!(!collector.is_empty());
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn size_is_optional() {
        let mut record = FaceRecord::complete("Sized", "/fonts/s.pcf", FontStyle::Normal, 400);
        record.size = Some(12.0);
        let (_, font) = record.into_font().expect("complete record");
        assert_eq!(font.size, Some(12.0));

        let record = FaceRecord::complete("Unsized", "/fonts/u.ttf", FontStyle::Normal, 400);
        let (_, font) = record.into_font().expect("complete record");
        assert_eq!(font.size, None);
    }

    #[test]
    fn no_match_is_default_font_not_found() {
        let err = default_family(None).expect_err("no match");
        assert!(matches!(err, FontListError::DefaultFontNotFound));
    }

    #[test]
    fn incomplete_default_match_is_not_returned() {
        let mut record = FaceRecord::complete("Half", "/fonts/h.ttf", FontStyle::Normal, 400);
        record.file = None;

        let err = default_family(Some(record)).expect_err("incomplete match");
        assert!(matches!(err, FontListError::DefaultFontNotFound));
    }

    #[test]
    fn default_family_holds_exactly_one_font() {
        let family = default_family(Some(FaceRecord::complete(
            "DejaVu Sans",
            "/usr/share/fonts/DejaVuSans.ttf",
            FontStyle::Normal,
            400,
        )))
        .expect("default family");

        assert_eq!(family.name, "DejaVu Sans");
        assert_eq!(family.fonts.len(), 1);
    }
}
