//! Grouping and default-font rules exercised through the backend trait

use std::path::PathBuf;

use fontlist_core::backend::{FontBackend, StaticBackend};
use fontlist_core::collect::FaceRecord;
use fontlist_core::{FontListError, FontStyle};

fn example_sans() -> Vec<FaceRecord> {
    vec![
        FaceRecord::complete("Example Sans", "/fonts/example.ttf", FontStyle::Normal, 400),
        FaceRecord::complete(
            "Example Sans",
            "/fonts/example-bold.ttf",
            FontStyle::Normal,
            700,
        ),
    ]
}

#[test]
fn single_installed_family_enumerates_to_one_entry() {
    let backend = StaticBackend::new(example_sans());
    let families = backend.enumerate().expect("enumerate");

    assert_eq!(families.len(), 1);
    let family = &families[0];
    assert_eq!(family.name, "Example Sans");
    assert_eq!(family.fonts.len(), 2);

    let mut faces: Vec<(u16, FontStyle, PathBuf)> = family
        .fonts
        .iter()
        .map(|f| (f.weight, f.style, f.file.clone()))
        .collect();
    faces.sort_by_key(|f| f.0);

    assert_eq!(
        faces,
        vec![
            (400, FontStyle::Normal, PathBuf::from("/fonts/example.ttf")),
            (700, FontStyle::Normal, PathBuf::from("/fonts/example-bold.ttf")),
        ]
    );
}

#[test]
fn incomplete_records_do_not_abort_enumeration() {
    let mut records = example_sans();
    records.push(FaceRecord {
        family: Some("No Weight".to_string()),
        file: Some(PathBuf::from("/fonts/no-weight.ttf")),
        size: None,
        style: Some(FontStyle::Italic),
        weight: None,
    });
    records.push(FaceRecord::complete(
        "Example Mono",
        "/fonts/mono.ttf",
        FontStyle::Oblique,
        400,
    ));

    let families = StaticBackend::new(records).enumerate().expect("enumerate");
    let mut names: Vec<&str> = families.iter().map(|f| f.name.as_str()).collect();
    names.sort();

    assert_eq!(names, vec!["Example Mono", "Example Sans"]);
}

#[test]
fn family_names_are_unique() {
    let records = ["B", "A", "B", "C", "A"]
        .iter()
        .enumerate()
        .map(|(i, name)| {
            FaceRecord::complete(*name, format!("/fonts/{i}.ttf"), FontStyle::Normal, 400)
        });

    let families = StaticBackend::new(records).enumerate().expect("enumerate");
    let mut names: Vec<String> = families.iter().map(|f| f.name.clone()).collect();
    let total = names.len();
    names.dedup();

    assert_eq!(total, 3);
    assert_eq!(names.len(), total);
    assert_eq!(families.iter().map(|f| f.fonts.len()).sum::<usize>(), 5);
}

#[test]
fn empty_system_enumerates_to_empty_list() {
    let families = StaticBackend::default().enumerate().expect("enumerate");
    assert!(families.is_empty());
}

#[test]
fn default_font_no_match_is_an_error() {
    let backend = StaticBackend::new(example_sans()).with_default(None);
    let err = backend.default_font().expect_err("no match");

    assert!(matches!(err, FontListError::DefaultFontNotFound));
    assert_eq!(err.to_string(), "fontlist: default font not found");
}

#[test]
fn default_font_is_independent_of_enumeration() {
    let default = FaceRecord::complete("Hidden UI", "/fonts/ui.ttf", FontStyle::Normal, 500);
    let backend = StaticBackend::new(example_sans()).with_default(Some(default));

    let family = backend.default_font().expect("default");
    assert_eq!(family.name, "Hidden UI");
    assert_eq!(family.fonts.len(), 1);
    assert_eq!(family.fonts[0].weight, 500);

    let listed = backend.enumerate().expect("enumerate");
    assert!(listed.iter().all(|f| f.name != "Hidden UI"));
}
