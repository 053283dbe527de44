//! Linux backend over Fontconfig
//!
//! Every Fontconfig object we create is held by a small owning wrapper whose
//! `Drop` hands it back to the library, so early returns cannot leak.

use std::ffi::{CStr, OsStr};
use std::marker::PhantomData;
use std::os::raw::{c_char, c_double, c_int};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;
use std::ptr::{self, NonNull};
use std::slice;

use fontconfig_sys::{
    FcChar8, FcConfig, FcConfigDestroy, FcConfigSubstitute, FcDefaultSubstitute, FcFontList,
    FcFontMatch, FcFontSet, FcFontSetDestroy, FcInitLoadConfigAndFonts, FcMatchPattern,
    FcObjectSet, FcObjectSetAdd, FcObjectSetCreate, FcObjectSetDestroy, FcPattern,
    FcPatternCreate, FcPatternDestroy, FcPatternGetDouble, FcPatternGetInteger,
    FcPatternGetString, FcResultMatch, FcResultNoMatch,
};
use log::{debug, warn};

use super::{FontBackend, ListOptions};
use crate::collect::{default_family, FaceRecord, FamilyCollector};
use crate::error::{FontListError, Result};
use crate::model::FontFamily;
use crate::normalize::{fontconfig_slant, fontconfig_weight};

const FC_FAMILY: &CStr = c"family";
const FC_FILE: &CStr = c"file";
const FC_SIZE: &CStr = c"size";
const FC_SLANT: &CStr = c"slant";
const FC_WEIGHT: &CStr = c"weight";

const LISTED_OBJECTS: [&CStr; 5] = [FC_FAMILY, FC_FILE, FC_SIZE, FC_SLANT, FC_WEIGHT];

/// Fonts from the Fontconfig index.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontconfigBackend;

impl FontconfigBackend {
    pub fn new(_options: ListOptions) -> Self {
        Self
    }
}

impl FontBackend for FontconfigBackend {
    fn enumerate(&self) -> Result<Vec<FontFamily>> {
        let Some(config) = Config::load() else {
            warn!("fontconfig: could not load configuration, reporting no fonts");
            return Ok(Vec::new());
        };
        let (Some(pattern), Some(objects)) = (Pattern::create(), ObjectSet::build(&LISTED_OBJECTS))
        else {
            warn!("fontconfig: could not allocate list query, reporting no fonts");
            return Ok(Vec::new());
        };

        let Some(fonts) = FontSet::list(&config, &pattern, &objects) else {
            debug!("fontconfig: FcFontList returned no font set");
            return Ok(Vec::new());
        };

        let mut collector = FamilyCollector::new();
        collector.extend(fonts.patterns().map(face_record));
        Ok(collector.finish())
    }

    fn default_font(&self) -> Result<FontFamily> {
        let config = Config::load().ok_or(FontListError::DefaultFontNotFound)?;
        let pattern = Pattern::create().ok_or(FontListError::DefaultFontNotFound)?;

        let matched = config.default_match(pattern);
        default_family(matched.as_ref().map(|p| face_record(p.borrow())))
    }
}

fn face_record(pattern: PatternRef<'_>) -> FaceRecord {
    FaceRecord {
        family: pattern
            .bytes(FC_FAMILY)
            .map(|raw| String::from_utf8_lossy(raw).into_owned()),
        file: pattern
            .bytes(FC_FILE)
            .map(|raw| PathBuf::from(OsStr::from_bytes(raw))),
        size: pattern.double(FC_SIZE),
        style: pattern.integer(FC_SLANT).map(fontconfig_slant),
        weight: pattern.integer(FC_WEIGHT).map(fontconfig_weight),
    }
}

struct Config(NonNull<FcConfig>);

impl Config {
    fn load() -> Option<Self> {
        NonNull::new(unsafe { FcInitLoadConfigAndFonts() }).map(Self)
    }

    fn as_ptr(&self) -> *mut FcConfig {
        self.0.as_ptr()
    }

    /// Apply the configured and default substitutions to `pattern` and match it.
    fn default_match(&self, pattern: Pattern) -> Option<Pattern> {
        unsafe {
            if FcConfigSubstitute(self.as_ptr(), pattern.as_ptr(), FcMatchPattern) == 0 {
                debug!("fontconfig: FcConfigSubstitute failed, matching unsubstituted pattern");
            }
            FcDefaultSubstitute(pattern.as_ptr());
        }

        let mut result = FcResultNoMatch;
        let matched = Pattern::from_raw(unsafe {
            FcFontMatch(self.as_ptr(), pattern.as_ptr(), &mut result)
        });

        if result != FcResultMatch {
            debug!("fontconfig: FcFontMatch reported no match");
            return None;
        }
        matched
    }
}

impl Drop for Config {
    fn drop(&mut self) {
        unsafe { FcConfigDestroy(self.as_ptr()) }
    }
}

struct Pattern(NonNull<FcPattern>);

impl Pattern {
    fn create() -> Option<Self> {
        Self::from_raw(unsafe { FcPatternCreate() })
    }

    fn from_raw(ptr: *mut FcPattern) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    fn as_ptr(&self) -> *mut FcPattern {
        self.0.as_ptr()
    }

    fn borrow(&self) -> PatternRef<'_> {
        PatternRef::new(self.as_ptr())
    }
}

impl Drop for Pattern {
    fn drop(&mut self) {
        unsafe { FcPatternDestroy(self.as_ptr()) }
    }
}

/// Pattern owned by something else (a font set or a [`Pattern`]).
#[derive(Clone, Copy)]
struct PatternRef<'a> {
    ptr: *mut FcPattern,
    _owner: PhantomData<&'a FcPattern>,
}

impl<'a> PatternRef<'a> {
    fn new(ptr: *mut FcPattern) -> Self {
        Self {
            ptr,
            _owner: PhantomData,
        }
    }

    fn bytes(&self, object: &CStr) -> Option<&'a [u8]> {
        let mut value: *mut FcChar8 = ptr::null_mut();
        let result = unsafe { FcPatternGetString(self.ptr, object.as_ptr(), 0, &mut value) };
        if result != FcResultMatch || value.is_null() {
            return None;
        }
        // Owned by the pattern, which outlives 'a.
        Some(unsafe { CStr::from_ptr(value as *const c_char) }.to_bytes())
    }

    fn integer(&self, object: &CStr) -> Option<i32> {
        let mut value: c_int = 0;
        let result = unsafe { FcPatternGetInteger(self.ptr, object.as_ptr(), 0, &mut value) };
        (result == FcResultMatch).then_some(value)
    }

    fn double(&self, object: &CStr) -> Option<f64> {
        let mut value: c_double = 0.0;
        let result = unsafe { FcPatternGetDouble(self.ptr, object.as_ptr(), 0, &mut value) };
        (result == FcResultMatch).then_some(value)
    }
}

struct ObjectSet(NonNull<FcObjectSet>);

impl ObjectSet {
    fn build(objects: &[&CStr]) -> Option<Self> {
        let set = NonNull::new(unsafe { FcObjectSetCreate() }).map(Self)?;
        for object in objects {
            if unsafe { FcObjectSetAdd(set.as_ptr(), object.as_ptr()) } == 0 {
                return None;
            }
        }
        Some(set)
    }

    fn as_ptr(&self) -> *mut FcObjectSet {
        self.0.as_ptr()
    }
}

impl Drop for ObjectSet {
    fn drop(&mut self) {
        unsafe { FcObjectSetDestroy(self.as_ptr()) }
    }
}

struct FontSet(NonNull<FcFontSet>);

impl FontSet {
    fn list(config: &Config, pattern: &Pattern, objects: &ObjectSet) -> Option<Self> {
        NonNull::new(unsafe { FcFontList(config.as_ptr(), pattern.as_ptr(), objects.as_ptr()) })
            .map(Self)
    }

    fn patterns(&self) -> impl Iterator<Item = PatternRef<'_>> {
        let set = unsafe { self.0.as_ref() };
        let fonts: &[*mut FcPattern] = if set.fonts.is_null() || set.nfont <= 0 {
            &[]
        } else {
            unsafe { slice::from_raw_parts(set.fonts, set.nfont as usize) }
        };

        fonts
            .iter()
            .filter(|ptr| !ptr.is_null())
            .map(|&ptr| PatternRef::new(ptr))
    }
}

impl Drop for FontSet {
    fn drop(&mut self) {
        unsafe { FcFontSetDestroy(self.0.as_ptr()) }
    }
}
