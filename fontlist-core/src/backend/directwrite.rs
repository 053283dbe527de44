//! Windows backend over DirectWrite
//!
//! COM interfaces from the `windows` crate release themselves on drop, so
//! every exit path (including `?`) gives back what it acquired.

use std::ffi::{c_void, OsString};
use std::mem;
use std::os::windows::ffi::OsStringExt;
use std::path::PathBuf;
use std::ptr;

use log::debug;
use windows::core::{Interface, BOOL, PCWSTR};
use windows::Win32::Foundation::GetLastError;
use windows::Win32::Globalization::GetUserDefaultLocaleName;
use windows::Win32::Graphics::DirectWrite::{
    DWriteCreateFactory, IDWriteFactory, IDWriteFont, IDWriteFontFamily, IDWriteFontFile,
    IDWriteFontFileLoader, IDWriteLocalFontFileLoader, IDWriteLocalizedStrings,
    DWRITE_FACTORY_TYPE_SHARED, DWRITE_FONT_SIMULATIONS_NONE,
};
use windows::Win32::UI::WindowsAndMessaging::{
    SystemParametersInfoW, NONCLIENTMETRICSW, SPI_GETNONCLIENTMETRICS,
    SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
};

use super::{localized_name_index, FontBackend, ListOptions};
use crate::collect::{default_family, FaceRecord, FamilyCollector};
use crate::error::{FontListError, Result};
use crate::model::FontFamily;
use crate::normalize::{directwrite_style, directwrite_weight};

/// `LOCALE_NAME_MAX_LENGTH`, terminator included.
const LOCALE_NAME_MAX_LENGTH: usize = 85;

/// Fonts from the DirectWrite system font collection.
#[derive(Debug, Default, Clone)]
pub struct DirectWriteBackend {
    options: ListOptions,
}

impl DirectWriteBackend {
    pub fn new(options: ListOptions) -> Self {
        Self { options }
    }

    /// Candidate naming locales in preference order: the requested tag, then
    /// the user default. The user default is only required when no tag was given.
    fn locales(&self) -> Result<Vec<Vec<u16>>> {
        let Some(requested) = &self.options.locale else {
            return Ok(vec![user_default_locale()?]);
        };

        let mut locales = vec![wide(requested)];
        match user_default_locale() {
            Ok(user) => locales.push(user),
            Err(err) => debug!("directwrite: no user default locale to fall back on: {err}"),
        }
        Ok(locales)
    }
}

impl FontBackend for DirectWriteBackend {
    fn enumerate(&self) -> Result<Vec<FontFamily>> {
        let factory = create_factory()?;
        let locales = self.locales()?;

        let mut collection = None;
        unsafe { factory.GetSystemFontCollection(&mut collection, false) }
            .native("IDWriteFactory::GetSystemFontCollection")?;
        let Some(collection) = collection else {
            debug!("directwrite: no system font collection");
            return Ok(Vec::new());
        };

        let mut collector = FamilyCollector::new();
        let family_count = unsafe { collection.GetFontFamilyCount() };
        for i in 0..family_count {
            let family = unsafe { collection.GetFontFamily(i) }
                .native("IDWriteFontCollection::GetFontFamily")?;
            let name = family_name(&family, &locales)?;

            let font_count = unsafe { family.GetFontCount() };
            for j in 0..font_count {
                let font = unsafe { family.GetFont(j) }.native("IDWriteFontFamily::GetFont")?;
                if unsafe { font.GetSimulations() } != DWRITE_FONT_SIMULATIONS_NONE {
                    debug!("directwrite: skipping simulated face in {name}");
                    continue;
                }
                collector.push(face_record(&font, name.clone())?);
            }
        }

        Ok(collector.finish())
    }

    fn default_font(&self) -> Result<FontFamily> {
        let locales = self.locales()?;

        let mut metrics = NONCLIENTMETRICSW {
            cbSize: mem::size_of::<NONCLIENTMETRICSW>() as u32,
            ..Default::default()
        };
        unsafe {
            SystemParametersInfoW(
                SPI_GETNONCLIENTMETRICS,
                metrics.cbSize,
                Some(&mut metrics as *mut NONCLIENTMETRICSW as *mut c_void),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        }
        .native("SystemParametersInfoW")?;

        let factory = create_factory()?;
        let interop =
            unsafe { factory.GetGdiInterop() }.native("IDWriteFactory::GetGdiInterop")?;
        let font = unsafe { interop.CreateFontFromLOGFONT(&metrics.lfMenuFont) }
            .native("IDWriteGdiInterop::CreateFontFromLOGFONT")?;
        let family = unsafe { font.GetFontFamily() }.native("IDWriteFont::GetFontFamily")?;

        let name = family_name(&family, &locales)?;
        default_family(Some(face_record(&font, name)?))
    }
}

/// Attach the failing call's name to a `windows` error, like a checked HRESULT.
trait NativeResult<T> {
    fn native(self, call: &'static str) -> Result<T>;
}

impl<T> NativeResult<T> for windows::core::Result<T> {
    fn native(self, call: &'static str) -> Result<T> {
        self.map_err(|err| FontListError::Native {
            call,
            code: err.code().0 as u32,
        })
    }
}

fn create_factory() -> Result<IDWriteFactory> {
    unsafe { DWriteCreateFactory::<IDWriteFactory>(DWRITE_FACTORY_TYPE_SHARED) }
        .native("DWriteCreateFactory")
}

fn wide(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(Some(0)).collect()
}

fn user_default_locale() -> Result<Vec<u16>> {
    let mut buf = [0u16; LOCALE_NAME_MAX_LENGTH];
    let len = unsafe { GetUserDefaultLocaleName(&mut buf) };
    if len <= 0 {
        return Err(FontListError::Native {
            call: "GetUserDefaultLocaleName",
            code: unsafe { GetLastError() }.to_hresult().0 as u32,
        });
    }
    // `len` counts the terminator.
    Ok(buf[..len as usize].to_vec())
}

/// Family name in the first of `locales` the font has a name for, or its first name.
fn family_name(family: &IDWriteFontFamily, locales: &[Vec<u16>]) -> Result<String> {
    let names = unsafe { family.GetFamilyNames() }.native("IDWriteFontFamily::GetFamilyNames")?;

    let found = locales
        .iter()
        .map(|locale| find_locale_name(&names, locale))
        .collect::<Result<Vec<_>>>()?;
    let index = localized_name_index(found);

    let len = unsafe { names.GetStringLength(index) }
        .native("IDWriteLocalizedStrings::GetStringLength")? as usize;
    let mut buf = vec![0u16; len + 1];
    unsafe { names.GetString(index, &mut buf) }.native("IDWriteLocalizedStrings::GetString")?;
    buf.truncate(len);

    Ok(String::from_utf16_lossy(&buf))
}

fn find_locale_name(names: &IDWriteLocalizedStrings, locale: &[u16]) -> Result<Option<u32>> {
    let mut index = 0u32;
    let mut exists = BOOL::default();
    unsafe { names.FindLocaleName(PCWSTR(locale.as_ptr()), &mut index, &mut exists) }
        .native("IDWriteLocalizedStrings::FindLocaleName")?;
    Ok(exists.as_bool().then_some(index))
}

fn face_record(font: &IDWriteFont, family: String) -> Result<FaceRecord> {
    let style = unsafe { font.GetStyle() };
    let weight = unsafe { font.GetWeight() };

    Ok(FaceRecord {
        family: Some(family),
        file: font_path(font)?,
        size: None,
        style: Some(directwrite_style(style.0)),
        weight: Some(directwrite_weight(weight.0)),
    })
}

/// Path of the first file backing `font`, if it lives on a local disk.
fn font_path(font: &IDWriteFont) -> Result<Option<PathBuf>> {
    let face = unsafe { font.CreateFontFace() }.native("IDWriteFont::CreateFontFace")?;

    let mut count = 0u32;
    unsafe { face.GetFiles(&mut count, None) }.native("IDWriteFontFace::GetFiles")?;
    if count == 0 {
        return Ok(None);
    }

    // Only the first file of a multi-file face is kept.
    let mut files: Vec<Option<IDWriteFontFile>> = vec![None; count as usize];
    unsafe { face.GetFiles(&mut count, Some(files.as_mut_ptr())) }
        .native("IDWriteFontFace::GetFiles")?;

    match files.into_iter().next().flatten() {
        Some(file) => local_file_path(&file),
        None => Ok(None),
    }
}

fn local_file_path(file: &IDWriteFontFile) -> Result<Option<PathBuf>> {
    let mut key: *mut c_void = ptr::null_mut();
    let mut key_size = 0u32;
    unsafe { file.GetReferenceKey(&mut key, &mut key_size) }
        .native("IDWriteFontFile::GetReferenceKey")?;

    let loader = unsafe { file.GetLoader() }.native("IDWriteFontFile::GetLoader")?;
    let Some(local) = local_loader(&loader) else {
        debug!("directwrite: font file uses a non-local loader, no path available");
        return Ok(None);
    };

    let len = unsafe { local.GetFilePathLengthFromKey(key, key_size) }
        .native("IDWriteLocalFontFileLoader::GetFilePathLengthFromKey")? as usize;
    let mut buf = vec![0u16; len + 1];
    unsafe { local.GetFilePathFromKey(key, key_size, &mut buf) }
        .native("IDWriteLocalFontFileLoader::GetFilePathFromKey")?;
    buf.truncate(len);

    Ok(Some(PathBuf::from(OsString::from_wide(&buf))))
}

/// Capability query: `None` for memory-backed, remote or custom loaders.
fn local_loader(loader: &IDWriteFontFileLoader) -> Option<IDWriteLocalFontFileLoader> {
    loader.cast::<IDWriteLocalFontFileLoader>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_strings_are_nul_terminated() {
        assert_eq!(wide("en-US"), vec![101, 110, 45, 85, 83, 0]);
    }

    #[test]
    fn requested_locale_is_tried_before_user_default() {
        let backend =
            DirectWriteBackend::new(ListOptions::new().with_locale(Some("xx-XX".into())));
        let locales = backend.locales().expect("locales");

        assert_eq!(locales[0], wide("xx-XX"));
        assert_eq!(locales.get(1), user_default_locale().ok().as_ref());
    }

    #[test]
    fn user_locale_is_available() {
        let locale = user_default_locale().expect("locale");
        assert_eq!(locale.last(), Some(&0));
    }

    #[test]
    fn system_collection_yields_local_paths() {
        let families = DirectWriteBackend::default().enumerate().expect("enumerate");
        for font in families.iter().flat_map(|f| &f.fonts) {
            assert!(font.file.is_absolute(), "{}", font.file.display());
        }
    }
}
