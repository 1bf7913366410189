use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tracing::warn;

/// File extension appended on compression and required on decompression.
pub const EXTENSION: &str = ".rle";

/// Character budget for derived output file names.
pub const MAX_FILENAME_LEN: usize = 255;

/// True when `path` ends in the literal `.rle` and has something before it.
///
/// Compared on raw bytes, so names that are not UTF-8 are fine.
pub fn has_rle_extension(path: &Path) -> bool {
    let bytes = raw_bytes(path.as_os_str());
    bytes.len() > EXTENSION.len() && bytes.ends_with(EXTENSION.as_bytes())
}

/// `<path>.rle`, with `path` cut so the result fits `MAX_FILENAME_LEN` characters.
pub fn compressed_name(path: &Path) -> PathBuf {
    let budget = MAX_FILENAME_LEN - EXTENSION.len();
    let mut out = truncate(raw_bytes(path.as_os_str()), budget);
    out.extend_from_slice(EXTENSION.as_bytes());
    from_raw_bytes(out).into()
}

/// `path` without its `.rle` suffix, cut to `MAX_FILENAME_LEN` characters.
///
/// Returns `None` when `path` does not carry the extension.
pub fn decompressed_name(path: &Path) -> Option<PathBuf> {
    if !has_rle_extension(path) {
        return None;
    }
    let bytes = raw_bytes(path.as_os_str());
    let stem = Cow::Borrowed(&bytes[..bytes.len() - EXTENSION.len()]);
    Some(from_raw_bytes(truncate(stem, MAX_FILENAME_LEN)).into())
}

/// Keep at most `max` characters. UTF-8 names are cut on a char boundary,
/// anything else is counted in bytes.
fn truncate(name: Cow<'_, [u8]>, max: usize) -> Vec<u8> {
    let cut = match std::str::from_utf8(&name) {
        Ok(text) => text.char_indices().nth(max).map(|(i, _)| i),
        Err(_) => (name.len() > max).then_some(max),
    };
    match cut {
        Some(cut) => {
            warn!(
                file = %String::from_utf8_lossy(&name),
                max,
                "file name too long, truncating derived output name"
            );
            name[..cut].to_vec()
        }
        None => name.into_owned(),
    }
}

#[cfg(unix)]
fn raw_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(name.as_bytes())
}

#[cfg(unix)]
fn from_raw_bytes(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn raw_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    match name.to_string_lossy() {
        Cow::Borrowed(text) => Cow::Borrowed(text.as_bytes()),
        Cow::Owned(text) => Cow::Owned(text.into_bytes()),
    }
}

#[cfg(not(unix))]
fn from_raw_bytes(bytes: Vec<u8>) -> OsString {
    String::from_utf8_lossy(&bytes).into_owned().into()
}
