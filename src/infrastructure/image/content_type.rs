//! File extension and MIME type inference for cached images.

use reqwest::Url;

/// Extension used when neither the URL nor the content type names one.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Content type used when the extension is unknown.
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Extensions with a known content type, most common first.
pub const KNOWN_EXTENSIONS: &[&str] = &["jpg", "webp", "png", "jpeg", "gif", "svg"];

const MAX_EXTENSION_LEN: usize = 8;

/// Picks the file extension for a cached image.
///
/// The URL path's extension wins; otherwise the subtype of the declared
/// content type is used; otherwise [`DEFAULT_EXTENSION`].
/// The result is lowercase and has no leading dot.
#[must_use]
pub fn extension_for(url: &str, content_type: Option<&str>) -> String {
    url_extension(url)
        .or_else(|| content_type.and_then(content_type_extension))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// Maps a file extension (with or without dot) to a content type.
#[must_use]
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

fn url_extension(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.next_back()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    sanitize(ext)
}

fn content_type_extension(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim();
    let subtype = essence.split_once('/')?.1;
    let subtype = subtype.split('+').next()?;
    sanitize(subtype)
}

fn sanitize(ext: &str) -> Option<String> {
    let ext = ext.trim().to_ascii_lowercase();
    (!ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric()))
    .then_some(ext)
}
