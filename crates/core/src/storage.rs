//! Object-key and public-URL helpers for uploaded images.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use uuid::Uuid;

/// Default bucket holding menu and gallery images.
pub const DEFAULT_BUCKET: &str = "flamingo-cafe";

/// File extensions accepted for image uploads.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "avif"];

/// Slug used when a file name has no usable characters.
const DEFAULT_SLUG: &str = "image";

static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Top-level prefix an upload is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFolder {
    Menu,
    Gallery,
}

impl UploadFolder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Gallery => "gallery",
        }
    }

    /// Parse a folder name; blank input means [`UploadFolder::Menu`].
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim).unwrap_or("") {
            "" | "menu" => Some(Self::Menu),
            "gallery" => Some(Self::Gallery),
            _ => None,
        }
    }
}

/// Split a file name into a slugged base name and a lowercase extension
/// (including the leading dot, or empty).
///
/// ```
/// use flamingo_core::storage::split_file_name;
/// assert_eq!(split_file_name("Sea Bass (large).JPG"), ("sea-bass-large".into(), ".jpg".into()));
/// assert_eq!(split_file_name("???.png"), ("image".into(), ".png".into()));
/// assert_eq!(split_file_name(".hidden"), ("hidden".into(), "".into()));
/// ```
pub fn split_file_name(filename: &str) -> (String, String) {
    let lowered = filename.trim().to_lowercase();
    let (base, extension) = match lowered.rfind('.') {
        Some(idx) if idx > 0 => (&lowered[..idx], &lowered[idx..]),
        Some(_) => (&lowered[1..], ""),
        None => (lowered.as_str(), ""),
    };
    let slug = NON_ALNUM_RE.replace_all(base, "-");
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { DEFAULT_SLUG } else { slug };
    (slug.to_string(), extension.to_string())
}

/// Whether a file name carries one of [`ALLOWED_IMAGE_EXTENSIONS`].
pub fn is_allowed_image(filename: &str) -> bool {
    let (_, extension) = split_file_name(filename);
    extension
        .strip_prefix('.')
        .is_some_and(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext))
}

/// Build `{folder}/{YYYY-MM-DD}/{uuid}-{slug}{.ext}`.
pub fn build_object_key(folder: UploadFolder, filename: &str, date: NaiveDate, id: Uuid) -> String {
    let (slug, extension) = split_file_name(filename);
    format!(
        "{}/{}/{}-{}{}",
        folder.as_str(),
        date.format("%Y-%m-%d"),
        id,
        slug,
        extension
    )
}

/// Best-effort content type for an image file name.
pub fn image_content_type(filename: &str) -> &'static str {
    let (_, extension) = split_file_name(filename);
    match extension.as_str() {
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        ".webp" => "image/webp",
        ".gif" => "image/gif",
        ".avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Derive the public object base URL (without trailing slash) for a bucket.
///
/// S3-compatible endpoints of the form `https://<ref>.storage.<host>/storage/v1/s3`
/// serve public objects from `https://<ref>.<host>/storage/v1/object/public/<bucket>`.
/// Other endpoints are treated as path-style hosts; without an endpoint the
/// AWS virtual-hosted URL is used.
pub fn public_base_url(endpoint: Option<&str>, bucket: &str, region: &str) -> String {
    let Some(endpoint) = endpoint.map(|e| e.trim().trim_end_matches('/')).filter(|e| !e.is_empty())
    else {
        return format!("https://{bucket}.s3.{region}.amazonaws.com");
    };

    let (scheme, rest) = endpoint.split_once("://").unwrap_or(("https", endpoint));
    let (host, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, ""),
    };
    let host = host.replacen(".storage.", ".", 1);
    let path = match path.strip_suffix("/s3") {
        Some(prefix) => format!("{prefix}/object/public"),
        None => path.to_string(),
    };
    format!("{scheme}://{host}{path}/{bucket}")
}

/// Recover the object key from a public URL under `base_url`.
///
/// Returns `None` for URLs that do not point into the bucket, such as the
/// bundled `/assets/...` placeholders.
pub fn key_from_public_url(base_url: &str, url: &str) -> Option<String> {
    let base = base_url.trim_end_matches('/');
    let key = url.trim().strip_prefix(base)?.strip_prefix('/')?;
    let key = key.split(['?', '#']).next().unwrap_or("");
    (!key.is_empty()).then(|| key.to_string())
}
