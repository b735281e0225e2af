//! Image reference handling.
//!
//! Itinerary content stores image references in three shapes: absolute URLs
//! (and data URIs), origin-relative paths like `/storage/images/x.jpg`, and
//! bare filenames from older records. Resolution turns any of them into a
//! fetchable URL against a given server origin.

/// Prefix under which the backend serves uploaded images.
const STORAGE_PREFIX: &str = "/storage/images/";

/// True for `data:` URIs carrying inline image bytes.
pub fn is_data_uri(reference: &str) -> bool {
    reference.starts_with("data:")
}

/// True for references that already resolve on their own.
pub fn is_absolute(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://") || is_data_uri(reference)
}

/// Resolves an image reference into a fetchable URL.
///
/// Absolute URLs and data URIs pass through untouched. Server-relative paths
/// are prefixed with the origin. Bare filenames resolve under the storage
/// prefix, which keeps records from before paths were stored working.
pub fn resolve_url(origin: &str, reference: &str) -> String {
    if is_absolute(reference) {
        return reference.to_string();
    }
    let origin = origin.trim_end_matches('/');
    if reference.starts_with('/') {
        format!("{origin}{reference}")
    } else {
        format!("{origin}{STORAGE_PREFIX}{reference}")
    }
}

/// Extracts the stored filename from a reference, for deletion requests.
///
/// Returns `None` for data URIs, which have no server-side file behind them.
pub fn filename(reference: &str) -> Option<&str> {
    if is_data_uri(reference) {
        return None;
    }
    reference
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
}
