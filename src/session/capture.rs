//! Capture filtering.
//!
//! Only API traffic reaches the request list: non-HTTP(S) URLs and static
//! assets are dropped on ingest.

/// Extensions treated as static assets.
pub const STATIC_EXTENSIONS: &[&str] = &[
    ".js", ".css", ".map", ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".ico", ".woff",
    ".woff2", ".ttf", ".eot", ".otf", ".mp4", ".webm", ".mp3", ".wav", ".pdf", ".zip", ".tar",
    ".gz",
];

/// Whether a captured URL belongs in the request list.
pub fn should_capture(url: &str) -> bool {
    let lower = url.to_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return false;
    }
    !is_static_asset(&lower)
}

// `url` must already be lowercase. An extension counts at the end of the URL
// or directly before a query string.
fn is_static_asset(url: &str) -> bool {
    STATIC_EXTENSIONS.iter().any(|ext| {
        url.ends_with(ext) || url.contains(&format!("{}?", ext))
    })
}
