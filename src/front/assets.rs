use std::path::Path;

/// The page served at `/`.
pub const INDEX_PAGE: &str = "index.html";
/// The page served at `/message`.
pub const MESSAGE_PAGE: &str = "message.html";
/// The page served with a 404 for unknown resources.
pub const ERROR_PAGE: &str = "error.html";

/// All pages that must exist under the serve directory at startup.
pub const PAGES: [&str; 3] = [INDEX_PAGE, MESSAGE_PAGE, ERROR_PAGE];

/// Best-effort content type guess from the file extension.
///
/// Falls back to `text/plain` when there is no guess.
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html" | "htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("pdf") => "application/pdf",
        Some("mp4") => "video/mp4",
        _ => "text/plain",
    }
}
