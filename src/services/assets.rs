//! Embedded single-page-app bundle.

use std::borrow::Cow;

use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "static/dist/"]
struct SpaBundle;

/// Entry document served for every client-side route.
pub const INDEX_HTML: &str = "index.html";

/// A file from the bundle with its guessed content type.
pub struct Asset {
    pub body: Cow<'static, [u8]>,
    pub content_type: String,
}

/// Look up a bundle file by request path (leading `/` ignored).
pub fn get(path: &str) -> Option<Asset> {
    let path = path.trim_start_matches('/');
    if path.is_empty() || path.split('/').any(|seg| seg == "..") {
        return None;
    }

    SpaBundle::get(path).map(|file| Asset {
        content_type: file.metadata.mimetype().to_string(),
        body: file.data,
    })
}

/// The SPA entry document.
pub fn index() -> Option<Asset> {
    get(INDEX_HTML)
}
