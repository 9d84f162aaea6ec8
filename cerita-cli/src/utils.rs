use std::fmt::Display;

use url::form_urlencoded;

/// Reads the `id` query parameter from a detail url.
///
/// Accepts absolute urls, relative ones (`post.html?id=7`) and bare query
/// strings. The first `id` wins.
pub fn extract_id(url: &str) -> Option<String> {
    let query = match url.split_once('?') {
        Some((_, query)) => query,
        None if url.contains('=') => url,
        None => return None,
    };
    let query = query.split('#').next().unwrap_or_default();
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
}

/// `post.html?id=<id>`, with the id percent-encoded.
pub fn detail_url(detail_path: &str, id: impl Display) -> String {
    let id = id.to_string();
    let encoded: String = form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("{detail_path}?id={encoded}")
}
