//! Helpers shared by the reqwest-backed adapters.

use reqwest::Url;

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Whitespace-compacted prefix of a response body for error messages.
pub(crate) fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// Resolve `path` beneath `base`, keeping any path prefix `base` carries.
///
/// `https://proxy.test/openai` joined with `v1/chat/completions` yields
/// `https://proxy.test/openai/v1/chat/completions`.
pub(crate) fn join_path(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
}
