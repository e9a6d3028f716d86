//! Derivation of a renderable entry from a harvested anchor href.

/// One discovered link, ready to render: where it points on the local site
/// and what to label it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub href: String,
    pub display_name: String,
    pub relative_path: String,
}

impl LinkEntry {
    /// Derive an entry from a resolved href.
    ///
    /// The href is split on `/`; the last two non-trailing segments are taken
    /// as a grouping label and a filename. Returns `None` when fewer than two
    /// segments remain, which callers treat as a skippable mismatch.
    ///
    /// The display name is the filename with the first occurrence of the
    /// extension's token (extension minus leading dots) removed, wherever it
    /// appears. With ".html" this turns `intro.html` into `intro.`; the
    /// trailing period is long-standing rendered behavior, kept as is.
    pub fn derive(href: &str, extension: &str) -> Option<LinkEntry> {
        let segments: Vec<&str> = href.split('/').collect();

        let mut end = segments.len();
        while end > 0 && segments[end - 1].is_empty() {
            end -= 1;
        }
        if end < 2 {
            return None;
        }

        let group = segments[end - 2];
        let file = segments[end - 1];

        let token = strip_token(extension);
        let display_name = if token.is_empty() {
            file.to_string()
        } else {
            file.replacen(token, "", 1)
        };

        Some(LinkEntry {
            href: href.to_string(),
            display_name,
            relative_path: format!("./{}/{}", group, file),
        })
    }
}

/// The substring removed from filenames for display: the configured
/// extension with leading dots stripped (".html" -> "html").
pub fn strip_token(extension: &str) -> &str {
    extension.trim_start_matches('.')
}
