use lol_html::{element, text, HtmlRewriter, Settings};
use std::cell::RefCell;
use url::Url;

/// An anchor discovered in a listing page: resolved href plus the anchor's
/// accumulated text content, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub text: String,
}

struct PendingAnchor {
    href: Option<String>,
    text: String,
}

/// Extract the hyperlinks whose text content contains `filter` as a
/// substring.
///
/// Contract: raw HTML text in, ordered resolved href strings out. The input
/// does not need to be a well-formed document. Matching is on the anchor's
/// text content, not its href, so a filename extension appearing only inside
/// the href does not select the anchor.
pub fn matching_links(html: &str, filter: &str, base: &Url) -> Vec<String> {
    scan_anchors(html, base)
        .into_iter()
        .filter(|a| a.text.contains(filter))
        .map(|a| a.href)
        .collect()
}

/// Collect every href-carrying anchor in document order. Relative hrefs are
/// resolved against `base`; anchors whose href is not an http(s) target are
/// dropped.
pub fn scan_anchors(html: &str, base: &Url) -> Vec<Anchor> {
    let pending: RefCell<Vec<PendingAnchor>> = RefCell::new(Vec::new());

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                element!("a[href]", |el| {
                    let href = el
                        .get_attribute("href")
                        .and_then(|h| resolve_href(&h, base));
                    pending.borrow_mut().push(PendingAnchor {
                        href,
                        text: String::new(),
                    });
                    Ok(())
                }),
                // Anchors cannot nest, so a text chunk always belongs to the
                // most recently opened one.
                text!("a[href]", |t| {
                    if let Some(anchor) = pending.borrow_mut().last_mut() {
                        anchor.text.push_str(t.as_str());
                    }
                    Ok(())
                }),
            ],
            ..Settings::new()
        },
        |_: &[u8]| {},
    );

    let result = rewriter
        .write(html.as_bytes())
        .and_then(|()| rewriter.end());
    if let Err(err) = result {
        tracing::debug!(error = %err, "html scan stopped early");
    }

    pending
        .into_inner()
        .into_iter()
        .filter_map(|p| p.href.map(|href| Anchor { href, text: p.text }))
        .collect()
}

fn resolve_href(href: &str, base: &Url) -> Option<String> {
    if let Ok(parsed) = Url::parse(href) {
        return match parsed.scheme() {
            "http" | "https" => Some(parsed.to_string()),
            _ => None,
        };
    }
    match base.join(href) {
        Ok(joined) if matches!(joined.scheme(), "http" | "https") => Some(joined.to_string()),
        _ => None,
    }
}
