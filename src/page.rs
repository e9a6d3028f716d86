//! The page boundary: containers receive appended markup.
//!
//! Rendering never touches the template directly; it appends to a
//! [`Container`] handle. The production path buffers each source's markup and
//! injects it into the template's elements by id in one streaming pass.

use lol_html::html_content::ContentType;
use lol_html::{element, HtmlRewriter, Settings};
use std::cell::Cell;
use std::rc::Rc;

/// A capability to append markup to one target container.
pub trait Container {
    fn append_markup(&mut self, markup: &str);
}

/// In-memory container: collects appended fragments in order.
#[derive(Debug, Default)]
pub struct MarkupBuffer {
    fragments: Vec<String>,
}

impl MarkupBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn concat(&self) -> String {
        self.fragments.concat()
    }
}

impl Container for MarkupBuffer {
    fn append_markup(&mut self, markup: &str) {
        self.fragments.push(markup.to_string());
    }
}

/// Outcome of injecting markup into a template page.
pub struct Injection {
    pub html: String,
    /// Container ids that were not found in the template (or were not usable
    /// as an id selector). Their markup was dropped.
    pub missing: Vec<String>,
}

/// Append each `(container id, markup)` insert into the matching element of
/// `template`. Elements are matched by id; everything else passes through
/// unchanged.
pub fn inject(template: &str, inserts: &[(String, String)]) -> Result<Injection, InjectError> {
    let mut missing: Vec<String> = Vec::new();
    let mut flags: Vec<(String, Rc<Cell<bool>>)> = Vec::new();
    let mut handlers = Vec::new();

    for (id, markup) in inserts {
        if !valid_element_id(id) {
            missing.push(id.clone());
            continue;
        }
        let hit = Rc::new(Cell::new(false));
        flags.push((id.clone(), Rc::clone(&hit)));
        let markup = markup.as_str();
        handlers.push(element!(format!("#{}", id), move |el| {
            el.append(markup, ContentType::Html);
            hit.set(true);
            Ok(())
        }));
    }

    let mut output = Vec::new();
    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: handlers,
            ..Settings::new()
        },
        |chunk: &[u8]| output.extend_from_slice(chunk),
    );
    rewriter.write(template.as_bytes())?;
    rewriter.end()?;

    for (id, hit) in flags {
        if !hit.get() {
            missing.push(id);
        }
    }

    let html = String::from_utf8(output).map_err(|_| InjectError::NotUtf8)?;
    Ok(Injection { html, missing })
}

fn valid_element_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[derive(Debug)]
pub enum InjectError {
    Rewrite(lol_html::errors::RewritingError),
    NotUtf8,
}

impl From<lol_html::errors::RewritingError> for InjectError {
    fn from(err: lol_html::errors::RewritingError) -> Self {
        InjectError::Rewrite(err)
    }
}

impl std::fmt::Display for InjectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InjectError::Rewrite(e) => write!(f, "template rewrite failed: {}", e),
            InjectError::NotUtf8 => write!(f, "rewritten page is not valid UTF-8"),
        }
    }
}

impl std::error::Error for InjectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InjectError::Rewrite(e) => Some(e),
            InjectError::NotUtf8 => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_keeps_fragments_in_order() {
        let mut buf = MarkupBuffer::new();
        buf.append_markup("<b>1</b>");
        buf.append_markup("<b>2</b>");
        assert_eq!(buf.fragments(), ["<b>1</b>", "<b>2</b>"]);
        assert_eq!(buf.concat(), "<b>1</b><b>2</b>");
    }

    #[test]
    fn inject_appends_inside_the_container() {
        let template = r#"<body><div id="docs"><p>seed</p></div><div id="other">keep</div></body>"#;
        let inserts = vec![("docs".to_string(), "<span>new</span>".to_string())];
        let out = inject(template, &inserts).unwrap();
        assert_eq!(
            out.html,
            r#"<body><div id="docs"><p>seed</p><span>new</span></div><div id="other">keep</div></body>"#
        );
        assert!(out.missing.is_empty());
    }

    #[test]
    fn inject_handles_multiple_containers() {
        let template = r#"<div id="a"></div><div id="b"></div>"#;
        let inserts = vec![
            ("a".to_string(), "<i>A</i>".to_string()),
            ("b".to_string(), "<i>B</i>".to_string()),
        ];
        let out = inject(template, &inserts).unwrap();
        assert_eq!(
            out.html,
            r#"<div id="a"><i>A</i></div><div id="b"><i>B</i></div>"#
        );
    }

    #[test]
    fn unknown_container_is_reported_and_page_unchanged() {
        let template = r#"<div id="docs"></div>"#;
        let inserts = vec![("tutorials".to_string(), "<i>x</i>".to_string())];
        let out = inject(template, &inserts).unwrap();
        assert_eq!(out.html, template);
        assert_eq!(out.missing, ["tutorials"]);
    }

    #[test]
    fn unusable_id_is_reported_not_panicked() {
        let template = r#"<div id="docs"></div>"#;
        let inserts = vec![("no such id".to_string(), "<i>x</i>".to_string())];
        let out = inject(template, &inserts).unwrap();
        assert_eq!(out.html, template);
        assert_eq!(out.missing, ["no such id"]);
    }

    #[test]
    fn empty_inserts_pass_template_through() {
        let template = "<html><body>untouched</body></html>";
        let out = inject(template, &[]).unwrap();
        assert_eq!(out.html, template);
    }
}
