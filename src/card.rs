//! Markup fragments for rendered link cards.

use crate::listing::LinkEntry;

/// One card: the grid cell and caption wrapper around the entry's link.
pub fn card(entry: &LinkEntry) -> String {
    format!(
        r#"<div class="col-md-4 col-sm-6 portfolio-item"><div class="portfolio-caption"><a href="{}">{}</a></div></div>"#,
        entry.relative_path, entry.display_name
    )
}

/// The row fragment wrapping a run of cards for the page's grid.
pub fn row(cards: &str) -> String {
    format!(r#"<div class="row">{}</div>"#, cards)
}
