//! The listing render operation and the run over all configured sources.

use crate::card;
use crate::config::{Config, ListingSource};
use crate::http_client::HttpClient;
use crate::listing::LinkEntry;
use crate::page::{self, Container, MarkupBuffer};
use crate::parser;
use anyhow::{Context, Result};
use std::fs;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug)]
pub struct RunSummary {
    /// Sources that produced at least one card.
    pub sources: usize,
    /// Cards appended across all containers.
    pub cards: usize,
}

/// Fetch one listing, harvest its matching links and append one rendered
/// card per link to `container`, in encounter order.
///
/// Failures stay here: a fetch error is logged and yields an empty render, a
/// malformed anchor is skipped and the rest continue. Returns the number of
/// cards appended.
pub async fn render_listing(
    client: &HttpClient,
    source: &ListingSource,
    container: &mut dyn Container,
) -> usize {
    let base = match Url::parse(&source.url) {
        Ok(url) => url,
        Err(err) => {
            warn!(url = %source.url, error = %err, "listing url is not valid");
            return 0;
        }
    };

    let body = match client.fetch_listing(base.as_str()).await {
        Ok(body) => body,
        Err(err) => {
            warn!(url = %source.url, error = %err, "listing fetch failed");
            return 0;
        }
    };

    let hrefs = parser::matching_links(&body, &source.extension, &base);

    let mut appended = 0;
    for href in &hrefs {
        match LinkEntry::derive(href, &source.extension) {
            Some(entry) => {
                container.append_markup(&card::card(&entry));
                appended += 1;
            }
            None => debug!(%href, "skipping anchor with too few path segments"),
        }
    }

    if appended == 0 {
        debug!(url = %source.url, "no matching entries in listing");
    }
    appended
}

/// Render every configured source concurrently, inject the buffered markup
/// into the template's containers and write the populated page.
///
/// With `dry_run`, the fragments are printed to stdout instead and the
/// output path is left untouched.
pub async fn run(config: &Config, dry_run: bool) -> Result<RunSummary> {
    let template = fs::read_to_string(&config.template)
        .with_context(|| format!("reading template {}", config.template.display()))?;

    let client = HttpClient::new().context("building http client")?;

    // Sources are independent: distinct containers, no shared state. Whatever
    // order responses arrive in, each buffer only sees its own source.
    let renders = futures::future::join_all(config.listings.iter().map(|source| {
        let client = &client;
        async move {
            let mut buffer = MarkupBuffer::new();
            let appended = render_listing(client, source, &mut buffer).await;
            (source, buffer, appended)
        }
    }))
    .await;

    let mut inserts = Vec::new();
    let mut cards = 0;
    let mut sources = 0;
    for (source, buffer, appended) in renders {
        if appended > 0 {
            sources += 1;
        }
        cards += appended;
        if !buffer.is_empty() {
            // One row per rendered source, cards inside in encounter order.
            inserts.push((source.container.clone(), card::row(&buffer.concat())));
        }
    }

    if dry_run {
        for (container, markup) in &inserts {
            println!("<!-- #{} -->", container);
            println!("{}", markup);
        }
        info!(cards, "dry run, nothing written");
        return Ok(RunSummary { sources, cards });
    }

    let injection = page::inject(&template, &inserts).context("injecting into template")?;
    for id in &injection.missing {
        warn!(container = %id, "container not found in template, markup dropped");
    }

    fs::write(&config.output, injection.html)
        .with_context(|| format!("writing output {}", config.output.display()))?;

    Ok(RunSummary { sources, cards })
}
