//! Lodestone news scraper.
//!
//! The maintenance/status news category lists one entry per `<li>` under
//! `.news__content > ul`. A congestion notice is found by plain text match,
//! and its detail page lists every congested world as `× WorldName` inside
//! `.news__detail__wrapper`.
//!
//! # URL Pattern
//!
//! Listing entries link with host-absolute paths such as
//! `/lodestone/news/detail/1234`, which are joined onto the listing's
//! `scheme://host` by [`resolve`].

use crate::error::{Error, Result};
use crate::fetch::{PageSource, fetch_document};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};
use url::Url;

/// Keyword that identifies the congestion notice in the listing.
pub const CONGESTION_KEYWORD: &str = "congested";

/// World named in the detail marker when no override is configured.
///
/// The marker does not follow the `--world` flag; see `--marker-world`.
pub const DEFAULT_MARKER_WORLD: &str = "Tonberry";

static LISTING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".news__content > ul").expect("valid listing selector"));
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("valid anchor selector"));
static DETAIL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".news__detail__wrapper").expect("valid detail selector"));

/// Find the link of the first listing entry whose text contains `keyword`.
///
/// Entries are the element children of every `.news__content > ul`, visited
/// in document order. Matching lower-cases the entry text, so `keyword` is
/// expected in lower case.
///
/// # Returns
///
/// - `None` if no entry matched.
/// - `Some("")` if the first matching entry has no `<a href>`; scanning stops
///   there regardless, and a later matching entry that does have a link is
///   not considered.
/// - `Some(href)` otherwise.
pub fn find_candidate_link(doc: &Html, keyword: &str) -> Option<String> {
    let entries = doc
        .select(&LISTING_SELECTOR)
        .flat_map(|list| list.children().filter_map(ElementRef::wrap));

    for entry in entries {
        let text = entry.text().collect::<String>().to_lowercase();
        if !text.contains(keyword) {
            continue;
        }

        let href = entry
            .select(&ANCHOR_SELECTOR)
            .next()
            .and_then(|a| a.value().attr("href"));
        return match href {
            Some(href) => {
                debug!(%href, "Found candidate article link");
                Some(href.to_string())
            }
            None => {
                warn!("no href found");
                Some(String::new())
            }
        };
    }

    None
}

/// Join `relative_path` onto the scheme and host of `base_url`.
///
/// This is concatenation, not RFC 3986 resolution: `relative_path` must
/// start with `/`. An explicit non-default port on `base_url` is kept.
pub fn resolve(base_url: &str, relative_path: &str) -> Result<String> {
    let parsed = Url::parse(base_url).map_err(|source| Error::UrlParse {
        url: base_url.to_string(),
        source,
    })?;
    let host = parsed.host_str().ok_or_else(|| Error::MissingHost {
        url: base_url.to_string(),
    })?;

    Ok(match parsed.port() {
        Some(port) => format!("{}://{}:{}{}", parsed.scheme(), host, port, relative_path),
        None => format!("{}://{}{}", parsed.scheme(), host, relative_path),
    })
}

/// The literal fragment the detail page shows for a congested world.
pub fn marker_for(world: &str) -> String {
    format!("× {world}")
}

/// Whether the article's detail region mentions `marker_world` as congested.
///
/// Pure function of the document; the text of every detail region is
/// concatenated before matching.
pub fn detail_has_marker(doc: &Html, marker_world: &str) -> bool {
    let text = doc
        .select(&DETAIL_SELECTOR)
        .flat_map(|el| el.text())
        .collect::<String>();
    text.contains(&marker_for(marker_world))
}

/// Fetch the article at `article_url` and report whether it still lists the
/// marker world as congested.
///
/// `world` is only carried for logging. The marker checked is
/// `marker_world`, or [`DEFAULT_MARKER_WORLD`] when that is `None`.
#[instrument(level = "info", skip_all, fields(url = %article_url, %world))]
pub async fn is_congested<S: PageSource>(
    source: &S,
    article_url: &str,
    world: &str,
    marker_world: Option<&str>,
) -> Result<bool> {
    let doc = fetch_document(source, article_url)
        .await
        .map_err(|e| Error::Inspection {
            url: article_url.to_string(),
            source: Box::new(e),
        })?;

    let marker_world = marker_world.unwrap_or(DEFAULT_MARKER_WORLD);
    let congested = detail_has_marker(&doc, marker_world);
    debug!(marker_world, congested, "Inspected article detail");
    Ok(congested)
}
