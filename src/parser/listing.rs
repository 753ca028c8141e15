//! Listing pages: search results, genre pages and the airing menu.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{require, require_attr, require_in, ParseError};
use crate::models::CatalogEntry;

static ITEMS_CONTAINER: Lazy<Selector> = Lazy::new(|| Selector::parse("ul.items").unwrap());
static AIRING_MENU: Lazy<Selector> =
    Lazy::new(|| Selector::parse("nav.menu_series.cron ul").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

static EPISODE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+)-episode-\d+$").unwrap());

/// Hrefs look like `/category/<id>`; the id is the third `/`-separated segment.
const CATALOG_ID_SEGMENT: usize = 2;

/// Derive the catalog id from an item href
///
/// `/category/one-piece` gives `one-piece`. Links into an episode page
/// (`/videos/one-piece-episode-1000`) are reduced to the series id.
pub fn catalog_id_from_href(href: &str) -> Result<String, ParseError> {
    let segment = href
        .split('/')
        .nth(CATALOG_ID_SEGMENT)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ParseError::Malformed {
            what: "catalog href",
            value: href.to_string(),
        })?;

    let id = EPISODE_SUFFIX
        .captures(segment)
        .and_then(|caps| caps.get(1))
        .map_or(segment, |m| m.as_str());

    Ok(id.to_string())
}

fn entry_from_link(link: ElementRef<'_>) -> Result<CatalogEntry, ParseError> {
    let title = require_attr(link, "listing link", "title")?;
    let href = require_attr(link, "listing link", "href")?;
    Ok(CatalogEntry::new(title.trim(), catalog_id_from_href(href)?))
}

/// Parse the `ul.items` container shared by search and genre pages
///
/// Entries come back in document order. A missing container is an error;
/// an empty `Vec` means the container exists but holds no items.
pub fn parse_catalog_entries(document: &Html) -> Result<Vec<CatalogEntry>, ParseError> {
    let container = require_in(document, &ITEMS_CONTAINER, "ul.items")?;

    container
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "li")
        .map(|item| entry_from_link(require(item, &LINK, "ul.items li a")?))
        .collect()
}

/// Parse the "recent release" airing menu on the home page
pub fn parse_airing_entries(document: &Html) -> Result<Vec<CatalogEntry>, ParseError> {
    let menu = require_in(document, &AIRING_MENU, "nav.menu_series.cron ul")?;
    menu.select(&LINK).map(entry_from_link).collect()
}
