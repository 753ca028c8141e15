//! Parser module for extracting structured data from HTML
//!
//! Raw pages go through [`normalize`] first; the submodules then run
//! structural queries against the cleaned tree. Every extractor is strict:
//! a missing anchor is reported as a [`ParseError`] naming it, never papered
//! over with an empty value.

mod detail;
mod episode;
mod listing;
mod pager;

pub use detail::{parse_media_info, parse_series_summary, SeriesSummary};
pub use episode::{
    normalize_source_url, parse_episode_sources, parse_fallback_stream, parse_quality_label,
    EpisodeSources,
};
pub use listing::{catalog_id_from_href, parse_airing_entries, parse_catalog_entries};
pub use pager::{next_page_token, selected_page_token};

use scraper::{ElementRef, Html, Node, Selector};
use thiserror::Error;

/// Low-level structural failures raised while querying a page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("element not found: {0}")]
    MissingElement(&'static str),

    #[error("attribute `{attribute}` missing on {element}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("malformed {what}: {value:?}")]
    Malformed { what: &'static str, value: String },

    #[error("expected at least {expected} metadata lines, found {found}")]
    TooFewLines { expected: usize, found: usize },
}

/// Elements removed before any query runs: styling, embedded objects,
/// frames and legacy presentational tags. Scripts are kept because the
/// stream fallback reads them.
const STRIPPED_ELEMENTS: &[&str] = &[
    "style", "link", "meta", "base", "object", "embed", "applet", "frame", "frameset", "iframe",
    "blink", "marquee",
];

/// Clean raw HTML into a tree safe for structural queries
///
/// Parsing never fails: html5ever closes or drops malformed tags and the
/// result is a best-effort tree. Comments, processing instructions and the
/// elements in [`STRIPPED_ELEMENTS`] are detached afterwards.
pub fn normalize(raw: &str) -> Html {
    let mut document = Html::parse_document(raw);

    let doomed: Vec<_> = document
        .tree
        .nodes()
        .filter(|node| match node.value() {
            Node::Comment(_) | Node::ProcessingInstruction(_) => true,
            Node::Element(el) => STRIPPED_ELEMENTS.contains(&el.name()),
            _ => false,
        })
        .map(|node| node.id())
        .collect();

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    document
}

/// Collected, trimmed text content of an element
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// First match of `selector` under `scope`, or `MissingElement(name)`
pub(crate) fn require<'a>(
    scope: ElementRef<'a>,
    selector: &Selector,
    name: &'static str,
) -> Result<ElementRef<'a>, ParseError> {
    scope
        .select(selector)
        .next()
        .ok_or(ParseError::MissingElement(name))
}

/// First match of `selector` anywhere in `document`
pub(crate) fn require_in<'a>(
    document: &'a Html,
    selector: &Selector,
    name: &'static str,
) -> Result<ElementRef<'a>, ParseError> {
    document
        .select(selector)
        .next()
        .ok_or(ParseError::MissingElement(name))
}

pub(crate) fn require_attr<'a>(
    el: ElementRef<'a>,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str, ParseError> {
    el.value()
        .attr(attribute)
        .ok_or(ParseError::MissingAttribute { element, attribute })
}
