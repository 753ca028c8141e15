//! Pager widget on listing pages.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::{require, require_attr, require_in, ParseError};

static SELECTED_PAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("li.selected").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Page token of the entry right after the selected one
///
/// `Ok(None)` means the selected page is the last one. A page without any
/// pager at all (single-page listing) is `Err(MissingElement)`.
pub fn next_page_token(document: &Html) -> Result<Option<String>, ParseError> {
    let selected = require_in(document, &SELECTED_PAGE, "pager li.selected")?;

    let Some(successor) = selected.next_siblings().find_map(ElementRef::wrap) else {
        return Ok(None);
    };

    let link = require(successor, &LINK, "pager next link")?;
    let token = require_attr(link, "pager next link", "data-page")?.trim();
    if token.is_empty() {
        return Err(ParseError::Malformed {
            what: "page token",
            value: token.to_string(),
        });
    }

    Ok(Some(token.to_string()))
}

/// Page token of the selected entry, if the listing has a pager
pub fn selected_page_token(document: &Html) -> Option<String> {
    let selected = document.select(&SELECTED_PAGE).next()?;
    let link = selected.select(&LINK).next()?;
    let token = link.value().attr("data-page")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}
