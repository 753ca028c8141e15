//! Category (detail) page of a single title.
//!
//! The metadata block is a run of `p.type` lines in a fixed order. Each line
//! is read by a named rule below; the block is checked for length up front so
//! a layout change surfaces as [`ParseError::TooFewLines`] rather than as a
//! confusing lookup failure further down.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::{require, require_attr, require_in, text_of, ParseError};
use crate::models::MediaInfo;

static INFO_BODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.anime_info_body_bg").unwrap());
static COVER: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static METADATA_LINES: Lazy<Selector> = Lazy::new(|| Selector::parse("p.type").unwrap());
static EPISODE_RANGES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#episode_page li").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

const TYPE_LINE: usize = 0;
const SUMMARY_LINE: usize = 1;
const GENRE_LINE: usize = 2;
const RELEASED_LINE: usize = 3;
const STATUS_LINE: usize = 4;
const OTHER_NAMES_LINE: usize = 5;
const METADATA_LINE_COUNT: usize = 6;

/// Title plus the newest published episode, as shown on the category page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSummary {
    pub title: String,
    pub last_episode: u32,
}

fn info_body(document: &Html) -> Result<ElementRef<'_>, ParseError> {
    require_in(document, &INFO_BODY, "div.anime_info_body_bg")
}

fn series_title(body: ElementRef<'_>) -> Result<String, ParseError> {
    let title = text_of(require(body, &HEADING, "title heading")?);
    if title.is_empty() {
        return Err(ParseError::MissingElement("title heading text"));
    }
    Ok(title)
}

/// Running episode total: trailing number of the last `start-end` range
fn last_episode(document: &Html) -> Result<u32, ParseError> {
    let last_range = document
        .select(&EPISODE_RANGES)
        .last()
        .ok_or(ParseError::MissingElement("#episode_page li"))?;

    let range = text_of(last_range);
    let end = range
        .rsplit('-')
        .next()
        .and_then(|end| end.trim().parse().ok());
    end.ok_or(ParseError::Malformed {
        what: "episode range",
        value: range,
    })
}

/// "Plot Summary: text" -> "text"; only the first colon separates the label
fn summary_rule(line: ElementRef<'_>) -> Result<String, ParseError> {
    let text = line.text().collect::<String>();
    text.split_once(':')
        .map(|(_, summary)| summary.trim().to_string())
        .ok_or(ParseError::Malformed {
            what: "plot summary line",
            value: text.trim().to_string(),
        })
}

/// "Released: 2002" -> 2002; the year is the second whitespace token
fn year_rule(line: ElementRef<'_>) -> Result<u32, ParseError> {
    let text = text_of(line);
    let year = text.split_whitespace().nth(1).and_then(|year| year.parse().ok());
    year.ok_or(ParseError::Malformed {
        what: "release year line",
        value: text,
    })
}

fn genres_rule(line: ElementRef<'_>) -> Vec<String> {
    line.select(&LINK)
        .filter_map(|a| a.value().attr("title"))
        .map(|title| title.trim().to_string())
        .collect()
}

/// Parse the full metadata record; any missing anchor fails the whole record
pub fn parse_media_info(document: &Html) -> Result<MediaInfo, ParseError> {
    let body = info_body(document)?;

    let image_url = require_attr(require(body, &COVER, "cover image")?, "cover image", "src")?
        .trim()
        .to_string();
    let title = series_title(body)?;

    let lines: Vec<ElementRef<'_>> = document.select(&METADATA_LINES).collect();
    if lines.len() < METADATA_LINE_COUNT {
        return Err(ParseError::TooFewLines {
            expected: METADATA_LINE_COUNT,
            found: lines.len(),
        });
    }

    let type_link = require(lines[TYPE_LINE], &LINK, "type link")?;
    let season_type = require_attr(type_link, "type link", "title")?.trim().to_string();
    let summary = summary_rule(lines[SUMMARY_LINE])?;
    let genres = genres_rule(lines[GENRE_LINE]);
    let year = year_rule(lines[RELEASED_LINE])?;
    let status = text_of(require(lines[STATUS_LINE], &LINK, "status link")?);
    let other_names = text_of(lines[OTHER_NAMES_LINE]);
    let episode_count = last_episode(document)?;

    Ok(MediaInfo {
        title,
        year,
        other_names,
        season_type,
        status,
        genres,
        episode_count,
        image_url,
        summary,
    })
}

/// The subset of the category page the link resolver needs
pub fn parse_series_summary(document: &Html) -> Result<SeriesSummary, ParseError> {
    let title = series_title(info_body(document)?)?;
    let last_episode = last_episode(document)?;
    Ok(SeriesSummary {
        title,
        last_episode,
    })
}
