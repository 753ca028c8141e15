//! Episode page and the default source's player page.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use super::{require, require_attr, require_in, text_of, ParseError};
use crate::models::{MediaLinks, Provider, Quality};

static DOWNLOAD_WIDGET: Lazy<Selector> = Lazy::new(|| Selector::parse("div.cf-download").unwrap());
static SOURCE_WIDGET: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.anime_muti_link").unwrap());
static SOURCE_ENTRY: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static SCRIPT: Lazy<Selector> = Lazy::new(|| Selector::parse("script").unwrap());

static STREAM_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"https?://[^\s"'<>]+"#).unwrap());

/// Source list layout: entry 0 is the default player, entry 1 repeats it.
const DEFAULT_SOURCE_ENTRY: usize = 0;
const FIRST_PROVIDER_ENTRY: usize = 2;

/// The player page embeds its stream URL in its third script block.
const PLAYER_SCRIPT_INDEX: usize = 2;

/// Links found on the episode page itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeSources {
    /// Download tiers and provider embeds
    pub links: MediaLinks,
    /// Default player URL, fetched later for the stream fallback
    pub default_source: String,
}

/// Tier for a `WIDTHxHEIGHT` label
///
/// The tier is the short side of the frame, so `640x360` and `360x640` both
/// read as 360p. Anything else is not a quality label.
pub fn parse_quality_label(label: &str) -> Option<Quality> {
    let (a, b) = label.trim().split_once('x')?;
    let a: u32 = a.trim().parse().ok()?;
    let b: u32 = b.trim().parse().ok()?;
    Quality::from_height(a.min(b))
}

/// Prefix scheme-relative source URLs with `https:`
pub fn normalize_source_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https:{}", url)
    }
}

/// Provider label is the entry text up to the "Choose this server" suffix
fn provider_label(entry_text: &str) -> &str {
    entry_text.split('C').next().unwrap_or_default().trim()
}

fn collect_download_links(document: &Html, links: &mut MediaLinks) -> Result<(), ParseError> {
    let widget = require_in(document, &DOWNLOAD_WIDGET, "div.cf-download")?;

    for anchor in widget.select(&LINK) {
        let label = text_of(anchor);
        let Some(quality) = parse_quality_label(&label) else {
            debug!(label = %label, "Ignoring non-resolution download label");
            continue;
        };
        match anchor.value().attr("href") {
            Some(href) => links.set_quality(quality, href.trim().to_string()),
            None => warn!(label = %label, "Download link without href"),
        }
    }

    Ok(())
}

/// Parse the download widget and the alternate-source widget
pub fn parse_episode_sources(document: &Html) -> Result<EpisodeSources, ParseError> {
    let mut links = MediaLinks::default();
    collect_download_links(document, &mut links)?;

    let widget = require_in(document, &SOURCE_WIDGET, "div.anime_muti_link")?;
    let entries: Vec<_> = widget.select(&SOURCE_ENTRY).collect();

    let default_entry = entries
        .get(DEFAULT_SOURCE_ENTRY)
        .copied()
        .ok_or(ParseError::MissingElement("default source entry"))?;
    let default_link = require(default_entry, &LINK, "default source link")?;
    let default_source =
        normalize_source_url(require_attr(default_link, "default source link", "data-video")?);

    for entry in entries.iter().skip(FIRST_PROVIDER_ENTRY) {
        let text = text_of(*entry);
        let label = provider_label(&text);
        let Some(provider) = Provider::from_label(label) else {
            debug!(label, "Skipping unknown provider");
            continue;
        };
        let video = entry
            .select(&LINK)
            .next()
            .and_then(|a| a.value().attr("data-video"));
        match video {
            Some(url) => links.set_provider(provider, normalize_source_url(url)),
            None => warn!(label, "Provider entry without data-video"),
        }
    }

    Ok(EpisodeSources {
        links,
        default_source,
    })
}

/// Mine the first absolute URL out of the player page's stream script
pub fn parse_fallback_stream(document: &Html) -> Result<String, ParseError> {
    let script = document
        .select(&SCRIPT)
        .nth(PLAYER_SCRIPT_INDEX)
        .ok_or(ParseError::MissingElement("player stream script"))?;

    let body = script.text().collect::<String>();
    let found = STREAM_URL.find(&body).map(|m| m.as_str().to_string());
    found.ok_or(ParseError::Malformed {
        what: "player stream script",
        value: body.trim().chars().take(80).collect(),
    })
}
