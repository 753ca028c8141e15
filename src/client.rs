//! The public client: search, details, episode links, genre and airing lists.
//!
//! Every operation fetches its pages one after another, runs the extractors
//! on the normalized markup and classifies any failure exactly once on the
//! way out. Nothing is cached between calls.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::config::{Config, DEFAULT_BASE_URL};
use crate::constants::{endpoints, filters, limits};
use crate::error::{AniKimiError, AniKimiResult, Failure, Operation};
use crate::models::{CatalogEntry, MediaInfo, MediaLinks};
use crate::parser::{
    next_page_token, normalize, parse_airing_entries, parse_catalog_entries,
    parse_episode_sources, parse_fallback_stream, parse_media_info, parse_series_summary,
    selected_page_token, EpisodeSources, ParseError,
};
use crate::scraper::{Scraper, ScraperError, SessionCookies, Transport};

/// Client for the listing site
pub struct AniKimi<T = Scraper> {
    transport: T,
    base_url: String,
    cookies: SessionCookies,
}

impl AniKimi<Scraper> {
    /// Client for the default host with the given session tokens
    pub fn new(gogoanime_token: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self::from_config(Config::new(
            DEFAULT_BASE_URL,
            SessionCookies::new(gogoanime_token, auth_token),
        ))
    }

    pub fn from_config(config: Config) -> Self {
        let transport = Scraper::with_config(config.scraper.clone());
        Self::with_transport(transport, config)
    }
}

impl<T: Transport> AniKimi<T> {
    pub fn with_transport(transport: T, config: Config) -> Self {
        Self {
            transport,
            base_url: config.base_url,
            cookies: config.cookies,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, url: &str, cookie_header: Option<&str>) -> Result<String, ScraperError> {
        debug!(url, "Fetching page");
        let html = self.transport.get(url, cookie_header).await?;
        debug!(url, bytes = html.len(), "Fetched page");
        Ok(html)
    }

    /// Search the catalog by keyword
    ///
    /// A query matching nothing is an error, never an empty list.
    pub async fn search(&self, query: &str) -> AniKimiResult<Vec<CatalogEntry>> {
        info!(query, "Searching catalog");
        let url = endpoints::search(&self.base_url, query);

        let entries = self
            .fetch_listing(&url)
            .await
            .map_err(|e| e.classify(Operation::Search { query }))?;

        if entries.is_empty() {
            return Err(AniKimiError::NoSearchResults {
                query: query.to_string(),
            });
        }

        info!(query, count = entries.len(), "Search complete");
        Ok(entries)
    }

    async fn fetch_listing(&self, url: &str) -> Result<Vec<CatalogEntry>, Failure> {
        let html = self.fetch(url, None).await?;
        Ok(parse_catalog_entries(&normalize(&html))?)
    }

    /// Metadata of one title
    pub async fn get_details(&self, id: &str) -> AniKimiResult<MediaInfo> {
        info!(id, "Fetching details");
        self.fetch_details(id)
            .await
            .map_err(|e| e.classify(Operation::Details { id }))
    }

    async fn fetch_details(&self, id: &str) -> Result<MediaInfo, Failure> {
        let html = self.fetch(&endpoints::category(&self.base_url, id), None).await?;
        Ok(parse_media_info(&normalize(&html))?)
    }

    /// Download, embed and raw stream links for one episode
    ///
    /// Issues three requests: the category page, the episode page (with the
    /// session cookies) and the default player page for the stream fallback.
    pub async fn get_episode_links(&self, id: &str, episode: u32) -> AniKimiResult<MediaLinks> {
        info!(id, episode, "Resolving episode links");
        self.resolve_links(id, episode)
            .await
            .map_err(|e| e.classify(Operation::EpisodeLinks { id, episode }))
    }

    async fn resolve_links(&self, id: &str, episode: u32) -> Result<MediaLinks, Failure> {
        let cookie_header = self.cookies.header_value()?;

        let category = self.fetch(&endpoints::category(&self.base_url, id), None).await?;
        let summary = parse_series_summary(&normalize(&category))?;
        if episode > summary.last_episode {
            warn!(
                id,
                episode,
                last_episode = summary.last_episode,
                "Requested episode is beyond the last published one"
            );
        } else {
            debug!(title = %summary.title, last_episode = summary.last_episode, "Series found");
        }

        let episode_url = endpoints::episode(&self.base_url, id, episode);
        let episode_page = self.fetch(&episode_url, Some(&cookie_header)).await?;
        let EpisodeSources {
            mut links,
            default_source,
        } = parse_episode_sources(&normalize(&episode_page))?;

        let player_page = match self.fetch(&default_source, None).await {
            Ok(html) => html,
            Err(ScraperError::HttpError(status)) => {
                warn!(
                    source = %default_source,
                    status,
                    "Player page unavailable, no fallback stream"
                );
                return Ok(links);
            }
            Err(e) => return Err(e.into()),
        };
        match parse_fallback_stream(&normalize(&player_page)) {
            // The player's own stream wins over the 360p download link.
            Ok(stream) => links.apply_fallback(stream),
            Err(e) => warn!(source = %default_source, error = %e, "No fallback stream found"),
        }

        Ok(links)
    }

    /// Titles of one genre, following the pager until `limit` entries
    pub async fn get_by_genre(
        &self,
        genre: &str,
        limit: usize,
    ) -> AniKimiResult<Vec<CatalogEntry>> {
        info!(genre, limit, "Fetching genre listing");
        if limit == 0 {
            return Ok(Vec::new());
        }
        if !filters::is_known_genre(genre) {
            debug!(genre, "Genre is not in the known list, requesting anyway");
        }

        let template = endpoints::genre_page_template(&self.base_url, genre);
        let classify = |e: Failure| e.classify(Operation::Genre { genre });

        let first_page = self.fetch(&template, None).await.map_err(|e| classify(e.into()))?;
        self.paginate(&first_page, &template, limit)
            .await
            .map_err(classify)
    }

    /// Walk a paginated listing starting from its already-fetched first page
    ///
    /// Pages are requested as `url_template` followed by the pager's page
    /// token. The walk stops as soon as `limit` entries are collected, when
    /// the pager has no successor, when a page is no longer a listing, or
    /// when the pager points back at a page already seen, or when a later
    /// page is not found. A first page that is not a listing is an error, and
    /// so is any other transport failure.
    pub async fn paginate(
        &self,
        first_page: &str,
        url_template: &str,
        limit: usize,
    ) -> Result<Vec<CatalogEntry>, Failure> {
        let mut collected = Vec::new();
        let mut visited = HashSet::new();

        let page = read_listing_page(first_page)?;
        visited.extend(page.current.clone());
        let mut next = take_until_limit(&mut collected, page, limit);

        while collected.len() < limit {
            let Some(token) = next.take() else {
                break;
            };
            if !visited.insert(token.clone()) {
                warn!(token = %token, "Pager points at a page already visited");
                break;
            }

            let url = format!("{}{}", url_template, token);
            debug!(url = %url, collected = collected.len(), limit, "Following pager");
            let html = match self.fetch(&url, None).await {
                Ok(html) => html,
                Err(ScraperError::HttpError(404)) => {
                    debug!(url = %url, "Page not found, stopping");
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            match read_listing_page(&html) {
                Ok(page) => next = take_until_limit(&mut collected, page, limit),
                Err(e) => {
                    debug!(url = %url, error = %e, "Page is not a listing, stopping");
                    break;
                }
            }
        }

        Ok(collected)
    }

    /// Currently airing titles from the home page menu, at most 20
    pub async fn get_airing(&self, count: usize) -> AniKimiResult<Vec<CatalogEntry>> {
        if count > limits::MAX_AIRING_COUNT {
            return Err(AniKimiError::CountExceeded {
                requested: count,
                max: limits::MAX_AIRING_COUNT,
            });
        }
        info!(count, "Fetching airing list");
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut entries = self
            .fetch_airing()
            .await
            .map_err(|e| e.classify(Operation::Airing))?;
        entries.truncate(count);
        Ok(entries)
    }

    async fn fetch_airing(&self) -> Result<Vec<CatalogEntry>, Failure> {
        let html = self.fetch(&endpoints::home(&self.base_url), None).await?;
        Ok(parse_airing_entries(&normalize(&html))?)
    }
}

/// One listing page, reduced to what the pagination walk needs
#[derive(Debug)]
struct ListingPage {
    entries: Vec<CatalogEntry>,
    current: Option<String>,
    next: Option<String>,
}

/// A missing or malformed pager means "no further page"; a missing
/// listing container is an error.
fn read_listing_page(html: &str) -> Result<ListingPage, ParseError> {
    let document = normalize(html);
    let entries = parse_catalog_entries(&document)?;
    let current = selected_page_token(&document);
    let next = next_page_token(&document).unwrap_or_else(|e| {
        debug!(error = %e, "No usable pager, treating as last page");
        None
    });
    Ok(ListingPage {
        entries,
        current,
        next,
    })
}

/// Append entries up to `limit` and hand back the page's successor token
fn take_until_limit(
    collected: &mut Vec<CatalogEntry>,
    page: ListingPage,
    limit: usize,
) -> Option<String> {
    let room = limit.saturating_sub(collected.len());
    collected.extend(page.entries.into_iter().take(room));
    page.next
}
