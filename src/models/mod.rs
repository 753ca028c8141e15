//! Data models for the AniKimi client
//!
//! Records produced by the listing, detail and episode-page extractors.
//! All of them are plain values: once built they are never updated.

use serde::{Deserialize, Serialize};

/// One entry of a listing page (search, genre or airing)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// From the `title` attribute of the item link
    pub title: String,
    /// Catalog id derived from the item href (e.g. "naruto-shippuden")
    pub id: String,
}

impl CatalogEntry {
    pub fn new(title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
        }
    }
}

/// Metadata snapshot of one title, read from its category page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    /// From div.anime_info_body_bg h1
    pub title: String,
    /// Second token of the "Released:" line
    pub year: u32,
    /// From the "Other name:" line
    pub other_names: String,
    /// From the "Type:" line link title (e.g. "Fall 2021 Anime")
    pub season_type: String,
    /// From the "Status:" line link text
    pub status: String,
    /// From the "Genre:" line link titles, in page order
    pub genres: Vec<String>,
    /// Trailing number of the last #episode_page range; episodes published so far
    pub episode_count: u32,
    /// From div.anime_info_body_bg img
    pub image_url: String,
    /// "Plot Summary:" line with its label removed
    pub summary: String,
}

/// Direct-download resolutions offered by the episode page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Quality {
    P360,
    P480,
    P720,
    P1080,
}

impl Quality {
    pub const ALL: [Quality; 4] = [Quality::P360, Quality::P480, Quality::P720, Quality::P1080];

    /// Map a frame height in pixels to its tier
    pub fn from_height(height: u32) -> Option<Self> {
        match height {
            360 => Some(Quality::P360),
            480 => Some(Quality::P480),
            720 => Some(Quality::P720),
            1080 => Some(Quality::P1080),
            _ => None,
        }
    }

    pub fn height(self) -> u32 {
        match self {
            Quality::P360 => 360,
            Quality::P480 => 480,
            Quality::P720 => 720,
            Quality::P1080 => 1080,
        }
    }
}

/// Embed hosts listed in the episode page's alternate-source widget
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Provider {
    Streamsb,
    Xstreamcdn,
    Streamtape,
    Mixdrop,
    Mp4Upload,
    Doodstream,
}

impl Provider {
    pub const ALL: [Provider; 6] = [
        Provider::Streamsb,
        Provider::Xstreamcdn,
        Provider::Streamtape,
        Provider::Mixdrop,
        Provider::Mp4Upload,
        Provider::Doodstream,
    ];

    /// Label as rendered by the site, before the "Choose this server" suffix
    pub fn label(self) -> &'static str {
        match self {
            Provider::Streamsb => "Streamsb",
            Provider::Xstreamcdn => "Xstreamcdn",
            Provider::Streamtape => "Streamtape",
            Provider::Mixdrop => "Mixdrop",
            Provider::Mp4Upload => "Mp4Upload",
            Provider::Doodstream => "Doodstream",
        }
    }

    /// Exact match on the rendered label; unknown hosts yield `None`
    pub fn from_label(label: &str) -> Option<Self> {
        Provider::ALL.into_iter().find(|p| p.label() == label)
    }
}

/// Stream and download links for one episode
///
/// Every field is optional: a link is only present when its markup was found.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MediaLinks {
    pub link_360p: Option<String>,
    pub link_480p: Option<String>,
    pub link_720p: Option<String>,
    pub link_1080p: Option<String>,
    pub link_streamsb: Option<String>,
    pub link_xstreamcdn: Option<String>,
    pub link_streamtape: Option<String>,
    pub link_mixdrop: Option<String>,
    pub link_mp4upload: Option<String>,
    pub link_doodstream: Option<String>,
    /// Raw stream URL mined from the default source's player script
    pub fallback_stream: Option<String>,
}

impl MediaLinks {
    pub fn quality(&self, quality: Quality) -> Option<&str> {
        match quality {
            Quality::P360 => self.link_360p.as_deref(),
            Quality::P480 => self.link_480p.as_deref(),
            Quality::P720 => self.link_720p.as_deref(),
            Quality::P1080 => self.link_1080p.as_deref(),
        }
    }

    pub fn set_quality(&mut self, quality: Quality, url: String) {
        let slot = match quality {
            Quality::P360 => &mut self.link_360p,
            Quality::P480 => &mut self.link_480p,
            Quality::P720 => &mut self.link_720p,
            Quality::P1080 => &mut self.link_1080p,
        };
        *slot = Some(url);
    }

    pub fn provider(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::Streamsb => self.link_streamsb.as_deref(),
            Provider::Xstreamcdn => self.link_xstreamcdn.as_deref(),
            Provider::Streamtape => self.link_streamtape.as_deref(),
            Provider::Mixdrop => self.link_mixdrop.as_deref(),
            Provider::Mp4Upload => self.link_mp4upload.as_deref(),
            Provider::Doodstream => self.link_doodstream.as_deref(),
        }
    }

    pub fn set_provider(&mut self, provider: Provider, url: String) {
        let slot = match provider {
            Provider::Streamsb => &mut self.link_streamsb,
            Provider::Xstreamcdn => &mut self.link_xstreamcdn,
            Provider::Streamtape => &mut self.link_streamtape,
            Provider::Mixdrop => &mut self.link_mixdrop,
            Provider::Mp4Upload => &mut self.link_mp4upload,
            Provider::Doodstream => &mut self.link_doodstream,
        };
        *slot = Some(url);
    }

    /// Install the mined stream URL, replacing the 360p download link
    pub fn apply_fallback(&mut self, url: String) {
        self.link_360p = Some(url.clone());
        self.fallback_stream = Some(url);
    }

    pub fn is_empty(&self) -> bool {
        *self == MediaLinks::default()
    }
}
