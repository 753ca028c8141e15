//! AniKimi scraper library
//!
//! Scrapes anime catalog data from a gogoanime mirror: keyword search,
//! title metadata, per-episode download and streaming links, genre listings
//! and the currently airing list.
//!
//! ```no_run
//! # async fn run() -> anikimi::AniKimiResult<()> {
//! let client = anikimi::AniKimi::new("gogoanime-token", "auth-token");
//! let results = client.search("naruto").await?;
//! let links = client.get_episode_links(&results[0].id, 1).await?;
//! println!("{:?}", links.link_720p);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod parser;
pub mod scraper;

#[cfg(test)]
mod fixtures;

pub use client::AniKimi;
pub use config::{Config, ConfigError};
pub use error::{AniKimiError, AniKimiResult};
pub use models::{CatalogEntry, MediaInfo, MediaLinks, Provider, Quality};
