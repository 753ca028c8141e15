//! Error handling for the AniKimi client
//!
//! Extractors and the transport raise low-level failures ([`ParseError`],
//! [`ScraperError`]) which travel up undecorated as [`Failure`]. Each public
//! operation classifies them exactly once into an [`AniKimiError`].
//!
//! Structural failures are reported as "invalid id" / "invalid genre" because
//! from the outside a nonexistent id and a changed site layout look the same.

use thiserror::Error;

use crate::parser::ParseError;
use crate::scraper::ScraperError;

/// Errors returned by every public client operation
#[derive(Debug, Error)]
pub enum AniKimiError {
    /// The search listing matched but held no entries
    #[error("No search results found for {query:?}")]
    NoSearchResults { query: String },

    /// Detail or episode page anchors were absent
    #[error("Invalid anime id {id:?}{}", episode_suffix(.episode))]
    InvalidId { id: String, episode: Option<u32> },

    /// Session tokens could not be sent with the episode request
    #[error("Invalid tokens passed, check your tokens")]
    InvalidToken,

    /// Genre listing anchors were absent or malformed
    #[error("Invalid genre {genre:?}")]
    InvalidGenre { genre: String },

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(#[source] ScraperError),

    /// Airing list requested beyond its ceiling
    #[error("Requested {requested} airing entries, at most {max} are available")]
    CountExceeded { requested: usize, max: usize },

    /// Airing menu anchors were absent
    #[error("No airing content found on the home page")]
    AiringExtraction,
}

fn episode_suffix(episode: &Option<u32>) -> String {
    episode
        .map(|n| format!(" or episode number {n}"))
        .unwrap_or_default()
}

impl AniKimiError {
    /// Whether the failure came from the network rather than the input or the markup
    pub fn is_network(&self) -> bool {
        matches!(self, AniKimiError::Network(_))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            AniKimiError::NoSearchResults { .. } => {
                "No search results found for the query".to_string()
            }
            AniKimiError::InvalidId { episode: None, .. } => "Invalid anime id given".to_string(),
            AniKimiError::InvalidId {
                episode: Some(_), ..
            } => "Invalid anime id or episode number given".to_string(),
            AniKimiError::InvalidToken => "Invalid tokens passed, check your tokens".to_string(),
            AniKimiError::InvalidGenre { .. } => "Invalid genre name or page number".to_string(),
            AniKimiError::Network(ScraperError::RateLimited) => {
                "Server is rate limiting requests, please try again later".to_string()
            }
            AniKimiError::Network(_) => {
                "Unable to connect to the server, check your connection".to_string()
            }
            AniKimiError::CountExceeded { max, .. } => {
                format!("count parameter cannot exceed {max}")
            }
            AniKimiError::AiringExtraction => {
                "No content found on the given page number".to_string()
            }
        }
    }
}

/// Public operation a failure happened in; decides how it is classified
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    Search { query: &'a str },
    Details { id: &'a str },
    EpisodeLinks { id: &'a str, episode: u32 },
    Genre { genre: &'a str },
    Airing,
}

impl Operation<'_> {
    /// The error meaning "the page did not look like what this operation expects"
    fn structural(self) -> AniKimiError {
        match self {
            Operation::Search { query } => AniKimiError::NoSearchResults {
                query: query.to_string(),
            },
            Operation::Details { id } => AniKimiError::InvalidId {
                id: id.to_string(),
                episode: None,
            },
            Operation::EpisodeLinks { id, episode } => AniKimiError::InvalidId {
                id: id.to_string(),
                episode: Some(episode),
            },
            Operation::Genre { genre } => AniKimiError::InvalidGenre {
                genre: genre.to_string(),
            },
            Operation::Airing => AniKimiError::AiringExtraction,
        }
    }
}

/// Unclassified low-level failure
#[derive(Debug, Error)]
pub enum Failure {
    #[error(transparent)]
    Transport(#[from] ScraperError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Failure {
    /// Map onto the public taxonomy for the operation that raised it
    pub fn classify(self, operation: Operation<'_>) -> AniKimiError {
        match self {
            Failure::Transport(ScraperError::InvalidCookie(_)) => AniKimiError::InvalidToken,
            Failure::Transport(ScraperError::HttpError(404)) => operation.structural(),
            Failure::Transport(e) => AniKimiError::Network(e),
            Failure::Parse(_) => operation.structural(),
        }
    }
}

/// Result type alias for client operations
pub type AniKimiResult<T> = Result<T, AniKimiError>;
