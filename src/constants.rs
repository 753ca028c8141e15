//! Constants module for the AniKimi client
//!
//! Contains endpoint URL builders that use the base URL from configuration.

/// URL builder functions for all endpoints
pub mod endpoints {
    /// Home page URL (hosts the airing menu)
    pub fn home(base_url: &str) -> String {
        base_url.to_string()
    }

    /// Search URL with query parameter
    pub fn search(base_url: &str, query: &str) -> String {
        format!("{}/search.html?keyword={}", base_url, urlencoding::encode(query))
    }

    /// Category (detail) page URL
    pub fn category(base_url: &str, id: &str) -> String {
        format!("{}/category/{}", base_url, id)
    }

    /// Episode page URL
    pub fn episode(base_url: &str, id: &str, episode: u32) -> String {
        format!("{}/{}-episode-{}", base_url, id, episode)
    }

    /// Genre listing URL, still missing its page token
    pub fn genre_page_template(base_url: &str, genre: &str) -> String {
        format!("{}/genre/{}?page=", base_url, urlencoding::encode(genre))
    }
}

/// Fixed limits of the public operations
pub mod limits {
    /// The airing menu never shows more than this many entries
    pub const MAX_AIRING_COUNT: usize = 20;

    pub const DEFAULT_AIRING_COUNT: usize = 10;

    /// Three listing pages' worth
    pub const DEFAULT_GENRE_LIMIT: usize = 60;
}

/// Filter options for listings
pub mod filters {
    /// Genre slugs served under `/genre/`
    pub const GENRES: &[&str] = &[
        "action",
        "adventure",
        "cars",
        "comedy",
        "dementia",
        "demons",
        "drama",
        "dub",
        "ecchi",
        "fantasy",
        "game",
        "harem",
        "historical",
        "horror",
        "josei",
        "kids",
        "magic",
        "martial-arts",
        "mecha",
        "military",
        "music",
        "mystery",
        "parody",
        "police",
        "psychological",
        "romance",
        "samurai",
        "school",
        "sci-fi",
        "seinen",
        "shoujo",
        "shoujo-ai",
        "shounen-ai",
        "shounen",
        "slice-of-life",
        "space",
        "sports",
        "super-power",
        "supernatural",
        "thriller",
        "vampire",
        "yaoi",
        "yuri",
    ];

    pub fn is_known_genre(genre: &str) -> bool {
        GENRES.contains(&genre)
    }
}
