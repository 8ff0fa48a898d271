//! Error types for the feed reader core.
//!
//! * [`FeedError`]: synchronous failures that are always surfaced to the
//!   immediate caller (bad registration input, out-of-range feed index).
//! * [`FetchError`]: transport failures from a [`crate::source::FeedFetcher`].
//!   These never reach the caller of a load: they are logged and rendered as
//!   "no new entries".

use thiserror::Error;

/// Which descriptor field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Url,
    Name,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Url => f.write_str("url"),
            Field::Name => f.write_str("name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("feed {0} must be a non-empty string")]
    Validation(Field),

    #[error("feed index {index} out of range (registry holds {len} feeds)")]
    Index { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server responded with HTTP {0}")]
    Status(u16),

    #[error("could not parse feed: {0}")]
    Parse(#[from] rss::Error),
}
