//! RSS fetcher.
//!
//! Downloads a feed over HTTP with [`reqwest`] and parses it with the
//! [`rss`] crate.  Parsing is split out into [`RssFetcher::parse_channel`] so
//! it can be tested without touching the network.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{Entry, FeedFetcher};
use crate::error::FetchError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetches RSS 2.0 documents over HTTP.
pub struct RssFetcher {
    client: reqwest::Client,
}

impl RssFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Convert an already-parsed channel into entries, keeping document order.
    pub fn parse_channel(channel: &rss::Channel) -> Vec<Entry> {
        channel
            .items()
            .iter()
            .map(|item| {
                let published = item
                    .pub_date()
                    .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
                    .map(|dt| dt.with_timezone(&Utc));

                Entry {
                    title: item.title().unwrap_or("(untitled)").to_string(),
                    link: item.link().map(String::from),
                    snippet: item.description().map(String::from),
                    published,
                }
            })
            .collect()
    }
}

#[async_trait]
impl FeedFetcher for RssFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<Entry>, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let channel = rss::Channel::read_from(body.as_ref())?;
        let entries = Self::parse_channel(&channel);
        debug!(url, count = entries.len(), "parsed feed");
        Ok(entries)
    }
}
