//! Command-line configuration.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;

/// Feeds registered at startup when no `--feed` is given.
pub const DEFAULT_FEEDS: &[(&str, &str)] = &[
    ("Udacity Blog", "http://blog.udacity.com/feed"),
    ("CSS Tricks", "http://feeds.feedburner.com/CssTricks"),
    ("HTML5 Rocks", "http://feeds.feedburner.com/html5rocks"),
    (
        "Linear Digressions",
        "http://feeds.feedburner.com/udacity-linear-digressions",
    ),
];

/// A `NAME=URL` feed given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSpec {
    pub name: String,
    pub url: String,
}

impl FromStr for FeedSpec {
    type Err = String;

    /// Splits on the first `=`, so urls with query strings survive intact.
    /// Empty halves are left for the registry to reject.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, url) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=URL, got `{s}`"))?;
        Ok(Self {
            name: name.to_string(),
            url: url.to_string(),
        })
    }
}

/// feedreader: browse RSS feeds in the terminal
#[derive(Parser, Debug)]
#[command(name = "feedreader", version)]
#[command(about = "Browse RSS feeds in the terminal", long_about = None)]
pub struct Config {
    /// Feed to register at startup, as NAME=URL (repeatable; replaces the defaults)
    #[arg(long = "feed", value_name = "NAME=URL")]
    pub feeds: Vec<FeedSpec>,

    /// Index of the feed loaded on startup
    #[arg(long, default_value_t = 0)]
    pub initial_feed: usize,

    /// Per-request timeout for feed downloads, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// The startup feeds as `(url, name)` pairs, in registration order.
    pub fn seed(&self) -> Vec<(String, String)> {
        if self.feeds.is_empty() {
            DEFAULT_FEEDS
                .iter()
                .map(|(name, url)| (url.to_string(), name.to_string()))
                .collect()
        } else {
            self.feeds
                .iter()
                .map(|f| (f.url.clone(), f.name.clone()))
                .collect()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
