//! The entry type produced by every feed fetch.
//!
//! An `Entry` is pass-through payload: the core never inspects it beyond
//! handing it to the display in the order the fetch produced it.

use chrono::{DateTime, Utc};

/// A single feed entry, normalised from the source format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Human-readable headline.
    pub title: String,

    /// URL to the full content.
    pub link: Option<String>,

    /// Short summary shown under the headline.
    pub snippet: Option<String>,

    /// Publication timestamp, if the source provided a parseable one.
    pub published: Option<DateTime<Utc>>,
}

impl Entry {
    /// The timestamp column shown beside the title.
    pub fn date_label(&self) -> String {
        self.published
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "no date".into())
    }
}

#[cfg(test)]
impl Entry {
    /// An entry with only a title, as the test doubles hand out.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: None,
            snippet: None,
            published: None,
        }
    }
}
