//! Network source abstraction.
//!
//! The loader only needs "give me the entries at this url, eventually".  That
//! contract is the [`FeedFetcher`] trait; [`RssFetcher`] is the production
//! implementation and `testing::FakeFetcher` is the scriptable double used
//! by the loader and reader tests.
//!
//! ## Adding a new source format
//!
//! 1. Create a new file in this directory (e.g. `atom.rs`).
//! 2. Implement [`FeedFetcher`] for your struct.
//! 3. Add `mod atom;` below and re-export it.
//! 4. Construct it in `main.rs` in place of (or alongside) `RssFetcher`.

mod entry;
mod rss;

pub use entry::Entry;
pub use rss::RssFetcher;

use async_trait::async_trait;

use crate::error::FetchError;

/// Anything that can turn a feed url into a list of entries.
///
/// Fetches run on spawned tokio tasks, so implementations must be
/// `Send + Sync`.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<Entry>, FetchError>;
}
