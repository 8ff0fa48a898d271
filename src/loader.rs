//! Asynchronous feed loading.
//!
//! [`FeedLoader::load`] stamps each request with a fresh [`Generation`],
//! spawns the fetch on the tokio runtime and returns immediately.  When the
//! fetch settles, a [`LoadSettled`] record is posted back over a channel to
//! whoever owns the display (see [`crate::reader::FeedReader::settle`]).
//! Only the owner ever touches the display, so the generation stamp is the
//! whole race policy: a settlement whose generation is no longer current is
//! stale and its entries are dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::registry::FeedDescriptor;
use crate::source::{Entry, FeedFetcher};

/// Completion signal for one load.  Fires exactly once, success or failure.
pub type OnComplete = Box<dyn FnOnce() + Send>;

/// Monotonic stamp attached to each issued load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Issues generations and remembers the latest one.
///
/// Clones share the same counter.  `Generation(0)` is never issued, so a
/// fresh clock has no current load.
#[derive(Debug, Clone, Default)]
pub struct GenerationClock {
    latest: Arc<AtomicU64>,
}

impl GenerationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn current(&self) -> Generation {
        Generation(self.latest.load(Ordering::SeqCst))
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.current() == generation
    }
}

/// The outcome of one fetch, correlated with the request that started it.
pub struct LoadSettled {
    pub generation: Generation,
    pub index: usize,
    pub outcome: Result<Vec<Entry>, FetchError>,
    pub on_complete: OnComplete,
}

impl std::fmt::Debug for LoadSettled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadSettled")
            .field("generation", &self.generation)
            .field("index", &self.index)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

pub struct FeedLoader<F> {
    fetcher: Arc<F>,
    clock: GenerationClock,
    tx: UnboundedSender<LoadSettled>,
}

impl<F: FeedFetcher + 'static> FeedLoader<F> {
    /// Create a loader and the receiving end its settlements arrive on.
    pub fn new(fetcher: Arc<F>, clock: GenerationClock) -> (Self, UnboundedReceiver<LoadSettled>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { fetcher, clock, tx }, rx)
    }

    /// Start fetching `feed`.  Must be called from within a tokio runtime.
    ///
    /// Index validation is the caller's job (it holds the registry); by the
    /// time a descriptor reaches here the load is committed and
    /// `on_complete` will be delivered with the settlement.
    pub fn load(&self, feed: &FeedDescriptor, on_complete: OnComplete) -> Generation {
        let generation = self.clock.issue();
        let index = feed.id();
        let url = feed.url().to_string();
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();

        debug!(generation = generation.value(), index, %url, "load issued");

        tokio::spawn(async move {
            let outcome = fetcher.fetch(&url).await;
            let settled = LoadSettled {
                generation,
                index,
                outcome,
                on_complete,
            };
            if tx.send(settled).is_err() {
                // The owner has gone away; nobody is left to notify.
                warn!(generation = generation.value(), index, "settlement dropped, receiver closed");
            }
        });

        generation
    }

    pub fn clock(&self) -> &GenerationClock {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FeedRegistry;
    use crate::source::testing::FakeFetcher;

    fn registry() -> FeedRegistry {
        let mut registry = FeedRegistry::new();
        registry.add("http://x/tech.xml", "Tech").unwrap();
        registry.add("http://x/news.xml", "News").unwrap();
        registry
    }

    #[test]
    fn clock_starts_with_no_current_generation() {
        let clock = GenerationClock::new();
        assert_eq!(clock.current().value(), 0);
    }

    #[test]
    fn clock_issues_increasing_generations() {
        let clock = GenerationClock::new();
        let a = clock.issue();
        let b = clock.issue();
        assert!(b > a);
        assert!(clock.is_current(b));
        assert!(!clock.is_current(a));
    }

    #[test]
    fn clock_clones_share_counter() {
        let clock = GenerationClock::new();
        let other = clock.clone();
        let g = other.issue();
        assert!(clock.is_current(g));
    }

    #[tokio::test]
    async fn load_posts_settlement_with_entries() {
        let fetcher = Arc::new(FakeFetcher::new().with_entries("http://x/news.xml", &["a", "b"]));
        let (loader, mut rx) = FeedLoader::new(Arc::clone(&fetcher), GenerationClock::new());
        let registry = registry();

        let generation = loader.load(registry.get(1).unwrap(), Box::new(|| {}));
        let settled = rx.recv().await.unwrap();

        assert_eq!(settled.generation, generation);
        assert_eq!(settled.index, 1);
        assert_eq!(settled.outcome.unwrap().len(), 2);
        assert_eq!(fetcher.calls(), vec!["http://x/news.xml".to_string()]);
    }

    #[tokio::test]
    async fn load_posts_settlement_on_failure() {
        let fetcher = Arc::new(FakeFetcher::new().failing("http://x/tech.xml"));
        let (loader, mut rx) = FeedLoader::new(fetcher, GenerationClock::new());
        let registry = registry();

        loader.load(registry.get(0).unwrap(), Box::new(|| {}));
        let settled = rx.recv().await.unwrap();

        assert!(matches!(settled.outcome, Err(FetchError::Status(502))));
    }

    #[tokio::test]
    async fn each_load_gets_a_newer_generation() {
        let fetcher = Arc::new(FakeFetcher::new());
        let clock = GenerationClock::new();
        let (loader, _rx) = FeedLoader::new(fetcher, clock.clone());
        let registry = registry();

        let first = loader.load(registry.get(0).unwrap(), Box::new(|| {}));
        let second = loader.load(registry.get(1).unwrap(), Box::new(|| {}));

        assert!(second > first);
        assert!(clock.is_current(second));
        assert!(loader.clock().is_current(second));
    }
}
