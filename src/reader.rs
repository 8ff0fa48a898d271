//! The feed reader core: registry, loader, renderer and menu wired together.
//!
//! `FeedReader` is owned by a single event loop.  [`FeedReader::load`] and
//! [`FeedReader::activate`] return as soon as the fetch is spawned; the loop
//! later hands each [`LoadSettled`] it receives to [`FeedReader::settle`],
//! which is the only place the visible entries change.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

use crate::error::FeedError;
use crate::loader::{FeedLoader, Generation, GenerationClock, LoadSettled, OnComplete};
use crate::menu::MenuController;
use crate::registration;
use crate::registry::FeedRegistry;
use crate::renderer::EntryRenderer;
use crate::source::{Entry, FeedFetcher};

const DEFAULT_HEADING: &str = "Feeds";

pub struct FeedReader<F> {
    registry: FeedRegistry,
    loader: FeedLoader<F>,
    renderer: EntryRenderer,
    menu: MenuController,
    /// Name of the feed whose entries are on screen.
    heading: String,
    /// Loads issued whose settlement has not been applied yet.
    pending: usize,
    /// Most recent swallowed transport failure for the current load.
    last_error: Option<String>,
}

impl<F: FeedFetcher + 'static> FeedReader<F> {
    /// Seed the registry with `(url, name)` pairs and render the menu.
    ///
    /// Fails with the first validation error in `seed`.
    pub fn new<I, U, N>(
        seed: I,
        fetcher: Arc<F>,
    ) -> Result<(Self, UnboundedReceiver<LoadSettled>), FeedError>
    where
        I: IntoIterator<Item = (U, N)>,
        U: Into<String>,
        N: Into<String>,
    {
        let mut registry = FeedRegistry::new();
        for (url, name) in seed {
            registry.add(url, name)?;
        }

        let clock = GenerationClock::new();
        let (loader, rx) = FeedLoader::new(fetcher, clock.clone());
        let mut menu = MenuController::new();
        menu.render_list(registry.all());

        let reader = Self {
            registry,
            loader,
            renderer: EntryRenderer::new(clock),
            menu,
            heading: DEFAULT_HEADING.to_string(),
            pending: 0,
            last_error: None,
        };
        Ok((reader, rx))
    }

    /// Start loading the feed at `index`.
    ///
    /// An out-of-range index fails before anything is spawned and
    /// `on_complete` is dropped without being called.
    pub fn load(&mut self, index: usize, on_complete: OnComplete) -> Result<Generation, FeedError> {
        let feed = self.registry.get(index)?;
        let generation = self.loader.load(feed, on_complete);
        self.pending += 1;
        Ok(generation)
    }

    /// Apply one settlement: render if still current, then signal completion.
    pub fn settle(&mut self, settled: LoadSettled) {
        let on_complete = self.apply(settled);
        on_complete();
    }

    /// Make the render decision for `settled` and hand back its completion
    /// hook, not yet called.
    fn apply(&mut self, settled: LoadSettled) -> OnComplete {
        let LoadSettled {
            generation,
            index,
            outcome,
            on_complete,
        } = settled;
        self.pending = self.pending.saturating_sub(1);
        let name = self
            .registry
            .get(index)
            .map(|f| f.name().to_string())
            .unwrap_or_default();

        match outcome {
            Ok(entries) => {
                let count = entries.len();
                if self.renderer.render(generation, entries) {
                    debug!(generation = generation.value(), index, count, "rendered feed");
                    self.heading = name;
                    self.last_error = None;
                }
            }
            Err(err) => {
                warn!(generation = generation.value(), index, error = %err, "feed fetch failed");
                if self.loader.clock().is_current(generation) {
                    self.last_error = Some(format!("{name}: {err}"));
                }
            }
        }

        on_complete
    }

    /// Register a new feed and add its menu item.
    pub fn register(
        &mut self,
        url: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<usize, FeedError> {
        registration::register(&mut self.registry, &mut self.menu, url, name)
    }

    /// Activate the menu item at `position`: close the menu and load its feed.
    pub fn activate(
        &mut self,
        position: usize,
        on_complete: OnComplete,
    ) -> Result<Generation, FeedError> {
        let index = self
            .menu
            .item(position)
            .map(|item| item.feed_index)
            .ok_or(FeedError::Index {
                index: position,
                len: self.menu.len(),
            })?;
        self.menu.close();
        self.load(index, on_complete)
    }

    pub fn registry(&self) -> &FeedRegistry {
        &self.registry
    }

    pub fn menu(&self) -> &MenuController {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut MenuController {
        &mut self.menu
    }

    pub fn renderer(&self) -> &EntryRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut EntryRenderer {
        &mut self.renderer
    }

    pub fn entries(&self) -> &[Entry] {
        self.renderer.entries()
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
