//! Presentation state around the [`FeedReader`] core.
//!
//! `App` adds what only the terminal needs: the quit flag, the status line
//! and the add-feed prompt.  Every feed operation goes through the reader.

use tracing::debug;

use crate::error::FeedError;
use crate::loader::{Generation, OnComplete};
use crate::reader::FeedReader;
use crate::source::FeedFetcher;

/// Which field of the add-feed prompt is being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptField {
    Url,
    Name,
}

/// The add-feed prompt: the url is asked first, then the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub field: PromptField,
    pub url: String,
    pub name: String,
}

impl Prompt {
    fn new() -> Self {
        Self {
            field: PromptField::Url,
            url: String::new(),
            name: String::new(),
        }
    }

    pub fn buffer(&self) -> &str {
        match self.field {
            PromptField::Url => &self.url,
            PromptField::Name => &self.name,
        }
    }

    fn buffer_mut(&mut self) -> &mut String {
        match self.field {
            PromptField::Url => &mut self.url,
            PromptField::Name => &mut self.name,
        }
    }
}

pub struct App<F> {
    pub reader: FeedReader<F>,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last action's status message.
    pub status: String,
    /// Open add-feed prompt, if any.
    pub prompt: Option<Prompt>,
}

/// Completion hook handed to every load started from the UI.
fn log_completion(index: usize) -> OnComplete {
    Box::new(move || debug!(index, "load complete"))
}

impl<F: FeedFetcher + 'static> App<F> {
    pub fn new(reader: FeedReader<F>) -> Self {
        Self {
            reader,
            quit: false,
            status: "Starting…".into(),
            prompt: None,
        }
    }

    /// Load a feed by registry index.
    pub fn load(&mut self, index: usize) -> Result<Generation, FeedError> {
        let generation = self.reader.load(index, log_completion(index))?;
        self.status = self.loading_status(index);
        Ok(generation)
    }

    /// Activate the highlighted menu item.
    pub fn activate_selected(&mut self) {
        let Some(position) = self.reader.menu().selected() else {
            return;
        };
        let index = self
            .reader
            .menu()
            .item(position)
            .map(|item| item.feed_index)
            .unwrap_or(position);
        match self.reader.activate(position, log_completion(index)) {
            Ok(_) => self.status = self.loading_status(index),
            Err(e) => self.status = format!("Error: {e}"),
        }
    }

    fn loading_status(&self, index: usize) -> String {
        let name = self
            .reader
            .registry()
            .get(index)
            .map(|f| f.name())
            .unwrap_or_default();
        format!("Loading {name}…")
    }

    /// What the status bar shows: in-flight loads first, then the last
    /// transport failure, then the last action's message.
    pub fn status_line(&self) -> String {
        if self.reader.pending() > 0 {
            return self.status.clone();
        }
        if let Some(err) = self.reader.last_error() {
            return format!("Error: {err}");
        }
        if self.status.starts_with("Loading") {
            return format!("{} entries", self.reader.entries().len());
        }
        self.status.clone()
    }

    // -- add-feed prompt -----------------------------------------------------

    pub fn open_prompt(&mut self) {
        self.prompt = Some(Prompt::new());
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn prompt_push(&mut self, c: char) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.buffer_mut().push(c);
        }
    }

    pub fn prompt_backspace(&mut self) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.buffer_mut().pop();
        }
    }

    /// Advance from the url to the name field, or submit the registration.
    pub fn prompt_submit(&mut self) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        if prompt.field == PromptField::Url {
            prompt.field = PromptField::Name;
            return;
        }

        let Some(prompt) = self.prompt.take() else {
            return;
        };
        match self.reader.register(prompt.url.trim(), prompt.name.trim()) {
            Ok(id) => {
                self.status = format!("Added feed {} as #{id}", prompt.name.trim());
            }
            Err(e) => self.status = format!("Error: {e}"),
        }
    }
}
