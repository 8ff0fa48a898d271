//! The visible entry list.
//!
//! `EntryRenderer` is the only writer of the entries shown on screen.  A
//! render replaces the whole list, and is accepted only when it carries the
//! latest generation issued by the shared [`GenerationClock`].

use ratatui::widgets::ListState;
use tracing::debug;

use crate::loader::{Generation, GenerationClock};
use crate::source::Entry;

pub struct EntryRenderer {
    clock: GenerationClock,
    entries: Vec<Entry>,
    /// Generation of the load currently on screen, `None` before the first
    /// accepted render.
    rendered: Option<Generation>,
    /// Scroll position within the entry list.
    pub list_state: ListState,
}

impl EntryRenderer {
    pub fn new(clock: GenerationClock) -> Self {
        Self {
            clock,
            entries: Vec::new(),
            rendered: None,
            list_state: ListState::default(),
        }
    }

    /// Replace the visible entries if `generation` is still the latest.
    ///
    /// Returns whether the render was accepted.  Stale generations are a
    /// silent no-op.
    pub fn render(&mut self, generation: Generation, entries: Vec<Entry>) -> bool {
        if !self.clock.is_current(generation) {
            debug!(
                generation = generation.value(),
                current = self.clock.current().value(),
                "discarding stale render"
            );
            return false;
        }

        self.entries = entries;
        self.rendered = Some(generation);
        self.list_state.select(None);
        true
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn rendered(&self) -> Option<Generation> {
        self.rendered
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.entries.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.entries.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.entries.is_empty() {
            self.list_state.select(Some(self.entries.len() - 1));
        }
    }
}
