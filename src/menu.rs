//! The feed menu: a collapsible list with one item per registered feed.
//!
//! The menu holds no business logic.  Each item remembers the registry index
//! it stands for; activating an item is routed through
//! [`crate::reader::FeedReader::activate`], which issues the load.

use ratatui::widgets::ListState;

use crate::registry::FeedDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    Open,
    #[default]
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    /// Registry index loaded when this item is activated.
    pub feed_index: usize,
    /// Registered at runtime rather than part of the startup set.
    pub custom: bool,
}

#[derive(Debug, Default)]
pub struct MenuController {
    state: MenuState,
    items: Vec<MenuItem>,
    /// Highlighted item while the menu is open.
    pub list_state: ListState,
}

impl MenuController {
    pub fn new() -> Self {
        Self::default()
    }

    // -- visibility ----------------------------------------------------------

    pub fn open(&mut self) {
        self.state = MenuState::Open;
        if self.list_state.selected().is_none() && !self.items.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn close(&mut self) {
        self.state = MenuState::Closed;
    }

    pub fn toggle(&mut self) {
        match self.state {
            MenuState::Open => self.close(),
            MenuState::Closed => self.open(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    // -- items ---------------------------------------------------------------

    /// Rebuild the whole list from the registry's descriptors.
    pub fn render_list(&mut self, feeds: &[FeedDescriptor]) {
        self.items = feeds
            .iter()
            .map(|feed| MenuItem {
                label: feed.name().to_string(),
                feed_index: feed.id(),
                custom: false,
            })
            .collect();
        self.list_state.select(None);
    }

    /// Append one item for a feed registered at runtime.
    pub fn append_item(&mut self, feed: &FeedDescriptor) {
        self.items.push(MenuItem {
            label: feed.name().to_string(),
            feed_index: feed.id(),
            custom: true,
        });
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn item(&self, position: usize) -> Option<&MenuItem> {
        self.items.get(position)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    // -- navigation ----------------------------------------------------------

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.items.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(self.items.len() - 1));
        }
    }
}
