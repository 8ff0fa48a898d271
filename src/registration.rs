//! Registering feeds at runtime.
//!
//! A registration is the registry append plus the matching menu item.  It is
//! synchronous: when [`register`] returns, the menu already holds one item
//! per registered feed and the new item can be activated straight away.

use tracing::info;

use crate::error::FeedError;
use crate::menu::MenuController;
use crate::registry::FeedRegistry;

/// Add a feed and its menu item, returning the new feed's id.
///
/// Validation errors from the registry are returned unchanged and leave both
/// the registry and the menu untouched.
pub fn register(
    registry: &mut FeedRegistry,
    menu: &mut MenuController,
    url: impl Into<String>,
    name: impl Into<String>,
) -> Result<usize, FeedError> {
    let id = registry.add(url, name)?;
    let feed = registry.get(id)?;
    menu.append_item(feed);

    info!(id, name = feed.name(), url = feed.url(), "registered feed");
    debug_assert_eq!(menu.len(), registry.len());
    Ok(id)
}
