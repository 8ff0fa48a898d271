//! The feed registry: an ordered, append-only list of feed descriptors.
//!
//! A feed's position in the registry is its address everywhere else in the
//! application (the loader, the menu).  Because nothing is ever removed, the
//! id handed out by [`FeedRegistry::add`] always equals that position.

use crate::error::{FeedError, Field};

/// Identity record for one subscribable feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDescriptor {
    id: usize,
    url: String,
    name: String,
}

impl FeedDescriptor {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Default)]
pub struct FeedRegistry {
    feeds: Vec<FeedDescriptor>,
}

impl FeedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a feed, returning its id.
    ///
    /// The url is checked before the name; on failure the registry is left
    /// untouched.  Whitespace-only values count as empty.  Duplicate urls or
    /// names are allowed: only ids are unique.
    pub fn add(
        &mut self,
        url: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<usize, FeedError> {
        let url = url.into();
        let name = name.into();

        if url.trim().is_empty() {
            return Err(FeedError::Validation(Field::Url));
        }
        if name.trim().is_empty() {
            return Err(FeedError::Validation(Field::Name));
        }

        let id = self.feeds.len();
        self.feeds.push(FeedDescriptor { id, url, name });
        Ok(id)
    }

    pub fn get(&self, index: usize) -> Result<&FeedDescriptor, FeedError> {
        self.feeds.get(index).ok_or(FeedError::Index {
            index,
            len: self.feeds.len(),
        })
    }

    /// Read-only view of every feed in insertion order.
    pub fn all(&self) -> &[FeedDescriptor] {
        &self.feeds
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seeded() -> FeedRegistry {
        let mut registry = FeedRegistry::new();
        registry.add("http://x/tech.xml", "Tech").unwrap();
        registry
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = FeedRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.all().is_empty());
    }

    #[test]
    fn add_assigns_dense_ids_in_order() {
        let mut registry = FeedRegistry::new();
        assert_eq!(registry.add("http://a", "A").unwrap(), 0);
        assert_eq!(registry.add("http://b", "B").unwrap(), 1);
        assert_eq!(registry.add("http://c", "C").unwrap(), 2);

        let ids: Vec<usize> = registry.all().iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn add_rejects_empty_url() {
        let mut registry = seeded();
        assert_eq!(
            registry.add("", "News"),
            Err(FeedError::Validation(Field::Url))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn add_rejects_empty_name() {
        let mut registry = seeded();
        assert_eq!(
            registry.add("http://x/news.xml", ""),
            Err(FeedError::Validation(Field::Name))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn add_rejects_whitespace_only_values() {
        let mut registry = seeded();
        assert!(registry.add("   ", "News").is_err());
        assert!(registry.add("http://x/news.xml", "\t\n").is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn url_is_checked_before_name() {
        let mut registry = FeedRegistry::new();
        assert_eq!(registry.add("", ""), Err(FeedError::Validation(Field::Url)));
    }

    #[test]
    fn duplicate_urls_get_distinct_ids() {
        let mut registry = seeded();
        let id = registry.add("http://x/tech.xml", "Tech").unwrap();
        assert_eq!(id, 1);
        assert_eq!(registry.get(0).unwrap().url(), registry.get(1).unwrap().url());
    }

    #[test]
    fn get_returns_descriptor() {
        let registry = seeded();
        let feed = registry.get(0).unwrap();
        assert_eq!(feed.id(), 0);
        assert_eq!(feed.url(), "http://x/tech.xml");
        assert_eq!(feed.name(), "Tech");
    }

    #[test]
    fn get_out_of_range_is_index_error() {
        let registry = seeded();
        assert_eq!(
            registry.get(1).unwrap_err(),
            FeedError::Index { index: 1, len: 1 }
        );
        assert!(registry.get(usize::MAX).is_err());
    }

    #[test]
    fn cloned_view_does_not_alias_registry() {
        let registry = seeded();
        let mut copy = registry.all().to_vec();
        copy.clear();
        assert_eq!(registry.len(), 1);
    }

    proptest! {
        #[test]
        fn add_grows_by_one_and_returns_previous_len(
            pairs in proptest::collection::vec(("[a-z]{1,12}", "[A-Za-z ]{0,4}[A-Za-z]"), 0..16)
        ) {
            let mut registry = FeedRegistry::new();
            for (url, name) in pairs {
                let before = registry.len();
                let id = registry.add(format!("http://{url}"), name).unwrap();
                prop_assert_eq!(id, before);
                prop_assert_eq!(registry.len(), before + 1);
            }
        }

        #[test]
        fn empty_field_never_mutates(name in "[A-Za-z]{1,8}", blank in " {0,3}") {
            let mut registry = seeded();
            prop_assert!(registry.add(blank.clone(), name.clone()).is_err());
            prop_assert!(registry.add("http://x/y", blank).is_err());
            prop_assert_eq!(registry.len(), 1);
        }

        #[test]
        fn get_fails_exactly_outside_bounds(len in 0usize..8, index in 0usize..16) {
            let mut registry = FeedRegistry::new();
            for i in 0..len {
                registry.add(format!("http://x/{i}"), format!("Feed {i}")).unwrap();
            }
            prop_assert_eq!(registry.get(index).is_ok(), index < len);
        }
    }
}
