//! Animation picker state: saved, trending and search collections.
//!
//! The drawer never talks to the network itself. Searches go through an
//! [`AnimationSearch`] backend supplied by the host; the drawer only tracks
//! which collection is visible and where each search left off.

use serde::{Deserialize, Serialize};

use crate::config::DrawerConfig;
use crate::error::EditError;
use crate::state::MediaRef;

/// One pickable animation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Animation {
    pub id: i64,
    pub media: MediaRef,
}

impl Animation {
    pub fn new(id: i64, media: MediaRef) -> Self {
        Self { id, media }
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchPage {
    pub items: Vec<Animation>,
    /// Opaque offset of the next page; empty when there is none
    pub next_offset: String,
}

/// Search backend, e.g. an inline bot.
pub trait AnimationSearch {
    /// Fetch the page of results for `query` starting at `offset`.
    ///
    /// An empty query asks for trending animations.
    fn search(&mut self, query: &str, offset: &str) -> Result<SearchPage, EditError>;
}

/// What a collection holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationSet {
    /// The user's saved animations, pushed by the host.
    Saved,
    /// Trending results, an empty-query search.
    Trending,
    Search { query: String },
}

impl AnimationSet {
    /// Query sent to the backend, if this set is search-backed.
    pub fn query(&self) -> Option<&str> {
        match self {
            AnimationSet::Saved => None,
            AnimationSet::Trending => Some(""),
            AnimationSet::Search { query } => Some(query),
        }
    }
}

/// Where a search collection will resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCursor {
    pub offset: String,
    pub has_more: bool,
}

impl Default for SearchCursor {
    fn default() -> Self {
        Self {
            offset: String::new(),
            has_more: true,
        }
    }
}

/// An ordered list of animations plus its paging cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationCollection {
    set: AnimationSet,
    items: Vec<Animation>,
    cursor: SearchCursor,
    revision: u64,
}

impl AnimationCollection {
    pub fn new(set: AnimationSet) -> Self {
        let cursor = match set {
            AnimationSet::Saved => SearchCursor {
                offset: String::new(),
                has_more: false,
            },
            _ => SearchCursor::default(),
        };
        Self {
            set,
            items: Vec::new(),
            cursor,
            revision: 0,
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self::new(AnimationSet::Search {
            query: query.into(),
        })
    }

    pub fn set(&self) -> &AnimationSet {
        &self.set
    }

    /// Stable identifier, used by the host as a cache key.
    pub fn name(&self) -> &str {
        match &self.set {
            AnimationSet::Saved => "saved",
            AnimationSet::Trending => "trending",
            AnimationSet::Search { query } => query,
        }
    }

    /// Label shown on the set's tab.
    pub fn title(&self) -> &str {
        match &self.set {
            AnimationSet::Saved => "Recent",
            AnimationSet::Trending => "Trending",
            AnimationSet::Search { query } => query,
        }
    }

    pub fn items(&self) -> &[Animation] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> &SearchCursor {
        &self.cursor
    }

    pub fn has_more(&self) -> bool {
        self.cursor.has_more
    }

    /// Bumped whenever the host should re-render this collection.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Item key for virtualized lists: the animation id as text.
    pub fn key_from_index(&self, index: usize) -> Option<String> {
        self.items.get(index).map(|item| item.id.to_string())
    }

    pub fn index_from_key(&self, key: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.id.to_string() == key)
    }

    /// Replace every item. Used for the saved set.
    pub fn replace_with(&mut self, items: Vec<Animation>) {
        self.items = items;
        self.touch();
    }

    /// Ask the host to re-render without touching items or cursor.
    pub fn reset(&mut self) {
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Fetch the next page and append it.
    ///
    /// Returns the number of items added. A backend error or an empty next
    /// offset ends paging; non-search collections never page.
    pub fn load_more(&mut self, backend: &mut dyn AnimationSearch) -> usize {
        if !self.cursor.has_more {
            return 0;
        }
        let Some(query) = self.set.query() else {
            self.cursor.has_more = false;
            return 0;
        };

        match backend.search(query, &self.cursor.offset) {
            Ok(page) => {
                let added = page.items.len();
                self.items.extend(page.items);
                self.cursor.has_more = !page.next_offset.is_empty();
                self.cursor.offset = page.next_offset;
                if added > 0 {
                    self.touch();
                }
                added
            }
            Err(err) => {
                log::warn!("Animation search for {:?} failed: {}", query, err);
                self.cursor.has_more = false;
                0
            }
        }
    }
}

/// The drawer: a fixed row of sets plus an optional free-text search.
#[derive(Debug, Clone)]
pub struct AnimationDrawer {
    sets: Vec<AnimationCollection>,
    selected: usize,
    search: Option<AnimationCollection>,
}

impl AnimationDrawer {
    /// Saved, Trending, then one search set per configured reaction.
    pub fn new(config: &DrawerConfig) -> Self {
        let mut sets = vec![
            AnimationCollection::new(AnimationSet::Saved),
            AnimationCollection::new(AnimationSet::Trending),
        ];
        sets.extend(config.reactions.iter().map(AnimationCollection::search));

        Self {
            sets,
            selected: 0,
            search: None,
        }
    }

    pub fn sets(&self) -> &[AnimationCollection] {
        &self.sets
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &AnimationCollection {
        &self.sets[self.selected]
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    /// The collection currently on screen.
    pub fn items(&self) -> &AnimationCollection {
        self.search
            .as_ref()
            .unwrap_or(&self.sets[self.selected])
    }

    /// Host pushed a new list of saved animations.
    pub fn replace_saved(&mut self, items: Vec<Animation>) {
        if let Some(saved) = self
            .sets
            .iter_mut()
            .find(|set| set.set == AnimationSet::Saved)
        {
            saved.replace_with(items);
        }
    }

    /// Show the set at `index`, leaving any search.
    ///
    /// Returns `false` for an out-of-range index or when the set is already
    /// shown.
    pub fn select(&mut self, index: usize, backend: &mut dyn AnimationSearch) -> bool {
        if index >= self.sets.len() || (index == self.selected && self.search.is_none()) {
            return false;
        }
        self.search = None;
        self.selected = index;
        Self::activate(&mut self.sets[index], backend);
        true
    }

    /// Search for `query`, or return to the selected set when it is blank.
    pub fn find(&mut self, query: &str, backend: &mut dyn AnimationSearch) -> bool {
        if query.trim().is_empty() {
            if self.search.take().is_none() {
                return false;
            }
            Self::activate(&mut self.sets[self.selected], backend);
            return true;
        }

        let collection = self.search.insert(AnimationCollection::search(query));
        Self::activate(collection, backend);
        true
    }

    /// Load the next page of whatever is on screen.
    pub fn load_more(&mut self, backend: &mut dyn AnimationSearch) -> usize {
        match self.search.as_mut() {
            Some(search) => search.load_more(backend),
            None => self.sets[self.selected].load_more(backend),
        }
    }

    fn activate(collection: &mut AnimationCollection, backend: &mut dyn AnimationSearch) {
        if collection.set.query().is_some() && collection.is_empty() {
            collection.load_more(backend);
        } else {
            collection.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serves `pages` pages of two items per query, recording each call.
    struct FakeBackend {
        pages: usize,
        calls: Vec<(String, String)>,
        fail: bool,
    }

    impl FakeBackend {
        fn new(pages: usize) -> Self {
            Self {
                pages,
                calls: Vec::new(),
                fail: false,
            }
        }
    }

    impl AnimationSearch for FakeBackend {
        fn search(&mut self, query: &str, offset: &str) -> Result<SearchPage, EditError> {
            self.calls.push((query.to_string(), offset.to_string()));
            if self.fail {
                return Err(EditError::Search("bot unavailable".to_string()));
            }

            let page: usize = if offset.is_empty() { 0 } else { offset.parse().unwrap() };
            let base = (page * 2) as i64;
            let items = (base..base + 2)
                .map(|id| Animation::new(id, MediaRef::video(format!("{query}-{id}"))))
                .collect();
            let next_offset = if page + 1 < self.pages {
                (page + 1).to_string()
            } else {
                String::new()
            };
            Ok(SearchPage { items, next_offset })
        }
    }

    #[test]
    fn test_default_sets() {
        let drawer = AnimationDrawer::new(&DrawerConfig::default());
        assert_eq!(drawer.sets().len(), 14);
        assert_eq!(drawer.selected_index(), 0);
        assert_eq!(drawer.selected().set(), &AnimationSet::Saved);
        assert_eq!(drawer.sets()[1].name(), "trending");
        assert_eq!(drawer.sets()[2].title(), "\u{1F44D}");
        assert!(!drawer.is_searching());
    }

    #[test]
    fn test_paging_until_exhausted() {
        let mut backend = FakeBackend::new(2);
        let mut collection = AnimationCollection::search("cats");

        assert_eq!(collection.load_more(&mut backend), 2);
        assert!(collection.has_more());
        assert_eq!(collection.cursor().offset, "1");

        assert_eq!(collection.load_more(&mut backend), 2);
        assert!(!collection.has_more());
        assert_eq!(collection.len(), 4);

        assert_eq!(collection.load_more(&mut backend), 0);
        assert_eq!(backend.calls.len(), 2);
        assert_eq!(backend.calls[1], ("cats".to_string(), "1".to_string()));
    }

    #[test]
    fn test_backend_error_stops_paging() {
        let mut backend = FakeBackend::new(5);
        backend.fail = true;
        let mut collection = AnimationCollection::new(AnimationSet::Trending);
        assert_eq!(collection.load_more(&mut backend), 0);
        assert!(!collection.has_more());
        assert_eq!(backend.calls, vec![(String::new(), String::new())]);
    }

    #[test]
    fn test_saved_never_pages() {
        let mut backend = FakeBackend::new(5);
        let mut saved = AnimationCollection::new(AnimationSet::Saved);
        assert_eq!(saved.load_more(&mut backend), 0);
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn test_keys() {
        let mut saved = AnimationCollection::new(AnimationSet::Saved);
        saved.replace_with(vec![
            Animation::new(42, MediaRef::video("a")),
            Animation::new(-7, MediaRef::video("b")),
        ]);
        assert_eq!(saved.key_from_index(1).as_deref(), Some("-7"));
        assert_eq!(saved.key_from_index(2), None);
        assert_eq!(saved.index_from_key("42"), Some(0));
        assert_eq!(saved.index_from_key("9"), None);
    }

    #[test]
    fn test_select_loads_empty_search_set() {
        let mut backend = FakeBackend::new(3);
        let mut drawer = AnimationDrawer::new(&DrawerConfig::default());

        assert!(drawer.select(1, &mut backend));
        assert_eq!(drawer.items().len(), 2);
        assert_eq!(backend.calls.len(), 1);

        // Re-selecting is a no-op
        assert!(!drawer.select(1, &mut backend));

        // Coming back to a loaded set re-announces it instead of fetching
        assert!(drawer.select(0, &mut backend));
        assert!(drawer.select(1, &mut backend));
        assert_eq!(backend.calls.len(), 1);
        assert_eq!(drawer.items().revision(), 2);

        assert!(!drawer.select(99, &mut backend));
    }

    #[test]
    fn test_find_and_clear() {
        let mut backend = FakeBackend::new(1);
        let mut drawer = AnimationDrawer::new(&DrawerConfig::default());
        drawer.replace_saved(vec![Animation::new(1, MediaRef::video("saved"))]);

        assert!(drawer.find("dogs", &mut backend));
        assert!(drawer.is_searching());
        assert_eq!(drawer.items().name(), "dogs");
        assert_eq!(drawer.items().len(), 2);

        assert!(drawer.find("   ", &mut backend));
        assert!(!drawer.is_searching());
        assert_eq!(drawer.items().set(), &AnimationSet::Saved);
        assert_eq!(drawer.items().len(), 1);

        assert!(!drawer.find("", &mut backend));
    }

    #[test]
    fn test_select_leaves_search() {
        let mut backend = FakeBackend::new(1);
        let mut drawer = AnimationDrawer::new(&DrawerConfig::default());
        drawer.find("dogs", &mut backend);

        // Selecting the current set still exits the search
        assert!(drawer.select(0, &mut backend));
        assert!(!drawer.is_searching());
    }

    #[test]
    fn test_drawer_load_more_follows_visible() {
        let mut backend = FakeBackend::new(3);
        let mut drawer = AnimationDrawer::new(&DrawerConfig::default());
        drawer.find("owls", &mut backend);
        assert_eq!(drawer.load_more(&mut backend), 2);
        assert_eq!(drawer.items().len(), 4);
        assert!(drawer.selected().is_empty());
    }
}
