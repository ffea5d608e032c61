//! Tri-state container for conditionally hydrated nested collections.

use serde::{Deserialize, Serialize};

/// A nested collection that may or may not have been included in a response.
///
/// The remote service omits nested collections (invoice line items, journal
/// lines, contact-group members) from list and search responses and only
/// includes them on single-item fetches. A plain `Vec` cannot express the
/// difference between "the service confirmed this collection is empty" and
/// "the service never sent it", so nested collections are decoded into this
/// tri-state instead:
///
/// - [`Loadable::NotLoaded`] — the producing operation does not include this
///   collection; its contents are unknown and a follow-up fetch is required.
/// - [`Loadable::Loaded`] — the collection was included; an empty `Vec` is
///   confirmed emptiness.
///
/// Which state a decoded field ends up in is decided by the hydration flags
/// the dispatcher derives from the request signature, never by whether the
/// wrapper tag happened to appear in the document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Loadable<T> {
    /// Not included in the producing response; contents unknown.
    #[default]
    NotLoaded,
    /// Included in the producing response; an empty `Vec` is genuine.
    Loaded(Vec<T>),
}

impl<T> Loadable<T> {
    /// Returns `true` if the collection was included in the response.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Returns the items if loaded, `None` otherwise.
    #[must_use]
    pub fn items(&self) -> Option<&[T]> {
        match self {
            Self::NotLoaded => None,
            Self::Loaded(items) => Some(items),
        }
    }

    /// Returns the items if loaded, consuming the container.
    #[must_use]
    pub fn into_items(self) -> Option<Vec<T>> {
        match self {
            Self::NotLoaded => None,
            Self::Loaded(items) => Some(items),
        }
    }

    /// Number of loaded items; `None` when the collection was not loaded.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        self.items().map(<[T]>::len)
    }

    /// Returns `true` when loaded and empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }
}

impl<T> From<Vec<T>> for Loadable<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Loaded(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_distinguish_not_loaded_from_empty() {
        let not_loaded: Loadable<i32> = Loadable::NotLoaded;
        let empty: Loadable<i32> = Loadable::Loaded(vec![]);

        assert!(!not_loaded.is_loaded());
        assert!(empty.is_loaded());
        assert_ne!(not_loaded, empty);
        assert_eq!(not_loaded.items(), None);
        assert_eq!(empty.items(), Some(&[][..]));
    }

    #[test]
    fn test_should_report_len_only_when_loaded() {
        let loaded = Loadable::Loaded(vec![1, 2, 3]);
        assert_eq!(loaded.len(), Some(3));
        assert!(!loaded.is_empty());

        let not_loaded: Loadable<i32> = Loadable::NotLoaded;
        assert_eq!(not_loaded.len(), None);
        assert!(!not_loaded.is_empty());
    }
}
