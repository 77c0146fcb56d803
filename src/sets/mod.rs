//! Native set variants
//!
//! Design: the length binding only needs [`SetSize`]. [`SetVariant`] adds
//! the storage operations the variants share so hosts and tests can build
//! and mutate instances; none of those are published to the host class.

mod element;
mod hashed;
mod sorted;

pub use element::Element;
pub use hashed::HashSet;
pub use sorted::SortedSet;

/// Types with a cardinality
pub trait SetSize {
    fn size(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// Native set storage shared by every variant
pub trait SetVariant: SetSize + Default + Send + 'static {
    /// Default host class name
    const CLASS_NAME: &'static str;

    /// Add `element`; false when an equivalent element is already present
    fn insert(&mut self, element: Element) -> bool;

    /// Remove `element`; false when it was absent
    fn remove(&mut self, element: &Element) -> bool;

    fn contains(&self, element: &Element) -> bool;

    fn from_elements<I: IntoIterator<Item = Element>>(elements: I) -> Self {
        let mut set = Self::default();
        for element in elements {
            set.insert(element);
        }
        set
    }
}

impl<T> SetSize for [T] {
    #[inline]
    fn size(&self) -> usize {
        self.len()
    }
}

impl<T> SetSize for Vec<T> {
    #[inline]
    fn size(&self) -> usize {
        self.len()
    }
}

impl<T> SetSize for std::collections::BTreeSet<T> {
    #[inline]
    fn size(&self) -> usize {
        self.len()
    }
}

impl<T, S> SetSize for std::collections::HashSet<T, S> {
    #[inline]
    fn size(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_variant<T: SetVariant>() {
        let mut set = T::default();
        assert!(set.is_empty());

        assert!(set.insert(Element::from(42)));
        assert_eq!(set.size(), 1);

        assert!(!set.insert(Element::from(42)));
        assert_eq!(set.size(), 1);

        assert!(set.insert(Element::from("hello")));
        assert_eq!(set.size(), 2);
        assert!(set.contains(&Element::from("hello")));

        assert!(set.remove(&Element::from(42)));
        assert!(!set.remove(&Element::from(42)));
        assert_eq!(set.size(), 1);
    }

    #[test]
    fn test_sorted_set_storage() {
        check_variant::<SortedSet>();
    }

    #[test]
    fn test_hash_set_storage() {
        check_variant::<HashSet>();
    }

    #[test]
    fn test_from_elements_collapses_duplicates() {
        let set = SortedSet::from_elements([1, 2, 2, 3, 1].map(Element::from));
        assert_eq!(set.size(), 3);
    }

    #[test]
    fn test_std_impls() {
        assert_eq!(SetSize::size(&vec![1, 2, 3]), 3);
        assert!(SetSize::is_empty(&std::collections::BTreeSet::<u8>::new()));
    }
}
