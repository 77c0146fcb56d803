//! HashSet - hash-keyed, insertion order preserved

use indexmap::IndexSet;

use super::{Element, SetSize, SetVariant};

#[derive(Debug, Clone, Default)]
pub struct HashSet {
    elements: IndexSet<Element>,
}

impl HashSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }
}

impl SetSize for HashSet {
    #[inline]
    fn size(&self) -> usize {
        self.elements.len()
    }
}

impl SetVariant for HashSet {
    const CLASS_NAME: &'static str = "HashSet";

    fn insert(&mut self, element: Element) -> bool {
        self.elements.insert(element)
    }

    // Order of the remaining elements is kept.
    fn remove(&mut self, element: &Element) -> bool {
        self.elements.shift_remove(element)
    }

    fn contains(&self, element: &Element) -> bool {
        self.elements.contains(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order() {
        let mut set = HashSet::from_elements(["b", "a", "c"].map(Element::from));
        set.remove(&Element::from("a"));
        set.insert(Element::from("a"));

        let order: Vec<_> = set.iter().cloned().collect();
        assert_eq!(
            order,
            vec![Element::from("b"), Element::from("c"), Element::from("a")]
        );
    }
}
