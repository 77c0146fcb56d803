//! SortedSet - value-keyed, ascending element order

use std::collections::BTreeSet;

use super::{Element, SetSize, SetVariant};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedSet {
    elements: BTreeSet<Element>,
}

impl SortedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn first(&self) -> Option<&Element> {
        self.elements.first()
    }

    pub fn last(&self) -> Option<&Element> {
        self.elements.last()
    }
}

impl SetSize for SortedSet {
    #[inline]
    fn size(&self) -> usize {
        self.elements.len()
    }
}

impl SetVariant for SortedSet {
    const CLASS_NAME: &'static str = "SortedSet";

    fn insert(&mut self, element: Element) -> bool {
        self.elements.insert(element)
    }

    fn remove(&mut self, element: &Element) -> bool {
        self.elements.remove(element)
    }

    fn contains(&self, element: &Element) -> bool {
        self.elements.contains(element)
    }
}
