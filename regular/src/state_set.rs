use std::{slice::Iter, vec::IntoIter};

/// Sorted, deduplicated set of states backed by a `Vec`. Membership is a binary search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateSet<T> {
    inner: Vec<T>,
}

impl<T: Ord> StateSet<T> {
    pub fn new() -> Self {
        StateSet { inner: Vec::new() }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.inner.binary_search(item).is_ok()
    }

    pub fn insert(&mut self, item: T) -> bool {
        match self.inner.binary_search(&item) {
            Ok(_) => false,
            Err(idx) => {
                self.inner.insert(idx, item);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.inner
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.inner.iter()
    }
}

impl<T: Ord> Default for StateSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> From<Vec<T>> for StateSet<T> {
    fn from(mut inner: Vec<T>) -> Self {
        inner.sort_unstable();
        inner.dedup();
        StateSet { inner }
    }
}

impl<T: Ord> FromIterator<T> for StateSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl<T: Ord> Extend<T> for StateSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.extend(iter);
        self.inner.sort_unstable();
        self.inner.dedup();
    }
}

impl<T> IntoIterator for StateSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a StateSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
