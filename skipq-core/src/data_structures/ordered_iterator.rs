//! Ordered input for batch insertion.
//!
//! [`ConcurrentSkipList::add_batch`](crate::ConcurrentSkipList::add_batch)
//! takes an [`OrderedIterator`] and inserts it under one lock acquisition.
//! Because each search starts from the previous insertion point, ascending
//! input costs a few steps per element instead of a full descent.
//!
//! ```
//! use skipq_core::ConcurrentSkipList;
//! use skipq_core::data_structures::ordered_iterator::sorted_batch;
//!
//! let list = ConcurrentSkipList::new();
//! assert_eq!(list.add_batch(sorted_batch(vec![5, 1, 3])), 3);
//! assert_eq!(list.to_vec(), vec![1, 3, 5]);
//! ```

use std::collections::{btree_set, BTreeSet};
use std::iter::FusedIterator;

use crate::data_structures::comparator::{Comparator, NaturalOrder};

/// Marker for iterators that yield elements in ascending order.
///
/// Implementors promise that consecutive items `a`, `b` satisfy `a <= b`
/// under the order the consumer uses. Breaking the promise never corrupts a
/// list; it only loses the locality the batch path relies on.
pub trait OrderedIterator: Iterator {}

impl<T> OrderedIterator for btree_set::IntoIter<T> {}

impl<'a, T: Clone + 'a> OrderedIterator for std::iter::Cloned<btree_set::Iter<'a, T>> {}

// ============================================================================
// Ordered - Runtime-checked ascending wrapper
// ============================================================================

/// Wraps an iterator and panics as soon as it yields a descending pair.
///
/// # Panics
///
/// `next()` panics if an element compares greater than the one before it.
#[derive(Debug, Clone)]
pub struct Ordered<I: Iterator, C = NaturalOrder> {
    inner: I,
    comparator: C,
    last: Option<I::Item>,
}

impl<I: Iterator> Ordered<I>
where
    I::Item: Ord + Clone,
{
    pub fn new(iter: I) -> Self {
        Ordered::with_comparator(iter, NaturalOrder)
    }
}

impl<I: Iterator, C: Comparator<I::Item>> Ordered<I, C>
where
    I::Item: Clone,
{
    pub fn with_comparator(iter: I, comparator: C) -> Self {
        Ordered {
            inner: iter,
            comparator,
            last: None,
        }
    }

    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: Iterator, C: Comparator<I::Item>> Iterator for Ordered<I, C>
where
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;

        if let Some(last) = &self.last {
            assert!(
                self.comparator.compare(last, &item) != std::cmp::Ordering::Greater,
                "ascending order violated by batch input"
            );
        }

        self.last = Some(item.clone());
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: Iterator, C: Comparator<I::Item>> OrderedIterator for Ordered<I, C> where I::Item: Clone {}

impl<I: ExactSizeIterator, C: Comparator<I::Item>> ExactSizeIterator for Ordered<I, C> where
    I::Item: Clone
{
}

impl<I: FusedIterator, C: Comparator<I::Item>> FusedIterator for Ordered<I, C> where I::Item: Clone {}

/// Sort `values` and wrap them for batch insertion.
pub fn sorted_batch<T: Ord + Clone>(mut values: Vec<T>) -> Ordered<std::vec::IntoIter<T>> {
    values.sort();
    Ordered::new(values.into_iter())
}

/// Sort `values` by `comparator` and wrap them for batch insertion into a
/// list that uses the same comparator.
pub fn sorted_batch_by<T, C>(mut values: Vec<T>, comparator: C) -> Ordered<std::vec::IntoIter<T>, C>
where
    T: Clone,
    C: Comparator<T>,
{
    values.sort_by(|a, b| comparator.compare(a, b));
    Ordered::with_comparator(values.into_iter(), comparator)
}

/// Collect into a `BTreeSet`, whose owning iterator is already ordered.
pub fn dedup_sorted<T: Ord, I: IntoIterator<Item = T>>(values: I) -> btree_set::IntoIter<T> {
    values.into_iter().collect::<BTreeSet<T>>().into_iter()
}
