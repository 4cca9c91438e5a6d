//! Owned iterator over a point-in-time copy of a list.

use std::iter::FusedIterator;

use crate::data_structures::ordered_iterator::OrderedIterator;

// ============================================================================
// SnapshotIter - Iterator over values copied out under the lock
// ============================================================================

/// Ascending iterator over a snapshot of a [`ConcurrentSkipList`].
///
/// The values were cloned while the list lock was held, so the iterator is
/// consistent with one instant in the list's history and never sees later
/// inserts or removals. Holding it does not hold the lock.
///
/// [`ConcurrentSkipList`]: super::ConcurrentSkipList
#[derive(Debug, Clone)]
pub struct SnapshotIter<T> {
    values: std::vec::IntoIter<T>,
}

impl<T> SnapshotIter<T> {
    pub(crate) fn new(values: Vec<T>) -> Self {
        SnapshotIter {
            values: values.into_iter(),
        }
    }

    /// The values not yet yielded, in ascending order.
    pub fn as_slice(&self) -> &[T] {
        self.values.as_slice()
    }
}

impl<T> Iterator for SnapshotIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.values.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for SnapshotIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.values.next_back()
    }
}

impl<T> ExactSizeIterator for SnapshotIter<T> {}

impl<T> FusedIterator for SnapshotIter<T> {}

impl<T> OrderedIterator for SnapshotIter<T> {}

#[cfg(test)]
mod tests {
    use crate::data_structures::ConcurrentSkipList;

    #[test]
    fn test_iter_basic() {
        let list = ConcurrentSkipList::new();
        for value in [5, 3, 7, 1] {
            list.add(value);
        }

        let values: Vec<i32> = list.iter().collect();
        assert_eq!(values, vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_iter_empty() {
        let list: ConcurrentSkipList<i32> = ConcurrentSkipList::new();
        let mut iter = list.iter();
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_snapshot_ignores_later_mutation() {
        let list = ConcurrentSkipList::new();
        for value in 1..=5 {
            list.add(value);
        }

        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(1));

        list.remove(&3);
        list.add(0);
        list.clear();

        assert_eq!(iter.as_slice(), &[2, 3, 4, 5]);
        assert_eq!(iter.collect::<Vec<_>>(), vec![2, 3, 4, 5]);
        assert!(list.is_empty());
    }

    #[test]
    fn test_iter_from_and_reverse() {
        let list = ConcurrentSkipList::new();
        for value in [10, 20, 30, 40, 50] {
            list.add(value);
        }

        let from: Vec<i32> = list.iter_from(&25).collect();
        assert_eq!(from, vec![30, 40, 50]);

        let from: Vec<i32> = list.iter_from(&30).collect();
        assert_eq!(from, vec![30, 40, 50]);

        let from: Vec<i32> = list.iter_from(&0).collect();
        assert_eq!(from, vec![10, 20, 30, 40, 50]);

        let descending: Vec<i32> = list.iter().rev().collect();
        assert_eq!(descending, vec![50, 40, 30, 20, 10]);
    }

    #[test]
    fn test_for_loop_over_reference() {
        let list = ConcurrentSkipList::new();
        list.add("b");
        list.add("a");

        let mut seen = Vec::new();
        for value in &list {
            seen.push(value);
        }
        assert_eq!(seen, vec!["a", "b"]);
    }
}
