use std::fmt;

use crate::data_structures::ConcurrentSkipList;
use crate::data_structures::comparator::Comparator;
use crate::data_structures::producer_consumer::ProducerConsumerCollection;
use crate::data_structures::sorted::SnapshotIter;
use crate::error::CollectionError;

/// Borrowed view of a [`ConcurrentSkipList`] that only allows reads.
///
/// Reads go straight to the list and see its live contents. Every mutating
/// entry point of [`ProducerConsumerCollection`] fails with
/// [`CollectionError::Unsupported`] and leaves the list unchanged.
///
/// ```
/// use skipq_core::{CollectionError, ConcurrentSkipList, ProducerConsumerCollection};
///
/// let list = ConcurrentSkipList::new();
/// list.add(1);
///
/// let view = list.as_read_only();
/// assert!(view.contains(&1));
/// assert!(matches!(view.try_add(2), Err(CollectionError::Unsupported(_))));
/// ```
pub struct ReadOnlyView<'a, T, C> {
    list: &'a ConcurrentSkipList<T, C>,
}

impl<'a, T, C: Comparator<T>> ReadOnlyView<'a, T, C> {
    pub(crate) fn new(list: &'a ConcurrentSkipList<T, C>) -> Self {
        ReadOnlyView { list }
    }

    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.list.peek()
    }

    pub fn iter(&self) -> SnapshotIter<T>
    where
        T: Clone,
    {
        self.list.iter()
    }

    pub fn count_of(&self, value: &T) -> usize {
        self.list.count_of(value)
    }
}

impl<T, C> Clone for ReadOnlyView<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for ReadOnlyView<'_, T, C> {}

impl<T, C: Comparator<T>> ProducerConsumerCollection<T> for ReadOnlyView<'_, T, C> {
    fn try_add(&self, _value: T) -> Result<(), CollectionError> {
        Err(CollectionError::Unsupported("add on a read-only view"))
    }

    fn try_take(&self) -> Result<T, CollectionError> {
        Err(CollectionError::Unsupported("take on a read-only view"))
    }

    fn try_remove(&self, _value: &T) -> Result<bool, CollectionError> {
        Err(CollectionError::Unsupported("remove on a read-only view"))
    }

    fn try_clear(&self) -> Result<(), CollectionError> {
        Err(CollectionError::Unsupported("clear on a read-only view"))
    }

    fn contains(&self, value: &T) -> bool {
        self.list.contains(value)
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.list.to_vec()
    }

    fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), CollectionError>
    where
        T: Clone,
    {
        self.list.copy_to(dest, offset)
    }
}

impl<T: fmt::Debug, C: Comparator<T>> fmt::Debug for ReadOnlyView<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadOnlyView").field(self.list).finish()
    }
}
