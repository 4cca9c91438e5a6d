use std::fmt;

use log::debug;
use parking_lot::Mutex;

use super::skip_list::SkipList;
use super::snapshot_iter::SnapshotIter;
use crate::config::SkipListConfig;
use crate::data_structures::comparator::{Comparator, NaturalOrder};
use crate::data_structures::ordered_iterator::OrderedIterator;
use crate::data_structures::producer_consumer::ProducerConsumerCollection;
use crate::data_structures::wrappers::ReadOnlyView;
use crate::error::CollectionError;

// ============================================================================
// ConcurrentSkipList - Skip list behind one coarse lock
// ============================================================================

/// An ordered, duplicate-allowing collection safe to share between threads.
///
/// Every operation takes the single list lock for its whole duration, so
/// operations are linearizable in lock-acquisition order. Searches take the
/// lock too: they move the last-found hint.
///
/// Besides set-like operations it works as a priority queue: [`offer`]
/// adds, [`poll`] removes the smallest element, and equal elements come out
/// in the order they went in.
///
/// # Example
///
/// ```
/// use skipq_core::ConcurrentSkipList;
///
/// let list = ConcurrentSkipList::new();
/// for value in [5, 3, 8, 1] {
///     list.add(value);
/// }
/// assert_eq!(list.to_vec(), vec![1, 3, 5, 8]);
/// assert_eq!(list.poll(), Some(1));
/// assert!(list.remove(&5));
/// assert!(!list.contains(&5));
/// assert_eq!(list.len(), 2);
/// ```
///
/// [`offer`]: ConcurrentSkipList::offer
/// [`poll`]: ConcurrentSkipList::poll
pub struct ConcurrentSkipList<T, C = NaturalOrder> {
    inner: Mutex<SkipList<T, C>>,
    capacity: Option<usize>,
}

impl<T: Ord> ConcurrentSkipList<T> {
    pub fn new() -> Self {
        Self::with_config(SkipListConfig::default())
    }

    pub fn with_config(config: SkipListConfig) -> Self {
        Self::with_config_and_comparator(config, NaturalOrder)
    }
}

impl<T: Ord> Default for ConcurrentSkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> ConcurrentSkipList<T, C> {
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_config_and_comparator(SkipListConfig::default(), comparator)
    }

    pub fn with_config_and_comparator(config: SkipListConfig, comparator: C) -> Self {
        ConcurrentSkipList {
            capacity: config.capacity(),
            inner: Mutex::new(SkipList::with_config_and_comparator(config, comparator)),
        }
    }

    /// Bound applied by [`offer`](Self::offer) and [`try_add`](Self::try_add).
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    // ========================================================================
    // Producer side
    // ========================================================================

    /// Insert `value` at its sorted position, after any equal elements.
    ///
    /// Always succeeds, even past a configured capacity.
    pub fn add(&self, value: T) {
        self.inner.lock().insert(value);
    }

    /// Insert `value` unless the list is at its configured capacity.
    pub fn try_add(&self, value: T) -> Result<(), CollectionError> {
        let mut list = self.inner.lock();
        if let Some(capacity) = self.capacity {
            if list.len() >= capacity {
                return Err(CollectionError::CapacityExceeded { capacity });
            }
        }
        list.insert(value);
        Ok(())
    }

    /// Queue-style add. Returns `false` when the list is full, in which case
    /// `value` is dropped.
    pub fn offer(&self, value: T) -> bool {
        self.try_add(value).is_ok()
    }

    /// Insert an ascending sequence under a single lock acquisition.
    ///
    /// Each insert starts its search at the previous insertion point, so for
    /// input that really is ascending the cost per element stays small.
    /// Like [`add`](Self::add) this ignores the capacity bound. Returns the
    /// number of elements inserted.
    pub fn add_batch<I>(&self, iter: I) -> usize
    where
        I: OrderedIterator<Item = T>,
    {
        let mut list = self.inner.lock();
        let mut inserted = 0;
        for value in iter {
            list.insert(value);
            inserted += 1;
        }
        debug!("batch inserted {} elements, len now {}", inserted, list.len());
        inserted
    }

    // ========================================================================
    // Consumer side
    // ========================================================================

    /// Remove and return the smallest element, `None` when empty.
    pub fn poll(&self) -> Option<T> {
        self.inner.lock().pop_first()
    }

    /// Like [`poll`](Self::poll) but reports an empty list as an error.
    pub fn try_take(&self) -> Result<T, CollectionError> {
        self.poll().ok_or(CollectionError::Empty)
    }

    /// Remove every element and return them in ascending order.
    pub fn drain(&self) -> Vec<T> {
        let mut list = self.inner.lock();
        let mut drained = Vec::with_capacity(list.len());
        while let Some(value) = list.pop_first() {
            drained.push(value);
        }
        drained
    }

    /// Remove one element equal to `value`.
    pub fn remove(&self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Remove one element equal to `value` and return it.
    pub fn take(&self, value: &T) -> Option<T> {
        self.inner.lock().remove(value)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn contains(&self, value: &T) -> bool {
        self.inner.lock().contains(value)
    }

    /// Number of elements equal to `value`.
    pub fn count_of(&self, value: &T) -> usize {
        self.inner.lock().count_of(value)
    }

    /// Run `f` on an element equal to `value` while the lock is held.
    pub fn find_and_apply<F, R>(&self, value: &T, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock().find_and_apply(value, f)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Current number of active levels.
    pub fn height(&self) -> usize {
        self.inner.lock().height()
    }

    /// The smallest element, left in place.
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.lock().first().cloned()
    }

    /// The largest element, left in place.
    pub fn last(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.lock().last().cloned()
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Ascending copy of the whole list.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.lock().iter().cloned().collect()
    }

    /// Copy the list in ascending order into `dest[offset..]`.
    ///
    /// Fails with `InvalidArgument` when `offset` lies past the end of `dest`
    /// and with `InsufficientCapacity` when the remaining room is smaller
    /// than the list. Nothing is written on failure.
    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), CollectionError>
    where
        T: Clone,
    {
        let list = self.inner.lock();
        if offset > dest.len() {
            return Err(CollectionError::InvalidArgument {
                offset,
                len: dest.len(),
            });
        }
        let available = dest.len() - offset;
        if available < list.len() {
            return Err(CollectionError::InsufficientCapacity {
                required: list.len(),
                available,
            });
        }

        for (slot, value) in dest[offset..].iter_mut().zip(list.iter()) {
            slot.clone_from(value);
        }
        Ok(())
    }

    /// Iterate over a snapshot taken now.
    ///
    /// The snapshot is copied under the lock and the lock is released before
    /// this returns, so iteration never blocks other threads and never sees
    /// their later changes.
    pub fn iter(&self) -> SnapshotIter<T>
    where
        T: Clone,
    {
        SnapshotIter::new(self.to_vec())
    }

    /// Snapshot of the elements `>= value`.
    pub fn iter_from(&self, value: &T) -> SnapshotIter<T>
    where
        T: Clone,
    {
        let list = self.inner.lock();
        SnapshotIter::new(list.range_from(value).cloned().collect())
    }

    /// A view that can read this list but rejects every mutation.
    pub fn as_read_only(&self) -> ReadOnlyView<'_, T, C> {
        ReadOnlyView::new(self)
    }

    pub fn into_inner(self) -> SkipList<T, C> {
        self.inner.into_inner()
    }
}

impl<T, C: Comparator<T>> ProducerConsumerCollection<T> for ConcurrentSkipList<T, C> {
    fn try_add(&self, value: T) -> Result<(), CollectionError> {
        ConcurrentSkipList::try_add(self, value)
    }

    fn try_take(&self) -> Result<T, CollectionError> {
        ConcurrentSkipList::try_take(self)
    }

    fn try_remove(&self, value: &T) -> Result<bool, CollectionError> {
        Ok(self.remove(value))
    }

    fn try_clear(&self) -> Result<(), CollectionError> {
        self.clear();
        Ok(())
    }

    fn contains(&self, value: &T) -> bool {
        ConcurrentSkipList::contains(self, value)
    }

    fn len(&self) -> usize {
        ConcurrentSkipList::len(self)
    }

    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        ConcurrentSkipList::to_vec(self)
    }

    fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), CollectionError>
    where
        T: Clone,
    {
        ConcurrentSkipList::copy_to(self, dest, offset)
    }
}

impl<T, C: Comparator<T>> Extend<T> for ConcurrentSkipList<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.get_mut().extend(iter);
    }
}

impl<T: Ord> FromIterator<T> for ConcurrentSkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = ConcurrentSkipList::new();
        list.extend(iter);
        list
    }
}

impl<T: Clone, C: Comparator<T>> IntoIterator for &ConcurrentSkipList<T, C> {
    type Item = T;
    type IntoIter = SnapshotIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, C: Comparator<T>> fmt::Debug for ConcurrentSkipList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.inner.lock();
        f.debug_struct("ConcurrentSkipList")
            .field("len", &list.len())
            .field("height", &list.height())
            .field("capacity", &self.capacity)
            .field("values", &*list)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::comparator::Reverse;
    use crate::data_structures::ordered_iterator::{Ordered, sorted_batch};
    use std::sync::Arc;
    use std::thread;

    fn bounded(capacity: usize) -> ConcurrentSkipList<i32> {
        let config = SkipListConfig::builder().capacity(capacity).build().unwrap();
        ConcurrentSkipList::with_config(config)
    }

    #[test]
    fn test_poll_drains_in_order() {
        let list = ConcurrentSkipList::new();
        for value in [9, 2, 7, 2, 5] {
            list.add(value);
        }
        assert_eq!(list.peek(), Some(2));
        assert_eq!(list.last(), Some(9));

        let mut polled = Vec::new();
        while let Some(value) = list.poll() {
            polled.push(value);
        }
        assert_eq!(polled, vec![2, 2, 5, 7, 9]);
        assert_eq!(list.poll(), None);
        assert_eq!(list.try_take(), Err(CollectionError::Empty));
    }

    #[test]
    fn test_copy_to() {
        let list: ConcurrentSkipList<i32> = [3, 1, 2].into_iter().collect();

        let mut dest = [0; 5];
        list.copy_to(&mut dest, 1).unwrap();
        assert_eq!(dest, [0, 1, 2, 3, 0]);

        let mut exact = [0; 3];
        list.copy_to(&mut exact, 0).unwrap();
        assert_eq!(exact, [1, 2, 3]);
    }

    #[test]
    fn test_copy_to_errors_leave_destination_untouched() {
        let list: ConcurrentSkipList<i32> = [3, 1, 2].into_iter().collect();

        let mut dest = [7; 4];
        assert_eq!(
            list.copy_to(&mut dest, 2),
            Err(CollectionError::InsufficientCapacity {
                required: 3,
                available: 2
            })
        );
        assert_eq!(
            list.copy_to(&mut dest, 5),
            Err(CollectionError::InvalidArgument { offset: 5, len: 4 })
        );
        assert_eq!(dest, [7; 4]);

        // An offset equal to the length is valid for an empty list.
        let empty: ConcurrentSkipList<i32> = ConcurrentSkipList::new();
        assert_eq!(empty.copy_to(&mut dest, 4), Ok(()));
    }

    #[test]
    fn test_capacity_bounds_offer_only() {
        let list = bounded(2);
        assert_eq!(list.capacity(), Some(2));
        assert!(list.offer(1));
        assert!(list.offer(2));
        assert!(!list.offer(3));
        assert_eq!(
            list.try_add(3),
            Err(CollectionError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(list.len(), 2);

        // `add` is unconditional.
        list.add(3);
        assert_eq!(list.len(), 3);

        // Room frees up as consumers take.
        list.poll();
        list.poll();
        assert!(list.offer(4));
        assert_eq!(list.to_vec(), vec![3, 4]);
    }

    #[test]
    fn test_take_and_count_of() {
        let list = ConcurrentSkipList::new();
        list.add("pear");
        list.add("apple");
        list.add("pear");

        assert_eq!(list.count_of(&"pear"), 2);
        assert_eq!(list.take(&"pear"), Some("pear"));
        assert_eq!(list.count_of(&"pear"), 1);
        assert_eq!(list.take(&"plum"), None);
        assert_eq!(list.find_and_apply(&"apple", |s| s.len()), Some(5));
    }

    #[test]
    fn test_add_batch() {
        let list = ConcurrentSkipList::new();
        list.add(50);
        assert_eq!(list.add_batch(sorted_batch((0..100).rev().collect())), 100);
        assert_eq!(list.len(), 101);
        assert_eq!(list.count_of(&50), 2);

        let expected: Vec<i32> = (0..100)
            .flat_map(|v| if v == 50 { vec![50, 50] } else { vec![v] })
            .collect();
        assert_eq!(list.to_vec(), expected);
    }

    #[test]
    #[should_panic(expected = "ascending order violated")]
    fn test_add_batch_checks_order() {
        let list = ConcurrentSkipList::new();
        list.add_batch(Ordered::new(vec![1, 3, 2].into_iter()));
    }

    #[test]
    fn test_add_batch_from_snapshot() {
        let source: ConcurrentSkipList<u8> = (0..20).collect();
        let target = ConcurrentSkipList::new();
        assert_eq!(target.add_batch(source.iter()), 20);
        assert_eq!(target.to_vec(), source.to_vec());
    }

    #[test]
    fn test_drain_and_clear() {
        let list: ConcurrentSkipList<i32> = [4, 1, 3].into_iter().collect();
        assert_eq!(list.drain(), vec![1, 3, 4]);
        assert!(list.is_empty());
        assert_eq!(list.height(), 1);

        list.add(8);
        list.clear();
        assert_eq!(list.len(), 0);
        assert_eq!(list.drain(), Vec::<i32>::new());
    }

    #[test]
    fn test_reverse_order_queue() {
        let list = ConcurrentSkipList::with_comparator(Reverse(NaturalOrder));
        for value in [1, 5, 3] {
            list.add(value);
        }
        assert_eq!(list.poll(), Some(5));
        assert_eq!(list.to_vec(), vec![3, 1]);
    }

    #[test]
    fn test_debug_output() {
        let list: ConcurrentSkipList<i32> = [2, 1].into_iter().collect();
        let printed = format!("{:?}", list);
        assert!(printed.starts_with("ConcurrentSkipList { len: 2"));
        assert!(printed.ends_with("values: [1, 2] }"));
    }

    #[test]
    fn test_two_threads_distinct_inserts() {
        let list = Arc::new(ConcurrentSkipList::new());

        let handles: Vec<_> = (0..2)
            .map(|thread_id| {
                let list = Arc::clone(&list);
                thread::spawn(move || {
                    for i in 0..1000 {
                        list.add(i * 2 + thread_id);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(list.len(), 2000);
        assert_eq!(list.to_vec(), (0..2000).collect::<Vec<_>>());
    }

    #[test]
    fn test_into_inner() {
        let list: ConcurrentSkipList<i32> = [2, 1].into_iter().collect();
        let mut inner = list.into_inner();
        assert_eq!(inner.pop_first(), Some(1));
        assert_eq!(inner.len(), 1);
    }
}
