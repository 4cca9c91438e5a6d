//! Producer/consumer protocol shared by the list and its views.
//!
//! ```text
//! User Code
//!    ↓ uses
//! ProducerConsumerCollection (this trait)  ← fallible add/take, snapshots
//!    ↓ implemented by
//! ConcurrentSkipList                       ← locked skip list
//! ReadOnlyView                             ← rejects every mutation
//! ```
//!
//! Code written against the trait can hand a read-only view to consumers
//! that should only observe a queue, and get a typed error back if they try
//! to change it.

use crate::error::CollectionError;

pub trait ProducerConsumerCollection<T> {
    /// Add a value.
    ///
    /// Fails with `CapacityExceeded` when the collection is bounded and full,
    /// or `Unsupported` when the collection is read-only.
    fn try_add(&self, value: T) -> Result<(), CollectionError>;

    /// Remove and return the smallest value.
    ///
    /// Fails with `Empty` when there is nothing to take, or `Unsupported`
    /// when the collection is read-only.
    fn try_take(&self) -> Result<T, CollectionError>;

    /// Remove one value equal to `value`. `Ok(false)` when none was present.
    fn try_remove(&self, value: &T) -> Result<bool, CollectionError>;

    /// Remove every value.
    fn try_clear(&self) -> Result<(), CollectionError>;

    fn contains(&self, value: &T) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ascending copy of the contents.
    fn to_vec(&self) -> Vec<T>
    where
        T: Clone;

    /// Write the contents in ascending order into `dest` starting at `offset`.
    fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), CollectionError>
    where
        T: Clone;
}
