//! Data structures for ordered concurrent collections.
//!
//! # Organization
//!
//! - [`sorted`] - Skip list engine and the locked `ConcurrentSkipList`
//! - [`wrappers`] - Views over a list (`ReadOnlyView`)
//! - [`comparator`] - Orders the list can be built with
//! - [`ordered_iterator`] - Ascending input for batch insertion
//! - [`producer_consumer`] - Fallible add/take protocol
//! - `internal` - Node arena (pub(crate))

pub mod comparator;
pub(crate) mod internal;
pub mod ordered_iterator;
pub mod producer_consumer;
pub mod sorted;
pub mod wrappers;

pub use comparator::{Comparator, FnComparator, NaturalOrder, Reverse};
pub use ordered_iterator::{Ordered, OrderedIterator, sorted_batch, sorted_batch_by};
pub use producer_consumer::ProducerConsumerCollection;
pub use sorted::{ConcurrentSkipList, SkipList, SnapshotIter};
pub use wrappers::ReadOnlyView;
