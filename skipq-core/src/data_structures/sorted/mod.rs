//! Skip list engine and its locked, shareable wrapper.
//!
//! - `SkipList`: single-threaded engine, `&mut self` for mutations and hinted searches
//! - `ConcurrentSkipList`: the engine behind one `parking_lot::Mutex`

pub mod concurrent_skip_list;
pub mod skip_list;
pub mod snapshot_iter;

pub use concurrent_skip_list::ConcurrentSkipList;
pub use skip_list::{Iter, SkipList};
pub use snapshot_iter::SnapshotIter;
