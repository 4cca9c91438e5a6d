pub mod config;
pub mod data_structures;
pub mod error;

pub use config::{LEVEL_INCREMENT, MAX_HEIGHT, SkipListConfig, SkipListConfigBuilder};
pub use data_structures::{
    Comparator, ConcurrentSkipList, FnComparator, NaturalOrder, Ordered, OrderedIterator,
    ProducerConsumerCollection, ReadOnlyView, Reverse, SkipList, SnapshotIter,
};
pub use error::{CollectionError, ConfigError};

/*
Task list:

- [ ] Compare the uniform height draw against a geometric one on 1M-element
      lists (search length vs. memory per node).

*/

/*

cargo llvm-cov --html

sudo CARGO_PROFILE_RELEASE_DEBUG=true cargo flamegraph --bench skip_list_benchmark --root --

cargo valgrind test

*/
