//! Configuration for [`ConcurrentSkipList`](crate::ConcurrentSkipList).
//!
//! ```
//! use skipq_core::SkipListConfig;
//!
//! let config = SkipListConfig::builder()
//!     .max_height(12)
//!     .capacity(1024)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.max_height(), 12);
//! ```

use crate::error::ConfigError;

/// Hard ceiling on the number of levels any list may use.
pub const MAX_HEIGHT: usize = 32;

/// Sentinel level arrays start at, and grow by, this many levels.
pub const LEVEL_INCREMENT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipListConfig {
    max_height: usize,
    capacity: Option<usize>,
    seed: Option<u64>,
}

impl SkipListConfig {
    pub fn builder() -> SkipListConfigBuilder {
        SkipListConfigBuilder::default()
    }

    /// Upper bound on the list height, in `1..=MAX_HEIGHT`.
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// Bound honoured by `offer` and `try_add`. `None` means unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Seed for the leveling RNG. `None` seeds from the environment.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for SkipListConfig {
    fn default() -> Self {
        SkipListConfig {
            max_height: MAX_HEIGHT,
            capacity: None,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SkipListConfigBuilder {
    max_height: Option<usize>,
    capacity: Option<usize>,
    seed: Option<u64>,
}

impl SkipListConfigBuilder {
    pub fn max_height(mut self, max_height: usize) -> Self {
        self.max_height = Some(max_height);
        self
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<SkipListConfig, ConfigError> {
        let max_height = self.max_height.unwrap_or(MAX_HEIGHT);
        if !(1..=MAX_HEIGHT).contains(&max_height) {
            return Err(ConfigError::MaxHeightOutOfRange {
                got: max_height,
                max: MAX_HEIGHT,
            });
        }
        if self.capacity == Some(0) {
            return Err(ConfigError::ZeroCapacity);
        }

        Ok(SkipListConfig {
            max_height,
            capacity: self.capacity,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SkipListConfig::default();
        assert_eq!(config.max_height(), MAX_HEIGHT);
        assert_eq!(config.capacity(), None);
        assert_eq!(config.seed(), None);
        assert_eq!(SkipListConfig::builder().build(), Ok(config));
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        assert_eq!(
            SkipListConfig::builder().max_height(0).build(),
            Err(ConfigError::MaxHeightOutOfRange { got: 0, max: 32 })
        );
        assert_eq!(
            SkipListConfig::builder().max_height(33).build(),
            Err(ConfigError::MaxHeightOutOfRange { got: 33, max: 32 })
        );
        assert_eq!(
            SkipListConfig::builder().capacity(0).build(),
            Err(ConfigError::ZeroCapacity)
        );
    }

    #[test]
    fn test_builder_keeps_values() {
        let config = SkipListConfig::builder()
            .max_height(1)
            .capacity(3)
            .seed(42)
            .build()
            .unwrap();
        assert_eq!(config.max_height(), 1);
        assert_eq!(config.capacity(), Some(3));
        assert_eq!(config.seed(), Some(42));
    }
}
