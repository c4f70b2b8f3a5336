//! Sizing configuration for genealogy tables

/// Capacity used when nothing else is configured; comfortably larger than the
/// data sets the index is normally built from.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Highest share of slots (in percent) a freshly built table is allowed to fill.
pub const DEFAULT_LOAD_FACTOR_THRESHOLD: usize = 75;

/// Decides how many slots the table behind a genealogy index gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
    /// Lower bound on the capacity in headroom mode
    minimum_capacity: usize,
    /// Target maximum load in percent, kept within 1..=95
    load_factor_threshold: usize,
    /// Exact capacity, bypassing the headroom calculation
    fixed_capacity: Option<usize>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            minimum_capacity: DEFAULT_CAPACITY,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
            fixed_capacity: None,
        }
    }
}

impl GraphConfig {
    /// Creates the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use exactly `capacity` slots whatever the input size.
    ///
    /// A capacity smaller than the number of distinct ids makes the build fail
    /// with `CapacityExhausted`.
    #[must_use]
    pub fn with_fixed_capacity(mut self, capacity: usize) -> Self {
        self.fixed_capacity = Some(capacity);
        self
    }

    /// Never allocate fewer than `capacity` slots in headroom mode
    #[must_use]
    pub fn with_minimum_capacity(mut self, capacity: usize) -> Self {
        self.minimum_capacity = capacity;
        self
    }

    /// Provide a way to configure the load factor threshold
    #[must_use]
    pub fn with_load_factor_threshold(mut self, threshold: usize) -> Self {
        self.load_factor_threshold = threshold.clamp(1, 95);
        self
    }

    /// Returns the configured load factor threshold in percent
    #[must_use]
    pub fn load_factor_threshold(&self) -> usize {
        self.load_factor_threshold
    }

    /// Capacity for a table that will hold at most `distinct_ids` entries.
    #[must_use]
    pub fn capacity_for(&self, distinct_ids: usize) -> usize {
        if let Some(capacity) = self.fixed_capacity {
            return capacity;
        }

        let headroom = distinct_ids
            .saturating_mul(100)
            .div_ceil(self.load_factor_threshold.max(1));
        headroom.max(self.minimum_capacity).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_inputs_use_default_capacity() {
        assert_eq!(GraphConfig::new().capacity_for(3), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_large_inputs_get_headroom() {
        let config = GraphConfig::new().with_minimum_capacity(1);
        assert_eq!(config.capacity_for(300), 400);
        assert_eq!(config.capacity_for(0), 1);
    }

    #[test]
    fn test_fixed_capacity_wins() {
        let config = GraphConfig::new().with_fixed_capacity(2);
        assert_eq!(config.capacity_for(1_000), 2);
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(GraphConfig::new().with_load_factor_threshold(0).load_factor_threshold(), 1);
        assert_eq!(GraphConfig::new().with_load_factor_threshold(100).load_factor_threshold(), 95);
    }
}
