//! Probing strategies for open addressing
//!
//! A probing function maps `(base_hash, attempt, capacity)` to the slot that
//! should be examined on that attempt. The table calls it with
//! `attempt = 0, 1, 2, ...` and never looks at more than `capacity` slots, so a
//! strategy that revisits a slot before it has covered the whole table makes
//! inserts fail early with `CapacityExhausted`.

use std::num::{NonZeroU64, NonZeroUsize};

/// Computes the slot to examine for a given probe attempt.
///
/// Implementations must be pure: the same arguments always give the same
/// index, which is what lets lookups retrace the path an insert took. The
/// returned index must lie in `[0, capacity)`.
pub trait ProbingFunction {
    /// Returns the slot index for `attempt` (starting at 0) of the probe sequence
    /// that begins at `base_hash`.
    fn probe(&self, base_hash: u64, attempt: usize, capacity: NonZeroUsize) -> usize;
}

impl<F> ProbingFunction for F
where
    F: Fn(u64, usize, NonZeroUsize) -> usize,
{
    fn probe(&self, base_hash: u64, attempt: usize, capacity: NonZeroUsize) -> usize {
        self(base_hash, attempt, capacity)
    }
}

/// Reduces a hash to its home slot in `[0, capacity)`.
#[must_use]
pub fn home_slot(base_hash: u64, capacity: NonZeroUsize) -> usize {
    // usize never exceeds 64 bits on supported targets
    let modulus = NonZeroU64::try_from(capacity).unwrap_or(NonZeroU64::MAX);
    usize::try_from(base_hash % modulus).unwrap_or_default()
}

/// Moves `distance` slots forward from `start`, wrapping around the table.
///
/// Both arguments must already be below `capacity`.
fn advance(start: usize, distance: usize, capacity: NonZeroUsize) -> usize {
    let room = capacity.get().saturating_sub(start);
    if distance < room { start.saturating_add(distance) } else { distance.saturating_sub(room) }
}

/// `(a * b) mod modulus` without intermediate overflow.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn mul_mod(a: usize, b: usize, modulus: NonZeroUsize) -> usize {
    ((a as u128 * b as u128) % modulus.get() as u128) as usize
}

/// Linear probing: `index = (base_hash + attempt) mod capacity`.
///
/// Step 1 is coprime with every capacity, so the first `capacity` attempts
/// visit every slot exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearProbing;

impl ProbingFunction for LinearProbing {
    fn probe(&self, base_hash: u64, attempt: usize, capacity: NonZeroUsize) -> usize {
        advance(home_slot(base_hash, capacity), attempt % capacity, capacity)
    }
}

/// Quadratic probing over triangular numbers: `index = base + attempt * (attempt + 1) / 2`.
///
/// Covers every slot when the capacity is a power of two. Other capacities
/// may cycle early.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadraticProbing;

impl ProbingFunction for QuadraticProbing {
    fn probe(&self, base_hash: u64, attempt: usize, capacity: NonZeroUsize) -> usize {
        // One of attempt, attempt + 1 is even, so halve that one before multiplying.
        let next = attempt.saturating_add(1);
        let (a, b) = if attempt % 2 == 0 { (attempt / 2, next) } else { (attempt, next / 2) };
        let distance = mul_mod(a % capacity, b % capacity, capacity);
        advance(home_slot(base_hash, capacity), distance, capacity)
    }
}

/// Fixed-step probing: `index = (base_hash + attempt * stride) mod capacity`.
///
/// Only reaches every slot when `stride` and the capacity are coprime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StridedProbing {
    /// Distance between consecutive probes
    pub stride: usize,
}

impl StridedProbing {
    /// Creates a strategy stepping `stride` slots per attempt
    #[must_use]
    pub const fn new(stride: usize) -> Self {
        Self { stride }
    }
}

impl Default for StridedProbing {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ProbingFunction for StridedProbing {
    fn probe(&self, base_hash: u64, attempt: usize, capacity: NonZeroUsize) -> usize {
        let distance = mul_mod(attempt % capacity, self.stride % capacity, capacity);
        advance(home_slot(base_hash, capacity), distance, capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
    }

    fn distinct_slots(probing: &impl ProbingFunction, hash: u64, capacity: usize) -> usize {
        (0..capacity).map(|i| probing.probe(hash, i, cap(capacity))).collect::<HashSet<_>>().len()
    }

    #[test]
    fn test_linear_sequence_wraps() {
        let seq: Vec<usize> = (0..5).map(|i| LinearProbing.probe(13, i, cap(5))).collect();
        assert_eq!(seq, vec![3, 4, 0, 1, 2]);
    }

    #[test]
    fn test_linear_handles_huge_hashes() {
        let capacity = cap(7);
        let start = home_slot(u64::MAX, capacity);
        assert_eq!(LinearProbing.probe(u64::MAX, 0, capacity), start);
        assert!(LinearProbing.probe(u64::MAX, usize::MAX, capacity) < 7);
    }

    #[test]
    fn test_quadratic_offsets_are_triangular() {
        let seq: Vec<usize> = (0..5).map(|i| QuadraticProbing.probe(0, i, cap(64))).collect();
        assert_eq!(seq, vec![0, 1, 3, 6, 10]);
    }

    #[test]
    fn test_quadratic_covers_power_of_two() {
        for capacity in [1, 2, 8, 64, 1024] {
            assert_eq!(distinct_slots(&QuadraticProbing, 12_345, capacity), capacity);
        }
    }

    #[test]
    fn test_strided_cycles_when_not_coprime() {
        assert_eq!(distinct_slots(&StridedProbing::new(2), 0, 8), 4);
        assert_eq!(distinct_slots(&StridedProbing::new(3), 0, 8), 8);
    }

    #[test]
    fn test_closure_is_a_probing_function() {
        let backwards = |hash: u64, attempt: usize, capacity: NonZeroUsize| {
            let start = home_slot(hash, capacity);
            (start + capacity.get() - attempt % capacity) % capacity
        };
        assert_eq!(backwards.probe(2, 3, cap(4)), 3);
    }

    proptest! {
        #[test]
        fn prop_linear_is_a_permutation(hash in any::<u64>(), capacity in 1usize..200) {
            prop_assert_eq!(distinct_slots(&LinearProbing, hash, capacity), capacity);
        }

        #[test]
        fn prop_strategies_stay_in_range(
            hash in any::<u64>(),
            attempt in any::<usize>(),
            capacity in 1usize..10_000,
            stride in any::<usize>(),
        ) {
            prop_assert!(LinearProbing.probe(hash, attempt, cap(capacity)) < capacity);
            prop_assert!(QuadraticProbing.probe(hash, attempt, cap(capacity)) < capacity);
            prop_assert!(StridedProbing::new(stride).probe(hash, attempt, cap(capacity)) < capacity);
        }
    }
}
