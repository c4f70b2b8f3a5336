use std::{fmt, marker::PhantomData, mem, num::NonZeroUsize};

use log::{trace, warn};

use crate::{
    error::TableError,
    key_hash::{IdentityHash, KeyHasher},
    probing::{LinearProbing, ProbingFunction},
};

/// An occupied slot holding a key-value pair
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<K, V> {
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key
    value: V,
}

/// Where a probe sequence for a key ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotSearch {
    /// The slot at `index` holds an equal key
    Found {
        /// Slot index
        index: usize,
        /// Probes performed, including the final one
        probes: usize,
    },
    /// The slot at `index` is empty, so the key is absent
    Vacant {
        /// Slot index
        index: usize,
        /// Probes performed, including the final one
        probes: usize,
    },
    /// `capacity` probes visited neither the key nor an empty slot
    Exhausted,
}

/// A fixed-capacity hash table with open addressing and an injectable probing strategy.
///
/// Every entry lives directly in the backing storage. Collisions are resolved
/// by asking the probing function for the next candidate slot until an empty
/// slot or an equal key turns up. Entries are never removed, so reaching an
/// empty slot proves a key is absent and no tombstones are needed. Adding
/// deletion would break that guarantee.
///
/// The capacity is fixed at construction. When no empty slot can be reached
/// within `capacity` probes, inserts fail with [`TableError::CapacityExhausted`]
/// instead of growing the table.
///
/// `insert` never changes [`len`](Self::len). Callers that create a new entry
/// through `insert` account for it with [`record_insertion`](Self::record_insertion);
/// [`get_or_insert_with`](Self::get_or_insert_with) does both steps.
pub struct ProbingHashtable<K, V, P = LinearProbing, H = IdentityHash> {
    /// The slots storing the key-value pairs
    slots: Vec<Option<Entry<K, V>>>,
    /// Number of entries recorded by callers
    size: usize,
    /// Number of slots, fixed at construction
    capacity: NonZeroUsize,
    /// Strategy producing the probe sequence
    probing: P,
    /// Hash function producing the base hash of a key
    hasher: H,
}

impl<K, V, P, H> fmt::Debug for ProbingHashtable<K, V, P, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbingHashtable")
            .field("size", &self.size)
            .field("capacity", &self.capacity)
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<K, V, P, H> ProbingHashtable<K, V, P, H>
where
    K: Eq,
    P: ProbingFunction,
    H: KeyHasher<K>,
{
    /// Creates a table with `capacity` empty slots, probing with `probing` and hashing with `hasher`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] when `capacity` is 0.
    pub fn empty(capacity: usize, probing: P, hasher: H) -> Result<Self, TableError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(TableError::ZeroCapacity)?;
        let mut slots = Vec::with_capacity(capacity.get());
        slots.resize_with(capacity.get(), || None);

        Ok(Self { slots, size: 0, capacity, probing, hasher })
    }

    /// Creates a table with `capacity` empty slots and the default strategy and hash function.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] when `capacity` is 0.
    pub fn with_capacity(capacity: usize) -> Result<Self, TableError>
    where
        P: Default,
        H: Default,
    {
        Self::empty(capacity, P::default(), H::default())
    }

    /// Follows the probe sequence of `key` until it finds the key, an empty slot,
    /// or runs out of attempts.
    fn locate(&self, key: &K) -> Result<SlotSearch, TableError> {
        let base_hash = self.hasher.hash_key(key);

        for attempt in 0..self.capacity.get() {
            let index = self.probing.probe(base_hash, attempt, self.capacity);
            let probes = attempt.saturating_add(1);
            match self.slots.get(index) {
                None => {
                    return Err(TableError::ProbeOutOfRange {
                        index,
                        capacity: self.capacity.get(),
                    });
                }
                Some(None) => return Ok(SlotSearch::Vacant { index, probes }),
                Some(Some(entry)) if entry.key == *key => {
                    return Ok(SlotSearch::Found { index, probes });
                }
                Some(Some(_)) => trace!("slot {index} taken on attempt {attempt}"),
            }
        }

        Ok(SlotSearch::Exhausted)
    }

    /// Builds the error for an insert that found no free slot
    fn exhausted(&self) -> TableError {
        let capacity = self.capacity.get();
        warn!("probing table of capacity {capacity} is out of reachable slots (size {})", self.size);
        TableError::CapacityExhausted { capacity, attempts: capacity }
    }

    /// Mutable access to the slot at `index`
    fn slot_mut(&mut self, index: usize) -> Result<&mut Option<Entry<K, V>>, TableError> {
        let capacity = self.capacity.get();
        self.slots.get_mut(index).ok_or(TableError::ProbeOutOfRange { index, capacity })
    }

    /// Writes `value` under `key`, returning the value it replaced.
    ///
    /// A key that is already present keeps its slot and only has its value
    /// overwritten. The logical size is left untouched either way: when this
    /// returns `Ok(None)` a new entry was created and the caller should follow
    /// up with [`record_insertion`](Self::record_insertion).
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityExhausted`] when `capacity` probes reach
    /// neither the key nor an empty slot, and [`TableError::ProbeOutOfRange`]
    /// when the probing function leaves the table.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, TableError> {
        match self.locate(&key)? {
            SlotSearch::Found { index, .. } => {
                let slot = self.slot_mut(index)?;
                Ok(slot.as_mut().map(|entry| mem::replace(&mut entry.value, value)))
            }
            SlotSearch::Vacant { index, .. } => {
                *self.slot_mut(index)? = Some(Entry { key, value });
                Ok(None)
            }
            SlotSearch::Exhausted => Err(self.exhausted()),
        }
    }

    /// Accounts for one new entry created through [`insert`](Self::insert).
    ///
    /// The size never exceeds the capacity.
    pub fn record_insertion(&mut self) {
        self.size = self.size.saturating_add(1).min(self.capacity.get());
    }

    /// Retrieve the value stored under `key`.
    ///
    /// Follows the same probe sequence as `insert` and stops at the first
    /// empty slot, or after `capacity` probes.
    #[must_use]
    pub fn lookup(&self, key: &K) -> Option<&V> {
        match self.locate(key) {
            Ok(SlotSearch::Found { index, .. }) => {
                self.slots.get(index).and_then(Option::as_ref).map(|entry| &entry.value)
            }
            _ => None,
        }
    }

    /// Get a mutable reference to the value stored under `key`
    pub fn lookup_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.locate(key) {
            Ok(SlotSearch::Found { index, .. }) => {
                self.slots.get_mut(index).and_then(Option::as_mut).map(|entry| &mut entry.value)
            }
            _ => None,
        }
    }

    /// Returns true if the table holds a value for `key`
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.lookup(key).is_some()
    }

    /// Returns the value under `key`, creating it with `make` first if it is absent.
    ///
    /// A newly created entry is counted in [`len`](Self::len).
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert). An existing key never fails.
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> Result<&mut V, TableError>
    where
        F: FnOnce() -> V,
    {
        let index = match self.locate(&key)? {
            SlotSearch::Found { index, .. } => index,
            SlotSearch::Vacant { index, .. } => {
                *self.slot_mut(index)? = Some(Entry { key, value: make() });
                self.record_insertion();
                index
            }
            SlotSearch::Exhausted => return Err(self.exhausted()),
        };

        let capacity = self.capacity.get();
        self.slot_mut(index)?
            .as_mut()
            .map(|entry| &mut entry.value)
            .ok_or(TableError::ProbeOutOfRange { index, capacity })
    }

    /// Number of probes a lookup of `key` performs before it stops.
    ///
    /// Returns `None` when the lookup gives up without reaching the key or an
    /// empty slot.
    #[must_use]
    pub fn probe_length(&self, key: &K) -> Option<usize> {
        match self.locate(key) {
            Ok(SlotSearch::Found { probes, .. } | SlotSearch::Vacant { probes, .. }) => {
                Some(probes)
            }
            _ => None,
        }
    }
}

impl<K, V, P, H> ProbingHashtable<K, V, P, H> {
    /// Returns the number of entries recorded in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if no entry has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the ratio of recorded entries to slots
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity.get() as f64
    }

    /// Returns an iterator over the key-value pairs in slot order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: &self.slots, index: 0, _marker: PhantomData }
    }
}

/// Iterator over the key-value pairs of a `ProbingHashtable`, in slot order
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// The slots of the table
    slots: &'a [Option<Entry<K, V>>],
    /// Next slot to inspect
    index: usize,
    /// Phantom data to hold the lifetime and type parameters
    _marker: PhantomData<&'a (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Some(entry) = slot {
                return Some((&entry.key, &entry.value));
            }
        }
        None
    }
}
