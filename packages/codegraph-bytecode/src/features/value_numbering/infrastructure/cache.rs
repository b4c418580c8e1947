//! Value-number cache
//!
//! Maps `(location, input value numbers)` to the numbers an instruction
//! produced, so re-visiting an instruction with the same inputs during the
//! fixed-point iteration yields the same outputs. LRU-bounded per method.

use crate::features::flow_graph::domain::Location;
use crate::features::value_numbering::domain::{ValueNumber, ValueNumberFactory};
use lru::LruCache;
use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    location: Location,
    inputs: Vec<ValueNumber>,
}

pub struct ValueNumberCache {
    entries: LruCache<CacheKey, Vec<ValueNumber>>,
    hits: usize,
    misses: usize,
}

impl ValueNumberCache {
    /// Create a cache holding at most `capacity` entries (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Outputs of the instruction at `location` for `inputs`, minting
    /// `output_count` fresh numbers on a miss
    pub fn outputs(
        &mut self,
        location: Location,
        inputs: &[ValueNumber],
        output_count: usize,
        factory: &mut ValueNumberFactory,
    ) -> Vec<ValueNumber> {
        let key = CacheKey {
            location,
            inputs: inputs.to_vec(),
        };
        if let Some(outputs) = self.entries.get(&key) {
            self.hits += 1;
            return outputs.clone();
        }

        self.misses += 1;
        let outputs: Vec<ValueNumber> = (0..output_count).map(|_| factory.create()).collect();
        self.entries.put(key, outputs.clone());
        outputs
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Get cache hit rate (0.0-1.0)
    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
