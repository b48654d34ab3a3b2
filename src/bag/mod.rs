//! The priority bag (C5): bounded capacity across L priority levels, with
//! key-merging `putIn`, level-weighted `takeOut`, direct `pickOut`, and
//! durability-decaying `putBack`. Concepts, term-links, task-links, and the
//! novel-task queue are all instances of this one structure.

use std::collections::VecDeque;
use std::hash::Hash;

use hashbrown::HashMap;
use rand::Rng;

/// An item a bag can hold: it knows its own key (for `putIn` merge /
/// `pickOut`), its priority (for leveling), and how to merge with another
/// item sharing its key and how to decay on `putBack`.
pub trait BagItem {
    type Key: Hash + Eq + Clone;

    fn key(&self) -> Self::Key;
    fn priority(&self) -> f32;
    fn merge_with(&mut self, other: Self);
    fn decay(&mut self, rate: f32);
}

pub struct Bag<T: BagItem> {
    capacity: usize,
    levels: usize,
    items: HashMap<T::Key, T>,
    buckets: Vec<VecDeque<T::Key>>,
}

impl<T: BagItem> Bag<T> {
    pub fn new(capacity: usize, levels: usize) -> Self {
        let levels = levels.max(1);
        Bag {
            capacity,
            levels,
            items: HashMap::with_capacity(capacity),
            buckets: (0..levels).map(|_| VecDeque::new()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn level_of(&self, priority: f32) -> usize {
        let idx = (priority.clamp(0.0, 1.0) * self.levels as f32) as usize;
        idx.min(self.levels - 1)
    }

    fn remove_key_from_buckets(&mut self, key: &T::Key, level: usize) {
        if let Some(bucket) = self.buckets.get_mut(level) {
            if let Some(pos) = bucket.iter().position(|k| k == key) {
                bucket.remove(pos);
            }
        }
    }

    fn lowest_nonempty_level(&self) -> Option<usize> {
        self.buckets.iter().position(|b| !b.is_empty())
    }

    /// Insert or merge-on-key-collision; evicts and returns the
    /// lowest-priority item if capacity was exceeded.
    pub fn put_in(&mut self, mut item: T) -> Option<T> {
        let key = item.key();
        if let Some(existing) = self.items.remove(&key) {
            let old_level = self.level_of(existing.priority());
            self.remove_key_from_buckets(&key, old_level);
            item.merge_with(existing);
        }

        let mut evicted = None;
        if self.items.len() >= self.capacity && !self.items.contains_key(&key) {
            evicted = self.evict_lowest();
        }

        let level = self.level_of(item.priority());
        self.buckets[level].push_back(key.clone());
        self.items.insert(key, item);
        evicted
    }

    fn evict_lowest(&mut self) -> Option<T> {
        let level = self.lowest_nonempty_level()?;
        let key = self.buckets[level].pop_front()?;
        self.items.remove(&key)
    }

    /// Removes and returns an item with probability proportional to its
    /// level index (higher levels overwhelmingly preferred).
    pub fn take_out(&mut self, rng: &mut impl Rng) -> Option<T> {
        let total_weight: usize = self
            .buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_empty())
            .map(|(lvl, _)| lvl + 1)
            .sum();
        if total_weight == 0 {
            return None;
        }
        let mut pick = rng.gen_range(0..total_weight);
        for (lvl, bucket) in self.buckets.iter_mut().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            let weight = lvl + 1;
            if pick < weight {
                let key = bucket.pop_front()?;
                return self.items.remove(&key);
            }
            pick -= weight;
        }
        None
    }

    /// Direct removal of a specific item by key.
    pub fn pick_out(&mut self, key: &T::Key) -> Option<T> {
        let item = self.items.remove(key)?;
        let level = self.level_of(item.priority());
        self.remove_key_from_buckets(key, level);
        Some(item)
    }

    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.items.get(key)
    }

    /// Durability-decay then reinsert.
    pub fn put_back(&mut self, mut item: T, decay: f32) -> Option<T> {
        item.decay(decay);
        self.put_in(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
    }
}
