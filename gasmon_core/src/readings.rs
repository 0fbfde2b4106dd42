//! Bounded weight series used for charting.
//!
//! Append-only with FIFO eviction: once the buffer is at capacity the oldest
//! reading is dropped before the new one is stored. Iteration is always
//! oldest to newest.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::collections::vec_deque::Iter;

/// Default number of readings retained.
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Local receipt time, epoch milliseconds.
    pub timestamp: i64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadingBuffer {
    items: VecDeque<Reading>,
    capacity: usize,
}

impl Default for ReadingBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ReadingBuffer {
    /// A zero capacity is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn append(&mut self, weight: f64, timestamp: i64) {
        while self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(Reading { timestamp, weight });
    }

    /// Change the capacity, evicting the oldest readings if it shrinks.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.items.back()
    }

    pub fn iter(&self) -> Iter<'_, Reading> {
        self.items.iter()
    }

    pub fn to_vec(&self) -> Vec<Reading> {
        self.items.iter().copied().collect()
    }
}

impl<'a> IntoIterator for &'a ReadingBuffer {
    type Item = &'a Reading;
    type IntoIter = Iter<'a, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Persisted as a plain array; capacity comes from config at load time.
impl Serialize for ReadingBuffer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<'de> Deserialize<'de> for ReadingBuffer {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items: Vec<Reading> = Vec::deserialize(deserializer)?;
        let mut buf = ReadingBuffer::with_capacity(DEFAULT_CAPACITY.max(items.len()));
        for r in items {
            buf.append(r.weight, r.timestamp);
        }
        Ok(buf)
    }
}
