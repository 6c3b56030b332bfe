//! Memoizing wrapper around a [`TextMeasure`].
//!
//! Text measurement dominates the cost of font-size search and box construction, which
//! repeatedly query the same `(text, size, family)` triples. [`MeasureCache`] keeps up to
//! [`DEFAULT_CAPACITY`] results per query kind, each valid for [`DEFAULT_TTL`].
//!
//! Eviction is first-in first-out. The cache is single-threaded and uses interior mutability
//! so it can sit behind the `&self` methods of [`TextMeasure`].
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use crate::text::{TextExtent, TextMeasure};

/// Entries kept per query kind.
pub const DEFAULT_CAPACITY: usize = 2000;

/// Lifetime of a cached entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Key {
    text: String,
    font_size: u32,
    font_family: String,
}

impl Key {
    fn new(text: &str, font_size: f32, font_family: &str) -> Self {
        Self {
            text: text.to_owned(),
            font_size: font_size.to_bits(),
            font_family: font_family.to_owned(),
        }
    }
}

struct Entry<V> {
    value: V,
    inserted: Instant,
    seq: u64,
}

struct TtlMap<V> {
    entries: HashMap<Key, Entry<V>>,
    order: VecDeque<(Key, u64)>,
    next_seq: u64,
}

impl<V: Copy> TtlMap<V> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            next_seq: 0,
        }
    }

    fn get(&mut self, key: &Key, ttl: Duration) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.inserted.elapsed() >= ttl,
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|e| e.value)
    }

    fn insert(&mut self, key: Key, value: V, capacity: usize) {
        while self.entries.len() >= capacity.max(1) {
            let Some((oldest, seq)) = self.order.pop_front() else {
                break;
            };
            // Stale queue slots belong to keys that were re-inserted or expired.
            if self.entries.get(&oldest).is_some_and(|e| e.seq == seq) {
                self.entries.remove(&oldest);
            }
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.push_back((key.clone(), seq));
        self.entries.insert(
            key,
            Entry {
                value,
                inserted: Instant::now(),
                seq,
            },
        );
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Hit and miss counters of a [`MeasureCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// A [`TextMeasure`] that memoizes another measurer.
pub struct MeasureCache<M> {
    inner: M,
    capacity: usize,
    ttl: Duration,
    widths: RefCell<TtlMap<f32>>,
    extents: RefCell<TtlMap<TextExtent>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<M: TextMeasure> MeasureCache<M> {
    /// Wraps `inner` with the default capacity and lifetime.
    pub fn new(inner: M) -> Self {
        Self::with_limits(inner, DEFAULT_CAPACITY, DEFAULT_TTL)
    }

    /// Wraps `inner` keeping at most `capacity` entries per query kind for `ttl` each.
    pub fn with_limits(inner: M, capacity: usize, ttl: Duration) -> Self {
        Self {
            inner,
            capacity,
            ttl,
            widths: RefCell::new(TtlMap::new()),
            extents: RefCell::new(TtlMap::new()),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// The wrapped measurer.
    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
        }
    }

    /// Number of live entries across both query kinds.
    pub fn len(&self) -> usize {
        self.widths.borrow().len() + self.extents.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached entry. Counters are kept.
    pub fn clear(&self) {
        self.widths.borrow_mut().clear();
        self.extents.borrow_mut().clear();
    }

    fn record(&self, hit: bool) {
        let counter = if hit { &self.hits } else { &self.misses };
        counter.set(counter.get() + 1);
    }
}

impl<M: TextMeasure> TextMeasure for MeasureCache<M> {
    fn measure_width(&self, text: &str, font_size: f32, font_family: &str) -> f32 {
        let key = Key::new(text, font_size, font_family);
        if let Some(width) = self.widths.borrow_mut().get(&key, self.ttl) {
            self.record(true);
            return width;
        }
        self.record(false);
        let width = self.inner.measure_width(text, font_size, font_family);
        self.widths.borrow_mut().insert(key, width, self.capacity);
        width
    }

    fn measure_extent(&self, font_size: f32, font_family: &str, text: &str) -> TextExtent {
        let key = Key::new(text, font_size, font_family);
        if let Some(extent) = self.extents.borrow_mut().get(&key, self.ttl) {
            self.record(true);
            return extent;
        }
        self.record(false);
        let extent = self.inner.measure_extent(font_size, font_family, text);
        self.extents.borrow_mut().insert(key, extent, self.capacity);
        extent
    }
}
