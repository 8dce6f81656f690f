//! A time-bounded cache of provider responses.
//!
//! Keys are the bincode encoding of a query. Entries expire lazily: a read past an entry's
//! deadline evicts it and reports a miss. There is no background sweep; [TtlCache::purge]
//! drops every expired entry on demand.

use std::collections::hash_map::Entry;
use std::ops::{Add, AddAssign};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use bincode::Encode;
use rustc_hash::FxHashMap;
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub evictions: usize,
}

impl Add<bool> for CacheStats {
    type Output = CacheStats;

    fn add(self, cache_hit: bool) -> Self::Output {
        if cache_hit {
            Self {
                hits: self.hits + 1,
                ..self
            }
        } else {
            Self {
                misses: self.misses + 1,
                ..self
            }
        }
    }
}

impl Add for CacheStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            hits: self.hits + rhs.hits,
            misses: self.misses + rhs.misses,
            evictions: self.evictions + rhs.evictions,
        }
    }
}

impl AddAssign<bool> for CacheStats {
    fn add_assign(&mut self, cache_hit: bool) {
        if cache_hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }
}

impl AddAssign for CacheStats {
    fn add_assign(&mut self, rhs: Self) {
        self.hits += rhs.hits;
        self.misses += rhs.misses;
        self.evictions += rhs.evictions;
    }
}

type Bytes = Vec<u8>;

#[derive(Debug)]
struct Expiring<V> {
    value: V,
    deadline: Instant,
}

#[derive(Debug)]
struct Store<V> {
    entries: FxHashMap<Bytes, Expiring<V>>,
    stats: CacheStats,
}

/// A thread-safe map whose entries outlive their insertion by a fixed time-to-live.
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    store: Mutex<Store<V>>,
}
impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            store: Mutex::new(Store {
                entries: FxHashMap::default(),
                stats: CacheStats::default(),
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &impl Encode) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&self, key: &impl Encode, now: Instant) -> Option<V> {
        let encoded = encode(key);
        let mut guard = self.lock();
        let store = &mut *guard;
        let value = match store.entries.entry(encoded) {
            Entry::Occupied(entry) if entry.get().deadline <= now => {
                entry.remove();
                store.stats.evictions += 1;
                None
            }
            Entry::Occupied(entry) => Some(entry.get().value.clone()),
            Entry::Vacant(_) => None,
        };
        store.stats += value.is_some();
        value
    }

    /// Inserts `value`, replacing any existing entry for the key along with its deadline.
    pub fn insert(&self, key: &impl Encode, value: V) {
        self.insert_at(key, value, Instant::now())
    }

    pub fn insert_at(&self, key: &impl Encode, value: V, now: Instant) {
        let encoded = encode(key);
        let deadline = now + self.ttl;
        trace!("caching {} key bytes until {deadline:?}", encoded.len());
        self.lock()
            .entries
            .insert(encoded, Expiring { value, deadline });
    }

    /// Evicts all entries that have expired by `now`, returning the number evicted.
    pub fn purge_at(&self, now: Instant) -> usize {
        let mut store = self.lock();
        let before = store.entries.len();
        store.entries.retain(|_, entry| entry.deadline > now);
        let evicted = before - store.entries.len();
        store.stats.evictions += evicted;
        evicted
    }

    pub fn purge(&self) -> usize {
        self.purge_at(Instant::now())
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats.clone()
    }

    fn lock(&self) -> MutexGuard<Store<V>> {
        // entries are replaced whole, so a poisoned store is still consistent
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn encode(key: &impl Encode) -> Bytes {
    bincode::encode_to_vec(key, bincode::config::standard())
        .unwrap_or_else(|err| panic!("cache key could not be encoded: {err}"))
}
