//! Bounded path caches.
//!
//! # Eviction
//!
//! [`BoundedCache`] holds at most `capacity` entries.  Inserting a new key
//! into a full cache first evicts one existing entry: the first key in
//! `FxHashMap` iteration order.  There is no recency or frequency tracking,
//! so hit rates are not stable under churn; only the ceiling is guaranteed.
//! `FxHashMap` has no per-process random seed, which keeps the choice of
//! victim reproducible from run to run.
//!
//! # The caches
//!
//! | Field                   | Key                         | Value        | Bound          |
//! |-------------------------|-----------------------------|--------------|----------------|
//! | `paths`                 | [`EquipmentPair`]           | `Arc<Path>`  | capacity       |
//! | `bay_paths`             | [`ZoneRouteKey`]            | `Arc<Path>`  | capacity       |
//! | `distances`             | [`ZonePair`] (unordered)    | `f64`        | capacity       |
//! | `common`                | [`ZoneRouteKey`]            | `Arc<Path>`  | zones² × classes |
//! | `zone_links`            | [`ZoneLink`]                | `Arc<Path>`  | 2 × adjacent pairs |
//!
//! `zone_links` holds the adjacency routes equipment routing stitches
//! through.  Nothing evicts from it and class-route queries never write to
//! it; it is emptied only by `clear_all`.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use ms_core::{CacheConfig, EquipmentId, TransportClass, ZoneId};

use crate::Path;

// ── Keys ──────────────────────────────────────────────────────────────────────

/// Ordered equipment pair: the key of an equipment-to-equipment path.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct EquipmentPair {
    pub from: EquipmentId,
    pub to:   EquipmentId,
}

impl EquipmentPair {
    pub fn new(from: impl Into<EquipmentId>, to: impl Into<EquipmentId>) -> Self {
        Self { from: from.into(), to: to.into() }
    }

    pub fn reversed(&self) -> Self {
        Self { from: self.to.clone(), to: self.from.clone() }
    }
}

/// Ordered zone pair plus transport class.  `class == None` is the
/// unclassed, direct zone-to-zone route.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ZoneRouteKey {
    pub from:  ZoneId,
    pub to:    ZoneId,
    pub class: Option<TransportClass>,
}

impl ZoneRouteKey {
    pub fn new(from: impl Into<ZoneId>, to: impl Into<ZoneId>, class: Option<TransportClass>) -> Self {
        Self { from: from.into(), to: to.into(), class }
    }

    pub fn reversed(&self) -> Self {
        Self { from: self.to.clone(), to: self.from.clone(), class: self.class.clone() }
    }
}

/// Ordered pair of adjacent zones: the key of a ladle-car zone link.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ZoneLink {
    pub from: ZoneId,
    pub to:   ZoneId,
}

impl ZoneLink {
    pub fn new(from: impl Into<ZoneId>, to: impl Into<ZoneId>) -> Self {
        Self { from: from.into(), to: to.into() }
    }

    pub fn reversed(&self) -> Self {
        Self { from: self.to.clone(), to: self.from.clone() }
    }
}

/// Unordered zone pair: `ZonePair::new(a, b) == ZonePair::new(b, a)`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ZonePair(ZoneId, ZoneId);

impl ZonePair {
    pub fn new(a: impl Into<ZoneId>, b: impl Into<ZoneId>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn zones(&self) -> (&ZoneId, &ZoneId) {
        (&self.0, &self.1)
    }
}

// ── BoundedCache ──────────────────────────────────────────────────────────────

/// A map with a hard entry ceiling and arbitrary single-entry eviction.
pub struct BoundedCache<K, V> {
    entries:  FxHashMap<K, V>,
    capacity: usize,
}

impl<K: Eq + Hash + Clone + fmt::Debug, V> BoundedCache<K, V> {
    /// A cache holding at most `capacity` entries.  Capacity 0 stores nothing.
    pub fn new(capacity: usize) -> Self {
        Self { entries: FxHashMap::default(), capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite.  A new key arriving at a full cache evicts one
    /// other entry first; overwriting an existing key never evicts.
    pub fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.capacity {
                if self.evict_one().is_none() {
                    break;
                }
            }
        }
        self.entries.insert(key, value);
    }

    /// Evict until `additional` new entries fit without further eviction.
    pub fn reserve(&mut self, additional: usize) {
        let target = self.capacity.saturating_sub(additional);
        while self.entries.len() > target {
            if self.evict_one().is_none() {
                break;
            }
        }
    }

    /// Remove one unspecified entry and return its key.
    pub fn evict_one(&mut self) -> Option<K> {
        let victim = self.entries.keys().next().cloned()?;
        self.entries.remove(&victim);
        debug!(key = ?victim, "evicted cache entry");
        Some(victim)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ── CacheLayer ────────────────────────────────────────────────────────────────

/// The caches behind the path planner.
///
/// `common` and `zone_links` are filled eagerly at setup and sized by the
/// layout, so they are plain maps rather than [`BoundedCache`]s.
pub struct CacheLayer {
    pub paths:      BoundedCache<EquipmentPair, Arc<Path>>,
    pub bay_paths:  BoundedCache<ZoneRouteKey, Arc<Path>>,
    pub distances:  BoundedCache<ZonePair, f64>,
    pub common:     FxHashMap<ZoneRouteKey, Arc<Path>>,
    pub zone_links: FxHashMap<ZoneLink, Arc<Path>>,
}

impl CacheLayer {
    pub fn new(path_capacity: usize, bay_path_capacity: usize, distance_capacity: usize) -> Self {
        Self {
            paths:      BoundedCache::new(path_capacity),
            bay_paths:  BoundedCache::new(bay_path_capacity),
            distances:  BoundedCache::new(distance_capacity),
            common:     FxHashMap::default(),
            zone_links: FxHashMap::default(),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.path_capacity, config.bay_path_capacity, config.distance_capacity)
    }

    /// Empty every cache, including the common-route and zone-link tables.
    pub fn clear_all(&mut self) {
        self.paths.clear();
        self.bay_paths.clear();
        self.distances.clear();
        self.common.clear();
        self.zone_links.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            path:      self.paths.len(),
            bay_path:  self.bay_paths.len(),
            distance:  self.distances.len(),
            common:    self.common.len(),
            zone_link: self.zone_links.len(),
        }
    }
}

impl Default for CacheLayer {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

/// Entry counts per cache.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub path:      usize,
    pub bay_path:  usize,
    pub distance:  usize,
    pub common:    usize,
    pub zone_link: usize,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "paths={} bay_paths={} distances={} common={} zone_links={}",
            self.path, self.bay_path, self.distance, self.common, self.zone_link
        )
    }
}
