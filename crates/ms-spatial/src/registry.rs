//! Zone registry: zone geometry, centers, and point-in-zone lookup.
//!
//! # Build policy
//!
//! [`ZoneRegistry::build`] never fails.  Each malformed zone entry (missing
//! corner, non-finite value, non-positive extent) is logged and skipped, and
//! so is a zone whose rectangle overlaps one already registered.  An empty
//! registry is permitted but logged as a degraded layout.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) holds one axis-aligned envelope per zone, so
//! `zone_at` only tests the rectangles whose envelope touches the query
//! point.  Points on an edge shared by two touching zones resolve to the
//! zone registered first.

use rstar::{AABB, RTree, RTreeObject};
use rustc_hash::FxHashMap;
use tracing::{debug, error, info, warn};

use ms_core::{LayoutConfig, Point, ZoneId};

use crate::Zone;

// ── R-tree zone entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a zone's rectangle and its registry slot.
#[derive(Clone)]
struct ZoneEntry {
    envelope: AABB<[f64; 2]>,
    slot:     usize,
}

impl RTreeObject for ZoneEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

fn envelope_of(zone: &Zone) -> AABB<[f64; 2]> {
    AABB::from_corners(
        [zone.top_left.x, zone.top_left.y],
        [zone.bottom_right.x, zone.bottom_right.y],
    )
}

// ── ZoneRegistry ──────────────────────────────────────────────────────────────

/// Owns every zone of the current layout.
///
/// Zones keep registration order (ascending zone id for a config-built
/// registry); that order is what `iter` yields and what breaks `zone_at`
/// ties on shared edges.
pub struct ZoneRegistry {
    zones:       Vec<Zone>,
    by_id:       FxHashMap<ZoneId, usize>,
    spatial_idx: RTree<ZoneEntry>,
}

impl ZoneRegistry {
    pub fn empty() -> Self {
        Self { zones: Vec::new(), by_id: FxHashMap::default(), spatial_idx: RTree::new() }
    }

    /// Build zones from a layout, skipping malformed or overlapping entries.
    pub fn build(config: &LayoutConfig) -> Self {
        let mut registry = Self::empty();

        for (id, zone_cfg) in &config.zones {
            let zone = zone_cfg
                .corners()
                .map_err(crate::SpatialError::from)
                .and_then(|(tl, br)| Zone::new(ZoneId::new(id.as_str()), tl, br));
            match zone {
                Ok(zone) => {
                    let zone = zone
                        .with_routes(zone_cfg.routes.clone())
                        .with_rails(zone_cfg.crane_rails.clone());
                    registry.insert(zone);
                }
                Err(e) => error!(zone = %id, error = %e, "skipping malformed zone"),
            }
        }

        if registry.is_empty() {
            warn!("layout has no usable zones; spatial queries will be degraded");
        } else {
            info!(zones = registry.len(), "zone registry built");
        }
        registry
    }

    /// Register one zone.  Returns `false` (and logs) if the id is taken or
    /// the rectangle overlaps a registered zone.
    pub fn insert(&mut self, zone: Zone) -> bool {
        if self.by_id.contains_key(&zone.id) {
            error!(zone = %zone.id, "duplicate zone id; keeping the first");
            return false;
        }
        let envelope = envelope_of(&zone);
        if let Some(other) = self
            .spatial_idx
            .locate_in_envelope_intersecting(&envelope)
            .map(|e| &self.zones[e.slot])
            .find(|other| other.overlaps(&zone))
        {
            error!(zone = %zone.id, overlaps = %other.id, "skipping zone that overlaps a registered zone");
            return false;
        }

        debug!(
            zone = %zone.id,
            top_left = %zone.top_left,
            bottom_right = %zone.bottom_right,
            "registered zone"
        );
        let slot = self.zones.len();
        self.by_id.insert(zone.id.clone(), slot);
        self.spatial_idx.insert(ZoneEntry { envelope, slot });
        self.zones.push(zone);
        true
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Zone> {
        self.by_id.get(id).map(|&slot| &self.zones[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Center of zone `id`, if registered.
    pub fn center(&self, id: &str) -> Option<Point> {
        self.get(id).map(|z| z.center)
    }

    /// Zones in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Zone> + '_ {
        self.zones.iter()
    }

    /// The zone containing `(x, y)`, boundary inclusive.
    ///
    /// Returns `None` when the point is outside every zone.
    pub fn zone_at(&self, x: f64, y: f64) -> Option<&ZoneId> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        self.spatial_idx
            .locate_in_envelope_intersecting(&AABB::from_point([x, y]))
            .map(|e| e.slot)
            .min()
            .map(|slot| &self.zones[slot].id)
    }
}

impl Default for ZoneRegistry {
    fn default() -> Self {
        Self::empty()
    }
}
