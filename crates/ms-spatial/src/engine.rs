//! The `SpatialEngine`, the single entry point the simulation driver uses.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use ms_core::{LayoutConfig, Point, TransportClass, ZoneId};

use crate::collision::{self, ActorPositionProvider, CollisionPredicate};
use crate::{CacheStats, Path, PathPlanner, PlacementLedger, SpatialResult, ZoneRegistry};

/// Zones, equipment placements, path caches, and collision collaborators
/// for one plant layout.
///
/// # Access model
///
/// Every query runs to completion before returning and the engine holds no
/// locks.  A host that drives it from several threads must serialise access
/// to an instance; [`rebuild`](Self::rebuild) and
/// [`clear_all`](Self::clear_all) in particular must not overlap any query.
///
/// Create via [`SpatialEngine::new`] or
/// [`SpatialEngineBuilder`][crate::SpatialEngineBuilder].
pub struct SpatialEngine<P, C> {
    pub(crate) config:    LayoutConfig,
    pub(crate) registry:  ZoneRegistry,
    pub(crate) ledger:    PlacementLedger,
    pub(crate) planner:   PathPlanner,
    pub(crate) actors:    P,
    pub(crate) predicate: C,
}

impl SpatialEngine<collision::NoActors, collision::MinSpacing> {
    /// Engine with no crane collaborators: every zone reports no collision.
    pub fn new(config: LayoutConfig) -> Self {
        crate::SpatialEngineBuilder::new(config).build()
    }
}

impl<P: ActorPositionProvider, C: CollisionPredicate> SpatialEngine<P, C> {
    /// Build zones and precompute routes for the current config.
    pub(crate) fn setup(&mut self) {
        self.registry = ZoneRegistry::build(&self.config);

        let order = self.config.ordered_zone_ids();
        // A bad speed only disables route precomputation; already logged.
        let linked = self.planner.precompute_zone_routes(&self.registry, &order).unwrap_or(0);
        let common = self.planner.precompute_common_routes(&self.registry);

        info!(
            zones = self.registry.len(),
            zone_routes = linked,
            common_routes = common,
            "spatial engine ready"
        );
    }

    // ── Layout lifecycle ──────────────────────────────────────────────────

    /// Replace the layout.  Drops every zone, every equipment placement,
    /// and every cache before building from `config`.
    pub fn rebuild(&mut self, config: LayoutConfig) {
        self.ledger.clear();
        self.planner.reset(&config);
        self.config = config;
        self.setup();
    }

    /// Empty every cache and the zone-link table.  Zones and placements are
    /// kept; equipment routes between different zones report `NoRoute`
    /// until the next rebuild.
    pub fn clear_all(&mut self) {
        self.planner.caches_mut().clear_all();
        info!("all spatial caches cleared");
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.planner.caches().stats()
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &PlacementLedger {
        &self.ledger
    }

    pub fn planner(&self) -> &PathPlanner {
        &self.planner
    }

    // ── Zone queries ──────────────────────────────────────────────────────

    /// The zone containing `(x, y)`, if any.
    pub fn zone_at(&self, x: f64, y: f64) -> Option<&ZoneId> {
        self.registry.zone_at(x, y)
    }

    /// Center of a zone; the origin (logged) for an unknown zone.
    pub fn zone_center(&self, zone_id: &str) -> Point {
        self.registry.center(zone_id).unwrap_or_else(|| {
            warn!(zone = %zone_id, "zone not found; defaulting to origin");
            Point::ORIGIN
        })
    }

    /// Home position of a zone's first crane; the origin (logged) for an
    /// unknown zone.
    pub fn actor_home(&self, zone_id: &str) -> Point {
        match self.registry.get(zone_id) {
            Some(zone) => zone.actor_home(),
            None => {
                warn!(zone = %zone_id, "zone not found; crane home defaults to origin");
                Point::ORIGIN
            }
        }
    }

    /// Center-to-center distance between two zones.
    pub fn zone_distance(&mut self, a: &str, b: &str) -> SpatialResult<f64> {
        self.planner.zone_distance(&self.registry, a, b)
    }

    // ── Equipment ─────────────────────────────────────────────────────────

    /// Place equipment inside a zone.  See [`PlacementLedger::place`].
    pub fn place(
        &mut self,
        equipment_id:   &str,
        equipment_type: &str,
        zone_id:        &str,
        position:       Point,
    ) -> SpatialResult<()> {
        self.ledger.place(&self.registry, equipment_id, equipment_type, zone_id, position)
    }

    /// Recorded position; the origin (logged) for unknown equipment.
    pub fn position_of(&self, equipment_id: &str) -> Point {
        self.ledger.position_of(equipment_id)
    }

    pub fn zone_of(&self, equipment_id: &str) -> Option<&ZoneId> {
        self.ledger.zone_of(equipment_id)
    }

    pub fn is_in_zone(&self, equipment_id: &str, zone_id: &str) -> bool {
        self.ledger.is_in_zone(equipment_id, zone_id)
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Ladle-car path between two pieces of equipment.
    /// See [`PathPlanner::route`].
    pub fn route(&mut self, from_equipment: &str, to_equipment: &str) -> SpatialResult<Arc<Path>> {
        self.planner.route(&self.ledger, from_equipment, to_equipment)
    }

    /// Path between two zones for a transport class (`None` routes
    /// directly).  See [`PathPlanner::route_between_zones`].
    pub fn route_between_zones(
        &mut self,
        from_zone:       &str,
        to_zone:         &str,
        transport_class: Option<&str>,
    ) -> SpatialResult<Arc<Path>> {
        let class = transport_class.map(TransportClass::from);
        self.planner
            .route_between_zones(&self.registry, from_zone, to_zone, class.as_ref())
    }

    // ── Collisions ────────────────────────────────────────────────────────

    /// Collision status of every zone at simulation time `time`.
    pub fn collisions_at(&self, time: f64) -> BTreeMap<ZoneId, bool> {
        collision::collisions_at(
            &self.registry,
            |zone| self.config.actor_slots(zone.as_str()),
            time,
            &self.actors,
            &self.predicate,
        )
    }
}
