//! Ladle-car path planner.
//!
//! # Two planning levels
//!
//! **Zone level, at setup.**  [`PathPlanner::precompute_zone_routes`] chains
//! the zones in configured order and stores a direct center-to-center path
//! for each adjacent pair (both directions) in the zone-link table, plus the
//! pair's distance in the distance matrix.  Equipment routing reads zone
//! links only, so class-route queries can neither evict nor add a link.
//! [`PathPlanner::precompute_common_routes`] fills the common-route table
//! for every ordered pair of distinct zones and every transport class.
//!
//! **Equipment level, on demand.**  [`PathPlanner::route`] stitches the
//! source equipment's position, the zone link, and the
//! destination equipment's position into one path, and memoises it together
//! with its reverse:
//!
//! ```text
//! eaf1 ──► center(A) ──► center(B) ──► caster1
//! ```
//!
//! Failures inside the stitching step are logged and reported as
//! [`SpatialError::NoRoute`]; they never propagate as anything harsher.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use ms_core::{Anchor, LayoutConfig, Point, TransportClass, ZoneId};

use crate::path::check_speed;
use crate::{
    CacheLayer, EquipmentPair, Path, PlacementLedger, SpatialError, SpatialResult, ZoneLink,
    ZonePair, ZoneRegistry, ZoneRouteKey,
};

/// Synthesises and memoises ladle-car paths.
///
/// Owns the [`CacheLayer`] it was built with; the zone registry and the
/// placement ledger are borrowed per call.
pub struct PathPlanner {
    speed:   f64,
    classes: Vec<(TransportClass, Anchor)>,
    caches:  CacheLayer,
}

impl PathPlanner {
    /// `speed` is the ladle-car speed in plan units per minute; `classes`
    /// lists every known transport class with its routing anchor.
    pub fn new(speed: f64, classes: Vec<(TransportClass, Anchor)>, caches: CacheLayer) -> Self {
        Self { speed, classes, caches }
    }

    pub fn from_config(config: &LayoutConfig, caches: CacheLayer) -> Self {
        Self::new(config.ladle_car_speed, classes_of(config), caches)
    }

    /// Adopt a new layout's speed, classes, and cache sizes, dropping every
    /// cached path.
    pub fn reset(&mut self, config: &LayoutConfig) {
        self.caches = CacheLayer::from_config(&config.cache);
        self.speed = config.ladle_car_speed;
        self.classes = classes_of(config);
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn caches(&self) -> &CacheLayer {
        &self.caches
    }

    pub fn caches_mut(&mut self) -> &mut CacheLayer {
        &mut self.caches
    }

    fn anchor_for(&self, class: Option<&TransportClass>) -> Anchor {
        class
            .and_then(|c| self.classes.iter().find(|(name, _)| name == c))
            .map(|(_, anchor)| *anchor)
            .unwrap_or_default()
    }

    // ── Setup-time precomputation ─────────────────────────────────────────

    /// Store a direct path for each adjacent pair in `order`.
    ///
    /// Ids in `order` that are not registered are skipped.  Returns the
    /// number of zone pairs linked.
    ///
    /// # Errors
    ///
    /// [`SpatialError::Config`] if the configured speed is not positive; no
    /// paths are stored in that case.
    pub fn precompute_zone_routes(
        &mut self,
        registry: &ZoneRegistry,
        order:    &[String],
    ) -> SpatialResult<usize> {
        if let Err(e) = check_speed(self.speed) {
            error!(speed = self.speed, "ladle car speed must be positive; default zone routes not created");
            return Err(e);
        }

        let chain: Vec<_> = order
            .iter()
            .filter_map(|id| {
                let zone = registry.get(id);
                if zone.is_none() {
                    warn!(zone = %id, "zone order names an unknown zone; skipping it");
                }
                zone
            })
            .collect();

        let mut linked = 0;
        for pair in chain.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let path = Path::through(&[a.center, b.center], self.speed)?;
            debug!(
                from = %a.id,
                to = %b.id,
                distance = path.distance(),
                travel_time = path.travel_time(),
                "zone route"
            );
            self.caches.distances.put(ZonePair::new(a.id.clone(), b.id.clone()), path.distance());
            let link = ZoneLink::new(a.id.clone(), b.id.clone());
            self.caches.zone_links.insert(link.reversed(), Arc::new(path.reversed()));
            self.caches.zone_links.insert(link, Arc::new(path));
            linked += 1;
        }
        Ok(linked)
    }

    /// Fill the common-route table for every ordered pair of distinct zones
    /// and every transport class (plus the unclassed route).  Returns the
    /// number of routes stored.
    pub fn precompute_common_routes(&mut self, registry: &ZoneRegistry) -> usize {
        if registry.len() < 2 {
            return 0;
        }
        let mut classes: Vec<Option<TransportClass>> =
            self.classes.iter().map(|(c, _)| Some(c.clone())).collect();
        classes.push(None);

        let mut routes = Vec::new();
        for from in registry.iter() {
            for to in registry.iter().filter(|z| z.id != from.id) {
                for class in &classes {
                    let key = ZoneRouteKey::new(from.id.clone(), to.id.clone(), class.clone());
                    if let Some(path) = self.synthesize(registry, key.from.as_str(), key.to.as_str(), class.as_ref()) {
                        routes.push((key, path));
                    }
                }
            }
        }

        let count = routes.len();
        self.caches
            .common
            .extend(routes.into_iter().map(|(key, path)| (key, Arc::new(path))));
        info!(routes = count, "precomputed common zone routes");
        count
    }

    /// Build the route `from → to` for `class` without caching it.
    ///
    /// Returns `None` if either zone is unknown or the speed is invalid.
    pub fn synthesize(
        &self,
        registry: &ZoneRegistry,
        from:     &str,
        to:       &str,
        class:    Option<&TransportClass>,
    ) -> Option<Path> {
        let start = registry.center(from)?;
        let end = registry.center(to)?;
        let waypoints = self.anchor_for(class).waypoints(start, end);
        Path::through(&waypoints, self.speed).ok()
    }

    // ── Zone-level queries ────────────────────────────────────────────────

    /// Route between two zones for a transport class.
    ///
    /// Lookup order: same-zone short-circuit, common-route table, bay-path
    /// cache, then fresh synthesis (which is cached).  An unknown class
    /// routes directly.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::ZoneNotFound`] for an unknown zone.
    /// - [`SpatialError::NoRoute`] if synthesis fails (invalid speed).
    pub fn route_between_zones(
        &mut self,
        registry: &ZoneRegistry,
        from:     &str,
        to:       &str,
        class:    Option<&TransportClass>,
    ) -> SpatialResult<Arc<Path>> {
        let start = zone_center(registry, from)?;
        zone_center(registry, to)?;

        if from == to {
            return Ok(Arc::new(Path::stationary(start)));
        }

        let key = ZoneRouteKey::new(from, to, class.cloned());
        if let Some(path) = self.caches.common.get(&key) {
            return Ok(Arc::clone(path));
        }
        if let Some(path) = self.caches.bay_paths.get(&key) {
            return Ok(Arc::clone(path));
        }

        let Some(path) = self.synthesize(registry, from, to, class) else {
            warn!(from = %from, to = %to, class = ?class, "failed to generate zone route");
            return Err(SpatialError::no_route(from, to));
        };
        info!(
            from = %from,
            to = %to,
            class = ?class,
            segments = path.segments().len(),
            "generated zone route"
        );

        let path = Arc::new(path);
        if self.anchor_for(class).is_reversible() {
            self.caches.bay_paths.reserve(2);
            self.caches.bay_paths.put(key.reversed(), Arc::new(path.reversed()));
        }
        self.caches.bay_paths.put(key, Arc::clone(&path));
        Ok(path)
    }

    /// Center-to-center distance between two zones, read through the
    /// distance matrix.
    ///
    /// # Errors
    ///
    /// [`SpatialError::ZoneNotFound`] for an unknown zone.
    pub fn zone_distance(&mut self, registry: &ZoneRegistry, a: &str, b: &str) -> SpatialResult<f64> {
        let ca = zone_center(registry, a)?;
        let cb = zone_center(registry, b)?;
        let key = ZonePair::new(a, b);
        if let Some(&d) = self.caches.distances.get(&key) {
            return Ok(d);
        }
        let d = ca.distance(cb);
        self.caches.distances.put(key, d);
        Ok(d)
    }

    // ── Equipment-level queries ───────────────────────────────────────────

    /// Route a ladle car from one piece of equipment to another.
    ///
    /// Equipment in the same zone gets a single direct segment carrying the
    /// real distance between the two positions, not a zero-distance
    /// short-circuit; only `route(x, x)` is stationary.  Same-zone routes
    /// never touch the cache.  Otherwise the result is memoised under the
    /// equipment pair, and its reverse under the reversed pair.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::EquipmentNotFound`] if either id is not placed.
    /// - [`SpatialError::NoRoute`] if the two zones are not linked, or
    ///   stitching fails.
    pub fn route(
        &mut self,
        ledger:   &PlacementLedger,
        from:     &str,
        to:       &str,
    ) -> SpatialResult<Arc<Path>> {
        let (Some(src), Some(dst)) = (ledger.get(from), ledger.get(to)) else {
            let missing = if ledger.get(from).is_none() { from } else { to };
            warn!(from = %from, to = %to, missing = %missing, "cannot route between unplaced equipment");
            return Err(SpatialError::EquipmentNotFound(missing.into()));
        };

        if src.zone == dst.zone {
            if from == to {
                return Ok(Arc::new(Path::stationary(src.position)));
            }
            return Path::through(&[src.position, dst.position], self.speed)
                .map(Arc::new)
                .map_err(|e| {
                    error!(from = %from, to = %to, error = %e, "same-zone route failed");
                    SpatialError::no_route(from, to)
                });
        }

        let key = EquipmentPair::new(from, to);
        if let Some(path) = self.caches.paths.get(&key) {
            return Ok(Arc::clone(path));
        }
        self.caches.paths.reserve(2);

        let path = match self.stitch(&src.zone, src.position, &dst.zone, dst.position) {
            Ok(path) => Arc::new(path),
            Err(e) => {
                warn!(from = %from, to = %to, error = %e, "no ladle car route between equipment");
                return Err(SpatialError::no_route(from, to));
            }
        };

        self.caches.paths.put(key.reversed(), Arc::new(path.reversed()));
        self.caches.paths.put(key, Arc::clone(&path));
        Ok(path)
    }

    /// `from_pos`, every waypoint of the zone link, then `to_pos`.
    fn stitch(
        &self,
        from_zone: &ZoneId,
        from_pos:  Point,
        to_zone:   &ZoneId,
        to_pos:    Point,
    ) -> SpatialResult<Path> {
        let link = ZoneLink::new(from_zone.clone(), to_zone.clone());
        let zone_route = self
            .caches
            .zone_links
            .get(&link)
            .ok_or_else(|| SpatialError::no_route(from_zone, to_zone))?;

        let mut waypoints = Vec::with_capacity(zone_route.segments().len() + 3);
        waypoints.push(from_pos);
        waypoints.extend(zone_route.waypoints());
        waypoints.push(to_pos);

        let path = Path::through(&waypoints, self.speed)?;
        if !path.is_finite() {
            return Err(SpatialError::Config(format!(
                "non-finite path aggregates from {from_zone} to {to_zone}"
            )));
        }
        Ok(path)
    }
}

fn classes_of(config: &LayoutConfig) -> Vec<(TransportClass, Anchor)> {
    config
        .transport_classes
        .iter()
        .map(|(name, c)| (TransportClass::new(name.as_str()), c.anchor))
        .collect()
}

fn zone_center(registry: &ZoneRegistry, id: &str) -> SpatialResult<Point> {
    registry.center(id).ok_or_else(|| {
        warn!(zone = %id, "zone not found");
        SpatialError::ZoneNotFound(ZoneId::new(id))
    })
}
