//! Fluent builder for constructing a [`SpatialEngine`].

use ms_core::LayoutConfig;

use crate::collision::{ActorPositionProvider, CollisionPredicate, MinSpacing, NoActors};
use crate::{CacheLayer, PathPlanner, PlacementLedger, SpatialEngine, ZoneRegistry};

/// Fluent builder for [`SpatialEngine<P, C>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                      | Default                                  |
/// |-----------------------------|------------------------------------------|
/// | `.actors(p)`                | [`NoActors`]: no crane positions         |
/// | `.collision_predicate(c)`   | [`MinSpacing`] at 10 units               |
/// | `.caches(layer)`            | Sized from `config.cache`                |
///
/// # Example
///
/// ```rust,ignore
/// let engine = SpatialEngineBuilder::new(config)
///     .actors(|zone: &Zone, crane: &ActorId, t: f64| crane_model.position(zone, crane, t))
///     .collision_predicate(MinSpacing { min_spacing: 15.0 })
///     .build();
/// ```
pub struct SpatialEngineBuilder<P, C> {
    config:    LayoutConfig,
    caches:    Option<CacheLayer>,
    actors:    P,
    predicate: C,
}

impl SpatialEngineBuilder<NoActors, MinSpacing> {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            caches:    None,
            actors:    NoActors,
            predicate: MinSpacing::default(),
        }
    }
}

impl<P: ActorPositionProvider, C: CollisionPredicate> SpatialEngineBuilder<P, C> {
    /// Supply the crane position model queried by `collisions_at`.
    pub fn actors<P2: ActorPositionProvider>(self, actors: P2) -> SpatialEngineBuilder<P2, C> {
        SpatialEngineBuilder {
            config:    self.config,
            caches:    self.caches,
            actors,
            predicate: self.predicate,
        }
    }

    /// Supply the per-zone collision rule.
    pub fn collision_predicate<C2: CollisionPredicate>(self, predicate: C2) -> SpatialEngineBuilder<P, C2> {
        SpatialEngineBuilder {
            config:    self.config,
            caches:    self.caches,
            actors:    self.actors,
            predicate,
        }
    }

    /// Inject pre-sized caches instead of sizing them from `config.cache`.
    ///
    /// A later `rebuild` re-sizes from the new config.
    pub fn caches(mut self, caches: CacheLayer) -> Self {
        self.caches = Some(caches);
        self
    }

    /// Build zones, precompute routes, and return a ready engine.
    ///
    /// Never fails: malformed zones and a bad speed degrade the layout and
    /// are logged.
    pub fn build(self) -> SpatialEngine<P, C> {
        let caches = self
            .caches
            .unwrap_or_else(|| CacheLayer::from_config(&self.config.cache));
        let planner = PathPlanner::from_config(&self.config, caches);

        let mut engine = SpatialEngine {
            config:    self.config,
            registry:  ZoneRegistry::empty(),
            ledger:    PlacementLedger::new(),
            planner,
            actors:    self.actors,
            predicate: self.predicate,
        };
        engine.setup();
        engine
    }
}
