//! `ms-spatial`: zones, path caches, ladle-car routing, and crane
//! collision queries.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`zone`]      | `Zone`: validated rectangle, center, crane rails              |
//! | [`registry`]  | `ZoneRegistry` (R-tree), lenient build from `LayoutConfig`    |
//! | [`path`]      | `Path`, `PathSegment`                                         |
//! | [`cache`]     | `BoundedCache`, `CacheLayer`, cache keys, `CacheStats`        |
//! | [`planner`]   | `PathPlanner`: zone-level and equipment-level routing         |
//! | [`placement`] | `PlacementLedger`, `Placement`                                |
//! | [`collision`] | `ActorPositionProvider`, `CollisionPredicate`, `MinSpacing`   |
//! | [`engine`]    | `SpatialEngine`: the driver-facing façade                     |
//! | [`builder`]   | `SpatialEngineBuilder`                                        |
//! | [`error`]     | `SpatialError`, `SpatialResult<T>`                            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ms_core::{LayoutConfig, Point};
//! use ms_spatial::SpatialEngine;
//!
//! let config = LayoutConfig::from_json_file(path)?;
//! let mut engine = SpatialEngine::new(config);
//! engine.place("eaf1", "EAF", "bay1", Point::new(150.0, 150.0))?;
//! engine.place("caster1", "Caster", "bay2", Point::new(450.0, 250.0))?;
//! let path = engine.route("eaf1", "caster1")?;
//! println!("{:.1} units, {:.2} min", path.distance(), path.travel_time());
//! ```

pub mod builder;
pub mod cache;
pub mod collision;
pub mod engine;
pub mod error;
pub mod path;
pub mod placement;
pub mod planner;
pub mod registry;
pub mod zone;


pub use builder::SpatialEngineBuilder;
pub use cache::{
    BoundedCache, CacheLayer, CacheStats, EquipmentPair, ZoneLink, ZonePair, ZoneRouteKey,
};
pub use collision::{ActorPositionProvider, CollisionPredicate, MinSpacing, NoActors};
pub use engine::SpatialEngine;
pub use error::{SpatialError, SpatialResult};
pub use path::{Path, PathSegment};
pub use placement::{Placement, PlacementLedger};
pub use planner::PathPlanner;
pub use registry::ZoneRegistry;
pub use zone::Zone;
