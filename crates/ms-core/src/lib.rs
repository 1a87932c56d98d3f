//! `ms-core`: foundational types for the melt-shop spatial engine.
//!
//! This crate is a dependency of every other `ms-*` crate.  It intentionally
//! has no `ms-*` dependencies and minimal external ones (`thiserror`,
//! `tracing`, and `serde`/`serde_json` for the layout file).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ZoneId`, `EquipmentId`, `ActorId`, `TransportClass`  |
//! | [`geo`]         | `Point`, Euclidean distance evaluator                 |
//! | [`transport`]   | `Anchor`: per-class intermediate waypoint rule        |
//! | [`config`]      | `LayoutConfig` and its JSON loader                    |
//! | [`error`]       | `CoreError`, `CoreResult`                             |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod transport;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CacheConfig, ClassConfig, LayoutConfig, RailConfig, ZoneConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{FALLBACK_DISTANCE, Point};
pub use ids::{ActorId, EquipmentId, TransportClass, ZoneId};
pub use transport::Anchor;
