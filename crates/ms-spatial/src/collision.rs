//! Crane collision queries.
//!
//! The spatial core does no crane geometry of its own.  It walks every
//! zone's actor slots, asks an [`ActorPositionProvider`] where each crane is
//! at the requested time, and hands the positions it got to a
//! [`CollisionPredicate`].  Both collaborators are supplied by the
//! simulation driver through [`SpatialEngineBuilder`][crate::SpatialEngineBuilder].

use std::collections::BTreeMap;

use tracing::warn;

use ms_core::{ActorId, Point, ZoneId};

use crate::{Zone, ZoneRegistry};

/// Where an actor (crane) is at a given simulation time.
pub trait ActorPositionProvider {
    /// Position of `actor` in `zone` at `time`, or `None` if the actor is
    /// unknown or not on its rail.
    fn actor_position_at(&self, zone: &Zone, actor: &ActorId, time: f64) -> Option<Point>;
}

/// Whether a set of actor positions within one zone collide.
pub trait CollisionPredicate {
    fn collides(&self, zone: &Zone, positions: &[(ActorId, Point)]) -> bool;
}

impl<F> ActorPositionProvider for F
where
    F: Fn(&Zone, &ActorId, f64) -> Option<Point>,
{
    fn actor_position_at(&self, zone: &Zone, actor: &ActorId, time: f64) -> Option<Point> {
        self(zone, actor, time)
    }
}

/// An [`ActorPositionProvider`] that knows no actors.  Every zone reports
/// no collision.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoActors;

impl ActorPositionProvider for NoActors {
    fn actor_position_at(&self, _zone: &Zone, _actor: &ActorId, _time: f64) -> Option<Point> {
        None
    }
}

/// Cranes sharing a zone travel on parallel rails across the same span, so
/// two cranes collide when they come closer than `min_spacing` along `x`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MinSpacing {
    pub min_spacing: f64,
}

impl Default for MinSpacing {
    fn default() -> Self {
        Self { min_spacing: 10.0 }
    }
}

impl CollisionPredicate for MinSpacing {
    fn collides(&self, zone: &Zone, positions: &[(ActorId, Point)]) -> bool {
        let mut by_x: Vec<&(ActorId, Point)> = positions.iter().collect();
        by_x.sort_by(|a, b| a.1.x.total_cmp(&b.1.x));

        for pair in by_x.windows(2) {
            let (a, pa) = pair[0];
            let (b, pb) = pair[1];
            if pb.x - pa.x < self.min_spacing {
                warn!(zone = %zone.id, first = %a, second = %b, "potential crane collision");
                return true;
            }
        }
        false
    }
}

/// Collision status of every zone at `time`.
///
/// `slots` gives the number of actor slots in a zone; slot `i` is the actor
/// `"{zone}_crane_{i + 1}"`.
pub fn collisions_at<P, C>(
    registry:  &ZoneRegistry,
    slots:     impl Fn(&ZoneId) -> usize,
    time:      f64,
    provider:  &P,
    predicate: &C,
) -> BTreeMap<ZoneId, bool>
where
    P: ActorPositionProvider + ?Sized,
    C: CollisionPredicate + ?Sized,
{
    registry
        .iter()
        .map(|zone| {
            let positions: Vec<(ActorId, Point)> = (0..slots(&zone.id))
                .map(|slot| ActorId::for_slot(&zone.id, slot))
                .filter_map(|actor| {
                    provider
                        .actor_position_at(zone, &actor, time)
                        .map(|pos| (actor, pos))
                })
                .collect();
            (zone.id.clone(), predicate.collides(zone, &positions))
        })
        .collect()
}
