//! Transport-class routing rules.
//!
//! Each transport class may route through one intermediate anchor between
//! the source and destination zone centers.  The anchor belongs to the
//! class, not to either zone.

use serde::{Deserialize, Serialize};

use crate::Point;

/// Where a transport class passes between two zone centers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anchor {
    /// Straight hop between the two centers.
    #[default]
    Direct,
    /// Dog-leg along the tracks: first along `x` to the destination column,
    /// then along `y`, i.e. through `(to.x, from.y)`.
    Corner,
    /// A fixed plan position (e.g. a treatment station).
    Fixed { x: f64, y: f64 },
}

impl Anchor {
    /// The middle waypoint for a hop `from → to`, or `None` for a direct hop.
    pub fn waypoint(self, from: Point, to: Point) -> Option<Point> {
        match self {
            Anchor::Direct => None,
            Anchor::Corner => Some(Point::new(to.x, from.y)),
            Anchor::Fixed { x, y } => Some(Point::new(x, y)),
        }
    }

    /// `true` if the route `to → from` is the exact reverse of `from → to`.
    /// A corner dog-leg is not: its reverse turns at `(from.x, to.y)`.
    pub fn is_reversible(self) -> bool {
        !matches!(self, Anchor::Corner)
    }

    /// Full waypoint chain for a hop `from → to` under this anchor.
    pub fn waypoints(self, from: Point, to: Point) -> Vec<Point> {
        match self.waypoint(from, to) {
            Some(mid) => vec![from, mid, to],
            None => vec![from, to],
        }
    }
}
