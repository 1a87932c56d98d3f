//! Zone (bay) geometry.

use ms_core::{Point, RailConfig, ZoneId};

use crate::{SpatialError, SpatialResult};

/// An axis-aligned rectangular zone in plan coordinates.
///
/// Immutable once built.  Construct with [`Zone::new`], which enforces
/// `top_left.x < bottom_right.x` and `top_left.y < bottom_right.y`.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    pub id:           ZoneId,
    pub top_left:     Point,
    pub bottom_right: Point,
    /// `((left + right) / 2, (top + bottom) / 2)`, cached at construction.
    pub center:       Point,
    /// Named routes this zone takes part in.
    pub routes:       Vec<String>,
    /// Crane rails, in slot order.
    pub rails:        Vec<RailConfig>,
}

impl Zone {
    /// Build a zone, validating the rectangle.
    ///
    /// # Errors
    ///
    /// [`SpatialError::Config`] for non-finite corners or a non-positive
    /// width or height.
    pub fn new(id: ZoneId, top_left: Point, bottom_right: Point) -> SpatialResult<Self> {
        if !top_left.is_finite() || !bottom_right.is_finite() {
            return Err(SpatialError::Config(format!(
                "zone {id} has non-finite corners {top_left} / {bottom_right}"
            )));
        }
        let width = bottom_right.x - top_left.x;
        let height = bottom_right.y - top_left.y;
        if width <= 0.0 || height <= 0.0 {
            return Err(SpatialError::Config(format!(
                "zone {id} has invalid dimensions {width}x{height}"
            )));
        }
        Ok(Self {
            center: top_left.midpoint(bottom_right),
            id,
            top_left,
            bottom_right,
            routes: Vec::new(),
            rails: Vec::new(),
        })
    }

    pub fn with_routes(mut self, routes: Vec<String>) -> Self {
        self.routes = routes;
        self
    }

    pub fn with_rails(mut self, rails: Vec<RailConfig>) -> Self {
        self.rails = rails;
        self
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    /// Inclusive containment: points on the boundary are inside.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.top_left.x <= p.x
            && p.x <= self.bottom_right.x
            && self.top_left.y <= p.y
            && p.y <= self.bottom_right.y
    }

    /// `true` if the two rectangles share a region of positive area.
    /// Zones that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Zone) -> bool {
        self.top_left.x < other.bottom_right.x
            && other.top_left.x < self.bottom_right.x
            && self.top_left.y < other.bottom_right.y
            && other.top_left.y < self.bottom_right.y
    }

    /// Where this zone's first crane parks: the start of its first rail, or
    /// the zone center when no rail is configured.
    pub fn actor_home(&self) -> Point {
        self.rails
            .first()
            .map(|r| Point::new(r.start_x, r.y))
            .unwrap_or(self.center)
    }

    pub fn in_route(&self, route: &str) -> bool {
        self.routes.iter().any(|r| r == route)
    }
}
