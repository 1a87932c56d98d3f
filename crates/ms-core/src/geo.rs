//! Plan-coordinate point type and the Euclidean distance evaluator.
//!
//! Plan coordinates are flat, unit-agnostic `f64` pairs (the layout file
//! uses the same units as the configured transport speed).  `y` grows
//! downward, so a rectangle's top-left corner has the smaller `y`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{CoreError, CoreResult};

/// Distance reported by [`Point::distance`] when either point is malformed.
///
/// Path planning keeps going with this value instead of aborting a whole
/// route computation on one bad coordinate.
pub const FALLBACK_DISTANCE: f64 = 100.0;

/// A position in plan coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `true` if both coordinates are finite (not NaN, not infinite).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance `sqrt(dx² + dy²)`.
    ///
    /// # Errors
    ///
    /// [`CoreError::MalformedPoint`] if either point has a non-finite
    /// coordinate.
    pub fn try_distance(self, other: Point) -> CoreResult<f64> {
        if !self.is_finite() {
            return Err(CoreError::MalformedPoint(self));
        }
        if !other.is_finite() {
            return Err(CoreError::MalformedPoint(other));
        }
        Ok((other.x - self.x).hypot(other.y - self.y))
    }

    /// Euclidean distance, degrading to [`FALLBACK_DISTANCE`] on malformed
    /// input.  The anomaly is logged, never raised.
    pub fn distance(self, other: Point) -> f64 {
        match self.try_distance(other) {
            Ok(d) => d,
            Err(e) => {
                warn!(from = %self, to = %other, error = %e, "using fallback distance");
                FALLBACK_DISTANCE
            }
        }
    }

    /// Midpoint of the segment `self → other`.
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
