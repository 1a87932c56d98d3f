//! Path value types.
//!
//! A [`Path`] is an ordered list of [`PathSegment`] hops plus the aggregate
//! distance and travel time.  Paths are built once and never mutated, so
//! the caches share them behind an `Arc`.

use serde::Serialize;

use ms_core::Point;

use crate::{SpatialError, SpatialResult};

// ── PathSegment ───────────────────────────────────────────────────────────────

/// One straight hop between two points.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PathSegment {
    pub from:        Point,
    pub to:          Point,
    /// Plan units.  Never negative.
    pub distance:    f64,
    /// `distance / speed`, in minutes for a speed in units per minute.
    pub travel_time: f64,
}

impl PathSegment {
    /// Build a hop travelled at `speed`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::Config`] if `speed` is not a positive finite number.
    pub fn new(from: Point, to: Point, speed: f64) -> SpatialResult<Self> {
        check_speed(speed)?;
        let distance = from.distance(to);
        Ok(Self { from, to, distance, travel_time: distance / speed })
    }

    /// A zero-length, zero-time hop at `at`.
    pub fn stationary(at: Point) -> Self {
        Self { from: at, to: at, distance: 0.0, travel_time: 0.0 }
    }

    /// Same hop travelled the other way.
    pub fn reversed(&self) -> Self {
        Self { from: self.to, to: self.from, ..*self }
    }
}

pub(crate) fn check_speed(speed: f64) -> SpatialResult<()> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(SpatialError::Config(format!(
            "transport speed must be positive, got {speed}"
        )))
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// A route: ordered hops plus aggregate distance and travel time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Path {
    segments:    Vec<PathSegment>,
    distance:    f64,
    travel_time: f64,
}

impl Path {
    /// Build a path visiting `waypoints` in order, one segment per
    /// consecutive pair.
    ///
    /// # Errors
    ///
    /// [`SpatialError::Config`] for fewer than two waypoints or a
    /// non-positive speed.
    pub fn through(waypoints: &[Point], speed: f64) -> SpatialResult<Self> {
        if waypoints.len() < 2 {
            return Err(SpatialError::Config(format!(
                "a path needs at least two waypoints, got {}",
                waypoints.len()
            )));
        }
        let segments = waypoints
            .windows(2)
            .map(|w| PathSegment::new(w[0], w[1], speed))
            .collect::<SpatialResult<Vec<_>>>()?;
        Ok(Self::from_segments(segments))
    }

    /// A single stationary hop at `at`: distance 0, travel time 0.
    pub fn stationary(at: Point) -> Self {
        Self::from_segments(vec![PathSegment::stationary(at)])
    }

    fn from_segments(segments: Vec<PathSegment>) -> Self {
        let distance = segments.iter().map(|s| s.distance).sum();
        let travel_time = segments.iter().map(|s| s.travel_time).sum();
        Self { segments, distance, travel_time }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn travel_time(&self) -> f64 {
        self.travel_time
    }

    /// Visited points: every segment's start plus the last segment's end.
    pub fn waypoints(&self) -> Vec<Point> {
        let mut points: Vec<Point> = self.segments.iter().map(|s| s.from).collect();
        if let Some(last) = self.segments.last() {
            points.push(last.to);
        }
        points
    }

    /// `true` if the path covers no distance.
    pub fn is_trivial(&self) -> bool {
        self.distance == 0.0
    }

    /// The same path travelled backwards.
    ///
    /// Waypoints come out in exact reverse order.  The aggregates are
    /// copied, not re-summed, so they match the forward path bit for bit.
    pub fn reversed(&self) -> Self {
        Self {
            segments:    self.segments.iter().rev().map(PathSegment::reversed).collect(),
            distance:    self.distance,
            travel_time: self.travel_time,
        }
    }

    /// `true` if the aggregates are finite numbers.
    pub(crate) fn is_finite(&self) -> bool {
        self.distance.is_finite() && self.travel_time.is_finite()
    }
}
