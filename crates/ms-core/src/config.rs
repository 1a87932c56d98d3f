//! Plant layout configuration.
//!
//! Loaded from a JSON document by the simulation driver and handed to the
//! spatial engine.  Everything has a default, so a partial document (or
//! `LayoutConfig::default()` plus a few zones in tests) is a valid layout.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "ladle_car_speed": 150.0,
//!   "actors_per_zone": 2,
//!   "zones": {
//!     "bay1": { "x": 100, "y": 100, "width": 200, "height": 200,
//!               "routes": ["tapping"],
//!               "crane_rails": [{ "start_x": 120, "end_x": 280, "y": 150 }] },
//!     "bay2": { "x_offset": 300, "y_offset": 100, "width": 200, "height": 200 }
//!   },
//!   "transport_classes": { "tapping": { "anchor": { "kind": "corner" } } }
//! }
//! ```
//!
//! Loading is lenient per zone: a zone entry with the wrong shape is logged
//! and dropped, and the rest of the layout still loads.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{Anchor, CoreError, CoreResult, Point};

const DEFAULT_ZONE_EXTENT: f64 = 100.0;

// ── LayoutConfig ──────────────────────────────────────────────────────────────

/// Top-level layout configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Zone definitions keyed by zone id.
    pub zones: BTreeMap<String, ZoneConfig>,

    /// Order in which zones are chained by default ladle-car routes.
    /// `None` uses zone id order.
    pub zone_order: Option<Vec<String>>,

    /// Ladle-car speed in plan units per minute.  Must be positive.
    pub ladle_car_speed: f64,

    /// Crane slots per zone, unless a zone overrides it.
    pub actors_per_zone: usize,

    /// Named transport classes and their routing anchors.
    pub transport_classes: BTreeMap<String, ClassConfig>,

    pub cache: CacheConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let transport_classes = [
            ("tapping", Anchor::Corner),
            ("treatment", Anchor::Corner),
            ("rh", Anchor::Direct),
        ]
        .into_iter()
        .map(|(name, anchor)| (name.to_owned(), ClassConfig { anchor }))
        .collect();

        Self {
            zones: BTreeMap::new(),
            zone_order: None,
            ladle_car_speed: 150.0,
            actors_per_zone: 2,
            transport_classes,
            cache: CacheConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Parse a layout from a JSON string.
    ///
    /// # Errors
    ///
    /// [`CoreError::Parse`] if the document is not JSON or a non-zone field
    /// has the wrong type.  Malformed zone entries are skipped, not errors.
    pub fn from_json_str(s: &str) -> CoreResult<Self> {
        let mut doc: serde_json::Value =
            serde_json::from_str(s).map_err(|e| CoreError::Parse(e.to_string()))?;

        let raw_zones = match doc.as_object_mut().and_then(|m| m.remove("zones")) {
            Some(serde_json::Value::Object(map)) => map,
            Some(serde_json::Value::Null) | None => serde_json::Map::new(),
            Some(other) => {
                return Err(CoreError::Parse(format!(
                    "\"zones\" must be an object keyed by zone id, got {other}"
                )));
            }
        };

        let mut config: LayoutConfig =
            serde_json::from_value(doc).map_err(|e| CoreError::Parse(e.to_string()))?;

        for (id, raw) in raw_zones {
            match serde_json::from_value::<ZoneConfig>(raw) {
                Ok(zone) => {
                    config.zones.insert(id, zone);
                }
                Err(e) => error!(zone = %id, error = %e, "skipping malformed zone entry"),
            }
        }
        Ok(config)
    }

    /// Read and parse a layout file.  See [`from_json_str`](Self::from_json_str).
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Zone ids in default-route order: `zone_order` if given, otherwise
    /// ascending id order.
    pub fn ordered_zone_ids(&self) -> Vec<String> {
        match &self.zone_order {
            Some(order) => order.clone(),
            None => self.zones.keys().cloned().collect(),
        }
    }

    /// Crane slots configured for `zone_id`.
    pub fn actor_slots(&self, zone_id: &str) -> usize {
        self.zones
            .get(zone_id)
            .and_then(|z| z.actor_slots)
            .unwrap_or(self.actors_per_zone)
    }

    /// Routing anchor for a class name.  Unknown classes route directly.
    pub fn anchor_for(&self, class: &str) -> Option<Anchor> {
        self.transport_classes.get(class).map(|c| c.anchor)
    }
}

// ── ZoneConfig ────────────────────────────────────────────────────────────────

/// One zone entry.  Supports both the `x`/`y` and the older
/// `x_offset`/`y_offset` spelling for the top-left corner.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Named routes this zone takes part in ("tapping", "treatment", …).
    pub routes: Vec<String>,

    /// Overrides `LayoutConfig::actors_per_zone` for this zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_slots: Option<usize>,

    pub crane_rails: Vec<RailConfig>,
}

impl ZoneConfig {
    /// Convenience constructor for the common `x, y, width, height` form.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Resolve the `(top_left, bottom_right)` corners.
    ///
    /// Width and height default to 100 when absent.
    ///
    /// # Errors
    ///
    /// [`CoreError::Config`] if neither spelling of a corner coordinate is
    /// present, or any resolved value is non-finite.  Dimension sign is
    /// checked later, by `Zone::new`.
    pub fn corners(&self) -> CoreResult<(Point, Point)> {
        let x = self
            .x
            .or(self.x_offset)
            .ok_or_else(|| CoreError::Config("missing x / x_offset".into()))?;
        let y = self
            .y
            .or(self.y_offset)
            .ok_or_else(|| CoreError::Config("missing y / y_offset".into()))?;
        let width = self.width.unwrap_or(DEFAULT_ZONE_EXTENT);
        let height = self.height.unwrap_or(DEFAULT_ZONE_EXTENT);

        let top_left = Point::new(x, y);
        let bottom_right = Point::new(x + width, y + height);
        if !top_left.is_finite() || !bottom_right.is_finite() {
            return Err(CoreError::Config(format!(
                "non-finite geometry x={x} y={y} width={width} height={height}"
            )));
        }
        Ok((top_left, bottom_right))
    }
}

/// A crane rail: the crane travels along `x ∈ [start_x, end_x]` at fixed `y`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RailConfig {
    pub start_x: f64,
    pub end_x: f64,
    pub y: f64,
}

/// Per-class routing rule.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassConfig {
    pub anchor: Anchor,
}

/// Maximum entry counts for the bounded caches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Equipment-to-equipment path cache.
    pub path_capacity: usize,
    /// Zone-to-zone path cache, keyed by transport class.
    pub bay_path_capacity: usize,
    /// Pairwise zone distance matrix.
    pub distance_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path_capacity: 1_000,
            bay_path_capacity: 5_000,
            distance_capacity: 5_000,
        }
    }
}
