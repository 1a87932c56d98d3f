//! Spatial-subsystem error type.

use thiserror::Error;

use ms_core::{CoreError, EquipmentId, Point, ZoneId};

/// Errors produced by `ms-spatial`.
///
/// None of these is fatal to the host: callers get them back as values and
/// the simulation keeps stepping.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("zone {0} not found")]
    ZoneNotFound(ZoneId),

    #[error("equipment {0} not found")]
    EquipmentNotFound(EquipmentId),

    #[error("position {position} for equipment {equipment} is outside zone {zone}")]
    OutOfBounds {
        equipment: EquipmentId,
        position:  Point,
        zone:      ZoneId,
    },

    #[error("no route from {from} to {to}")]
    NoRoute { from: String, to: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SpatialError {
    /// `true` for the unknown-zone and unknown-equipment variants.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SpatialError::ZoneNotFound(_) | SpatialError::EquipmentNotFound(_))
    }

    pub(crate) fn no_route(from: impl ToString, to: impl ToString) -> Self {
        SpatialError::NoRoute { from: from.to_string(), to: to.to_string() }
    }
}

pub type SpatialResult<T> = Result<T, SpatialError>;
