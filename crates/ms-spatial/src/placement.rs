//! Equipment placement ledger.

use rustc_hash::FxHashMap;
use tracing::{info, warn};

use ms_core::{EquipmentId, Point, ZoneId};

use crate::{SpatialError, SpatialResult, ZoneRegistry};

/// Where one piece of equipment sits.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub zone:           ZoneId,
    pub equipment_type: String,
    pub position:       Point,
}

/// Records placed equipment, keyed by equipment id.
///
/// Entries live until the ledger is cleared on a layout rebuild;
/// re-placing an id overwrites its entry.
#[derive(Default)]
pub struct PlacementLedger {
    placements: FxHashMap<EquipmentId, Placement>,
}

impl PlacementLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `equipment_id` at `position` inside `zone_id`.
    ///
    /// A failed placement leaves any earlier placement of the same id intact.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::ZoneNotFound`] if `zone_id` is not registered.
    /// - [`SpatialError::OutOfBounds`] if `position` is outside the zone's
    ///   rectangle (boundary inclusive).
    pub fn place(
        &mut self,
        registry:       &ZoneRegistry,
        equipment_id:   &str,
        equipment_type: &str,
        zone_id:        &str,
        position:       Point,
    ) -> SpatialResult<()> {
        let Some(zone) = registry.get(zone_id) else {
            warn!(equipment = %equipment_id, zone = %zone_id, "cannot place equipment in unknown zone");
            return Err(SpatialError::ZoneNotFound(ZoneId::new(zone_id)));
        };
        if !zone.contains(position) {
            warn!(
                equipment = %equipment_id,
                zone = %zone_id,
                %position,
                top_left = %zone.top_left,
                bottom_right = %zone.bottom_right,
                "placement outside zone bounds"
            );
            return Err(SpatialError::OutOfBounds {
                equipment: EquipmentId::new(equipment_id),
                position,
                zone:      zone.id.clone(),
            });
        }

        self.placements.insert(
            EquipmentId::new(equipment_id),
            Placement {
                zone:           zone.id.clone(),
                equipment_type: equipment_type.to_owned(),
                position,
            },
        );
        info!(equipment = %equipment_id, kind = %equipment_type, zone = %zone_id, %position, "placed equipment");
        Ok(())
    }

    pub fn get(&self, equipment_id: &str) -> Option<&Placement> {
        self.placements.get(equipment_id)
    }

    /// Recorded position, or the origin (logged) for unknown equipment.
    pub fn position_of(&self, equipment_id: &str) -> Point {
        match self.placements.get(equipment_id) {
            Some(p) => p.position,
            None => {
                warn!(equipment = %equipment_id, "equipment not placed; defaulting to origin");
                Point::ORIGIN
            }
        }
    }

    pub fn zone_of(&self, equipment_id: &str) -> Option<&ZoneId> {
        self.placements.get(equipment_id).map(|p| &p.zone)
    }

    /// `true` if `equipment_id` is placed in `zone_id`.
    pub fn is_in_zone(&self, equipment_id: &str, zone_id: &str) -> bool {
        self.zone_of(equipment_id).is_some_and(|z| z.as_str() == zone_id)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EquipmentId, &Placement)> + '_ {
        self.placements.iter()
    }

    pub fn clear(&mut self) {
        self.placements.clear();
    }
}
