//! Strongly typed string identifiers.
//!
//! Zone, equipment, and actor ids come from the layout file and the
//! simulation driver as free-form strings ("bay1", "eaf1", "bay1_crane_2").
//! Wrapping them keeps a `ZoneId` from being passed where an `EquipmentId`
//! is expected.  All ids are `Clone + Ord + Hash` and borrow as `&str`, so
//! maps keyed by an id can be queried with a plain string slice.

use std::borrow::Borrow;
use std::fmt;

/// Generate a typed id wrapper around a `String`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub String);

        impl $name {
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            #[inline]
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

typed_id! {
    /// Identity of a zone (bay) in the plant layout.
    pub struct ZoneId;
}

typed_id! {
    /// Identity of a placed piece of equipment (EAF, LMF, caster, …).
    pub struct EquipmentId;
}

typed_id! {
    /// Identity of a zone-local shared-resource actor (crane).
    pub struct ActorId;
}

typed_id! {
    /// Name of a transport-unit class ("tapping", "treatment", "rh").
    pub struct TransportClass;
}

impl ActorId {
    /// Slot-derived actor id: `"{zone}_crane_{slot + 1}"`.
    pub fn for_slot(zone: &ZoneId, slot: usize) -> Self {
        Self(format!("{zone}_crane_{}", slot + 1))
    }
}
