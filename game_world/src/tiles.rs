//! Tile occupancy lookup interface.
//!
//! The tile/map container that owns entities lives outside this layer; doors
//! consult it before closing to make sure nobody is standing in the frame.

use crate::grid::Position;
use crate::ids::{EntityId, EntityKind};

/// An entity occupying a tile, as reported by the map container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub id: EntityId,
    pub kind: EntityKind,
}

impl Occupant {
    pub fn new(id: EntityId, kind: EntityKind) -> Self {
        Self { id, kind }
    }
}

/// Read-only view into the external tile container.
///
/// A tile with no contents is the empty vector; implementations never fail.
/// Malformed or missing tiles degrade to "no occupants".
pub trait TileLookup {
    fn occupants_at(&self, position: Position) -> Vec<Occupant>;
}
