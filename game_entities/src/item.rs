//! Passive props - items and scenery markers.
//!
//! No behavior beyond identity, placement, and serialization.

use game_world::{EntityId, EntityKind, EventBus, Position};
use serde::{Deserialize, Serialize};

use crate::entity::EntityCore;

/// A collectible or scenery item.
#[derive(Debug, Clone)]
pub struct Item {
    core: EntityCore,
    subtype: String,
    name: Option<String>,
    blocks_sight: bool,
}

impl Item {
    /// Create an item of the given subtype. Items never block movement.
    pub fn new(subtype: impl Into<String>, position: Position, events: EventBus) -> Self {
        Self {
            core: EntityCore::new(EntityKind::Item, position, false, events),
            subtype: subtype.into(),
            name: None,
            blocks_sight: false,
        }
    }

    /// Set a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set whether the item obstructs sightlines.
    pub fn with_blocks_sight(mut self, blocks: bool) -> Self {
        self.blocks_sight = blocks;
        self
    }

    pub fn core(&self) -> &EntityCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn blocks_sight(&self) -> bool {
        self.blocks_sight
    }

    /// Persisted form of this item.
    pub fn to_record(&self) -> ItemRecord {
        ItemRecord {
            id: self.core.id(),
            x: self.core.position().x,
            y: self.core.position().y,
            blocks_movement: self.core.blocks_movement(),
            subtype: self.subtype.clone(),
            blocks_sight: self.blocks_sight,
            name: self.name.clone(),
        }
    }

    /// Rebuild an item from its record.
    pub fn from_record(record: ItemRecord, events: EventBus) -> Self {
        Self {
            core: EntityCore::restore(
                record.id,
                EntityKind::Item,
                Position::new(record.x, record.y),
                record.blocks_movement,
                events,
            ),
            subtype: record.subtype,
            name: record.name,
            blocks_sight: record.blocks_sight,
        }
    }
}

/// Flat persisted record for an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: EntityId,
    pub x: i32,
    pub y: i32,
    pub blocks_movement: bool,
    pub subtype: String,
    pub blocks_sight: bool,
    pub name: Option<String>,
}

/// A bare scenery marker; carries nothing beyond the base entity.
#[derive(Debug, Clone)]
pub struct Marker {
    core: EntityCore,
}

impl Marker {
    pub fn new(position: Position, events: EventBus) -> Self {
        Self {
            core: EntityCore::new(EntityKind::Marker, position, false, events),
        }
    }

    pub fn core(&self) -> &EntityCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    /// Persisted form of this marker.
    pub fn to_record(&self) -> MarkerRecord {
        MarkerRecord {
            id: self.core.id(),
            x: self.core.position().x,
            y: self.core.position().y,
            blocks_movement: self.core.blocks_movement(),
        }
    }

    /// Rebuild a marker from its record.
    pub fn from_record(record: MarkerRecord, events: EventBus) -> Self {
        Self {
            core: EntityCore::restore(
                record.id,
                EntityKind::Marker,
                Position::new(record.x, record.y),
                record.blocks_movement,
                events,
            ),
        }
    }
}

/// Flat persisted record for a marker - the base record alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub id: EntityId,
    pub x: i32,
    pub y: i32,
    pub blocks_movement: bool,
}
