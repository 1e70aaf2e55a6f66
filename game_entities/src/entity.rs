//! The shared entity core and the polymorphic variant wrapper.

use game_world::{EntityId, EntityKind, EntitySnapshot, EventBus, EventData, Position};
use serde::{Deserialize, Serialize};

use crate::door::{Door, DoorRecord};
use crate::item::{Item, ItemRecord, Marker, MarkerRecord};
use crate::player::{Player, PlayerRecord};
use crate::zombie::{Zombie, ZombieRecord};

/// State common to every entity variant.
///
/// `id` and `kind` never change after construction; `position` changes only
/// through [`EntityCore::move_to`], which always publishes a movement event.
#[derive(Debug, Clone)]
pub struct EntityCore {
    id: EntityId,
    kind: EntityKind,
    position: Position,
    blocks_movement: bool,
    events: EventBus,
}

impl EntityCore {
    /// Create a core with a fresh random ID.
    pub fn new(kind: EntityKind, position: Position, blocks_movement: bool, events: EventBus) -> Self {
        Self {
            id: EntityId::new(),
            kind,
            position,
            blocks_movement,
            events,
        }
    }

    /// Reinstate a core from persisted state, keeping its recorded ID.
    pub fn restore(
        id: EntityId,
        kind: EntityKind,
        position: Position,
        blocks_movement: bool,
        events: EventBus,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            blocks_movement,
            events,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn blocks_movement(&self) -> bool {
        self.blocks_movement
    }

    pub(crate) fn set_blocks_movement(&mut self, blocks: bool) {
        self.blocks_movement = blocks;
    }

    /// The identity/position snapshot attached to every published event.
    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
        }
    }

    /// Unconditionally move to new coordinates and publish the change.
    ///
    /// Reachability is the caller's responsibility.
    pub fn move_to(&mut self, position: Position) {
        let old_position = self.position;
        self.position = position;
        self.emit(EventData::EntityMoved {
            old_position,
            new_position: position,
        });
    }

    /// Publish an event stamped with this entity's snapshot.
    pub fn emit(&self, data: EventData) {
        self.events.publish(self.snapshot(), data);
    }

    /// The event channel this entity publishes on.
    pub fn events(&self) -> &EventBus {
        &self.events
    }
}

/// Round a resource value to one decimal place.
pub(crate) fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Any entity variant, for containers that hold the whole zoo.
#[derive(Debug, Clone)]
pub enum GameEntity {
    Door(Door),
    Player(Player),
    Zombie(Zombie),
    Item(Item),
    Marker(Marker),
}

impl GameEntity {
    pub fn core(&self) -> &EntityCore {
        match self {
            GameEntity::Door(door) => door.core(),
            GameEntity::Player(player) => player.core(),
            GameEntity::Zombie(zombie) => zombie.core(),
            GameEntity::Item(item) => item.core(),
            GameEntity::Marker(marker) => marker.core(),
        }
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        match self {
            GameEntity::Door(door) => door.core_mut(),
            GameEntity::Player(player) => player.core_mut(),
            GameEntity::Zombie(zombie) => zombie.core_mut(),
            GameEntity::Item(item) => item.core_mut(),
            GameEntity::Marker(marker) => marker.core_mut(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.core().id()
    }

    pub fn kind(&self) -> EntityKind {
        self.core().kind()
    }

    pub fn position(&self) -> Position {
        self.core().position()
    }

    pub fn blocks_movement(&self) -> bool {
        self.core().blocks_movement()
    }

    /// Persisted form of this entity.
    pub fn to_record(&self) -> EntityRecord {
        match self {
            GameEntity::Door(door) => EntityRecord::Door(door.to_record()),
            GameEntity::Player(player) => EntityRecord::Player(player.to_record()),
            GameEntity::Zombie(zombie) => EntityRecord::Zombie(zombie.to_record()),
            GameEntity::Item(item) => EntityRecord::Item(item.to_record()),
            GameEntity::Marker(marker) => EntityRecord::Marker(marker.to_record()),
        }
    }
}

/// Persisted form of any entity variant.
///
/// The `kind` tag keeps the wire format flat while selecting the variant on
/// restore; every variant record repeats the base fields
/// `{id, x, y, blocks_movement}` and adds its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntityRecord {
    Door(DoorRecord),
    Player(PlayerRecord),
    Zombie(ZombieRecord),
    Item(ItemRecord),
    Marker(MarkerRecord),
}

impl EntityRecord {
    /// Rebuild the live entity this record describes, attached to `events`.
    pub fn restore(self, events: EventBus) -> GameEntity {
        match self {
            EntityRecord::Door(record) => GameEntity::Door(Door::from_record(record, events)),
            EntityRecord::Player(record) => {
                GameEntity::Player(Player::from_record(record, events))
            }
            EntityRecord::Zombie(record) => {
                GameEntity::Zombie(Zombie::from_record(record, events))
            }
            EntityRecord::Item(record) => GameEntity::Item(Item::from_record(record, events)),
            EntityRecord::Marker(record) => {
                GameEntity::Marker(Marker::from_record(record, events))
            }
        }
    }
}
