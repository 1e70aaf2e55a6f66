//! Destructible doors - the open/closed/locked/broken state machine.

use game_world::{DoorFailure, EntityId, EntityKind, EventBus, EventData, Position, TileLookup};
use serde::{Deserialize, Serialize};

use crate::config::DoorTuning;
use crate::entity::EntityCore;

/// A door occupying one grid tile.
///
/// Blocking flags are derived from `is_open` in [`Door::update_blocking`] and
/// nowhere else. Invariant: a damaged door is permanently open with zero hit
/// points and cannot be closed or damaged further.
#[derive(Debug, Clone)]
pub struct Door {
    core: EntityCore,
    is_open: bool,
    is_locked: bool,
    is_damaged: bool,
    blocks_sight: bool,
    hp: u32,
    max_hp: u32,
}

impl Door {
    /// Create a closed, unlocked door at full durability.
    pub fn new(position: Position, events: EventBus) -> Self {
        Self::with_tuning(position, events, &DoorTuning::default())
    }

    /// Create a door with explicit durability tuning.
    pub fn with_tuning(position: Position, events: EventBus, tuning: &DoorTuning) -> Self {
        let mut door = Self {
            core: EntityCore::new(EntityKind::Door, position, true, events),
            is_open: false,
            is_locked: false,
            is_damaged: false,
            blocks_sight: true,
            hp: tuning.max_hp,
            max_hp: tuning.max_hp,
        };
        door.update_blocking();
        door
    }

    /// Set the open flag at construction time.
    pub fn with_open(mut self, open: bool) -> Self {
        self.is_open = open;
        self.update_blocking();
        self
    }

    /// Set the locked flag at construction time.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.is_locked = locked;
        self
    }

    pub fn core(&self) -> &EntityCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn is_damaged(&self) -> bool {
        self.is_damaged
    }

    pub fn blocks_sight(&self) -> bool {
        self.blocks_sight
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Recompute both blocking flags from `is_open`.
    ///
    /// The single place the derivation lives, so the flags never drift.
    fn update_blocking(&mut self) {
        self.core.set_blocks_movement(!self.is_open);
        self.blocks_sight = !self.is_open;
    }

    fn publish_state_changed(&self) {
        self.core.emit(EventData::DoorStateChanged {
            is_open: self.is_open,
            is_locked: self.is_locked,
            blocks_movement: self.core.blocks_movement(),
            blocks_sight: self.blocks_sight,
        });
    }

    /// Open the door.
    ///
    /// A locked door refuses and publishes a `locked` failure; an already open
    /// door is a silent no-op.
    pub fn open(&mut self) -> bool {
        if self.is_locked {
            self.core.emit(EventData::DoorInteractionFailed {
                reason: DoorFailure::Locked,
            });
            return false;
        }
        if self.is_open {
            return false;
        }

        self.is_open = true;
        self.update_blocking();
        self.publish_state_changed();
        true
    }

    /// Close the door, optionally checking the tile for occupants first.
    ///
    /// Closing fails silently when the door is already closed or broken. With
    /// an occupancy collaborator supplied, any movement-capable actor on the
    /// door's tile (other than the door itself) refuses the close with an
    /// `occupied` failure.
    pub fn close(&mut self, occupancy: Option<&dyn TileLookup>) -> bool {
        if !self.is_open || self.is_damaged {
            return false;
        }

        if let Some(tiles) = occupancy {
            let blocked = tiles
                .occupants_at(self.core.position())
                .iter()
                .any(|occupant| occupant.kind.is_actor() && occupant.id != self.core.id());
            if blocked {
                self.core.emit(EventData::DoorInteractionFailed {
                    reason: DoorFailure::Occupied,
                });
                return false;
            }
        }

        self.is_open = false;
        self.update_blocking();
        self.publish_state_changed();
        true
    }

    /// Close if open, otherwise open.
    pub fn toggle(&mut self, occupancy: Option<&dyn TileLookup>) -> bool {
        if self.is_open {
            self.close(occupancy)
        } else {
            self.open()
        }
    }

    /// Clear the lock. Returns false when the door was not locked.
    pub fn unlock(&mut self) -> bool {
        if !self.is_locked {
            return false;
        }
        self.is_locked = false;
        self.core.emit(EventData::DoorUnlocked);
        true
    }

    /// Apply damage to a closed, intact door.
    ///
    /// Open and broken doors ignore damage. At zero hit points the door
    /// breaks: permanently open, never closable again.
    pub fn take_damage(&mut self, amount: u32) {
        if self.is_open || self.is_damaged {
            return;
        }

        self.hp = self.hp.saturating_sub(amount);

        if self.hp == 0 {
            self.is_damaged = true;
            self.is_open = true;
            self.update_blocking();
            tracing::debug!(door = %self.core.id(), "door broken");
            self.core.emit(EventData::DoorBroken);
        } else {
            self.core.emit(EventData::DoorDamaged {
                current_hp: self.hp,
                max_hp: self.max_hp,
            });
        }
    }

    /// Persisted form of this door.
    pub fn to_record(&self) -> DoorRecord {
        DoorRecord {
            id: self.core.id(),
            x: self.core.position().x,
            y: self.core.position().y,
            blocks_movement: self.core.blocks_movement(),
            is_open: self.is_open,
            is_locked: self.is_locked,
            is_damaged: self.is_damaged,
            blocks_sight: self.blocks_sight,
            hp: self.hp,
            max_hp: self.max_hp,
        }
    }

    /// Rebuild a door from its record.
    ///
    /// Blocking flags are reinstated from the record as persisted, not
    /// recomputed, so an inconsistent save round-trips byte-for-byte.
    pub fn from_record(record: DoorRecord, events: EventBus) -> Self {
        Self {
            core: EntityCore::restore(
                record.id,
                EntityKind::Door,
                Position::new(record.x, record.y),
                record.blocks_movement,
                events,
            ),
            is_open: record.is_open,
            is_locked: record.is_locked,
            is_damaged: record.is_damaged,
            blocks_sight: record.blocks_sight,
            hp: record.hp,
            max_hp: record.max_hp,
        }
    }
}

fn default_door_hp() -> u32 {
    DoorTuning::default().max_hp
}

/// Flat persisted record for a door.
///
/// Records written before doors could take damage carry no `hp`/`max_hp`;
/// those restore at full durability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorRecord {
    pub id: EntityId,
    pub x: i32,
    pub y: i32,
    pub blocks_movement: bool,
    pub is_open: bool,
    pub is_locked: bool,
    pub is_damaged: bool,
    pub blocks_sight: bool,
    #[serde(default = "default_door_hp")]
    pub hp: u32,
    #[serde(default = "default_door_hp")]
    pub max_hp: u32,
}
