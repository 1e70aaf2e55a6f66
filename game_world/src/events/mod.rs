//! Events module - the synchronous publish/subscribe channel.
//!
//! Every externally observable state change in the entity layer is published
//! as a [`GameEvent`]:
//! - **EntitySnapshot**: who published, and from where
//! - **EventData**: one typed variant per event name
//! - **EventBus**: the observer registry delivering events on the same call
//!   stack, in subscription order

mod bus;

pub use bus::*;

use serde::{Deserialize, Serialize};

use crate::grid::Position;
use crate::ids::{EntityId, EntityKind};

/// Identity and position of the publishing entity, captured after the
/// triggering mutation completed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
}

/// Why a door interaction was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorFailure {
    Locked,
    Occupied,
}

/// Payload of a game event, one variant per event name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventData {
    EntityMoved {
        old_position: Position,
        new_position: Position,
    },
    DoorStateChanged {
        is_open: bool,
        is_locked: bool,
        blocks_movement: bool,
        blocks_sight: bool,
    },
    DoorInteractionFailed {
        reason: DoorFailure,
    },
    DoorUnlocked,
    DoorDamaged {
        current_hp: u32,
        max_hp: u32,
    },
    DoorBroken,
    ApUsed {
        used: f32,
        remaining: f32,
    },
    ApRestored {
        amount: f32,
        current: f32,
        max_ap: f32,
    },
    DamageTaken {
        amount: f32,
        old_hp: f32,
        current_hp: f32,
        max_hp: f32,
    },
    PlayerDied,
    Healed {
        amount: f32,
        current_hp: f32,
        max_hp: f32,
    },
    ZombieDamageTaken {
        amount: u32,
        old_hp: u32,
        current_hp: u32,
        max_hp: u32,
    },
    ZombieApUsed {
        used: f32,
        remaining: f32,
    },
    ZombieTargetSighted {
        zombie_id: EntityId,
        target_coords: Position,
    },
    ZombieNoiseHeard {
        zombie_id: EntityId,
        noise_coords: Position,
    },
}

/// A published event: payload plus source snapshot and sequence stamp.
///
/// `seq` is a monotonic per-bus counter assigned at publish time. It stands in
/// for a wall-clock timestamp so event streams stay deterministic across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub seq: u64,
    pub source: EntitySnapshot,
    pub data: EventData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_flat_with_tag() {
        let event = GameEvent {
            seq: 3,
            source: EntitySnapshot {
                id: EntityId::nil(),
                kind: EntityKind::Door,
                position: Position::new(4, 7),
            },
            data: EventData::DoorInteractionFailed {
                reason: DoorFailure::Locked,
            },
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["data"]["event"], "door_interaction_failed");
        assert_eq!(json["data"]["reason"], "locked");
        assert_eq!(json["source"]["kind"], "door");

        let back: GameEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
