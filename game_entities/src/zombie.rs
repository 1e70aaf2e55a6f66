//! Zombies - perception memory, turn lifecycle, and greedy pathing.

use game_world::{
    EntityId, EntityKind, EventBus, EventData, Position, SightOptions, SightProvider,
};
use serde::{Deserialize, Serialize};

use crate::config::ZombieTuning;
use crate::entity::{round_to_tenth, EntityCore};

/// Coarse AI mode of a zombie.
///
/// Advisory bookkeeping set by the external turn controller; this layer only
/// resets it around the turn boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorState {
    #[default]
    Idle,
    Pursuing,
    Investigating,
    Wandering,
}

/// What a zombie attack call reports back to the turn controller.
///
/// Death handling is delegated to the caller; the zombie publishes damage but
/// never a death event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    pub damage_dealt: u32,
    pub is_dead: bool,
}

/// A zombie actor.
#[derive(Debug, Clone)]
pub struct Zombie {
    core: EntityCore,
    subtype: String,
    hp: u32,
    max_hp: u32,
    max_ap: f32,
    current_ap: f32,
    sight_range: u32,
    last_seen: bool,
    target_coords: Option<Position>,
    heard_noise: bool,
    noise_coords: Option<Position>,
    behavior_state: BehaviorState,
    is_active: bool,
}

impl Zombie {
    /// Create a basic zombie at full health and action points, awaiting its
    /// first turn.
    pub fn new(position: Position, events: EventBus) -> Self {
        Self::with_tuning(position, events, &ZombieTuning::default())
    }

    /// Create a zombie with explicit stat tuning.
    pub fn with_tuning(position: Position, events: EventBus, tuning: &ZombieTuning) -> Self {
        Self {
            core: EntityCore::new(EntityKind::Zombie, position, true, events),
            subtype: "basic".to_string(),
            hp: tuning.max_hp,
            max_hp: tuning.max_hp,
            max_ap: tuning.max_ap,
            current_ap: tuning.max_ap,
            sight_range: tuning.sight_range,
            last_seen: false,
            target_coords: None,
            heard_noise: false,
            noise_coords: None,
            behavior_state: BehaviorState::Idle,
            is_active: false,
        }
    }

    /// Set the subtype tag at construction time.
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = subtype.into();
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

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn current_ap(&self) -> f32 {
        self.current_ap
    }

    pub fn max_ap(&self) -> f32 {
        self.max_ap
    }

    pub fn sight_range(&self) -> u32 {
        self.sight_range
    }

    pub fn last_seen(&self) -> bool {
        self.last_seen
    }

    /// Last known target position; meaningful only while `last_seen` is true.
    pub fn target_coords(&self) -> Option<Position> {
        self.target_coords
    }

    pub fn heard_noise(&self) -> bool {
        self.heard_noise
    }

    /// Heard noise position; meaningful only while `heard_noise` is true.
    pub fn noise_coords(&self) -> Option<Position> {
        self.noise_coords
    }

    pub fn behavior_state(&self) -> BehaviorState {
        self.behavior_state
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Begin this zombie's turn: full AP, active, idle.
    pub fn start_turn(&mut self) {
        self.current_ap = self.max_ap;
        self.is_active = true;
        self.behavior_state = BehaviorState::Idle;
        tracing::debug!(zombie = %self.core.id(), "turn started");
    }

    /// End this zombie's turn: AP zeroed, inactive, idle.
    pub fn end_turn(&mut self) {
        self.current_ap = 0.0;
        self.is_active = false;
        self.behavior_state = BehaviorState::Idle;
        tracing::debug!(zombie = %self.core.id(), "turn ended");
    }

    /// Set the advisory behavior state chosen by the turn controller.
    pub fn set_behavior_state(&mut self, state: BehaviorState) {
        self.behavior_state = state;
    }

    /// Record a sighting of the target and publish the discovery.
    pub fn set_target_sighted(&mut self, position: Position) {
        self.last_seen = true;
        self.target_coords = Some(position);
        self.core.emit(EventData::ZombieTargetSighted {
            zombie_id: self.core.id(),
            target_coords: position,
        });
    }

    /// Forget the last sighting.
    pub fn clear_target_sighted(&mut self) {
        self.last_seen = false;
        self.target_coords = None;
    }

    /// Record a heard noise and publish the discovery.
    pub fn set_noise_heard(&mut self, position: Position) {
        self.heard_noise = true;
        self.noise_coords = Some(position);
        self.core.emit(EventData::ZombieNoiseHeard {
            zombie_id: self.core.id(),
            noise_coords: position,
        });
    }

    /// Forget the heard noise.
    pub fn clear_noise_heard(&mut self) {
        self.heard_noise = false;
        self.noise_coords = None;
    }

    /// Whether this zombie can see the given position.
    ///
    /// Delegates to the external line-of-sight query bounded by this zombie's
    /// sight range, ignoring nothing; only the boolean answer is exposed.
    pub fn can_see_position(&self, sight: &dyn SightProvider, target: Position) -> bool {
        let options = SightOptions::ranged(self.sight_range);
        sight
            .line_of_sight(self.core.position(), target, &options)
            .visible
    }

    /// Whether this zombie can see the given entity.
    pub fn can_see_entity(&self, sight: &dyn SightProvider, other: &EntityCore) -> bool {
        self.can_see_position(sight, other.position())
    }

    /// Manhattan distance to a position.
    pub fn distance_to(&self, target: Position) -> u32 {
        self.core.position().manhattan_distance(target)
    }

    /// Whether a position is exactly one cardinal step away.
    pub fn is_adjacent_to(&self, target: Position) -> bool {
        self.core.position().is_cardinally_adjacent(target)
    }

    /// Greedy single step toward a target, or `None` when already there.
    ///
    /// The step ignores obstacles; the turn controller validates it against
    /// the map before committing movement.
    pub fn next_move_toward(&self, target: Position) -> Option<Position> {
        self.core.position().step_toward(target)
    }

    /// Take damage, clamped at zero health.
    ///
    /// Publishes the damage and reports the outcome; the caller decides what
    /// death means.
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        let old_hp = self.hp;
        self.hp = self.hp.saturating_sub(amount);

        self.core.emit(EventData::ZombieDamageTaken {
            amount,
            old_hp,
            current_hp: self.hp,
            max_hp: self.max_hp,
        });

        DamageOutcome {
            damage_dealt: old_hp - self.hp,
            is_dead: self.hp == 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Spend action points. Fails without state change when the pool is short.
    pub fn use_ap(&mut self, amount: f32) -> bool {
        if self.current_ap < amount {
            return false;
        }

        self.current_ap = round_to_tenth(self.current_ap - amount);
        self.core.emit(EventData::ZombieApUsed {
            used: amount,
            remaining: self.current_ap,
        });
        true
    }

    /// Persisted form of this zombie.
    ///
    /// Health is not part of the record; zombies restore at full health.
    pub fn to_record(&self) -> ZombieRecord {
        ZombieRecord {
            id: self.core.id(),
            x: self.core.position().x,
            y: self.core.position().y,
            blocks_movement: self.core.blocks_movement(),
            subtype: self.subtype.clone(),
            last_seen: self.last_seen,
            heard_noise: self.heard_noise,
            target_sighted_coords: self.target_coords,
            noise_coords: self.noise_coords,
            max_ap: self.max_ap,
            current_ap: self.current_ap,
            sight_range: self.sight_range,
            behavior_state: self.behavior_state,
            is_active: self.is_active,
        }
    }

    /// Rebuild a zombie from its record.
    pub fn from_record(record: ZombieRecord, events: EventBus) -> Self {
        let tuning = ZombieTuning::default();
        Self {
            core: EntityCore::restore(
                record.id,
                EntityKind::Zombie,
                Position::new(record.x, record.y),
                record.blocks_movement,
                events,
            ),
            subtype: record.subtype,
            hp: tuning.max_hp,
            max_hp: tuning.max_hp,
            max_ap: record.max_ap,
            current_ap: record.current_ap,
            sight_range: record.sight_range,
            last_seen: record.last_seen,
            target_coords: record.target_sighted_coords,
            heard_noise: record.heard_noise,
            noise_coords: record.noise_coords,
            behavior_state: record.behavior_state,
            is_active: record.is_active,
        }
    }
}

/// Flat persisted record for a zombie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZombieRecord {
    pub id: EntityId,
    pub x: i32,
    pub y: i32,
    pub blocks_movement: bool,
    pub subtype: String,
    pub last_seen: bool,
    pub heard_noise: bool,
    pub target_sighted_coords: Option<Position>,
    pub noise_coords: Option<Position>,
    pub max_ap: f32,
    pub current_ap: f32,
    pub sight_range: u32,
    pub behavior_state: BehaviorState,
    pub is_active: bool,
}
