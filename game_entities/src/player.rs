//! The player - health and action-point pools.

use game_world::{EntityId, EntityKind, EventBus, EventData, Position};
use serde::{Deserialize, Serialize};

use crate::config::PlayerTuning;
use crate::entity::{round_to_tenth, EntityCore};

/// The player character.
///
/// Both pools are clamped to `[0, max]` and rounded to one decimal place
/// after every mutation.
#[derive(Debug, Clone)]
pub struct Player {
    core: EntityCore,
    name: String,
    hp: f32,
    max_hp: f32,
    ap: f32,
    max_ap: f32,
}

impl Player {
    /// Create a player at full health and action points.
    pub fn new(name: impl Into<String>, position: Position, events: EventBus) -> Self {
        Self::with_tuning(name, position, events, &PlayerTuning::default())
    }

    /// Create a player with explicit pool tuning.
    pub fn with_tuning(
        name: impl Into<String>,
        position: Position,
        events: EventBus,
        tuning: &PlayerTuning,
    ) -> Self {
        Self {
            core: EntityCore::new(EntityKind::Player, position, true, events),
            name: name.into(),
            hp: tuning.max_hp,
            max_hp: tuning.max_hp,
            ap: tuning.max_ap,
            max_ap: tuning.max_ap,
        }
    }

    pub fn core(&self) -> &EntityCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hp(&self) -> f32 {
        self.hp
    }

    pub fn max_hp(&self) -> f32 {
        self.max_hp
    }

    pub fn ap(&self) -> f32 {
        self.ap
    }

    pub fn max_ap(&self) -> f32 {
        self.max_ap
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    /// Spend action points. Fails without state change when the pool is short.
    pub fn use_ap(&mut self, amount: f32) -> bool {
        if self.ap < amount {
            return false;
        }

        self.ap = round_to_tenth(self.ap - amount);
        self.core.emit(EventData::ApUsed {
            used: amount,
            remaining: self.ap,
        });
        true
    }

    /// Regain action points up to the pool maximum.
    ///
    /// Publishes only when the clamped delta is strictly positive.
    pub fn restore_ap(&mut self, amount: f32) {
        let old_ap = self.ap;
        self.ap = round_to_tenth((self.ap + amount).min(self.max_ap));

        if self.ap > old_ap {
            self.core.emit(EventData::ApRestored {
                amount: round_to_tenth(self.ap - old_ap),
                current: self.ap,
                max_ap: self.max_ap,
            });
        }
    }

    /// Take damage, floored at zero health.
    ///
    /// Always publishes the damage; publishes `player_died` exactly when
    /// health transitions to zero.
    pub fn take_damage(&mut self, amount: f32) {
        let old_hp = self.hp;
        self.hp = round_to_tenth((self.hp - amount).max(0.0));

        self.core.emit(EventData::DamageTaken {
            amount,
            old_hp,
            current_hp: self.hp,
            max_hp: self.max_hp,
        });

        if old_hp > 0.0 && self.hp == 0.0 {
            tracing::debug!(player = %self.name, "player died");
            self.core.emit(EventData::PlayerDied);
        }
    }

    /// Regain health up to the maximum. Publishes only on an actual change.
    pub fn heal(&mut self, amount: f32) {
        let old_hp = self.hp;
        self.hp = round_to_tenth((self.hp + amount).min(self.max_hp));

        if self.hp != old_hp {
            self.core.emit(EventData::Healed {
                amount: round_to_tenth(self.hp - old_hp),
                current_hp: self.hp,
                max_hp: self.max_hp,
            });
        }
    }

    /// Persisted form of this player.
    pub fn to_record(&self) -> PlayerRecord {
        PlayerRecord {
            id: self.core.id(),
            x: self.core.position().x,
            y: self.core.position().y,
            blocks_movement: self.core.blocks_movement(),
            name: self.name.clone(),
            hp: self.hp,
            max_hp: self.max_hp,
            ap: self.ap,
            max_ap: self.max_ap,
        }
    }

    /// Rebuild a player from its record.
    pub fn from_record(record: PlayerRecord, events: EventBus) -> Self {
        Self {
            core: EntityCore::restore(
                record.id,
                EntityKind::Player,
                Position::new(record.x, record.y),
                record.blocks_movement,
                events,
            ),
            name: record.name,
            hp: record.hp,
            max_hp: record.max_hp,
            ap: record.ap,
            max_ap: record.max_ap,
        }
    }
}

/// Flat persisted record for the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: EntityId,
    pub x: i32,
    pub y: i32,
    pub blocks_movement: bool,
    pub name: String,
    pub hp: f32,
    pub max_hp: f32,
    pub ap: f32,
    pub max_ap: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use game_world::GameEvent;

    fn collect(bus: &EventBus) -> Rc<RefCell<Vec<GameEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        log
    }

    #[test]
    fn test_new_player_is_at_full_pools() {
        let player = Player::new("Riley", Position::new(0, 0), EventBus::new());
        assert_eq!(player.name(), "Riley");
        assert_eq!(player.hp(), 100.0);
        assert_eq!(player.ap(), 100.0);
        assert!(player.core().blocks_movement());
    }

    #[test]
    fn test_use_ap_insufficient_leaves_pool_unchanged() {
        let bus = EventBus::new();
        let log = collect(&bus);
        let mut player = Player::new("Riley", Position::new(0, 0), bus);

        assert!(!player.use_ap(150.0));
        assert_eq!(player.ap(), 100.0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_use_ap_decrements_and_rounds() {
        let bus = EventBus::new();
        let log = collect(&bus);
        let mut player = Player::new("Riley", Position::new(0, 0), bus);

        assert!(player.use_ap(30.0));
        assert!(player.use_ap(30.0));
        assert!(player.use_ap(30.0));
        assert_eq!(player.ap(), 10.0);

        let events = log.borrow();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[2].data,
            EventData::ApUsed {
                used: 30.0,
                remaining: 10.0,
            }
        );
    }

    #[test]
    fn test_use_ap_exact_pool_succeeds() {
        let mut player = Player::new("Riley", Position::new(0, 0), EventBus::new());
        assert!(player.use_ap(100.0));
        assert_eq!(player.ap(), 0.0);
        assert!(!player.use_ap(0.1));
    }

    #[test]
    fn test_restore_ap_clamps_and_publishes_on_gain_only() {
        let bus = EventBus::new();
        let log = collect(&bus);
        let mut player = Player::new("Riley", Position::new(0, 0), bus);

        player.use_ap(15.5);
        player.restore_ap(100.0);
        assert_eq!(player.ap(), 100.0);

        assert_eq!(
            log.borrow()[1].data,
            EventData::ApRestored {
                amount: 15.5,
                current: 100.0,
                max_ap: 100.0,
            }
        );

        // already full: no event
        player.restore_ap(10.0);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_take_damage_always_publishes() {
        let bus = EventBus::new();
        let log = collect(&bus);
        let mut player = Player::new("Riley", Position::new(0, 0), bus);

        player.take_damage(12.3);
        assert_eq!(player.hp(), 87.7);
        assert_eq!(
            log.borrow()[0].data,
            EventData::DamageTaken {
                amount: 12.3,
                old_hp: 100.0,
                current_hp: 87.7,
                max_hp: 100.0,
            }
        );
    }

    #[test]
    fn test_player_dies_exactly_once() {
        let bus = EventBus::new();
        let log = collect(&bus);
        let mut player = Player::new("Riley", Position::new(0, 0), bus);

        player.take_damage(99.0);
        assert_eq!(player.hp(), 1.0);
        player.take_damage(1.0);
        assert!(player.is_dead());
        player.take_damage(5.0);
        player.take_damage(5.0);

        let died = log
            .borrow()
            .iter()
            .filter(|e| matches!(e.data, EventData::PlayerDied))
            .count();
        assert_eq!(died, 1);
    }

    #[test]
    fn test_heal_publishes_only_on_change() {
        let bus = EventBus::new();
        let log = collect(&bus);
        let mut player = Player::new("Riley", Position::new(0, 0), bus);

        player.heal(5.0);
        assert!(log.borrow().is_empty());

        player.take_damage(30.0);
        player.heal(12.5);
        assert_eq!(player.hp(), 82.5);
        assert_eq!(
            log.borrow()[1].data,
            EventData::Healed {
                amount: 12.5,
                current_hp: 82.5,
                max_hp: 100.0,
            }
        );

        player.heal(100.0);
        assert_eq!(player.hp(), 100.0);
    }

    #[test]
    fn test_record_round_trip() {
        let bus = EventBus::new();
        let mut player = Player::new("Riley", Position::new(6, 9), bus.clone());
        player.take_damage(0.25);
        player.use_ap(3.3);

        let record = player.to_record();
        let restored = Player::from_record(record.clone(), bus);

        assert_eq!(restored.to_record(), record);
        assert_eq!(restored.hp(), 99.8);
        assert_eq!(restored.ap(), 96.7);
        assert_eq!(restored.name(), "Riley");
    }
}
