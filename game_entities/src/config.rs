//! Tuning configuration - per-variant stat defaults, overridable from TOML.

use serde::{Deserialize, Serialize};

/// Failure to parse a tuning document.
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("invalid tuning document: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Stat defaults for every entity variant.
///
/// `Tuning::default()` is the single source of the baseline constants; a TOML
/// document may override any subset of fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub door: DoorTuning,
    pub player: PlayerTuning,
    pub zombie: ZombieTuning,
}

impl Tuning {
    /// Parse a (possibly partial) TOML tuning document.
    pub fn from_toml_str(document: &str) -> Result<Self, TuningError> {
        Ok(toml::from_str(document)?)
    }
}

/// Door durability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorTuning {
    pub max_hp: u32,
}

impl Default for DoorTuning {
    fn default() -> Self {
        Self { max_hp: 20 }
    }
}

/// Player resource pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_hp: f32,
    pub max_ap: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_hp: 100.0,
            max_ap: 100.0,
        }
    }
}

/// Zombie stats and perception range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZombieTuning {
    pub max_hp: u32,
    pub max_ap: f32,
    pub sight_range: u32,
}

impl Default for ZombieTuning {
    fn default() -> Self {
        Self {
            max_hp: 10,
            max_ap: 8.0,
            sight_range: 18,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_constants() {
        let tuning = Tuning::default();
        assert_eq!(tuning.door.max_hp, 20);
        assert_eq!(tuning.player.max_hp, 100.0);
        assert_eq!(tuning.player.max_ap, 100.0);
        assert_eq!(tuning.zombie.max_hp, 10);
        assert_eq!(tuning.zombie.max_ap, 8.0);
        assert_eq!(tuning.zombie.sight_range, 18);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let tuning = Tuning::from_toml_str("[zombie]\nsight_range = 12\n").unwrap();
        assert_eq!(tuning.zombie.sight_range, 12);
        assert_eq!(tuning.zombie.max_hp, 10);
        assert_eq!(tuning.door, DoorTuning::default());
        assert_eq!(tuning.player, PlayerTuning::default());
    }

    #[test]
    fn test_malformed_document_is_rejected() {
        assert!(Tuning::from_toml_str("[door]\nmax_hp = \"many\"\n").is_err());
    }
}
