//! Entity identity - stable IDs and variant tags.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for all entities in the game.
///
/// Opaque and immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an entity ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a nil/empty entity ID (useful for defaults).
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error raised when a kind tag does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind `{0}`")]
pub struct UnknownKind(pub String);

/// Variant tag identifying what an entity is. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Door,
    Player,
    Zombie,
    Item,
    Marker,
}

impl EntityKind {
    /// The lowercase tag used in persisted records and event streams.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Door => "door",
            EntityKind::Player => "player",
            EntityKind::Zombie => "zombie",
            EntityKind::Item => "item",
            EntityKind::Marker => "marker",
        }
    }

    /// Whether this kind is a movement-capable actor.
    ///
    /// Actors are what keeps a door from closing on their tile.
    pub fn is_actor(&self) -> bool {
        matches!(self, EntityKind::Player | EntityKind::Zombie)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "door" => Ok(EntityKind::Door),
            "player" => Ok(EntityKind::Player),
            "zombie" => Ok(EntityKind::Zombie),
            "item" => Ok(EntityKind::Item),
            "marker" => Ok(EntityKind::Marker),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}
