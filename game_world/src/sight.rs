//! Line-of-sight query interface.
//!
//! The visibility algorithm itself lives outside this layer. Entities consult
//! it through [`SightProvider`] and act on the boolean answer alone; the
//! remaining outcome fields exist for diagnostics at higher layers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::grid::Position;
use crate::ids::EntityId;

/// Constraints on a line-of-sight query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SightOptions {
    /// Maximum range in grid cells; cells beyond it are never visible.
    pub max_range: u32,
    /// Terrain tags the query should treat as transparent.
    pub ignore_terrain: HashSet<String>,
    /// Entities the query should treat as transparent.
    pub ignore_entities: HashSet<EntityId>,
}

impl SightOptions {
    /// Options with a range cap and nothing ignored.
    pub fn ranged(max_range: u32) -> Self {
        Self {
            max_range,
            ..Default::default()
        }
    }
}

/// Result of a line-of-sight query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SightOutcome {
    pub visible: bool,
    pub distance: Option<u32>,
    pub blocked_by: Option<EntityId>,
}

impl SightOutcome {
    /// An unobstructed sightline.
    pub fn seen() -> Self {
        Self {
            visible: true,
            distance: None,
            blocked_by: None,
        }
    }

    /// No sightline (out of range or obstructed terrain).
    pub fn hidden() -> Self {
        Self {
            visible: false,
            distance: None,
            blocked_by: None,
        }
    }

    /// A sightline obstructed by a specific entity.
    pub fn blocked(by: EntityId) -> Self {
        Self {
            visible: false,
            distance: None,
            blocked_by: Some(by),
        }
    }
}

/// Read-only visibility query between two grid cells.
///
/// Implementations are synchronous and side-effect free; they bundle the
/// visibility algorithm with whatever map state it needs.
pub trait SightProvider {
    fn line_of_sight(&self, from: Position, to: Position, options: &SightOptions)
        -> SightOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OpenField;

    impl SightProvider for OpenField {
        fn line_of_sight(
            &self,
            from: Position,
            to: Position,
            options: &SightOptions,
        ) -> SightOutcome {
            let distance = from.manhattan_distance(to);
            if distance <= options.max_range {
                SightOutcome {
                    distance: Some(distance),
                    ..SightOutcome::seen()
                }
            } else {
                SightOutcome::hidden()
            }
        }
    }

    #[test]
    fn test_range_caps_visibility() {
        let field = OpenField;
        let options = SightOptions::ranged(5);

        let near = field.line_of_sight(Position::new(0, 0), Position::new(2, 3), &options);
        assert!(near.visible);
        assert_eq!(near.distance, Some(5));

        let far = field.line_of_sight(Position::new(0, 0), Position::new(4, 4), &options);
        assert!(!far.visible);
    }
}
