//! Grid positions and movement math.

use serde::{Deserialize, Serialize};

/// An integer position on the game grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    pub fn manhattan_distance(&self, other: Position) -> u32 {
        (other.x - self.x).unsigned_abs() + (other.y - self.y).unsigned_abs()
    }

    /// Whether `other` is exactly one cardinal step away.
    ///
    /// Diagonal neighbors are not adjacent under this rule.
    pub fn is_cardinally_adjacent(&self, other: Position) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Greedy single step toward `target`, or `None` when already there.
    ///
    /// A diagonally adjacent target forces a cardinal approach, preferring the
    /// horizontal axis. Otherwise the step follows the strictly dominant axis;
    /// equal deltas fall back to a vertical step. The step ignores obstacles -
    /// callers validate it against the map before committing movement.
    pub fn step_toward(&self, target: Position) -> Option<Position> {
        let dx = target.x - self.x;
        let dy = target.y - self.y;

        if dx == 0 && dy == 0 {
            return None;
        }

        if dx.abs() == 1 && dy.abs() == 1 {
            return Some(Position::new(self.x + dx.signum(), self.y));
        }

        if dx.abs() > dy.abs() {
            Some(Position::new(self.x + dx.signum(), self.y))
        } else if dy != 0 {
            Some(Position::new(self.x, self.y + dy.signum()))
        } else {
            Some(Position::new(self.x + dx.signum(), self.y))
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.manhattan_distance(Position::new(3, 1)), 4);
        assert_eq!(origin.manhattan_distance(Position::new(-2, -2)), 4);
        assert_eq!(origin.manhattan_distance(origin), 0);
    }

    #[test]
    fn test_cardinal_adjacency() {
        let at = Position::new(2, 2);
        assert!(at.is_cardinally_adjacent(Position::new(2, 3)));
        assert!(at.is_cardinally_adjacent(Position::new(1, 2)));
        assert!(!at.is_cardinally_adjacent(Position::new(3, 3)));
        assert!(!at.is_cardinally_adjacent(Position::new(2, 4)));
        assert!(!at.is_cardinally_adjacent(at));
    }

    #[test]
    fn test_step_toward_diagonal_neighbor_prefers_horizontal() {
        let step = Position::new(0, 0).step_toward(Position::new(1, 1));
        assert_eq!(step, Some(Position::new(1, 0)));

        let step = Position::new(0, 0).step_toward(Position::new(-1, 1));
        assert_eq!(step, Some(Position::new(-1, 0)));
    }

    #[test]
    fn test_step_toward_follows_dominant_axis() {
        let step = Position::new(0, 0).step_toward(Position::new(3, 1));
        assert_eq!(step, Some(Position::new(1, 0)));

        let step = Position::new(0, 0).step_toward(Position::new(1, 3));
        assert_eq!(step, Some(Position::new(0, 1)));
    }

    #[test]
    fn test_step_toward_tie_steps_vertically() {
        let step = Position::new(0, 0).step_toward(Position::new(2, 2));
        assert_eq!(step, Some(Position::new(0, 1)));

        let step = Position::new(0, 0).step_toward(Position::new(-3, 3));
        assert_eq!(step, Some(Position::new(0, 1)));
    }

    #[test]
    fn test_step_toward_axis_aligned() {
        let step = Position::new(0, 0).step_toward(Position::new(-4, 0));
        assert_eq!(step, Some(Position::new(-1, 0)));

        let step = Position::new(0, 0).step_toward(Position::new(0, 2));
        assert_eq!(step, Some(Position::new(0, 1)));
    }

    #[test]
    fn test_step_toward_self_is_none() {
        let at = Position::new(5, 5);
        assert_eq!(at.step_toward(at), None);
    }
}
