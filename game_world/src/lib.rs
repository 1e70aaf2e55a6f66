//! # Game World
//!
//! The shared world vocabulary for Holdout. This crate defines the grid the
//! game is played on, entity identity, the synchronous event channel, and the
//! interfaces through which entities consult external collaborators
//! (line-of-sight, tile occupancy). It contains no entity behavior.

pub mod events;
pub mod grid;
pub mod ids;
pub mod sight;
pub mod tiles;

pub use events::*;
pub use grid::*;
pub use ids::*;
pub use sight::*;
pub use tiles::*;
