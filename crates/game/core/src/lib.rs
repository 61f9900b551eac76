//! Deterministic per-tick simulation core for the mazecrawl dungeon crawler.
//!
//! `mazecrawl-core` owns the canonical rules: movement and collision
//! resolution, pursuit pathfinding, combat, goal evaluation, and the fixed
//! per-tick pipeline that ties them together. All state mutation flows
//! through [`World`] operations (`tick`, `interact`, `build`); supporting
//! crates depend on the types re-exported here and never mutate state
//! directly.
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod goal;
pub mod path;
pub mod resolve;
pub mod rng;
pub mod state;

#[cfg(test)]
pub(crate) mod testutil;

pub use combat::BattleOutcome;
pub use config::GameConfig;
pub use error::{ErrorKind, GameError};
pub use goal::{Goal, GoalKind, LeafStatus};
pub use state::{
    Capabilities, Colour, Direction, Entity, EntityId, EntityKind, EntitySnapshot, GameMode,
    Inventory, Item, ItemKind, ItemSnapshot, MoverStats, Player, Position, Registry, World,
    WorldSnapshot,
};
