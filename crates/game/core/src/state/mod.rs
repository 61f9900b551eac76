//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the grid, entities,
//! the player, the inventory, and the world aggregate. Collaborating crates
//! clone or query this state but mutate it exclusively through the engine
//! operations on [`World`].
mod common;
mod entity;
mod inventory;
mod player;
mod registry;
mod world;

pub use common::{Direction, EntityId, Position};
pub use entity::{Capabilities, Colour, Entity, EntityKind, ItemKind, MoverStats};
pub use inventory::{Inventory, Item};
pub use player::Player;
pub use registry::Registry;
pub use world::{EntitySnapshot, ItemSnapshot, World, WorldSnapshot};

pub use crate::config::GameMode;
