//! Dungeon files and save games.
//!
//! This crate turns on-disk JSON into `mazecrawl-core` worlds and back:
//! - `dungeon` parses authored dungeon files (entity placements plus a
//!   goal-condition tree) into a fresh [`mazecrawl_core::World`];
//! - `save` wraps a whole world in a versioned envelope for save files.
//!
//! Parsing uses `anyhow` so callers get file-level context on bad content;
//! the core crate's own error type is reserved for rule violations.

pub mod dungeon;
pub mod save;

pub use dungeon::parse_dungeon;
pub use save::{SAVE_VERSION, SaveGame};
