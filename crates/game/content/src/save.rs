//! Versioned save-game envelope.
//!
//! A save file is the whole [`World`] behind a version number, serialized as
//! JSON. Everything the simulation needs is inside the world (tick counter,
//! seed, historical entity count, inventory order), so loading a save and
//! continuing is indistinguishable from never having stopped.

use anyhow::{Context, bail};
use mazecrawl_core::World;
use serde::{Deserialize, Serialize};

/// Bumped whenever the world layout changes incompatibly.
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    pub world: World,
}

impl SaveGame {
    pub fn new(world: World) -> Self {
        Self {
            version: SAVE_VERSION,
            world,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("serializing save game")
    }

    /// Parses a save file, rejecting versions this build does not know.
    pub fn from_json(json: &str) -> anyhow::Result<World> {
        let save: SaveGame = serde_json::from_str(json).context("parsing save game")?;
        if save.version != SAVE_VERSION {
            bail!(
                "save version {} is not supported (expected {SAVE_VERSION})",
                save.version
            );
        }
        Ok(save.world)
    }
}
