//! The façade controller.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use mazecrawl_content::{SaveGame, parse_dungeon};
use mazecrawl_core::{Direction, EntityId, GameMode, World, WorldSnapshot};

use crate::error::RuntimeError;

type Result<T> = std::result::Result<T, RuntimeError>;

/// Owns the live world and its surrounding files.
///
/// Dungeon files are read from `dungeon_dir`, saves are written to
/// `save_dir`; both hold `<name>.json`. At most one game is in progress at a
/// time; starting or loading a game replaces it.
pub struct Controller {
    dungeon_dir: PathBuf,
    save_dir: PathBuf,
    session: Option<World>,
}

impl Controller {
    pub fn new(dungeon_dir: impl Into<PathBuf>, save_dir: impl Into<PathBuf>) -> Result<Self> {
        let save_dir = save_dir.into();
        fs::create_dir_all(&save_dir)?;
        Ok(Self {
            dungeon_dir: dungeon_dir.into(),
            save_dir,
            session: None,
        })
    }

    /// Starts a new game with a random seed.
    pub fn new_game(&mut self, dungeon: &str, mode: &str) -> Result<WorldSnapshot> {
        self.new_game_seeded(dungeon, mode, rand::random())
    }

    /// Starts a new game with an explicit seed, for reproducible runs.
    pub fn new_game_seeded(&mut self, dungeon: &str, mode: &str, seed: u64) -> Result<WorldSnapshot> {
        let mode = GameMode::from_str(mode)
            .map_err(|_| RuntimeError::UnknownGameMode(mode.to_owned()))?;
        let path = self.dungeon_dir.join(format!("{dungeon}.json"));
        let json = fs::read_to_string(&path)
            .map_err(|_| RuntimeError::UnknownDungeon(dungeon.to_owned()))?;

        let span = tracing::info_span!("new_game", %dungeon, %mode, seed);
        let _guard = span.enter();
        let world = parse_dungeon(dungeon, &json, mode, seed)?;
        tracing::debug!(entities = world.registry().len(), "dungeon parsed");

        let snapshot = world.snapshot();
        self.session = Some(world);
        Ok(snapshot)
    }

    /// Advances the live game by one tick.
    pub fn tick(&mut self, item: Option<EntityId>, direction: Direction) -> Result<WorldSnapshot> {
        let world = self.session.as_mut().ok_or(RuntimeError::NoActiveGame)?;
        let span = tracing::info_span!("tick", tick = world.tick, %direction);
        let _guard = span.enter();
        Ok(world.tick(item, direction)?)
    }

    pub fn interact(&mut self, entity: EntityId) -> Result<WorldSnapshot> {
        let world = self.session.as_mut().ok_or(RuntimeError::NoActiveGame)?;
        let span = tracing::info_span!("interact", %entity);
        let _guard = span.enter();
        Ok(world.interact(entity)?)
    }

    pub fn build(&mut self, buildable: &str) -> Result<WorldSnapshot> {
        let world = self.session.as_mut().ok_or(RuntimeError::NoActiveGame)?;
        let span = tracing::info_span!("build", buildable);
        let _guard = span.enter();
        Ok(world.build(buildable)?)
    }

    /// Writes the live game to `<save_dir>/<name>.json`.
    ///
    /// The write goes through a temp file and an atomic rename so a crash
    /// mid-save never leaves a truncated file behind.
    pub fn save_game(&mut self, name: &str) -> Result<WorldSnapshot> {
        let world = self.session.as_ref().ok_or(RuntimeError::NoActiveGame)?;
        let json = SaveGame::new(world.clone()).to_json()?;

        let path = self.save_path(name);
        let temp = path.with_extension("json.tmp");
        fs::write(&temp, json)?;
        fs::rename(&temp, &path)?;
        tracing::debug!(name, path = %path.display(), "game saved");

        Ok(world.snapshot())
    }

    /// Restores a save as the live game.
    pub fn load_game(&mut self, name: &str) -> Result<WorldSnapshot> {
        let path = self.save_path(name);
        let json =
            fs::read_to_string(&path).map_err(|_| RuntimeError::UnknownSave(name.to_owned()))?;
        let world = SaveGame::from_json(&json)?;
        tracing::debug!(name, tick = world.tick, "game loaded");

        let snapshot = world.snapshot();
        self.session = Some(world);
        Ok(snapshot)
    }

    pub fn list_dungeons(&self) -> Result<Vec<String>> {
        list_json_names(&self.dungeon_dir)
    }

    pub fn list_saves(&self) -> Result<Vec<String>> {
        list_json_names(&self.save_dir)
    }

    /// The live world, for callers that only want to inspect state.
    pub fn current(&self) -> Option<&World> {
        self.session.as_ref()
    }

    fn save_path(&self, name: &str) -> PathBuf {
        self.save_dir.join(format!("{name}.json"))
    }
}

fn list_json_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if let Some(file) = path.file_name().and_then(|f| f.to_str())
            && let Some(name) = file.strip_suffix(".json")
        {
            names.push(name.to_owned());
        }
    }
    names.sort_unstable();
    Ok(names)
}
