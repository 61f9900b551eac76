//! Dungeon file parsing.
//!
//! A dungeon file is a JSON object with an `entities` array and a
//! `goal-condition` tree:
//!
//! ```json
//! {
//!   "entities": [
//!     { "type": "player", "x": 1, "y": 1 },
//!     { "type": "wall", "x": 0, "y": 0 },
//!     { "type": "key", "x": 3, "y": 1, "colour": "red" },
//!     { "type": "door", "x": 5, "y": 1, "colour": "red" },
//!     { "type": "swamp", "x": 4, "y": 2, "movement_factor": 5 }
//!   ],
//!   "goal-condition": {
//!     "goal": "AND",
//!     "subgoals": [ { "goal": "exit" }, { "goal": "treasure" } ]
//!   }
//! }
//! ```
//!
//! Exactly one `player` entry is required. Entity ids are assigned in file
//! order, so authored dungeons replay identically run to run.

use std::str::FromStr;

use anyhow::{Context, bail};
use mazecrawl_core::{
    Colour, Entity, EntityId, EntityKind, GameConfig, GameMode, Goal, GoalKind, ItemKind,
    MoverStats, Player, Position, Registry, World,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DungeonFile {
    entities: Vec<EntitySpec>,
    #[serde(rename = "goal-condition")]
    goal_condition: GoalSpec,
}

#[derive(Debug, Deserialize)]
struct EntitySpec {
    #[serde(rename = "type")]
    kind: String,
    x: i32,
    y: i32,
    colour: Option<String>,
    movement_factor: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GoalSpec {
    goal: String,
    #[serde(default)]
    subgoals: Vec<GoalSpec>,
}

/// Parses a dungeon file into a fresh world at tick zero.
///
/// `name` is carried into the world (and its snapshots) verbatim; `seed`
/// feeds every future random event in the game.
pub fn parse_dungeon(name: &str, json: &str, mode: GameMode, seed: u64) -> anyhow::Result<World> {
    let file: DungeonFile =
        serde_json::from_str(json).with_context(|| format!("dungeon '{name}' is not valid"))?;

    let mut player: Option<Player> = None;
    let mut registry = Registry::default();

    for (index, spec) in file.entities.iter().enumerate() {
        let id = EntityId(index as u32);
        let position = Position::new(spec.x, spec.y);

        if spec.kind == "player" {
            if player.is_some() {
                bail!("dungeon '{name}' places more than one player");
            }
            player = Some(Player::new(id, position, mode));
            continue;
        }

        let kind = entity_kind(spec)
            .with_context(|| format!("dungeon '{name}', entity {index} ({})", spec.kind))?;
        registry.insert(Entity::new(id, kind, position));
    }

    let Some(player) = player else {
        bail!("dungeon '{name}' has no player");
    };

    let goal = goal_tree(&file.goal_condition)
        .with_context(|| format!("dungeon '{name}' goal-condition"))?;

    let mut world = World::new(
        name.to_owned(),
        mode,
        seed,
        player,
        registry,
        goal,
        file.entities.len() as u32,
    );
    world.recompute_switches();
    world.evaluate_goal();
    Ok(world)
}

fn entity_kind(spec: &EntitySpec) -> anyhow::Result<EntityKind> {
    let kind = match spec.kind.as_str() {
        "wall" => EntityKind::Wall,
        "exit" => EntityKind::Exit,
        "boulder" => EntityKind::Boulder,
        "switch" => EntityKind::Switch { active: false },
        "spawner" => EntityKind::Spawner,
        "door" => EntityKind::Door {
            colour: colour(spec)?,
            open: false,
        },
        "portal" => EntityKind::Portal {
            colour: colour(spec)?,
        },
        "swamp" => EntityKind::Swamp {
            movement_factor: spec
                .movement_factor
                .context("swamp requires a movement_factor")?,
        },
        "mercenary" => EntityKind::Mercenary {
            stats: MoverStats::new(GameConfig::MERCENARY_HEALTH, GameConfig::MERCENARY_ATTACK),
            ally: false,
        },
        "assassin" => EntityKind::Assassin {
            stats: MoverStats::new(GameConfig::ASSASSIN_HEALTH, GameConfig::ASSASSIN_ATTACK),
            ally: false,
        },
        "zombie" => EntityKind::Zombie {
            stats: MoverStats::new(GameConfig::ZOMBIE_HEALTH, GameConfig::ZOMBIE_ATTACK),
        },
        "key" => EntityKind::Collectible(ItemKind::Key {
            colour: colour(spec)?,
        }),
        other => EntityKind::Collectible(item_kind(other)?),
    };
    Ok(kind)
}

fn item_kind(tag: &str) -> anyhow::Result<ItemKind> {
    let kind = match tag {
        "treasure" => ItemKind::Treasure,
        "wood" => ItemKind::Wood,
        "arrow" => ItemKind::Arrow,
        "bomb" => ItemKind::Bomb,
        "sword" => ItemKind::Sword,
        "health_potion" => ItemKind::HealthPotion,
        "invincibility_potion" => ItemKind::InvincibilityPotion,
        "invisibility_potion" => ItemKind::InvisibilityPotion,
        "one_ring" => ItemKind::OneRing,
        other => bail!("unknown entity type '{other}'"),
    };
    Ok(kind)
}

fn colour(spec: &EntitySpec) -> anyhow::Result<Colour> {
    let raw = spec
        .colour
        .as_deref()
        .with_context(|| format!("'{}' requires a colour", spec.kind))?;
    Colour::from_str(raw).with_context(|| format!("unknown colour '{raw}'"))
}

fn goal_tree(spec: &GoalSpec) -> anyhow::Result<Goal> {
    match spec.goal.as_str() {
        "AND" | "OR" => {
            if spec.subgoals.is_empty() {
                bail!("composite goal '{}' has no subgoals", spec.goal);
            }
            let children = spec
                .subgoals
                .iter()
                .map(goal_tree)
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok(if spec.goal == "AND" {
                Goal::and(children)
            } else {
                Goal::or(children)
            })
        }
        leaf => {
            let kind =
                GoalKind::from_str(leaf).with_context(|| format!("unknown goal '{leaf}'"))?;
            Ok(Goal::leaf(kind))
        }
    }
}
