//! Rule constants and game-mode tuning.
//!
//! Everything numeric the simulation depends on lives here so the rest of
//! the crate never hard-codes a balance value.

/// Difficulty / rule-set selection. Affects starting health, whether
/// enemies fight back, spawn cadences, and invincibility potions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[derive(strum::Display, strum::EnumString)]
pub enum GameMode {
    Peaceful,
    Standard,
    Hard,
}

impl GameMode {
    pub fn starting_health(self) -> i32 {
        match self {
            GameMode::Peaceful | GameMode::Standard => GameConfig::PLAYER_HEALTH,
            GameMode::Hard => GameConfig::PLAYER_HEALTH_HARD,
        }
    }

    /// Whether hostile movers deal damage in battle.
    pub fn enemy_attack(self) -> bool {
        !matches!(self, GameMode::Peaceful)
    }

    /// Ticks between pursuer spawns at the spawn point.
    pub fn pursuer_spawn_interval(self) -> u64 {
        match self {
            GameMode::Peaceful => 40,
            GameMode::Standard => 20,
            GameMode::Hard => 15,
        }
    }

    /// Ticks between zombie emissions from each spawner.
    pub fn spawner_interval(self) -> u64 {
        match self {
            GameMode::Peaceful | GameMode::Standard => 20,
            GameMode::Hard => 15,
        }
    }

    /// Invincibility potions are inert on Hard.
    pub fn invincibility_enabled(self) -> bool {
        !matches!(self, GameMode::Hard)
    }
}

/// Central constant table for balance values.
pub struct GameConfig;

impl GameConfig {
    // Player
    pub const PLAYER_HEALTH: i32 = 100;
    pub const PLAYER_HEALTH_HARD: i32 = 60;
    pub const PLAYER_ATTACK: i32 = 2;
    pub const INVINCIBILITY_TICKS: u32 = 10;

    // Hostile mover stats
    pub const MERCENARY_HEALTH: i32 = 50;
    pub const MERCENARY_ATTACK: i32 = 3;
    pub const ASSASSIN_HEALTH: i32 = 60;
    pub const ASSASSIN_ATTACK: i32 = 5;
    pub const ZOMBIE_HEALTH: i32 = 30;
    pub const ZOMBIE_ATTACK: i32 = 2;

    // Battle formula: damage dealt is (health x attack) / divisor.
    pub const PLAYER_DAMAGE_DIVISOR: i32 = 5;
    pub const ENEMY_DAMAGE_DIVISOR: i32 = 10;

    // Weapons and armour
    pub const SWORD_BONUS: i32 = 2;
    pub const SWORD_DURABILITY: u32 = 6;
    pub const BOW_DURABILITY: u32 = 5;
    pub const SHIELD_DURABILITY: u32 = 5;

    // Pursuit graph: base edge weight; swamp tiles override it with their
    // movement factor on the destination cell.
    pub const BASE_EDGE_WEIGHT: u32 = 2;

    // Out of ten spawn draws, this many produce an assassin.
    pub const ASSASSIN_SPAWN_CHANCE: u32 = 2;

    // Overlap layer switches occupy so boulders can coexist with them.
    pub const SWITCH_LAYER: i32 = -1;

    // Portal chains longer than this are treated as blocked.
    pub const MAX_PORTAL_HOPS: u32 = 8;
}
