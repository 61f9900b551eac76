use super::{Direction, EntityId, Position};
use crate::config::{GameConfig, GameMode};

/// The controllable singleton. Exactly one per world.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub position: Position,
    pub health: i32,
    pub attack: i32,
    /// Pursuers cannot see (and therefore do not chase) an invisible player.
    pub visible: bool,
    /// Remaining invincibility ticks; never negative.
    invincibility_ticks: u32,
    /// Convenience mirror of "inventory holds a key"; keys are one-at-a-time.
    pub has_key: bool,
    pub facing: Direction,
    /// Ordered trace of every requested move, for replay-style mechanics.
    pub move_trace: Vec<Direction>,
}

impl Player {
    pub fn new(id: EntityId, position: Position, mode: GameMode) -> Self {
        Self {
            id,
            position,
            health: mode.starting_health(),
            attack: GameConfig::PLAYER_ATTACK,
            visible: true,
            invincibility_ticks: 0,
            has_key: false,
            facing: Direction::None,
            move_trace: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_ticks > 0
    }

    pub fn invincibility_ticks(&self) -> u32 {
        self.invincibility_ticks
    }

    pub fn set_invincibility_ticks(&mut self, ticks: u32) {
        self.invincibility_ticks = ticks;
    }

    /// Called once per tick; saturates at zero.
    pub fn decay_invincibility(&mut self) {
        self.invincibility_ticks = self.invincibility_ticks.saturating_sub(1);
    }

    /// Records the requested direction as the new facing and appends it to
    /// the move trace, whether or not the move later resolves.
    pub fn record_move(&mut self, direction: Direction) {
        self.facing = direction;
        self.move_trace.push(direction);
    }
}
