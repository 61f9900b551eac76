//! Shared fixtures for unit tests.

use crate::config::GameMode;
use crate::goal::Goal;
use crate::state::{Entity, EntityId, EntityKind, Player, Position, Registry, World};

/// Builds small worlds for tests: player at a position, entities listed in
/// registry order, an optional goal tree.
pub struct WorldBuilder {
    mode: GameMode,
    seed: u64,
    player_at: Position,
    goal: Goal,
    entities: Vec<(EntityKind, Position)>,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self {
            mode: GameMode::Standard,
            seed: 42,
            player_at: Position::ORIGIN,
            goal: Goal::and(Vec::new()),
            entities: Vec::new(),
        }
    }

    pub fn mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn player_at(mut self, x: i32, y: i32) -> Self {
        self.player_at = Position::new(x, y);
        self
    }

    pub fn entity(mut self, kind: EntityKind, x: i32, y: i32) -> Self {
        self.entities.push((kind, Position::new(x, y)));
        self
    }

    pub fn goal(mut self, goal: Goal) -> Self {
        self.goal = goal;
        self
    }

    /// Player gets id 0; entities get 1.. in listed order.
    pub fn build(self) -> World {
        let player = Player::new(EntityId(0), self.player_at, self.mode);
        let mut registry = Registry::default();
        let mut next_id = 1;
        for (kind, position) in self.entities {
            registry.insert(Entity::new(EntityId(next_id), kind, position));
            next_id += 1;
        }
        World::new(
            "test".to_owned(),
            self.mode,
            self.seed,
            player,
            registry,
            self.goal,
            next_id,
        )
    }
}

/// Id of the nth listed entity (1-based insertion order).
pub fn entity_id(n: u32) -> EntityId {
    EntityId(n)
}
