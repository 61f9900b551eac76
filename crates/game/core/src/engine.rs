//! The per-tick scheduler and the facade operations.
//!
//! A tick is one atomic call: validation happens before any mutation, and
//! the fixed sub-step order below is load-bearing — battles, switch state,
//! and goal completion are all computed strictly after movement within the
//! same tick.
//!
//! 1. validate and apply the requested item use
//! 2. on tick 0, capture the spawn point from the player's position
//! 3. on spawn-cadence ticks, spawn a pursuer at the spawn point
//! 4. apply the player's move through the resolver
//! 5. move every other mover in registry order
//! 6. detonate triggered bombs
//! 7. run spawner cadence checks
//! 8. re-evaluate goals and return a snapshot

use rand::Rng;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::goal::LeafStatus;
use crate::path;
use crate::resolve::{self, Mover, Outcome};
use crate::rng::{self, EventSalt};
use crate::state::{
    Direction, EntityId, EntityKind, Item, ItemKind, MoverStats, Position, World, WorldSnapshot,
};

impl World {
    /// Advances the world by one tick.
    ///
    /// `item`, when present, must name a usable inventory item; the request
    /// is rejected (and nothing mutated) otherwise.
    pub fn tick(
        &mut self,
        item: Option<EntityId>,
        direction: Direction,
    ) -> Result<WorldSnapshot, GameError> {
        // Validate-then-act: the only fallible step is checked up front.
        if let Some(id) = item {
            let held = self.inventory.get(id).ok_or(GameError::ItemNotFound(id))?;
            if !held.kind.is_usable() {
                return Err(GameError::ItemNotUsable(id));
            }
        }

        if let Some(id) = item {
            self.use_item(id);
        }

        if self.tick == 0 {
            self.spawn_point = Some(self.player.position);
        }

        if self.tick > 0 && self.tick % self.mode.pursuer_spawn_interval() == 0 {
            self.spawn_pursuer();
        }

        self.tick += 1;

        // Player action.
        self.player.record_move(direction);
        self.player.decay_invincibility();
        if let Outcome::Resolved(resolution) = resolve::plan_move(self, Mover::Player, direction) {
            resolve::commit(self, Mover::Player, resolution);
        }
        self.recompute_switches();

        // Every other mover, in registry order. Ids are snapshotted because
        // battles remove entities mid-iteration.
        for id in self.registry().ids() {
            let Some(entity) = self.registry().get(id) else {
                continue;
            };
            if entity.kind.is_pursuer() {
                self.move_pursuer(id);
            } else if matches!(entity.kind, EntityKind::Zombie { .. }) {
                self.move_zombie(id);
            }
        }
        self.recompute_switches();

        self.detonate_bombs();
        self.run_spawners();

        self.evaluate_goal();
        Ok(self.snapshot())
    }

    /// Interacts with a spawner (destroy) or an unbribed pursuer (bribe).
    pub fn interact(&mut self, id: EntityId) -> Result<WorldSnapshot, GameError> {
        let entity = self
            .registry()
            .get(id)
            .ok_or(GameError::EntityNotFound(id))?;
        let target = entity.position;

        match entity.kind {
            EntityKind::Spawner => {
                if !self.player.position.is_cardinally_adjacent(target) {
                    return Err(GameError::OutOfRange(id));
                }
                if !self.inventory.has_weapon() {
                    return Err(GameError::InsufficientResources {
                        action: "destroy the spawner",
                    });
                }
                self.registry_mut().remove(id);
            }
            EntityKind::Mercenary { stats, ally: false } => {
                if !self.player.position.in_bribing_range(target) {
                    return Err(GameError::OutOfRange(id));
                }
                if !self.inventory.has_gold() {
                    return Err(GameError::InsufficientResources {
                        action: "bribe the mercenary",
                    });
                }
                self.inventory
                    .remove_first(|item| item.kind == ItemKind::Treasure);
                self.set_mover_kind(id, EntityKind::Mercenary { stats, ally: true });
            }
            EntityKind::Assassin { stats, ally: false } => {
                if !self.player.position.in_bribing_range(target) {
                    return Err(GameError::OutOfRange(id));
                }
                if !self.inventory.has_gold() || !self.inventory.contains_kind(ItemKind::OneRing) {
                    return Err(GameError::InsufficientResources {
                        action: "bribe the assassin",
                    });
                }
                self.inventory
                    .remove_first(|item| item.kind == ItemKind::Treasure);
                self.inventory
                    .remove_first(|item| item.kind == ItemKind::OneRing);
                self.set_mover_kind(id, EntityKind::Assassin { stats, ally: true });
            }
            _ => return Err(GameError::NotInteractable(id)),
        }

        self.evaluate_goal();
        Ok(self.snapshot())
    }

    /// Assembles a buildable item from inventory components.
    pub fn build(&mut self, buildable: &str) -> Result<WorldSnapshot, GameError> {
        let kind = match buildable {
            "bow" => ItemKind::Bow,
            "shield" => ItemKind::Shield,
            other => return Err(GameError::UnknownBuildable(other.to_owned())),
        };
        if !self.inventory.buildables().contains(&kind) {
            return Err(GameError::InsufficientResources {
                action: "complete the recipe",
            });
        }

        match kind {
            ItemKind::Bow => {
                self.inventory.remove_first(|i| i.kind == ItemKind::Wood);
                for _ in 0..3 {
                    self.inventory.remove_first(|i| i.kind == ItemKind::Arrow);
                }
            }
            ItemKind::Shield => {
                for _ in 0..2 {
                    self.inventory.remove_first(|i| i.kind == ItemKind::Wood);
                }
                if self
                    .inventory
                    .remove_first(|i| i.kind == ItemKind::Treasure)
                    .is_none()
                {
                    self.inventory
                        .remove_first(|i| matches!(i.kind, ItemKind::Key { .. }));
                    self.player.has_key = self.inventory.has_key();
                }
            }
            _ => unreachable!("only bows and shields are buildable"),
        }

        let id = self.allocate_entity_id();
        self.inventory.add(Item::new(id, kind));
        Ok(self.snapshot())
    }

    /// Full goal re-evaluation; idempotent for unchanged state.
    pub fn evaluate_goal(&mut self) {
        let status = LeafStatus::compute(self);
        self.goal.evaluate(&status);
    }

    fn use_item(&mut self, id: EntityId) {
        let Some(item) = self.inventory.remove(id) else {
            return;
        };
        match item.kind {
            ItemKind::Bomb => {
                let cell = Position::new(self.player.position.x, self.player.position.y);
                self.spawn(EntityKind::PlacedBomb, cell);
            }
            ItemKind::HealthPotion => {
                self.player.health = self.mode.starting_health();
            }
            ItemKind::InvincibilityPotion => {
                // Consumed either way; inert on Hard.
                if self.mode.invincibility_enabled() {
                    self.player
                        .set_invincibility_ticks(GameConfig::INVINCIBILITY_TICKS);
                }
            }
            ItemKind::InvisibilityPotion => {
                self.player.visible = false;
            }
            _ => unreachable!("tick() validated the item as usable"),
        }
    }

    fn spawn_pursuer(&mut self) {
        let Some(spawn_point) = self.spawn_point else {
            return;
        };
        let mut rng = rng::event_rng(self.game_seed, self.tick, EventSalt::SpawnChoice);
        let kind = if rng.gen_range(0..10) < GameConfig::ASSASSIN_SPAWN_CHANCE {
            EntityKind::Assassin {
                stats: MoverStats::new(GameConfig::ASSASSIN_HEALTH, GameConfig::ASSASSIN_ATTACK),
                ally: false,
            }
        } else {
            EntityKind::Mercenary {
                stats: MoverStats::new(GameConfig::MERCENARY_HEALTH, GameConfig::MERCENARY_ATTACK),
                ally: false,
            }
        };
        self.spawn(kind, spawn_point);
    }

    /// One Dijkstra step toward the player, then a resolver-checked move.
    /// Pursuers cannot see an invisible player and stay put.
    fn move_pursuer(&mut self, id: EntityId) {
        if !self.player.visible {
            return;
        }
        let Some(origin) = self.registry().get(id).map(|e| e.position) else {
            return;
        };
        let Some(step) = path::next_step(self, origin) else {
            return;
        };
        let Some(direction) = origin.direction_to(step) else {
            return;
        };
        if let Outcome::Resolved(resolution) = resolve::plan_move(self, Mover::Npc(id), direction) {
            resolve::commit(self, Mover::Npc(id), resolution);
        }
    }

    /// Zombies wander one random cardinal step; blocked moves are skipped.
    fn move_zombie(&mut self, id: EntityId) {
        let mut rng = rng::event_rng(self.game_seed, self.tick, EventSalt::Wander(id.0));
        let direction = Direction::CARDINAL[rng.gen_range(0..Direction::CARDINAL.len())];
        if let Outcome::Resolved(resolution) = resolve::plan_move(self, Mover::Npc(id), direction) {
            resolve::commit(self, Mover::Npc(id), resolution);
        }
    }

    /// Detonates every placed bomb with an active cardinally adjacent
    /// switch. All detonations this tick observe the pre-blast world, then
    /// removals apply at once; the blast clears the bomb's own cell and its
    /// full 8-cell neighbourhood. The player survives.
    fn detonate_bombs(&mut self) {
        let bombs: Vec<(EntityId, Position)> = self
            .registry()
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::PlacedBomb))
            .map(|e| (e.id, e.position))
            .collect();

        let mut to_remove: Vec<EntityId> = Vec::new();
        for (id, cell) in bombs {
            let triggered = cell.cardinally_adjacent().iter().any(|adjacent| {
                self.registry()
                    .find_at(*adjacent, |kind| {
                        matches!(kind, EntityKind::Switch { active: true })
                    })
                    .is_some()
            });
            if !triggered {
                continue;
            }
            to_remove.push(id);
            for blast in std::iter::once(cell).chain(cell.adjacent()) {
                to_remove.extend(self.registry().at(blast).map(|e| e.id));
            }
        }

        to_remove.sort_unstable();
        to_remove.dedup();
        for id in to_remove {
            self.registry_mut().remove(id);
        }
    }

    /// Each spawner emits a zombie into a free cardinally adjacent cell on
    /// cadence ticks; a fully enclosed spawner skips its turn.
    fn run_spawners(&mut self) {
        if self.tick % self.mode.spawner_interval() != 0 {
            return;
        }
        let spawners: Vec<(EntityId, Position)> = self
            .registry()
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Spawner))
            .map(|e| (e.id, e.position))
            .collect();

        for (id, cell) in spawners {
            let open: Vec<Position> = cell
                .cardinally_adjacent()
                .into_iter()
                .filter(|adjacent| resolve::cell_open_for_wanderer(self, *adjacent))
                .collect();
            if open.is_empty() {
                continue;
            }
            let mut rng = rng::event_rng(self.game_seed, self.tick, EventSalt::SpawnerCell(id.0));
            let target = open[rng.gen_range(0..open.len())];
            self.spawn(
                EntityKind::Zombie {
                    stats: MoverStats::new(GameConfig::ZOMBIE_HEALTH, GameConfig::ZOMBIE_ATTACK),
                },
                target,
            );
        }
    }

    fn set_mover_kind(&mut self, id: EntityId, kind: EntityKind) {
        if let Some(entity) = self.registry_mut().get_mut(id) {
            entity.kind = kind;
        }
    }
}
