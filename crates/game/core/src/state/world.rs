use super::{Entity, EntityId, EntityKind, Inventory, ItemKind, Player, Position, Registry};
use crate::config::GameMode;
use crate::goal::Goal;

/// The complete mutable game state: sole owner of the player, the entity
/// registry, the inventory, and the goal tree.
///
/// A world is advanced exclusively through [`World::tick`],
/// [`World::interact`], and [`World::build`] (see the `engine` module);
/// callers only ever observe it through [`WorldSnapshot`]s taken after an
/// operation fully completes.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct World {
    pub name: String,
    pub mode: GameMode,
    /// Completed tick count; the next `tick()` call observes this value.
    pub tick: u64,
    /// Seed for all per-event randomness (see the `rng` module).
    pub game_seed: u64,
    /// Captured from the player's position on tick 0; pursuers spawn here.
    pub spawn_point: Option<Position>,
    pub player: Player,
    pub inventory: Inventory,
    pub(crate) registry: Registry,
    pub goal: Goal,
    /// Historical entity count; ids are allocated from here and never
    /// reused, even after removal.
    next_entity_id: u32,
}

impl World {
    pub fn new(
        name: String,
        mode: GameMode,
        game_seed: u64,
        player: Player,
        registry: Registry,
        goal: Goal,
        next_entity_id: u32,
    ) -> Self {
        Self {
            name,
            mode,
            tick: 0,
            game_seed,
            spawn_point: None,
            player,
            inventory: Inventory::default(),
            registry,
            goal,
            next_entity_id,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Allocates a fresh id; the historical count only ever grows.
    pub fn allocate_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    pub fn historical_entity_count(&self) -> u32 {
        self.next_entity_id
    }

    /// Spawns a new entity of the given kind, allocating its id.
    pub fn spawn(&mut self, kind: EntityKind, position: Position) -> EntityId {
        let id = self.allocate_entity_id();
        self.registry.insert(Entity::new(id, kind, position));
        id
    }

    /// Recomputes every switch from current boulder positions. Activation is
    /// never carried over from a previous tick.
    pub fn recompute_switches(&mut self) {
        let switch_ids: Vec<(EntityId, Position)> = self
            .registry
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Switch { .. }))
            .map(|e| (e.id, e.position))
            .collect();

        for (id, cell) in switch_ids {
            let pressed = self
                .registry
                .find_at(cell, |kind| matches!(kind, EntityKind::Boulder))
                .is_some();
            if let Some(entity) = self.registry.get_mut(id) {
                entity.kind = EntityKind::Switch { active: pressed };
            }
        }
    }

    /// Consistent external view of the world after an operation.
    pub fn snapshot(&self) -> WorldSnapshot {
        let mut entities = Vec::with_capacity(self.registry.len() + 1);
        entities.push(EntitySnapshot {
            id: self.player.id,
            type_tag: "player".to_owned(),
            position: self.player.position,
            interactable: true,
        });
        for entity in self.registry.iter() {
            entities.push(EntitySnapshot {
                id: entity.id,
                type_tag: entity.kind.type_tag().to_owned(),
                position: entity.position,
                interactable: entity.is_interactable(),
            });
        }

        WorldSnapshot {
            name: self.name.clone(),
            entities,
            inventory: self
                .inventory
                .iter()
                .map(|item| ItemSnapshot {
                    id: item.id,
                    type_tag: item.kind.type_tag().to_owned(),
                })
                .collect(),
            buildables: self
                .inventory
                .buildables()
                .into_iter()
                .map(ItemKind::type_tag)
                .map(str::to_owned)
                .collect(),
            goals: self.goal.remaining_string(),
        }
    }
}

/// One entity as seen by callers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub type_tag: String,
    pub position: Position,
    pub interactable: bool,
}

/// One inventory item as seen by callers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ItemSnapshot {
    pub id: EntityId,
    pub type_tag: String,
}

/// Immutable view returned by every facade operation. `goals` is the
/// remaining-goal string; the game is won exactly when it is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct WorldSnapshot {
    pub name: String,
    pub entities: Vec<EntitySnapshot>,
    pub inventory: Vec<ItemSnapshot>,
    pub buildables: Vec<String>,
    pub goals: String,
}

impl WorldSnapshot {
    pub fn is_won(&self) -> bool {
        self.goals.is_empty()
    }

    /// Test convenience: position of the first entity with the given tag.
    pub fn position_of(&self, type_tag: &str) -> Option<Position> {
        self.entities
            .iter()
            .find(|e| e.type_tag == type_tag)
            .map(|e| e.position)
    }
}
