//! Movement and collision resolution.
//!
//! Resolution is split into two phases so a blocked move never mutates
//! anything: [`plan_move`] walks every occupant of the destination cell and
//! either blocks or produces a [`Resolution`] (final destination plus a list
//! of deferred [`Effect`]s); [`commit`] then applies the effects and the
//! position update in one go. Boulder pushes and portal hops recurse through
//! the same planner.
//!
//! Per-occupant rules are ordered, first match wins, and a move is permitted
//! only if **every** occupant of the cell yields a pass.

mod rules;

pub use rules::MoverClass;

use crate::combat;
use crate::config::GameConfig;
use crate::state::{Direction, EntityId, EntityKind, Item, ItemKind, Position, World};

/// Who is attempting the move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mover {
    Player,
    /// A mercenary, assassin, or zombie from the registry.
    Npc(EntityId),
    /// A boulder being pushed (only ever mid-recursion).
    Boulder(EntityId),
}

/// A state change deferred until the whole move is confirmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Consume the key and permanently open the door.
    UnlockDoor { door: EntityId, key: EntityId },
    /// The boulder rolls one cell ahead of the mover.
    PushBoulder { boulder: EntityId, to: Position },
    /// Remove from the map and append to the inventory.
    Pickup { item: EntityId },
    /// Remove from the map without adding: a duplicate of a unique item.
    Absorb { item: EntityId },
    /// Resolve combat against the occupant (or, for NPC movers, the player).
    Battle { enemy: EntityId },
}

/// A confirmed move: where the mover ends up and what happens on the way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub destination: Position,
    pub effects: Vec<Effect>,
}

/// Planner verdict for one requested move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Blocked,
    Resolved(Resolution),
}

impl Outcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Outcome::Blocked)
    }
}

/// Plans one move without mutating anything.
pub fn plan_move(world: &World, mover: Mover, direction: Direction) -> Outcome {
    let origin = match mover_position(world, mover) {
        Some(position) => position,
        None => return Outcome::Blocked,
    };

    if direction == Direction::None {
        return Outcome::Resolved(Resolution {
            destination: origin,
            effects: Vec::new(),
        });
    }

    let target = origin.translate(direction);
    let mut outcome = resolve_cell(world, mover, target, direction, 0);

    // NPCs walking onto the player's cell fight them (allies never do).
    if let (Mover::Npc(id), Outcome::Resolved(resolution)) = (mover, &mut outcome) {
        if resolution.destination.coincides(world.player.position) {
            let is_ally = world
                .registry()
                .get(id)
                .is_some_and(|e| e.kind.is_ally());
            if !is_ally && world.mode.enemy_attack() {
                resolution.effects.push(Effect::Battle { enemy: id });
            }
        }
    }

    outcome
}

/// Resolves a single destination cell for the given mover.
///
/// Walks every occupant; collects deferred effects; may redirect the whole
/// resolution through a portal pair.
fn resolve_cell(
    world: &World,
    mover: Mover,
    target: Position,
    direction: Direction,
    hops: u32,
) -> Outcome {
    let class = MoverClass::of(world, mover);
    let mut effects = Vec::new();

    for occupant in world.registry().at(target) {
        match rules::resolve_occupant(world, class, occupant, direction) {
            rules::OccupantOutcome::Pass => {}
            rules::OccupantOutcome::PassWith(effect) => effects.push(effect),
            rules::OccupantOutcome::Blocked => return Outcome::Blocked,
            rules::OccupantOutcome::PushBoulder => {
                let beyond = occupant.position.translate(direction);
                match resolve_cell(world, Mover::Boulder(occupant.id), beyond, direction, hops) {
                    Outcome::Resolved(push) => {
                        debug_assert!(push.effects.is_empty(), "boulders cause no side effects");
                        effects.push(Effect::PushBoulder {
                            boulder: occupant.id,
                            to: push.destination,
                        });
                    }
                    Outcome::Blocked => return Outcome::Blocked,
                }
            }
            rules::OccupantOutcome::Teleport => {
                // Inherit the outcome of the cell one step beyond the paired
                // portal, in the mover's current direction.
                if hops >= GameConfig::MAX_PORTAL_HOPS {
                    return Outcome::Blocked;
                }
                let Some(pair) = world.registry().paired_portal(occupant) else {
                    return Outcome::Blocked;
                };
                let beyond = pair.position.translate(direction);
                return resolve_cell(world, mover, beyond, direction, hops + 1);
            }
        }
    }

    Outcome::Resolved(Resolution {
        destination: target,
        effects,
    })
}

/// Applies a confirmed resolution: effects first, then the position update.
///
/// Returns false when the mover itself was defeated mid-commit (an NPC
/// losing its battle against the player) and therefore did not move.
pub fn commit(world: &mut World, mover: Mover, resolution: Resolution) -> bool {
    for effect in resolution.effects {
        apply_effect(world, effect);
    }

    match mover {
        Mover::Player => {
            world.player.position =
                resolution.destination.as_layer(world.player.position.layer);
            true
        }
        Mover::Npc(id) | Mover::Boulder(id) => match world.registry_mut().get_mut(id) {
            Some(entity) => {
                entity.position = resolution.destination.as_layer(entity.position.layer);
                true
            }
            None => false,
        },
    }
}

fn apply_effect(world: &mut World, effect: Effect) {
    match effect {
        Effect::UnlockDoor { door, key } => {
            if let Some(entity) = world.registry_mut().get_mut(door) {
                if let EntityKind::Door { colour, .. } = entity.kind {
                    entity.kind = EntityKind::Door { colour, open: true };
                }
            }
            world.inventory.remove(key);
            world.player.has_key = world.inventory.has_key();
        }
        Effect::PushBoulder { boulder, to } => {
            if let Some(entity) = world.registry_mut().get_mut(boulder) {
                entity.position = to.as_layer(entity.position.layer);
            }
        }
        Effect::Pickup { item } => {
            if let Some(entity) = world.registry_mut().remove(item) {
                if let EntityKind::Collectible(kind) = entity.kind {
                    if matches!(kind, ItemKind::Key { .. }) {
                        world.player.has_key = true;
                    }
                    world.inventory.add(Item::new(entity.id, kind));
                }
            }
        }
        Effect::Absorb { item } => {
            world.registry_mut().remove(item);
        }
        Effect::Battle { enemy } => {
            // For NPC movers `enemy` is the mover itself; either way the
            // fight is always player versus that entity.
            combat::battle(world, enemy);
        }
    }
}

/// Whether a wandering mover could legally occupy the cell right now.
/// Used by spawners to pick an emission cell.
pub fn cell_open_for_wanderer(world: &World, cell: Position) -> bool {
    world.registry().at(cell).all(|occupant| {
        matches!(
            rules::resolve_occupant(world, MoverClass::Wanderer, occupant, Direction::None),
            rules::OccupantOutcome::Pass
        )
    })
}

fn mover_position(world: &World, mover: Mover) -> Option<Position> {
    match mover {
        Mover::Player => Some(world.player.position),
        Mover::Npc(id) | Mover::Boulder(id) => world.registry().get(id).map(|e| e.position),
    }
}

#[cfg(test)]
mod tests;
