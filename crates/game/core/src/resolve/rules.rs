//! Per-occupant resolution rules.
//!
//! The rule table is keyed by mover class, not concrete mover type: the
//! player, the two pursuer kinds, wandering zombies, and pushed boulders
//! each see a different subset of the world as traversable.

use super::{Effect, Mover};
use crate::state::{Capabilities, Direction, Entity, EntityKind, ItemKind, World};

/// Rule category of the entity attempting a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoverClass {
    Player,
    /// Mercenary or assassin, bribed or not.
    Pursuer,
    /// Zombie.
    Wanderer,
    /// A boulder mid-push.
    Boulder,
}

impl MoverClass {
    pub(super) fn of(world: &World, mover: Mover) -> Self {
        match mover {
            Mover::Player => MoverClass::Player,
            Mover::Boulder(_) => MoverClass::Boulder,
            Mover::Npc(id) => match world.registry().get(id).map(|e| &e.kind) {
                Some(kind) if kind.is_pursuer() => MoverClass::Pursuer,
                _ => MoverClass::Wanderer,
            },
        }
    }
}

/// Verdict for one occupant of the destination cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum OccupantOutcome {
    Pass,
    PassWith(Effect),
    Blocked,
    /// Recurse: push this boulder one cell further.
    PushBoulder,
    /// Recurse: inherit the resolution beyond the paired portal.
    Teleport,
}

/// Ordered first-match rules for a single occupant.
pub(super) fn resolve_occupant(
    world: &World,
    class: MoverClass,
    occupant: &Entity,
    _direction: Direction,
) -> OccupantOutcome {
    let caps = occupant.kind.capabilities();

    // Static-blocking entities stop everything, unconditionally.
    if caps.contains(Capabilities::BLOCKING) {
        return OccupantOutcome::Blocked;
    }
    // Switches, exits, terrain: never impede movement.
    if caps.contains(Capabilities::PASSABLE) {
        return OccupantOutcome::Pass;
    }

    match &occupant.kind {
        EntityKind::Door { colour, open } => {
            if *open {
                return OccupantOutcome::Pass;
            }
            if class == MoverClass::Player {
                if let Some(key) = world.inventory.key_of_colour(*colour) {
                    return OccupantOutcome::PassWith(Effect::UnlockDoor {
                        door: occupant.id,
                        key: key.id,
                    });
                }
            }
            OccupantOutcome::Blocked
        }

        // Only the player pushes boulders; in particular a boulder never
        // pushes another boulder, so a two-deep chain is always blocked.
        EntityKind::Boulder => match class {
            MoverClass::Player => OccupantOutcome::PushBoulder,
            _ => OccupantOutcome::Blocked,
        },

        // Pursuers and wanderers may stand on a portal without teleporting;
        // boulders cannot be pushed into one.
        EntityKind::Portal { .. } => match class {
            MoverClass::Player => OccupantOutcome::Teleport,
            MoverClass::Pursuer | MoverClass::Wanderer => OccupantOutcome::Pass,
            MoverClass::Boulder => OccupantOutcome::Blocked,
        },

        EntityKind::Collectible(kind) => match class {
            MoverClass::Player => pickup_rule(world, occupant, *kind),
            // NPCs walk over items; boulders would bury them.
            MoverClass::Pursuer | MoverClass::Wanderer => OccupantOutcome::Pass,
            MoverClass::Boulder => OccupantOutcome::Blocked,
        },

        kind if kind.mover_stats().is_some() => match class {
            MoverClass::Player => {
                if kind.is_ally() || !world.mode.enemy_attack() {
                    OccupantOutcome::Pass
                } else {
                    OccupantOutcome::PassWith(Effect::Battle { enemy: occupant.id })
                }
            }
            // Hostiles may stack; a pushed boulder cannot crush them.
            MoverClass::Pursuer | MoverClass::Wanderer => OccupantOutcome::Pass,
            MoverClass::Boulder => OccupantOutcome::Blocked,
        },

        _ => OccupantOutcome::Pass,
    }
}

/// Pickup with the unique-item rules: a second key is left on the ground, a
/// second one-of-a-kind ring is absorbed without being added.
fn pickup_rule(world: &World, occupant: &Entity, kind: ItemKind) -> OccupantOutcome {
    match kind {
        ItemKind::Key { .. } if world.player.has_key => OccupantOutcome::Pass,
        kind if kind.is_unique() && world.inventory.contains_kind(kind) => {
            OccupantOutcome::PassWith(Effect::Absorb { item: occupant.id })
        }
        _ => OccupantOutcome::PassWith(Effect::Pickup { item: occupant.id }),
    }
}
