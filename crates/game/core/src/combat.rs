//! Deterministic battle resolution.
//!
//! A battle is one synchronous call with no randomness: the player and one
//! hostile mover trade health-scaled blows until a side reaches zero. The
//! loser is removed from the world (the player is clamped at zero health and
//! stays); equipped weapons and shields lose one durability per battle.

use crate::config::GameConfig;
use crate::state::{EntityId, ItemKind, World};

/// Result of one resolved battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleOutcome {
    pub enemy: EntityId,
    pub enemy_defeated: bool,
    pub player_defeated: bool,
}

/// Resolves a battle between the player and the given registry entity.
///
/// Returns `None` when the target no longer exists or has no combat stats;
/// the resolver only queues battles against movers, so that indicates the
/// enemy already died earlier in the same tick.
pub fn battle(world: &mut World, enemy_id: EntityId) -> Option<BattleOutcome> {
    let stats = world
        .registry()
        .get(enemy_id)
        .and_then(|e| e.kind.mover_stats())?;

    // Equipment snapshot: ids so wear can be applied afterwards.
    let sword = find_equipped(world, ItemKind::Sword);
    let bow = find_equipped(world, ItemKind::Bow);
    let shield = find_equipped(world, ItemKind::Shield);

    let mut attack = world.player.attack;
    if sword.is_some() {
        attack += GameConfig::SWORD_BONUS;
    }
    if bow.is_some() {
        attack *= 2;
    }

    let mut enemy_health = stats.health;
    let mut enemy_defeated = false;
    let mut player_defeated = false;

    if world.player.is_invincible() {
        enemy_defeated = true;
    } else {
        loop {
            // The player strikes first. The floor of one point of damage
            // guarantees the loop terminates even at minimal health.
            let blow =
                (world.player.health * attack / GameConfig::PLAYER_DAMAGE_DIVISOR).max(1);
            enemy_health -= blow;
            if enemy_health <= 0 {
                enemy_defeated = true;
                break;
            }

            let mut counter = enemy_health * stats.attack / GameConfig::ENEMY_DAMAGE_DIVISOR;
            if shield.is_some() {
                counter /= 2;
            }
            world.player.health -= counter;
            if world.player.health <= 0 {
                world.player.health = 0;
                player_defeated = true;
                break;
            }
        }
    }

    if enemy_defeated {
        world.registry_mut().remove(enemy_id);
    } else if let Some(stats) = world
        .registry_mut()
        .get_mut(enemy_id)
        .and_then(|e| e.kind.mover_stats_mut())
    {
        stats.health = enemy_health;
    }

    for used in [sword, bow, shield].into_iter().flatten() {
        world.inventory.wear(used);
    }

    Some(BattleOutcome {
        enemy: enemy_id,
        enemy_defeated,
        player_defeated,
    })
}

fn find_equipped(world: &World, kind: ItemKind) -> Option<EntityId> {
    world
        .inventory
        .iter()
        .find(|item| item.kind == kind)
        .map(|item| item.id)
}
