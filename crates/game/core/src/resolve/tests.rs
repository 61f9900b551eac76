use super::*;
use crate::config::GameMode;
use crate::state::{Colour, MoverStats};
use crate::testutil::{entity_id, WorldBuilder};

fn resolved(outcome: Outcome) -> Resolution {
    match outcome {
        Outcome::Resolved(resolution) => resolution,
        Outcome::Blocked => panic!("expected a resolved move"),
    }
}

fn mercenary(ally: bool) -> EntityKind {
    EntityKind::Mercenary {
        stats: MoverStats::new(50, 3),
        ally,
    }
}

#[test]
fn open_cell_resolves_with_no_effects() {
    let world = WorldBuilder::new().build();
    let resolution = resolved(plan_move(&world, Mover::Player, Direction::Right));
    assert_eq!(resolution.destination, Position::new(1, 0));
    assert!(resolution.effects.is_empty());
}

#[test]
fn none_direction_resolves_in_place() {
    let world = WorldBuilder::new().player_at(3, 3).build();
    let resolution = resolved(plan_move(&world, Mover::Player, Direction::None));
    assert_eq!(resolution.destination, Position::new(3, 3));
}

#[test]
fn wall_blocks_and_nothing_mutates() {
    let world = WorldBuilder::new().entity(EntityKind::Wall, 1, 0).build();
    let before = world.clone();

    let outcome = plan_move(&world, Mover::Player, Direction::Right);
    assert!(outcome.is_blocked());

    // A blocked plan is never committed; the world is untouched.
    assert_eq!(world, before);
}

#[test]
fn player_pushes_boulder_one_cell() {
    let mut world = WorldBuilder::new()
        .entity(EntityKind::Boulder, 1, 0)
        .build();
    let boulder = entity_id(1);

    let resolution = resolved(plan_move(&world, Mover::Player, Direction::Right));
    assert_eq!(
        resolution.effects,
        vec![Effect::PushBoulder {
            boulder,
            to: Position::new(2, 0)
        }]
    );

    assert!(commit(&mut world, Mover::Player, resolution));
    assert_eq!(world.player.position, Position::new(1, 0));
    assert_eq!(
        world.registry().get(boulder).unwrap().position,
        Position::new(2, 0)
    );
}

#[test]
fn boulder_never_pushes_a_second_boulder() {
    let world = WorldBuilder::new()
        .entity(EntityKind::Boulder, 1, 0)
        .entity(EntityKind::Boulder, 2, 0)
        .build();
    assert!(plan_move(&world, Mover::Player, Direction::Right).is_blocked());
}

#[test]
fn boulder_into_wall_blocks_the_push() {
    let world = WorldBuilder::new()
        .entity(EntityKind::Boulder, 1, 0)
        .entity(EntityKind::Wall, 2, 0)
        .build();
    assert!(plan_move(&world, Mover::Player, Direction::Right).is_blocked());
}

#[test]
fn boulder_rolls_onto_a_switch() {
    let mut world = WorldBuilder::new()
        .entity(EntityKind::Boulder, 1, 0)
        .entity(EntityKind::Switch { active: false }, 2, 0)
        .build();

    let resolution = resolved(plan_move(&world, Mover::Player, Direction::Right));
    assert!(commit(&mut world, Mover::Player, resolution));
    world.recompute_switches();

    let switch = world.registry().get(entity_id(2)).unwrap();
    assert_eq!(switch.kind, EntityKind::Switch { active: true });
}

#[test]
fn locked_door_blocks_without_the_matching_key() {
    let mut world = WorldBuilder::new()
        .entity(
            EntityKind::Door {
                colour: Colour::Red,
                open: false,
            },
            1,
            0,
        )
        .build();
    assert!(plan_move(&world, Mover::Player, Direction::Right).is_blocked());

    // A key of the wrong colour does not help.
    let id = world.allocate_entity_id();
    world
        .inventory
        .add(Item::new(id, ItemKind::Key { colour: Colour::Blue }));
    world.player.has_key = true;
    assert!(plan_move(&world, Mover::Player, Direction::Right).is_blocked());
}

#[test]
fn matching_key_unlocks_and_is_consumed() {
    let mut world = WorldBuilder::new()
        .entity(
            EntityKind::Door {
                colour: Colour::Red,
                open: false,
            },
            1,
            0,
        )
        .build();
    let door = entity_id(1);
    let key = world.allocate_entity_id();
    world
        .inventory
        .add(Item::new(key, ItemKind::Key { colour: Colour::Red }));
    world.player.has_key = true;

    let resolution = resolved(plan_move(&world, Mover::Player, Direction::Right));
    assert_eq!(resolution.effects, vec![Effect::UnlockDoor { door, key }]);

    assert!(commit(&mut world, Mover::Player, resolution));
    assert_eq!(world.player.position, Position::new(1, 0));
    assert!(matches!(
        world.registry().get(door).unwrap().kind,
        EntityKind::Door { open: true, .. }
    ));
    assert!(world.inventory.is_empty());
    assert!(!world.player.has_key);

    // Unlocking is permanent; walking back through needs no key.
    let back = resolved(plan_move(&world, Mover::Player, Direction::Left));
    assert!(back.effects.is_empty());
}

#[test]
fn portal_redirects_to_beyond_the_pair() {
    let world = WorldBuilder::new()
        .entity(EntityKind::Portal { colour: Colour::Blue }, 1, 0)
        .entity(EntityKind::Portal { colour: Colour::Blue }, 5, 5)
        .build();

    let resolution = resolved(plan_move(&world, Mover::Player, Direction::Right));
    assert_eq!(resolution.destination, Position::new(6, 5));
}

#[test]
fn portal_exit_inherits_the_far_cell_rules() {
    let world = WorldBuilder::new()
        .entity(EntityKind::Portal { colour: Colour::Blue }, 1, 0)
        .entity(EntityKind::Portal { colour: Colour::Blue }, 5, 5)
        .entity(EntityKind::Wall, 6, 5)
        .build();
    assert!(plan_move(&world, Mover::Player, Direction::Right).is_blocked());
}

#[test]
fn unpaired_portal_blocks() {
    let world = WorldBuilder::new()
        .entity(EntityKind::Portal { colour: Colour::Green }, 1, 0)
        .build();
    assert!(plan_move(&world, Mover::Player, Direction::Right).is_blocked());
}

#[test]
fn portal_chains_terminate() {
    // Blue exits onto red, red exits back onto blue: an endless relay. The
    // hop guard turns it into a block instead of unbounded recursion.
    let world = WorldBuilder::new()
        .entity(EntityKind::Portal { colour: Colour::Blue }, 1, 0)
        .entity(EntityKind::Portal { colour: Colour::Blue }, 4, 0)
        .entity(EntityKind::Portal { colour: Colour::Red }, 5, 0)
        .entity(EntityKind::Portal { colour: Colour::Red }, 0, 0)
        .build();
    assert!(plan_move(&world, Mover::Player, Direction::Right).is_blocked());
}

#[test]
fn npcs_pass_over_portals_without_teleporting() {
    let world = WorldBuilder::new()
        .player_at(9, 9)
        .entity(mercenary(false), 0, 0)
        .entity(EntityKind::Portal { colour: Colour::Blue }, 1, 0)
        .entity(EntityKind::Portal { colour: Colour::Blue }, 5, 5)
        .build();

    let resolution = resolved(plan_move(&world, Mover::Npc(entity_id(1)), Direction::Right));
    assert_eq!(resolution.destination, Position::new(1, 0));
}

#[test]
fn player_picks_up_a_collectible() {
    let mut world = WorldBuilder::new()
        .entity(EntityKind::Collectible(ItemKind::Treasure), 1, 0)
        .build();
    let item = entity_id(1);

    let resolution = resolved(plan_move(&world, Mover::Player, Direction::Right));
    assert_eq!(resolution.effects, vec![Effect::Pickup { item }]);

    assert!(commit(&mut world, Mover::Player, resolution));
    assert!(world.registry().get(item).is_none());
    assert!(world.inventory.contains_kind(ItemKind::Treasure));
}

#[test]
fn second_key_is_left_on_the_ground() {
    let mut world = WorldBuilder::new()
        .entity(
            EntityKind::Collectible(ItemKind::Key { colour: Colour::Blue }),
            1,
            0,
        )
        .build();
    let held = world.allocate_entity_id();
    world
        .inventory
        .add(Item::new(held, ItemKind::Key { colour: Colour::Red }));
    world.player.has_key = true;

    let resolution = resolved(plan_move(&world, Mover::Player, Direction::Right));
    assert!(resolution.effects.is_empty());

    assert!(commit(&mut world, Mover::Player, resolution));
    assert!(world.registry().get(entity_id(1)).is_some());
    assert_eq!(world.inventory.len(), 1);
}

#[test]
fn duplicate_unique_item_is_absorbed() {
    let mut world = WorldBuilder::new()
        .entity(EntityKind::Collectible(ItemKind::OneRing), 1, 0)
        .build();
    let held = world.allocate_entity_id();
    world.inventory.add(Item::new(held, ItemKind::OneRing));

    let resolution = resolved(plan_move(&world, Mover::Player, Direction::Right));
    assert_eq!(resolution.effects, vec![Effect::Absorb { item: entity_id(1) }]);

    assert!(commit(&mut world, Mover::Player, resolution));
    assert!(world.registry().get(entity_id(1)).is_none());
    assert_eq!(
        world.inventory.count(|i| i.kind == ItemKind::OneRing),
        1
    );
}

#[test]
fn npcs_walk_over_items_without_collecting() {
    let world = WorldBuilder::new()
        .player_at(9, 9)
        .entity(mercenary(false), 0, 0)
        .entity(EntityKind::Collectible(ItemKind::Treasure), 1, 0)
        .build();

    let resolution = resolved(plan_move(&world, Mover::Npc(entity_id(1)), Direction::Right));
    assert!(resolution.effects.is_empty());
}

#[test]
fn boulders_cannot_bury_items() {
    let world = WorldBuilder::new()
        .entity(EntityKind::Boulder, 1, 0)
        .entity(EntityKind::Collectible(ItemKind::Treasure), 2, 0)
        .build();
    assert!(plan_move(&world, Mover::Player, Direction::Right).is_blocked());
}

#[test]
fn walking_into_a_hostile_queues_a_battle() {
    let world = WorldBuilder::new().entity(mercenary(false), 1, 0).build();
    let resolution = resolved(plan_move(&world, Mover::Player, Direction::Right));
    assert_eq!(
        resolution.effects,
        vec![Effect::Battle { enemy: entity_id(1) }]
    );
}

#[test]
fn allies_and_peaceful_mode_skip_battles() {
    let ally_world = WorldBuilder::new().entity(mercenary(true), 1, 0).build();
    let resolution = resolved(plan_move(&ally_world, Mover::Player, Direction::Right));
    assert!(resolution.effects.is_empty());

    let peaceful = WorldBuilder::new()
        .mode(GameMode::Peaceful)
        .entity(mercenary(false), 1, 0)
        .build();
    let resolution = resolved(plan_move(&peaceful, Mover::Player, Direction::Right));
    assert!(resolution.effects.is_empty());
}

#[test]
fn hostile_stepping_onto_the_player_fights() {
    let world = WorldBuilder::new().entity(mercenary(false), 1, 0).build();
    let resolution = resolved(plan_move(&world, Mover::Npc(entity_id(1)), Direction::Left));
    assert_eq!(resolution.destination, Position::new(0, 0));
    assert_eq!(
        resolution.effects,
        vec![Effect::Battle { enemy: entity_id(1) }]
    );
}

#[test]
fn ally_stepping_onto_the_player_does_not_fight() {
    let world = WorldBuilder::new().entity(mercenary(true), 1, 0).build();
    let resolution = resolved(plan_move(&world, Mover::Npc(entity_id(1)), Direction::Left));
    assert!(resolution.effects.is_empty());
}

#[test]
fn defeated_npc_does_not_complete_its_move() {
    // A fresh player one-shots nothing here: health 100, attack 2 gives a 40
    // point blow, enough to finish a 50 health mercenary in two rounds. The
    // mercenary dies inside commit, so commit reports the mover as gone.
    let mut world = WorldBuilder::new().entity(mercenary(false), 1, 0).build();
    let resolution = resolved(plan_move(&world, Mover::Npc(entity_id(1)), Direction::Left));
    assert!(!commit(&mut world, Mover::Npc(entity_id(1)), resolution));
    assert!(world.registry().get(entity_id(1)).is_none());
}

#[test]
fn battle_commit_moves_the_player_and_removes_the_loser() {
    let mut world = WorldBuilder::new().entity(mercenary(false), 1, 0).build();
    let resolution = resolved(plan_move(&world, Mover::Player, Direction::Right));
    assert!(commit(&mut world, Mover::Player, resolution));

    assert_eq!(world.player.position, Position::new(1, 0));
    assert!(world.registry().get(entity_id(1)).is_none());
    assert!(world.player.health < 100);
    assert!(world.player.is_alive());
}

#[test]
fn wanderer_cell_openness() {
    let world = WorldBuilder::new()
        .entity(EntityKind::Wall, 1, 0)
        .entity(EntityKind::Switch { active: false }, 2, 0)
        .entity(EntityKind::Boulder, 3, 0)
        .build();

    assert!(!cell_open_for_wanderer(&world, Position::new(1, 0)));
    assert!(cell_open_for_wanderer(&world, Position::new(2, 0)));
    assert!(!cell_open_for_wanderer(&world, Position::new(3, 0)));
    assert!(cell_open_for_wanderer(&world, Position::new(4, 0)));
}
