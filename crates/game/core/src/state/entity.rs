use bitflags::bitflags;

use super::{EntityId, Position};
use crate::config::GameConfig;

/// Portal pairing and door/key matching colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[derive(strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Colour {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

/// Health and attack for a hostile (or bribed) mover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct MoverStats {
    pub health: i32,
    pub attack: i32,
}

impl MoverStats {
    pub const fn new(health: i32, attack: i32) -> Self {
        Self { health, attack }
    }
}

/// Item categories. Items exist either on the map (as a collectible entity)
/// or in the player's inventory; the kind is the same in both places.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum ItemKind {
    Treasure,
    Key { colour: Colour },
    Wood,
    Arrow,
    Bomb,
    Sword,
    Bow,
    Shield,
    HealthPotion,
    InvincibilityPotion,
    InvisibilityPotion,
    OneRing,
}

impl ItemKind {
    /// Equippables wear out; everything else has no durability.
    pub fn initial_durability(self) -> Option<u32> {
        match self {
            ItemKind::Sword => Some(GameConfig::SWORD_DURABILITY),
            ItemKind::Bow => Some(GameConfig::BOW_DURABILITY),
            ItemKind::Shield => Some(GameConfig::SHIELD_DURABILITY),
            _ => None,
        }
    }

    /// Kinds the player may consume or place through `tick(item, ..)`.
    pub fn is_usable(self) -> bool {
        matches!(
            self,
            ItemKind::Bomb
                | ItemKind::HealthPotion
                | ItemKind::InvincibilityPotion
                | ItemKind::InvisibilityPotion
        )
    }

    /// At most one of these is ever held; a duplicate pickup is absorbed.
    pub fn is_unique(self) -> bool {
        matches!(self, ItemKind::OneRing)
    }

    pub fn is_weapon(self) -> bool {
        matches!(self, ItemKind::Sword | ItemKind::Bow)
    }

    /// Kinds that can be assembled from inventory components.
    pub fn is_buildable(self) -> bool {
        matches!(self, ItemKind::Bow | ItemKind::Shield)
    }
}

bitflags! {
    /// Behavioural capabilities an entity exposes, independent of its
    /// concrete kind. Fixed at creation; the resolver dispatches on these
    /// rather than on concrete types wherever the rule is not kind-specific.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[derive(serde::Serialize, serde::Deserialize)]
    pub struct Capabilities: u8 {
        /// Moves under its own power every tick.
        const MOVABLE = 1 << 0;
        /// Picked up into the inventory when walked over.
        const COLLECTIBLE = 1 << 1;
        /// Unconditionally stops movement into its cell.
        const BLOCKING = 1 << 2;
        /// Never impedes movement (switches, exits, terrain).
        const PASSABLE = 1 << 3;
        /// Reacts to world state (switches) or to `interact` (spawners,
        /// bribeable pursuers).
        const TRIGGERABLE = 1 << 4;
    }
}

/// Closed enumeration of everything that can occupy a cell, with its
/// per-kind state embedded. The player is not an `EntityKind`; it is owned
/// separately by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum EntityKind {
    Wall,
    Exit,
    Door { colour: Colour, open: bool },
    Portal { colour: Colour },
    Switch { active: bool },
    Boulder,
    Spawner,
    Swamp { movement_factor: u32 },
    /// An armed bomb sitting on the map, waiting for an adjacent switch.
    PlacedBomb,
    Mercenary { stats: MoverStats, ally: bool },
    Assassin { stats: MoverStats, ally: bool },
    Zombie { stats: MoverStats },
    Collectible(ItemKind),
}

impl EntityKind {
    pub fn capabilities(&self) -> Capabilities {
        match self {
            EntityKind::Wall | EntityKind::Spawner | EntityKind::PlacedBomb => {
                let mut caps = Capabilities::BLOCKING;
                if matches!(self, EntityKind::Spawner) {
                    caps |= Capabilities::TRIGGERABLE;
                }
                caps
            }
            EntityKind::Exit | EntityKind::Swamp { .. } => Capabilities::PASSABLE,
            EntityKind::Switch { .. } => Capabilities::PASSABLE | Capabilities::TRIGGERABLE,
            // Doors and boulders block conditionally; the resolver owns the
            // conditions, so neither BLOCKING nor PASSABLE applies.
            EntityKind::Door { .. } | EntityKind::Boulder | EntityKind::Portal { .. } => {
                Capabilities::empty()
            }
            EntityKind::Mercenary { .. } | EntityKind::Assassin { .. } => {
                Capabilities::MOVABLE | Capabilities::TRIGGERABLE
            }
            EntityKind::Zombie { .. } => Capabilities::MOVABLE,
            EntityKind::Collectible(_) => Capabilities::COLLECTIBLE,
        }
    }

    /// Stable type tag used by snapshots and save files.
    pub fn type_tag(&self) -> &'static str {
        match self {
            EntityKind::Wall => "wall",
            EntityKind::Exit => "exit",
            EntityKind::Door { .. } => "door",
            EntityKind::Portal { .. } => "portal",
            EntityKind::Switch { .. } => "switch",
            EntityKind::Boulder => "boulder",
            EntityKind::Spawner => "spawner",
            EntityKind::Swamp { .. } => "swamp",
            EntityKind::PlacedBomb => "placed_bomb",
            EntityKind::Mercenary { .. } => "mercenary",
            EntityKind::Assassin { .. } => "assassin",
            EntityKind::Zombie { .. } => "zombie",
            EntityKind::Collectible(item) => item.type_tag(),
        }
    }

    pub fn is_pursuer(&self) -> bool {
        matches!(
            self,
            EntityKind::Mercenary { .. } | EntityKind::Assassin { .. }
        )
    }

    pub fn is_ally(&self) -> bool {
        matches!(
            self,
            EntityKind::Mercenary { ally: true, .. } | EntityKind::Assassin { ally: true, .. }
        )
    }

    /// Hostile movers count against the "enemies" goal.
    pub fn is_hostile(&self) -> bool {
        match self {
            EntityKind::Mercenary { ally, .. } | EntityKind::Assassin { ally, .. } => !ally,
            EntityKind::Zombie { .. } => true,
            _ => false,
        }
    }

    pub fn mover_stats(&self) -> Option<MoverStats> {
        match self {
            EntityKind::Mercenary { stats, .. }
            | EntityKind::Assassin { stats, .. }
            | EntityKind::Zombie { stats } => Some(*stats),
            _ => None,
        }
    }

    pub fn mover_stats_mut(&mut self) -> Option<&mut MoverStats> {
        match self {
            EntityKind::Mercenary { stats, .. }
            | EntityKind::Assassin { stats, .. }
            | EntityKind::Zombie { stats } => Some(stats),
            _ => None,
        }
    }
}

impl ItemKind {
    /// Type tags are shared between map collectibles and inventory items.
    pub fn type_tag(self) -> &'static str {
        match self {
            ItemKind::Treasure => "treasure",
            ItemKind::Key { .. } => "key",
            ItemKind::Wood => "wood",
            ItemKind::Arrow => "arrow",
            ItemKind::Bomb => "bomb",
            ItemKind::Sword => "sword",
            ItemKind::Bow => "bow",
            ItemKind::Shield => "shield",
            ItemKind::HealthPotion => "health_potion",
            ItemKind::InvincibilityPotion => "invincibility_potion",
            ItemKind::InvisibilityPotion => "invisibility_potion",
            ItemKind::OneRing => "one_ring",
        }
    }
}

/// A single registered entity: identity, kind-with-state, and position.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, position: Position) -> Self {
        // Switches live on their own overlap layer so a boulder can share
        // the cell without concealing them.
        let position = match kind {
            EntityKind::Switch { .. } => position.as_layer(GameConfig::SWITCH_LAYER),
            _ => position,
        };
        Self { id, kind, position }
    }

    /// Whether the frontend may target this entity with `interact`.
    pub fn is_interactable(&self) -> bool {
        match &self.kind {
            EntityKind::Spawner => true,
            EntityKind::Mercenary { ally, .. } | EntityKind::Assassin { ally, .. } => !ally,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_sets_are_kind_derived() {
        assert!(EntityKind::Wall.capabilities().contains(Capabilities::BLOCKING));
        assert!(
            EntityKind::Switch { active: false }
                .capabilities()
                .contains(Capabilities::PASSABLE | Capabilities::TRIGGERABLE)
        );
        assert!(
            EntityKind::Mercenary { stats: MoverStats::new(1, 1), ally: false }
                .capabilities()
                .contains(Capabilities::MOVABLE)
        );
        assert!(
            EntityKind::Collectible(ItemKind::Treasure)
                .capabilities()
                .contains(Capabilities::COLLECTIBLE)
        );
    }

    #[test]
    fn switches_are_placed_on_their_own_layer() {
        let switch = Entity::new(
            EntityId(7),
            EntityKind::Switch { active: false },
            Position::new(2, 2),
        );
        assert_eq!(switch.position.layer, GameConfig::SWITCH_LAYER);
        assert!(switch.position.coincides(Position::new(2, 2)));
    }

    #[test]
    fn bribed_pursuers_stop_being_hostile_or_interactable() {
        let stats = MoverStats::new(50, 3);
        let hostile = Entity::new(
            EntityId(1),
            EntityKind::Mercenary { stats, ally: false },
            Position::ORIGIN,
        );
        let ally = Entity::new(
            EntityId(2),
            EntityKind::Mercenary { stats, ally: true },
            Position::ORIGIN,
        );
        assert!(hostile.kind.is_hostile() && hostile.is_interactable());
        assert!(!ally.kind.is_hostile() && !ally.is_interactable());
    }
}
