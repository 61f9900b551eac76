use super::{Colour, EntityId, ItemKind};

/// One held item. Equippables carry a durability counter that decrements on
/// use; the item is dropped when it reaches zero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub kind: ItemKind,
    pub durability: Option<u32>,
}

impl Item {
    pub fn new(id: EntityId, kind: ItemKind) -> Self {
        Self {
            id,
            kind,
            durability: kind.initial_durability(),
        }
    }
}

/// Ordered inventory; order is acquisition order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn get(&self, id: EntityId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Removes the first (oldest) item matching the predicate.
    pub fn remove_first<F>(&mut self, matches: F) -> Option<Item>
    where
        F: Fn(&Item) -> bool,
    {
        let index = self.items.iter().position(|item| matches(item))?;
        Some(self.items.remove(index))
    }

    pub fn count<F>(&self, matches: F) -> usize
    where
        F: Fn(&Item) -> bool,
    {
        self.items.iter().filter(|item| matches(item)).count()
    }

    pub fn contains_kind(&self, kind: ItemKind) -> bool {
        self.items.iter().any(|item| item.kind == kind)
    }

    pub fn has_key(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item.kind, ItemKind::Key { .. }))
    }

    pub fn key_of_colour(&self, colour: Colour) -> Option<&Item> {
        self.items
            .iter()
            .find(|item| item.kind == ItemKind::Key { colour })
    }

    /// A sword or bow, needed to destroy a spawner.
    pub fn has_weapon(&self) -> bool {
        self.items.iter().any(|item| item.kind.is_weapon())
    }

    /// Treasure spendable on bribes.
    pub fn has_gold(&self) -> bool {
        self.contains_kind(ItemKind::Treasure)
    }

    /// Decrements durability on the given item; removes it at zero.
    /// Items without durability are unaffected.
    pub fn wear(&mut self, id: EntityId) {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return;
        };
        if let Some(durability) = &mut self.items[index].durability {
            *durability = durability.saturating_sub(1);
            if *durability == 0 {
                self.items.remove(index);
            }
        }
    }

    /// Buildable kinds the current contents can afford.
    pub fn buildables(&self) -> Vec<ItemKind> {
        let wood = self.count(|item| item.kind == ItemKind::Wood);
        let arrows = self.count(|item| item.kind == ItemKind::Arrow);
        let treasure = self.count(|item| item.kind == ItemKind::Treasure);
        let keys = self.count(|item| matches!(item.kind, ItemKind::Key { .. }));

        let mut out = Vec::new();
        if wood >= 1 && arrows >= 3 {
            out.push(ItemKind::Bow);
        }
        if wood >= 2 && (treasure >= 1 || keys >= 1) {
            out.push(ItemKind::Shield);
        }
        out
    }
}
