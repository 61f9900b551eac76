use super::{Entity, EntityId, EntityKind, Position};

/// Insertion-ordered arena of all non-player entities.
///
/// The single source of truth for "what occupies which cell". All
/// cross-entity relations (paired portals, the boulder on a switch) are
/// resolved through position/id lookups here at use time; nothing holds a
/// reference to another entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Registry {
    entities: Vec<Entity>,
}

impl Registry {
    pub fn insert(&mut self, entity: Entity) {
        debug_assert!(
            self.get(entity.id).is_none(),
            "entity id {} reused",
            entity.id
        );
        self.entities.push(entity);
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Registry order is insertion order; movers are updated in this order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Stable id snapshot, for iterating while the registry mutates.
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Every entity sharing the (x, y) cell, across all layers.
    pub fn at(&self, cell: Position) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |e| e.position.coincides(cell))
    }

    /// First entity at the cell matching the predicate.
    pub fn find_at<F>(&self, cell: Position, matches: F) -> Option<&Entity>
    where
        F: Fn(&EntityKind) -> bool,
    {
        self.at(cell).find(|e| matches(&e.kind))
    }

    /// The paired portal: same colour, different id.
    pub fn paired_portal(&self, portal: &Entity) -> Option<&Entity> {
        let EntityKind::Portal { colour } = portal.kind else {
            return None;
        };
        self.entities
            .iter()
            .find(|e| e.id != portal.id && e.kind == EntityKind::Portal { colour })
    }

    /// Bounding box over all entity positions, or None when empty.
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let mut iter = self.entities.iter();
        let first = iter.next()?.position;
        let mut min = (first.x, first.y);
        let mut max = (first.x, first.y);
        for entity in iter {
            min.0 = min.0.min(entity.position.x);
            min.1 = min.1.min(entity.position.y);
            max.0 = max.0.max(entity.position.x);
            max.1 = max.1.max(entity.position.y);
        }
        Some((Position::new(min.0, min.1), Position::new(max.0, max.1)))
    }
}
