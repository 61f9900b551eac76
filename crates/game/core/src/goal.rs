//! Hierarchical win-condition evaluation.
//!
//! Goals form a tree of And/Or combinators over four leaf predicates.
//! Evaluation is two-pass: leaves are recomputed directly from world state,
//! then completion propagates bottom-up through the combinators. The
//! externally visible status is the "remaining" string, which is empty
//! exactly when the game is won.

use crate::state::{EntityKind, ItemKind, World};

/// The four leaf predicates a dungeon can demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[derive(strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum GoalKind {
    /// No hostile movers or spawners remain.
    Enemies,
    /// The player stands on an exit.
    Exit,
    /// No treasure remains on the map.
    Treasure,
    /// Every switch is pressed by a boulder.
    Boulders,
}

/// Snapshot of the leaf predicate values for one evaluation pass.
///
/// Computed once per evaluation so the tree walk itself is a pure function
/// of this struct; evaluating twice against an unchanged world is idempotent
/// by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeafStatus {
    pub enemies: bool,
    pub exit: bool,
    pub treasure: bool,
    pub boulders: bool,
}

impl LeafStatus {
    pub fn compute(world: &World) -> Self {
        let mut enemies = true;
        let mut exit = false;
        let mut treasure = true;
        let mut boulders = true;

        for entity in world.registry().iter() {
            match &entity.kind {
                kind if kind.is_hostile() => enemies = false,
                EntityKind::Spawner => enemies = false,
                EntityKind::Exit => {
                    if world.player.position.coincides(entity.position) {
                        exit = true;
                    }
                }
                EntityKind::Collectible(ItemKind::Treasure) => {
                    treasure = false;
                }
                EntityKind::Switch { active: false } => boulders = false,
                _ => {}
            }
        }

        Self {
            enemies,
            exit,
            treasure,
            boulders,
        }
    }

    fn achieved(&self, kind: GoalKind) -> bool {
        match kind {
            GoalKind::Enemies => self.enemies,
            GoalKind::Exit => self.exit,
            GoalKind::Treasure => self.treasure,
            GoalKind::Boulders => self.boulders,
        }
    }
}

/// Goal tree node. Completion flags persist so the remaining string can be
/// rendered without re-reading world state, but they are fully overwritten
/// on every evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Goal {
    Leaf { kind: GoalKind, done: bool },
    And { children: Vec<Goal>, done: bool },
    Or { children: Vec<Goal>, done: bool },
}

impl Goal {
    pub fn leaf(kind: GoalKind) -> Self {
        Goal::Leaf { kind, done: false }
    }

    pub fn and(children: Vec<Goal>) -> Self {
        Goal::And {
            children,
            done: false,
        }
    }

    pub fn or(children: Vec<Goal>) -> Self {
        Goal::Or {
            children,
            done: false,
        }
    }

    pub fn is_done(&self) -> bool {
        match self {
            Goal::Leaf { done, .. } | Goal::And { done, .. } | Goal::Or { done, .. } => *done,
        }
    }

    /// Bottom-up re-evaluation against a leaf snapshot. Returns the node's
    /// new completion value.
    pub fn evaluate(&mut self, status: &LeafStatus) -> bool {
        match self {
            Goal::Leaf { kind, done } => {
                *done = status.achieved(*kind);
                *done
            }
            Goal::And { children, done } => {
                // No short-circuit: every subtree's flags must be refreshed.
                let mut all = true;
                for child in children.iter_mut() {
                    all &= child.evaluate(status);
                }
                *done = all;
                *done
            }
            Goal::Or { children, done } => {
                let mut any = false;
                for child in children.iter_mut() {
                    any |= child.evaluate(status);
                }
                *done = any;
                *done
            }
        }
    }

    /// Textual representation of the unmet goals. A completed node
    /// contributes nothing; a composite joins its incomplete children with
    /// its operator and is parenthesised when the joined form mixes
    /// operators.
    pub fn remaining_string(&self) -> String {
        match self {
            Goal::Leaf { kind, done } => {
                if *done {
                    String::new()
                } else {
                    kind.to_string()
                }
            }
            Goal::And { children, done } => Self::join_remaining(children, *done, "AND"),
            Goal::Or { children, done } => Self::join_remaining(children, *done, "OR"),
        }
    }

    fn join_remaining(children: &[Goal], done: bool, operator: &str) -> String {
        if done {
            return String::new();
        }
        let parts: Vec<String> = children
            .iter()
            .map(Goal::remaining_string)
            .filter(|s| !s.is_empty())
            .collect();
        let joined = parts.join(&format!(" {operator} "));
        if parts.len() > 1 {
            format!("({joined})")
        } else {
            joined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE_DONE: LeafStatus = LeafStatus {
        enemies: false,
        exit: false,
        treasure: false,
        boulders: false,
    };

    fn status(enemies: bool, exit: bool, treasure: bool, boulders: bool) -> LeafStatus {
        LeafStatus {
            enemies,
            exit,
            treasure,
            boulders,
        }
    }

    #[test]
    fn and_names_exactly_the_unachieved_leaf() {
        let mut goal = Goal::and(vec![Goal::leaf(GoalKind::Exit), Goal::leaf(GoalKind::Treasure)]);

        goal.evaluate(&status(false, true, false, false));
        assert_eq!(goal.remaining_string(), "treasure");

        goal.evaluate(&status(false, true, true, false));
        assert_eq!(goal.remaining_string(), "");
        assert!(goal.is_done());
    }

    #[test]
    fn incomplete_composite_is_parenthesised() {
        let mut goal = Goal::and(vec![Goal::leaf(GoalKind::Exit), Goal::leaf(GoalKind::Boulders)]);
        goal.evaluate(&NONE_DONE);
        assert_eq!(goal.remaining_string(), "(exit AND boulders)");
    }

    #[test]
    fn or_completes_on_any_child() {
        let mut goal = Goal::or(vec![Goal::leaf(GoalKind::Enemies), Goal::leaf(GoalKind::Exit)]);
        goal.evaluate(&status(true, false, false, false));
        assert!(goal.is_done());
        assert_eq!(goal.remaining_string(), "");
    }

    #[test]
    fn nested_composites_render_with_both_operators() {
        let mut goal = Goal::and(vec![
            Goal::leaf(GoalKind::Exit),
            Goal::or(vec![Goal::leaf(GoalKind::Enemies), Goal::leaf(GoalKind::Treasure)]),
        ]);
        goal.evaluate(&NONE_DONE);
        assert_eq!(
            goal.remaining_string(),
            "(exit AND (enemies OR treasure))"
        );

        // The Or half resolves; only the exit leaf remains.
        goal.evaluate(&status(true, false, false, false));
        assert_eq!(goal.remaining_string(), "exit");
    }

    #[test]
    fn evaluation_is_idempotent() {
        let mut goal = Goal::and(vec![
            Goal::leaf(GoalKind::Enemies),
            Goal::or(vec![Goal::leaf(GoalKind::Exit), Goal::leaf(GoalKind::Boulders)]),
        ]);
        let snapshot = status(true, false, true, false);
        goal.evaluate(&snapshot);
        let first = goal.remaining_string();
        goal.evaluate(&snapshot);
        assert_eq!(goal.remaining_string(), first);
    }

    #[test]
    fn completion_does_not_stick_when_state_regresses() {
        let mut goal = Goal::leaf(GoalKind::Boulders);
        goal.evaluate(&status(false, false, false, true));
        assert!(goal.is_done());

        // Boulder rolled off the switch: the leaf must reopen.
        goal.evaluate(&NONE_DONE);
        assert!(!goal.is_done());
        assert_eq!(goal.remaining_string(), "boulders");
    }
}
