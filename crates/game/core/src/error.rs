//! Error surface for the simulation core.
//!
//! Every rejected request falls into one of two kinds: the caller asked for
//! something structurally nonsensical ([`ErrorKind::InvalidArgument`]), or
//! the request is well-formed but violates a game rule
//! ([`ErrorKind::InvalidAction`]). All validation happens before any
//! mutation, so a returned error always leaves the world untouched.

use crate::state::EntityId;

/// Coarse classification of a [`GameError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structurally nonsensical input (unknown buildable, malformed type).
    InvalidArgument,
    /// Well-formed request that violates a game rule (out of range,
    /// insufficient resources, nonexistent target).
    InvalidAction,
}

/// Errors surfaced by `tick`, `interact`, and `build`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("item {0} does not exist in the inventory")]
    ItemNotFound(EntityId),

    #[error("item {0} is not usable; only bombs and potions can be used")]
    ItemNotUsable(EntityId),

    #[error("entity {0} does not exist in the map")]
    EntityNotFound(EntityId),

    #[error("entity {0} cannot be interacted with")]
    NotInteractable(EntityId),

    #[error("player is out of range of entity {0}")]
    OutOfRange(EntityId),

    #[error("player lacks the resources to {action}")]
    InsufficientResources { action: &'static str },

    #[error("'{0}' is not a buildable item")]
    UnknownBuildable(String),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::UnknownBuildable(_) => ErrorKind::InvalidArgument,
            GameError::ItemNotFound(_)
            | GameError::ItemNotUsable(_)
            | GameError::EntityNotFound(_)
            | GameError::NotInteractable(_)
            | GameError::OutOfRange(_)
            | GameError::InsufficientResources { .. } => ErrorKind::InvalidAction,
        }
    }
}
