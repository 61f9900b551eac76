use mazecrawl_core::{ErrorKind, GameError};

/// Everything a façade request can fail with.
///
/// Game-rule violations pass through from the core crate; the variants here
/// cover the runtime's own concerns (file discovery, session lifecycle,
/// content parsing).
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("no dungeon named '{0}'")]
    UnknownDungeon(String),

    #[error("no game mode named '{0}'")]
    UnknownGameMode(String),

    #[error("no save named '{0}'")]
    UnknownSave(String),

    #[error("no game in progress")]
    NoActiveGame,

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("content error: {0}")]
    Content(#[from] anyhow::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RuntimeError {
    /// Coarse classification mirroring the core crate's split between bad
    /// requests and rule violations.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::UnknownDungeon(_)
            | RuntimeError::UnknownGameMode(_)
            | RuntimeError::UnknownSave(_) => ErrorKind::InvalidArgument,
            RuntimeError::Game(game) => game.kind(),
            RuntimeError::NoActiveGame | RuntimeError::Content(_) | RuntimeError::Io(_) => {
                ErrorKind::InvalidAction
            }
        }
    }
}
