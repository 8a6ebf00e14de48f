//! The two mini-games. Each implements `MiniGame`; the session controller
//! holds whichever is active.

pub mod paths;
pub mod tracing;

pub use paths::PathsGame;
pub use tracing::TracingGame;

use crate::api::game::MiniGame;

/// The mini-game owned by a live session.
pub enum ActiveGame {
    Paths(PathsGame),
    Tracing(TracingGame),
}

impl ActiveGame {
    pub fn as_game(&self) -> &dyn MiniGame {
        match self {
            Self::Paths(game) => game,
            Self::Tracing(game) => game,
        }
    }

    pub fn as_game_mut(&mut self) -> &mut dyn MiniGame {
        match self {
            Self::Paths(game) => game,
            Self::Tracing(game) => game,
        }
    }
}
