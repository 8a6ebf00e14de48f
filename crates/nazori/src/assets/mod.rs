//! Static game content: the paths stage catalog and the hiragana pools.
//! Both have built-in defaults; hosts may swap either set for their own JSON.

pub mod hiragana;
pub mod stages;

use thiserror::Error;

pub use hiragana::{CharacterPool, CharacterPools, QuestionSet, MAX_LEVELS, QUESTIONS_PER_LEVEL};
pub use stages::{Stage, StageCatalog};

/// Problems with host-supplied content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stage catalog has no stages")]
    EmptyCatalog,
    #[error("stage {index} cannot produce a guide path")]
    DegenerateStage { index: usize },
    #[error("no character pools defined")]
    NoPools,
    #[error("{count} character pools given, at most {max} levels are supported")]
    TooManyPools { count: usize, max: usize },
    #[error("character pool for level {level} is empty")]
    EmptyPool { level: u8 },
}
