//! Error types for battle-core

use crate::{MonsterId, Side, TurnPolicy};
use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Insufficient roster: need at least 2 selectable monsters, found {available}")]
    InsufficientRoster { available: usize },

    #[error("Monster not found in roster: {0}")]
    UnknownMonster(MonsterId),

    #[error("Monster {0} has no health left and cannot battle")]
    NotSelectable(MonsterId),

    #[error("Invalid monster: {0}")]
    InvalidMonster(String),

    #[error("A monster cannot battle itself: {0}")]
    SameCombatant(MonsterId),

    #[error("Not the player's turn (waiting on {0})")]
    NotPlayerTurn(Side),

    #[error("{0} battles do not take player input")]
    NoInput(TurnPolicy),

    #[error("The battle is already over")]
    BattleOver,

    #[error("Roster error: {0}")]
    Roster(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
