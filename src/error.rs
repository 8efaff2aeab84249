//! Error types

use thiserror::Error;

use crate::combat::HitLocationKind;

/// Errors raised while interpreting dice notation or drawing dice
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("missing 'd' in dice notation: {0}")]
    MissingSeparator(String),

    #[error("invalid dice count: {0}")]
    InvalidCount(String),

    #[error("dice count must be at least 1")]
    ZeroCount,

    #[error("invalid die sides: {0}")]
    InvalidSides(String),

    #[error("die sides must be at least 1")]
    ZeroSides,

    #[error("dice source returned no faces for {0}")]
    EmptyRoll(String),

    #[error("scripted dice exhausted ({needed} needed, {left} left)")]
    Exhausted { needed: usize, left: usize },
}

/// A hit location table could not resolve a die face
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no {kind} hit location for face {face}")]
pub struct LocationError {
    pub kind: HitLocationKind,
    pub face: u32,
}

/// Errors from resolving a combat roll or reroll
#[derive(Debug, Error)]
pub enum CombatError {
    #[error("dice error: {0}")]
    Dice(#[from] DiceError),

    #[error("location error: {0}")]
    Location(#[from] LocationError),

    #[error("cannot reroll {requested} dice from a pool of {available}")]
    RerollExceedsPool { requested: u32, available: usize },
}

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("unknown weapon: {0}")]
    UnknownWeapon(String),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Figment(Box::new(e))
    }
}
