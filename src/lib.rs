//! combat-dice - combat dice damage resolution
//!
//! Turns a pool of d6 combat dice into damage, effect descriptions and a hit
//! location, and rerolls part of an earlier pool.

pub mod combat;
pub mod config;
pub mod error;
pub mod text;

pub use combat::{AttackProfile, CombatRollResult, CombatRoller};
pub use config::Config;
pub use error::{CombatError, ConfigError, DiceError, LocationError};
