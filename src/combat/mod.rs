//! Combat dice module
//!
//! Implements combat-dice damage resolution:
//! - Dice rolling behind a swappable dice source
//! - Per-die damage and effect classification
//! - Damage effects (Vicious, Piercing, Spread, ...)
//! - Hit location tables
//! - Rolling and rerolling an attack

mod classify;
mod damage;
mod dice;
mod effects;
mod location;
mod roller;

pub use classify::{classify, display_text, tally, DieResult, FaceValue, RollTally};
pub use damage::DamageType;
pub use dice::{parse_dice, DiceRoll, DiceSource, RandomDice, ScriptedDice};
pub use effects::{describe_effects, DamageEffect, DamageEffectKind, EffectDescription};
pub use location::{HitLocationKind, LocationTable, StandardLocations};
pub use roller::{AttackProfile, CombatRollResult, CombatRoller};
