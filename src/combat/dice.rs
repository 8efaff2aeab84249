//! Dice rolling system
//!
//! Parses dice notation like "4d6" or "1d20" and draws faces from a
//! [`DiceSource`]. Combat code only ever asks a source for faces; randomness
//! lives behind the trait so tests can script the outcome.

use std::collections::VecDeque;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::DiceError;

/// A parsed dice roll specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceRoll {
    /// Number of dice to roll
    pub count: u32,
    /// Number of sides per die
    pub sides: u32,
}

impl DiceRoll {
    /// Create a new dice roll
    pub fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }

    /// `<count>d6`, the damage dice pool
    pub fn d6(count: u32) -> Self {
        Self::new(count, 6)
    }

    /// A single d20, used for hit locations
    pub fn d20() -> Self {
        Self::new(1, 20)
    }
}

impl FromStr for DiceRoll {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dice(s)
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// Parse a dice notation string like "2d6".
///
/// Combat dice never carry modifiers, so "2d6+3" is rejected.
pub fn parse_dice(notation: &str) -> Result<DiceRoll, DiceError> {
    let notation = notation.trim().to_lowercase();

    let d_pos = notation
        .find('d')
        .ok_or_else(|| DiceError::MissingSeparator(notation.clone()))?;

    // "d6" means "1d6"
    let count_str = &notation[..d_pos];
    let count: u32 = if count_str.is_empty() {
        1
    } else {
        count_str
            .parse()
            .map_err(|_| DiceError::InvalidCount(count_str.to_string()))?
    };

    if count == 0 {
        return Err(DiceError::ZeroCount);
    }

    let sides_str = &notation[d_pos + 1..];
    let sides: u32 = sides_str
        .parse()
        .map_err(|_| DiceError::InvalidSides(sides_str.to_string()))?;

    if sides == 0 {
        return Err(DiceError::ZeroSides);
    }

    Ok(DiceRoll { count, sides })
}

/// Anything that can turn dice notation into individual die faces.
///
/// Faces come back in the order they were rolled.
pub trait DiceSource {
    fn roll(&mut self, notation: &str) -> Result<Vec<u32>, DiceError>;
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll(&mut self, notation: &str) -> Result<Vec<u32>, DiceError> {
        (**self).roll(notation)
    }
}

/// Uniform random dice
#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    /// Dice seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible dice for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when a seed is given, otherwise from the operating system
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }
}

impl Default for RandomDice {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceSource for RandomDice {
    fn roll(&mut self, notation: &str) -> Result<Vec<u32>, DiceError> {
        let roll = parse_dice(notation)?;
        let faces: Vec<u32> = (0..roll.count)
            .map(|_| self.rng.random_range(1..=roll.sides))
            .collect();
        debug!("Rolled {}: {:?}", roll, faces);
        Ok(faces)
    }
}

/// Replays a fixed sequence of faces, in order, across calls.
///
/// Every request is recorded so callers can check what was asked for.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u32>,
    requests: Vec<String>,
}

impl ScriptedDice {
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            requests: Vec::new(),
        }
    }

    /// Notation of every roll requested so far
    pub fn requests(&self) -> &[String] {
        &self.requests
    }

    /// Faces not yet handed out
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self, notation: &str) -> Result<Vec<u32>, DiceError> {
        let roll = parse_dice(notation)?;
        let needed = roll.count as usize;
        if needed > self.faces.len() {
            return Err(DiceError::Exhausted {
                needed,
                left: self.faces.len(),
            });
        }
        self.requests.push(roll.to_string());
        Ok(self.faces.drain(..needed).collect())
    }
}
