//! Damage types
//!
//! Each attack deals one type of damage, which decides which damage
//! resistance (DR) of the target applies.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Types of damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    /// Ballistic and melee damage
    #[default]
    Physical,
    /// Lasers, plasma, fire
    Energy,
    /// Radiation damage
    Radiation,
    /// Poison and toxins
    Poison,
}

impl DamageType {
    /// Get all damage types
    pub fn all() -> &'static [DamageType] {
        &[
            DamageType::Physical,
            DamageType::Energy,
            DamageType::Radiation,
            DamageType::Poison,
        ]
    }

    /// Label used in effect descriptions ("... the target's Energy DR")
    pub fn label(&self) -> &'static str {
        match self {
            DamageType::Physical => "Physical",
            DamageType::Energy => "Energy",
            DamageType::Radiation => "Radiation",
            DamageType::Poison => "Poison",
        }
    }
}

impl FromStr for DamageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "physical" | "phys" => Ok(DamageType::Physical),
            "energy" | "laser" | "plasma" => Ok(DamageType::Energy),
            "radiation" | "rad" | "rads" => Ok(DamageType::Radiation),
            "poison" => Ok(DamageType::Poison),
            other => Err(format!("unknown damage type: {}", other)),
        }
    }
}

impl std::fmt::Display for DamageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DamageType::Physical => "physical",
            DamageType::Energy => "energy",
            DamageType::Radiation => "radiation",
            DamageType::Poison => "poison",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_type_parsing() {
        assert_eq!("energy".parse::<DamageType>(), Ok(DamageType::Energy));
        assert_eq!("PHYSICAL".parse::<DamageType>(), Ok(DamageType::Physical));
        assert_eq!("rads".parse::<DamageType>(), Ok(DamageType::Radiation));
        assert!("fire".parse::<DamageType>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for dtype in DamageType::all() {
            assert_eq!(dtype.to_string().parse::<DamageType>(), Ok(*dtype));
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(DamageType::Physical.label(), "Physical");
        assert_eq!(DamageType::Poison.label(), "Poison");
    }
}
