//! Damage effects
//!
//! Weapons carry damage effects (Vicious, Piercing, Burst, ...). Every die
//! showing an effect face adds one to the effect value, and each effect the
//! weapon carries is then described using that value.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use super::DamageType;
use crate::error::CombatError;
use crate::text::pluralize;

/// Kinds of damage effect
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DamageEffectKind {
    /// Reduces cover dice or location DR
    Breaking,
    /// Hits additional targets, spending ammunition
    Burst,
    /// Damage repeats on later turns
    Persistent,
    /// Ignores part of the target's DR
    PiercingX,
    /// Adds radiation damage
    Radioactive,
    /// Extra damage to a second location
    Spread,
    /// Target loses their next turn
    Stun,
    /// Adds flat damage
    Vicious,
    /// A name this system does not know; never described
    Unrecognized(String),
}

impl FromStr for DamageEffectKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_lowercase().as_str() {
            "breaking" => DamageEffectKind::Breaking,
            "burst" => DamageEffectKind::Burst,
            "persistent" => DamageEffectKind::Persistent,
            "piercing" | "piercing-x" | "piercingx" => DamageEffectKind::PiercingX,
            "radioactive" => DamageEffectKind::Radioactive,
            "spread" => DamageEffectKind::Spread,
            "stun" => DamageEffectKind::Stun,
            "vicious" => DamageEffectKind::Vicious,
            _ => DamageEffectKind::Unrecognized(s.trim().to_string()),
        };
        Ok(kind)
    }
}

impl From<String> for DamageEffectKind {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<DamageEffectKind> for String {
    fn from(kind: DamageEffectKind) -> Self {
        kind.to_string()
    }
}

impl std::fmt::Display for DamageEffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DamageEffectKind::Breaking => "breaking",
            DamageEffectKind::Burst => "burst",
            DamageEffectKind::Persistent => "persistent",
            DamageEffectKind::PiercingX => "piercing",
            DamageEffectKind::Radioactive => "radioactive",
            DamageEffectKind::Spread => "spread",
            DamageEffectKind::Stun => "stun",
            DamageEffectKind::Vicious => "vicious",
            DamageEffectKind::Unrecognized(name) => name,
        };
        write!(f, "{}", s)
    }
}

/// A damage effect carried by a weapon, e.g. Piercing 2
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageEffect {
    pub kind: DamageEffectKind,
    /// Effect rating; only Piercing uses it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
}

impl DamageEffect {
    pub fn new(kind: DamageEffectKind) -> Self {
        Self { kind, rating: None }
    }

    pub fn rated(kind: DamageEffectKind, rating: u32) -> Self {
        Self {
            kind,
            rating: Some(rating),
        }
    }
}

/// Parses "vicious" or "piercing:2"
impl FromStr for DamageEffect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((name, rating)) => {
                let rating: u32 = rating
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid effect rating: {}", rating))?;
                Ok(DamageEffect::rated(name.into(), rating))
            }
            None => Ok(DamageEffect::new(s.into())),
        }
    }
}

impl From<&str> for DamageEffectKind {
    fn from(s: &str) -> Self {
        DamageEffectKind::from(s.to_string())
    }
}

/// A described effect outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDescription {
    pub kind: DamageEffectKind,
    pub text: String,
}

/// Describe each requested effect for an effect value.
///
/// Returns nothing when no effect faces were rolled. Otherwise yields one
/// description per recognized request, in request order. `spread_location`
/// draws a fresh hit location and returns its display text; it is only
/// called for Spread.
pub fn describe_effects<F>(
    effects: u32,
    requests: &[DamageEffect],
    damage: u32,
    damage_type: DamageType,
    mut spread_location: F,
) -> Result<Vec<EffectDescription>, CombatError>
where
    F: FnMut() -> Result<String, CombatError>,
{
    if effects == 0 {
        return Ok(Vec::new());
    }

    let value = effects;
    let dr = damage_type.label();
    let mut described = Vec::with_capacity(requests.len());

    for request in requests {
        let text = match &request.kind {
            DamageEffectKind::Breaking => format!(
                "Reduce the number of Combat Dice a target’s cover provides by {value} permanently. If the target is not in cover, instead reduce the {dr} DR of the location struck by {value}."
            ),
            DamageEffectKind::Burst => format!(
                "The attack hits {value} additional {} within Close range of the primary target, consuming {value} additional {} of ammunition from the weapon.",
                pluralize("target", value),
                pluralize("unit", value),
            ),
            DamageEffectKind::Persistent => format!(
                "The target suffers the weapon’s damage again at the end of their next {value} {}. The target can spend a major action to make a test to stop persistent damage early, with a difficulty of {value}, and the attribute + skill chosen by the GM. Some Persistent weapons may inflict a different type of damage to the weapon, and where this is the case, it will be noted in brackets, for example: Persistent (Poison).",
                pluralize("turn", value),
            ),
            DamageEffectKind::PiercingX => {
                let ignored = value.saturating_mul(request.rating.unwrap_or(1).max(1));
                format!("Ignore {ignored} points of the target’s {dr} DR.")
            }
            DamageEffectKind::Radioactive => format!(
                "The target also suffers {value} {} of radiation damage. This radiation damage is totalled and applied separately, after a character has suffered the normal damage from the attack.",
                pluralize("point", value),
            ),
            DamageEffectKind::Spread => {
                let location = spread_location()?;
                format!(
                    "Your attack inflicts {} additional damage to the target's {location}.",
                    damage / 2
                )
            }
            DamageEffectKind::Stun => "The target cannot take their normal actions on their next turn. A stunned character or creature can still spend AP to take additional actions as normal.".to_string(),
            DamageEffectKind::Vicious => {
                format!("The attack inflicts an additional {value} damage.")
            }
            DamageEffectKind::Unrecognized(name) => {
                debug!("Skipping unrecognized damage effect '{}'", name);
                continue;
            }
        };

        described.push(EffectDescription {
            kind: request.kind.clone(),
            text,
        });
    }

    Ok(described)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_spread() -> Result<String, CombatError> {
        panic!("spread location drawn without a Spread request")
    }

    fn describe_one(effects: u32, request: DamageEffect, damage: u32) -> String {
        let mut out = describe_effects(effects, &[request], damage, DamageType::Energy, || {
            Ok("left arm".to_string())
        })
        .unwrap();
        assert_eq!(out.len(), 1);
        out.remove(0).text
    }

    #[test]
    fn test_no_effect_faces_describes_nothing() {
        let requests = vec![
            DamageEffect::new(DamageEffectKind::Vicious),
            DamageEffect::new(DamageEffectKind::Spread),
        ];
        let out = describe_effects(0, &requests, 6, DamageType::Physical, no_spread).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_vicious() {
        assert_eq!(
            describe_one(3, DamageEffect::new(DamageEffectKind::Vicious), 4),
            "The attack inflicts an additional 3 damage."
        );
    }

    #[test]
    fn test_piercing_rating() {
        assert_eq!(
            describe_one(2, DamageEffect::rated(DamageEffectKind::PiercingX, 3), 4),
            "Ignore 6 points of the target’s Energy DR."
        );
        // missing or zero rating counts as 1
        assert_eq!(
            describe_one(2, DamageEffect::new(DamageEffectKind::PiercingX), 4),
            "Ignore 2 points of the target’s Energy DR."
        );
        assert_eq!(
            describe_one(2, DamageEffect::rated(DamageEffectKind::PiercingX, 0), 4),
            "Ignore 2 points of the target’s Energy DR."
        );
    }

    #[test]
    fn test_piercing_huge_rating_saturates() {
        let effect: DamageEffect = "piercing:4294967295".parse().unwrap();
        assert_eq!(
            describe_one(2, effect, 3),
            "Ignore 4294967295 points of the target’s Energy DR."
        );
    }

    #[test]
    fn test_burst_pluralization() {
        let one = describe_one(1, DamageEffect::new(DamageEffectKind::Burst), 2);
        assert!(one.contains("hits 1 additional target within"));
        assert!(one.contains("1 additional unit of ammunition"));

        let two = describe_one(2, DamageEffect::new(DamageEffectKind::Burst), 2);
        assert!(two.contains("hits 2 additional targets within"));
        assert!(two.contains("2 additional units of ammunition"));
    }

    #[test]
    fn test_breaking_and_radioactive() {
        let breaking = describe_one(2, DamageEffect::new(DamageEffectKind::Breaking), 3);
        assert!(breaking.contains("provides by 2 permanently"));
        assert!(breaking.contains("reduce the Energy DR of the location struck by 2."));

        let rads = describe_one(1, DamageEffect::new(DamageEffectKind::Radioactive), 3);
        assert!(rads.starts_with("The target also suffers 1 point of radiation damage."));
    }

    #[test]
    fn test_persistent_and_stun() {
        let persistent = describe_one(2, DamageEffect::new(DamageEffectKind::Persistent), 3);
        assert!(persistent.contains("next 2 turns"));
        assert!(persistent.contains("with a difficulty of 2"));

        let stun = describe_one(4, DamageEffect::new(DamageEffectKind::Stun), 3);
        assert!(stun.starts_with("The target cannot take their normal actions"));
        assert!(!stun.contains('4'));
    }

    #[test]
    fn test_spread_halves_damage_and_draws_location() {
        let mut draws = 0;
        let out = describe_effects(
            5,
            &[DamageEffect::new(DamageEffectKind::Spread)],
            7,
            DamageType::Physical,
            || {
                draws += 1;
                Ok("right leg".to_string())
            },
        )
        .unwrap();
        assert_eq!(draws, 1);
        assert_eq!(
            out[0].text,
            "Your attack inflicts 3 additional damage to the target's right leg."
        );
    }

    #[test]
    fn test_order_kept_and_unrecognized_skipped() {
        let requests: Vec<DamageEffect> = ["stun", "flaming", "vicious"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let out = describe_effects(1, &requests, 2, DamageType::Physical, no_spread).unwrap();
        let kinds: Vec<&DamageEffectKind> = out.iter().map(|d| &d.kind).collect();
        assert_eq!(kinds, vec![&DamageEffectKind::Stun, &DamageEffectKind::Vicious]);
    }

    #[test]
    fn test_spread_location_error_propagates() {
        let result = describe_effects(
            1,
            &[DamageEffect::new(DamageEffectKind::Spread)],
            2,
            DamageType::Physical,
            || Err(CombatError::RerollExceedsPool { requested: 1, available: 0 }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_effect_parsing() {
        assert_eq!(
            "piercing:2".parse::<DamageEffect>(),
            Ok(DamageEffect::rated(DamageEffectKind::PiercingX, 2))
        );
        assert_eq!(
            "Vicious".parse::<DamageEffect>(),
            Ok(DamageEffect::new(DamageEffectKind::Vicious))
        );
        assert!("piercing:x".parse::<DamageEffect>().is_err());
        assert_eq!(
            "Flaming".parse::<DamageEffectKind>(),
            Ok(DamageEffectKind::Unrecognized("Flaming".to_string()))
        );
    }

    #[test]
    fn test_effect_serde() {
        let effect: DamageEffect =
            serde_json::from_str(r#"{"kind":"piercing","rating":2}"#).unwrap();
        assert_eq!(effect, DamageEffect::rated(DamageEffectKind::PiercingX, 2));

        let json = serde_json::to_string(&DamageEffect::new(DamageEffectKind::Spread)).unwrap();
        assert_eq!(json, r#"{"kind":"spread"}"#);
    }
}
