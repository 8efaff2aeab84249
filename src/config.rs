//! Configuration
//!
//! Layered as: built-in defaults, then an optional TOML file, then
//! `COMBAT_DICE_*` environment variables.
//!
//! ```toml
//! seed = 7
//! hit_location_kind = "default"
//!
//! [weapons.laser-rifle]
//! dice = 5
//! damage_type = "energy"
//! effects = [{ kind = "piercing", rating = 1 }]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::combat::{AttackProfile, DamageEffect, DamageType, HitLocationKind};
use crate::error::ConfigError;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "COMBAT_DICE_";

/// A named weapon preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponProfile {
    /// Number of combat dice
    pub dice: u32,
    pub damage_type: DamageType,
    #[serde(default)]
    pub effects: Vec<DamageEffect>,
    /// Overrides the configured hit location table
    #[serde(default)]
    pub hit_location_kind: Option<HitLocationKind>,
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Seed for reproducible dice; random when unset
    #[serde(default)]
    pub seed: Option<u64>,
    /// Hit location table used when nothing more specific is given
    #[serde(default)]
    pub hit_location_kind: HitLocationKind,
    #[serde(default)]
    pub weapons: BTreeMap<String, WeaponProfile>,
}

impl Config {
    /// Load defaults, then `path` if given, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        let config: Config = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        Ok(config)
    }

    /// Dice count and attack profile for a named weapon
    pub fn weapon(&self, name: &str) -> Result<(u32, AttackProfile), ConfigError> {
        let weapon = self
            .weapons
            .get(name)
            .ok_or_else(|| ConfigError::UnknownWeapon(name.to_string()))?;

        let profile = AttackProfile {
            damage_type: weapon.damage_type,
            damage_effects: weapon.effects.clone(),
            hit_location: None,
            hit_location_kind: weapon.hit_location_kind.unwrap_or(self.hit_location_kind),
        };
        Ok((weapon.dice, profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageEffectKind;
    use figment::Jail;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.hit_location_kind, HitLocationKind::Default);
        assert!(config.weapons.is_empty());
    }

    const ARMORY: &str = r#"
seed = 7
hit_location_kind = "mr-handy"

[weapons.laser-rifle]
dice = 5
damage_type = "energy"
effects = [{ kind = "piercing", rating = 2 }, { kind = "flaming" }]

[weapons.dog-bite]
dice = 3
damage_type = "physical"
hit_location_kind = "creature"
"#;

    // Jail serializes tests that touch the process environment
    #[test]
    fn test_load_file() {
        Jail::expect_with(|_jail| {
            let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
            file.write_all(ARMORY.as_bytes()).unwrap();

            let config = Config::load(Some(file.path())).unwrap();
            assert_eq!(config.seed, Some(7));
            assert_eq!(config.hit_location_kind, HitLocationKind::MrHandy);

            let (dice, profile) = config.weapon("laser-rifle").unwrap();
            assert_eq!(dice, 5);
            assert_eq!(profile.damage_type, DamageType::Energy);
            assert_eq!(profile.hit_location_kind, HitLocationKind::MrHandy);
            assert_eq!(
                profile.damage_effects,
                vec![
                    DamageEffect::rated(DamageEffectKind::PiercingX, 2),
                    DamageEffect::new(DamageEffectKind::Unrecognized("flaming".to_string())),
                ]
            );

            let (_, bite) = config.weapon("dog-bite").unwrap();
            assert_eq!(bite.hit_location_kind, HitLocationKind::Creature);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("combat-dice.toml", ARMORY)?;
            jail.set_env("COMBAT_DICE_SEED", "11");
            jail.set_env("COMBAT_DICE_HIT_LOCATION_KIND", "creature");

            let config = Config::load(Some(Path::new("combat-dice.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.seed, Some(11));
            assert_eq!(config.hit_location_kind, HitLocationKind::Creature);

            // untouched file values survive
            let (dice, profile) = config.weapon("laser-rifle").unwrap();
            assert_eq!(dice, 5);
            assert_eq!(profile.hit_location_kind, HitLocationKind::Creature);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("COMBAT_DICE_SEED", "3");

            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.seed, Some(3));
            assert_eq!(config.hit_location_kind, HitLocationKind::Default);
            assert!(config.weapons.is_empty());
            Ok(())
        });
    }

    #[test]
    fn test_unknown_weapon() {
        let err = Config::default().weapon("fat-man").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownWeapon(name) if name == "fat-man"));
    }
}
