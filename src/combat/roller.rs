//! Combat roll resolution
//!
//! Rolls a pool of combat dice, totals damage and effects, describes the
//! weapon's damage effects and picks a hit location. A previous roll can be
//! rerolled: its lowest dice are replaced with fresh ones and everything is
//! recomputed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classify::{tally, DieResult};
use super::dice::{DiceRoll, DiceSource};
use super::effects::{describe_effects, DamageEffect, EffectDescription};
use super::location::{HitLocationKind, LocationTable, StandardLocations};
use super::DamageType;
use crate::error::{CombatError, DiceError};

/// What is being rolled for, apart from the number of dice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackProfile {
    pub damage_type: DamageType,
    #[serde(default)]
    pub damage_effects: Vec<DamageEffect>,
    /// Called shot; when absent a location is rolled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_location: Option<String>,
    #[serde(default)]
    pub hit_location_kind: HitLocationKind,
}

impl AttackProfile {
    pub fn new(damage_type: DamageType) -> Self {
        Self {
            damage_type,
            ..Default::default()
        }
    }

    pub fn with_effect(mut self, effect: DamageEffect) -> Self {
        self.damage_effects.push(effect);
        self
    }

    pub fn with_hit_location(mut self, location: impl Into<String>) -> Self {
        self.hit_location = Some(location.into());
        self
    }

    pub fn with_hit_location_kind(mut self, kind: HitLocationKind) -> Self {
        self.hit_location_kind = kind;
        self
    }
}

/// Outcome of one combat roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRollResult {
    /// Total damage across all dice
    pub damage: u32,
    /// Described damage effects, in weapon order
    pub effects: Vec<EffectDescription>,
    /// Per-die classification
    pub results: Vec<DieResult>,
    /// Raw d6 faces the results were computed from
    pub rolls: Vec<u32>,
    pub hit_location: String,
    pub hit_location_kind: HitLocationKind,
}

impl CombatRollResult {
    /// Number of dice showing an effect face
    pub fn effect_value(&self) -> u32 {
        self.results.iter().filter(|r| r.effect).count() as u32
    }
}

/// Resolves combat rolls against a dice source and a hit location table
#[derive(Debug, Clone)]
pub struct CombatRoller<D, L = StandardLocations> {
    dice: D,
    locations: L,
}

impl<D: DiceSource> CombatRoller<D> {
    /// Roller using the standard hit location tables
    pub fn new(dice: D) -> Self {
        Self::with_locations(dice, StandardLocations)
    }
}

impl<D: DiceSource, L: LocationTable> CombatRoller<D, L> {
    pub fn with_locations(dice: D, locations: L) -> Self {
        Self { dice, locations }
    }

    /// The dice source
    pub fn dice(&self) -> &D {
        &self.dice
    }

    /// Roll a d20 and look up the hit location label
    pub fn hit_location(&mut self, kind: HitLocationKind) -> Result<String, CombatError> {
        let notation = DiceRoll::d20().to_string();
        let face = self
            .dice
            .roll(&notation)?
            .first()
            .copied()
            .ok_or(DiceError::EmptyRoll(notation))?;
        let location = self.locations.location(kind, face)?;
        debug!("Hit location {} ({}) from d20 = {}", location, kind, face);
        Ok(location)
    }

    /// Roll `dice` combat dice for an attack
    pub fn roll(
        &mut self,
        dice: u32,
        profile: &AttackProfile,
    ) -> Result<CombatRollResult, CombatError> {
        let faces = self.dice.roll(&DiceRoll::d6(dice).to_string())?;
        debug!("Combat roll {}d6: {:?}", dice, faces);
        self.resolve(faces, profile)
    }

    /// Reroll the `count` lowest dice of `previous`.
    ///
    /// The kept and fresh faces are sorted together before being classified,
    /// so result indices follow sorted order rather than roll order.
    pub fn reroll(
        &mut self,
        count: u32,
        profile: &AttackProfile,
        previous: &CombatRollResult,
    ) -> Result<CombatRollResult, CombatError> {
        let available = previous.rolls.len();
        if count as usize > available {
            return Err(CombatError::RerollExceedsPool {
                requested: count,
                available,
            });
        }

        let mut kept = previous.rolls.clone();
        kept.sort_unstable();
        let mut faces = kept.split_off(count as usize);

        if count > 0 {
            let fresh = self.dice.roll(&DiceRoll::d6(count).to_string())?;
            debug!("Rerolled {} of {:?}: {:?}", count, previous.rolls, fresh);
            faces.extend(fresh);
        }
        faces.sort_unstable();

        self.resolve(faces, profile)
    }

    fn resolve(
        &mut self,
        faces: Vec<u32>,
        profile: &AttackProfile,
    ) -> Result<CombatRollResult, CombatError> {
        let tally = tally(&faces);
        let kind = profile.hit_location_kind;

        let effects = describe_effects(
            tally.effects,
            &profile.damage_effects,
            tally.damage,
            profile.damage_type,
            || {
                let location = self.hit_location(kind)?;
                Ok(self.locations.location_text(kind, &location))
            },
        )?;

        let hit_location = match &profile.hit_location {
            Some(location) => location.clone(),
            None => self.hit_location(kind)?,
        };

        debug!(
            "Resolved {} dice: {} damage, {} effects, {} described",
            faces.len(),
            tally.damage,
            tally.effects,
            effects.len()
        );

        Ok(CombatRollResult {
            damage: tally.damage,
            effects,
            results: tally.results,
            rolls: faces,
            hit_location,
            hit_location_kind: kind,
        })
    }
}
