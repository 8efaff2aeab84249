//! combat-dice - roll and reroll combat dice from the command line

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use combat_dice::combat::{
    AttackProfile, CombatRollResult, CombatRoller, DamageEffect, DamageType, HitLocationKind,
    RandomDice,
};
use combat_dice::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Combat dice roller
#[derive(Parser, Debug)]
#[command(name = "combat-dice", version, about = "Roll combat dice for an attack")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Roll a fresh pool of combat dice
    Roll {
        /// Number of combat dice (ignored with --weapon)
        #[arg(short, long)]
        dice: Option<u32>,

        #[command(flatten)]
        attack: AttackArgs,
    },
    /// Reroll the lowest dice of a previous roll
    Reroll {
        /// Number of dice to reroll
        #[arg(short = 'n', long)]
        count: u32,

        /// JSON file holding the previous roll
        #[arg(short, long)]
        previous: PathBuf,

        #[command(flatten)]
        attack: AttackArgs,
    },
}

#[derive(Args, Debug)]
struct AttackArgs {
    /// Weapon preset from the configuration
    #[arg(short, long)]
    weapon: Option<String>,

    /// Damage type (physical, energy, radiation, poison)
    #[arg(short = 't', long)]
    damage_type: Option<DamageType>,

    /// Damage effect, e.g. "vicious" or "piercing:2" (repeatable)
    #[arg(short, long = "effect")]
    effects: Vec<DamageEffect>,

    /// Called shot location; skips the hit location roll
    #[arg(short, long)]
    location: Option<String>,

    /// Hit location table (default, mr-handy, creature)
    #[arg(short = 'k', long)]
    location_kind: Option<HitLocationKind>,
}

impl AttackArgs {
    /// Dice count from the weapon preset, if any, and the merged profile
    fn profile(&self, config: &Config) -> Result<(Option<u32>, AttackProfile)> {
        let (dice, mut profile) = match &self.weapon {
            Some(name) => {
                let (dice, profile) = config.weapon(name)?;
                (Some(dice), profile)
            }
            None => (
                None,
                AttackProfile::new(self.damage_type.unwrap_or_default())
                    .with_hit_location_kind(config.hit_location_kind),
            ),
        };

        if let Some(damage_type) = self.damage_type {
            profile.damage_type = damage_type;
        }
        profile.damage_effects.extend(self.effects.iter().cloned());
        if let Some(kind) = self.location_kind {
            profile.hit_location_kind = kind;
        }
        profile.hit_location = self.location.clone();

        Ok((dice, profile))
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "combat_dice=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let mut roller = CombatRoller::new(RandomDice::from_seed(config.seed));

    let result = match &cli.command {
        Command::Roll { dice, attack } => {
            let (preset, profile) = attack.profile(&config)?;
            let Some(dice) = preset.or(*dice) else {
                bail!("either --dice or --weapon is required");
            };
            info!("Rolling {}d6 {} damage", dice, profile.damage_type);
            roller.roll(dice, &profile)?
        }
        Command::Reroll {
            count,
            previous,
            attack,
        } => {
            let (_, profile) = attack.profile(&config)?;
            let json = std::fs::read_to_string(previous)
                .with_context(|| format!("reading {}", previous.display()))?;
            let previous: CombatRollResult = serde_json::from_str(&json)
                .with_context(|| format!("parsing {}", previous.display()))?;
            info!("Rerolling {} of {} dice", count, previous.rolls.len());
            roller.reroll(*count, &profile, &previous)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
