use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use bt_engine::api::{self, Action, RunConfig};
use bt_engine::config::EncounterConfig;
use bt_engine::content::builtin_encounters;
use bt_engine::Dice;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DATE_FORMAT: &str = "%A %B %d, %Y %I:%M %p";

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// Encounter file (JSON; YAML when the extension is .yaml/.yml)
    #[arg(long)]
    file: Option<PathBuf>,
    /// Id of a built-in encounter
    #[arg(long)]
    builtin: Option<String>,
}

impl Source {
    fn load(&self) -> Result<EncounterConfig> {
        match (&self.file, &self.builtin) {
            (Some(path), _) => api::load_encounter_config(path),
            (None, Some(id)) => api::builtin_encounter_config(id),
            (None, None) => bail!("pass --file or --builtin"),
        }
    }
}

#[derive(Subcommand)]
enum Cmd {
    /// Roll a die a few times
    Roll {
        /// Sides on the die
        #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
        sides: i32,
        /// Number of rolls
        #[arg(long, default_value_t = 1)]
        rolls: u32,
        /// RNG seed; omit for fresh randomness
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Roll initiative for an encounter and print the order
    Init {
        #[command(flatten)]
        source: Source,
        /// RNG seed; overrides the file's seed
        #[arg(long)]
        seed: Option<u64>,
        /// Situational initiative modifier for the players
        #[arg(long, allow_negative_numbers = true)]
        player_mod: Option<i32>,
        /// Situational initiative modifier for the monsters
        #[arg(long, allow_negative_numbers = true)]
        monster_mod: Option<i32>,
    },
    /// Roll initiative, then apply damage/heal/affect/defect and advance turns
    Run {
        #[command(flatten)]
        source: Source,
        /// RNG seed; overrides the file's seed
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, allow_negative_numbers = true)]
        player_mod: Option<i32>,
        #[arg(long, allow_negative_numbers = true)]
        monster_mod: Option<i32>,
        /// Damage a combatant (applied first)
        #[arg(long, value_name = "NAME=AMOUNT")]
        damage: Vec<String>,
        /// Heal a combatant (after damage)
        #[arg(long, value_name = "NAME=AMOUNT")]
        heal: Vec<String>,
        /// Give a combatant an effect (after healing)
        #[arg(long, value_name = "NAME=EFFECT")]
        affect: Vec<String>,
        /// Remove an effect from a combatant (last)
        #[arg(long, value_name = "NAME=EFFECT")]
        defect: Vec<String>,
        /// Turns to advance once everything is applied
        #[arg(long, default_value_t = 0)]
        turns: u32,
        /// Session name; a random one is made up otherwise
        #[arg(long)]
        session: Option<String>,
        /// Write the session report here (a directory gets the default file name)
        #[arg(long)]
        save: Option<PathBuf>,
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a built-in encounter config as JSON
    Dump {
        #[arg(long)]
        builtin: String,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// List the built-in encounters
    List,
}

#[derive(Parser)]
#[command(name = "battle-tracker")]
#[command(about = "Initiative and hit point tracker for tabletop encounters")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn dice_for(seed: Option<u64>) -> Dice {
    match seed {
        Some(seed) => Dice::from_seed(seed),
        None => Dice::from_entropy(),
    }
}

fn split_pair(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .with_context(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("missing combatant name in '{}'", raw);
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn parse_amounts(
    raw: &[String],
    make: impl Fn(String, i32) -> Action,
) -> Result<Vec<Action>> {
    raw.iter()
        .map(|r| {
            let (name, value) = split_pair(r)?;
            let amount: i32 = value
                .parse()
                .with_context(|| format!("'{}' is not a whole number", value))?;
            Ok(make(name, amount))
        })
        .collect()
}

fn parse_effects(
    raw: &[String],
    make: impl Fn(String, String) -> Action,
) -> Result<Vec<Action>> {
    raw.iter()
        .map(|r| {
            let (name, effect) = split_pair(r)?;
            Ok(make(name, effect))
        })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Roll { sides, rolls, seed } => {
            let mut dice = dice_for(seed);
            for _ in 0..rolls {
                println!("{}", dice.roll(sides)?);
            }
        }
        Cmd::Init {
            source,
            seed,
            player_mod,
            monster_mod,
        } => {
            let mut cfg = source.load()?;
            if let Some(m) = player_mod {
                cfg.player_mod = m;
            }
            if let Some(m) = monster_mod {
                cfg.monster_mod = m;
            }
            let mut dice = dice_for(seed.or(cfg.seed));
            let mut encounter = cfg.build()?;
            encounter.roll_initiative(&mut dice)?;
            print!("{}", encounter);
        }
        Cmd::Run {
            source,
            seed,
            player_mod,
            monster_mod,
            damage,
            heal,
            affect,
            defect,
            turns,
            session,
            save,
            json,
        } => {
            let mut actions = parse_amounts(&damage, |target, amount| Action::Damage {
                target,
                amount,
            })?;
            actions.extend(parse_amounts(&heal, |target, amount| Action::Heal {
                target,
                amount,
            })?);
            actions.extend(parse_effects(&affect, |target, effect| Action::Affect {
                target,
                effect,
            })?);
            actions.extend(parse_effects(&defect, |target, effect| Action::Defect {
                target,
                effect,
            })?);
            debug!(actions = actions.len(), "parsed actions");

            let report = api::run_encounter(RunConfig {
                encounter: source.load()?,
                seed,
                player_mod,
                monster_mod,
                actions,
                turns,
                session_name: session,
                date: chrono::Local::now().format(DATE_FORMAT).to_string(),
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for line in &report.log {
                    println!("{}", line);
                }
                println!();
                print!("{}", report.report);
            }

            if let Some(path) = save {
                let path = if path.is_dir() {
                    path.join(&report.default_filename)
                } else {
                    path
                };
                fs::write(&path, &report.report)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!("Session saved to {}", path.display());
            }
        }
        Cmd::Dump { builtin, compact } => {
            let cfg = api::builtin_encounter_config(&builtin)?;
            if compact {
                println!("{}", serde_json::to_string(&cfg)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            }
        }
        Cmd::List => {
            for id in builtin_encounters().keys() {
                println!("{}", id);
            }
        }
    }
    Ok(())
}
