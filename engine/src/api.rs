use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow};
use encoding_rs::Encoding;
use serde::Serialize;
use tracing::info;

use crate::combatant::Side;
use crate::config::EncounterConfig;
use crate::content::builtin_encounters;
use crate::life::LifeStatus;
use crate::{Dice, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// `.yaml` / `.yml` are YAML, everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Something to do to a named combatant once initiative is rolled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Damage { target: String, amount: i32 },
    Heal { target: String, amount: i32 },
    Affect { target: String, effect: String },
    Defect { target: String, effect: String },
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub encounter: EncounterConfig,
    /// Overrides the config's own seed.
    pub seed: Option<u64>,
    pub player_mod: Option<i32>,
    pub monster_mod: Option<i32>,
    pub actions: Vec<Action>,
    /// How many times to advance the turn after the actions.
    pub turns: u32,
    pub session_name: Option<String>,
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OrderLine {
    pub total_score: i32,
    pub roll: i32,
    pub name: String,
    pub side: Side,
    pub current_hp: i32,
    pub max_hp: i32,
    pub status: LifeStatus,
    pub effects: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RunReport {
    pub session: String,
    pub encounter: String,
    pub round: u32,
    pub current: Option<String>,
    pub order: Vec<OrderLine>,
    pub log: Vec<String>,
    /// Plain-text session report, as written by `--save`.
    pub report: String,
    pub default_filename: String,
}

pub fn parse_encounter_config(text: &str, format: ConfigFormat) -> Result<EncounterConfig> {
    let cfg: EncounterConfig = match format {
        ConfigFormat::Json => {
            serde_json::from_str(text).context("failed to parse encounter JSON")?
        }
        ConfigFormat::Yaml => {
            serde_yaml::from_str(text).context("failed to parse encounter YAML")?
        }
    };
    Ok(cfg)
}

pub fn load_encounter_config(path: &Path) -> Result<EncounterConfig> {
    let text = read_text_auto(path)
        .with_context(|| format!("failed to read encounter file: {}", path.display()))?;
    parse_encounter_config(&text, ConfigFormat::from_path(path))
        .with_context(|| format!("in {}", path.display()))
}

pub fn builtin_encounter_config(id: &str) -> Result<EncounterConfig> {
    let encounters = builtin_encounters();
    let text = encounters.get(id).ok_or_else(|| {
        let known = encounters.keys().copied().collect::<Vec<_>>().join(", ");
        anyhow!("unknown built-in encounter '{}' (known: {})", id, known)
    })?;
    parse_encounter_config(text, ConfigFormat::Json)
        .with_context(|| format!("built-in encounter '{}'", id))
}

/// Build the encounter, roll initiative, apply `actions` in order, advance
/// `turns`, and report. Any failing action aborts the run.
pub fn run_encounter(cfg: RunConfig) -> Result<RunReport> {
    let mut logs = Vec::new();
    let mut enc_cfg = cfg.encounter;
    if let Some(m) = cfg.player_mod {
        enc_cfg.player_mod = m;
    }
    if let Some(m) = cfg.monster_mod {
        enc_cfg.monster_mod = m;
    }
    let mut dice = match cfg.seed.or(enc_cfg.seed) {
        Some(seed) => Dice::from_seed(seed),
        None => Dice::from_entropy(),
    };

    let mut encounter = enc_cfg.build()?;
    logs.push(format!(
        "[START] {} ({} combatants, players {:+}, monsters {:+})",
        encounter.name(),
        encounter.combatants().len(),
        enc_cfg.player_mod,
        enc_cfg.monster_mod
    ));
    encounter.roll_initiative(&mut dice)?;
    let mods = encounter.modifiers();
    for (slot, c) in encounter.initiative() {
        logs.push(format!(
            "[INIT][{}] d20={} {:+} situational {:+} = {}",
            c.name,
            slot.roll,
            c.initiative_modifier,
            mods.for_side(c.side),
            slot.total_score
        ));
    }
    if let Some(first) = encounter.current() {
        logs.push(format!("[TURN] round 1 → {}", first.name));
    }

    for action in &cfg.actions {
        let log = |msg: String| logs.push(msg);
        match action {
            Action::Damage { target, amount } => {
                encounter.damage(target, *amount, log)?;
            }
            Action::Heal { target, amount } => {
                encounter.heal(target, *amount, log)?;
            }
            Action::Affect { target, effect } => encounter.affect(target, effect, log)?,
            Action::Defect { target, effect } => encounter.defect(target, effect, log)?,
        }
    }

    for _ in 0..cfg.turns {
        let round = encounter.round();
        if let Some(c) = encounter.next_turn() {
            let name = c.name.clone();
            if encounter.round() != round {
                logs.push(format!("[ROUND] {}", encounter.round()));
            }
            logs.push(format!("[TURN] round {} → {}", encounter.round(), name));
        }
    }

    let order = encounter
        .initiative()
        .map(|(slot, c)| OrderLine {
            total_score: slot.total_score,
            roll: slot.roll,
            name: c.name.clone(),
            side: c.side,
            current_hp: c.current_hp,
            max_hp: c.max_hp,
            status: c.status(),
            effects: c.status_effects.clone(),
        })
        .collect();
    let round = encounter.round();
    let current = encounter.current().map(|c| c.name.clone());
    let encounter_name = encounter.name().to_string();

    let mut session = match cfg.session_name {
        Some(name) => Session::new(name, cfg.date),
        None => Session::unnamed(cfg.date, &mut dice)?,
    };
    for p in &enc_cfg.players {
        session.add_player(p.build(Side::Player)?)?;
    }
    session.push_encounter(encounter);
    info!(session = %session.name, encounter = %encounter_name, "encounter run complete");

    Ok(RunReport {
        session: session.name.clone(),
        encounter: encounter_name,
        round,
        current,
        order,
        log: logs,
        report: session.to_string(),
        default_filename: session.default_filename(),
    })
}

fn read_text_auto(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}
