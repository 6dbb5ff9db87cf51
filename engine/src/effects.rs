use crate::combatant::Combatant;
use crate::error::TrackerError;

/// Append an effect label. Duplicates are kept; each one needs its own
/// [`defect`] to clear.
pub fn affect(
    combatant: &mut Combatant,
    effect: &str,
    mut log: impl FnMut(String),
) -> Result<(), TrackerError> {
    let effect = effect.trim();
    if effect.is_empty() {
        return Err(TrackerError::EmptyEffect);
    }
    combatant.status_effects.push(effect.to_string());
    log(format!("[COND][{}] gains {}", combatant.name, effect));
    Ok(())
}

/// Remove the earliest matching effect label.
pub fn defect(
    combatant: &mut Combatant,
    effect: &str,
    mut log: impl FnMut(String),
) -> Result<(), TrackerError> {
    let effect = effect.trim();
    let idx = combatant
        .status_effects
        .iter()
        .position(|e| e == effect)
        .ok_or_else(|| TrackerError::UnknownEffect {
            name: combatant.name.clone(),
            effect: effect.to_string(),
        })?;
    let removed = combatant.status_effects.remove(idx);
    log(format!("[COND][{}] is no longer {}", combatant.name, removed));
    Ok(())
}

/// `prone, slowed` or an empty string.
pub fn summary(combatant: &Combatant) -> String {
    combatant.status_effects.join(", ")
}
