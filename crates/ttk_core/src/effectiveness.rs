//! Per-item effectiveness attribution.
//!
//! Re-runs the phase resolver in isolated ("solo") and differential
//! ("with/without") configurations against the same defense profile. Purely
//! functional — cheap enough to recompute on every configuration change.

use serde::Serialize;

use crate::loadout::DamageSources;
use crate::profile::DefenseProfile;
use crate::resolver::{armor_rate, resolve};
use crate::types::{DamageVector, MunitionId, WeaponId};

#[derive(Debug, Clone, Serialize)]
pub struct WeaponReport {
    pub weapon: WeaponId,
    pub display_name: String,
    pub count: u32,
    /// This group's share of the loadout's effective DPS, by type.
    pub dps_contribution: DamageVector,
    pub shield_dps: f64,
    pub passthrough_dps: f64,
    /// Armor-phase rate of this group alone (post-shield, typed multipliers).
    pub armor_dps: f64,
    pub hull_dps: f64,
    pub shield_time: f64,
    pub armor_time: f64,
    pub hull_time: f64,
    pub solo_ttk: f64,
    pub is_effective: bool,
    pub ineffective_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MunitionReport {
    pub munition: MunitionId,
    pub display_name: String,
    pub count: u32,
    pub damage_contribution: DamageVector,
    /// Reduction in total TTK attributable to this group, against the
    /// complete-loadout baseline. Infinite when the munition alone makes
    /// the kill possible.
    pub time_saved: f64,
}

/// Solo-run every weapon group against the profile.
pub fn analyze_weapons(profile: &DefenseProfile, sources: &DamageSources) -> Vec<WeaponReport> {
    sources
        .continuous
        .iter()
        .map(|group| {
            let solo = resolve(profile, &sources.solo_weapon(&group.weapon.id));
            // A weapon with zero bypass can never hurt a shield that
            // out-regenerates it; bypass-capable guns always make progress.
            let ineffective = !solo.shields_breakable && solo.passthrough_dps <= 0.0;
            WeaponReport {
                weapon: group.weapon.id.clone(),
                display_name: group.weapon.display_name.clone(),
                count: group.count,
                dps_contribution: group.dps,
                shield_dps: solo.shield_dps,
                passthrough_dps: solo.passthrough_dps,
                armor_dps: armor_rate(&group.dps, profile),
                hull_dps: group.dps.total(),
                shield_time: solo.shield_time,
                armor_time: solo.armor_time,
                hull_time: solo.hull_time,
                solo_ttk: solo.total_ttk,
                is_effective: !ineffective,
                ineffective_reason: ineffective.then(|| {
                    "shield regeneration exceeds the absorbed rate and no damage bypasses"
                        .to_string()
                }),
            }
        })
        .collect()
}

/// Pairwise-removal time-saved for every munition group.
pub fn analyze_munitions(profile: &DefenseProfile, sources: &DamageSources) -> Vec<MunitionReport> {
    if sources.discrete.is_empty() {
        return Vec::new();
    }
    let full_ttk = resolve(profile, sources).total_ttk;
    sources
        .discrete
        .iter()
        .map(|group| {
            let reduced = resolve(profile, &sources.without_munition(&group.munition.id));
            MunitionReport {
                munition: group.munition.id.clone(),
                display_name: group.munition.display_name.clone(),
                count: group.count,
                damage_contribution: group.damage,
                time_saved: time_saved(full_ttk, reduced.total_ttk),
            }
        })
        .collect()
}

/// ∞ − ∞ is taken as zero: a munition saves nothing when the target is
/// unkillable either way. Sub-epsilon negatives from float noise clamp to 0.
fn time_saved(full_ttk: f64, reduced_ttk: f64) -> f64 {
    if reduced_ttk.is_infinite() && full_ttk.is_infinite() {
        0.0
    } else {
        (reduced_ttk - full_ttk).max(0.0)
    }
}
