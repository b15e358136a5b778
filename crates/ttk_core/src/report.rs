//! Result aggregation — the one entry point the UI/CLI collaborator calls.
//!
//! Resolves the target and shield from the passed-in tables, runs the
//! pipeline (profile → aggregate → resolve → attribute), and packages a
//! single serializable result.

use serde::{Deserialize, Serialize};

use crate::effectiveness::{analyze_munitions, analyze_weapons, MunitionReport, WeaponReport};
use crate::loadout::{aggregate_loadout, CategoryMask, LoadoutEntry};
use crate::profile::DefenseProfile;
use crate::resolver::resolve;
use crate::types::{
    CombatScenario, DamageVector, ItemTables, Shield, ShieldId, ShipId, ZoneModifiers,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementRequest {
    pub target: ShipId,
    /// Explicit shield choice; `None` falls back to the ship's default
    /// shield reference, which may itself be absent.
    pub shield: Option<ShieldId>,
    pub zone: ZoneModifiers,
    pub scenario: CombatScenario,
    pub loadout: Vec<LoadoutEntry>,
    pub categories: CategoryMask,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculationResult {
    pub target: ShipId,
    pub shield: Option<ShieldId>,
    pub total_ttk: f64,
    pub shield_time: f64,
    pub armor_time: f64,
    pub hull_time: f64,
    pub shields_breakable: bool,
    pub shield_failover_phases: u32,
    pub effective_dps: f64,
    pub shield_dps: f64,
    pub passthrough_dps: f64,
    pub damage_breakdown: DamageVector,
    pub armor_damage_during_shields: f64,
    pub weapons: Vec<WeaponReport>,
    pub munitions: Vec<MunitionReport>,
    /// References that failed to resolve and were dropped, in input order.
    pub dropped_references: Vec<String>,
}

/// Run a full calculation. Returns `None` only when the target ship id is
/// unknown — every other missing reference degrades and is reported in
/// `dropped_references`.
pub fn calculate(tables: &ItemTables, request: &EngagementRequest) -> Option<CalculationResult> {
    let ship = tables.ships.get(&request.target)?;

    let mut dropped = Vec::new();
    let shield = resolve_shield(tables, request, ship.default_shield.as_ref(), &mut dropped);

    let profile = DefenseProfile::build(ship, shield, request.zone);
    let mut sources =
        aggregate_loadout(&request.loadout, &request.categories, &request.scenario, tables);
    dropped.append(&mut sources.dropped);

    let phases = resolve(&profile, &sources);
    let weapons = analyze_weapons(&profile, &sources);
    let munitions = analyze_munitions(&profile, &sources);

    Some(CalculationResult {
        target: ship.id.clone(),
        shield: shield.map(|s| s.id.clone()),
        total_ttk: phases.total_ttk,
        shield_time: phases.shield_time,
        armor_time: phases.armor_time,
        hull_time: phases.hull_time,
        shields_breakable: phases.shields_breakable,
        shield_failover_phases: phases.shield_failover_phases,
        effective_dps: phases.effective_dps,
        shield_dps: phases.shield_dps,
        passthrough_dps: phases.passthrough_dps,
        damage_breakdown: phases.damage_breakdown,
        armor_damage_during_shields: phases.armor_damage_during_shields,
        weapons,
        munitions,
        dropped_references: dropped,
    })
}

fn resolve_shield<'a>(
    tables: &'a ItemTables,
    request: &EngagementRequest,
    default_shield: Option<&ShieldId>,
    dropped: &mut Vec<String>,
) -> Option<&'a Shield> {
    let wanted = request.shield.as_ref().or(default_shield)?;
    let found = tables.shields.get(wanted);
    if found.is_none() {
        dropped.push(wanted.0.clone());
    }
    found
}
