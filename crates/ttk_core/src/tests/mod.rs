use crate::test_fixtures::{
    all_categories, fixture_energy_weapon, fixture_missile, fixture_shield, fixture_ship,
    fixture_tables, munition_entry, neutral_scenario, weapon_entry,
};
use crate::{
    aggregate_loadout, CombatScenario, DamageSources, DamageVector, DefenseProfile, ItemTables,
    LoadoutEntry, ZoneModifiers,
};

mod loadout;

// --- Shared test helpers ------------------------------------------------

fn sources_for(
    entries: &[LoadoutEntry],
    scenario: &CombatScenario,
    tables: &ItemTables,
) -> DamageSources {
    aggregate_loadout(entries, &all_categories(), scenario, tables)
}

/// Fully exposed zone — pools flow through unscaled.
fn full_exposure() -> ZoneModifiers {
    ZoneModifiers {
        hull: 1.0,
        armor: 1.0,
        thruster: 1.0,
        component: 1.0,
    }
}

/// A bare target: 500 armor, 2000 hull, no components, no resistances,
/// one shield slot.
fn bare_target() -> crate::Ship {
    let mut ship = fixture_ship();
    ship.hull_hp = 2000.0;
    ship.armor_hp = 500.0;
    ship.armor_resistance = DamageVector::splat(1.0);
    ship.thruster_hp = 0.0;
    ship.powerplant_hp = 0.0;
    ship.cooler_hp = 0.0;
    ship.shield_generator_hp = 0.0;
    ship.shield_slots = 1;
    ship
}

/// A 30%-absorption, no-regen, unit-resistance shield.
fn porous_shield() -> crate::Shield {
    let mut shield = fixture_shield();
    shield.max_hp = 1000.0;
    shield.regen_per_s = 0.0;
    shield.absorption.physical = 0.3;
    shield.resistance = DamageVector::splat(1.0);
    shield
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
}
