use super::*;
use crate::test_fixtures::fixture_ballistic_weapon;
use crate::{CategoryMask, HardpointCategory};

#[test]
fn disabled_slots_and_categories_contribute_nothing() {
    let tables = fixture_tables();
    let mut slot_off = weapon_entry("wpn_test_cannon", 2);
    slot_off.enabled = false;
    let turret = {
        let mut entry = weapon_entry("wpn_test_repeater", 1);
        entry.category = HardpointCategory::MannedTurret;
        entry
    };
    let mask = CategoryMask::all_enabled().with_disabled(HardpointCategory::MannedTurret);

    let sources = aggregate_loadout(&[slot_off, turret], &mask, &neutral_scenario(), &tables);
    assert!(sources.continuous.is_empty());
    assert!(sources.dropped.is_empty());
}

#[test]
fn unresolved_references_are_dropped_not_fatal() {
    let tables = fixture_tables();
    let entries = [
        weapon_entry("wpn_test_cannon", 1),
        weapon_entry("wpn_does_not_exist", 2),
        munition_entry("msl_does_not_exist", 1),
    ];
    let sources = sources_for(&entries, &neutral_scenario(), &tables);

    assert_eq!(sources.continuous.len(), 1);
    assert!(sources.discrete.is_empty());
    assert_eq!(
        sources.dropped,
        vec!["wpn_does_not_exist".to_string(), "msl_does_not_exist".to_string()]
    );
}

#[test]
fn scenario_scalars_compose_multiplicatively() {
    let tables = fixture_tables();
    let scenario = CombatScenario {
        mount_accuracy: 0.75,
        scenario_accuracy: 0.75,
        time_on_target: 0.65,
        fire_mode: 1.0,
        power_multiplier: 1.0,
    };
    let sources = sources_for(&[weapon_entry("wpn_test_cannon", 2)], &scenario, &tables);

    // 1000 DPS × 2 barrels × 0.75 × 0.75 × 0.65
    assert_close(sources.continuous_dps().physical, 731.25, 1e-9);
    assert_close(sources.continuous_dps().energy, 0.0, 1e-12);
}

#[test]
fn out_of_range_scenario_scalars_are_clamped() {
    let tables = fixture_tables();
    let inflated = CombatScenario {
        mount_accuracy: 3.0, // clamps to 1
        scenario_accuracy: 1.0,
        time_on_target: 1.0,
        fire_mode: 1.0,
        power_multiplier: 1.0,
    };
    let sources = sources_for(&[weapon_entry("wpn_test_cannon", 1)], &inflated, &tables);
    assert_close(sources.continuous_dps().physical, 1000.0, 1e-9);

    let poisoned = CombatScenario {
        mount_accuracy: f64::NAN,
        ..neutral_scenario()
    };
    let sources = sources_for(&[weapon_entry("wpn_test_cannon", 1)], &poisoned, &tables);
    assert_close(sources.continuous_dps().total(), 0.0, 1e-12);
}

#[test]
fn same_weapon_across_hardpoints_merges_into_one_group() {
    let tables = fixture_tables();
    let entries = [
        weapon_entry("wpn_test_cannon", 1),
        weapon_entry("wpn_test_cannon", 2),
    ];
    let sources = sources_for(&entries, &neutral_scenario(), &tables);

    assert_eq!(sources.continuous.len(), 1);
    assert_eq!(sources.continuous[0].count, 3);
    assert_close(sources.continuous[0].dps.physical, 3000.0, 1e-9);
}

#[test]
fn zero_weight_weapon_contributes_no_damage() {
    let mut tables = fixture_tables();
    let mut inert = fixture_ballistic_weapon();
    inert.id = crate::WeaponId("wpn_test_inert".to_string());
    inert.damage_weights = DamageVector::ZERO;
    tables.weapons.insert(inert.id.clone(), inert);

    let sources = sources_for(&[weapon_entry("wpn_test_inert", 4)], &neutral_scenario(), &tables);
    assert_eq!(sources.continuous.len(), 1);
    assert_close(sources.continuous[0].dps.total(), 0.0, 1e-12);
}

#[test]
fn munitions_scale_per_shot_damage_by_count() {
    let tables = fixture_tables();
    let sources = sources_for(&[munition_entry("msl_test_strike", 2)], &neutral_scenario(), &tables);

    assert_eq!(sources.discrete.len(), 1);
    assert_close(sources.burst_damage().physical, 5000.0, 1e-9);
    // One-shot damage never leaks into the continuous rate.
    assert_close(sources.continuous_dps().total(), 0.0, 1e-12);
}

#[test]
fn ship_exclusive_weapon_aggregates_like_any_other_gun() {
    let mut tables = fixture_tables();
    let mut fixed = fixture_ballistic_weapon();
    fixed.id = crate::WeaponId("wpn_test_spinal".to_string());
    fixed.ship_exclusive = true;
    tables.weapons.insert(fixed.id.clone(), fixed);

    let sources = sources_for(&[weapon_entry("wpn_test_spinal", 1)], &neutral_scenario(), &tables);
    assert_eq!(sources.continuous.len(), 1);
    assert_close(sources.continuous_dps().physical, 1000.0, 1e-9);
}

#[test]
fn mixed_weapon_splits_dps_by_weight_proportions() {
    let mut tables = fixture_tables();
    let mut mixed = fixture_ballistic_weapon();
    mixed.id = crate::WeaponId("wpn_test_mixed".to_string());
    mixed.damage_weights = DamageVector {
        physical: 3.0,
        energy: 1.0,
        distortion: 0.0,
    };
    tables.weapons.insert(mixed.id.clone(), mixed);

    let sources = sources_for(&[weapon_entry("wpn_test_mixed", 1)], &neutral_scenario(), &tables);
    let dps = sources.continuous_dps();
    assert_close(dps.physical, 750.0, 1e-9);
    assert_close(dps.energy, 250.0, 1e-9);
    assert_close(dps.total(), 1000.0, 1e-9);
}
