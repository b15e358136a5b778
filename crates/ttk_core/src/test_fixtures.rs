//! Shared test fixtures for ttk_core and downstream crates.
//!
//! `fixture_tables()` provides a small coherent item set: a two-slot fighter,
//! a ballistic and an energy repeater, a strike missile, and a mid-tier
//! shield with ballistic passthrough. Individual `fixture_*` constructors
//! are exposed for tests that mutate one record.

use crate::loadout::{CategoryMask, HardpointCategory, ItemRef, LoadoutEntry};
use crate::types::{
    CombatScenario, DamageVector, ItemTables, Munition, MunitionId, MunitionKind, PenetrationCone,
    Shield, ShieldId, Ship, ShipId, Weapon, WeaponId,
};

pub fn fixture_ship() -> Ship {
    Ship {
        id: ShipId("ship_test_fighter".to_string()),
        display_name: "Test Fighter".to_string(),
        hull_hp: 5000.0,
        armor_hp: 3000.0,
        armor_resistance: DamageVector {
            physical: 0.85,
            energy: 1.30,
            distortion: 1.0,
        },
        thruster_hp: 900.0,
        turret_hp: 0.0,
        powerplant_hp: 500.0,
        cooler_hp: 300.0,
        shield_generator_hp: 400.0,
        quantum_drive_hp: 300.0,
        shield_slots: 2,
        max_shield_size: 2,
        default_shield: Some(ShieldId("shld_test_bulwark".to_string())),
    }
}

pub fn fixture_shield() -> Shield {
    Shield {
        id: ShieldId("shld_test_bulwark".to_string()),
        display_name: "Test Bulwark".to_string(),
        size: 2,
        max_hp: 10_000.0,
        regen_per_s: 500.0,
        absorption: DamageVector {
            physical: 0.225,
            energy: 1.0,
            distortion: 1.0,
        },
        resistance: DamageVector {
            physical: 0.875,
            energy: 1.30,
            distortion: 0.15,
        },
        regen_delay_s: 6.0,
    }
}

pub fn fixture_ballistic_weapon() -> Weapon {
    Weapon {
        id: WeaponId("wpn_test_cannon".to_string()),
        display_name: "Test Ballistic Cannon".to_string(),
        size: 3,
        sustained_dps: 1000.0,
        power_draw: 40.0,
        damage_weights: DamageVector {
            physical: 1.0,
            energy: 0.0,
            distortion: 0.0,
        },
        penetration: PenetrationCone {
            base_distance_m: 2.0,
            near_radius_m: 0.1,
            far_radius_m: 0.2,
        },
        ship_exclusive: false,
    }
}

pub fn fixture_energy_weapon() -> Weapon {
    Weapon {
        id: WeaponId("wpn_test_repeater".to_string()),
        display_name: "Test Laser Repeater".to_string(),
        size: 3,
        sustained_dps: 800.0,
        power_draw: 220.0,
        damage_weights: DamageVector {
            physical: 0.0,
            energy: 1.0,
            distortion: 0.0,
        },
        penetration: PenetrationCone::default(),
        ship_exclusive: false,
    }
}

pub fn fixture_missile() -> Munition {
    Munition {
        id: MunitionId("msl_test_strike".to_string()),
        display_name: "Test Strike Missile".to_string(),
        size: 3,
        kind: MunitionKind::Missile,
        damage: DamageVector {
            physical: 2500.0,
            energy: 0.0,
            distortion: 0.0,
        },
        arm_time_s: 1.5,
        lock_time_s: 2.0,
        explosion_min_radius_m: 3.0,
        explosion_max_radius_m: 12.0,
    }
}

pub fn fixture_tables() -> ItemTables {
    let mut tables = ItemTables::default();
    let ship = fixture_ship();
    tables.ships.insert(ship.id.clone(), ship);
    let shield = fixture_shield();
    tables.shields.insert(shield.id.clone(), shield);
    for weapon in [fixture_ballistic_weapon(), fixture_energy_weapon()] {
        tables.weapons.insert(weapon.id.clone(), weapon);
    }
    let missile = fixture_missile();
    tables.munitions.insert(missile.id.clone(), missile);
    tables
}

/// All five scenario scalars at 1.0 — raw stats flow straight through.
pub fn neutral_scenario() -> CombatScenario {
    CombatScenario {
        mount_accuracy: 1.0,
        scenario_accuracy: 1.0,
        time_on_target: 1.0,
        fire_mode: 1.0,
        power_multiplier: 1.0,
    }
}

pub fn weapon_entry(id: &str, count: u32) -> LoadoutEntry {
    LoadoutEntry {
        hardpoint: format!("hardpoint_nose_{id}"),
        category: HardpointCategory::Pilot,
        item: ItemRef::Weapon(WeaponId(id.to_string())),
        count,
        enabled: true,
    }
}

pub fn munition_entry(id: &str, count: u32) -> LoadoutEntry {
    LoadoutEntry {
        hardpoint: format!("hardpoint_wing_{id}"),
        category: HardpointCategory::Missile,
        item: ItemRef::Munition(MunitionId(id.to_string())),
        count,
        enabled: true,
    }
}

pub fn all_categories() -> CategoryMask {
    CategoryMask::all_enabled()
}
