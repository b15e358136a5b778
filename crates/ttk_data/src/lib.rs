//! Table loading and validation shared between the CLI and any other front
//! end. Reads the JSON item tables from a data directory into the immutable
//! record maps `ttk_core` consumes.

use std::cmp::Ordering;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use ttk_core::{ItemTables, Munition, Shield, Ship, Weapon};

#[derive(Deserialize)]
struct ShipsFile {
    ships: Vec<Ship>,
}

#[derive(Deserialize)]
struct WeaponsFile {
    weapons: Vec<Weapon>,
}

#[derive(Deserialize)]
struct ShieldsFile {
    shields: Vec<Shield>,
}

#[derive(Deserialize)]
struct MunitionsFile {
    munitions: Vec<Munition>,
}

/// Load `ships.json`, `weapons.json`, `shields.json` and (optionally)
/// `munitions.json` from `data_dir`, then validate cross-references.
pub fn load_tables(data_dir: &Path) -> Result<ItemTables> {
    let ships_file: ShipsFile = read_json(data_dir, "ships.json")?;
    let weapons_file: WeaponsFile = read_json(data_dir, "weapons.json")?;
    let shields_file: ShieldsFile = read_json(data_dir, "shields.json")?;

    let mut tables = ItemTables::default();
    for ship in ships_file.ships {
        let id = ship.id.clone();
        let previous = tables.ships.insert(id.clone(), ship);
        assert!(previous.is_none(), "duplicate ship id '{id}' in ships.json");
    }
    for weapon in weapons_file.weapons {
        let id = weapon.id.clone();
        let previous = tables.weapons.insert(id.clone(), weapon);
        assert!(
            previous.is_none(),
            "duplicate weapon id '{id}' in weapons.json"
        );
    }
    for shield in shields_file.shields {
        let id = shield.id.clone();
        let previous = tables.shields.insert(id.clone(), shield);
        assert!(
            previous.is_none(),
            "duplicate shield id '{id}' in shields.json"
        );
    }

    // Munitions are optional — a table set without ordnance is still usable.
    if data_dir.join("munitions.json").exists() {
        let munitions_file: MunitionsFile = read_json(data_dir, "munitions.json")?;
        for munition in munitions_file.munitions {
            let id = munition.id.clone();
            let previous = tables.munitions.insert(id.clone(), munition);
            assert!(
                previous.is_none(),
                "duplicate munition id '{id}' in munitions.json"
            );
        }
    }

    validate_tables(&tables);
    Ok(tables)
}

fn read_json<T: serde::de::DeserializeOwned>(dir: &Path, name: &str) -> Result<T> {
    let path = dir.join(name);
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Validates loaded tables, panicking on any authoring error.
///
/// Catches mistakes like: a ship default-shield reference that doesn't
/// exist, negative HP pools, damage weights below zero, or absorption
/// fractions outside [0, 1].
pub fn validate_tables(tables: &ItemTables) {
    for ship in tables.ships.values() {
        if let Some(shield_ref) = &ship.default_shield {
            assert!(
                tables.shields.contains_key(shield_ref),
                "ship '{}' default shield '{}' is not a known shield id",
                ship.id,
                shield_ref,
            );
        }
        for (label, pool) in [
            ("hull_hp", ship.hull_hp),
            ("armor_hp", ship.armor_hp),
            ("thruster_hp", ship.thruster_hp),
            ("powerplant_hp", ship.powerplant_hp),
            ("cooler_hp", ship.cooler_hp),
            ("shield_generator_hp", ship.shield_generator_hp),
        ] {
            assert!(
                pool >= 0.0,
                "ship '{}' has negative {label} ({pool})",
                ship.id,
            );
        }
        assert!(
            vector_non_negative(&ship.armor_resistance),
            "ship '{}' has a negative armor resistance multiplier",
            ship.id,
        );
    }

    for weapon in tables.weapons.values() {
        assert!(
            weapon.sustained_dps >= 0.0,
            "weapon '{}' has negative sustained DPS",
            weapon.id,
        );
        assert!(
            vector_non_negative(&weapon.damage_weights),
            "weapon '{}' has a negative damage weight",
            weapon.id,
        );
    }

    for shield in tables.shields.values() {
        assert!(
            shield.max_hp >= 0.0 && shield.regen_per_s >= 0.0,
            "shield '{}' has negative HP or regen",
            shield.id,
        );
        for fraction in [
            shield.absorption.physical,
            shield.absorption.energy,
            shield.absorption.distortion,
        ] {
            assert!(
                (0.0..=1.0).contains(&fraction),
                "shield '{}' absorption fraction {fraction} is outside [0, 1]",
                shield.id,
            );
        }
        assert!(
            vector_non_negative(&shield.resistance),
            "shield '{}' has a negative resistance multiplier",
            shield.id,
        );
    }

    for munition in tables.munitions.values() {
        assert!(
            vector_non_negative(&munition.damage),
            "munition '{}' has negative damage",
            munition.id,
        );
    }
}

fn vector_non_negative(vector: &ttk_core::DamageVector) -> bool {
    vector.physical >= 0.0 && vector.energy >= 0.0 && vector.distortion >= 0.0
}

// ---------------------------------------------------------------------------
// Query helpers for front ends
// ---------------------------------------------------------------------------

/// Ships sorted by display name.
pub fn ships_sorted(tables: &ItemTables) -> Vec<&Ship> {
    let mut ships: Vec<&Ship> = tables.ships.values().collect();
    ships.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    ships
}

/// Weapons of one size class, highest sustained DPS first.
pub fn weapons_by_size(tables: &ItemTables, size: u8) -> Vec<&Weapon> {
    let mut weapons: Vec<&Weapon> = tables
        .weapons
        .values()
        .filter(|w| w.size == size)
        .collect();
    weapons.sort_by(|a, b| descending(a.sustained_dps, b.sustained_dps));
    weapons
}

/// Shields of one size class, highest pool first.
pub fn shields_by_size(tables: &ItemTables, size: u8) -> Vec<&Shield> {
    let mut shields: Vec<&Shield> = tables
        .shields
        .values()
        .filter(|s| s.size == size)
        .collect();
    shields.sort_by(|a, b| descending(a.max_hp, b.max_hp));
    shields
}

/// Munitions of one size class, heaviest combined warhead first.
pub fn munitions_by_size(tables: &ItemTables, size: u8) -> Vec<&Munition> {
    let mut munitions: Vec<&Munition> = tables
        .munitions
        .values()
        .filter(|m| m.size == size)
        .collect();
    munitions.sort_by(|a, b| descending(a.damage.total(), b.damage.total()));
    munitions
}

pub fn weapon_by_display_name<'a>(tables: &'a ItemTables, name: &str) -> Option<&'a Weapon> {
    tables.weapons.values().find(|w| w.display_name == name)
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttk_core::test_fixtures::{fixture_shield, fixture_ship, fixture_tables};
    use ttk_core::ShieldId;

    const SHIPS_JSON: &str = r#"{
        "ships": [{
            "id": "ship_aurora",
            "display_name": "Aurora",
            "hull_hp": 4000.0,
            "armor_hp": 1500.0,
            "armor_resistance": { "physical": 0.85, "energy": 1.3, "distortion": 1.0 },
            "thruster_hp": 600.0,
            "powerplant_hp": 400.0,
            "cooler_hp": 200.0,
            "shield_generator_hp": 300.0,
            "shield_slots": 2,
            "max_shield_size": 1,
            "default_shield": "shld_palisade"
        }]
    }"#;

    const WEAPONS_JSON: &str = r#"{
        "weapons": [{
            "id": "wpn_gatling",
            "display_name": "Gatling",
            "size": 2,
            "sustained_dps": 650.0,
            "power_draw": 30.0,
            "damage_weights": { "physical": 1.0, "energy": 0.0, "distortion": 0.0 }
        }]
    }"#;

    const SHIELDS_JSON: &str = r#"{
        "shields": [{
            "id": "shld_palisade",
            "display_name": "Palisade",
            "size": 1,
            "max_hp": 6000.0,
            "regen_per_s": 250.0,
            "absorption": { "physical": 0.225, "energy": 1.0, "distortion": 1.0 },
            "resistance": { "physical": 0.875, "energy": 1.3, "distortion": 0.15 }
        }]
    }"#;

    const MUNITIONS_JSON: &str = r#"{
        "munitions": [{
            "id": "msl_rattler",
            "display_name": "Rattler",
            "size": 2,
            "kind": "missile",
            "damage": { "physical": 1800.0, "energy": 0.0, "distortion": 0.0 }
        }]
    }"#;

    fn write_table_dir(with_munitions: bool) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ships.json"), SHIPS_JSON).unwrap();
        std::fs::write(dir.path().join("weapons.json"), WEAPONS_JSON).unwrap();
        std::fs::write(dir.path().join("shields.json"), SHIELDS_JSON).unwrap();
        if with_munitions {
            std::fs::write(dir.path().join("munitions.json"), MUNITIONS_JSON).unwrap();
        }
        dir
    }

    #[test]
    fn loads_a_complete_table_directory() {
        let dir = write_table_dir(true);
        let tables = load_tables(dir.path()).unwrap();
        assert_eq!(tables.ships.len(), 1);
        assert_eq!(tables.weapons.len(), 1);
        assert_eq!(tables.shields.len(), 1);
        assert_eq!(tables.munitions.len(), 1);

        let ship = ships_sorted(&tables)[0];
        assert_eq!(ship.display_name, "Aurora");
        assert_eq!(
            ship.default_shield,
            Some(ShieldId("shld_palisade".to_string()))
        );
    }

    #[test]
    fn munitions_file_is_optional() {
        let dir = write_table_dir(false);
        let tables = load_tables(dir.path()).unwrap();
        assert!(tables.munitions.is_empty());
    }

    #[test]
    fn missing_required_file_is_a_context_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ships.json"), SHIPS_JSON).unwrap();
        let err = load_tables(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("weapons.json"));
    }

    #[test]
    fn valid_fixture_tables_pass_validation() {
        validate_tables(&fixture_tables()); // should not panic
    }

    #[test]
    #[should_panic(expected = "not a known shield id")]
    fn unknown_default_shield_panics() {
        let mut tables = fixture_tables();
        let mut ship = fixture_ship();
        ship.default_shield = Some(ShieldId("shld_missing".to_string()));
        tables.ships.insert(ship.id.clone(), ship);
        validate_tables(&tables);
    }

    #[test]
    #[should_panic(expected = "negative hull_hp")]
    fn negative_hull_pool_panics() {
        let mut tables = fixture_tables();
        let mut ship = fixture_ship();
        ship.hull_hp = -1.0;
        tables.ships.insert(ship.id.clone(), ship);
        validate_tables(&tables);
    }

    #[test]
    #[should_panic(expected = "outside [0, 1]")]
    fn absorption_above_one_panics() {
        let mut tables = fixture_tables();
        let mut shield = fixture_shield();
        shield.absorption.physical = 1.4;
        tables.shields.insert(shield.id.clone(), shield);
        validate_tables(&tables);
    }

    #[test]
    fn size_queries_sort_by_strength() {
        let dir = write_table_dir(true);
        let tables = load_tables(dir.path()).unwrap();
        assert_eq!(weapons_by_size(&tables, 2)[0].id.0, "wpn_gatling");
        assert!(weapons_by_size(&tables, 4).is_empty());
        assert_eq!(shields_by_size(&tables, 1)[0].id.0, "shld_palisade");
        assert_eq!(munitions_by_size(&tables, 2)[0].id.0, "msl_rattler");
        assert!(weapon_by_display_name(&tables, "Gatling").is_some());
        assert!(weapon_by_display_name(&tables, "Ghost").is_none());
    }
}
