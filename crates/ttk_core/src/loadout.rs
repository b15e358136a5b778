//! Loadout aggregation.
//!
//! Turns ordered hardpoint entries plus scenario modifiers into a continuous
//! damage-rate vector and a discrete one-shot vector, grouped per item so
//! the effectiveness analyzer can attribute results back to their source.
//! Enablement (category toggle × slot toggle) and reference resolution both
//! happen here, once — the resolver never re-checks them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::{
    CombatScenario, DamageVector, ItemTables, Munition, MunitionId, Weapon, WeaponId,
};

// ---------------------------------------------------------------------------
// Entries and enablement
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardpointCategory {
    Pilot,
    MannedTurret,
    RemoteTurret,
    PointDefense,
    Specialized,
    Missile,
    Torpedo,
    Bomb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemRef {
    Weapon(WeaponId),
    Munition(MunitionId),
}

impl ItemRef {
    fn label(&self) -> &str {
        match self {
            Self::Weapon(id) => &id.0,
            Self::Munition(id) => &id.0,
        }
    }
}

/// One hardpoint slot: what is mounted, how many barrels, and whether the
/// slot itself is toggled on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadoutEntry {
    pub hardpoint: String,
    pub category: HardpointCategory,
    pub item: ItemRef,
    pub count: u32,
    pub enabled: bool,
}

/// Category-level toggles. All categories are enabled unless listed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryMask {
    disabled: Vec<HardpointCategory>,
}

impl CategoryMask {
    pub fn all_enabled() -> Self {
        Self::default()
    }

    pub fn with_disabled(mut self, category: HardpointCategory) -> Self {
        if !self.disabled.contains(&category) {
            self.disabled.push(category);
        }
        self
    }

    pub fn allows(&self, category: HardpointCategory) -> bool {
        !self.disabled.contains(&category)
    }
}

/// A resolved hardpoint item. Locked weapons are ship-exclusive fixed guns;
/// they aggregate exactly like swappable continuous weapons.
#[derive(Debug, Clone)]
pub enum EquippedItem {
    Continuous(Weapon),
    Discrete(Munition),
    Locked(Weapon),
}

fn resolve_entry(entry: &LoadoutEntry, tables: &ItemTables) -> Option<EquippedItem> {
    match &entry.item {
        ItemRef::Weapon(id) => tables.weapons.get(id).map(|weapon| {
            if weapon.ship_exclusive {
                EquippedItem::Locked(weapon.clone())
            } else {
                EquippedItem::Continuous(weapon.clone())
            }
        }),
        ItemRef::Munition(id) => tables
            .munitions
            .get(id)
            .map(|munition| EquippedItem::Discrete(munition.clone())),
    }
}

// ---------------------------------------------------------------------------
// Aggregated damage sources
// ---------------------------------------------------------------------------

/// A distinct weapon across all hardpoints carrying it, with its share of
/// the effective DPS already split by the weapon's damage weights.
#[derive(Debug, Clone)]
pub struct WeaponGroup {
    pub weapon: Weapon,
    pub count: u32,
    pub dps: DamageVector,
}

/// A distinct munition with its combined one-shot damage.
#[derive(Debug, Clone)]
pub struct MunitionGroup {
    pub munition: Munition,
    pub count: u32,
    pub damage: DamageVector,
}

#[derive(Debug, Clone, Default)]
pub struct DamageSources {
    pub continuous: SmallVec<[WeaponGroup; 8]>,
    pub discrete: SmallVec<[MunitionGroup; 4]>,
    /// Item ids that failed to resolve and were dropped from the aggregate.
    pub dropped: Vec<String>,
}

impl DamageSources {
    pub fn continuous_dps(&self) -> DamageVector {
        let mut total = DamageVector::ZERO;
        for group in &self.continuous {
            total.accumulate(&group.dps);
        }
        total
    }

    pub fn burst_damage(&self) -> DamageVector {
        let mut total = DamageVector::ZERO;
        for group in &self.discrete {
            total.accumulate(&group.damage);
        }
        total
    }

    /// Just this weapon group firing: no other weapons, no munitions.
    pub fn solo_weapon(&self, id: &WeaponId) -> Self {
        Self {
            continuous: self
                .continuous
                .iter()
                .filter(|group| &group.weapon.id == id)
                .cloned()
                .collect(),
            discrete: SmallVec::new(),
            dropped: Vec::new(),
        }
    }

    /// The full loadout minus one munition group (pairwise-removal baseline).
    pub fn without_munition(&self, id: &MunitionId) -> Self {
        Self {
            continuous: self.continuous.clone(),
            discrete: self
                .discrete
                .iter()
                .filter(|group| &group.munition.id != id)
                .cloned()
                .collect(),
            dropped: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Aggregate enabled entries into damage sources.
///
/// Scenario scalars are clamped here (the aggregation boundary) and nowhere
/// else. Unresolved references are dropped and recorded, never fatal.
pub fn aggregate_loadout(
    entries: &[LoadoutEntry],
    mask: &CategoryMask,
    scenario: &CombatScenario,
    tables: &ItemTables,
) -> DamageSources {
    let multiplier = scenario.dps_multiplier();
    let mut sources = DamageSources::default();

    for entry in entries {
        if !entry.enabled || !mask.allows(entry.category) || entry.count == 0 {
            continue;
        }
        let Some(item) = resolve_entry(entry, tables) else {
            sources.dropped.push(entry.item.label().to_string());
            continue;
        };
        match item {
            EquippedItem::Continuous(weapon) | EquippedItem::Locked(weapon) => {
                let dps = weapon_dps(&weapon, entry.count, multiplier);
                merge_weapon(&mut sources.continuous, weapon, entry.count, dps);
            }
            EquippedItem::Discrete(munition) => {
                let damage = munition.damage.scaled(f64::from(entry.count));
                merge_munition(&mut sources.discrete, munition, entry.count, damage);
            }
        }
    }

    sources
}

/// Effective DPS for `count` barrels of one weapon, distributed across
/// damage types by the weapon's own weight proportions.
fn weapon_dps(weapon: &Weapon, count: u32, multiplier: f64) -> DamageVector {
    let weight_total = weapon.damage_weights.total();
    if weight_total <= 0.0 || weapon.sustained_dps <= 0.0 {
        return DamageVector::ZERO;
    }
    let effective = weapon.sustained_dps * f64::from(count) * multiplier;
    weapon.damage_weights.scaled(effective / weight_total)
}

fn merge_weapon(
    groups: &mut SmallVec<[WeaponGroup; 8]>,
    weapon: Weapon,
    count: u32,
    dps: DamageVector,
) {
    if let Some(group) = groups.iter_mut().find(|g| g.weapon.id == weapon.id) {
        group.count += count;
        group.dps.accumulate(&dps);
    } else {
        groups.push(WeaponGroup { weapon, count, dps });
    }
}

fn merge_munition(
    groups: &mut SmallVec<[MunitionGroup; 4]>,
    munition: Munition,
    count: u32,
    damage: DamageVector,
) {
    if let Some(group) = groups.iter_mut().find(|g| g.munition.id == munition.id) {
        group.count += count;
        group.damage.accumulate(&damage);
    } else {
        groups.push(MunitionGroup {
            munition,
            count,
            damage,
        });
    }
}
