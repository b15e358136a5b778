//! Type definitions for `ttk_core`.
//!
//! Static item records (ships, weapons, shields, munitions), the scenario
//! and zone inputs, and the damage-type vector shared by everything else.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

pub type RecordMap<K, V> = ahash::AHashMap<K, V>;

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(ShipId);
string_id!(WeaponId);
string_id!(ShieldId);
string_id!(MunitionId);

// ---------------------------------------------------------------------------
// Damage types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Physical,
    Energy,
    Distortion,
}

impl DamageType {
    /// Fixed application order — keeps pool-overflow arithmetic deterministic.
    pub const ALL: [Self; 3] = [Self::Physical, Self::Energy, Self::Distortion];
}

/// Per-damage-type triple. Used for damage amounts and rates, and for
/// per-type coefficient tables (absorption, resistance).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DamageVector {
    pub physical: f64,
    pub energy: f64,
    pub distortion: f64,
}

impl DamageVector {
    pub const ZERO: Self = Self {
        physical: 0.0,
        energy: 0.0,
        distortion: 0.0,
    };

    pub fn splat(value: f64) -> Self {
        Self {
            physical: value,
            energy: value,
            distortion: value,
        }
    }

    pub fn total(&self) -> f64 {
        self.physical + self.energy + self.distortion
    }

    pub fn component(&self, kind: DamageType) -> f64 {
        match kind {
            DamageType::Physical => self.physical,
            DamageType::Energy => self.energy,
            DamageType::Distortion => self.distortion,
        }
    }

    pub fn set(&mut self, kind: DamageType, value: f64) {
        match kind {
            DamageType::Physical => self.physical = value,
            DamageType::Energy => self.energy = value,
            DamageType::Distortion => self.distortion = value,
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            physical: self.physical * factor,
            energy: self.energy * factor,
            distortion: self.distortion * factor,
        }
    }

    pub fn accumulate(&mut self, other: &Self) {
        self.physical += other.physical;
        self.energy += other.energy;
        self.distortion += other.distortion;
    }
}

// ---------------------------------------------------------------------------
// Item records
// ---------------------------------------------------------------------------

/// Penetration cone descriptors. Carried as data for the UI collaborator;
/// the resolver itself does not consume them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PenetrationCone {
    pub base_distance_m: f64,
    pub near_radius_m: f64,
    pub far_radius_m: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub id: WeaponId,
    pub display_name: String,
    pub size: u8,
    pub sustained_dps: f64,
    pub power_draw: f64,
    /// Relative damage-type weights; the aggregator normalizes them when
    /// distributing effective DPS.
    pub damage_weights: DamageVector,
    #[serde(default)]
    pub penetration: PenetrationCone,
    /// Fixed to a specific hull; resolves to `EquippedItem::Locked`.
    #[serde(default)]
    pub ship_exclusive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MunitionKind {
    Missile,
    Torpedo,
    Bomb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Munition {
    pub id: MunitionId,
    pub display_name: String,
    pub size: u8,
    pub kind: MunitionKind,
    /// One-shot damage per warhead.
    pub damage: DamageVector,
    // Flight characteristics — informational, not used by the resolver.
    #[serde(default)]
    pub arm_time_s: f64,
    #[serde(default)]
    pub lock_time_s: f64,
    #[serde(default)]
    pub explosion_min_radius_m: f64,
    #[serde(default)]
    pub explosion_max_radius_m: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    pub id: ShieldId,
    pub display_name: String,
    pub size: u8,
    pub max_hp: f64,
    pub regen_per_s: f64,
    /// Fraction of incoming damage the shield face intercepts, per type.
    /// Physical is typically well below 1 (ballistic passthrough).
    pub absorption: DamageVector,
    /// Damage multiplier on the absorbed portion (>1 = shield is weak to
    /// that type, <1 = resistant).
    pub resistance: DamageVector,
    /// Seconds of no incoming fire before regeneration resumes.
    /// Informational — the closed-form phase timing assumes sustained fire.
    #[serde(default)]
    pub regen_delay_s: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub display_name: String,
    pub hull_hp: f64,
    pub armor_hp: f64,
    /// Armor damage multiplier per type, applied to any damage categorized
    /// as armor-phase damage (bypass included).
    pub armor_resistance: DamageVector,
    pub thruster_hp: f64,
    #[serde(default)]
    pub turret_hp: f64,
    pub powerplant_hp: f64,
    pub cooler_hp: f64,
    pub shield_generator_hp: f64,
    #[serde(default)]
    pub quantum_drive_hp: f64,
    pub shield_slots: u32,
    pub max_shield_size: u8,
    #[serde(default)]
    pub default_shield: Option<ShieldId>,
}

// ---------------------------------------------------------------------------
// Loaded tables
// ---------------------------------------------------------------------------

/// Immutable identifier→record maps, passed explicitly into every
/// calculation. The core never reaches for ambient/global data.
#[derive(Debug, Clone, Default)]
pub struct ItemTables {
    pub ships: RecordMap<ShipId, Ship>,
    pub weapons: RecordMap<WeaponId, Weapon>,
    pub shields: RecordMap<ShieldId, Shield>,
    pub munitions: RecordMap<MunitionId, Munition>,
}

// ---------------------------------------------------------------------------
// Target zones
// ---------------------------------------------------------------------------

/// Fractional exposure of each pool for the chosen aim zone.
/// Fractions are independent per category and need not sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneModifiers {
    pub hull: f64,
    pub armor: f64,
    pub thruster: f64,
    pub component: f64,
}

impl ZoneModifiers {
    pub fn clamped(self) -> Self {
        Self {
            hull: clamp_fraction(self.hull),
            armor: clamp_fraction(self.armor),
            thruster: clamp_fraction(self.thruster),
            component: clamp_fraction(self.component),
        }
    }
}

impl Default for ZoneModifiers {
    fn default() -> Self {
        TargetZone::CenterMass.modifiers()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetZone {
    CenterMass,
    Engines,
    Cockpit,
    Wings,
    Turrets,
}

impl TargetZone {
    pub fn modifiers(self) -> ZoneModifiers {
        match self {
            Self::CenterMass => ZoneModifiers {
                hull: 0.6,
                armor: 0.3,
                thruster: 0.05,
                component: 0.05,
            },
            Self::Engines => ZoneModifiers {
                hull: 0.2,
                armor: 0.1,
                thruster: 0.6,
                component: 0.1,
            },
            Self::Cockpit => ZoneModifiers {
                hull: 0.5,
                armor: 0.2,
                thruster: 0.0,
                component: 0.3,
            },
            Self::Wings => ZoneModifiers {
                hull: 0.3,
                armor: 0.4,
                thruster: 0.2,
                component: 0.1,
            },
            Self::Turrets => ZoneModifiers {
                hull: 0.1,
                armor: 0.1,
                thruster: 0.0,
                component: 0.0,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Combat scenario
// ---------------------------------------------------------------------------

/// Scenario scalars composed multiplicatively into the effective-DPS factor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CombatScenario {
    pub mount_accuracy: f64,
    pub scenario_accuracy: f64,
    pub time_on_target: f64,
    pub fire_mode: f64,
    pub power_multiplier: f64,
}

impl CombatScenario {
    pub fn from_presets(
        mount: MountType,
        style: EngagementStyle,
        fire_mode: FireMode,
        power_fraction: f64,
    ) -> Self {
        Self {
            mount_accuracy: mount.accuracy(),
            scenario_accuracy: style.accuracy(),
            time_on_target: style.time_on_target(),
            fire_mode: fire_mode.dps_factor(),
            power_multiplier: power_multiplier(power_fraction),
        }
    }

    /// Defensive clamping at the aggregation boundary: accuracy-like scalars
    /// to [0, 1], rate multipliers to [0, 4], non-finite inputs to 0.
    pub fn sanitized(&self) -> Self {
        Self {
            mount_accuracy: clamp_fraction(self.mount_accuracy),
            scenario_accuracy: clamp_fraction(self.scenario_accuracy),
            time_on_target: clamp_fraction(self.time_on_target),
            fire_mode: clamp_rate(self.fire_mode),
            power_multiplier: clamp_rate(self.power_multiplier),
        }
    }

    /// The composed effective-DPS factor, after clamping.
    pub fn dps_multiplier(&self) -> f64 {
        let s = self.sanitized();
        s.mount_accuracy * s.scenario_accuracy * s.time_on_target * s.fire_mode * s.power_multiplier
    }
}

impl Default for CombatScenario {
    fn default() -> Self {
        Self::from_presets(
            MountType::Gimballed,
            EngagementStyle::Dogfight,
            FireMode::Sustained,
            0.33,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountType {
    Fixed,
    Gimballed,
    AutoGimbal,
    Turret,
}

impl MountType {
    pub fn accuracy(self) -> f64 {
        match self {
            Self::Fixed => 0.60,
            Self::Gimballed => 0.75,
            Self::AutoGimbal => 0.80,
            Self::Turret => 0.70,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementStyle {
    Dogfight,
    Jousting,
    Synthetic,
}

impl EngagementStyle {
    pub fn accuracy(self) -> f64 {
        match self {
            Self::Dogfight => 0.75,
            Self::Jousting => 0.85,
            Self::Synthetic => 0.95,
        }
    }

    pub fn time_on_target(self) -> f64 {
        match self {
            Self::Dogfight => 0.65,
            Self::Jousting => 0.35,
            Self::Synthetic => 0.95,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireMode {
    Sustained,
    Burst,
    Staggered,
}

impl FireMode {
    pub fn dps_factor(self) -> f64 {
        match self {
            Self::Sustained => 1.00,
            Self::Burst => 0.85,
            Self::Staggered => 0.75,
        }
    }
}

/// Weapon-power triangle setting → DPS multiplier. Step curve: boosting past
/// the 33% baseline trades capacitor for output.
pub fn power_multiplier(power_fraction: f64) -> f64 {
    let f = clamp_fraction(power_fraction);
    if f < 0.50 {
        1.00
    } else if f < 0.66 {
        1.07
    } else if f < 1.00 {
        1.13
    } else {
        1.20
    }
}

pub(crate) fn clamp_fraction(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub(crate) fn clamp_rate(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 4.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_curve_steps() {
        assert!((power_multiplier(0.0) - 1.00).abs() < f64::EPSILON);
        assert!((power_multiplier(0.33) - 1.00).abs() < f64::EPSILON);
        assert!((power_multiplier(0.50) - 1.07).abs() < f64::EPSILON);
        assert!((power_multiplier(0.66) - 1.13).abs() < f64::EPSILON);
        assert!((power_multiplier(1.00) - 1.20).abs() < f64::EPSILON);
        // Out-of-range fractions clamp into the curve.
        assert!((power_multiplier(7.0) - 1.20).abs() < f64::EPSILON);
        assert!((power_multiplier(-1.0) - 1.00).abs() < f64::EPSILON);
    }

    #[test]
    fn default_scenario_is_gimballed_dogfight() {
        let scenario = CombatScenario::default();
        assert!((scenario.mount_accuracy - 0.75).abs() < f64::EPSILON);
        assert!((scenario.scenario_accuracy - 0.75).abs() < f64::EPSILON);
        assert!((scenario.time_on_target - 0.65).abs() < f64::EPSILON);
        assert!((scenario.fire_mode - 1.0).abs() < f64::EPSILON);
        assert!((scenario.power_multiplier - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sanitized_clamps_each_scalar() {
        let scenario = CombatScenario {
            mount_accuracy: 2.0,
            scenario_accuracy: -0.5,
            time_on_target: f64::INFINITY,
            fire_mode: 9.0,
            power_multiplier: f64::NAN,
        };
        let s = scenario.sanitized();
        assert!((s.mount_accuracy - 1.0).abs() < f64::EPSILON);
        assert!(s.scenario_accuracy.abs() < f64::EPSILON);
        assert!(s.time_on_target.abs() < f64::EPSILON);
        assert!((s.fire_mode - 4.0).abs() < f64::EPSILON);
        assert!(s.power_multiplier.abs() < f64::EPSILON);
    }

    #[test]
    fn zone_presets_expose_expected_fractions() {
        let center = TargetZone::CenterMass.modifiers();
        assert!((center.hull - 0.6).abs() < f64::EPSILON);
        assert!((center.armor - 0.3).abs() < f64::EPSILON);
        let engines = TargetZone::Engines.modifiers();
        assert!((engines.thruster - 0.6).abs() < f64::EPSILON);
    }
}
