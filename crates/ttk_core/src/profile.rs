//! Defense profile builder.
//!
//! Collapses a target ship + optional shield + aim zone into the coefficient
//! set the phase resolver consumes: active shield pool/regen after the Rule
//! of Two, per-type shield interaction, and zone-scaled HP pools. Built
//! fresh per calculation, never mutated afterwards.

use crate::types::{DamageType, DamageVector, Shield, Ship, ZoneModifiers};

/// How one damage type meets the shield face.
#[derive(Debug, Clone, Copy)]
pub struct ShieldInteraction {
    /// Fraction intercepted by the shield; the rest bypasses to armor.
    pub absorb: f64,
    /// Multiplier on the intercepted portion before it drains the pool.
    pub resist: f64,
}

#[derive(Debug, Clone)]
pub struct DefenseProfile {
    /// Active generator pool (Rule of Two: at most two generators up).
    pub shield_pool: f64,
    pub shield_regen: f64,
    /// Standby generator pairs behind the active pair.
    pub failover_phases: u32,
    absorption: DamageVector,
    shield_resistance: DamageVector,
    pub armor_resistance: DamageVector,
    pub zone_hull: f64,
    pub zone_armor: f64,
    pub zone_thruster: f64,
    pub zone_component: f64,
}

impl DefenseProfile {
    pub fn build(ship: &Ship, shield: Option<&Shield>, zone: ZoneModifiers) -> Self {
        let zone = zone.clamped();

        let (shield_pool, shield_regen, failover_phases, absorption, shield_resistance) =
            match shield {
                Some(shield) if ship.shield_slots > 0 => {
                    let active = f64::from(ship.shield_slots.min(2));
                    (
                        shield.max_hp * active,
                        shield.regen_per_s * active,
                        ship.shield_slots.saturating_sub(2) / 2,
                        // Energy and distortion never bypass; only the
                        // physical absorption fraction is shield-specific.
                        DamageVector {
                            physical: crate::types::clamp_fraction(shield.absorption.physical),
                            energy: 1.0,
                            distortion: 1.0,
                        },
                        shield.resistance,
                    )
                }
                // No shield equipped (or no slots): everything is
                // armor-bound from t = 0.
                _ => (0.0, 0.0, 0, DamageVector::ZERO, DamageVector::splat(1.0)),
            };

        Self {
            shield_pool,
            shield_regen,
            failover_phases,
            absorption,
            shield_resistance,
            armor_resistance: ship.armor_resistance,
            zone_hull: ship.hull_hp * zone.hull,
            zone_armor: ship.armor_hp * zone.armor,
            zone_thruster: ship.thruster_hp * zone.thruster,
            zone_component: (ship.powerplant_hp + ship.cooler_hp + ship.shield_generator_hp)
                * zone.component,
        }
    }

    pub fn interaction(&self, kind: DamageType) -> ShieldInteraction {
        ShieldInteraction {
            absorb: self.absorption.component(kind),
            resist: self.shield_resistance.component(kind),
        }
    }

    pub fn armor_multiplier(&self, kind: DamageType) -> f64 {
        self.armor_resistance.component(kind)
    }

    /// The hull-phase pool: exposed hull plus exposed thruster and
    /// component mass.
    pub fn hull_pool(&self) -> f64 {
        self.zone_hull + self.zone_thruster + self.zone_component
    }

    pub fn has_shield(&self) -> bool {
        self.shield_pool > 0.0
    }
}
