//! Closed-form phase resolution.
//!
//! Walks the SHIELD → ARMOR → HULL → DESTROYED timeline as arithmetic, not
//! step simulation. Munitions land instantaneously at t = 0; continuous fire
//! then drains the shield pool while ballistic bypass works on armor and
//! hull concurrently. Degenerate rates (net damage ≤ 0 into a pool) produce
//! the `f64::INFINITY` sentinel, never an error.

use serde::Serialize;

use crate::loadout::DamageSources;
use crate::profile::DefenseProfile;
use crate::types::{DamageType, DamageVector};

/// Efficiency of each standby generator pair relative to the active pair:
/// swap and partial-charge delays cost 20% of the pair-break time.
const FAILOVER_EFFICIENCY: f64 = 0.8;

#[derive(Debug, Clone, Serialize)]
pub struct PhaseResult {
    /// Time until the shield pool is depleted. 0 when no pool is up at
    /// t = 0, and also 0 when the kill lands via bypass with shields still
    /// raised (the phase never completed; armor/hull times carry the
    /// timeline). `f64::INFINITY` when regen beats absorbed DPS.
    pub shield_time: f64,
    pub armor_time: f64,
    pub hull_time: f64,
    pub total_ttk: f64,
    /// False exactly when a raised shield's regen meets or beats the
    /// absorbed continuous DPS.
    pub shields_breakable: bool,
    /// Total continuous DPS after scenario modifiers.
    pub effective_dps: f64,
    /// Portion of continuous DPS that drains the shield pool.
    pub shield_dps: f64,
    /// Portion that bypasses the shield face entirely.
    pub passthrough_dps: f64,
    pub damage_breakdown: DamageVector,
    /// Armor HP consumed by bypass while the shield was still up.
    pub armor_damage_during_shields: f64,
    pub shield_failover_phases: u32,
}

/// Remaining pool levels, mutated only by the t = 0 munition instant.
struct Pools {
    shield: f64,
    armor: f64,
    hull: f64,
}

pub fn resolve(profile: &DefenseProfile, sources: &DamageSources) -> PhaseResult {
    let dps = sources.continuous_dps();

    // Continuous split through the shield face.
    let mut shield_dps = 0.0;
    let mut bypass = DamageVector::ZERO;
    for kind in DamageType::ALL {
        let ix = profile.interaction(kind);
        shield_dps += dps.component(kind) * ix.absorb * ix.resist;
        bypass.set(kind, dps.component(kind) * (1.0 - ix.absorb));
    }
    let bypass_raw = bypass.total();
    let bypass_armor_dps = armor_rate(&bypass, profile);
    let armor_dps_full = armor_rate(&dps, profile);
    let hull_dps_full = dps.total();

    let mut pools = Pools {
        shield: profile.shield_pool,
        armor: profile.zone_armor,
        hull: profile.hull_pool(),
    };
    apply_munitions(&mut pools, &sources.burst_damage(), profile);

    // Shield phase duration on the post-munition pool.
    let net_shield_dps = shield_dps - profile.shield_regen;
    let (shield_time, shields_breakable) = if pools.shield <= 0.0 {
        (0.0, true)
    } else if net_shield_dps > 0.0 {
        let base = pools.shield / net_shield_dps;
        let failover = 1.0 + FAILOVER_EFFICIENCY * f64::from(profile.failover_phases);
        (base * failover, true)
    } else {
        (f64::INFINITY, false)
    };

    let timeline = if shield_time.is_finite() {
        breakable_timeline(
            shield_time,
            &pools,
            bypass_armor_dps,
            bypass_raw,
            armor_dps_full,
            hull_dps_full,
        )
    } else {
        unbreakable_timeline(&pools, bypass_armor_dps, bypass_raw)
    };

    PhaseResult {
        shield_time: timeline.shield_time,
        armor_time: timeline.armor_time,
        hull_time: timeline.hull_time,
        total_ttk: timeline.total_ttk,
        shields_breakable,
        effective_dps: hull_dps_full,
        shield_dps,
        passthrough_dps: bypass_raw,
        damage_breakdown: dps,
        armor_damage_during_shields: timeline.armor_damage_during_shields,
        shield_failover_phases: profile.failover_phases,
    }
}

struct Timeline {
    shield_time: f64,
    armor_time: f64,
    hull_time: f64,
    total_ttk: f64,
    armor_damage_during_shields: f64,
}

/// Timeline when the shield pool falls at a finite `shield_time`
/// (0 when nothing is raised). Bypass works armor → hull during the phase;
/// whatever survives the phase faces the full continuous DPS.
fn breakable_timeline(
    shield_time: f64,
    pools: &Pools,
    bypass_armor_dps: f64,
    bypass_raw: f64,
    armor_dps_full: f64,
    hull_dps_full: f64,
) -> Timeline {
    let armor_break = exhaust_time(pools.armor, bypass_armor_dps);

    if armor_break <= shield_time {
        // Armor falls to bypass while the shield is still up.
        let hull_break = armor_break + exhaust_time(pools.hull, bypass_raw);
        if hull_break <= shield_time {
            // The kill lands entirely under the raised shield.
            return Timeline {
                shield_time: 0.0,
                armor_time: armor_break,
                hull_time: hull_break - armor_break,
                total_ttk: hull_break,
                armor_damage_during_shields: pools.armor,
            };
        }
        let hull_during_shields = bypass_raw * (shield_time - armor_break);
        let remaining_hull = (pools.hull - hull_during_shields).max(0.0);
        let hull_time = exhaust_time(remaining_hull, hull_dps_full);
        return Timeline {
            shield_time,
            armor_time: 0.0,
            hull_time,
            total_ttk: shield_time + hull_time,
            armor_damage_during_shields: pools.armor,
        };
    }

    // Armor outlives the shield phase; bypass only dented it.
    let armor_during_shields = (bypass_armor_dps * shield_time).min(pools.armor);
    let remaining_armor = pools.armor - armor_during_shields;
    let armor_time = exhaust_time(remaining_armor, armor_dps_full);
    // Hull is never reached while armor holds forever.
    let hull_time = if armor_time.is_finite() {
        exhaust_time(pools.hull, hull_dps_full)
    } else {
        0.0
    };
    Timeline {
        shield_time,
        armor_time,
        hull_time,
        total_ttk: shield_time + armor_time + hull_time,
        armor_damage_during_shields: armor_during_shields,
    }
}

/// Timeline when regen beats absorbed DPS: only bypass ever progresses, and
/// the total is computed purely from that residual rate.
fn unbreakable_timeline(pools: &Pools, bypass_armor_dps: f64, bypass_raw: f64) -> Timeline {
    if bypass_raw > 0.0 {
        let armor_time = exhaust_time(pools.armor, bypass_armor_dps);
        let hull_time = if armor_time.is_finite() {
            exhaust_time(pools.hull, bypass_raw)
        } else {
            0.0
        };
        let consumed_armor = if armor_time.is_finite() {
            pools.armor
        } else {
            0.0
        };
        return Timeline {
            shield_time: f64::INFINITY,
            armor_time,
            hull_time,
            total_ttk: armor_time + hull_time,
            armor_damage_during_shields: consumed_armor,
        };
    }
    if pools.armor <= 0.0 && pools.hull <= 0.0 {
        // Munitions already finished the job at t = 0.
        return Timeline {
            shield_time: f64::INFINITY,
            armor_time: 0.0,
            hull_time: 0.0,
            total_ttk: 0.0,
            armor_damage_during_shields: 0.0,
        };
    }
    Timeline {
        shield_time: f64::INFINITY,
        armor_time: 0.0,
        hull_time: 0.0,
        total_ttk: f64::INFINITY,
        armor_damage_during_shields: 0.0,
    }
}

/// Apply one-shot munition damage at t = 0, split per type through the
/// shield face, capping each pool and carrying excess into the next pool
/// within the same instant. Types land in `DamageType::ALL` order.
fn apply_munitions(pools: &mut Pools, burst: &DamageVector, profile: &DefenseProfile) {
    if burst.total() <= 0.0 {
        return;
    }
    for kind in DamageType::ALL {
        let amount = burst.component(kind);
        if amount <= 0.0 {
            continue;
        }
        let ix = profile.interaction(kind);
        let shield_side = amount * ix.absorb * ix.resist;
        let shield_excess = pour(&mut pools.shield, shield_side);

        // Shield overflow joins the bypass share at face value.
        let armor_bound = amount * (1.0 - ix.absorb) + shield_excess;
        let armor_mult = profile.armor_multiplier(kind);
        let hull_bound = if pools.armor <= 0.0 {
            armor_bound
        } else if armor_mult > 0.0 {
            pour(&mut pools.armor, armor_bound * armor_mult) / armor_mult
        } else {
            // Armor immune to this type: the warhead is spent on it.
            0.0
        };
        let _overkill = pour(&mut pools.hull, hull_bound);
    }
}

/// Drain `amount` from `pool`, returning the unconsumed excess.
#[inline]
fn pour(pool: &mut f64, amount: f64) -> f64 {
    let applied = amount.min(*pool).max(0.0);
    *pool -= applied;
    amount - applied
}

/// Time for a rate to empty a pool: 0 for an empty pool, ∞ for a degenerate
/// rate against a live one.
#[inline]
fn exhaust_time(pool: f64, rate: f64) -> f64 {
    if pool <= 0.0 {
        0.0
    } else if rate > 0.0 {
        pool / rate
    } else {
        f64::INFINITY
    }
}

/// Armor-effective rate: each damage type scaled by the armor multiplier.
pub(crate) fn armor_rate(damage: &DamageVector, profile: &DefenseProfile) -> f64 {
    DamageType::ALL
        .iter()
        .map(|&kind| damage.component(kind) * profile.armor_multiplier(kind))
        .sum()
}
