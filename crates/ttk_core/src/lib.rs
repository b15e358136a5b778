//! `ttk_core` — closed-form time-to-kill resolution.
//!
//! No IO, no clock, no randomness. All item tables are passed in as
//! immutable maps; identical inputs produce bit-identical results, so
//! callers may parallelize independent invocations freely.

mod effectiveness;
mod loadout;
mod profile;
mod report;
mod resolver;
mod types;

pub use effectiveness::{analyze_munitions, analyze_weapons, MunitionReport, WeaponReport};
pub use loadout::{
    aggregate_loadout, CategoryMask, DamageSources, EquippedItem, HardpointCategory, ItemRef,
    LoadoutEntry, MunitionGroup, WeaponGroup,
};
pub use profile::{DefenseProfile, ShieldInteraction};
pub use report::{calculate, CalculationResult, EngagementRequest};
pub use resolver::{resolve, PhaseResult};
pub use types::*;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

#[cfg(test)]
mod tests;
