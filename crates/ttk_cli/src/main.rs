use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use ttk_core::{
    calculate, CalculationResult, CategoryMask, CombatScenario, EngagementRequest,
    EngagementStyle, FireMode, HardpointCategory, ItemRef, ItemTables, LoadoutEntry, MountType,
    MunitionId, ShieldId, ShipId, TargetZone, WeaponId, ZoneModifiers,
};
use ttk_data::{load_tables, munitions_by_size, shields_by_size, ships_sorted, weapons_by_size};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "ttk_cli", about = "Ship combat time-to-kill estimator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[allow(clippy::large_enum_variant)] // parsed once at startup, size is irrelevant
enum Commands {
    /// Estimate TTK for a loadout against a target ship.
    Calc(CalcArgs),
    /// List loaded records.
    List {
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,
        #[arg(value_parser = ["ships", "weapons", "shields", "munitions"])]
        kind: String,
        /// Restrict item listings to one size class.
        #[arg(long)]
        size: Option<u8>,
    },
}

#[derive(Args)]
struct CalcArgs {
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,
    /// Target ship id.
    #[arg(long)]
    target: String,
    /// Shield id; defaults to the target's default shield.
    #[arg(long)]
    shield: Option<String>,
    /// Weapon spec `id=count`, repeatable.
    #[arg(long = "weapon")]
    weapons: Vec<String>,
    /// Munition spec `id=count`, repeatable.
    #[arg(long = "missile")]
    missiles: Vec<String>,
    #[arg(long, default_value = "center_mass",
          value_parser = ["center_mass", "engines", "cockpit", "wings", "turrets"])]
    zone: String,
    #[arg(long, default_value = "gimballed",
          value_parser = ["fixed", "gimballed", "auto_gimbal", "turret"])]
    mount: String,
    #[arg(long, default_value = "dogfight",
          value_parser = ["dogfight", "jousting", "synthetic"])]
    style: String,
    #[arg(long, default_value = "sustained",
          value_parser = ["sustained", "burst", "staggered"])]
    fire_mode: String,
    /// Weapon power triangle setting as a fraction (0.33 = baseline).
    #[arg(long, default_value_t = 0.33)]
    power: f64,
    /// Disable a whole hardpoint category, repeatable.
    #[arg(long = "disable",
          value_parser = ["pilot", "manned_turret", "remote_turret", "point_defense",
                          "specialized", "missile", "torpedo", "bomb"])]
    disabled: Vec<String>,
    /// Emit the full result as JSON instead of the report.
    #[arg(long)]
    json: bool,
}

// ---------------------------------------------------------------------------
// Argument mapping
// ---------------------------------------------------------------------------

/// Parse an `id=count` spec; a bare id means count 1.
fn parse_item_spec(spec: &str) -> Result<(String, u32)> {
    match spec.split_once('=') {
        None => Ok((spec.to_string(), 1)),
        Some((id, count)) => {
            let count: u32 = count
                .parse()
                .with_context(|| format!("bad count in item spec '{spec}'"))?;
            Ok((id.to_string(), count))
        }
    }
}

fn zone_from_name(name: &str) -> ZoneModifiers {
    let preset = match name {
        "engines" => TargetZone::Engines,
        "cockpit" => TargetZone::Cockpit,
        "wings" => TargetZone::Wings,
        "turrets" => TargetZone::Turrets,
        _ => TargetZone::CenterMass,
    };
    preset.modifiers()
}

fn scenario_from_args(args: &CalcArgs) -> CombatScenario {
    let mount = match args.mount.as_str() {
        "fixed" => MountType::Fixed,
        "auto_gimbal" => MountType::AutoGimbal,
        "turret" => MountType::Turret,
        _ => MountType::Gimballed,
    };
    let style = match args.style.as_str() {
        "jousting" => EngagementStyle::Jousting,
        "synthetic" => EngagementStyle::Synthetic,
        _ => EngagementStyle::Dogfight,
    };
    let fire_mode = match args.fire_mode.as_str() {
        "burst" => FireMode::Burst,
        "staggered" => FireMode::Staggered,
        _ => FireMode::Sustained,
    };
    CombatScenario::from_presets(mount, style, fire_mode, args.power)
}

fn category_from_name(name: &str) -> HardpointCategory {
    match name {
        "manned_turret" => HardpointCategory::MannedTurret,
        "remote_turret" => HardpointCategory::RemoteTurret,
        "point_defense" => HardpointCategory::PointDefense,
        "specialized" => HardpointCategory::Specialized,
        "missile" => HardpointCategory::Missile,
        "torpedo" => HardpointCategory::Torpedo,
        "bomb" => HardpointCategory::Bomb,
        _ => HardpointCategory::Pilot,
    }
}

fn build_loadout(weapons: &[String], missiles: &[String]) -> Result<Vec<LoadoutEntry>> {
    let mut entries = Vec::new();
    for (slot, spec) in weapons.iter().enumerate() {
        let (id, count) = parse_item_spec(spec)?;
        entries.push(LoadoutEntry {
            hardpoint: format!("weapon_{:02}", slot + 1),
            category: HardpointCategory::Pilot,
            item: ItemRef::Weapon(WeaponId(id)),
            count,
            enabled: true,
        });
    }
    for (slot, spec) in missiles.iter().enumerate() {
        let (id, count) = parse_item_spec(spec)?;
        entries.push(LoadoutEntry {
            hardpoint: format!("missile_{:02}", slot + 1),
            category: HardpointCategory::Missile,
            item: ItemRef::Munition(MunitionId(id)),
            count,
            enabled: true,
        });
    }
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Calc
// ---------------------------------------------------------------------------

fn run_calc(tables: &ItemTables, args: &CalcArgs) -> Result<()> {
    let mut categories = CategoryMask::all_enabled();
    for name in &args.disabled {
        categories = categories.with_disabled(category_from_name(name));
    }

    let request = EngagementRequest {
        target: ShipId(args.target.clone()),
        shield: args.shield.clone().map(ShieldId),
        zone: zone_from_name(&args.zone),
        scenario: scenario_from_args(args),
        loadout: build_loadout(&args.weapons, &args.missiles)?,
        categories,
    };

    let Some(result) = calculate(tables, &request) else {
        bail!("unknown target ship '{}'", args.target);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }
    Ok(())
}

fn fmt_seconds(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}s")
    } else {
        "never".to_string()
    }
}

fn print_report(result: &CalculationResult) {
    let shield_label = result
        .shield
        .as_ref()
        .map_or_else(|| "none".to_string(), |s| s.0.clone());
    println!("Target: {}  shield: {shield_label}", result.target);
    println!("{}", "-".repeat(72));

    println!(
        "Effective DPS {:.1}  (physical {:.1}  energy {:.1}  distortion {:.1})",
        result.effective_dps,
        result.damage_breakdown.physical,
        result.damage_breakdown.energy,
        result.damage_breakdown.distortion,
    );
    println!(
        "Shield DPS {:.1}  passthrough {:.1}  failover pairs {}",
        result.shield_dps, result.passthrough_dps, result.shield_failover_phases,
    );
    if !result.shields_breakable {
        println!("Shields are unbreakable: regeneration beats the absorbed rate.");
    }

    println!(
        "TTK {}  (shield {}  armor {}  hull {})",
        fmt_seconds(result.total_ttk),
        fmt_seconds(result.shield_time),
        fmt_seconds(result.armor_time),
        fmt_seconds(result.hull_time),
    );

    if !result.weapons.is_empty() {
        println!("Weapons:");
        for weapon in &result.weapons {
            let note = weapon
                .ineffective_reason
                .as_ref()
                .map_or_else(String::new, |reason| format!("  [{reason}]"));
            println!(
                "  {:>2}x {:<28} dps {:>8.1}  solo TTK {}{note}",
                weapon.count,
                weapon.display_name,
                weapon.dps_contribution.total(),
                fmt_seconds(weapon.solo_ttk),
            );
        }
    }
    if !result.munitions.is_empty() {
        println!("Munitions:");
        for munition in &result.munitions {
            println!(
                "  {:>2}x {:<28} damage {:>8.1}  saves {}",
                munition.count,
                munition.display_name,
                munition.damage_contribution.total(),
                fmt_seconds(munition.time_saved),
            );
        }
    }
    if !result.dropped_references.is_empty() {
        println!(
            "Dropped unknown references: {}",
            result.dropped_references.join(", ")
        );
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

fn run_list(tables: &ItemTables, kind: &str, size: Option<u8>) {
    match kind {
        "ships" => {
            for ship in ships_sorted(tables) {
                println!(
                    "{:<28} {:<24} hull {:>8.0}  armor {:>8.0}  slots {}",
                    ship.id.0, ship.display_name, ship.hull_hp, ship.armor_hp, ship.shield_slots,
                );
            }
        }
        "weapons" => {
            for s in sizes_to_list(size) {
                for weapon in weapons_by_size(tables, s) {
                    println!(
                        "{:<28} {:<24} S{}  dps {:>8.1}",
                        weapon.id.0, weapon.display_name, weapon.size, weapon.sustained_dps,
                    );
                }
            }
        }
        "shields" => {
            for s in sizes_to_list(size) {
                for shield in shields_by_size(tables, s) {
                    println!(
                        "{:<28} {:<24} S{}  hp {:>8.0}  regen {:>7.1}",
                        shield.id.0,
                        shield.display_name,
                        shield.size,
                        shield.max_hp,
                        shield.regen_per_s,
                    );
                }
            }
        }
        _ => {
            for s in sizes_to_list(size) {
                for munition in munitions_by_size(tables, s) {
                    println!(
                        "{:<28} {:<24} S{}  damage {:>8.0}",
                        munition.id.0,
                        munition.display_name,
                        munition.size,
                        munition.damage.total(),
                    );
                }
            }
        }
    }
}

fn sizes_to_list(size: Option<u8>) -> Vec<u8> {
    size.map_or_else(|| (0..=9).collect(), |s| vec![s])
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Calc(args) => {
            let tables = load_tables(&args.data_dir)?;
            run_calc(&tables, &args)?;
        }
        Commands::List {
            data_dir,
            kind,
            size,
        } => {
            let tables = load_tables(&data_dir)?;
            run_list(&tables, &kind, size);
        }
    }
    Ok(())
}
