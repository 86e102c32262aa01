use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use if_meal_planner_rs::catalog::{FoodCatalog, scottish_catalog};
use if_meal_planner_rs::cli::{Cli, Command};
use if_meal_planner_rs::config::PlannerConfig;
use if_meal_planner_rs::error::Result;
use if_meal_planner_rs::interface::{
    display_calorie_breakdown, display_meal_plan, display_shopping_list, month_name,
    prompt_fasting_preference, prompt_month, prompt_profile, prompt_yes_no,
};
use if_meal_planner_rs::models::{FastingPreference, MealPlan, Month, UserProfile};
use if_meal_planner_rs::planner::{build_plan, calorie_breakdown, recommended_calories};
use if_meal_planner_rs::shopping::aggregate;
use if_meal_planner_rs::state::{
    PreferencesStore, load_catalog, load_config, load_plan, save_plan, write_shopping_csv,
};

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so plan output on stdout stays clean.
fn init_logging() {
    let filter = std::env::var("IF_PLANNER_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    let env_filter = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Calories => cmd_calories(&cli.file),
        Command::Plan { month, seed, out } => {
            let catalog = open_catalog(cli.catalog.as_deref())?;
            let config = open_config(cli.config.as_deref())?;
            cmd_plan(&cli.file, &catalog, &config, month, seed, out.as_deref())
        }
        Command::Shopping {
            plan,
            csv,
            month,
            seed,
        } => {
            let config = open_config(cli.config.as_deref())?;
            let plan = match plan {
                Some(path) => load_plan(path)?,
                None => {
                    let catalog = open_catalog(cli.catalog.as_deref())?;
                    let plan = generate(&cli.file, &catalog, &config, month, seed)?;
                    display_meal_plan(&plan);
                    plan
                }
            };
            cmd_shopping(&plan, &config, csv)
        }
        Command::Reset { profile, fasting } => cmd_reset(&cli.file, profile, fasting),
    }
}

fn open_catalog(path: Option<&Path>) -> Result<FoodCatalog> {
    match path {
        Some(path) => {
            let catalog = load_catalog(path)?;
            println!(
                "Loaded {} ingredients, {} meals",
                catalog.ingredients().len(),
                catalog.templates().len()
            );
            Ok(catalog)
        }
        None => scottish_catalog(),
    }
}

fn open_config(path: Option<&Path>) -> Result<PlannerConfig> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => PlannerConfig::default(),
    };
    debug!(config = %config.display(), "planner config");
    Ok(config)
}

/// Stored profile, or a freshly prompted one. The flag reports a change.
fn ensure_profile(store: &PreferencesStore) -> Result<(UserProfile, bool)> {
    if let Some(profile) = &store.profile {
        let reuse = prompt_yes_no(
            &format!(
                "Use saved profile ({}, {} y, {} kg, {} cm)?",
                profile.sex, profile.age, profile.weight_kg, profile.height_cm
            ),
            true,
        )?;
        if reuse {
            return Ok((profile.clone(), false));
        }
    }
    Ok((prompt_profile(store.profile.as_ref())?, true))
}

fn ensure_fasting(store: &PreferencesStore, catalog: &FoodCatalog) -> Result<(FastingPreference, bool)> {
    match &store.fasting {
        Some(fasting) => Ok((fasting.clone(), false)),
        None => Ok((prompt_fasting_preference(catalog)?, true)),
    }
}

/// Gather preferences and build a plan, offering to save anything newly entered.
fn generate(
    file: &Path,
    catalog: &FoodCatalog,
    config: &PlannerConfig,
    month: Option<u8>,
    seed: Option<u64>,
) -> Result<MealPlan> {
    let mut store = PreferencesStore::load(file)?;
    let (profile, profile_changed) = ensure_profile(&store)?;
    let (fasting, fasting_changed) = ensure_fasting(&store, catalog)?;
    let month = match month {
        Some(m) => Month::new(m)?,
        None => prompt_month()?,
    };

    println!();
    println!("Planning {} with {} fasting...", month_name(month), fasting.schedule);
    let plan = build_plan(&profile, &fasting, month, catalog, config, seed)?;

    if (profile_changed || fasting_changed) && prompt_yes_no("Save preferences?", true)? {
        store.profile = Some(profile);
        store.fasting = Some(fasting);
        store.save(file)?;
        println!("Preferences saved.");
    }

    Ok(plan)
}

/// Print BMR, TDEE and the calorie target for the stored or prompted profile.
fn cmd_calories(file: &Path) -> Result<()> {
    let mut store = PreferencesStore::load(file)?;
    let (profile, changed) = ensure_profile(&store)?;
    let fasting = store.fasting_or_default();

    let breakdown = calorie_breakdown(&profile, fasting.goal_adjustment_pct)?;
    display_calorie_breakdown(&breakdown, recommended_calories(breakdown.target));

    if changed {
        store.profile = Some(profile);
        store.save(file)?;
        println!("Profile saved.");
    }

    Ok(())
}

/// Generate and render a meal plan.
fn cmd_plan(
    file: &Path,
    catalog: &FoodCatalog,
    config: &PlannerConfig,
    month: Option<u8>,
    seed: Option<u64>,
    out: Option<&Path>,
) -> Result<()> {
    let plan = generate(file, catalog, config, month, seed)?;
    display_meal_plan(&plan);

    if let Some(out) = out {
        save_plan(out, &plan)?;
        println!("Plan written to {}", out.display());
    }

    Ok(())
}

/// Aggregate a plan into a shopping list and render it.
fn cmd_shopping(plan: &MealPlan, config: &PlannerConfig, csv: Option<PathBuf>) -> Result<()> {
    let list = aggregate(plan, &config.rounding);
    display_shopping_list(&list);

    if let Some(csv) = csv {
        write_shopping_csv(&csv, &list)?;
        println!("Shopping list written to {}", csv.display());
    }

    Ok(())
}

/// Clear stored preferences.
fn cmd_reset(file: &Path, profile: bool, fasting: bool) -> Result<()> {
    if !profile && !fasting {
        println!("Please specify at least one reset option:");
        println!("  --profile  Forget the stored body profile");
        println!("  --fasting  Forget the stored fasting preferences");
        return Ok(());
    }

    if !file.exists() {
        eprintln!("Preferences file not found: {}", file.display());
        return Ok(());
    }

    let mut store = PreferencesStore::load(file)?;

    if profile {
        store.reset_profile();
        println!("Stored profile cleared.");
    }

    if fasting {
        store.reset_fasting();
        println!("Stored fasting preferences cleared.");
    }

    store.save(file)?;
    println!("Preferences saved.");

    Ok(())
}
