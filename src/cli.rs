use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// IF Meal Planner - 4-day intermittent fasting meal plans from seasonal Scottish produce.
#[derive(Parser, Debug)]
#[command(name = "if_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the preferences JSON file.
    #[arg(short, long, default_value = "if_preferences.json", global = true)]
    pub file: PathBuf,

    /// Catalog JSON file (defaults to the built-in Scottish catalog).
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Planner configuration JSON file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show BMR, TDEE and the daily calorie target.
    Calories,

    /// Generate a 4-day meal plan.
    Plan {
        /// Month of the year (1-12) used for seasonal produce.
        #[arg(short, long)]
        month: Option<u8>,

        /// Seed for reproducible tie-breaking between equally good meals.
        #[arg(long)]
        seed: Option<u64>,

        /// Write the plan as JSON to this path.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Build the shopping list for a plan.
    Shopping {
        /// Previously exported plan JSON; a new plan is generated when omitted.
        #[arg(short, long)]
        plan: Option<PathBuf>,

        /// Write the list as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Month used when generating a new plan.
        #[arg(short, long)]
        month: Option<u8>,

        /// Seed used when generating a new plan.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Clear stored preferences.
    Reset {
        /// Forget the stored body profile.
        #[arg(long)]
        profile: bool,

        /// Forget the stored fasting preferences.
        #[arg(long)]
        fasting: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            month: None,
            seed: None,
            out: None,
        }
    }
}
