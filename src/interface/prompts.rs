use std::collections::BTreeSet;
use std::str::FromStr;

use dialoguer::{Confirm, Input, MultiSelect, Select};
use strsim::jaro_winkler;

use crate::catalog::FoodCatalog;
use crate::error::{PlannerError, Result};
use crate::interface::render::MONTH_NAMES;
use crate::models::{
    ActivityLevel, Category, FastingPreference, FastingSchedule, Month, Sex, UserProfile,
};

const FUZZY_THRESHOLD: f64 = 0.7;
const MAX_SUGGESTIONS: usize = 5;

/// Result of looking a typed name up in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum NameMatch {
    Exact(String),
    /// Close names, best first.
    Fuzzy(Vec<String>),
    None,
}

/// Match user input against known ingredient names, case-insensitively.
pub fn match_ingredient_name(input: &str, names: &[&str]) -> NameMatch {
    let needle = input.trim().to_lowercase();
    if let Some(name) = names.iter().find(|n| n.to_lowercase() == needle) {
        return NameMatch::Exact(name.to_string());
    }

    let mut scored: Vec<(&str, f64)> = names
        .iter()
        .map(|n| (*n, jaro_winkler(&n.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    if scored.is_empty() {
        NameMatch::None
    } else {
        NameMatch::Fuzzy(
            scored
                .into_iter()
                .take(MAX_SUGGESTIONS)
                .map(|(n, _)| n.to_string())
                .collect(),
        )
    }
}

fn prompt_parsed<T: FromStr>(prompt: &str, default: String, field: &str) -> Result<T> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default)
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| PlannerError::validation(field, format!("'{}' is not a valid number", input.trim())))
}

/// Prompt for the body profile, pre-filling any stored values.
pub fn prompt_profile(existing: Option<&UserProfile>) -> Result<UserProfile> {
    let age: u32 = prompt_parsed(
        "Age (years)",
        existing.map_or("30".to_string(), |p| p.age.to_string()),
        "age",
    )?;

    let sexes = [Sex::Male, Sex::Female];
    let sex_idx = Select::new()
        .with_prompt("Sex")
        .items(&sexes)
        .default(existing.map_or(0, |p| usize::from(p.sex == Sex::Female)))
        .interact()?;

    let weight_kg: f64 = prompt_parsed(
        "Weight (kg)",
        existing.map_or("70".to_string(), |p| p.weight_kg.to_string()),
        "weight_kg",
    )?;
    let height_cm: f64 = prompt_parsed(
        "Height (cm)",
        existing.map_or("175".to_string(), |p| p.height_cm.to_string()),
        "height_cm",
    )?;

    let levels: Vec<&str> = ActivityLevel::ALL.iter().map(|l| l.description()).collect();
    let current_level = existing
        .and_then(|p| ActivityLevel::ALL.iter().position(|l| *l == p.activity_level))
        .unwrap_or(2);
    let level_idx = Select::new()
        .with_prompt("Activity level")
        .items(&levels)
        .default(current_level)
        .interact()?;

    let profile = UserProfile {
        age,
        sex: sexes[sex_idx],
        weight_kg,
        height_cm,
        activity_level: ActivityLevel::ALL[level_idx],
    };
    profile.validate()?;
    Ok(profile)
}

/// Prompt for schedule, goal and exclusions.
pub fn prompt_fasting_preference(catalog: &FoodCatalog) -> Result<FastingPreference> {
    let labels: Vec<&str> = FastingSchedule::ALL.iter().map(|s| s.label()).collect();
    let schedule_idx = Select::new()
        .with_prompt("Fasting schedule")
        .items(&labels)
        .default(0)
        .interact()?;

    let goal_adjustment_pct: f64 = prompt_parsed(
        "Calorie adjustment % (negative for weight loss, 0 for maintenance)",
        "0".to_string(),
        "goal_adjustment_pct",
    )?;

    let window_start_hour: u8 = prompt_parsed(
        "Eating window opens at hour (0-23)",
        "12".to_string(),
        "window_start_hour",
    )?;

    let headings: Vec<&str> = Category::ALL.iter().map(|c| c.heading()).collect();
    let picked = MultiSelect::new()
        .with_prompt("Food groups to avoid (space to toggle, enter to confirm)")
        .items(&headings)
        .interact()?;
    let dietary_exclusions: BTreeSet<Category> =
        picked.into_iter().map(|i| Category::ALL[i]).collect();

    let preference = FastingPreference {
        schedule: FastingSchedule::ALL[schedule_idx],
        goal_adjustment_pct,
        dietary_exclusions,
        excluded_ingredients: prompt_excluded_ingredients(catalog)?,
        window_start_hour,
    };
    preference.validate()?;
    Ok(preference)
}

/// Prompt for allergies and dislikes, one ingredient at a time.
pub fn prompt_excluded_ingredients(catalog: &FoodCatalog) -> Result<Vec<String>> {
    let names: Vec<&str> = catalog.ingredients().iter().map(|i| i.name.as_str()).collect();
    let mut excluded = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt("Ingredient to avoid (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        match match_ingredient_name(input, &names) {
            NameMatch::Exact(name) => {
                println!("Avoiding: {}", name);
                excluded.push(name);
            }
            NameMatch::Fuzzy(options) if options.len() == 1 => {
                let confirm = Confirm::new()
                    .with_prompt(format!("Did you mean '{}'?", options[0]))
                    .default(true)
                    .interact()?;
                if confirm {
                    println!("Avoiding: {}", options[0]);
                    excluded.extend(options);
                }
            }
            NameMatch::Fuzzy(options) => {
                let mut items = options.clone();
                items.push("None of these".to_string());
                let selection = Select::new()
                    .with_prompt("Which did you mean?")
                    .items(&items)
                    .default(0)
                    .interact()?;
                if selection < options.len() {
                    println!("Avoiding: {}", options[selection]);
                    excluded.push(options[selection].clone());
                }
            }
            NameMatch::None => {
                let keep = Confirm::new()
                    .with_prompt(format!(
                        "No catalog ingredient matches '{}'. Avoid anything containing it?",
                        input
                    ))
                    .default(true)
                    .interact()?;
                if keep {
                    excluded.push(input.to_string());
                }
            }
        }
    }

    Ok(excluded)
}

/// Prompt for the planning month.
pub fn prompt_month() -> Result<Month> {
    let selection = Select::new()
        .with_prompt("Which month are you shopping in?")
        .items(&MONTH_NAMES)
        .default(0)
        .interact()?;
    Month::new(selection as u8 + 1)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 4] = ["Scottish Salmon", "Smoked Haddock", "Curly Kale", "Spinach"];

    #[test]
    fn test_exact_match_ignores_case() {
        assert_eq!(
            match_ingredient_name("  curly KALE ", &NAMES),
            NameMatch::Exact("Curly Kale".to_string())
        );
    }

    #[test]
    fn test_fuzzy_match_suggests_close_names() {
        match match_ingredient_name("Spinnach", &NAMES) {
            NameMatch::Fuzzy(options) => assert_eq!(options[0], "Spinach"),
            other => panic!("expected fuzzy match, got {:?}", other),
        }
    }

    #[test]
    fn test_no_match() {
        assert_eq!(match_ingredient_name("xyz", &NAMES), NameMatch::None);
    }
}
