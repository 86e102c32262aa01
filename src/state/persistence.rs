use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::catalog::{CatalogData, FoodCatalog};
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::models::{MealPlan, ShoppingList};

fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load and validate a catalog from a JSON file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<FoodCatalog> {
    let data: CatalogData = read_json(path)?;
    FoodCatalog::from_data(data)
}

pub fn save_catalog<P: AsRef<Path>>(path: P, catalog: &FoodCatalog) -> Result<()> {
    write_json(path, &catalog.to_data())
}

/// Load planner settings; fields missing from the file keep their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlannerConfig> {
    let config: PlannerConfig = read_json(path)?;
    config.validate()?;
    Ok(config)
}

/// Load a saved plan, rejecting lines the shopping aggregator cannot total.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<MealPlan> {
    let plan: MealPlan = read_json(path)?;
    plan.validate()?;
    Ok(plan)
}

pub fn save_plan<P: AsRef<Path>>(path: P, plan: &MealPlan) -> Result<()> {
    write_json(path, plan)
}

/// Export the shopping list as CSV, one row per item in display order.
pub fn write_shopping_csv<P: AsRef<Path>>(path: P, list: &ShoppingList) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["category", "ingredient", "quantity", "unit"])?;
    for item in list.items() {
        writer.write_record([
            item.category.heading(),
            item.ingredient.as_str(),
            &format!("{}", item.quantity),
            item.unit.symbol(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
