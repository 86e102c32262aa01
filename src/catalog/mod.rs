mod scottish;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::{Ingredient, Macros, MealTemplate};

pub use scottish::scottish_catalog;

/// Serialized catalog layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub meals: Vec<MealTemplate>,
}

/// Read-only, validated food catalog.
///
/// Ingredients and templates are kept sorted by their `order` key, which is
/// the stable tie-break for every ordering decision downstream.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    ingredients: Vec<Ingredient>,
    templates: Vec<MealTemplate>,
    /// Ingredient index keyed by lowercase name.
    index: HashMap<String, usize>,
}

impl FoodCatalog {
    /// Validate and build a catalog.
    ///
    /// Fails with `PlanningError` when entries are inconsistent: duplicate
    /// names or order keys, unknown ingredients, non-positive quantities, or
    /// units that cannot be converted to the ingredient's base unit.
    pub fn new(mut ingredients: Vec<Ingredient>, mut templates: Vec<MealTemplate>) -> Result<Self> {
        ingredients.sort_by_key(|i| i.order);
        templates.sort_by_key(|t| t.order);

        let mut index = HashMap::new();
        let mut orders = HashSet::new();
        for (i, ingredient) in ingredients.iter().enumerate() {
            validate_ingredient(ingredient)?;
            if !orders.insert(ingredient.order) {
                return Err(misconfigured(format!(
                    "duplicate ingredient order key {}",
                    ingredient.order
                )));
            }
            if index.insert(ingredient.key(), i).is_some() {
                return Err(misconfigured(format!(
                    "duplicate ingredient '{}'",
                    ingredient.name
                )));
            }
        }

        let mut template_orders = HashSet::new();
        for template in &templates {
            if !template_orders.insert(template.order) {
                return Err(misconfigured(format!(
                    "duplicate meal order key {}",
                    template.order
                )));
            }
            if template.lines.is_empty() {
                return Err(misconfigured(format!(
                    "meal '{}' has no ingredients",
                    template.name
                )));
            }
            for line in &template.lines {
                let ingredient = index
                    .get(&line.ingredient.to_lowercase())
                    .map(|&i| &ingredients[i])
                    .ok_or_else(|| {
                        misconfigured(format!(
                            "meal '{}' uses unknown ingredient '{}'",
                            template.name, line.ingredient
                        ))
                    })?;
                if !(line.quantity.is_finite() && line.quantity > 0.0) {
                    return Err(misconfigured(format!(
                        "meal '{}' has non-positive quantity for '{}'",
                        template.name, line.ingredient
                    )));
                }
                if line.unit.factor_to(ingredient.base_unit).is_none() {
                    return Err(misconfigured(format!(
                        "meal '{}' measures '{}' in {} but its base unit is {}",
                        template.name, line.ingredient, line.unit, ingredient.base_unit
                    )));
                }
            }
        }

        Ok(Self {
            ingredients,
            templates,
            index,
        })
    }

    pub fn from_data(data: CatalogData) -> Result<Self> {
        Self::new(data.ingredients, data.meals)
    }

    pub fn to_data(&self) -> CatalogData {
        CatalogData {
            ingredients: self.ingredients.clone(),
            meals: self.templates.clone(),
        }
    }

    /// Get an ingredient by name (case-insensitive).
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.index
            .get(&name.to_lowercase())
            .map(|&i| &self.ingredients[i])
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn templates(&self) -> &[MealTemplate] {
        &self.templates
    }

    /// Macros of a template at its reference portion.
    pub fn template_macros(&self, template: &MealTemplate) -> Macros {
        template
            .lines
            .iter()
            .filter_map(|line| {
                self.ingredient(&line.ingredient)
                    .and_then(|i| i.macros_for(line.quantity, line.unit))
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.templates.is_empty()
    }
}

fn misconfigured(reason: String) -> PlannerError {
    PlannerError::Planning(format!("catalog misconfigured: {}", reason))
}

fn validate_ingredient(ingredient: &Ingredient) -> Result<()> {
    if ingredient.name.trim().is_empty() {
        return Err(misconfigured(format!(
            "ingredient with order key {} has no name",
            ingredient.order
        )));
    }
    if !ingredient.base_unit.is_canonical() {
        return Err(misconfigured(format!(
            "'{}' base unit must be g, ml or unit, not {}",
            ingredient.name, ingredient.base_unit
        )));
    }
    if !ingredient.per_100.is_valid() {
        return Err(misconfigured(format!(
            "'{}' has invalid macro values",
            ingredient.name
        )));
    }
    if let Some(m) = ingredient
        .seasonal_months
        .iter()
        .find(|m| !(1..=12).contains(*m))
    {
        return Err(misconfigured(format!(
            "'{}' lists month {} outside 1-12",
            ingredient.name, m
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TemplateLine, Unit};

    fn ingredient(order: u32, name: &str, unit: Unit) -> Ingredient {
        Ingredient {
            order,
            name: name.to_string(),
            category: Category::Protein,
            base_unit: unit,
            seasonal_months: Default::default(),
            per_100: Macros::new(200.0, 20.0, 13.0, 0.0),
        }
    }

    fn template(order: u32, lines: Vec<(&str, f64, Unit)>) -> MealTemplate {
        MealTemplate {
            order,
            name: format!("Meal {}", order),
            lines: lines
                .into_iter()
                .map(|(n, q, u)| TemplateLine {
                    ingredient: n.to_string(),
                    quantity: q,
                    unit: u,
                })
                .collect(),
            instructions: vec![],
        }
    }

    #[test]
    fn test_sorted_by_order_key() {
        let catalog = FoodCatalog::new(
            vec![ingredient(2, "Beef", Unit::Gram), ingredient(1, "Salmon", Unit::Gram)],
            vec![
                template(9, vec![("beef", 100.0, Unit::Gram)]),
                template(3, vec![("SALMON", 0.2, Unit::Kilogram)]),
            ],
        )
        .unwrap();
        assert_eq!(catalog.ingredients()[0].name, "Salmon");
        assert_eq!(catalog.templates()[0].order, 3);
        assert!(catalog.ingredient("salmon").is_some());
    }

    #[test]
    fn test_template_macros_converts_units() {
        let catalog = FoodCatalog::new(
            vec![ingredient(1, "Salmon", Unit::Gram)],
            vec![template(1, vec![("Salmon", 0.15, Unit::Kilogram)])],
        )
        .unwrap();
        let m = catalog.template_macros(&catalog.templates()[0]);
        assert!((m.calories - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_unknown_ingredient() {
        let err = FoodCatalog::new(
            vec![ingredient(1, "Salmon", Unit::Gram)],
            vec![template(1, vec![("Haggis", 100.0, Unit::Gram)])],
        )
        .unwrap_err();
        assert!(matches!(err, PlannerError::Planning(_)));
    }

    #[test]
    fn test_rejects_incompatible_unit() {
        let err = FoodCatalog::new(
            vec![ingredient(1, "Salmon", Unit::Gram)],
            vec![template(1, vec![("Salmon", 100.0, Unit::Millilitre)])],
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_duplicates_and_bad_months() {
        assert!(FoodCatalog::new(
            vec![ingredient(1, "Salmon", Unit::Gram), ingredient(1, "Beef", Unit::Gram)],
            vec![],
        )
        .is_err());

        let mut bad = ingredient(1, "Kale", Unit::Gram);
        bad.seasonal_months.insert(13);
        assert!(FoodCatalog::new(vec![bad], vec![]).is_err());

        assert!(FoodCatalog::new(vec![ingredient(1, "Oil", Unit::Litre)], vec![]).is_err());
    }

    #[test]
    fn test_empty_catalog_is_constructible() {
        let catalog = FoodCatalog::new(vec![], vec![]).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = scottish_catalog().unwrap();
        assert!(catalog.templates().len() >= 10);
        for template in catalog.templates() {
            assert!(catalog.template_macros(template).calories > 0.0);
        }
    }

    #[test]
    fn test_builtin_templates_fit_default_split() {
        let catalog = scottish_catalog().unwrap();
        let ratio = crate::config::PlannerConfig::default().macro_ratio;
        for template in catalog.templates() {
            let macros = catalog.template_macros(template);
            let target = crate::planner::macro_target(macros.calories, &ratio).unwrap();
            assert!(
                target.within(&macros, 0.05, 0.10),
                "'{}' is off the default split: {:?}",
                template.name,
                target.relative_errors(&macros)
            );
        }

        // OMAD targets run past 2500 kcal; the 2.5 portion cap needs ~1000 kcal templates.
        let large = catalog
            .templates()
            .iter()
            .filter(|t| catalog.template_macros(t).calories >= 1000.0)
            .count();
        assert!(large >= 4);
    }
}
