use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::models::profile::Month;

/// Ingredient category. Variant order is the shopping list presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetable,
    Protein,
    Dairy,
    Fat,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Vegetable,
        Category::Protein,
        Category::Dairy,
        Category::Fat,
        Category::Other,
    ];

    /// Shopping list heading.
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Vegetable => "Vegetables",
            Category::Protein => "Meat & Fish",
            Category::Dairy => "Dairy",
            Category::Fat => "Healthy Fats",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.heading())
    }
}

/// Metric units. `g`, `ml` and `unit` are canonical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "ml")]
    Millilitre,
    #[serde(rename = "l")]
    Litre,
    #[serde(rename = "unit")]
    Piece,
}

impl Unit {
    /// Canonical unit of the same dimension.
    pub fn canonical(&self) -> Unit {
        match self {
            Unit::Gram | Unit::Kilogram => Unit::Gram,
            Unit::Millilitre | Unit::Litre => Unit::Millilitre,
            Unit::Piece => Unit::Piece,
        }
    }

    /// Multiplier from this unit to its canonical unit.
    pub fn to_canonical_factor(&self) -> f64 {
        match self {
            Unit::Kilogram | Unit::Litre => 1000.0,
            Unit::Gram | Unit::Millilitre | Unit::Piece => 1.0,
        }
    }

    /// Factor converting a quantity in `self` into `target`, if both share a dimension.
    pub fn factor_to(&self, target: Unit) -> Option<f64> {
        if self.canonical() != target.canonical() {
            return None;
        }
        Some(self.to_canonical_factor() / target.to_canonical_factor())
    }

    pub fn is_canonical(&self) -> bool {
        self.canonical() == *self
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Millilitre => "ml",
            Unit::Litre => "l",
            Unit::Piece => "unit",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Energy and macronutrient amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carb_g: f64,
}

impl Macros {
    pub fn new(calories: f64, protein_g: f64, fat_g: f64, carb_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            fat_g,
            carb_g,
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein_g: self.protein_g * factor,
            fat_g: self.fat_g * factor,
            carb_g: self.carb_g * factor,
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein_g, self.fat_g, self.carb_g]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            calories: self.calories + rhs.calories,
            protein_g: self.protein_g + rhs.protein_g,
            fat_g: self.fat_g + rhs.fat_g,
            carb_g: self.carb_g + rhs.carb_g,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Macros) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Macros {
    fn sum<I: Iterator<Item = Macros>>(iter: I) -> Macros {
        iter.fold(Macros::default(), Add::add)
    }
}

/// A catalog ingredient.
///
/// `per_100` holds macros per 100 base units (100 g, 100 ml or 100 pieces).
/// An empty `seasonal_months` set means the ingredient is available all year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub order: u32,
    pub name: String,
    pub category: Category,
    pub base_unit: Unit,
    #[serde(default)]
    pub seasonal_months: BTreeSet<u8>,
    pub per_100: Macros,
}

impl Ingredient {
    pub fn in_season(&self, month: Month) -> bool {
        self.seasonal_months.is_empty() || self.seasonal_months.contains(&month.number())
    }

    /// Macros for a quantity expressed in `unit`, if convertible to the base unit.
    pub fn macros_for(&self, quantity: f64, unit: Unit) -> Option<Macros> {
        let factor = unit.factor_to(self.base_unit)?;
        Some(self.per_100.scaled(quantity * factor / 100.0))
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// One line of a meal template, referring to an ingredient by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateLine {
    pub ingredient: String,
    pub quantity: f64,
    pub unit: Unit,
}

/// A catalog meal template at its reference portion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealTemplate {
    pub order: u32,
    pub name: String,
    pub lines: Vec<TemplateLine>,
    #[serde(default)]
    pub instructions: Vec<String>,
}
