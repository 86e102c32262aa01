use serde::{Deserialize, Serialize};

use crate::models::food::{Category, Unit};

/// One purchasable line of the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub ingredient: String,
    pub ingredient_order: u32,
    pub category: Category,
    /// Rounded up to the category's purchase increment.
    pub quantity: f64,
    pub unit: Unit,
    /// Unrounded sum across the plan, in `unit`.
    pub raw_quantity: f64,
}

impl ShoppingListItem {
    /// Quantity for display, switching to kg / l from 1000 g / ml.
    pub fn display_quantity(&self) -> String {
        match self.unit {
            Unit::Gram if self.quantity >= 1000.0 => format!("{:.2} kg", self.quantity / 1000.0),
            Unit::Millilitre if self.quantity >= 1000.0 => {
                format!("{:.2} l", self.quantity / 1000.0)
            }
            Unit::Piece => {
                let label = if self.quantity == 1.0 { "unit" } else { "units" };
                format!("{} {}", self.quantity, label)
            }
            _ => format!("{:.0} {}", self.quantity, self.unit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingGroup {
    pub category: Category,
    pub items: Vec<ShoppingListItem>,
}

/// Shopping list grouped by category in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub groups: Vec<ShoppingGroup>,
}

impl ShoppingList {
    pub fn items(&self) -> impl Iterator<Item = &ShoppingListItem> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find an item by ingredient name (case-insensitive).
    pub fn find(&self, ingredient: &str) -> Option<&ShoppingListItem> {
        let key = ingredient.to_lowercase();
        self.items().find(|i| i.ingredient.to_lowercase() == key)
    }
}
