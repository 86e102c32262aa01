use std::collections::HashMap;

use tracing::debug;

use crate::config::RoundingTable;
use crate::models::{
    Category, MealLine, MealPlan, ShoppingGroup, ShoppingList, ShoppingListItem, Unit,
};

/// Slack for float noise when rounding up (e.g. 0.65 kg * 1000).
const ROUNDING_EPSILON: f64 = 1e-6;

#[derive(Debug)]
struct Tally {
    name: String,
    order: u32,
    category: Category,
    unit: Unit,
    raw: f64,
}

/// Round up to the next purchase increment.
pub fn round_up_to_increment(quantity: f64, increment: f64) -> f64 {
    let steps = (quantity / increment - ROUNDING_EPSILON).ceil().max(1.0);
    steps * increment
}

/// Quantity of a line in its ingredient's canonical unit.
///
/// Panics if the line's unit cannot be converted or its quantity is not
/// positive. Generated plans never carry such lines and `load_plan` rejects
/// them through `MealPlan::validate`.
fn canonical_quantity(line: &MealLine) -> (f64, Unit) {
    let target = line.ingredient.base_unit.canonical();
    let factor = line.unit.factor_to(target).unwrap_or_else(|| {
        panic!(
            "meal line for '{}' is measured in {} which cannot convert to {}",
            line.ingredient.name, line.unit, target
        )
    });
    assert!(
        line.quantity > 0.0,
        "meal line for '{}' has non-positive quantity {}",
        line.ingredient.name,
        line.quantity
    );
    (line.quantity * factor, target)
}

/// Build a shopping list from every meal of every day.
///
/// Quantities are summed per (ingredient, canonical unit), rounded up to the
/// category's purchase increment and grouped vegetable, protein, dairy, fat,
/// other. Items inside a group follow the ingredient order key.
pub fn aggregate(plan: &MealPlan, rounding: &RoundingTable) -> ShoppingList {
    let mut tallies: HashMap<(String, Unit), Tally> = HashMap::new();

    for line in plan.meals().flat_map(|m| m.lines.iter()) {
        let (quantity, unit) = canonical_quantity(line);
        tallies
            .entry((line.ingredient.key(), unit))
            .or_insert_with(|| Tally {
                name: line.ingredient.name.clone(),
                order: line.ingredient.order,
                category: line.ingredient.category,
                unit,
                raw: 0.0,
            })
            .raw += quantity;
    }

    let mut tallies: Vec<Tally> = tallies.into_values().collect();
    tallies.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then(a.order.cmp(&b.order))
            .then(a.unit.cmp(&b.unit))
    });

    let mut groups: Vec<ShoppingGroup> = Vec::new();
    for tally in tallies {
        let increment = rounding.increment(tally.category, tally.unit);
        let item = ShoppingListItem {
            quantity: round_up_to_increment(tally.raw, increment),
            ingredient: tally.name,
            ingredient_order: tally.order,
            category: tally.category,
            unit: tally.unit,
            raw_quantity: tally.raw,
        };

        match groups.last_mut() {
            Some(group) if group.category == item.category => group.items.push(item),
            _ => groups.push(ShoppingGroup {
                category: item.category,
                items: vec![item],
            }),
        }
    }

    let list = ShoppingList { groups };
    debug!(items = list.len(), groups = list.groups.len(), "shopping list aggregated");
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_up_to_increment() {
        assert_eq!(round_up_to_increment(300.0, 10.0), 300.0);
        assert_eq!(round_up_to_increment(301.0, 10.0), 310.0);
        assert_eq!(round_up_to_increment(2.0, 5.0), 5.0);
        assert_eq!(round_up_to_increment(650.000_000_001, 10.0), 650.0);
        assert_eq!(round_up_to_increment(2.5, 1.0), 3.0);
    }
}
