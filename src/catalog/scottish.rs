//! Built-in catalog of Scottish produce and keto-leaning fasting meals.

use crate::catalog::FoodCatalog;
use crate::error::Result;
use crate::models::{Category, Ingredient, Macros, MealTemplate, TemplateLine, Unit};

const ALL_YEAR: &[u8] = &[];
const WINTER_GREENS: &[u8] = &[10, 11, 12, 1, 2, 3];
const SPRING_AUTUMN_LEAVES: &[u8] = &[3, 4, 5, 6, 9, 10];
const SUMMER_BRASSICAS: &[u8] = &[6, 7, 8, 9, 10];
const AUTUMN_TO_SPRING: &[u8] = &[9, 10, 11, 12, 1, 2, 3, 4];
const CAULIFLOWER_MONTHS: &[u8] = &[1, 2, 3, 8, 9, 10, 11, 12];
const SOFT_FRUIT: &[u8] = &[6, 7, 8, 9];
const MACKEREL_RUN: &[u8] = &[6, 7, 8, 9, 10];
const VENISON_SEASON: &[u8] = &[10, 11, 12, 1, 2];
const R_MONTHS: &[u8] = &[9, 10, 11, 12, 1, 2, 3, 4];

#[allow(clippy::too_many_arguments)]
fn ingredient(
    order: u32,
    name: &str,
    category: Category,
    base_unit: Unit,
    months: &[u8],
    calories: f64,
    protein: f64,
    fat: f64,
    carbs: f64,
) -> Ingredient {
    Ingredient {
        order,
        name: name.to_string(),
        category,
        base_unit,
        seasonal_months: months.iter().copied().collect(),
        per_100: Macros::new(calories, protein, fat, carbs),
    }
}

fn meal(order: u32, name: &str, lines: &[(&str, f64, Unit)], instructions: &[&str]) -> MealTemplate {
    MealTemplate {
        order,
        name: name.to_string(),
        lines: lines
            .iter()
            .map(|&(ingredient, quantity, unit)| TemplateLine {
                ingredient: ingredient.to_string(),
                quantity,
                unit,
            })
            .collect(),
        instructions: instructions.iter().map(|s| s.to_string()).collect(),
    }
}

fn ingredients() -> Vec<Ingredient> {
    use Category::*;
    use Unit::*;

    // Per 100 g / 100 ml / 100 pieces: kcal, protein, fat, net carbs.
    vec![
        ingredient(1, "Scottish Salmon", Protein, Gram, ALL_YEAR, 208.0, 20.4, 13.4, 0.0),
        ingredient(2, "Mackerel", Protein, Gram, MACKEREL_RUN, 262.0, 24.0, 18.0, 0.0),
        ingredient(3, "Smoked Haddock", Protein, Gram, ALL_YEAR, 101.0, 23.0, 0.9, 0.0),
        ingredient(4, "Aberdeen Angus Beef", Protein, Gram, ALL_YEAR, 250.0, 26.0, 17.0, 0.0),
        ingredient(5, "Scottish Venison", Protein, Gram, VENISON_SEASON, 158.0, 30.0, 3.2, 0.0),
        ingredient(6, "Free-range Eggs", Protein, Piece, ALL_YEAR, 7800.0, 630.0, 530.0, 60.0),
        ingredient(7, "Chicken Thighs (skin-on)", Protein, Gram, ALL_YEAR, 229.0, 18.6, 17.0, 0.0),
        ingredient(8, "Rope-grown Mussels", Protein, Gram, R_MONTHS, 86.0, 12.0, 2.2, 3.7),
        ingredient(9, "Scottish Cheddar", Dairy, Gram, ALL_YEAR, 403.0, 25.0, 33.0, 1.3),
        ingredient(10, "Double Cream", Dairy, Millilitre, ALL_YEAR, 467.0, 1.7, 50.0, 1.6),
        ingredient(11, "Greek Yoghurt (full-fat)", Dairy, Gram, ALL_YEAR, 133.0, 9.0, 10.0, 4.0),
        ingredient(12, "Salted Butter", Fat, Gram, ALL_YEAR, 717.0, 0.9, 81.0, 0.1),
        ingredient(13, "Cold-pressed Rapeseed Oil", Fat, Millilitre, ALL_YEAR, 828.0, 0.0, 92.0, 0.0),
        ingredient(14, "Avocado", Fat, Gram, ALL_YEAR, 160.0, 2.0, 14.7, 1.8),
        ingredient(15, "Mixed Nuts", Fat, Gram, ALL_YEAR, 607.0, 15.0, 54.0, 16.0),
        ingredient(16, "Curly Kale", Vegetable, Gram, WINTER_GREENS, 35.0, 2.9, 1.5, 4.4),
        ingredient(17, "Spinach", Vegetable, Gram, SPRING_AUTUMN_LEAVES, 23.0, 2.9, 0.4, 3.6),
        ingredient(18, "Broccoli", Vegetable, Gram, SUMMER_BRASSICAS, 34.0, 2.8, 0.4, 7.0),
        ingredient(19, "Cauliflower", Vegetable, Gram, CAULIFLOWER_MONTHS, 25.0, 1.9, 0.3, 5.0),
        ingredient(20, "Leeks", Vegetable, Gram, AUTUMN_TO_SPRING, 31.0, 1.5, 0.3, 7.0),
        ingredient(21, "Savoy Cabbage", Vegetable, Gram, AUTUMN_TO_SPRING, 27.0, 2.0, 0.1, 6.0),
        ingredient(22, "Swede (Neeps)", Vegetable, Gram, WINTER_GREENS, 37.0, 1.1, 0.2, 8.6),
        ingredient(23, "Carrots", Vegetable, Gram, ALL_YEAR, 41.0, 0.9, 0.2, 6.8),
        ingredient(24, "Scottish Raspberries", Other, Gram, SOFT_FRUIT, 52.0, 1.2, 0.7, 5.4),
        ingredient(25, "Rough Oatcakes", Other, Gram, ALL_YEAR, 445.0, 10.0, 18.0, 60.0),
        ingredient(26, "Cold-smoked Salmon", Protein, Gram, ALL_YEAR, 117.0, 18.0, 4.3, 0.0),
    ]
}

fn meals() -> Vec<MealTemplate> {
    use Unit::*;

    vec![
        meal(
            1,
            "Pan-seared Salmon with Buttered Kale & Oatcakes",
            &[
                ("Scottish Salmon", 230.0, Gram),
                ("Curly Kale", 80.0, Gram),
                ("Salted Butter", 30.0, Gram),
                ("Rough Oatcakes", 30.0, Gram),
            ],
            &[
                "Pat the salmon dry and season with sea salt.",
                "Sear skin-side down in a third of the butter over a high heat for 4-5 minutes per side.",
                "Wilt the kale in the remaining butter for 3 minutes and serve with the oatcakes.",
            ],
        ),
        meal(
            2,
            "Smoked Haddock & Spinach Omelette",
            &[
                ("Free-range Eggs", 3.0, Piece),
                ("Smoked Haddock", 100.0, Gram),
                ("Spinach", 150.0, Gram),
                ("Salted Butter", 20.0, Gram),
                ("Double Cream", 40.0, Millilitre),
                ("Rough Oatcakes", 20.0, Gram),
            ],
            &[
                "Poach the haddock in the cream for 5 minutes, then flake.",
                "Whisk the eggs, cook in foaming butter and fold through the haddock and spinach.",
                "Serve with oatcakes on the side.",
            ],
        ),
        meal(
            3,
            "Aberdeen Angus Steak with Cauliflower Cheese",
            &[
                ("Aberdeen Angus Beef", 170.0, Gram),
                ("Cauliflower", 250.0, Gram),
                ("Carrots", 180.0, Gram),
                ("Scottish Cheddar", 55.0, Gram),
                ("Double Cream", 40.0, Millilitre),
                ("Salted Butter", 10.0, Gram),
            ],
            &[
                "Heat the oven to 200°C.",
                "Par-boil the cauliflower, cover with cream and cheddar and bake for 20 minutes.",
                "Roast the carrots alongside for the same time.",
                "Sear the steak in butter to medium-rare and rest for 5 minutes.",
            ],
        ),
        meal(
            4,
            "Grilled Mackerel with Charred Broccoli",
            &[
                ("Mackerel", 200.0, Gram),
                ("Broccoli", 100.0, Gram),
                ("Cold-pressed Rapeseed Oil", 25.0, Millilitre),
                ("Rough Oatcakes", 25.0, Gram),
            ],
            &[
                "Grill the mackerel fillets under a high heat for 3 minutes per side.",
                "Toss the broccoli in oil and char in a hot pan.",
                "Serve with crumbled oatcakes scattered over.",
            ],
        ),
        meal(
            5,
            "Venison Steak with Neeps & Savoy Cabbage",
            &[
                ("Scottish Venison", 160.0, Gram),
                ("Swede (Neeps)", 130.0, Gram),
                ("Savoy Cabbage", 160.0, Gram),
                ("Salted Butter", 45.0, Gram),
                ("Double Cream", 40.0, Millilitre),
            ],
            &[
                "Boil the swede and mash with the cream and half the butter.",
                "Sear the venison for 3 minutes per side and rest.",
                "Shred the cabbage and sauté in the remaining butter.",
            ],
        ),
        meal(
            6,
            "Smoked Salmon, Avocado & Egg Plate",
            &[
                ("Free-range Eggs", 4.0, Piece),
                ("Avocado", 160.0, Gram),
                ("Cold-smoked Salmon", 150.0, Gram),
                ("Rough Oatcakes", 30.0, Gram),
                ("Cold-pressed Rapeseed Oil", 10.0, Millilitre),
            ],
            &[
                "Fry the eggs in the rapeseed oil.",
                "Serve with sliced avocado, smoked salmon and oatcakes.",
            ],
        ),
        meal(
            7,
            "Chicken Thighs with Creamed Leeks",
            &[
                ("Chicken Thighs (skin-on)", 260.0, Gram),
                ("Leeks", 300.0, Gram),
                ("Double Cream", 20.0, Millilitre),
                ("Salted Butter", 10.0, Gram),
            ],
            &[
                "Roast the chicken thighs skin-up at 200°C for 35 minutes.",
                "Sweat the leeks in butter, add the cream and reduce for 5 minutes.",
            ],
        ),
        meal(
            8,
            "Smoked Haddock Chowder (no potato)",
            &[
                ("Smoked Haddock", 260.0, Gram),
                ("Carrots", 150.0, Gram),
                ("Double Cream", 70.0, Millilitre),
                ("Salted Butter", 40.0, Gram),
                ("Rough Oatcakes", 25.0, Gram),
            ],
            &[
                "Dice the carrots and soften in butter for 8 minutes.",
                "Add the cream and 150 ml water, simmer the haddock for 8 minutes and flake.",
                "Serve with oatcakes.",
            ],
        ),
        meal(
            9,
            "Moules Marinière with Cream",
            &[
                ("Rope-grown Mussels", 0.4, Kilogram),
                ("Leeks", 70.0, Gram),
                ("Double Cream", 50.0, Millilitre),
                ("Salted Butter", 30.0, Gram),
            ],
            &[
                "Clean the mussels and discard any that stay open.",
                "Soften the leeks in butter, add the mussels, cover and steam for 5 minutes.",
                "Stir through the cream and serve.",
            ],
        ),
        meal(
            10,
            "Greek Yoghurt, Raspberries & Boiled Eggs",
            &[
                ("Greek Yoghurt (full-fat)", 290.0, Gram),
                ("Scottish Raspberries", 50.0, Gram),
                ("Mixed Nuts", 25.0, Gram),
                ("Free-range Eggs", 3.0, Piece),
            ],
            &[
                "Boil the eggs for 8 minutes and cool in cold water.",
                "Top the yoghurt with raspberries and roughly chopped nuts.",
            ],
        ),
        meal(
            11,
            "Cheddar, Smoked Salmon & Oatcake Board",
            &[
                ("Scottish Cheddar", 130.0, Gram),
                ("Cold-smoked Salmon", 130.0, Gram),
                ("Rough Oatcakes", 25.0, Gram),
                ("Mixed Nuts", 40.0, Gram),
                ("Carrots", 50.0, Gram),
            ],
            &["Slice the cheddar and carrots and serve with the smoked salmon, oatcakes and nuts."],
        ),
        meal(
            12,
            "Beef & Broccoli Stir-fry",
            &[
                ("Aberdeen Angus Beef", 170.0, Gram),
                ("Broccoli", 260.0, Gram),
                ("Cold-pressed Rapeseed Oil", 25.0, Millilitre),
                ("Mixed Nuts", 25.0, Gram),
            ],
            &[
                "Slice the beef thinly and stir-fry in very hot oil for 2 minutes.",
                "Add the broccoli with a splash of water and cook for 4 minutes more.",
                "Scatter over the nuts.",
            ],
        ),
        meal(
            13,
            "Roast Chicken Thighs with Buttered Carrots",
            &[
                ("Chicken Thighs (skin-on)", 330.0, Gram),
                ("Carrots", 380.0, Gram),
                ("Salted Butter", 20.0, Gram),
            ],
            &[
                "Roast the chicken thighs skin-up at 200°C for 35 minutes.",
                "Boil the carrots for 10 minutes and toss in the butter.",
            ],
        ),
        meal(
            14,
            "Baked Salmon with Herb Cream & Roast Carrots",
            &[
                ("Scottish Salmon", 290.0, Gram),
                ("Carrots", 370.0, Gram),
                ("Double Cream", 20.0, Millilitre),
                ("Salted Butter", 25.0, Gram),
            ],
            &[
                "Heat the oven to 190°C.",
                "Roast the carrots in the butter for 30 minutes.",
                "Bake the salmon for the last 15 minutes and spoon over the cream with chopped herbs.",
            ],
        ),
    ]
}

/// The default catalog shipped with the planner.
pub fn scottish_catalog() -> Result<FoodCatalog> {
    FoodCatalog::new(ingredients(), meals())
}
