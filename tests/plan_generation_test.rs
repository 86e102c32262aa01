use std::collections::BTreeSet;

use if_meal_planner_rs::PlannerError;
use if_meal_planner_rs::catalog::{FoodCatalog, scottish_catalog};
use if_meal_planner_rs::config::PlannerConfig;
use if_meal_planner_rs::models::{
    ActivityLevel, Category, FastingPreference, FastingSchedule, Ingredient, Macros, MealPlan,
    MealTemplate, Month, Sex, TemplateLine, Unit, UserProfile,
};
use if_meal_planner_rs::planner::{PLAN_DAYS, build_plan};

fn profile() -> UserProfile {
    UserProfile {
        age: 35,
        sex: Sex::Female,
        weight_kg: 68.0,
        height_cm: 165.0,
        activity_level: ActivityLevel::Light,
    }
}

fn preference(schedule: FastingSchedule) -> FastingPreference {
    FastingPreference {
        schedule,
        ..Default::default()
    }
}

fn single_template_catalog() -> FoodCatalog {
    FoodCatalog::new(
        vec![Ingredient {
            order: 1,
            name: "Keto Base".to_string(),
            category: Category::Protein,
            base_unit: Unit::Gram,
            seasonal_months: BTreeSet::new(),
            per_100: Macros::new(400.0, 25.0, 28.89, 10.0),
        }],
        vec![MealTemplate {
            order: 1,
            name: "Only Meal".to_string(),
            lines: vec![TemplateLine {
                ingredient: "Keto Base".to_string(),
                quantity: 150.0,
                unit: Unit::Gram,
            }],
            instructions: vec!["Serve.".to_string()],
        }],
    )
    .unwrap()
}

fn plan_json(seed: Option<u64>) -> String {
    let catalog = scottish_catalog().unwrap();
    let plan = build_plan(
        &profile(),
        &preference(FastingSchedule::Standard16x8),
        Month::new(11).unwrap(),
        &catalog,
        &PlannerConfig::default(),
        seed,
    )
    .unwrap();
    serde_json::to_string(&plan).unwrap()
}

#[test]
fn test_generation_is_deterministic() {
    assert_eq!(plan_json(None), plan_json(None));
    assert_eq!(plan_json(Some(42)), plan_json(Some(42)));
}

#[test]
fn test_plan_shape_and_quantities() {
    let catalog = scottish_catalog().unwrap();
    let plan = build_plan(
        &profile(),
        &preference(FastingSchedule::Standard16x8),
        Month::new(2).unwrap(),
        &catalog,
        &PlannerConfig::default(),
        None,
    )
    .unwrap();

    assert_eq!(plan.days.len(), PLAN_DAYS);
    for (i, day) in plan.days.iter().enumerate() {
        assert_eq!(day.day as usize, i + 1);
        assert_eq!(day.meals.len(), 2);
        for meal in &day.meals {
            assert!(!meal.lines.is_empty());
            assert!(meal.lines.iter().all(|l| l.quantity > 0.0));
        }
    }
}

#[test]
fn test_strict_days_within_five_percent() {
    let catalog = scottish_catalog().unwrap();
    for schedule in FastingSchedule::ALL {
        for month in [1, 4, 7, 10] {
            let plan = build_plan(
                &profile(),
                &preference(schedule),
                Month::new(month).unwrap(),
                &catalog,
                &PlannerConfig::default(),
                Some(7),
            )
            .unwrap();

            for day in plan.days.iter().filter(|d| !d.relaxed) {
                let drift = (day.totals.calories - day.target.calories).abs() / day.target.calories;
                assert!(drift <= 0.05, "day {} drifted {:.3}", day.day, drift);
            }
        }
    }
}

#[test]
fn test_meals_per_day_follow_schedule() {
    let catalog = scottish_catalog().unwrap();
    let meals_per_day = |schedule: FastingSchedule| {
        let plan = build_plan(
            &profile(),
            &preference(schedule),
            Month::new(6).unwrap(),
            &catalog,
            &PlannerConfig::default(),
            None,
        )
        .unwrap();
        plan.days.iter().map(|d| d.meals.len()).collect::<Vec<_>>()
    };

    assert_eq!(meals_per_day(FastingSchedule::Omad), vec![1; PLAN_DAYS]);
    assert_eq!(meals_per_day(FastingSchedule::Standard16x8), vec![2; PLAN_DAYS]);
    assert_eq!(meals_per_day(FastingSchedule::Beginner14x10), vec![3; PLAN_DAYS]);
}

#[test]
fn test_single_template_still_fills_every_day() {
    let catalog = single_template_catalog();
    let plan = build_plan(
        &profile(),
        &preference(FastingSchedule::Standard16x8),
        Month::new(3).unwrap(),
        &catalog,
        &PlannerConfig::default(),
        None,
    )
    .unwrap();

    assert_eq!(plan.days.len(), PLAN_DAYS);
    assert!(plan.meals().all(|m| m.name == "Only Meal"));
    assert_eq!(plan.distinct_meals(), 1);
}

#[test]
fn test_empty_catalog_is_planning_error() {
    let err = build_plan(
        &profile(),
        &preference(FastingSchedule::Standard16x8),
        Month::new(3).unwrap(),
        &FoodCatalog::default(),
        &PlannerConfig::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, PlannerError::Planning(_)));
}

#[test]
fn test_excluded_ingredient_never_planned() {
    let catalog = scottish_catalog().unwrap();
    let mut pref = preference(FastingSchedule::Beginner14x10);
    pref.excluded_ingredients.push("salmon".to_string());
    pref.dietary_exclusions.insert(Category::Dairy);

    let plan = build_plan(
        &profile(),
        &pref,
        Month::new(8).unwrap(),
        &catalog,
        &PlannerConfig::default(),
        None,
    )
    .unwrap();

    for line in plan.meals().flat_map(|m| m.lines.iter()) {
        assert!(!line.ingredient.name.to_lowercase().contains("salmon"));
        assert_ne!(line.ingredient.category, Category::Dairy);
    }
}

fn builtin_plan(profile: &UserProfile, schedule: FastingSchedule, month: u8) -> MealPlan {
    build_plan(
        profile,
        &preference(schedule),
        Month::new(month).unwrap(),
        &scottish_catalog().unwrap(),
        &PlannerConfig::default(),
        None,
    )
    .unwrap()
}

fn meal_names(plan: &MealPlan) -> BTreeSet<String> {
    plan.meals().map(|m| m.name.clone()).collect()
}

#[test]
fn test_builtin_catalog_rotates_meals() {
    for month in 1..=12 {
        let plan = builtin_plan(&profile(), FastingSchedule::Standard16x8, month);
        assert!(
            plan.distinct_meals() >= 4,
            "month {} used only {} meals",
            month,
            plan.distinct_meals()
        );
        assert!(plan.days.iter().all(|d| !d.relaxed), "month {} relaxed a day", month);
    }
}

#[test]
fn test_month_changes_selected_meals() {
    let january = meal_names(&builtin_plan(&profile(), FastingSchedule::Standard16x8, 1));
    let july = meal_names(&builtin_plan(&profile(), FastingSchedule::Standard16x8, 7));

    assert_ne!(january, july);
    assert!(january.contains("Venison Steak with Neeps & Savoy Cabbage"));
    assert!(!july.contains("Venison Steak with Neeps & Savoy Cabbage"));
    assert!(july.contains("Grilled Mackerel with Charred Broccoli"));
    assert!(!january.contains("Grilled Mackerel with Charred Broccoli"));
}

#[test]
fn test_builtin_catalog_fits_one_meal_a_day() {
    let moderate_male = UserProfile {
        age: 30,
        sex: Sex::Male,
        weight_kg: 70.0,
        height_cm: 175.0,
        activity_level: ActivityLevel::Moderate,
    };
    let plan = builtin_plan(&moderate_male, FastingSchedule::Omad, 1);

    assert!(plan.days.iter().all(|d| !d.relaxed));
    assert_eq!(plan.distinct_meals(), PLAN_DAYS);
}
