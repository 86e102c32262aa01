use crate::models::{DayPlan, Macros, MealLine, MealPlan, Month, PrepStep, ShoppingList, Unit};
use crate::planner::{CalorieBreakdown, PREP_TIPS};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[usize::from(month.number()) - 1]
}

fn format_macros(m: &Macros) -> String {
    format!(
        "{:>5.0} kcal | P {:>5.1} g | F {:>5.1} g | C {:>5.1} g",
        m.calories, m.protein_g, m.fat_g, m.carb_g
    )
}

fn format_line(line: &MealLine) -> String {
    match line.unit {
        Unit::Piece => {
            let label = if line.quantity == 1.0 { "unit" } else { "units" };
            format!("{} {} {}", line.quantity, label, line.ingredient.name)
        }
        unit => format!("{} {} {}", line.quantity, unit, line.ingredient.name),
    }
}

fn format_prep_step(step: &PrepStep) -> String {
    format!("{}  {} ({})", step.start, step.task, step.duration)
}

/// Display the calorie derivation for a profile.
pub fn display_calorie_breakdown(breakdown: &CalorieBreakdown, recommended: f64) {
    println!();
    println!("=== Daily Calories ===");
    println!("BMR:         {:>6.0} kcal", breakdown.bmr);
    println!("TDEE:        {:>6.0} kcal", breakdown.tdee);
    println!("Target:      {:>6.0} kcal", breakdown.target);
    println!("Recommended: {:>6.0} kcal", recommended);
    println!();
}

fn display_day(day: &DayPlan) {
    let marker = if day.relaxed { "  (relaxed)" } else { "" };
    println!("--- Day {}{} ---", day.day, marker);

    for meal in &day.meals {
        let fallback = if meal.tolerance_band.is_none() {
            "  [closest match]"
        } else {
            ""
        };
        println!("{}  {}{}", meal.time, meal.name, fallback);
        for line in &meal.lines {
            println!("        - {}", format_line(line));
        }
        println!("        {}", format_macros(&meal.totals));
    }

    println!("  Day total: {}", format_macros(&day.totals));
    println!();
}

/// Display a full meal plan, day by day.
pub fn display_meal_plan(plan: &MealPlan) {
    if plan.days.is_empty() {
        println!("No meal plan generated.");
        return;
    }

    let schedule = &plan.schedule;
    println!();
    println!("=== {}-Day Meal Plan ({}) ===", plan.days.len(), month_name(plan.month));
    println!(
        "Schedule {}: eating {} - {}, {} meal(s) per day",
        schedule.schedule, schedule.window_start, schedule.window_end, schedule.meal_count
    );
    println!(
        "Daily target: {:.0} kcal | P {:.1} g | F {:.1} g | C {:.1} g",
        plan.daily_target.calories,
        plan.daily_target.protein_g,
        plan.daily_target.fat_g,
        plan.daily_target.carb_g
    );
    if !plan.prep_steps.is_empty() {
        println!("Daily prep:");
        for step in &plan.prep_steps {
            println!("  {}", format_prep_step(step));
        }
    }
    println!();

    for day in &plan.days {
        display_day(day);
    }

    println!("--- Summary ---");
    println!("Distinct meals: {}", plan.distinct_meals());
    if plan.is_relaxed() {
        println!("Note: some days could not meet the strict tolerance and were relaxed.");
    }

    if !plan.timing_advice.is_empty() {
        println!();
        println!("--- Meal Timing ---");
        for tip in &plan.timing_advice {
            println!("  {}: {}", tip.topic, tip.advice);
        }
    }

    println!();
    println!("--- Prep Tips ---");
    for tip in PREP_TIPS {
        println!("  - {}", tip);
    }
    println!();
}

/// Display the shopping list grouped by category.
pub fn display_shopping_list(list: &ShoppingList) {
    if list.is_empty() {
        println!("Shopping list is empty.");
        return;
    }

    println!();
    println!("=== Shopping List ({} items) ===", list.len());

    let width = list.items().map(|i| i.ingredient.len()).max().unwrap_or(10);
    for group in &list.groups {
        println!();
        println!("{}:", group.category.heading());
        for item in &group.items {
            println!(
                "  {:<width$}  {:>10}",
                item.ingredient,
                item.display_quantity(),
                width = width
            );
        }
    }
    println!();
}
