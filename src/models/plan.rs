use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::food::{Ingredient, Macros, Unit};
use crate::models::profile::{FastingSchedule, Month};

/// Calorie and macro goals for a day or a single meal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTarget {
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carb_g: f64,
}

impl MacroTarget {
    pub fn scaled(&self, share: f64) -> Self {
        Self {
            calories: self.calories * share,
            protein_g: self.protein_g * share,
            fat_g: self.fat_g * share,
            carb_g: self.carb_g * share,
        }
    }

    /// Relative errors (calories, protein, fat, carbs) of `actual` against this target.
    ///
    /// Targets below 1.0 are treated as 1.0 so a zero target does not divide by zero.
    pub fn relative_errors(&self, actual: &Macros) -> [f64; 4] {
        let rel = |a: f64, t: f64| (a - t).abs() / t.max(1.0);
        [
            rel(actual.calories, self.calories),
            rel(actual.protein_g, self.protein_g),
            rel(actual.fat_g, self.fat_g),
            rel(actual.carb_g, self.carb_g),
        ]
    }

    /// Whether `actual` is within `calorie_tol` on calories and `macro_tol` on each macro.
    pub fn within(&self, actual: &Macros, calorie_tol: f64, macro_tol: f64) -> bool {
        let [cal, protein, fat, carb] = self.relative_errors(actual);
        cal <= calorie_tol && protein <= macro_tol && fat <= macro_tol && carb <= macro_tol
    }
}

/// Time of day for a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MealTime {
    pub hour: u8,
    pub minute: u8,
}

impl MealTime {
    /// Builds a time from minutes after midnight, wrapping past 24h.
    pub fn from_minutes(minutes: u32) -> Self {
        let wrapped = minutes % (24 * 60);
        Self {
            hour: (wrapped / 60) as u8,
            minute: (wrapped % 60) as u8,
        }
    }

    pub fn minutes(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// The time `minutes` earlier, wrapping back past midnight.
    pub fn minus_minutes(&self, minutes: u32) -> Self {
        let day = 24 * 60;
        Self::from_minutes(self.minutes() + day - minutes % day)
    }
}

impl fmt::Display for MealTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Eating window and meal distribution for a fasting schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResolution {
    pub schedule: FastingSchedule,
    pub eating_window_hours: u8,
    pub window_start: MealTime,
    pub window_end: MealTime,
    pub meal_count: usize,
    pub per_meal_share: Vec<f64>,
    pub meal_times: Vec<MealTime>,
}

/// A cooking task started ahead of a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepStep {
    pub slot: usize,
    pub start: MealTime,
    pub task: String,
    pub duration: String,
}

/// Timing guidance for the resolved schedule, keyed by topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingAdvice {
    pub topic: String,
    pub advice: String,
}

/// An ingredient with the quantity used in a planned meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealLine {
    pub ingredient: Ingredient,
    pub quantity: f64,
    pub unit: Unit,
}

/// A meal template scaled to a slot's target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub template_order: u32,
    pub slot: usize,
    pub time: MealTime,
    pub portion: f64,
    pub lines: Vec<MealLine>,
    pub totals: Macros,
    pub target: MacroTarget,
    /// Index of the tolerance band that admitted this meal; `None` for a closest-match fallback.
    pub tolerance_band: Option<usize>,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u8,
    pub meals: Vec<Meal>,
    pub totals: Macros,
    pub target: MacroTarget,
    /// Set when the day's totals are not guaranteed to meet the strict tolerance band.
    pub relaxed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub days: Vec<DayPlan>,
    pub daily_target: MacroTarget,
    pub schedule: ScheduleResolution,
    pub month: Month,
    pub seed: Option<u64>,
    /// Same for every day, so stored once.
    #[serde(default)]
    pub prep_steps: Vec<PrepStep>,
    #[serde(default)]
    pub timing_advice: Vec<TimingAdvice>,
}

impl MealPlan {
    pub fn is_relaxed(&self) -> bool {
        self.days.iter().any(|d| d.relaxed)
    }

    pub fn meals(&self) -> impl Iterator<Item = &Meal> {
        self.days.iter().flat_map(|d| d.meals.iter())
    }

    /// Number of distinct templates used across the plan.
    pub fn distinct_meals(&self) -> usize {
        let mut orders: Vec<u32> = self.meals().map(|m| m.template_order).collect();
        orders.sort_unstable();
        orders.dedup();
        orders.len()
    }

    /// Check a plan read from outside the generator before it is aggregated.
    ///
    /// Every line needs a positive finite quantity in a unit that converts to
    /// its ingredient's base unit.
    pub fn validate(&self) -> Result<()> {
        for day in &self.days {
            for meal in &day.meals {
                for line in &meal.lines {
                    let name = &line.ingredient.name;
                    if !(line.quantity.is_finite() && line.quantity > 0.0) {
                        return Err(PlannerError::validation(
                            "plan",
                            format!(
                                "day {} '{}' uses {} {} of '{}'; quantities must be positive",
                                day.day, meal.name, line.quantity, line.unit, name
                            ),
                        ));
                    }
                    let base = line.ingredient.base_unit.canonical();
                    if line.unit.factor_to(base).is_none() {
                        return Err(PlannerError::validation(
                            "plan",
                            format!(
                                "day {} '{}' measures '{}' in {}, which cannot convert to {}",
                                day.day, meal.name, name, line.unit, base
                            ),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}
