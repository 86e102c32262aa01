pub mod biometrics;
pub mod constants;
pub mod generator;
pub mod macros;
pub mod ranking;
pub mod schedule;

pub use biometrics::{
    CalorieBreakdown, calculate_bmr, calculate_tdee, calorie_breakdown, compute_calorie_target,
    recommended_calories,
};
pub use constants::*;
pub use generator::{PlanRequest, build_plan, generate_plan};
pub use macros::macro_target;
pub use schedule::{per_meal_targets, prep_timeline, resolve_schedule, timing_advice};
