pub mod food;
pub mod plan;
pub mod profile;
pub mod shopping;

pub use food::{Category, Ingredient, Macros, MealTemplate, TemplateLine, Unit};
pub use plan::{
    DayPlan, MacroTarget, Meal, MealLine, MealPlan, MealTime, PrepStep, ScheduleResolution,
    TimingAdvice,
};
pub use profile::{ActivityLevel, FastingPreference, FastingSchedule, Month, Sex, UserProfile};
pub use shopping::{ShoppingGroup, ShoppingList, ShoppingListItem};
