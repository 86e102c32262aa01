pub mod prompts;
pub mod render;

pub use prompts::{
    NameMatch, match_ingredient_name, prompt_excluded_ingredients, prompt_fasting_preference,
    prompt_month, prompt_profile, prompt_yes_no,
};
pub use render::{
    display_calorie_breakdown, display_meal_plan, display_shopping_list, month_name,
};
