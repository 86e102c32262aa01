use crate::models::ActivityLevel;
use crate::models::Sex;

/// Days covered by one plan.
pub const PLAN_DAYS: usize = 4;

// ─────────────────────────────────────────────────────────────────────────────
// Biometrics (Mifflin-St Jeor)
// ─────────────────────────────────────────────────────────────────────────────

pub const BMR_WEIGHT_COEFF: f64 = 10.0;
pub const BMR_HEIGHT_COEFF: f64 = 6.25;
pub const BMR_AGE_COEFF: f64 = 5.0;
pub const BMR_MALE_CONSTANT: f64 = 5.0;
pub const BMR_FEMALE_CONSTANT: f64 = -161.0;

/// Accepted range for the goal adjustment percentage.
pub const GOAL_ADJUSTMENT_MIN_PCT: f64 = -50.0;
pub const GOAL_ADJUSTMENT_MAX_PCT: f64 = 50.0;

/// Display rounding for the recommended daily calories.
pub const RECOMMENDED_ROUNDING_KCAL: f64 = 50.0;

/// kcal per gram of each macro.
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;
pub const KCAL_PER_G_CARB: f64 = 4.0;

/// Default macro split (percent of calories): high fat, moderate protein, low carb.
pub const DEFAULT_PROTEIN_PCT: f64 = 25.0;
pub const DEFAULT_FAT_PCT: f64 = 65.0;
pub const DEFAULT_CARB_PCT: f64 = 10.0;

/// Allowed drift when checking that macro percentages sum to 100.
pub const MACRO_PCT_SUM_EPSILON: f64 = 0.01;

// ─────────────────────────────────────────────────────────────────────────────
// Fasting schedules
// ─────────────────────────────────────────────────────────────────────────────

/// Two-meal split: the fast-breaking meal takes the larger share.
pub const TWO_MEAL_SPLIT: [f64; 2] = [0.6, 0.4];

/// Three-meal split for wider eating windows.
pub const THREE_MEAL_SPLIT: [f64; 3] = [0.4, 0.3, 0.3];

/// Above this many kcal a 20:4 day is split into two meals.
pub const SINGLE_MEAL_CEILING_KCAL: f64 = 1500.0;

/// Last meal is served this long before the window closes.
pub const LAST_MEAL_BEFORE_CLOSE_MIN: u32 = 60;

/// Prep lead time before the first meal, and before every later one.
pub const FIRST_MEAL_PREP_LEAD_MIN: u32 = 30;
pub const LATER_MEAL_PREP_LEAD_MIN: u32 = 25;

/// Windows up to this many hours get single-meal timing advice.
pub const SHORT_WINDOW_HOURS: u8 = 4;
/// Windows up to this many hours get first/last meal timing advice.
pub const STANDARD_WINDOW_HOURS: u8 = 8;

pub const PREP_TIPS: [&str; 7] = [
    "Cook proteins in bulk at the start of the plan",
    "Wash and chop vegetables ahead for quick cooking",
    "Keep nuts and cheddar on hand for a fasting emergency",
    "Break the fast with something fatty such as avocado or butter",
    "Stay hydrated with water and electrolytes during the fast",
    "Batch-cook salmon and beef for the later days",
    "Buy avocados at different ripeness stages",
];

// ─────────────────────────────────────────────────────────────────────────────
// Meal selection
// ─────────────────────────────────────────────────────────────────────────────

/// Tolerance bands (calorie, per-macro) tried in order; the first is the strict band.
pub const DEFAULT_TOLERANCE_BANDS: [(f64, f64); 3] = [(0.05, 0.10), (0.15, 0.15), (0.25, 0.25)];

/// Portion multiplier bounds applied when scaling a template to a slot target.
pub const DEFAULT_MIN_PORTION: f64 = 0.5;
pub const DEFAULT_MAX_PORTION: f64 = 2.5;

/// Cooking precision for scaled quantities.
pub const MASS_VOLUME_STEP: f64 = 1.0;
pub const PIECE_STEP: f64 = 0.5;

// ─────────────────────────────────────────────────────────────────────────────
// Shopping list rounding (purchase increments in canonical units)
// ─────────────────────────────────────────────────────────────────────────────

pub const FRESH_GRAM_INCREMENT: f64 = 10.0;
pub const DRY_GRAM_INCREMENT: f64 = 5.0;
pub const LIQUID_ML_INCREMENT: f64 = 10.0;
pub const PIECE_INCREMENT: f64 = 1.0;

/// BMR sex constant.
pub fn sex_constant(sex: Sex) -> f64 {
    match sex {
        Sex::Male => BMR_MALE_CONSTANT,
        Sex::Female => BMR_FEMALE_CONSTANT,
    }
}

/// TDEE multiplier for an activity level.
pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
        ActivityLevel::VeryActive => 1.9,
    }
}
