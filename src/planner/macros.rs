use crate::config::MacroRatio;
use crate::error::{PlannerError, Result};
use crate::models::MacroTarget;
use crate::planner::constants::{KCAL_PER_G_CARB, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};

/// Split a calorie goal into gram targets using `ratio`.
pub fn macro_target(calories: f64, ratio: &MacroRatio) -> Result<MacroTarget> {
    ratio.validate()?;
    if !calories.is_finite() || calories <= 0.0 {
        return Err(PlannerError::validation(
            "calories",
            "must be a positive number",
        ));
    }

    Ok(MacroTarget {
        calories,
        protein_g: calories * ratio.protein_pct / 100.0 / KCAL_PER_G_PROTEIN,
        fat_g: calories * ratio.fat_pct / 100.0 / KCAL_PER_G_FAT,
        carb_g: calories * ratio.carb_pct / 100.0 / KCAL_PER_G_CARB,
    })
}
