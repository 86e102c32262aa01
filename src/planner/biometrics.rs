use serde::Serialize;
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::models::UserProfile;
use crate::planner::constants::*;

/// BMR, TDEE and the goal-adjusted daily target, all in kcal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalorieBreakdown {
    pub bmr: f64,
    pub tdee: f64,
    pub target: f64,
}

/// Basal metabolic rate via Mifflin-St Jeor.
///
/// `10*weight_kg + 6.25*height_cm - 5*age + s`, with s = +5 (male) or -161 (female).
pub fn calculate_bmr(profile: &UserProfile) -> f64 {
    BMR_WEIGHT_COEFF * profile.weight_kg + BMR_HEIGHT_COEFF * profile.height_cm
        - BMR_AGE_COEFF * profile.age as f64
        + sex_constant(profile.sex)
}

/// Total daily energy expenditure: BMR scaled by activity level.
pub fn calculate_tdee(profile: &UserProfile) -> f64 {
    calculate_bmr(profile) * activity_multiplier(profile.activity_level)
}

fn validate_goal_adjustment(goal_adjustment_pct: f64) -> Result<()> {
    if !goal_adjustment_pct.is_finite()
        || !(GOAL_ADJUSTMENT_MIN_PCT..=GOAL_ADJUSTMENT_MAX_PCT).contains(&goal_adjustment_pct)
    {
        return Err(PlannerError::validation(
            "goal_adjustment_pct",
            format!(
                "{} is outside {}..={}",
                goal_adjustment_pct, GOAL_ADJUSTMENT_MIN_PCT, GOAL_ADJUSTMENT_MAX_PCT
            ),
        ));
    }
    Ok(())
}

/// Full calorie derivation for a profile.
///
/// The target is TDEE adjusted by `goal_adjustment_pct`, never below BMR.
pub fn calorie_breakdown(profile: &UserProfile, goal_adjustment_pct: f64) -> Result<CalorieBreakdown> {
    profile.validate()?;
    validate_goal_adjustment(goal_adjustment_pct)?;

    let bmr = calculate_bmr(profile);
    if bmr <= 0.0 {
        return Err(PlannerError::validation(
            "profile",
            format!("estimated BMR {:.0} kcal is not positive", bmr),
        ));
    }
    let tdee = bmr * activity_multiplier(profile.activity_level);
    let adjusted = tdee * (1.0 + goal_adjustment_pct / 100.0);
    let target = adjusted.max(bmr);

    debug!(bmr, tdee, adjusted, target, "calorie target computed");

    Ok(CalorieBreakdown { bmr, tdee, target })
}

/// Daily calorie target for a profile and goal adjustment.
pub fn compute_calorie_target(profile: &UserProfile, goal_adjustment_pct: f64) -> Result<f64> {
    calorie_breakdown(profile, goal_adjustment_pct).map(|b| b.target)
}

/// Target rounded to the nearest 50 kcal for display.
pub fn recommended_calories(target: f64) -> f64 {
    (target / RECOMMENDED_ROUNDING_KCAL).round() * RECOMMENDED_ROUNDING_KCAL
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Sex};

    fn profile(sex: Sex, activity: ActivityLevel) -> UserProfile {
        UserProfile {
            age: 30,
            sex,
            weight_kg: 70.0,
            height_cm: 175.0,
            activity_level: activity,
        }
    }

    #[test]
    fn test_bmr_male() {
        let bmr = calculate_bmr(&profile(Sex::Male, ActivityLevel::Sedentary));
        assert!((bmr - 1648.75).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_female() {
        let bmr = calculate_bmr(&profile(Sex::Female, ActivityLevel::Sedentary));
        assert!((bmr - 1482.75).abs() < 1e-9);
    }

    #[test]
    fn test_tdee_multipliers() {
        let p = profile(Sex::Male, ActivityLevel::VeryActive);
        assert!((calculate_tdee(&p) - 1648.75 * 1.9).abs() < 1e-9);
    }

    #[test]
    fn test_deficit_applied() {
        let p = profile(Sex::Male, ActivityLevel::Moderate);
        let b = calorie_breakdown(&p, -15.0).unwrap();
        assert!((b.target - 1648.75 * 1.55 * 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_target_floored_at_bmr() {
        let p = profile(Sex::Male, ActivityLevel::Sedentary);
        // 1.2 * 0.5 = 0.6 of BMR, below the floor
        let b = calorie_breakdown(&p, -50.0).unwrap();
        assert_eq!(b.target, b.bmr);
    }

    #[test]
    fn test_goal_out_of_range() {
        let p = profile(Sex::Male, ActivityLevel::Sedentary);
        let err = compute_calorie_target(&p, -80.0).unwrap_err();
        assert_eq!(err.field(), Some("goal_adjustment_pct"));
    }

    #[test]
    fn test_recommended_rounding() {
        assert_eq!(recommended_calories(2594.3), 2600.0);
        assert_eq!(recommended_calories(2574.9), 2550.0);
    }
}
