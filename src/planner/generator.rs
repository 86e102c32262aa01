use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::catalog::FoodCatalog;
use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::models::{
    Category, DayPlan, FastingPreference, MacroTarget, Macros, Meal, MealPlan, MealTemplate,
    Month, ScheduleResolution, UserProfile,
};
use crate::planner::biometrics::compute_calorie_target;
use crate::planner::constants::PLAN_DAYS;
use crate::planner::macros::macro_target;
use crate::planner::ranking::{Candidate, best_within, build_candidate, closest, tie_ranks};
use crate::planner::schedule::{per_meal_targets, prep_timeline, resolve_schedule, timing_advice};

/// Day numbers are stored as `u8`.
const MAX_PLAN_DAYS: usize = u8::MAX as usize;

/// Everything the generator needs for one run.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// One target per day; the plan has as many days as targets.
    pub daily_targets: Vec<MacroTarget>,
    pub schedule: ScheduleResolution,
    pub month: Month,
    pub seed: Option<u64>,
    pub dietary_exclusions: BTreeSet<Category>,
    pub excluded_ingredients: Vec<String>,
}

impl PlanRequest {
    /// Same target every day for the standard plan length.
    pub fn uniform(daily: MacroTarget, schedule: ScheduleResolution, month: Month) -> Self {
        Self {
            daily_targets: vec![daily; PLAN_DAYS],
            schedule,
            month,
            seed: None,
            dietary_exclusions: BTreeSet::new(),
            excluded_ingredients: Vec::new(),
        }
    }
}

/// Templates left after category and ingredient-name exclusions.
fn eligible_templates<'a>(catalog: &'a FoodCatalog, request: &PlanRequest) -> Vec<&'a MealTemplate> {
    let banned_names: Vec<String> = request
        .excluded_ingredients
        .iter()
        .map(|n| n.trim().to_lowercase())
        .filter(|n| !n.is_empty())
        .collect();

    catalog
        .templates()
        .iter()
        .filter(|template| {
            template.lines.iter().all(|line| {
                let name = line.ingredient.to_lowercase();
                let category_ok = catalog
                    .ingredient(&line.ingredient)
                    .map(|i| !request.dietary_exclusions.contains(&i.category))
                    .unwrap_or(false);
                category_ok && !banned_names.iter().any(|banned| name.contains(banned.as_str()))
            })
        })
        .collect()
}

/// The chosen candidate for a slot and the band that admitted it.
struct SlotChoice<'c, 'a> {
    candidate: &'c Candidate<'a>,
    band: Option<usize>,
}

/// Walk the tolerance bands from strict to wide; in each band try the
/// in-season templates first, then the whole pool. Fall back to the closest
/// candidate if no band admits anything.
fn choose_for_slot<'c, 'a>(
    candidates: &'c [Candidate<'a>],
    target: &MacroTarget,
    config: &PlannerConfig,
) -> Option<SlotChoice<'c, 'a>> {
    let passes: &[bool] = if config.seasonal_filter {
        &[true, false]
    } else {
        &[false]
    };

    for (band_idx, band) in config.tolerance_bands.iter().enumerate() {
        for &in_season_only in passes {
            if let Some(candidate) = best_within(candidates, target, band, in_season_only) {
                return Some(SlotChoice {
                    candidate,
                    band: Some(band_idx),
                });
            }
        }
    }

    closest(candidates).map(|candidate| SlotChoice {
        candidate,
        band: None,
    })
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Generate a multi-day meal plan.
///
/// Days and slots are filled in order. Variety is tracked across the whole
/// plan, so a template used on day 1 is disfavoured (not forbidden) later.
/// Days that needed a widened band or a closest-match fallback are flagged
/// `relaxed` rather than failing.
///
/// Fails with `PlanningError` when the catalog has no meal templates or the
/// exclusions remove all of them, and with `Cancelled` if `cancel` is set
/// between days.
pub fn generate_plan(
    request: &PlanRequest,
    catalog: &FoodCatalog,
    config: &PlannerConfig,
    cancel: Option<&AtomicBool>,
) -> Result<MealPlan> {
    config.validate()?;

    let first_target = *request
        .daily_targets
        .first()
        .ok_or_else(|| PlannerError::validation("days", "at least one day is required"))?;
    if request.daily_targets.len() > MAX_PLAN_DAYS {
        return Err(PlannerError::validation(
            "daily_targets",
            format!("at most {} days can be planned", MAX_PLAN_DAYS),
        ));
    }
    if let Some((idx, bad)) = request
        .daily_targets
        .iter()
        .enumerate()
        .find(|(_, t)| !(t.calories.is_finite() && t.calories > 0.0))
    {
        return Err(PlannerError::validation(
            "daily_targets",
            format!("day {} has calorie target {}; it must be positive", idx + 1, bad.calories),
        ));
    }
    if request.schedule.per_meal_share.is_empty() {
        return Err(PlannerError::validation(
            "schedule",
            "resolved schedule has no meals",
        ));
    }
    if catalog.templates().is_empty() {
        return Err(PlannerError::Planning(
            "catalog contains no meal templates".to_string(),
        ));
    }

    let pool = eligible_templates(catalog, request);
    if pool.is_empty() {
        return Err(PlannerError::Planning(
            "no meal templates remain after dietary exclusions".to_string(),
        ));
    }

    let ranks = tie_ranks(&pool, request.seed);
    let strict = config.tolerance_bands[0];
    let mut uses: HashMap<u32, u32> = HashMap::new();
    let mut days = Vec::with_capacity(request.daily_targets.len());

    for (day_idx, daily) in request.daily_targets.iter().enumerate() {
        if is_cancelled(cancel) {
            info!(day = day_idx + 1, "plan generation cancelled");
            return Err(PlannerError::Cancelled);
        }

        let mut meals = Vec::with_capacity(request.schedule.per_meal_share.len());
        for (slot, slot_target) in per_meal_targets(daily, &request.schedule).iter().enumerate() {
            let candidates: Vec<Candidate> = pool
                .iter()
                .filter_map(|template| {
                    build_candidate(
                        catalog,
                        template,
                        slot_target,
                        request.month,
                        uses.get(&template.order).copied().unwrap_or(0),
                        ranks.get(&template.order).copied().unwrap_or(template.order),
                        config,
                    )
                })
                .collect();

            let choice = choose_for_slot(&candidates, slot_target, config).ok_or_else(|| {
                PlannerError::Planning("no meal template carries any calories".to_string())
            })?;
            let chosen = choice.candidate;

            debug!(
                day = day_idx + 1,
                slot,
                meal = %chosen.template.name,
                band = ?choice.band,
                seasonal_fit = chosen.seasonal_fit,
                uses = chosen.uses,
                macro_error = chosen.macro_error,
                "slot filled"
            );

            *uses.entry(chosen.template.order).or_insert(0) += 1;

            meals.push(Meal {
                name: chosen.template.name.clone(),
                template_order: chosen.template.order,
                slot,
                time: request
                    .schedule
                    .meal_times
                    .get(slot)
                    .copied()
                    .unwrap_or(request.schedule.window_start),
                portion: chosen.portion,
                lines: chosen.lines.clone(),
                totals: chosen.totals,
                target: *slot_target,
                tolerance_band: choice.band,
                instructions: chosen.template.instructions.clone(),
            });
        }

        let totals: Macros = meals.iter().map(|m| m.totals).sum();
        let relaxed = meals.iter().any(|m| m.tolerance_band != Some(0))
            || !daily.within(&totals, strict.calories, strict.macros);

        if relaxed {
            warn!(
                day = day_idx + 1,
                target_kcal = daily.calories,
                actual_kcal = totals.calories,
                "day plan relaxed beyond the strict tolerance band"
            );
        }

        days.push(DayPlan {
            day: (day_idx + 1) as u8,
            meals,
            totals,
            target: *daily,
            relaxed,
        });
    }

    let plan = MealPlan {
        days,
        daily_target: first_target,
        schedule: request.schedule.clone(),
        month: request.month,
        seed: request.seed,
        prep_steps: prep_timeline(&request.schedule),
        timing_advice: timing_advice(&request.schedule),
    };

    info!(
        days = plan.days.len(),
        distinct_meals = plan.distinct_meals(),
        relaxed = plan.is_relaxed(),
        "meal plan generated"
    );

    Ok(plan)
}

/// Derive targets from a profile and preference, then generate the standard 4-day plan.
pub fn build_plan(
    profile: &UserProfile,
    preference: &FastingPreference,
    month: Month,
    catalog: &FoodCatalog,
    config: &PlannerConfig,
    seed: Option<u64>,
) -> Result<MealPlan> {
    let calories = compute_calorie_target(profile, preference.goal_adjustment_pct)?;
    let daily = macro_target(calories, &config.macro_ratio)?;
    let schedule = resolve_schedule(preference, calories)?;

    let request = PlanRequest {
        seed,
        dietary_exclusions: preference.dietary_exclusions.clone(),
        excluded_ingredients: preference.excluded_ingredients.clone(),
        ..PlanRequest::uniform(daily, schedule, month)
    };

    generate_plan(&request, catalog, config, None)
}
