use crate::error::Result;
use crate::models::{
    FastingPreference, FastingSchedule, MacroTarget, MealTime, PrepStep, ScheduleResolution,
    TimingAdvice,
};
use crate::planner::constants::*;

fn eating_window_hours(schedule: FastingSchedule) -> u8 {
    match schedule {
        FastingSchedule::Beginner14x10 => 10,
        FastingSchedule::Standard16x8 => 8,
        FastingSchedule::Advanced18x6 => 6,
        FastingSchedule::Warrior20x4 => 4,
        FastingSchedule::Omad => 1,
    }
}

fn meal_shares(schedule: FastingSchedule, daily_calories: f64) -> Vec<f64> {
    match schedule {
        FastingSchedule::Beginner14x10 => THREE_MEAL_SPLIT.to_vec(),
        FastingSchedule::Standard16x8 | FastingSchedule::Advanced18x6 => TWO_MEAL_SPLIT.to_vec(),
        FastingSchedule::Warrior20x4 if daily_calories > SINGLE_MEAL_CEILING_KCAL => {
            TWO_MEAL_SPLIT.to_vec()
        }
        FastingSchedule::Warrior20x4 | FastingSchedule::Omad => vec![1.0],
    }
}

/// Meal times inside the window: first at the opening, last an hour before close,
/// anything in between spread evenly.
fn meal_times(start_min: u32, window_hours: u8, meal_count: usize) -> Vec<MealTime> {
    if meal_count <= 1 {
        return vec![MealTime::from_minutes(start_min)];
    }
    let window_min = window_hours as u32 * 60;
    let last = start_min + window_min.saturating_sub(LAST_MEAL_BEFORE_CLOSE_MIN);
    let step = (last - start_min) / (meal_count as u32 - 1);
    (0..meal_count as u32)
        .map(|i| MealTime::from_minutes(start_min + i * step))
        .collect()
}

/// Resolve a fasting preference into an eating window and meal distribution.
///
/// `daily_calories` decides whether a 20:4 day needs a second meal.
pub fn resolve_schedule(preference: &FastingPreference, daily_calories: f64) -> Result<ScheduleResolution> {
    preference.validate()?;

    let schedule = preference.schedule;
    let hours = eating_window_hours(schedule);
    let shares = meal_shares(schedule, daily_calories);
    let start_min = preference.window_start_hour as u32 * 60;

    Ok(ScheduleResolution {
        schedule,
        eating_window_hours: hours,
        window_start: MealTime::from_minutes(start_min),
        window_end: MealTime::from_minutes(start_min + hours as u32 * 60),
        meal_count: shares.len(),
        meal_times: meal_times(start_min, hours, shares.len()),
        per_meal_share: shares,
    })
}

/// Split a day's target across the resolved meals.
pub fn per_meal_targets(daily: &MacroTarget, resolution: &ScheduleResolution) -> Vec<MacroTarget> {
    resolution
        .per_meal_share
        .iter()
        .map(|share| daily.scaled(*share))
        .collect()
}

/// Prep tasks for each meal: 30 minutes ahead of the first, 25 ahead of the rest.
pub fn prep_timeline(resolution: &ScheduleResolution) -> Vec<PrepStep> {
    let count = resolution.meal_times.len();
    resolution
        .meal_times
        .iter()
        .enumerate()
        .map(|(slot, time)| {
            let (lead, duration) = if slot == 0 {
                (FIRST_MEAL_PREP_LEAD_MIN, "20-30 minutes")
            } else {
                (LATER_MEAL_PREP_LEAD_MIN, "15-25 minutes")
            };
            let task = match (slot, count) {
                (_, 1) => "Prepare the day's meal".to_string(),
                (0, _) => "Prepare first meal".to_string(),
                (s, n) if s + 1 == n => "Prepare last meal".to_string(),
                (s, _) => format!("Prepare meal {}", s + 1),
            };
            PrepStep {
                slot,
                start: time.minus_minutes(lead),
                task,
                duration: duration.to_string(),
            }
        })
        .collect()
}

/// Meal timing advice; shorter windows add schedule-specific entries.
pub fn timing_advice(resolution: &ScheduleResolution) -> Vec<TimingAdvice> {
    let advice = |topic: &str, text: &str| TimingAdvice {
        topic: topic.to_string(),
        advice: text.to_string(),
    };

    let mut out = vec![
        advice("Break the fast with", "high-fat foods such as avocado or butter to stay in ketosis"),
        advice("Training while fasted", "keep sessions light and drink electrolytes"),
        advice("After training", "prioritise protein within the eating window"),
        advice("Last meal", "finish eating 3 hours before sleep for better digestion"),
    ];

    let hours = resolution.eating_window_hours;
    if hours <= SHORT_WINDOW_HOURS {
        out.push(advice("Meal composition", "balance protein, fat and carbs within the main meal"));
    } else if hours <= STANDARD_WINDOW_HOURS {
        out.push(advice("First meal", "lean on fat and protein"));
        out.push(advice("Evening meal", "keep most of the day's carbs here for better sleep"));
    }
    out
}
