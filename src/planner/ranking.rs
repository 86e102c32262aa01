use std::cmp::Ordering;
use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::catalog::FoodCatalog;
use crate::config::{PlannerConfig, ToleranceBand};
use crate::models::{MacroTarget, Macros, MealLine, MealTemplate, Month, Unit};
use crate::planner::constants::{MASS_VOLUME_STEP, PIECE_STEP};

/// A template scaled to a slot target, with its selection scores.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub template: &'a MealTemplate,
    pub portion: f64,
    pub lines: Vec<MealLine>,
    pub totals: Macros,
    /// Fraction of lines whose ingredient is in season.
    pub seasonal_fit: f64,
    pub fully_in_season: bool,
    /// Times this template was already chosen in the current plan.
    pub uses: u32,
    /// Sum of squared relative errors against the slot target.
    pub macro_error: f64,
    pub tie_rank: u32,
}

/// Cooking precision for a unit: 1 g / 1 ml (expressed in the line's unit) or half a piece.
fn quantity_step(unit: Unit) -> f64 {
    match unit {
        Unit::Piece => PIECE_STEP,
        other => MASS_VOLUME_STEP / other.to_canonical_factor(),
    }
}

/// Round a scaled quantity to cooking precision, never below one step.
pub fn round_quantity(quantity: f64, unit: Unit) -> f64 {
    let step = quantity_step(unit);
    ((quantity / step).round() * step).max(step)
}

/// Sum of squared relative errors across calories, protein, fat and carbs.
pub fn macro_error(target: &MacroTarget, actual: &Macros) -> f64 {
    target
        .relative_errors(actual)
        .iter()
        .map(|e| e * e)
        .sum()
}

/// Scale `template` toward `target` and score it.
///
/// Returns `None` for templates whose reference portion carries no calories.
pub fn build_candidate<'a>(
    catalog: &FoodCatalog,
    template: &'a MealTemplate,
    target: &MacroTarget,
    month: Month,
    uses: u32,
    tie_rank: u32,
    config: &PlannerConfig,
) -> Option<Candidate<'a>> {
    let reference = catalog.template_macros(template);
    if reference.calories <= 0.0 {
        return None;
    }

    let portion = (target.calories / reference.calories).clamp(config.min_portion, config.max_portion);

    let mut lines = Vec::with_capacity(template.lines.len());
    let mut totals = Macros::default();
    let mut in_season = 0usize;

    for line in &template.lines {
        let ingredient = catalog.ingredient(&line.ingredient)?;
        let quantity = round_quantity(line.quantity * portion, line.unit);
        totals += ingredient.macros_for(quantity, line.unit)?;
        if ingredient.in_season(month) {
            in_season += 1;
        }
        lines.push(MealLine {
            ingredient: ingredient.clone(),
            quantity,
            unit: line.unit,
        });
    }

    let seasonal_fit = in_season as f64 / lines.len() as f64;

    Some(Candidate {
        template,
        portion,
        macro_error: macro_error(target, &totals),
        lines,
        totals,
        seasonal_fit,
        fully_in_season: in_season == template.lines.len(),
        uses,
        tie_rank,
    })
}

/// Selection order: seasonal fit (higher first), then fewer prior uses,
/// then macro closeness, then tie rank. `Less` means preferred.
pub fn rank_cmp(a: &Candidate, b: &Candidate) -> Ordering {
    b.seasonal_fit
        .total_cmp(&a.seasonal_fit)
        .then(a.uses.cmp(&b.uses))
        .then(a.macro_error.total_cmp(&b.macro_error))
        .then(a.tie_rank.cmp(&b.tie_rank))
}

/// Fallback order when nothing fits any band: closest macros first.
pub fn closeness_cmp(a: &Candidate, b: &Candidate) -> Ordering {
    a.macro_error
        .total_cmp(&b.macro_error)
        .then(a.uses.cmp(&b.uses))
        .then(a.tie_rank.cmp(&b.tie_rank))
}

/// Best candidate inside `band`, optionally restricted to fully in-season templates.
pub fn best_within<'c, 'a>(
    candidates: &'c [Candidate<'a>],
    target: &MacroTarget,
    band: &ToleranceBand,
    in_season_only: bool,
) -> Option<&'c Candidate<'a>> {
    candidates
        .iter()
        .filter(|c| !in_season_only || c.fully_in_season)
        .filter(|c| target.within(&c.totals, band.calories, band.macros))
        .min_by(|a, b| rank_cmp(a, b))
}

/// Closest candidate regardless of tolerance.
pub fn closest<'c, 'a>(candidates: &'c [Candidate<'a>]) -> Option<&'c Candidate<'a>> {
    candidates.iter().min_by(|a, b| closeness_cmp(a, b))
}

/// Tie ranks keyed by template order.
///
/// Without a seed the rank is the catalog order key itself; with a seed the
/// ranks are a seeded permutation, reproducible for the same seed.
pub fn tie_ranks(templates: &[&MealTemplate], seed: Option<u64>) -> HashMap<u32, u32> {
    match seed {
        None => templates.iter().map(|t| (t.order, t.order)).collect(),
        Some(seed) => {
            let mut ranks: Vec<u32> = (0..templates.len() as u32).collect();
            let mut rng = StdRng::seed_from_u64(seed);
            ranks.shuffle(&mut rng);
            templates
                .iter()
                .zip(ranks)
                .map(|(t, rank)| (t.order, rank))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Ingredient, TemplateLine};

    fn catalog() -> FoodCatalog {
        let ingredients = vec![
            Ingredient {
                order: 1,
                name: "Keto Base".to_string(),
                category: Category::Protein,
                base_unit: Unit::Gram,
                seasonal_months: Default::default(),
                per_100: Macros::new(400.0, 25.0, 28.89, 10.0),
            },
            Ingredient {
                order: 2,
                name: "Summer Greens".to_string(),
                category: Category::Vegetable,
                base_unit: Unit::Gram,
                seasonal_months: [6, 7, 8].into_iter().collect(),
                per_100: Macros::new(40.0, 2.5, 2.89, 1.0),
            },
        ];
        let templates = vec![MealTemplate {
            order: 5,
            name: "Bowl".to_string(),
            lines: vec![
                TemplateLine {
                    ingredient: "Keto Base".to_string(),
                    quantity: 100.0,
                    unit: Unit::Gram,
                },
                TemplateLine {
                    ingredient: "Summer Greens".to_string(),
                    quantity: 100.0,
                    unit: Unit::Gram,
                },
            ],
            instructions: vec![],
        }];
        FoodCatalog::new(ingredients, templates).unwrap()
    }

    fn target(calories: f64) -> MacroTarget {
        MacroTarget {
            calories,
            protein_g: calories * 0.25 / 4.0,
            fat_g: calories * 0.65 / 9.0,
            carb_g: calories * 0.10 / 4.0,
        }
    }

    #[test]
    fn test_round_quantity() {
        assert_eq!(round_quantity(123.4, Unit::Gram), 123.0);
        assert_eq!(round_quantity(0.2, Unit::Gram), 1.0);
        assert_eq!(round_quantity(1.3, Unit::Piece), 1.5);
        assert!((round_quantity(0.6504, Unit::Kilogram) - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_candidate_scales_to_target() {
        let catalog = catalog();
        let template = &catalog.templates()[0];
        let c = build_candidate(
            &catalog,
            template,
            &target(880.0),
            Month::new(7).unwrap(),
            0,
            5,
            &PlannerConfig::default(),
        )
        .unwrap();
        assert!((c.portion - 2.0).abs() < 1e-9);
        assert!((c.totals.calories - 880.0).abs() < 1.0);
        assert!(c.fully_in_season);
        assert_eq!(c.seasonal_fit, 1.0);
        assert!(target(880.0).within(&c.totals, 0.05, 0.10));
    }

    #[test]
    fn test_seasonal_fit_out_of_season() {
        let catalog = catalog();
        let c = build_candidate(
            &catalog,
            &catalog.templates()[0],
            &target(880.0),
            Month::new(1).unwrap(),
            0,
            5,
            &PlannerConfig::default(),
        )
        .unwrap();
        assert_eq!(c.seasonal_fit, 0.5);
        assert!(!c.fully_in_season);
    }

    #[test]
    fn test_portion_is_clamped() {
        let catalog = catalog();
        let c = build_candidate(
            &catalog,
            &catalog.templates()[0],
            &target(10_000.0),
            Month::new(7).unwrap(),
            0,
            5,
            &PlannerConfig::default(),
        )
        .unwrap();
        assert_eq!(c.portion, PlannerConfig::default().max_portion);
    }

    #[test]
    fn test_rank_prefers_season_then_variety() {
        let catalog = catalog();
        let t = target(880.0);
        let base = build_candidate(
            &catalog,
            &catalog.templates()[0],
            &t,
            Month::new(7).unwrap(),
            0,
            1,
            &PlannerConfig::default(),
        )
        .unwrap();

        let mut used = base.clone();
        used.uses = 2;
        used.tie_rank = 0;
        assert_eq!(rank_cmp(&base, &used), Ordering::Less);

        let mut less_seasonal = base.clone();
        less_seasonal.seasonal_fit = 0.5;
        let mut seasonal_but_used = base.clone();
        seasonal_but_used.uses = 3;
        assert_eq!(rank_cmp(&seasonal_but_used, &less_seasonal), Ordering::Less);
    }

    #[test]
    fn test_tie_ranks_seeded_are_reproducible() {
        let catalog = scottish();
        let templates: Vec<&MealTemplate> = catalog.templates().iter().collect();

        let unseeded = tie_ranks(&templates, None);
        assert_eq!(unseeded[&3], 3);

        let a = tie_ranks(&templates, Some(42));
        let b = tie_ranks(&templates, Some(42));
        assert_eq!(a, b);

        let mut ranks: Vec<u32> = a.values().copied().collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (0..templates.len() as u32).collect::<Vec<_>>());
    }

    fn scottish() -> FoodCatalog {
        crate::catalog::scottish_catalog().unwrap()
    }
}
