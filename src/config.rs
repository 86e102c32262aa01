use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::{Category, Unit};
use crate::planner::constants::*;

/// Share of calories from each macro, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRatio {
    pub protein_pct: f64,
    pub fat_pct: f64,
    pub carb_pct: f64,
}

impl Default for MacroRatio {
    fn default() -> Self {
        Self {
            protein_pct: DEFAULT_PROTEIN_PCT,
            fat_pct: DEFAULT_FAT_PCT,
            carb_pct: DEFAULT_CARB_PCT,
        }
    }
}

impl MacroRatio {
    pub fn new(protein_pct: f64, fat_pct: f64, carb_pct: f64) -> Result<Self> {
        let ratio = Self {
            protein_pct,
            fat_pct,
            carb_pct,
        };
        ratio.validate()?;
        Ok(ratio)
    }

    pub fn validate(&self) -> Result<()> {
        let parts = [self.protein_pct, self.fat_pct, self.carb_pct];
        if parts.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(PlannerError::validation(
                "macro_ratio",
                "percentages must be non-negative numbers",
            ));
        }
        let sum: f64 = parts.iter().sum();
        if (sum - 100.0).abs() > MACRO_PCT_SUM_EPSILON {
            return Err(PlannerError::validation(
                "macro_ratio",
                format!("percentages sum to {:.2}, expected 100", sum),
            ));
        }
        Ok(())
    }
}

/// A (calorie, per-macro) relative tolerance pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBand {
    pub calories: f64,
    pub macros: f64,
}

/// Purchase increments for one category, per canonical unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundingIncrement {
    pub grams: f64,
    pub millilitres: f64,
    pub pieces: f64,
}

impl RoundingIncrement {
    pub fn for_unit(&self, unit: Unit) -> f64 {
        match unit.canonical() {
            Unit::Millilitre => self.millilitres,
            Unit::Piece => self.pieces,
            _ => self.grams,
        }
    }
}

/// Per-category purchase increments used by the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundingTable {
    pub vegetable: RoundingIncrement,
    pub protein: RoundingIncrement,
    pub dairy: RoundingIncrement,
    pub fat: RoundingIncrement,
    pub other: RoundingIncrement,
}

impl Default for RoundingTable {
    fn default() -> Self {
        let fresh = RoundingIncrement {
            grams: FRESH_GRAM_INCREMENT,
            millilitres: LIQUID_ML_INCREMENT,
            pieces: PIECE_INCREMENT,
        };
        let dry = RoundingIncrement {
            grams: DRY_GRAM_INCREMENT,
            millilitres: LIQUID_ML_INCREMENT,
            pieces: PIECE_INCREMENT,
        };
        Self {
            vegetable: fresh,
            protein: fresh,
            dairy: dry,
            fat: dry,
            other: dry,
        }
    }
}

impl RoundingTable {
    pub fn increment(&self, category: Category, unit: Unit) -> f64 {
        let row = match category {
            Category::Vegetable => &self.vegetable,
            Category::Protein => &self.protein,
            Category::Dairy => &self.dairy,
            Category::Fat => &self.fat,
            Category::Other => &self.other,
        };
        row.for_unit(unit)
    }

    fn rows(&self) -> [&RoundingIncrement; 5] {
        [
            &self.vegetable,
            &self.protein,
            &self.dairy,
            &self.fat,
            &self.other,
        ]
    }
}

/// Runtime-configurable planner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub macro_ratio: MacroRatio,
    pub tolerance_bands: Vec<ToleranceBand>,
    pub min_portion: f64,
    pub max_portion: f64,
    /// Try fully in-season templates before the rest of the catalog.
    pub seasonal_filter: bool,
    pub rounding: RoundingTable,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            macro_ratio: MacroRatio::default(),
            tolerance_bands: DEFAULT_TOLERANCE_BANDS
                .iter()
                .map(|&(calories, macros)| ToleranceBand { calories, macros })
                .collect(),
            min_portion: DEFAULT_MIN_PORTION,
            max_portion: DEFAULT_MAX_PORTION,
            seasonal_filter: true,
            rounding: RoundingTable::default(),
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<()> {
        self.macro_ratio.validate()?;

        if self.tolerance_bands.is_empty() {
            return Err(PlannerError::validation(
                "tolerance_bands",
                "at least one band is required",
            ));
        }
        for band in &self.tolerance_bands {
            if !(band.calories > 0.0 && band.macros > 0.0) {
                return Err(PlannerError::validation(
                    "tolerance_bands",
                    "tolerances must be positive",
                ));
            }
        }
        for pair in self.tolerance_bands.windows(2) {
            if pair[1].calories < pair[0].calories || pair[1].macros < pair[0].macros {
                return Err(PlannerError::validation(
                    "tolerance_bands",
                    "bands must widen monotonically",
                ));
            }
        }

        if !(self.min_portion > 0.0 && self.min_portion <= self.max_portion) {
            return Err(PlannerError::validation(
                "portion",
                "min_portion must be positive and not above max_portion",
            ));
        }

        for row in self.rounding.rows() {
            if !(row.grams > 0.0 && row.millilitres > 0.0 && row.pieces > 0.0) {
                return Err(PlannerError::validation(
                    "rounding",
                    "increments must be positive",
                ));
            }
        }

        Ok(())
    }

    /// Format the tunable settings as a compact string for display.
    pub fn display(&self) -> String {
        let bands: Vec<String> = self
            .tolerance_bands
            .iter()
            .map(|b| format!("{:.0}%/{:.0}%", b.calories * 100.0, b.macros * 100.0))
            .collect();
        format!(
            "ratio={:.0}/{:.0}/{:.0} bands=[{}] portion={:.2}-{:.2} seasonal_filter={}",
            self.macro_ratio.protein_pct,
            self.macro_ratio.fat_pct,
            self.macro_ratio.carb_pct,
            bands.join(", "),
            self.min_portion,
            self.max_portion,
            self.seasonal_filter
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_constants() {
        let config = PlannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tolerance_bands.len(), DEFAULT_TOLERANCE_BANDS.len());
        assert_eq!(config.tolerance_bands[0].calories, 0.05);
        assert_eq!(config.tolerance_bands[0].macros, 0.10);
        assert_eq!(config.macro_ratio.fat_pct, DEFAULT_FAT_PCT);
    }

    #[test]
    fn test_macro_ratio_must_sum_to_100() {
        assert!(MacroRatio::new(30.0, 60.0, 10.0).is_ok());
        let err = MacroRatio::new(30.0, 60.0, 20.0).unwrap_err();
        assert_eq!(err.field(), Some("macro_ratio"));
        assert!(MacroRatio::new(-5.0, 95.0, 10.0).is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{"seasonal_filter": false, "max_portion": 3.0}"#).unwrap();
        assert!(!config.seasonal_filter);
        assert_eq!(config.max_portion, 3.0);
        assert_eq!(config.min_portion, DEFAULT_MIN_PORTION);
        assert_eq!(config.rounding, RoundingTable::default());
    }

    #[test]
    fn test_rejects_narrowing_bands() {
        let config = PlannerConfig {
            tolerance_bands: vec![
                ToleranceBand {
                    calories: 0.15,
                    macros: 0.15,
                },
                ToleranceBand {
                    calories: 0.05,
                    macros: 0.10,
                },
            ],
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field(), Some("tolerance_bands"));
    }

    #[test]
    fn test_rounding_lookup() {
        let table = RoundingTable::default();
        assert_eq!(table.increment(Category::Vegetable, Unit::Gram), FRESH_GRAM_INCREMENT);
        assert_eq!(table.increment(Category::Fat, Unit::Gram), DRY_GRAM_INCREMENT);
        assert_eq!(table.increment(Category::Fat, Unit::Millilitre), LIQUID_ML_INCREMENT);
        assert_eq!(table.increment(Category::Protein, Unit::Piece), PIECE_INCREMENT);
    }
}
