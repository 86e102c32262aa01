use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::food::Category;

/// Biological sex, used only for the BMR constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(PlannerError::validation(
                "sex",
                format!("unrecognized value '{}'", other),
            )),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "Male"),
            Sex::Female => write!(f, "Female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Prompt label.
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (office job, minimal exercise)",
            ActivityLevel::Light => "Light (desk job + light exercise)",
            ActivityLevel::Moderate => "Moderate (some exercise, active lifestyle)",
            ActivityLevel::Active => "Active (regular exercise, physical job)",
            ActivityLevel::VeryActive => "Very Active (intense exercise, physical job)",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" | "veryactive" => Ok(ActivityLevel::VeryActive),
            _ => Err(PlannerError::validation(
                "activity_level",
                format!("unrecognized value '{}'", s.trim()),
            )),
        }
    }
}

/// Snapshot of the user's body data for one planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    pub sex: Sex,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
}

impl UserProfile {
    /// Checks the numeric fields, naming the first offending one.
    pub fn validate(&self) -> Result<()> {
        if self.age == 0 {
            return Err(PlannerError::validation("age", "must be greater than 0"));
        }
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(PlannerError::validation(
                "weight_kg",
                "must be a positive number",
            ));
        }
        if !self.height_cm.is_finite() || self.height_cm <= 0.0 {
            return Err(PlannerError::validation(
                "height_cm",
                "must be a positive number",
            ));
        }
        Ok(())
    }
}

/// Supported fasting patterns (fasting hours : eating hours).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FastingSchedule {
    #[serde(rename = "14:10")]
    Beginner14x10,
    #[serde(rename = "16:8")]
    Standard16x8,
    #[serde(rename = "18:6")]
    Advanced18x6,
    #[serde(rename = "20:4")]
    Warrior20x4,
    #[serde(rename = "OMAD")]
    Omad,
}

impl FastingSchedule {
    pub const ALL: [FastingSchedule; 5] = [
        FastingSchedule::Standard16x8,
        FastingSchedule::Beginner14x10,
        FastingSchedule::Advanced18x6,
        FastingSchedule::Warrior20x4,
        FastingSchedule::Omad,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FastingSchedule::Beginner14x10 => "14:10 (Beginner)",
            FastingSchedule::Standard16x8 => "16:8 (Most Popular)",
            FastingSchedule::Advanced18x6 => "18:6 (Advanced)",
            FastingSchedule::Warrior20x4 => "20:4 (Warrior Diet)",
            FastingSchedule::Omad => "23:1 (OMAD)",
        }
    }
}

impl FromStr for FastingSchedule {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        // Accept "16:8", "16/8", "16-8" and labels such as "16:8 (Most Popular)".
        let head = s.trim().split_whitespace().next().unwrap_or("");
        let normalized = head.to_lowercase().replace(['/', '-'], ":");
        match normalized.as_str() {
            "14:10" => Ok(FastingSchedule::Beginner14x10),
            "16:8" => Ok(FastingSchedule::Standard16x8),
            "18:6" => Ok(FastingSchedule::Advanced18x6),
            "20:4" => Ok(FastingSchedule::Warrior20x4),
            "omad" | "23:1" => Ok(FastingSchedule::Omad),
            _ => Err(PlannerError::validation(
                "schedule",
                format!("unrecognized fasting schedule '{}'", s.trim()),
            )),
        }
    }
}

impl fmt::Display for FastingSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FastingSchedule::Beginner14x10 => "14:10",
            FastingSchedule::Standard16x8 => "16:8",
            FastingSchedule::Advanced18x6 => "18:6",
            FastingSchedule::Warrior20x4 => "20:4",
            FastingSchedule::Omad => "OMAD",
        };
        write!(f, "{}", s)
    }
}

fn default_window_start() -> u8 {
    12
}

/// Fasting and food preferences for a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastingPreference {
    pub schedule: FastingSchedule,

    /// Percentage applied to TDEE (-15.0 = 15% deficit, 0.0 = maintenance).
    #[serde(default)]
    pub goal_adjustment_pct: f64,

    #[serde(default)]
    pub dietary_exclusions: BTreeSet<Category>,

    /// Ingredient names to avoid (allergies, dislikes).
    #[serde(default)]
    pub excluded_ingredients: Vec<String>,

    /// Hour of day the eating window opens.
    #[serde(default = "default_window_start")]
    pub window_start_hour: u8,
}

impl Default for FastingPreference {
    fn default() -> Self {
        Self {
            schedule: FastingSchedule::Standard16x8,
            goal_adjustment_pct: 0.0,
            dietary_exclusions: BTreeSet::new(),
            excluded_ingredients: Vec::new(),
            window_start_hour: default_window_start(),
        }
    }
}

impl FastingPreference {
    pub fn validate(&self) -> Result<()> {
        if self.window_start_hour > 23 {
            return Err(PlannerError::validation(
                "window_start_hour",
                "must be between 0 and 23",
            ));
        }
        Ok(())
    }
}

/// Calendar month (1-12) used for seasonal fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(u8);

impl Month {
    pub fn new(month: u8) -> Result<Self> {
        if (1..=12).contains(&month) {
            Ok(Month(month))
        } else {
            Err(PlannerError::validation(
                "month",
                format!("{} is not between 1 and 12", month),
            ))
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Month {
    type Error = PlannerError;

    fn try_from(value: u8) -> Result<Self> {
        Month::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            age: 30,
            sex: Sex::Male,
            weight_kg: 70.0,
            height_cm: 175.0,
            activity_level: ActivityLevel::Moderate,
        }
    }

    #[test]
    fn test_profile_validation_names_field() {
        assert!(sample_profile().validate().is_ok());

        let mut bad = sample_profile();
        bad.age = 0;
        assert_eq!(bad.validate().unwrap_err().field(), Some("age"));

        let mut bad = sample_profile();
        bad.weight_kg = -1.0;
        assert_eq!(bad.validate().unwrap_err().field(), Some("weight_kg"));

        let mut bad = sample_profile();
        bad.height_cm = f64::NAN;
        assert_eq!(bad.validate().unwrap_err().field(), Some("height_cm"));
    }

    #[test]
    fn test_schedule_parsing() {
        assert_eq!(
            "16:8".parse::<FastingSchedule>().unwrap(),
            FastingSchedule::Standard16x8
        );
        assert_eq!(
            "18/6".parse::<FastingSchedule>().unwrap(),
            FastingSchedule::Advanced18x6
        );
        assert_eq!(
            "23:1 (OMAD)".parse::<FastingSchedule>().unwrap(),
            FastingSchedule::Omad
        );
        assert_eq!(
            "omad".parse::<FastingSchedule>().unwrap(),
            FastingSchedule::Omad
        );

        let err = "12:12".parse::<FastingSchedule>().unwrap_err();
        assert_eq!(err.field(), Some("schedule"));
    }

    #[test]
    fn test_enum_parsing_rejects_unknown() {
        assert_eq!("Female".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("other".parse::<Sex>().unwrap_err().field(), Some("sex"));

        assert_eq!(
            "very active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::VeryActive
        );
        assert_eq!(
            "couch".parse::<ActivityLevel>().unwrap_err().field(),
            Some("activity_level")
        );
    }

    #[test]
    fn test_month_bounds() {
        assert!(Month::new(1).is_ok());
        assert!(Month::new(12).is_ok());
        assert!(Month::new(0).is_err());
        assert!(Month::new(13).is_err());
    }

    #[test]
    fn test_schedule_serde_uses_ratio_names() {
        let json = serde_json::to_string(&FastingSchedule::Standard16x8).unwrap();
        assert_eq!(json, "\"16:8\"");
        let parsed: FastingSchedule = serde_json::from_str("\"OMAD\"").unwrap();
        assert_eq!(parsed, FastingSchedule::Omad);
    }
}
