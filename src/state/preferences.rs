use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::{FastingPreference, UserProfile};

/// User preferences persisted between sessions by the host.
///
/// The planner only ever receives copies of these values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferencesStore {
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub fasting: Option<FastingPreference>,
}

impl PreferencesStore {
    /// Load preferences, starting empty when the file does not exist yet.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no preferences file, starting empty");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn reset_profile(&mut self) {
        self.profile = None;
    }

    pub fn reset_fasting(&mut self) {
        self.fasting = None;
    }

    /// Stored fasting preference, or the 16:8 maintenance default.
    pub fn fasting_or_default(&self) -> FastingPreference {
        self.fasting.clone().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.profile.is_none() && self.fasting.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Category, FastingSchedule, Sex};
    use tempfile::{NamedTempFile, tempdir};

    fn sample_store() -> PreferencesStore {
        let mut fasting = FastingPreference {
            schedule: FastingSchedule::Advanced18x6,
            goal_adjustment_pct: -15.0,
            ..Default::default()
        };
        fasting.dietary_exclusions.insert(Category::Dairy);
        fasting.excluded_ingredients.push("Mussels".to_string());

        PreferencesStore {
            profile: Some(UserProfile {
                age: 41,
                sex: Sex::Female,
                weight_kg: 64.0,
                height_cm: 168.0,
                activity_level: ActivityLevel::Light,
            }),
            fasting: Some(fasting),
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let store = sample_store();
        store.save(file.path()).unwrap();

        let reloaded = PreferencesStore::load(file.path()).unwrap();
        assert_eq!(reloaded, store);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = PreferencesStore::load(dir.path().join("if_preferences.json")).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.fasting_or_default().schedule, FastingSchedule::Standard16x8);
    }

    #[test]
    fn test_reset() {
        let mut store = sample_store();
        store.reset_profile();
        assert!(store.profile.is_none());
        assert!(store.fasting.is_some());
        store.reset_fasting();
        assert!(store.is_empty());
    }
}
