use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{allocation::LotLayout, billing::RateSchedule};

/// Lot shape and prices, read from `settings.json` in the data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LotSettings {
    pub layout: LotLayout,
    pub rates: RateSchedule,
}

impl LotSettings {
    /// Load settings from `path`, writing the defaults there first when the
    /// file does not exist yet.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        let settings = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str::<LotSettings>(&contents)
                .with_context(|| format!("Failed to parse settings in {}", path.display()))?
        } else {
            let defaults = LotSettings::default();
            defaults.persist(path)?;
            info!("Wrote default settings to {}", path.display());
            defaults
        };

        settings
            .layout
            .validate()
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        Ok(settings)
    }

    pub fn persist(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::VehicleCategory;

    #[test]
    fn writes_defaults_on_first_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = LotSettings::load_or_init(&path).unwrap();
        assert_eq!(settings, LotSettings::default());
        assert!(path.exists());
        assert_eq!(LotSettings::load_or_init(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"rates": {"bike": {"firstTwoHours": 15, "perExtraHour": 5},
                          "car": {"firstTwoHours": 50, "perExtraHour": 20},
                          "ev": {"firstTwoHours": 60, "perExtraHour": 25},
                          "heavy": {"firstTwoHours": 100, "perExtraHour": 40}}}"#,
        )
        .unwrap();

        let settings = LotSettings::load_or_init(&path).unwrap();
        assert_eq!(settings.layout, LotLayout::default());
        assert_eq!(settings.rates.rate(VehicleCategory::Bike).first_two_hours, 15);
    }

    #[test]
    fn rejects_bad_layout_and_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        fs::write(&path, r#"{"layout": {"totalSlots": 3, "prioritySlots": [4]}}"#).unwrap();
        assert!(LotSettings::load_or_init(&path).is_err());

        fs::write(&path, "{not json").unwrap();
        assert!(LotSettings::load_or_init(&path).is_err());
    }
}
