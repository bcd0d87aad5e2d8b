//! Run settings: the target ilot size mix and spacing constraints.
//!
//! Settings arrive as a JSON document. Missing fields fall back to the
//! defaults below, so a document only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// One bucket of the desired ilot distribution.
///
/// Areas are in m².
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeCategory {
    /// Share of the walkable area this bucket should cover (0–100).
    #[serde(alias = "percentage")]
    pub percentage_of_area: f64,
    pub min_area: f64,
    pub max_area: f64,
}

impl SizeCategory {
    #[must_use]
    pub fn new(percentage_of_area: f64, min_area: f64, max_area: f64) -> Self {
        Self {
            percentage_of_area,
            min_area,
            max_area,
        }
    }

    /// Midpoint of the area range.
    #[must_use]
    pub fn average_area(&self) -> f64 {
        (self.min_area + self.max_area) / 2.0
    }
}

/// Settings for one run. Lengths are in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    #[serde(alias = "boxDistribution")]
    pub size_categories: Vec<SizeCategory>,
    pub corridor_width: f64,
    /// Minimum free distance kept around every ilot.
    pub ilot_clearance: f64,
    pub min_ilot_size: f64,
    pub max_ilot_size: f64,
    /// Layer-name fragments that mark a room as no-entry (case-insensitive).
    #[serde(alias = "noEntryLayers")]
    pub no_entry_layer_names: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size_categories: vec![SizeCategory::new(60.0, 10.0, 50.0)],
            corridor_width: 1200.0,
            ilot_clearance: 800.0,
            min_ilot_size: 1000.0,
            max_ilot_size: 5000.0,
            no_entry_layer_names: vec!["FORBIDDEN".to_owned(), "NO_ENTRY".to_owned()],
        }
    }
}

impl Settings {
    /// Parses a JSON settings document.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Parse` for malformed JSON. The result is not
    /// validated; call [`Settings::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON settings file.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Io` if the file cannot be read, or
    /// `SettingsError::Parse` if it is not a valid settings document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks the settings before any placement work starts.
    ///
    /// Percentages are not required to sum to 100.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a negative value, a category with
    /// `min_area > max_area`, an empty or inverted ilot size range, or a
    /// non-positive corridor width.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (index, category) in self.size_categories.iter().enumerate() {
            for (field, value) in [
                ("percentageOfArea", category.percentage_of_area),
                ("minArea", category.min_area),
                ("maxArea", category.max_area),
            ] {
                if value.is_nan() || value < 0.0 {
                    return Err(SettingsError::NegativeValue {
                        field: format!("sizeCategories[{index}].{field}"),
                        value,
                    });
                }
            }
            if category.min_area > category.max_area {
                return Err(SettingsError::InvalidCategory {
                    index,
                    min: category.min_area,
                    max: category.max_area,
                });
            }
        }

        if self.ilot_clearance.is_nan() || self.ilot_clearance < 0.0 {
            return Err(SettingsError::NegativeValue {
                field: "ilotClearance".to_owned(),
                value: self.ilot_clearance,
            });
        }
        if self.min_ilot_size.is_nan()
            || self.max_ilot_size.is_nan()
            || self.min_ilot_size <= 0.0
            || self.min_ilot_size > self.max_ilot_size
        {
            return Err(SettingsError::InvalidIlotSizeRange {
                min: self.min_ilot_size,
                max: self.max_ilot_size,
            });
        }
        if self.corridor_width.is_nan() || self.corridor_width <= 0.0 {
            return Err(SettingsError::NonPositiveCorridorWidth(self.corridor_width));
        }
        Ok(())
    }

    /// `true` if `layer` contains any configured no-entry fragment,
    /// ignoring case.
    #[must_use]
    pub fn is_no_entry_layer(&self, layer: &str) -> bool {
        let layer = layer.to_uppercase();
        self.no_entry_layer_names
            .iter()
            .filter(|name| !name.is_empty())
            .any(|name| layer.contains(&name.to_uppercase()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.size_categories.len(), 1);
        assert!((settings.corridor_width - 1200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let settings = Settings::from_json_str(r#"{ "corridorWidth": 1500 }"#).unwrap();
        assert!((settings.corridor_width - 1500.0).abs() < f64::EPSILON);
        assert!((settings.ilot_clearance - 800.0).abs() < f64::EPSILON);
        assert_eq!(settings.no_entry_layer_names, vec!["FORBIDDEN", "NO_ENTRY"]);
    }

    #[test]
    fn accepts_legacy_field_names() {
        let json = r#"{
            "boxDistribution": [{ "percentage": 40, "minArea": 5, "maxArea": 15 }],
            "noEntryLayers": ["STAIR"]
        }"#;
        let settings = Settings::from_json_str(json).unwrap();
        assert_eq!(settings.size_categories, vec![SizeCategory::new(40.0, 5.0, 15.0)]);
        assert_eq!(settings.no_entry_layer_names, vec!["STAIR"]);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Settings::from_json_str("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            Settings::load("/nonexistent/settings.json"),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn inverted_category_is_rejected() {
        let settings = Settings {
            size_categories: vec![SizeCategory::new(50.0, 20.0, 10.0)],
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidCategory { index: 0, .. })
        ));
    }

    #[test]
    fn negative_values_are_rejected() {
        let settings = Settings {
            size_categories: vec![
                SizeCategory::new(50.0, 1.0, 2.0),
                SizeCategory::new(-5.0, 1.0, 2.0),
            ],
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("sizeCategories[1].percentageOfArea"));

        let settings = Settings {
            ilot_clearance: -1.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NegativeValue { .. })
        ));
    }

    #[test]
    fn bad_sizes_and_corridor_width_are_rejected() {
        let settings = Settings {
            min_ilot_size: 6000.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidIlotSizeRange { .. })
        ));

        let settings = Settings {
            corridor_width: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NonPositiveCorridorWidth(_))
        ));
    }

    #[test]
    fn percentages_need_not_sum_to_100() {
        let settings = Settings {
            size_categories: vec![
                SizeCategory::new(80.0, 1.0, 2.0),
                SizeCategory::new(80.0, 3.0, 4.0),
            ],
            ..Settings::default()
        };
        settings.validate().unwrap();
    }

    #[test]
    fn no_entry_match_is_case_insensitive_substring() {
        let settings = Settings::default();
        assert!(settings.is_no_entry_layer("a-forbidden-zone"));
        assert!(settings.is_no_entry_layer("NO_ENTRY_STAIRS"));
        assert!(!settings.is_no_entry_layer("OFFICE"));
    }
}
