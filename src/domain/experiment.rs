// Experiment dataset domain model
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Count-map key used when a variant carries no explicit id.
pub const DEFAULT_VARIANT_KEY: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

impl Variant {
    #[cfg(test)]
    pub fn new(id: Option<i64>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Key into a record's `visits`/`conversions` maps.
    pub fn data_key(&self) -> String {
        self.id
            .map(|id| id.to_string())
            .unwrap_or_else(|| DEFAULT_VARIANT_KEY.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: String,
    #[serde(default)]
    pub visits: HashMap<String, u64>,
    #[serde(default)]
    pub conversions: HashMap<String, u64>,
}

impl DailyRecord {
    /// Project this record through one variant's key; missing keys count as zero.
    pub fn point_for(&self, key: &str) -> Point {
        Point::new(
            self.date.clone(),
            self.visits.get(key).copied().unwrap_or(0),
            self.conversions.get(key).copied().unwrap_or(0),
        )
    }
}

/// Raw dashboard input as served in `data.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub variations: Vec<Variant>,
    #[serde(default)]
    pub data: Vec<DailyRecord>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("variant name `{0}` appears more than once")]
    DuplicateName(String),
    #[error("variants `{first}` and `{second}` both read counts from key `{key}`")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },
}

impl Dataset {
    #[cfg(test)]
    pub fn new(variations: Vec<Variant>, data: Vec<DailyRecord>) -> Self {
        Self { variations, data }
    }

    /// Rejects datasets whose variants would collide on the display name or on
    /// the count-map key (two variants without an id both read key "0").
    pub fn validate(&self) -> Result<(), DatasetError> {
        let mut names = HashSet::new();
        let mut keys: HashMap<String, &str> = HashMap::new();

        for variant in &self.variations {
            if !names.insert(variant.name.as_str()) {
                return Err(DatasetError::DuplicateName(variant.name.clone()));
            }
            let key = variant.data_key();
            if let Some(first) = keys.get(&key) {
                return Err(DatasetError::DuplicateKey {
                    key,
                    first: first.to_string(),
                    second: variant.name.clone(),
                });
            }
            keys.insert(key, &variant.name);
        }

        Ok(())
    }

    pub fn variant_names(&self) -> Vec<String> {
        self.variations.iter().map(|v| v.name.clone()).collect()
    }

    /// One series per variant, in variant order, one point per record.
    pub fn series(&self) -> Vec<Series> {
        self.variations
            .iter()
            .map(|variant| {
                let key = variant.data_key();
                let data = self.data.iter().map(|record| record.point_for(&key)).collect();
                Series::new(variant.name.clone(), data)
            })
            .collect()
    }
}

/// One variant's observation for a single period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub date: String,
    pub visits: u64,
    pub conversions: u64,
}

impl Point {
    pub fn new(date: impl Into<String>, visits: u64, conversions: u64) -> Self {
        Self {
            date: date.into(),
            visits,
            conversions,
        }
    }

    /// Conversion rate in percent; a point with no visits has a rate of zero.
    pub fn conversion_rate(&self) -> f64 {
        if self.visits > 0 {
            self.conversions as f64 / self.visits as f64 * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub data: Vec<Point>,
}

impl Series {
    pub fn new(name: String, data: Vec<Point>) -> Self {
        Self { name, data }
    }
}

/// Grouping applied to the time axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Day,
    Week,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Day => "Day",
            Mode::Week => "Week",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, visits: &[(&str, u64)], conversions: &[(&str, u64)]) -> DailyRecord {
        DailyRecord {
            date: date.to_string(),
            visits: visits.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            conversions: conversions.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn test_data_key_defaults_to_zero() {
        assert_eq!(Variant::new(Some(42), "A").data_key(), "42");
        assert_eq!(Variant::new(None, "Original").data_key(), "0");
    }

    #[test]
    fn test_parse_dataset_json() {
        let json = r#"{
            "variations": [{"name": "Original"}, {"id": 10001, "name": "Variation A"}],
            "data": [
                {"date": "2025-01-01", "visits": {"0": 100, "10001": 80}, "conversions": {"0": 5, "10001": 9}}
            ]
        }"#;

        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.variations.len(), 2);
        assert_eq!(dataset.variations[0].id, None);
        assert_eq!(dataset.data[0].visits["10001"], 80);
        assert!(dataset.validate().is_ok());
    }

    #[test]
    fn test_series_projects_by_key_with_zero_default() {
        let dataset = Dataset::new(
            vec![Variant::new(Some(1), "A"), Variant::new(Some(2), "B")],
            vec![
                record("2024-01-01", &[("1", 100), ("2", 50)], &[("1", 10)]),
                record("2024-01-02", &[("1", 7)], &[("1", 1)]),
            ],
        );

        let series = dataset.series();
        assert_eq!(series[0].name, "A");
        assert_eq!(series[0].data[0], Point::new("2024-01-01", 100, 10));
        assert_eq!(series[1].data[0], Point::new("2024-01-01", 50, 0));
        assert_eq!(series[1].data[1], Point::new("2024-01-02", 0, 0));
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let dataset = Dataset::new(
            vec![Variant::new(Some(1), "A"), Variant::new(Some(2), "A")],
            vec![],
        );
        assert_eq!(
            dataset.validate(),
            Err(DatasetError::DuplicateName("A".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_colliding_missing_ids() {
        let dataset = Dataset::new(
            vec![Variant::new(None, "Control"), Variant::new(None, "Treatment")],
            vec![],
        );
        assert_eq!(
            dataset.validate(),
            Err(DatasetError::DuplicateKey {
                key: "0".to_string(),
                first: "Control".to_string(),
                second: "Treatment".to_string(),
            })
        );
    }

    #[test]
    fn test_conversion_rate() {
        assert_eq!(Point::new("2024-01-01", 200, 50).conversion_rate(), 25.0);
        assert_eq!(Point::new("2024-01-01", 0, 0).conversion_rate(), 0.0);
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&Mode::Week).unwrap(), "\"week\"");
        let mode: Mode = serde_json::from_str("\"day\"").unwrap();
        assert_eq!(mode, Mode::Day);
    }
}
