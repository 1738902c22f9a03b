use crate::dataset::Dataset;
use crate::error::{AppError, Result};
use crate::models::{IncidentKey, IncidentRecord, BOOLEAN_FEATURES, FEATURES, FEATURE_COUNT, LABEL};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, warn};

/// Dataset artifact versions this build understands
pub const DATASET_FORMAT_VERSION: u32 = 1;

/// On-disk dataset layout (JSON)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetArtifact {
    pub format_version: u32,

    /// Columns present in every record
    pub features: Vec<String>,

    pub records: Vec<RecordEntry>,
}

/// One dataset row as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEntry {
    pub event_id: String,
    pub aircraft_key: KeyPart,
    pub values: HashMap<String, f64>,
}

/// Aircraft keys are integers in NTSB exports but strings are accepted too
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyPart {
    Int(i64),
    Text(String),
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Int(v) => write!(f, "{}", v),
            KeyPart::Text(v) => write!(f, "{}", v),
        }
    }
}

impl DatasetArtifact {
    /// Validate the artifact and project every record onto `FEATURES`
    pub fn into_dataset(self) -> Result<Dataset> {
        if self.format_version != DATASET_FORMAT_VERSION {
            return Err(AppError::Startup(format!(
                "unsupported dataset format_version {} (expected {})",
                self.format_version, DATASET_FORMAT_VERSION
            )));
        }

        let declared: HashSet<&str> = self.features.iter().map(String::as_str).collect();
        let missing: Vec<&str> = FEATURES
            .iter()
            .copied()
            .filter(|f| !declared.contains(f))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Startup(format!(
                "dataset is missing required features: {}",
                missing.join(", ")
            )));
        }

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(self.records.len());
        for entry in self.records {
            let record = entry.into_record()?;
            if !seen.insert(record.key.clone()) {
                warn!(key = %record.key, "Duplicate incident key in dataset");
            }
            records.push(record);
        }

        debug!(
            records = records.len(),
            extra_columns = declared.len().saturating_sub(FEATURE_COUNT),
            "Dataset artifact validated"
        );
        Ok(Dataset::new(records))
    }
}

impl RecordEntry {
    fn into_record(self) -> Result<IncidentRecord> {
        let key = IncidentKey::new(self.event_id, self.aircraft_key.to_string());

        let mut values = [0.0; FEATURE_COUNT];
        for (slot, name) in values.iter_mut().zip(FEATURES.iter()) {
            let value = *self.values.get(*name).ok_or_else(|| {
                AppError::Startup(format!("record {} is missing feature '{}'", key, name))
            })?;
            if !value.is_finite() {
                return Err(AppError::Startup(format!(
                    "record {} has non-finite value for '{}'",
                    key, name
                )));
            }
            let binary = *name == LABEL || BOOLEAN_FEATURES.contains(name);
            if binary && value != 0.0 && value != 1.0 {
                return Err(AppError::Startup(format!(
                    "record {} has code {} for '{}', expected 0 or 1",
                    key, value, name
                )));
            }
            *slot = value;
        }

        Ok(IncidentRecord::new(key, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_values() -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for name in FEATURES {
            map.insert(name.to_string(), json!(0));
        }
        map.insert("is_plane".to_string(), json!(1));
        map.insert("cert_level".to_string(), json!(5));
        map.insert("pilot_hours".to_string(), json!(1250.5));
        serde_json::Value::Object(map)
    }

    fn artifact(records: serde_json::Value) -> DatasetArtifact {
        serde_json::from_value(json!({
            "format_version": 1,
            "features": FEATURES,
            "records": records,
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_artifact() {
        let dataset = artifact(json!([
            { "event_id": "20001204X00000", "aircraft_key": 1, "values": full_values() },
            { "event_id": "20001204X00001", "aircraft_key": "2", "values": full_values() },
        ]))
        .into_dataset()
        .unwrap();

        assert_eq!(dataset.len(), 2);
        let first = &dataset.records()[0];
        assert_eq!(first.key.aircraft_key, "1");
        assert_eq!(first.get("cert_level").unwrap().to_string(), "5");
        assert_eq!(first.get("pilot_hours").unwrap().as_f64(), 1250.5);
        assert!(dataset.find("20001204X00001", "2").is_some());
    }

    #[test]
    fn test_missing_feature_in_record() {
        let mut values = full_values();
        values.as_object_mut().unwrap().remove("seats");
        let err = artifact(json!([
            { "event_id": "E1", "aircraft_key": 1, "values": values }
        ]))
        .into_dataset()
        .unwrap_err();

        assert_eq!(err.error_code(), "STARTUP_FAILURE");
        assert!(err.to_string().contains("seats"));
    }

    #[test]
    fn test_invalid_boolean_code() {
        let mut values = full_values();
        values["light_out"] = json!(2);
        let err = artifact(json!([
            { "event_id": "E1", "aircraft_key": 1, "values": values }
        ]))
        .into_dataset()
        .unwrap_err();
        assert!(err.to_string().contains("light_out"));
    }

    #[test]
    fn test_unsupported_version() {
        let mut a = artifact(json!([]));
        a.format_version = 2;
        assert!(a.into_dataset().is_err());
    }

    #[test]
    fn test_declared_features_must_cover_feature_set() {
        let mut a = artifact(json!([]));
        a.features.retain(|f| f != "airport_dist");
        let err = a.into_dataset().unwrap_err();
        assert!(err.to_string().contains("airport_dist"));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let mut values = full_values();
        values["total_fatalities"] = json!(3);
        let mut a = artifact(json!([
            { "event_id": "E1", "aircraft_key": 1, "values": values }
        ]));
        a.features.push("total_fatalities".to_string());

        let dataset = a.into_dataset().unwrap();
        assert_eq!(dataset.records()[0].features().count(), FEATURE_COUNT);
    }
}
