//! Shared fixtures: temporary dataset and model artifacts.

#![allow(dead_code)]

use incident_quiz::config::ArtifactsConfig;
use incident_quiz::models::{predictor_names, FEATURES};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Artifacts written to a temp dir that lives as long as the fixture
pub struct Fixture {
    pub dir: TempDir,
    pub artifacts: ArtifactsConfig,
}

/// One dataset row with every feature at 0 except the overrides
pub fn record(event_id: &str, aircraft_key: i64, overrides: &[(&str, f64)]) -> Value {
    let mut values = serde_json::Map::new();
    for name in FEATURES {
        values.insert(name.to_string(), json!(0));
    }
    for (name, value) in overrides {
        values.insert(name.to_string(), json!(value));
    }
    json!({
        "event_id": event_id,
        "aircraft_key": aircraft_key,
        "values": values,
    })
}

pub fn write_dataset(dir: &Path, records: Vec<Value>) -> PathBuf {
    let path = dir.join("incidents.json");
    let artifact = json!({
        "format_version": 1,
        "features": FEATURES,
        "records": records,
    });
    std::fs::write(&path, serde_json::to_vec_pretty(&artifact).unwrap()).unwrap();
    path
}

/// Model whose only signal is `pilot_hours`
pub fn write_model(dir: &Path, pilot_hours_weight: f64, intercept: f64) -> PathBuf {
    let names = predictor_names();
    let coefficients: Vec<f64> = names
        .iter()
        .map(|n| if *n == "pilot_hours" { pilot_hours_weight } else { 0.0 })
        .collect();
    let path = dir.join("model.json");
    let artifact = json!({
        "format_version": 1,
        "name": "fixture logistic regression",
        "model_type": "logistic_regression",
        "feature_names": names,
        "classes": [0, 1],
        "coefficients": coefficients,
        "intercept": intercept,
        "trained_at": "2019-03-14T00:00:00Z",
    });
    std::fs::write(&path, serde_json::to_vec_pretty(&artifact).unwrap()).unwrap();
    path
}

pub fn fixture(records: Vec<Value>) -> Fixture {
    let dir = TempDir::new().unwrap();
    let dataset_path = write_dataset(dir.path(), records);
    let model_path = write_model(dir.path(), 0.001, -1.0);
    Fixture {
        dir,
        artifacts: ArtifactsConfig {
            dataset_path,
            model_path,
        },
    }
}
