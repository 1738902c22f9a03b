use crate::error::{AppError, Result};
use crate::models::Cause;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of columns shown and predicted on, label included
pub const FEATURE_COUNT: usize = 19;

/// Number of predictor columns (every feature except the label)
pub const PREDICTOR_COUNT: usize = FEATURE_COUNT - 1;

/// Fixed, ordered feature list. The classifier consumes the first
/// `PREDICTOR_COUNT` entries in exactly this order; `y` is the label.
pub const FEATURES: [&str; FEATURE_COUNT] = [
    "homebuilt_coded",
    "light_out",
    "airframe_hours",
    "gross_weight",
    "visibility",
    "wind_velocity",
    "mid_air_acc",
    "is_plane",
    "instructional_flight",
    "personal_flight",
    "pilot_hours",
    "pro_pilot",
    "pilot_age",
    "cert_level",
    "seats",
    "scnd_pilot",
    "since_inspection",
    "airport_dist",
    "y",
];

/// Outcome column
pub const LABEL: &str = "y";

/// Columns holding 0/1 flags
pub const BOOLEAN_FEATURES: [&str; 8] = [
    "is_plane",
    "homebuilt_coded",
    "pro_pilot",
    "scnd_pilot",
    "mid_air_acc",
    "instructional_flight",
    "personal_flight",
    "light_out",
];

/// Column holding the 5-level pilot certificate code
pub const CERT_FEATURE: &str = "cert_level";

const NTSB_REPORT_BASE: &str = "https://app.ntsb.gov/pdfgenerator/ReportGeneratorFile.ashx";

/// Names of the predictor columns, in classifier order
pub fn predictor_names() -> &'static [&'static str] {
    &FEATURES[..PREDICTOR_COUNT]
}

/// Position of a feature in `FEATURES`
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURES.iter().position(|f| *f == name)
}

/// Identity of an incident record in the NTSB database
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncidentKey {
    /// NTSB event id (e.g. `20080107X00026`)
    pub event_id: String,

    /// Aircraft key within the event
    pub aircraft_key: String,
}

impl IncidentKey {
    pub fn new(event_id: impl Into<String>, aircraft_key: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            aircraft_key: aircraft_key.into(),
        }
    }

    /// Link to the public NTSB report for this aircraft
    pub fn report_url(&self) -> String {
        format!(
            "{}?EventID={}&AKey={}&RType=HTML&IType=LA",
            NTSB_REPORT_BASE, self.event_id, self.aircraft_key
        )
    }
}

impl fmt::Display for IncidentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.event_id, self.aircraft_key)
    }
}

/// A raw coded value. Integral values print without a fractional part,
/// so a flag stored as `1.0` reads as `"1"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureValue(pub f64);

impl FeatureValue {
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
            write!(f, "{}", v as i64)
        } else {
            write!(f, "{}", v)
        }
    }
}

/// One incident projected onto `FEATURES`. Construction guarantees that
/// every feature is present and stored in the fixed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub key: IncidentKey,
    values: [f64; FEATURE_COUNT],
}

impl IncidentRecord {
    pub fn new(key: IncidentKey, values: [f64; FEATURE_COUNT]) -> Self {
        Self { key, values }
    }

    /// Value of a named feature
    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        feature_index(name).map(|i| FeatureValue(self.values[i]))
    }

    /// All features as `(name, value)` pairs, in `FEATURES` order
    pub fn features(&self) -> impl Iterator<Item = (&'static str, FeatureValue)> + '_ {
        FEATURES
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| (*name, FeatureValue(*value)))
    }

    /// Predictor columns only, label excluded
    pub fn predictors(&self) -> &[f64] {
        &self.values[..PREDICTOR_COUNT]
    }

    /// True outcome from the label column
    pub fn label(&self) -> Result<Cause> {
        let raw = self.values[PREDICTOR_COUNT];
        if raw.fract() == 0.0 && raw >= 0.0 {
            if let Some(cause) = Cause::from_code(raw as usize) {
                return Ok(cause);
            }
        }
        Err(AppError::Internal(format!(
            "record {} has label {} outside {{0, 1}}",
            self.key,
            FeatureValue(raw)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(overrides: &[(&str, f64)]) -> IncidentRecord {
        let mut values = [0.0; FEATURE_COUNT];
        for (name, value) in overrides {
            values[feature_index(name).unwrap()] = *value;
        }
        IncidentRecord::new(IncidentKey::new("20080107X00026", "1"), values)
    }

    #[test]
    fn test_feature_layout() {
        assert_eq!(FEATURES.len(), 19);
        assert_eq!(predictor_names().len(), 18);
        assert_eq!(FEATURES[FEATURE_COUNT - 1], LABEL);
        assert!(!predictor_names().contains(&LABEL));
        for name in BOOLEAN_FEATURES.iter().chain(std::iter::once(&CERT_FEATURE)) {
            assert!(feature_index(name).is_some(), "{} missing", name);
        }
    }

    #[test]
    fn test_report_url() {
        let key = IncidentKey::new("20001212X19172", "2");
        assert_eq!(
            key.report_url(),
            "https://app.ntsb.gov/pdfgenerator/ReportGeneratorFile.ashx?EventID=20001212X19172&AKey=2&RType=HTML&IType=LA"
        );
    }

    #[test]
    fn test_feature_value_display() {
        assert_eq!(FeatureValue(1.0).to_string(), "1");
        assert_eq!(FeatureValue(0.0).to_string(), "0");
        assert_eq!(FeatureValue(1520.0).to_string(), "1520");
        assert_eq!(FeatureValue(2.5).to_string(), "2.5");
        assert_eq!(FeatureValue(-3.0).to_string(), "-3");
    }

    #[test]
    fn test_features_in_fixed_order() {
        let record = record_with(&[("pilot_hours", 350.0), ("y", 1.0)]);
        let names: Vec<&str> = record.features().map(|(name, _)| name).collect();
        assert_eq!(names, FEATURES.to_vec());
        assert_eq!(record.get("pilot_hours"), Some(FeatureValue(350.0)));
        assert_eq!(record.get("tail_number"), None);
        assert_eq!(record.predictors().len(), PREDICTOR_COUNT);
    }

    #[test]
    fn test_label() {
        assert_eq!(record_with(&[("y", 1.0)]).label().unwrap(), Cause::BadLuck);
        assert_eq!(record_with(&[]).label().unwrap(), Cause::HumanError);
        assert!(record_with(&[("y", 0.5)]).label().is_err());
        assert!(record_with(&[("y", 3.0)]).label().is_err());
    }
}
