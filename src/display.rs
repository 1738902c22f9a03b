//! Human-readable rendering of coded incident features.

use crate::models::{IncidentKey, IncidentRecord, BOOLEAN_FEATURES, CERT_FEATURE};
use serde::Serialize;

/// Map a 0/1 flag to Yes/No. Anything other than `"1"` reads as `"No"`.
pub fn to_yn(code: &str) -> &'static str {
    if code == "1" {
        "Yes"
    } else {
        "No"
    }
}

/// Map a pilot certificate code to its name
pub fn cert_decode(code: &str) -> &'static str {
    match code {
        "1" => "Basic",
        "2" => "Sport",
        "3" => "Class 3",
        "4" => "Class 2",
        "5" => "Class 1",
        _ => "None/unknown",
    }
}

/// Display text for one feature given its textual value. Columns other than
/// the flags and the certificate level pass through unchanged.
pub fn format_value(name: &str, text: &str) -> String {
    if BOOLEAN_FEATURES.contains(&name) {
        to_yn(text).to_string()
    } else if name == CERT_FEATURE {
        cert_decode(text).to_string()
    } else {
        text.to_string()
    }
}

/// Caption shown next to a feature
pub fn feature_label(name: &str) -> &'static str {
    match name {
        "homebuilt_coded" => "Homebuilt aircraft",
        "light_out" => "After dark",
        "airframe_hours" => "Airframe hours",
        "gross_weight" => "Gross weight (lbs)",
        "visibility" => "Visibility (miles)",
        "wind_velocity" => "Wind velocity (knots)",
        "mid_air_acc" => "Mid-air collision",
        "is_plane" => "Airplane",
        "instructional_flight" => "Instructional flight",
        "personal_flight" => "Personal flight",
        "pilot_hours" => "Pilot flight hours",
        "pro_pilot" => "Professional pilot",
        "pilot_age" => "Pilot age",
        "cert_level" => "Medical certificate",
        "seats" => "Seats",
        "scnd_pilot" => "Second pilot aboard",
        "since_inspection" => "Hours since inspection",
        "airport_dist" => "Distance from airport (miles)",
        "y" => "Outcome code",
        _ => "Unknown feature",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayFeature {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// A record ready for presentation, features in fixed order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub key: IncidentKey,
    pub features: Vec<DisplayFeature>,
}

impl DisplayRecord {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.features
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Format every feature of a record for display
pub fn format_record(record: &IncidentRecord) -> DisplayRecord {
    DisplayRecord {
        key: record.key.clone(),
        features: record
            .features()
            .map(|(name, value)| DisplayFeature {
                name,
                label: feature_label(name),
                value: format_value(name, &value.to_string()),
            })
            .collect(),
    }
}
