use crate::models::Cause;
use serde::{Deserialize, Serialize};

/// Model artifact versions this build understands
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// On-disk classifier layout (JSON)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,

    /// Human-readable model name
    pub name: String,

    pub model_type: ModelType,

    /// Predictor columns in the order the coefficients apply to
    pub feature_names: Vec<String>,

    /// Class code for each probability column
    pub classes: Vec<usize>,

    /// One weight per feature
    pub coefficients: Vec<f64>,

    pub intercept: f64,

    /// When the model was fitted, if recorded
    #[serde(default)]
    pub trained_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name
    pub name: String,

    /// Model type
    pub model_type: ModelType,

    /// Training timestamp
    pub trained_at: Option<chrono::DateTime<chrono::Utc>>,

    /// Number of features
    pub n_features: usize,

    /// Artifact format version
    pub format_version: u32,
}

/// Model type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    /// Logistic regression
    LogisticRegression,
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelType::LogisticRegression => write!(f, "Logistic Regression"),
        }
    }
}

/// Prediction result with confidence score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted outcome
    pub value: Cause,

    /// Probability the classifier assigns to `value` (0.0 - 1.0)
    pub probability: f64,
}
