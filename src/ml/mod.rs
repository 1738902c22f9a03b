/// Machine Learning module for outcome prediction
///
/// This module wraps a pre-fitted binary classifier:
/// - Versioned JSON model artifact
/// - Classifier trait (predict / predict_proba)
/// - Logistic regression scoring
/// - Predictor shaping output for display (predicted cause, confidence)

pub mod classifier;
pub mod models;
pub mod predictor;

pub use classifier::{load_classifier, Classifier, LogisticRegressionClassifier};
pub use models::{ModelArtifact, ModelMetadata, ModelType, Prediction, MODEL_FORMAT_VERSION};
pub use predictor::{Confidence, Predictor};
