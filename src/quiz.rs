//! The quiz itself: draw an incident, then score a guess against the model and the truth.

use crate::config::ArtifactsConfig;
use crate::dataset::{Dataset, Sampler};
use crate::display::{format_record, DisplayRecord};
use crate::error::Result;
use crate::ml::{load_classifier, Confidence, ModelMetadata, Predictor};
use crate::models::{Cause, IncidentRecord};
use serde::Serialize;
use tracing::info;

/// Everything shown on the results page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizOutcome {
    pub guess: Cause,
    pub prediction: Cause,
    pub confidence: Confidence,
    pub reality: Cause,
    pub report_url: String,
}

impl QuizOutcome {
    pub fn guess_correct(&self) -> bool {
        self.guess == self.reality
    }

    pub fn model_correct(&self) -> bool {
        self.prediction == self.reality
    }
}

/// Immutable dataset + classifier pair shared by every request
#[derive(Debug, Clone)]
pub struct QuizEngine {
    dataset: Dataset,
    predictor: Predictor,
}

impl QuizEngine {
    pub fn new(dataset: Dataset, predictor: Predictor) -> Self {
        Self { dataset, predictor }
    }

    /// Load both artifacts and check they agree. Fails startup on any error.
    pub fn load(artifacts: &ArtifactsConfig) -> Result<Self> {
        let dataset = Dataset::load(&artifacts.dataset_path)?;
        let classifier = load_classifier(&artifacts.model_path)?;
        let predictor = Predictor::new(classifier)?;

        info!(
            records = dataset.len(),
            model = %predictor.metadata().name,
            "Quiz engine ready"
        );
        Ok(Self::new(dataset, predictor))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn model(&self) -> &ModelMetadata {
        self.predictor.metadata()
    }

    /// Pick a random incident and its display form
    pub fn draw(&self) -> Result<(IncidentRecord, DisplayRecord)> {
        let record = self.dataset.sample()?.clone();
        let display = format_record(&record);
        Ok((record, display))
    }

    /// Score a guess for a previously drawn incident
    pub fn evaluate(&self, record: &IncidentRecord, guess: Cause) -> Result<QuizOutcome> {
        let (prediction, confidence) = self.predictor.predict_with_confidence(record)?;
        let reality = record.label()?;

        Ok(QuizOutcome {
            guess,
            prediction,
            confidence,
            reality,
            report_url: record.key.report_url(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::{LogisticRegressionClassifier, ModelArtifact, ModelType};
    use crate::models::{feature_index, predictor_names, IncidentKey, FEATURE_COUNT};
    use std::sync::Arc;

    fn engine(label: f64) -> QuizEngine {
        let mut values = [0.0; FEATURE_COUNT];
        values[feature_index("is_plane").unwrap()] = 1.0;
        values[feature_index("cert_level").unwrap()] = 5.0;
        values[feature_index("y").unwrap()] = label;
        let dataset = Dataset::new(vec![IncidentRecord::new(
            IncidentKey::new("20080107X00026", "1"),
            values,
        )]);

        let names: Vec<String> = predictor_names().iter().map(|s| s.to_string()).collect();
        let classifier = LogisticRegressionClassifier::from_artifact(ModelArtifact {
            format_version: 1,
            name: "quiz".to_string(),
            model_type: ModelType::LogisticRegression,
            coefficients: vec![0.0; names.len()],
            feature_names: names,
            classes: vec![0, 1],
            intercept: 1.0,
            trained_at: None,
        })
        .unwrap();

        QuizEngine::new(dataset, Predictor::new(Arc::new(classifier)).unwrap())
    }

    #[test]
    fn test_draw_formats_record() {
        let (record, display) = engine(1.0).draw().unwrap();
        assert_eq!(record.key.event_id, "20080107X00026");
        assert_eq!(display.get("is_plane"), Some("Yes"));
        assert_eq!(display.get("cert_level"), Some("Class 1"));
    }

    #[test]
    fn test_evaluate() {
        let engine = engine(0.0);
        let (record, _) = engine.draw().unwrap();
        let outcome = engine.evaluate(&record, Cause::HumanError).unwrap();

        assert_eq!(outcome.prediction, Cause::BadLuck);
        assert_eq!(outcome.confidence.to_string(), "73%");
        assert_eq!(outcome.reality, Cause::HumanError);
        assert!(outcome.guess_correct());
        assert!(!outcome.model_correct());
        assert!(outcome.report_url.contains("EventID=20080107X00026&AKey=1"));
    }
}
