use crate::error::{AppError, Result};
use crate::ml::classifier::Classifier;
use crate::ml::models::{ModelMetadata, Prediction};
use crate::models::{predictor_names, Cause, IncidentRecord, PREDICTOR_COUNT};
use ndarray::Array2;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Probability shown as a whole percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Confidence(u8);

impl Confidence {
    /// Round a probability to the nearest whole percent
    pub fn from_probability(probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(AppError::Prediction(format!(
                "classifier reported probability {} outside [0, 1]",
                probability
            )));
        }
        Ok(Self((probability * 100.0).round() as u8))
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Feeds incident predictors to a classifier and shapes its answer for display
#[derive(Clone)]
pub struct Predictor {
    classifier: Arc<dyn Classifier>,
}

impl Predictor {
    /// Wrap a classifier after checking it was fitted on our predictor columns
    pub fn new(classifier: Arc<dyn Classifier>) -> Result<Self> {
        let expected = predictor_names();
        let actual = classifier.feature_names();
        if actual.len() != expected.len() || actual.iter().zip(expected).any(|(a, e)| a != e) {
            return Err(AppError::Startup(format!(
                "classifier features [{}] do not match incident predictors [{}]",
                actual.join(", "),
                expected.join(", ")
            )));
        }
        Ok(Self { classifier })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        self.classifier.metadata()
    }

    /// Predict the cause of an incident from its predictor columns
    pub fn predict(&self, record: &IncidentRecord) -> Result<Prediction> {
        let prediction = self.predict_row(record.predictors())?;
        debug!(
            key = %record.key,
            predicted = %prediction.value,
            probability = prediction.probability,
            "Incident scored"
        );
        Ok(prediction)
    }

    /// Predict from a raw feature vector in predictor order
    pub fn predict_row(&self, row: &[f64]) -> Result<Prediction> {
        if row.len() != PREDICTOR_COUNT {
            return Err(AppError::Prediction(format!(
                "expected {} predictor values, got {}",
                PREDICTOR_COUNT,
                row.len()
            )));
        }

        let x = Array2::from_shape_vec((1, row.len()), row.to_vec())
            .map_err(|e| AppError::Prediction(e.to_string()))?;

        let label = *self
            .classifier
            .predict(&x)?
            .first()
            .ok_or_else(|| AppError::Prediction("classifier returned no label".to_string()))?;
        let proba = self.classifier.predict_proba(&x)?;

        let column = self
            .classifier
            .classes()
            .iter()
            .position(|&c| c == label)
            .ok_or_else(|| {
                AppError::Prediction(format!("predicted class {} has no probability column", label))
            })?;
        let value = Cause::from_code(label).ok_or_else(|| {
            AppError::Prediction(format!("predicted class {} is not a known cause", label))
        })?;

        Ok(Prediction {
            value,
            probability: proba[[0, column]],
        })
    }

    /// Predicted cause and its confidence string
    pub fn predict_with_confidence(&self, record: &IncidentRecord) -> Result<(Cause, Confidence)> {
        let prediction = self.predict(record)?;
        Ok((prediction.value, Confidence::from_probability(prediction.probability)?))
    }
}

impl fmt::Debug for Predictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predictor")
            .field("model", &self.classifier.metadata().name)
            .finish()
    }
}
