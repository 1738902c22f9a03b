use crate::error::{AppError, Result};
use crate::ml::models::{ModelArtifact, ModelMetadata, ModelType, MODEL_FORMAT_VERSION};
use ndarray::{Array1, Array2, Axis};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Trait for pre-fitted classifiers
pub trait Classifier: Send + Sync {
    /// Predict class labels, one per row
    fn predict(&self, features: &Array2<f64>) -> Result<Vec<usize>>;

    /// Predict class probabilities (n_samples × n_classes, columns follow `classes()`)
    fn predict_proba(&self, features: &Array2<f64>) -> Result<Array2<f64>>;

    /// Class code for each probability column
    fn classes(&self) -> &[usize];

    /// Predictor columns the model expects, in order
    fn feature_names(&self) -> &[String];

    /// Get model metadata
    fn metadata(&self) -> &ModelMetadata;
}

/// Binary logistic regression scored from stored weights
#[derive(Debug, Clone)]
pub struct LogisticRegressionClassifier {
    /// Model metadata
    metadata: ModelMetadata,

    feature_names: Vec<String>,

    /// `[negative, positive]` class codes
    classes: [usize; 2],

    weights: Array1<f64>,

    bias: f64,
}

impl LogisticRegressionClassifier {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        if artifact.format_version != MODEL_FORMAT_VERSION {
            return Err(AppError::Startup(format!(
                "unsupported model format_version {} (expected {})",
                artifact.format_version, MODEL_FORMAT_VERSION
            )));
        }

        let classes: [usize; 2] = artifact.classes.as_slice().try_into().map_err(|_| {
            AppError::Startup(format!(
                "binary classifier needs exactly 2 classes, artifact lists {}",
                artifact.classes.len()
            ))
        })?;
        if classes[0] == classes[1] {
            return Err(AppError::Startup("classifier classes must be distinct".to_string()));
        }

        if artifact.coefficients.len() != artifact.feature_names.len() {
            return Err(AppError::Startup(format!(
                "model has {} coefficients for {} features",
                artifact.coefficients.len(),
                artifact.feature_names.len()
            )));
        }
        if !artifact.intercept.is_finite() || artifact.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(AppError::Startup("model weights must be finite".to_string()));
        }

        Ok(Self {
            metadata: ModelMetadata {
                name: artifact.name,
                model_type: artifact.model_type,
                trained_at: artifact.trained_at,
                n_features: artifact.feature_names.len(),
                format_version: artifact.format_version,
            },
            feature_names: artifact.feature_names,
            classes,
            weights: Array1::from_vec(artifact.coefficients),
            bias: artifact.intercept,
        })
    }

    fn check_shape(&self, features: &Array2<f64>) -> Result<()> {
        if features.ncols() != self.weights.len() {
            return Err(AppError::Prediction(format!(
                "expected {} columns, got {}",
                self.weights.len(),
                features.ncols()
            )));
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(AppError::Prediction("non-finite feature value".to_string()));
        }
        Ok(())
    }

    fn sigmoid(z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }
}

impl Classifier for LogisticRegressionClassifier {
    fn predict(&self, features: &Array2<f64>) -> Result<Vec<usize>> {
        let proba = self.predict_proba(features)?;

        // Ties go to the first class
        Ok(proba
            .axis_iter(Axis(0))
            .map(|row| {
                if row[1] > row[0] {
                    self.classes[1]
                } else {
                    self.classes[0]
                }
            })
            .collect())
    }

    fn predict_proba(&self, features: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_shape(features)?;

        let scores = features.dot(&self.weights) + self.bias;
        let mut proba = Array2::zeros((features.nrows(), 2));
        for (i, &z) in scores.iter().enumerate() {
            let positive = Self::sigmoid(z);
            proba[[i, 0]] = 1.0 - positive;
            proba[[i, 1]] = positive;
        }

        Ok(proba)
    }

    fn classes(&self) -> &[usize] {
        &self.classes
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

/// Read a classifier artifact from disk. Any failure here is fatal for startup.
pub fn load_classifier(path: impl AsRef<Path>) -> Result<Arc<dyn Classifier>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::Startup(format!("cannot read model {}: {}", path.display(), e)))?;
    let artifact: ModelArtifact = serde_json::from_slice(&bytes)
        .map_err(|e| AppError::Startup(format!("corrupt model {}: {}", path.display(), e)))?;

    let classifier: Arc<dyn Classifier> = match artifact.model_type {
        ModelType::LogisticRegression => {
            Arc::new(LogisticRegressionClassifier::from_artifact(artifact)?)
        }
    };

    let metadata = classifier.metadata();
    info!(
        path = %path.display(),
        name = %metadata.name,
        model_type = %metadata.model_type,
        n_features = metadata.n_features,
        "Classifier loaded"
    );
    Ok(classifier)
}
