//! Incident dataset artifact: loading, validation and random sampling.

pub mod artifact;
pub mod sampler;

pub use artifact::{DatasetArtifact, RecordEntry, DATASET_FORMAT_VERSION};
pub use sampler::Sampler;

use crate::error::{AppError, Result};
use crate::models::IncidentRecord;
use std::path::Path;
use tracing::{info, warn};

/// Immutable in-memory dataset of validated incident records
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<IncidentRecord>,
}

impl Dataset {
    pub fn new(records: Vec<IncidentRecord>) -> Self {
        Self { records }
    }

    /// Read and validate a dataset artifact. Any failure here is fatal for startup.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            AppError::Startup(format!("cannot read dataset {}: {}", path.display(), e))
        })?;
        let artifact: DatasetArtifact = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::Startup(format!("corrupt dataset {}: {}", path.display(), e))
        })?;

        let dataset = artifact.into_dataset()?;
        if dataset.is_empty() {
            warn!(path = %path.display(), "Incident dataset has no records");
        }
        info!(
            path = %path.display(),
            records = dataset.len(),
            "Incident dataset loaded"
        );
        Ok(dataset)
    }

    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by its NTSB identity
    pub fn find(&self, event_id: &str, aircraft_key: &str) -> Option<&IncidentRecord> {
        self.records
            .iter()
            .find(|r| r.key.event_id == event_id && r.key.aircraft_key == aircraft_key)
    }
}
