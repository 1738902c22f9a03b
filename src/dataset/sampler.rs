use crate::dataset::Dataset;
use crate::error::{AppError, Result};
use crate::models::IncidentRecord;
use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform random selection over a dataset
pub trait Sampler {
    /// Pick one record with the given source of randomness
    fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&IncidentRecord>;

    /// Pick one record using the thread-local generator
    fn sample(&self) -> Result<&IncidentRecord> {
        self.sample_with(&mut rand::thread_rng())
    }
}

impl Sampler for Dataset {
    fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&IncidentRecord> {
        self.records()
            .choose(rng)
            .ok_or_else(|| AppError::NoData("the incident dataset is empty".to_string()))
    }
}
