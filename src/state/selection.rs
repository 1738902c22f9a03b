use crate::config::SelectionConfig;
use crate::error::{AppError, Result};
use crate::models::IncidentRecord;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Per-visitor incident selections, keyed by an unguessable token.
///
/// Each visit to the selection page stores its record under a fresh token, so
/// concurrent visitors never read each other's incidents. Entries expire after
/// the configured TTL and the store is capped in size.
#[derive(Clone)]
pub struct SelectionStore {
    cache: Cache<Uuid, Arc<IncidentRecord>>,
}

impl SelectionStore {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self { cache }
    }

    pub fn from_config(config: &SelectionConfig) -> Self {
        Self::new(config.max_active, config.ttl())
    }

    /// Remember a record and return the token that retrieves it
    pub async fn insert(&self, record: IncidentRecord) -> Uuid {
        let token = Uuid::new_v4();
        self.cache.insert(token, Arc::new(record)).await;
        tracing::debug!(%token, "Selection stored");
        token
    }

    /// Fetch the record a token was issued for
    pub async fn get(&self, token: &Uuid) -> Result<Arc<IncidentRecord>> {
        self.cache.get(token).await.ok_or_else(|| {
            AppError::NoActiveIncident(
                "this incident has expired or was never drawn; start a new round".to_string(),
            )
        })
    }
}
