use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::ServiceError;
use crate::shots::{Shot, ShotId, ShotRepository};

/// In-memory ordered shot collection.
///
/// Every operation takes the lock once, so a single call is atomic. Ids are
/// positions and can still go stale between two calls from the same client.
/// Nothing is persisted; the store lives as long as the process.
#[derive(Clone, Default)]
pub struct ShotStore {
    inner: Arc<RwLock<Vec<Shot>>>,
}

impl ShotStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[cfg(test)]
    pub(crate) fn with_shots(shots: Vec<Shot>) -> Arc<Self> {
        Arc::new(Self { inner: Arc::new(RwLock::new(shots)) })
    }
}

#[async_trait]
impl ShotRepository for ShotStore {
    async fn list(&self) -> Vec<Shot> {
        self.inner.read().await.clone()
    }

    async fn create(&self, shot: Shot) -> (Shot, usize) {
        let mut shots = self.inner.write().await;
        shots.push(shot.clone());
        let total = shots.len();
        debug!(id = total - 1, total, "shot appended");
        (shot, total)
    }

    async fn update(&self, id: ShotId, shot: Shot) -> Result<Shot, ServiceError> {
        let mut shots = self.inner.write().await;
        let slot = shots.get_mut(id.index()).ok_or_else(|| ServiceError::not_found("shot"))?;
        *slot = shot.clone();
        Ok(shot)
    }

    async fn delete(&self, id: ShotId) -> Result<usize, ServiceError> {
        let mut shots = self.inner.write().await;
        if id.index() >= shots.len() {
            return Err(ServiceError::not_found("shot"));
        }
        shots.remove(id.index());
        Ok(shots.len())
    }

    async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
