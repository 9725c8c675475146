use async_trait::async_trait;

use crate::app_error::AppResult;

/// Liveness check against the backing store.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}
