use crate::error::ServiceError;
use async_trait::async_trait;

/// Trait for services that can list resources
#[async_trait]
pub trait ListService<T> {
    /// Fetch the full resource list; filtering and pagination happen
    /// client-side in the view engine.
    async fn list(&self) -> Result<Vec<T>, ServiceError>;
}

/// Trait for services that can retrieve individual resources
#[async_trait]
pub trait GetService<T> {
    /// Get a single resource by ID
    async fn get(&self, id: u32) -> Result<T, ServiceError>;
}
