use crate::api::client::ApiClient;
use crate::api::models::Announcement;
use crate::core::services::traits::{GetService, ListService};
use crate::error::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;

pub struct AnnouncementService {
    client: Arc<ApiClient>,
}

impl AnnouncementService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list_announcements(&self) -> Result<Vec<Announcement>, ServiceError> {
        let announcements = self.client.list_announcements().await?;
        Ok(announcements)
    }

    /// The API has no announcement-by-id endpoint; resolve against the
    /// full listing.
    pub async fn show(&self, id: u32) -> Result<Announcement, ServiceError> {
        if id == 0 {
            return Err(ServiceError::Validation {
                field: "id".to_string(),
                message: "Announcement ID must be greater than 0".to_string(),
            });
        }

        let announcements = self.list_announcements().await?;
        announcements
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(ServiceError::NotFound {
                resource: "Announcement".to_string(),
                id,
            })
    }
}

#[async_trait]
impl ListService<Announcement> for AnnouncementService {
    async fn list(&self) -> Result<Vec<Announcement>, ServiceError> {
        self.list_announcements().await
    }
}

#[async_trait]
impl GetService<Announcement> for AnnouncementService {
    async fn get(&self, id: u32) -> Result<Announcement, ServiceError> {
        self.show(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_show_rejects_zero_id() {
        let client = ApiClient::new("http://test.example".to_string()).unwrap();
        let service = AnnouncementService::new(Arc::new(client));

        let result = service.show(0).await;
        assert!(matches!(
            result,
            Err(ServiceError::Validation { field, .. }) if field == "id"
        ));
    }
}
