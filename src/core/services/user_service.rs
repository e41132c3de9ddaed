use crate::api::client::ApiClient;
use crate::api::models::{AccountValidation, NewUser, User};
use crate::core::services::traits::ListService;
use crate::error::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;

pub struct UserService {
    client: Arc<ApiClient>,
}

impl UserService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        let users = self.client.list_users().await?;
        Ok(users)
    }

    /// Toggle the active flag. The refreshed listing after this call
    /// keeps the caller's page position.
    pub async fn set_status(&self, id: u32, active: bool) -> Result<(), ServiceError> {
        Self::require_id(id)?;
        self.client.set_user_status(id, active).await?;
        Ok(())
    }

    pub async fn create(&self, user: NewUser) -> Result<String, ServiceError> {
        if user.first_name.trim().is_empty() || user.last_name.trim().is_empty() {
            return Err(ServiceError::Validation {
                field: "name".to_string(),
                message: "First and last name are required".to_string(),
            });
        }
        if user.password.len() < 6 {
            return Err(ServiceError::Validation {
                field: "password".to_string(),
                message: "Password must be at least 6 characters".to_string(),
            });
        }
        let response = self.client.create_user(&user).await?;
        Ok(response.message)
    }

    pub async fn delete(&self, id: u32) -> Result<String, ServiceError> {
        Self::require_id(id)?;
        let response = self.client.delete_user(id).await.map_err(|e| match e {
            crate::error::ApiError::Http { status: 404, .. } => ServiceError::NotFound {
                resource: "User".to_string(),
                id,
            },
            _ => ServiceError::Api(e),
        })?;
        Ok(response.message)
    }

    /// Approve or reject an owner account attached to a user.
    pub async fn validate_account(
        &self,
        user_id: u32,
        approve: bool,
        account_type_id: u32,
        first_wallet: u32,
        comment: Option<String>,
    ) -> Result<String, ServiceError> {
        Self::require_id(user_id)?;
        let validation = AccountValidation {
            user_id,
            first_wallet,
            approved: u8::from(approve),
            account_type_id,
            comment,
        };
        let response = self.client.validate_account(&validation).await?;
        Ok(response.message)
    }

    fn require_id(id: u32) -> Result<(), ServiceError> {
        if id == 0 {
            return Err(ServiceError::Validation {
                field: "id".to_string(),
                message: "ID must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ListService<User> for UserService {
    async fn list(&self) -> Result<Vec<User>, ServiceError> {
        self.list_users().await
    }
}
