use crate::api::client::ApiClient;
use crate::api::models::{City, NewProperty, Property, PropertyLevel, PropertyType, PropertyValidation};
use crate::core::services::traits::ListService;
use crate::error::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;

/// Selection catalogs used by the create-property form.
#[derive(Debug)]
pub struct PropertyCatalogs {
    pub types: Vec<PropertyType>,
    pub levels: Vec<PropertyLevel>,
    pub cities: Vec<City>,
}

pub struct PropertyService {
    client: Arc<ApiClient>,
}

impl PropertyService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list_properties(&self) -> Result<Vec<Property>, ServiceError> {
        let properties = self.client.list_properties().await?;
        Ok(properties)
    }

    pub async fn approve(&self, id: u32, comment: Option<String>) -> Result<String, ServiceError> {
        self.validate(id, true, comment).await
    }

    pub async fn reject(&self, id: u32, comment: Option<String>) -> Result<String, ServiceError> {
        self.validate(id, false, comment).await
    }

    async fn validate(
        &self,
        id: u32,
        approve: bool,
        comment: Option<String>,
    ) -> Result<String, ServiceError> {
        Self::require_id(id)?;
        let validation = PropertyValidation {
            property_id: id,
            approved: u8::from(approve),
            comment,
        };
        let response = self.client.validate_property(&validation).await?;
        Ok(response.message)
    }

    pub async fn create(&self, property: NewProperty) -> Result<String, ServiceError> {
        if property.price <= 0.0 {
            return Err(ServiceError::Validation {
                field: "price".to_string(),
                message: "Price must be greater than 0".to_string(),
            });
        }
        if property.area <= 0.0 {
            return Err(ServiceError::Validation {
                field: "area".to_string(),
                message: "Area must be greater than 0".to_string(),
            });
        }
        let response = self.client.create_property(&property).await?;
        Ok(response.message)
    }

    pub async fn delete(&self, id: u32) -> Result<String, ServiceError> {
        Self::require_id(id)?;
        let response = self.client.delete_property(id).await.map_err(|e| match e {
            crate::error::ApiError::Http { status: 404, .. } => ServiceError::NotFound {
                resource: "Property".to_string(),
                id,
            },
            _ => ServiceError::Api(e),
        })?;
        Ok(response.message)
    }

    /// The three catalogs are independent; fetch them concurrently.
    pub async fn catalogs(&self) -> Result<PropertyCatalogs, ServiceError> {
        let (types, levels, cities) = futures::try_join!(
            self.client.list_property_types(),
            self.client.list_levels(),
            self.client.list_cities(),
        )?;
        Ok(PropertyCatalogs {
            types,
            levels,
            cities,
        })
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
impl ListService<Property> for PropertyService {
    async fn list(&self) -> Result<Vec<Property>, ServiceError> {
        self.list_properties().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> PropertyService {
        let client = ApiClient::new("http://test.example".to_string()).unwrap();
        PropertyService::new(Arc::new(client))
    }

    fn new_property(price: f64, area: f64) -> NewProperty {
        NewProperty {
            owner_id: 1,
            type_id: 2,
            city_id: 4,
            price,
            area,
            pool: false,
            living_rooms: Some(1),
            bedrooms: Some(3),
            garage_places: 0,
            bathrooms: Some(2),
            level_id: 1,
        }
    }

    #[tokio::test]
    async fn test_approve_rejects_zero_id() {
        let service = create_test_service();
        let result = service.approve(0, None).await;
        assert!(matches!(
            result,
            Err(ServiceError::Validation { field, .. }) if field == "id"
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_price() {
        let service = create_test_service();
        let result = service.create(new_property(0.0, 120.0)).await;
        assert!(matches!(
            result,
            Err(ServiceError::Validation { field, .. }) if field == "price"
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_area() {
        let service = create_test_service();
        let result = service.create(new_property(100_000.0, 0.0)).await;
        assert!(matches!(
            result,
            Err(ServiceError::Validation { field, .. }) if field == "area"
        ));
    }
}
