use crate::api::models::{
    AccountValidation, Announcement, AnnouncementsEnvelope, City, LoginRequest, LoginResponse,
    MessageResponse, NewProperty, NewUser, PropertiesEnvelope, Property, PropertyLevel,
    PropertyType, PropertyValidation, StatusUpdate, User, UsersEnvelope,
};
use crate::error::ApiError;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("immo-cli/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the marketplace back-office API. All authenticated
/// calls carry a bearer token obtained from the sudo sign-in endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    pub base_url: String,
    pub token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Http {
                status: 0,
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(base_url: String, token: String) -> Result<Self, ApiError> {
        let mut client = ApiClient::new(base_url)?;
        client.token = Some(token);
        Ok(client)
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        request
    }

    async fn send<T>(&self, request: RequestBuilder, endpoint: &str) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    timeout_secs: DEFAULT_TIMEOUT_SECS,
                    endpoint: endpoint.to_string(),
                }
            } else {
                ApiError::Http {
                    status: 0,
                    endpoint: endpoint.to_string(),
                    message: format!("Request failed: {}", e),
                }
            }
        })?;
        self.handle_response(response, endpoint).await
    }

    pub async fn handle_response<T>(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            match status.as_u16() {
                401 | 403 => Err(ApiError::Unauthorized {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    server_message: error_text,
                }),
                408 | 504 => Err(ApiError::Timeout {
                    timeout_secs: DEFAULT_TIMEOUT_SECS,
                    endpoint: endpoint.to_string(),
                }),
                _ => Err(ApiError::Http {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    message: error_text,
                }),
            }
        }
    }

    // --- auth ---

    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let endpoint = "/api/user/signin-sudo";
        let body = LoginRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
        };
        self.send(self.build_request(Method::POST, endpoint).json(&body), endpoint)
            .await
    }

    // --- users ---

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let endpoint = "/api/user/getall-users";
        let envelope: UsersEnvelope = self
            .send(self.build_request(Method::GET, endpoint), endpoint)
            .await?;
        Ok(envelope.user)
    }

    pub async fn set_user_status(&self, user_id: u32, active: bool) -> Result<(), ApiError> {
        let endpoint = format!("/api/user/{}/status", user_id);
        let body = StatusUpdate { is_active: active };
        let _: MessageResponse = self
            .send(
                self.build_request(Method::PUT, &endpoint).json(&body),
                &endpoint,
            )
            .await?;
        Ok(())
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<MessageResponse, ApiError> {
        let endpoint = "/api/user/create-sudoer";
        self.send(self.build_request(Method::POST, endpoint).json(user), endpoint)
            .await
    }

    pub async fn delete_user(&self, user_id: u32) -> Result<MessageResponse, ApiError> {
        let endpoint = format!("/api/user/{}", user_id);
        self.send(self.build_request(Method::DELETE, &endpoint), &endpoint)
            .await
    }

    pub async fn validate_account(
        &self,
        validation: &AccountValidation,
    ) -> Result<MessageResponse, ApiError> {
        let endpoint = "/api/account/validate-owner";
        self.send(
            self.build_request(Method::POST, endpoint).json(validation),
            endpoint,
        )
        .await
    }

    // --- properties ---

    pub async fn list_properties(&self) -> Result<Vec<Property>, ApiError> {
        let endpoint = "/api/property/getall-property";
        let envelope: PropertiesEnvelope = self
            .send(self.build_request(Method::GET, endpoint), endpoint)
            .await?;
        Ok(envelope.property)
    }

    pub async fn validate_property(
        &self,
        validation: &PropertyValidation,
    ) -> Result<MessageResponse, ApiError> {
        let endpoint = "/api/property/validate";
        self.send(
            self.build_request(Method::POST, endpoint).json(validation),
            endpoint,
        )
        .await
    }

    pub async fn create_property(
        &self,
        property: &NewProperty,
    ) -> Result<MessageResponse, ApiError> {
        let endpoint = "/api/property/add-property-by-sudo";
        self.send(
            self.build_request(Method::POST, endpoint).json(property),
            endpoint,
        )
        .await
    }

    pub async fn delete_property(&self, property_id: u32) -> Result<MessageResponse, ApiError> {
        // deletion goes through POST on this API
        let endpoint = format!("/api/property/delete-property/{}", property_id);
        self.send(self.build_request(Method::POST, &endpoint), &endpoint)
            .await
    }

    // --- selection catalogs ---

    pub async fn list_property_types(&self) -> Result<Vec<PropertyType>, ApiError> {
        let endpoint = "/api/property/getall-property-type";
        self.send(self.build_request(Method::GET, endpoint), endpoint)
            .await
    }

    pub async fn list_levels(&self) -> Result<Vec<PropertyLevel>, ApiError> {
        let endpoint = "/api/property/getall-level";
        self.send(self.build_request(Method::GET, endpoint), endpoint)
            .await
    }

    pub async fn list_cities(&self) -> Result<Vec<City>, ApiError> {
        let endpoint = "/api/account/get-all-city/";
        self.send(self.build_request(Method::GET, endpoint), endpoint)
            .await
    }

    // --- announcements ---

    pub async fn list_announcements(&self) -> Result<Vec<Announcement>, ApiError> {
        let endpoint = "/api/announcement/getall-announcement";
        let envelope: AnnouncementsEnvelope = self
            .send(self.build_request(Method::GET, endpoint), endpoint)
            .await?;
        Ok(envelope.announcement)
    }
}
