use crate::view::{FieldPath, FieldValue, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Custom deserializer: the marketplace API emits prices as numbers or
/// numeric strings depending on the endpoint; both map to f64, anything
/// else to 0.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => Ok(s.parse::<f64>().unwrap_or(0.0)),
        _ => Ok(0.0),
    }
}

// Authentication models
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "userPhoneOrEmail")]
    pub identifier: String,
    #[serde(rename = "userPassword")]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "userToken")]
    pub token: String,
    #[serde(rename = "userFirstname")]
    pub first_name: String,
    #[serde(rename = "userLastname")]
    pub last_name: String,
    #[serde(rename = "userEmail")]
    pub email: String,
}

// User models
#[derive(Debug, Deserialize, Clone)]
pub struct UserRole {
    #[serde(rename = "userRoleId")]
    pub id: u32,
    #[serde(rename = "userRoleName")]
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UserType {
    #[serde(rename = "userTypeId")]
    pub id: u32,
    #[serde(rename = "userTypeName")]
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AccountType {
    #[serde(rename = "accountTypeId")]
    pub id: u32,
    #[serde(rename = "accountTypeName")]
    pub name: String,
}

/// Owner account attached to a user or a property. The API spells the
/// title field `accounTitle`.
#[derive(Debug, Deserialize, Clone)]
pub struct Account {
    #[serde(rename = "accountId")]
    pub id: u32,
    #[serde(rename = "accounTitle")]
    pub title: String,
    #[serde(rename = "accountNumber")]
    pub number: String,
    #[serde(rename = "accountEmail")]
    pub email: String,
    #[serde(rename = "accountIsActive")]
    pub is_active: bool,
    #[serde(rename = "accountTypeID")]
    pub type_id: u32,
    #[serde(rename = "accountIsApproved")]
    pub is_approved: bool,
    #[serde(rename = "validationComment")]
    pub validation_comment: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "accounttype")]
    pub account_type: AccountType,
}

#[derive(Debug, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "userId")]
    pub id: u32,
    #[serde(rename = "userFirstname")]
    pub first_name: String,
    #[serde(rename = "userLastname")]
    pub last_name: String,
    #[serde(rename = "userPhoneNumber")]
    pub phone: String,
    #[serde(rename = "userEmail")]
    pub email: String,
    #[serde(rename = "userAccount")]
    pub account_id: Option<u32>,
    #[serde(rename = "userRoleID")]
    pub role_id: u32,
    #[serde(rename = "userTypeID")]
    pub type_id: u32,
    #[serde(rename = "userIsActive")]
    pub is_active: bool,
    #[serde(rename = "userGender")]
    pub gender: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "userrole")]
    pub role: UserRole,
    #[serde(rename = "usertype")]
    pub user_type: UserType,
    pub account: Option<Account>,
}

// Property models
#[derive(Debug, Deserialize, Clone)]
pub struct PropertyType {
    #[serde(rename = "propertyTypeId")]
    pub id: u32,
    #[serde(rename = "propertyTypeName")]
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PropertyLevel {
    #[serde(rename = "levelId")]
    pub id: u32,
    #[serde(rename = "levelName")]
    pub name: String,
}

/// The API calls cities `ville`.
#[derive(Debug, Deserialize, Clone)]
pub struct City {
    #[serde(rename = "villeId")]
    pub id: u32,
    #[serde(rename = "villeName")]
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Property {
    #[serde(rename = "propertyId")]
    pub id: u32,
    #[serde(rename = "ownerId")]
    pub owner_id: u32,
    #[serde(rename = "propertyTypeID")]
    pub type_id: u32,
    #[serde(rename = "propertyPrice", deserialize_with = "deserialize_amount")]
    pub price: f64,
    #[serde(rename = "propertyArea", deserialize_with = "deserialize_amount")]
    pub area: f64,
    #[serde(rename = "piscine")]
    pub pool: bool,
    #[serde(rename = "livingRoom")]
    pub living_rooms: Option<u32>,
    #[serde(rename = "bedroom")]
    pub bedrooms: Option<u32>,
    #[serde(rename = "garagePlace", default)]
    pub garage_places: u32,
    #[serde(rename = "bathroom")]
    pub bathrooms: Option<u32>,
    #[serde(rename = "propertyApproved")]
    pub approved: bool,
    #[serde(rename = "approvalComment")]
    pub approval_comment: Option<String>,
    #[serde(rename = "approvalDate")]
    pub approval_date: Option<DateTime<Utc>>,
    #[serde(rename = "approverUser")]
    pub approver_user: Option<u32>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "propertytype")]
    pub property_type: PropertyType,
    pub level: PropertyLevel,
    #[serde(rename = "ville")]
    pub city: Option<City>,
    pub account: Option<Account>,
}

// Announcement models
#[derive(Debug, Deserialize, Clone)]
pub struct AnnouncementType {
    #[serde(rename = "announcementTypeId")]
    pub id: u32,
    #[serde(rename = "announcementTypeName")]
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Announcement {
    #[serde(rename = "announcementId")]
    pub id: u32,
    #[serde(rename = "announcementProperty")]
    pub property_id: u32,
    #[serde(rename = "announcementCode")]
    pub code: String,
    #[serde(rename = "announcementTypeID")]
    pub type_id: u32,
    #[serde(rename = "propertyPrice", deserialize_with = "deserialize_amount")]
    pub price: f64,
    #[serde(rename = "propertyDescription")]
    pub description: String,
    #[serde(rename = "announcementStatusID")]
    pub status_id: u32,
    #[serde(rename = "announcementView", default)]
    pub views: u32,
    #[serde(rename = "visitCount", default)]
    pub visit_count: u32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub property: Property,
    #[serde(rename = "announcementtype")]
    pub announcement_type: AnnouncementType,
}

// Response envelopes
#[derive(Debug, Deserialize)]
pub struct UsersEnvelope {
    pub user: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub struct PropertiesEnvelope {
    pub property: Vec<Property>,
}

#[derive(Debug, Deserialize)]
pub struct AnnouncementsEnvelope {
    pub announcement: Vec<Announcement>,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// Mutation payloads
#[derive(Debug, Serialize)]
pub struct StatusUpdate {
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

/// `accountIsApproved` / `propertyApproved` travel as 0/1 integers on
/// the validation endpoints, unlike the boolean fields on reads.
#[derive(Debug, Serialize)]
pub struct AccountValidation {
    #[serde(rename = "userId")]
    pub user_id: u32,
    #[serde(rename = "firstWallet")]
    pub first_wallet: u32,
    #[serde(rename = "accountIsApproved")]
    pub approved: u8,
    #[serde(rename = "accountTypeID")]
    pub account_type_id: u32,
    #[serde(rename = "validationComment")]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PropertyValidation {
    #[serde(rename = "propertyId")]
    pub property_id: u32,
    #[serde(rename = "propertyApproved")]
    pub approved: u8,
    #[serde(rename = "approvalComment")]
    pub comment: Option<String>,
}

/// The create-user endpoint takes every field as a string.
#[derive(Debug, Serialize, Clone)]
pub struct NewUser {
    #[serde(rename = "userFirstname")]
    pub first_name: String,
    #[serde(rename = "userLastname")]
    pub last_name: String,
    #[serde(rename = "userPhoneNumber")]
    pub phone: String,
    #[serde(rename = "userEmail")]
    pub email: String,
    #[serde(rename = "userCountry")]
    pub country: String,
    #[serde(rename = "userPassword")]
    pub password: String,
    #[serde(rename = "userGender")]
    pub gender: String,
    #[serde(rename = "userRoleID")]
    pub role_id: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct NewProperty {
    #[serde(rename = "ownerId")]
    pub owner_id: u32,
    #[serde(rename = "propertyTypeID")]
    pub type_id: u32,
    #[serde(rename = "propertyLocation")]
    pub city_id: u32,
    #[serde(rename = "propertyPrice")]
    pub price: f64,
    #[serde(rename = "propertyArea")]
    pub area: f64,
    #[serde(rename = "piscine")]
    pub pool: bool,
    #[serde(rename = "livingRoom")]
    pub living_rooms: Option<u32>,
    #[serde(rename = "bedroom")]
    pub bedrooms: Option<u32>,
    #[serde(rename = "garagePlace")]
    pub garage_places: u32,
    #[serde(rename = "bathroom")]
    pub bathrooms: Option<u32>,
    #[serde(rename = "propertyLevel")]
    pub level_id: u32,
}

// Field-path vocabularies: every listing view searches, filters and
// sorts through these. Unknown paths resolve to the empty sentinel,
// which sorts first and never matches a search.

impl Record for User {
    fn resolve(&self, path: &FieldPath) -> FieldValue {
        match path.segments().as_slice() {
            ["id"] => self.id.into(),
            ["first_name"] => self.first_name.as_str().into(),
            ["last_name"] => self.last_name.as_str().into(),
            ["phone"] => self.phone.as_str().into(),
            ["email"] => self.email.as_str().into(),
            ["active"] => self.is_active.into(),
            ["gender"] => self.gender.into(),
            ["created_at"] => self.created_at.timestamp().into(),
            ["role", "id"] => self.role.id.into(),
            ["role", "name"] => self.role.name.as_str().into(),
            ["type", "id"] => self.user_type.id.into(),
            ["type", "name"] => self.user_type.name.as_str().into(),
            ["account", "title"] => self.account.as_ref().map(|a| a.title.as_str()).into(),
            ["account", "approved"] => self.account.as_ref().map(|a| a.is_approved).into(),
            ["account", "type", "id"] => self.account.as_ref().map(|a| a.account_type.id).into(),
            ["account", "type", "name"] => self
                .account
                .as_ref()
                .map(|a| a.account_type.name.as_str())
                .into(),
            _ => FieldValue::Empty,
        }
    }
}

impl Record for Property {
    fn resolve(&self, path: &FieldPath) -> FieldValue {
        match path.segments().as_slice() {
            ["id"] => self.id.into(),
            ["price"] => self.price.into(),
            ["area"] => self.area.into(),
            ["pool"] => self.pool.into(),
            ["bedrooms"] => self.bedrooms.into(),
            ["bathrooms"] => self.bathrooms.into(),
            ["living_rooms"] => self.living_rooms.into(),
            ["garage_places"] => self.garage_places.into(),
            ["approved"] => self.approved.into(),
            ["created_at"] => self.created_at.timestamp().into(),
            ["type", "id"] => self.type_id.into(),
            ["type", "name"] => self.property_type.name.as_str().into(),
            ["level", "name"] => self.level.name.as_str().into(),
            ["city", "name"] => self.city.as_ref().map(|c| c.name.as_str()).into(),
            ["owner", "title"] => self.account.as_ref().map(|a| a.title.as_str()).into(),
            ["owner", "type", "name"] => self
                .account
                .as_ref()
                .map(|a| a.account_type.name.as_str())
                .into(),
            _ => FieldValue::Empty,
        }
    }
}

impl Record for Announcement {
    fn resolve(&self, path: &FieldPath) -> FieldValue {
        match path.segments().as_slice() {
            ["id"] => self.id.into(),
            ["code"] => self.code.as_str().into(),
            ["price"] => self.price.into(),
            ["status"] => self.status_id.into(),
            ["views"] => self.views.into(),
            ["created_at"] => self.created_at.timestamp().into(),
            ["type", "id"] => self.type_id.into(),
            ["type", "name"] => self.announcement_type.name.as_str().into(),
            ["property", "type", "name"] => self.property.property_type.name.as_str().into(),
            ["property", "city", "name"] => self
                .property
                .city
                .as_ref()
                .map(|c| c.name.as_str())
                .into(),
            _ => FieldValue::Empty,
        }
    }
}
