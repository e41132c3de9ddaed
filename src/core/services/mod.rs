pub mod announcement_service;
pub mod property_service;
pub mod traits;
pub mod user_service;

pub use announcement_service::AnnouncementService;
pub use property_service::{PropertyCatalogs, PropertyService};
pub use traits::{GetService, ListService};
pub use user_service::UserService;
