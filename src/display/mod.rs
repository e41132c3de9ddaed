pub mod export;
pub mod pager;
pub mod pagination;
pub mod table;

pub use export::{export_announcements, export_properties, export_users};
pub use pager::InteractivePager;
pub use pagination::{format_page_bar, format_range_line};
pub use table::{TableDisplay, format_area, format_date, format_price};
