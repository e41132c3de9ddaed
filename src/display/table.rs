use crate::api::models::{Announcement, Property, User};
use crate::core::services::PropertyCatalogs;
use crate::error::AppError;
use crate::utils::text::truncate_text_unicode;
use chrono::{DateTime, Utc};
use comfy_table::{Attribute, Cell, Color, Table, presets};
use crossterm::terminal;

const OWNER_COL_WIDTH: usize = 28;
const EMAIL_COL_WIDTH: usize = 32;

/// Formatter and utilities for table display
pub struct TableDisplay {
    max_width: Option<usize>,
    use_colors: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: true,
        }
    }

    /// Detect terminal width, bounded for stability
    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _rows)) => Some((cols as usize).clamp(40, 200)),
            Err(_) => Some(80),
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    fn new_table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
        if let Some(width) = self.max_width {
            table.set_width(width as u16);
        }

        if self.use_colors {
            table.set_header(
                headers
                    .iter()
                    .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan))
                    .collect::<Vec<_>>(),
            );
        } else {
            table.set_header(headers.to_vec());
        }
        table
    }

    fn status_cell(&self, positive: bool, yes: &str, no: &str) -> Cell {
        let (text, color) = if positive {
            (yes, Color::Green)
        } else {
            (no, Color::Yellow)
        };
        if self.use_colors {
            Cell::new(text).fg(color)
        } else {
            Cell::new(text)
        }
    }

    /// Render one page of the user listing
    pub fn render_users(&self, users: &[&User]) -> Result<String, AppError> {
        if users.is_empty() {
            return Ok("No users to display.".to_string());
        }

        let mut table = self.new_table(&[
            "ID", "Name", "Email", "Type", "Role", "Account", "Status", "Created",
        ]);

        for user in users {
            let account = user
                .account
                .as_ref()
                .map(|a| {
                    let approval = if a.is_approved { "approved" } else { "pending" };
                    format!("{} ({})", a.title, approval)
                })
                .unwrap_or_else(|| "—".to_string());

            table.add_row(vec![
                Cell::new(user.id.to_string()),
                Cell::new(format!("{} {}", user.first_name, user.last_name)),
                Cell::new(truncate_text_unicode(&user.email, EMAIL_COL_WIDTH)),
                Cell::new(&user.user_type.name),
                Cell::new(&user.role.name),
                Cell::new(truncate_text_unicode(&account, OWNER_COL_WIDTH)),
                self.status_cell(user.is_active, "Active", "Inactive"),
                Cell::new(format_date(&user.created_at)),
            ]);
        }

        Ok(table.to_string())
    }

    /// Render one page of the property listing
    pub fn render_properties(&self, properties: &[&Property]) -> Result<String, AppError> {
        if properties.is_empty() {
            return Ok("No properties to display.".to_string());
        }

        let mut table = self.new_table(&[
            "ID", "Owner", "Type", "City", "Price", "Area", "Features", "Status", "Created",
        ]);

        for property in properties {
            let owner = property
                .account
                .as_ref()
                .map(|a| a.title.clone())
                .unwrap_or_else(|| "—".to_string());
            let city = property
                .city
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "—".to_string());

            table.add_row(vec![
                Cell::new(property.id.to_string()),
                Cell::new(truncate_text_unicode(&owner, OWNER_COL_WIDTH)),
                Cell::new(&property.property_type.name),
                Cell::new(city),
                Cell::new(format_price(property.price)),
                Cell::new(format_area(property.area)),
                Cell::new(format_features(property)),
                self.status_cell(property.approved, "Approved", "Pending"),
                Cell::new(format_date(&property.created_at)),
            ]);
        }

        Ok(table.to_string())
    }

    /// Render one page of the announcement listing
    pub fn render_announcements(&self, announcements: &[&Announcement]) -> Result<String, AppError> {
        if announcements.is_empty() {
            return Ok("No announcements to display.".to_string());
        }

        let mut table = self.new_table(&[
            "ID", "Code", "Type", "Property", "City", "Price", "Views", "Status", "Created",
        ]);

        for announcement in announcements {
            let city = announcement
                .property
                .city
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "—".to_string());

            table.add_row(vec![
                Cell::new(announcement.id.to_string()),
                Cell::new(&announcement.code),
                Cell::new(&announcement.announcement_type.name),
                Cell::new(&announcement.property.property_type.name),
                Cell::new(city),
                Cell::new(format_price(announcement.price)),
                Cell::new(announcement.views.to_string()),
                Cell::new(announcement_status(announcement.status_id)),
                Cell::new(format_date(&announcement.created_at)),
            ]);
        }

        Ok(table.to_string())
    }

    /// Key/value detail view for one announcement
    pub fn render_announcement_detail(&self, announcement: &Announcement) -> Result<String, AppError> {
        let mut table = self.new_table(&["Field", "Value"]);

        let property = &announcement.property;
        let rows: Vec<(&str, String)> = vec![
            ("ID", announcement.id.to_string()),
            ("Code", announcement.code.clone()),
            ("Type", announcement.announcement_type.name.clone()),
            ("Status", announcement_status(announcement.status_id).to_string()),
            ("Price", format_price(announcement.price)),
            ("Views", announcement.views.to_string()),
            ("Description", announcement.description.clone()),
            ("Property ID", property.id.to_string()),
            ("Property type", property.property_type.name.clone()),
            ("Area", format_area(property.area)),
            (
                "City",
                property
                    .city
                    .as_ref()
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "—".to_string()),
            ),
            ("Created", format_date(&announcement.created_at)),
        ];

        for (field, value) in rows {
            table.add_row(vec![Cell::new(field), Cell::new(value)]);
        }

        Ok(table.to_string())
    }

    /// Selection catalogs shown before creating a property
    pub fn render_catalogs(&self, catalogs: &PropertyCatalogs) -> Result<String, AppError> {
        let mut output = String::new();

        let mut types = self.new_table(&["Type ID", "Name"]);
        for t in &catalogs.types {
            types.add_row(vec![Cell::new(t.id.to_string()), Cell::new(&t.name)]);
        }
        output.push_str("Property types:\n");
        output.push_str(&types.to_string());

        let mut levels = self.new_table(&["Level ID", "Name"]);
        for level in &catalogs.levels {
            levels.add_row(vec![Cell::new(level.id.to_string()), Cell::new(&level.name)]);
        }
        output.push_str("\nLevels:\n");
        output.push_str(&levels.to_string());

        let mut cities = self.new_table(&["City ID", "Name"]);
        for city in &catalogs.cities {
            cities.add_row(vec![Cell::new(city.id.to_string()), Cell::new(&city.name)]);
        }
        output.push_str("\nCities:\n");
        output.push_str(&cities.to_string());

        Ok(output)
    }
}

/// Marketplace prices are whole FCFA amounts with space-grouped
/// thousands.
pub fn format_price(price: f64) -> String {
    let rounded = price.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}{} FCFA", sign, grouped)
}

pub fn format_area(area: f64) -> String {
    if area.fract() == 0.0 {
        format!("{} m²", area as i64)
    } else {
        format!("{:.1} m²", area)
    }
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_features(property: &Property) -> String {
    let mut parts = Vec::new();
    if let Some(n) = property.bedrooms {
        parts.push(format!("{} bd", n));
    }
    if let Some(n) = property.bathrooms {
        parts.push(format!("{} ba", n));
    }
    if let Some(n) = property.living_rooms {
        parts.push(format!("{} lv", n));
    }
    if property.garage_places > 0 {
        parts.push(format!("{} gar", property.garage_places));
    }
    if property.pool {
        parts.push("pool".to_string());
    }
    if parts.is_empty() {
        "—".to_string()
    } else {
        parts.join(", ")
    }
}

pub fn announcement_status(status_id: u32) -> &'static str {
    match status_id {
        1 => "Draft",
        2 => "Published",
        3 => "Suspended",
        4 => "Closed",
        _ => "Unknown",
    }
}
