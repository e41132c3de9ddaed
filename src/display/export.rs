//! CSV export of a listing's filtered record set.
//!
//! Export always receives the *filtered* records in display order, not
//! the visible page, so a download contains everything the current
//! search and filters match.

use crate::api::models::{Announcement, Property, User};
use crate::display::table::{announcement_status, format_area, format_date, format_price};
use crate::error::{AppError, DisplayError};
use std::fs;
use std::path::Path;

const USER_HEADERS: &[&str] = &[
    "ID",
    "First name",
    "Last name",
    "Email",
    "Phone",
    "Type",
    "Role",
    "Account",
    "Account approved",
    "Active",
    "Created",
];

const PROPERTY_HEADERS: &[&str] = &[
    "Reference",
    "Type",
    "Owner",
    "Price",
    "Area",
    "Level",
    "City",
    "Bedrooms",
    "Bathrooms",
    "Living rooms",
    "Garage places",
    "Pool",
    "Status",
    "Created",
];

const ANNOUNCEMENT_HEADERS: &[&str] = &[
    "Code",
    "Type",
    "Property type",
    "City",
    "Price",
    "Views",
    "Status",
    "Created",
];

pub fn export_users(path: &Path, users: &[&User]) -> Result<usize, AppError> {
    let rows = users.iter().map(|user| {
        vec![
            user.id.to_string(),
            user.first_name.clone(),
            user.last_name.clone(),
            user.email.clone(),
            user.phone.clone(),
            user.user_type.name.clone(),
            user.role.name.clone(),
            user.account
                .as_ref()
                .map(|a| a.title.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            user.account
                .as_ref()
                .map(|a| yes_no(a.is_approved))
                .unwrap_or_else(|| "N/A".to_string()),
            yes_no(user.is_active),
            format_date(&user.created_at),
        ]
    });
    write_csv(path, USER_HEADERS, rows)
}

pub fn export_properties(path: &Path, properties: &[&Property]) -> Result<usize, AppError> {
    let rows = properties.iter().map(|property| {
        vec![
            property.id.to_string(),
            property.property_type.name.clone(),
            property
                .account
                .as_ref()
                .map(|a| a.title.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            format_price(property.price),
            format_area(property.area),
            property.level.name.clone(),
            property
                .city
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            count_or_na(property.bedrooms),
            count_or_na(property.bathrooms),
            count_or_na(property.living_rooms),
            property.garage_places.to_string(),
            yes_no(property.pool),
            if property.approved {
                "Approved".to_string()
            } else {
                "Pending".to_string()
            },
            format_date(&property.created_at),
        ]
    });
    write_csv(path, PROPERTY_HEADERS, rows)
}

pub fn export_announcements(path: &Path, announcements: &[&Announcement]) -> Result<usize, AppError> {
    let rows = announcements.iter().map(|announcement| {
        vec![
            announcement.code.clone(),
            announcement.announcement_type.name.clone(),
            announcement.property.property_type.name.clone(),
            announcement
                .property
                .city
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            format_price(announcement.price),
            announcement.views.to_string(),
            announcement_status(announcement.status_id).to_string(),
            format_date(&announcement.created_at),
        ]
    });
    write_csv(path, ANNOUNCEMENT_HEADERS, rows)
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}

fn count_or_na(value: Option<u32>) -> String {
    value.map_or_else(|| "N/A".to_string(), |n| n.to_string())
}

/// RFC 4180 quoting: fields containing separators, quotes or newlines
/// are wrapped and inner quotes doubled.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_csv<I>(path: &Path, headers: &[&str], rows: I) -> Result<usize, AppError>
where
    I: Iterator<Item = Vec<String>>,
{
    let mut content = String::new();
    content.push_str(
        &headers
            .iter()
            .map(|h| csv_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    content.push('\n');

    let mut count = 0;
    for row in rows {
        content.push_str(
            &row.iter()
                .map(|field| csv_field(field))
                .collect::<Vec<_>>()
                .join(","),
        );
        content.push('\n');
        count += 1;
    }

    fs::write(path, content).map_err(|e| {
        AppError::Display(DisplayError::Export {
            path: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })
    })?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample_property() -> Property {
        serde_json::from_value(json!({
            "propertyId": 5,
            "ownerId": 7,
            "propertyTypeID": 2,
            "propertyPrice": 250_000,
            "propertyArea": 120,
            "piscine": true,
            "livingRoom": null,
            "bedroom": 3,
            "garagePlace": 0,
            "bathroom": 2,
            "propertyApproved": true,
            "approvalComment": null,
            "approvalDate": null,
            "approverUser": null,
            "createdAt": "2025-03-14T09:30:00Z",
            "propertytype": { "propertyTypeId": 2, "propertyTypeName": "Maison" },
            "level": { "levelId": 1, "levelName": "Rez-de-chaussée" },
            "ville": { "villeId": 4, "villeName": "Thiès" },
            "account": {
                "accountId": 9,
                "accounTitle": "Sarr, Fall & Associés",
                "accountNumber": "AC-0009",
                "accountEmail": "contact@horizon.test",
                "accountIsActive": true,
                "accountTypeID": 3,
                "accountIsApproved": true,
                "validationComment": null,
                "createdAt": "2024-11-02T08:00:00Z",
                "accounttype": { "accountTypeId": 3, "accountTypeName": "Agence immobilière" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_export_properties_writes_all_filtered_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("proprietes.csv");
        let property = sample_property();

        let count = export_properties(&path, &[&property, &property]).unwrap();
        assert_eq!(count, 2);

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Reference,Type,Owner,Price,Area,Level,City,Bedrooms,Bathrooms,Living rooms,Garage places,Pool,Status,Created"
        );
        assert_eq!(content.lines().count(), 3);
        // owner title contains a comma and must be quoted
        assert!(content.contains("\"Sarr, Fall & Associés\""));
        assert!(content.contains("250 000 FCFA"));
        assert!(content.contains("Approved"));
    }

    #[test]
    fn test_export_empty_listing_writes_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        let count = export_announcements(&path, &[]).unwrap();
        assert_eq!(count, 0);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
