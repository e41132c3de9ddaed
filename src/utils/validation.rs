//! Input validation utilities for user-supplied configuration values
//! and form fields.

use crate::error::CliError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Minimal email shape check for form input and profile settings
pub fn validate_email(email: &str) -> crate::Result<()> {
    if email.is_empty() {
        return Err(CliError::InvalidArguments("Email cannot be empty".to_string()).into());
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(
            CliError::InvalidArguments(format!("Invalid email '{}': missing '@'", email)).into(),
        );
    };

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(CliError::InvalidArguments(format!(
            "Invalid email '{}': expected name@domain.tld",
            email
        ))
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_valid_urls() {
        assert!(validate_url("http://localhost:8000").is_ok());
        assert!(validate_url("https://api.exemple.test").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("localhost:8000").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_email_accepts_valid_addresses() {
        assert!(validate_email("staff@exemple.test").is_ok());
        assert!(validate_email("a.b@sub.domain.org").is_ok());
    }

    #[test]
    fn test_validate_email_rejects_invalid_addresses() {
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@domain.org").is_err());
        assert!(validate_email("name@nodot").is_err());
    }
}
