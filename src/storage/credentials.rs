use super::Result;
use std::env;

#[cfg(not(test))]
use keyring::Entry;

/// Per-profile bearer token stored in the OS keyring. A token provided
/// through the environment or the command line always wins over a
/// stored one.
#[derive(Debug, Clone)]
pub struct Credentials {
    token: Option<String>,
    pub profile_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    EnvToken,
    Session,
}

impl Credentials {
    pub fn new(profile_name: String) -> Self {
        Self {
            token: None,
            profile_name,
        }
    }

    pub fn load(profile_name: &str) -> Result<Self> {
        let mut credentials = Self::new(profile_name.to_string());
        credentials.token = credentials.load_secret("token")?;
        Ok(credentials)
    }

    // use login
    pub fn save_token_for_profile(profile_name: &str, token: &str) -> Result<()> {
        let mut credentials = Self::new(profile_name.to_string());
        credentials.token = Some(token.to_string());
        credentials.save_secret("token", &credentials.token)?;
        Ok(())
    }

    // use logout
    pub fn clear_token_for_profile(profile_name: &str) -> Result<()> {
        let credentials = Self::new(profile_name.to_string());
        credentials.delete_secret("token")?;
        Ok(())
    }

    #[cfg(not(test))]
    fn load_secret(&self, key_type: &str) -> Result<Option<String>> {
        let entry = Entry::new("immo-cli", &format!("{}-{}", key_type, self.profile_name))
            .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;

        match entry.get_password() {
            Ok(v) => Ok(Some(v)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(crate::error::StorageError::KeyringError(e.to_string())),
        }
    }

    #[cfg(not(test))]
    fn save_secret(&self, key_type: &str, value: &Option<String>) -> Result<()> {
        if let Some(v) = value {
            let key_name = format!("{}-{}", key_type, self.profile_name);

            let entry = Entry::new("immo-cli", &key_name)
                .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;

            entry
                .set_password(v)
                .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;
        }

        Ok(())
    }

    #[cfg(not(test))]
    fn delete_secret(&self, key_type: &str) -> Result<()> {
        let key_name = format!("{}-{}", key_type, self.profile_name);

        let entry = Entry::new("immo-cli", &key_name)
            .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;

        match entry.delete_credential() {
            Ok(_) => Ok(()),
            // entry doesn't exist, which is fine for logout
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(crate::error::StorageError::KeyringError(e.to_string())),
        }
    }

    #[cfg(test)]
    fn load_secret(&self, key_type: &str) -> Result<Option<String>> {
        println!(
            "MOCK: Loading {} for profile {}",
            key_type, self.profile_name
        );
        Ok(None)
    }

    #[cfg(test)]
    fn save_secret(&self, key_type: &str, value: &Option<String>) -> Result<()> {
        println!(
            "MOCK: Saving {} = {:?} for profile {}",
            key_type, value, self.profile_name
        );
        Ok(())
    }

    #[cfg(test)]
    fn delete_secret(&self, key_type: &str) -> Result<()> {
        println!(
            "MOCK: Deleting {} for profile {}",
            key_type, self.profile_name
        );
        Ok(())
    }

    #[cfg(not(test))]
    fn has_env_token() -> bool {
        env::var("IMMO_API_TOKEN").is_ok_and(|token| !token.is_empty())
    }

    #[cfg(test)]
    fn has_env_token() -> bool {
        env::var("TEST_IMMO_API_TOKEN").is_ok_and(|token| !token.is_empty())
    }

    pub fn get_auth_mode(&self) -> AuthMode {
        if Self::has_env_token() {
            AuthMode::EnvToken
        } else {
            AuthMode::Session
        }
    }

    pub fn get_token(&self) -> Option<String> {
        self.token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_token_mock() {
        let result = Credentials::save_token_for_profile("test-profile", "tok");
        assert!(result.is_ok(), "Save should succeed in test environment");
    }

    #[test]
    fn test_load_credentials_mock() {
        let loaded = Credentials::load("test-profile");
        assert!(loaded.is_ok(), "Load should succeed in test environment");

        let creds = loaded.expect("Loaded credentials should not be None");
        assert_eq!(creds.profile_name, "test-profile");
        assert!(creds.get_token().is_none(), "Token should be None in mock");
    }

    #[test]
    fn test_clear_token_mock() {
        assert!(Credentials::clear_token_for_profile("test-profile").is_ok());
    }

    #[test]
    fn test_get_auth_mode_with_env_token() {
        let original = env::var("TEST_IMMO_API_TOKEN").ok();

        unsafe {
            env::set_var("TEST_IMMO_API_TOKEN", "tok");
        }
        let creds = Credentials::new("test".to_string());
        assert!(matches!(creds.get_auth_mode(), AuthMode::EnvToken));

        unsafe {
            match original {
                Some(value) => env::set_var("TEST_IMMO_API_TOKEN", value),
                None => env::remove_var("TEST_IMMO_API_TOKEN"),
            }
        }
    }
}
