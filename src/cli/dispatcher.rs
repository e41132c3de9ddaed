use crate::api::client::ApiClient;
use crate::cli::handlers::{AnnouncementHandler, PropertyHandler, UserHandler};
use crate::cli::main_types::{
    AnnouncementCommands, AuthCommands, Commands, ConfigCommands, PropertyCommands, UserCommands,
};
use crate::core::auth::LoginInput;
use crate::core::services::{AnnouncementService, PropertyService, UserService};
use crate::error::{AppError, CliError, ConfigError};
use crate::storage::config::{Config, Profile};
use crate::storage::credentials::{AuthMode, Credentials};
use std::path::PathBuf;
use std::sync::Arc;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    credentials: Credentials,
    verbose: bool,
    token_override: Option<String>,
}

impl Dispatcher {
    // Static helper function for verbose logging (used before self exists)
    fn print_verbose(verbose: bool, msg: &str) {
        if verbose {
            println!("Verbose: {}", msg);
        }
    }

    fn log_verbose(&self, msg: &str) {
        Self::print_verbose(self.verbose, msg);
    }

    pub fn new(
        config: Config,
        mut credentials: Credentials,
        verbose: bool,
        token_override: Option<String>,
        config_path: Option<PathBuf>,
    ) -> Self {
        let token_override = token_override.filter(|t| !t.is_empty());

        // Session auto-restoration: skip when a token was passed
        // explicitly, it has priority over the stored one
        if token_override.is_none() {
            Self::print_verbose(verbose, "Checking for saved session token...");

            match Credentials::load(&credentials.profile_name) {
                Ok(loaded_creds) => {
                    credentials = loaded_creds;
                    Self::print_verbose(
                        verbose,
                        &format!(
                            "Session credentials loaded for profile: {}",
                            credentials.profile_name
                        ),
                    );
                }
                Err(_) => {
                    Self::print_verbose(
                        verbose,
                        &format!(
                            "No saved session token found for profile: {}",
                            credentials.profile_name
                        ),
                    );
                }
            }
        } else {
            Self::print_verbose(verbose, "Token provided, skipping session restoration");
        }

        Self {
            config,
            config_path,
            credentials,
            verbose,
            token_override,
        }
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Auth { command } => self.handle_auth_command(command).await,
            Commands::Config { command } => self.handle_config_command(command).await,
            Commands::User { command } => self.handle_user_command(command).await,
            Commands::Property { command } => self.handle_property_command(command).await,
            Commands::Announcement { command } => self.handle_announcement_command(command).await,
        }
    }

    fn profile(&self) -> Result<&Profile, AppError> {
        let name = &self.credentials.profile_name;
        self.config.get_profile(name).ok_or_else(|| {
            AppError::Config(ConfigError::ProfileNotFound {
                name: name.clone(),
                hint: format!("'immo-cli config set url <api-url>' to configure '{}'", name),
            })
        })
    }

    fn resolve_token(&self) -> Option<String> {
        self.token_override
            .clone()
            .or_else(|| self.credentials.get_token())
    }

    fn build_client(&self) -> Result<Arc<ApiClient>, AppError> {
        let profile = self.profile()?;
        let token = self.resolve_token().ok_or_else(|| {
            AppError::Cli(CliError::AuthRequired {
                message: "This command requires authentication".to_string(),
                hint: "'immo-cli auth login' or pass --token".to_string(),
            })
        })?;
        Ok(Arc::new(ApiClient::with_token(
            profile.api_url.clone(),
            token,
        )?))
    }

    async fn handle_auth_command(&self, command: AuthCommands) -> Result<(), AppError> {
        match command {
            AuthCommands::Login => {
                self.log_verbose("Attempting auth login command");
                let profile = self.profile()?;
                let input = LoginInput::collect(profile.email.as_deref())?;

                let client = ApiClient::new(profile.api_url.clone())?;
                match client.login(&input.identifier, &input.password).await {
                    Ok(response) => {
                        Credentials::save_token_for_profile(
                            &self.credentials.profile_name,
                            &response.token,
                        )?;

                        println!(
                            "✅ Successfully logged in as {} {}",
                            response.first_name, response.last_name
                        );
                        println!("Connected to: {}", profile.api_url);
                        Ok(())
                    }
                    Err(e) => {
                        println!("❌ Login failed: {}", e);
                        Err(AppError::Api(e))
                    }
                }
            }
            AuthCommands::Logout => {
                self.log_verbose("Attempting auth logout command");
                Credentials::clear_token_for_profile(&self.credentials.profile_name)?;
                println!(
                    "✅ Successfully logged out from profile: {}",
                    self.credentials.profile_name
                );
                Ok(())
            }
            AuthCommands::Status => {
                self.log_verbose("Attempting auth status command");

                println!("Authentication Status:");
                println!("=====================");

                match self.credentials.get_auth_mode() {
                    AuthMode::EnvToken => {
                        println!("Authentication Mode: Token (env or --token)");
                    }
                    AuthMode::Session => {
                        println!("Authentication Mode: Session");
                    }
                }

                match self.resolve_token() {
                    Some(token) => println!("Token: {}", Self::mask_token(&token)),
                    None => println!("Token: (not set, use 'auth login')"),
                }

                println!("\nActive Profile: {}", self.credentials.profile_name);
                if let Ok(profile) = self.profile() {
                    println!("API URL: {}", profile.api_url);
                }

                Ok(())
            }
        }
    }

    fn mask_token(token: &str) -> String {
        if token.len() > 8 {
            format!("{}...{}", &token[..4], &token[token.len() - 4..])
        } else {
            "*****".to_string()
        }
    }

    async fn handle_config_command(&mut self, command: ConfigCommands) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                self.log_verbose("Attempting config show command");

                println!("Current Configuration:");
                println!("=====================");

                if let Some(default_profile) = &self.config.default_profile {
                    println!("Default Profile: {}", default_profile);
                } else {
                    println!("Default Profile: (not set)");
                }

                println!("\nProfiles:");
                if self.config.profiles.is_empty() {
                    println!("  No profiles configured");
                } else {
                    for (name, profile) in &self.config.profiles {
                        println!("  [{}]", name);
                        println!("    API URL: {}", profile.api_url);
                        if let Some(email) = &profile.email {
                            println!("    Email: {}", email);
                        }
                    }
                }

                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                self.log_verbose(&format!(
                    "Attempting config set - key: {}, value: {}",
                    key, value
                ));

                let profile_name = self.credentials.profile_name.clone();
                let mut profile = self
                    .config
                    .get_profile(&profile_name)
                    .cloned()
                    .unwrap_or(Profile {
                        api_url: String::new(),
                        email: None,
                    });

                match key.as_str() {
                    "url" => {
                        crate::utils::validation::validate_url(&value)?;
                        profile.api_url = value.clone();
                    }
                    "email" => {
                        crate::utils::validation::validate_email(&value)?;
                        profile.email = Some(value.clone());
                    }
                    _ => {
                        return Err(AppError::Config(ConfigError::InvalidValue {
                            field: key,
                            value,
                            reason: "Use 'url' or 'email'".to_string(),
                        }));
                    }
                }

                self.config.set_profile(profile_name.clone(), profile);
                self.config.save(self.config_path.clone())?;
                println!("✅ Set profile '{}' {} to: {}", profile_name, key, value);
                Ok(())
            }
        }
    }

    async fn handle_user_command(&self, command: UserCommands) -> Result<(), AppError> {
        let service = UserService::new(self.build_client()?);
        UserHandler::new()
            .handle(command, &service, self.verbose)
            .await
    }

    async fn handle_property_command(&self, command: PropertyCommands) -> Result<(), AppError> {
        let service = PropertyService::new(self.build_client()?);
        PropertyHandler::new()
            .handle(command, &service, self.verbose)
            .await
    }

    async fn handle_announcement_command(
        &self,
        command: AnnouncementCommands,
    ) -> Result<(), AppError> {
        let service = AnnouncementService::new(self.build_client()?);
        AnnouncementHandler::new()
            .handle(command, &service, self.verbose)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn create_test_dispatcher(verbose: bool) -> Dispatcher {
        let config = Config {
            default_profile: Some("test".to_string()),
            profiles: {
                let mut profiles = HashMap::new();
                profiles.insert(
                    "test".to_string(),
                    Profile {
                        api_url: "http://example.test".to_string(),
                        email: Some("staff@exemple.test".to_string()),
                    },
                );
                profiles
            },
        };
        let creds = Credentials::new("test".to_string());
        Dispatcher::new(config, creds, verbose, None, None)
    }

    #[tokio::test]
    async fn test_dispatcher_creation() {
        let d = create_test_dispatcher(true);
        assert!(d.verbose);
        assert!(d.token_override.is_none());
    }

    #[test]
    fn test_empty_token_override_is_ignored() {
        let config = Config::default();
        let creds = Credentials::new("test".to_string());
        let d = Dispatcher::new(config, creds, false, Some(String::new()), None);
        assert!(d.token_override.is_none());
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(Dispatcher::mask_token("abcd1234efgh"), "abcd...efgh");
        assert_eq!(Dispatcher::mask_token("short"), "*****");
    }

    #[tokio::test]
    async fn test_auth_logout_implemented() {
        let d = create_test_dispatcher(true);
        let result = d.handle_auth_command(AuthCommands::Logout).await;
        assert!(
            result.is_ok(),
            "Auth logout should succeed in test environment"
        );
    }

    #[tokio::test]
    async fn test_auth_status_implemented() {
        let d = create_test_dispatcher(true);
        let result = d.handle_auth_command(AuthCommands::Status).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_config_show_implemented() {
        let mut d = create_test_dispatcher(true);
        let result = d.handle_config_command(ConfigCommands::Show).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_config_set_rejects_unknown_key() {
        let mut d = create_test_dispatcher(true);
        let result = d
            .handle_config_command(ConfigCommands::Set {
                key: "timeout".to_string(),
                value: "30".to_string(),
            })
            .await;
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[tokio::test]
    async fn test_config_set_rejects_invalid_url() {
        let mut d = create_test_dispatcher(true);
        let result = d
            .handle_config_command(ConfigCommands::Set {
                key: "url".to_string(),
                value: "not-a-url".to_string(),
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_entity_commands_require_token() {
        // no stored token and no override: user commands must refuse
        let mut d = create_test_dispatcher(false);
        let result = d
            .dispatch(Commands::User {
                command: UserCommands::Activate { id: 1 },
            })
            .await;
        assert!(matches!(
            result,
            Err(AppError::Cli(CliError::AuthRequired { .. }))
        ));
    }

    #[test]
    fn test_build_client_with_token_override() {
        let config = Config {
            default_profile: Some("test".to_string()),
            profiles: {
                let mut profiles = HashMap::new();
                profiles.insert(
                    "test".to_string(),
                    Profile {
                        api_url: "http://example.test".to_string(),
                        email: None,
                    },
                );
                profiles
            },
        };
        let creds = Credentials::new("test".to_string());
        let d = Dispatcher::new(config, creds, false, Some("tok-override".to_string()), None);

        let client = d.build_client().expect("client should build");
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn test_profile_not_found_hint() {
        let config = Config::default();
        let creds = Credentials::new("missing".to_string());
        let d = Dispatcher::new(config, creds, false, Some("tok".to_string()), None);

        let result = d.build_client();
        match result {
            Err(AppError::Config(ConfigError::ProfileNotFound { name, hint })) => {
                assert_eq!(name, "missing");
                assert!(hint.contains("config set url"));
            }
            other => panic!("Expected ProfileNotFound, got {:?}", other.err()),
        }
    }
}
