use crate::error::CliError;
use std::io::{self, Write};

/// Credentials collected for the sudo sign-in endpoint. The identifier
/// is a phone number or an email address.
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub identifier: String,
    pub password: String,
}

impl LoginInput {
    /// Interactive collection: identifier from stdin (with an optional
    /// profile default), password without echo.
    pub fn collect(default_identifier: Option<&str>) -> crate::Result<Self> {
        let identifier = match default_identifier {
            Some(default) => {
                print!("Phone or email [{}]: ", default);
                let typed = Self::read_line()?;
                if typed.is_empty() {
                    default.to_string()
                } else {
                    typed
                }
            }
            None => {
                print!("Phone or email: ");
                Self::read_line()?
            }
        };

        let password = rpassword::prompt_password("Password: ").map_err(|e| {
            CliError::InvalidArguments(format!("Failed to read password: {}", e))
        })?;

        let input = LoginInput {
            identifier,
            password,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.identifier.trim().is_empty() {
            return Err(
                CliError::InvalidArguments("Phone or email cannot be empty".to_string()).into(),
            );
        }
        if self.password.is_empty() {
            return Err(CliError::InvalidArguments("Password cannot be empty".to_string()).into());
        }
        Ok(())
    }

    fn read_line() -> crate::Result<String> {
        io::stdout().flush().map_err(|e| {
            CliError::InvalidArguments(format!("Failed to flush prompt: {}", e))
        })?;
        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer).map_err(|e| {
            CliError::InvalidArguments(format!("Failed to read input: {}", e))
        })?;
        Ok(buffer.trim().to_string())
    }
}
