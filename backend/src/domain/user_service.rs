//! Account registration, login and lookups.

use anyhow::Result;
use log::{info, warn};

use crate::domain::commands::user::{LoginCommand, LoginResult, RegisterCommand, RegisterResult};
use crate::domain::data_manager::DataManager;
use crate::domain::errors::{AuthError, PermissionError, RegistrationError};
use crate::domain::models::User;

#[derive(Debug, Clone, Default)]
pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        Self
    }

    /// Register a new account and persist the user list.
    ///
    /// The username is trimmed; the password is stored exactly as given.
    pub fn register(&self, data: &mut DataManager, command: RegisterCommand) -> Result<RegisterResult> {
        let username = command.username.trim();
        if username.is_empty() {
            return Err(RegistrationError::EmptyUsername.into());
        }
        if command.password.is_empty() {
            return Err(RegistrationError::EmptyPassword.into());
        }

        let user = User::new(username, command.password, command.role);
        data.add_user(user.clone())?;
        data.save_users()?;

        info!("Registered {} '{}'", user.role().as_str(), user.username);
        Ok(RegisterResult { user })
    }

    pub fn login(&self, data: &DataManager, command: LoginCommand) -> Result<LoginResult> {
        match data.authenticate(command.username.trim(), &command.password) {
            Some(user) => {
                info!("User '{}' logged in", user.username);
                Ok(LoginResult { user: user.clone() })
            }
            None => {
                warn!("Failed login for '{}'", command.username);
                Err(AuthError::InvalidCredentials.into())
            }
        }
    }

    /// All children, ordered by username
    pub fn list_children(&self, data: &DataManager) -> Vec<User> {
        data.children().into_iter().cloned().collect()
    }

    /// Resolve the acting user of a command
    pub fn require_user<'a>(data: &'a DataManager, username: &str) -> Result<&'a User, PermissionError> {
        data.get_user(username)
            .ok_or_else(|| PermissionError::UnknownUser(username.to_string()))
    }
}
