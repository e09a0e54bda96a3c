//! Typed errors raised by the services.
//!
//! Services return `anyhow::Result`; callers that care about the reason use
//! `downcast_ref` on one of these.

use thiserror::Error;

use crate::domain::models::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Username cannot be empty")]
    EmptyUsername,
    #[error("Password cannot be empty")]
    EmptyPassword,
    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    #[error("Unknown user '{0}'")]
    UnknownUser(String),
    #[error("{role} '{username}' is not allowed to {action}")]
    NotAllowed {
        username: String,
        role: &'static str,
        action: &'static str,
    },
}

impl PermissionError {
    pub fn not_allowed(username: &str, role: UserRole, action: &'static str) -> Self {
        PermissionError::NotAllowed {
            username: username.to_string(),
            role: role.as_str(),
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("Unknown child '{0}'")]
    UnknownChild(String),
    #[error("Required level must be between 1 and 5, got {0}")]
    RequiredLevelOutOfRange(u8),
    #[error("Task '{0}' not found")]
    TaskNotFound(String),
    #[error("Wish '{0}' not found")]
    WishNotFound(String),
}
