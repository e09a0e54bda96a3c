use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use super::USERS_FILE;
use crate::domain::models::User;
use crate::storage::connection::FileConnection;
use crate::storage::records::{convert_records, UserRecord};
use crate::storage::traits::UserStorage;

/// JSON-backed user repository (`users.json`)
#[derive(Debug, Clone)]
pub struct UserRepository {
    connection: FileConnection,
}

impl UserRepository {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }

    fn users_file_path(&self) -> PathBuf {
        self.connection.file_path(USERS_FILE)
    }
}

impl UserStorage for UserRepository {
    fn load_users(&self) -> Result<Vec<User>> {
        let path = self.users_file_path();
        let content = match self.connection.read_if_exists(&path)? {
            Some(content) if !content.trim().is_empty() => content,
            _ => return Ok(Vec::new()),
        };

        let records: Vec<UserRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        let users = convert_records(records, "user");

        debug!("Loaded {} users from {:?}", users.len(), path);
        Ok(users)
    }

    fn save_users(&self, users: &[User]) -> Result<()> {
        let records: Vec<UserRecord> = users.iter().map(UserRecord::from).collect();
        let json = serde_json::to_string_pretty(&records)?;

        let path = self.users_file_path();
        self.connection.write_atomic(&path, json.as_bytes())?;

        info!("Saved {} users to {:?}", users.len(), path);
        Ok(())
    }
}
