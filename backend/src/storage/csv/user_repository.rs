use anyhow::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{read_records, write_records, USERS_FILE};
use crate::domain::models::User;
use crate::storage::connection::FileConnection;
use crate::storage::records::{convert_records, UserRecord};
use crate::storage::traits::UserStorage;

const RATING_SEPARATOR: char = ';';

/// CSV row for a user; ratings are flattened into one column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvUserRecord {
    pub username: String,
    pub password: String,
    pub role: String,
    pub points: Option<i64>,
    pub level: Option<i64>,
    pub ratings: String,
}

impl From<UserRecord> for CsvUserRecord {
    fn from(record: UserRecord) -> Self {
        let ratings = record
            .ratings
            .unwrap_or_default()
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(&RATING_SEPARATOR.to_string());
        CsvUserRecord {
            username: record.username,
            password: record.password,
            role: record.role,
            points: record.points,
            level: record.level,
            ratings,
        }
    }
}

impl TryFrom<CsvUserRecord> for UserRecord {
    type Error = anyhow::Error;

    fn try_from(record: CsvUserRecord) -> Result<Self> {
        let ratings = if record.ratings.trim().is_empty() {
            None
        } else {
            let parsed = record
                .ratings
                .split(RATING_SEPARATOR)
                .map(|r| {
                    r.trim()
                        .parse::<f64>()
                        .map_err(|e| anyhow::anyhow!("Invalid rating '{}': {}", r, e))
                })
                .collect::<Result<Vec<f64>>>()?;
            Some(parsed)
        };
        Ok(UserRecord {
            username: record.username,
            password: record.password,
            role: record.role,
            points: record.points,
            level: record.level,
            ratings,
        })
    }
}

impl TryFrom<CsvUserRecord> for User {
    type Error = anyhow::Error;

    fn try_from(record: CsvUserRecord) -> Result<Self> {
        User::try_from(UserRecord::try_from(record)?)
    }
}

/// CSV-backed user repository (`users.csv`)
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
            Some(content) => content,
            None => return Ok(Vec::new()),
        };

        let records: Vec<CsvUserRecord> = read_records(&content)?;
        let users = convert_records(records, "user");

        debug!("Loaded {} users from {:?}", users.len(), path);
        Ok(users)
    }

    fn save_users(&self, users: &[User]) -> Result<()> {
        let records: Vec<CsvUserRecord> = users
            .iter()
            .map(|user| CsvUserRecord::from(UserRecord::from(user)))
            .collect();
        let bytes = write_records(&records)?;

        let path = self.users_file_path();
        self.connection.write_atomic(&path, &bytes)?;

        info!("Saved {} users to {:?}", users.len(), path);
        Ok(())
    }
}
