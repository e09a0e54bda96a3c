//! Test utilities for file-backed storage.
//!
//! The temp directory lives as long as the environment, so test data is
//! removed even when a test panics.

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::FileConnection;
use super::csv::CsvConnection;
use super::json::JsonConnection;
use crate::domain::data_manager::DataManager;
use crate::domain::models::{User, UserRole};

pub struct TestEnvironment {
    /// Base directory path for manual inspection if needed
    pub base_path: PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        Ok(Self {
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }

    pub fn file_connection(&self) -> FileConnection {
        FileConnection::new(&self.base_path).expect("temp dir exists")
    }

    pub fn json_connection(&self) -> JsonConnection {
        JsonConnection::new(&self.base_path).expect("temp dir exists")
    }

    pub fn csv_connection(&self) -> CsvConnection {
        CsvConnection::new(&self.base_path).expect("temp dir exists")
    }

    /// An empty, loaded JSON-backed data manager
    pub fn data_manager(&self) -> DataManager {
        let mut data = DataManager::from_connection(&self.json_connection());
        data.load();
        data
    }

    /// A data manager with one parent ("mom"), one teacher ("mr_smith") and
    /// two children ("alice", "bob"). Every password is "pw".
    pub fn seeded_data_manager(&self) -> Result<DataManager> {
        let mut data = self.data_manager();
        data.add_user(User::new("mom", "pw", UserRole::Parent))?;
        data.add_user(User::new("mr_smith", "pw", UserRole::Teacher))?;
        data.add_user(User::new("alice", "pw", UserRole::Child))?;
        data.add_user(User::new("bob", "pw", UserRole::Child))?;
        data.save_users()?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new()?;
            base_path = env.base_path.clone();
            assert!(base_path.exists());
        }
        assert!(!base_path.exists());
        Ok(())
    }

    #[test]
    fn test_seeded_data_manager() -> Result<()> {
        let env = TestEnvironment::new()?;
        let data = env.seeded_data_manager()?;
        assert_eq!(data.users().count(), 4);
        assert_eq!(data.children().len(), 2);
        Ok(())
    }
}
