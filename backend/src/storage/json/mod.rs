//! # JSON Storage Module
//!
//! Default storage backend. Each collection lives in its own pretty-printed
//! JSON array under the data directory:
//!
//! ```text
//! data/
//! ├── users.json
//! ├── tasks.json
//! └── wishes.json
//! ```
//!
//! Files are rewritten in full on every save through a temp file and rename.

pub mod task_repository;
pub mod user_repository;
pub mod wish_repository;

use anyhow::Result;
use std::path::Path;

use super::connection::FileConnection;
use super::traits::Connection;

pub use task_repository::TaskRepository;
pub use user_repository::UserRepository;
pub use wish_repository::WishRepository;

pub const USERS_FILE: &str = "users.json";
pub const TASKS_FILE: &str = "tasks.json";
pub const WISHES_FILE: &str = "wishes.json";

/// Connection for the JSON file layout
#[derive(Debug, Clone)]
pub struct JsonConnection {
    files: FileConnection,
}

impl JsonConnection {
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        Ok(Self {
            files: FileConnection::new(base_directory)?,
        })
    }
}

impl Connection for JsonConnection {
    type UserRepository = UserRepository;
    type TaskRepository = TaskRepository;
    type WishRepository = WishRepository;

    fn create_user_repository(&self) -> UserRepository {
        UserRepository::new(self.files.clone())
    }

    fn create_task_repository(&self) -> TaskRepository {
        TaskRepository::new(self.files.clone())
    }

    fn create_wish_repository(&self) -> WishRepository {
        WishRepository::new(self.files.clone())
    }
}
