//! # CSV Storage Module
//!
//! Alternative storage backend using comma-separated files with a header row.
//! It carries the same fields as the JSON backend, which keeps the domain
//! layer storage-agnostic.
//!
//! ```text
//! data/
//! ├── users.csv
//! ├── tasks.csv
//! └── wishes.csv
//! ```
//!
//! ## File Format
//!
//! ```csv
//! username,password,role,points,level,ratings
//! alice,pw,CHILD,30,4,3.5;4
//! mom,pw,PARENT,,,
//! ```
//!
//! Text fields are quoted by the `csv` crate when they contain commas,
//! quotes or newlines. Child ratings are a single `;`-separated column.

pub mod task_repository;
pub mod user_repository;
pub mod wish_repository;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use super::connection::FileConnection;
use super::traits::Connection;

pub use task_repository::TaskRepository;
pub use user_repository::UserRepository;
pub use wish_repository::WishRepository;

pub const USERS_FILE: &str = "users.csv";
pub const TASKS_FILE: &str = "tasks.csv";
pub const WISHES_FILE: &str = "wishes.csv";

/// Connection for the CSV file layout
#[derive(Debug, Clone)]
pub struct CsvConnection {
    files: FileConnection,
}

impl CsvConnection {
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        Ok(Self {
            files: FileConnection::new(base_directory)?,
        })
    }
}

impl Connection for CsvConnection {
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

/// Parse every row of a CSV document with a header row
pub(crate) fn read_records<R: DeserializeOwned>(content: &str) -> Result<Vec<R>> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut records = Vec::new();
    for result in reader.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

/// Render records as a CSV document with a header row
pub(crate) fn write_records<R: Serialize>(records: &[R]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))
}
