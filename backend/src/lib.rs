//! # KidTask Backend
//!
//! Non-UI logic for KidTask: parents and teachers assign tasks, children
//! complete them and earn points, ratings raise a child's level, and the level
//! unlocks the wishes a child can see.
//!
//! ## Architecture
//!
//! ```text
//! Binary / UI
//!     ↓
//! IO Layer (DTO mappers)
//!     ↓
//! Domain Layer (services, DataManager)
//!     ↓
//! Storage Layer (JSON or CSV files)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use log::info;

use crate::config::{AppConfig, StorageFormat};
use crate::domain::{DataManager, ProgressService, TaskService, UserService, WishService};
use crate::io::{TaskMapper, UserMapper, WishMapper};
use crate::storage::csv::CsvConnection;
use crate::storage::json::JsonConnection;
use shared::DashboardSnapshot;

/// Loaded data plus the services that operate on it
pub struct Backend {
    pub data: DataManager,
    pub user_service: UserService,
    pub task_service: TaskService,
    pub wish_service: WishService,
    pub progress_service: ProgressService,
}

impl Backend {
    /// Open the configured data directory and load every collection
    pub fn new(config: &AppConfig) -> Result<Self> {
        info!(
            "Opening {} storage in {:?}",
            config.storage_format.as_str(),
            config.data_dir
        );
        let mut data = match config.storage_format {
            StorageFormat::Json => DataManager::from_connection(&JsonConnection::new(&config.data_dir)?),
            StorageFormat::Csv => DataManager::from_connection(&CsvConnection::new(&config.data_dir)?),
        };
        data.load();

        Ok(Self {
            data,
            user_service: UserService::new(),
            task_service: TaskService::new(),
            wish_service: WishService::new(),
            progress_service: ProgressService::new(),
        })
    }

    /// Everything currently loaded, as DTOs
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            users: UserMapper::to_dto_list(self.data.users()),
            tasks: TaskMapper::to_dto_list(self.data.tasks()),
            wishes: WishMapper::to_dto_list(self.data.wishes()),
            progress: self.progress_service.all_children_progress(&self.data),
        }
    }
}
