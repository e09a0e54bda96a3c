use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use super::TASKS_FILE;
use crate::domain::models::Task;
use crate::storage::connection::FileConnection;
use crate::storage::records::{convert_records, TaskRecord};
use crate::storage::traits::TaskStorage;

/// JSON-backed task repository (`tasks.json`)
#[derive(Debug, Clone)]
pub struct TaskRepository {
    connection: FileConnection,
}

impl TaskRepository {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }

    fn tasks_file_path(&self) -> PathBuf {
        self.connection.file_path(TASKS_FILE)
    }
}

impl TaskStorage for TaskRepository {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        let path = self.tasks_file_path();
        let content = match self.connection.read_if_exists(&path)? {
            Some(content) if !content.trim().is_empty() => content,
            _ => return Ok(Vec::new()),
        };

        let records: Vec<TaskRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        let tasks = convert_records(records, "task");

        debug!("Loaded {} tasks from {:?}", tasks.len(), path);
        Ok(tasks)
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from).collect();
        let json = serde_json::to_string_pretty(&records)?;

        let path = self.tasks_file_path();
        self.connection.write_atomic(&path, json.as_bytes())?;

        info!("Saved {} tasks to {:?}", tasks.len(), path);
        Ok(())
    }
}
